use super::*;

fn at(line: u32, column: u32) -> Position {
    Position {
        offset: 0,
        line,
        column,
    }
}

#[test]
fn parse_error_display_names_line_and_column() {
    let err = ParseError::new(ParseErrorKind::NumberExpected, at(3, 14));
    assert_eq!(err.to_string(), "at 3:14, expected number");
}

#[test]
fn newline_expectation_is_spelled_out() {
    let err = ParseError::new(ParseErrorKind::Expected("\n".to_string()), at(2, 9));
    assert_eq!(err.to_string(), "at 2:9, expected newline");

    let err = ParseError::new(ParseErrorKind::Expected("=".to_string()), at(1, 8));
    assert_eq!(err.to_string(), "at 1:8, expected '='");
}

#[test]
fn unterminated_string_mentions_opening_quote() {
    let kind = ParseErrorKind::UnterminatedString { opened_at: at(4, 7) };
    assert_eq!(kind.to_string(), "unterminated string (opened at 4:7)");
}

#[test]
fn display_prefixes_are_stable() {
    let parse: SlideshowError = ParseError::new(ParseErrorKind::DuplicateScreen, at(1, 1)).into();
    assert!(parse.to_string().starts_with("parse error: at 1:1,"));
    assert!(parse.as_parse().is_some());

    assert!(SlideshowError::asset("x").to_string().contains("asset error:"));
    assert!(
        SlideshowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SlideshowError::asset("x").as_parse().is_none());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SlideshowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
