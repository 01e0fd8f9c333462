use crate::{
    foundation::{
        core::{Position, Vec2},
        error::{ParseError, ParseErrorKind},
    },
    parse::cursor::Cursor,
    show::registry::{PresentationEntry, PresentationRegistry, ScreenDimensions, Timing},
};

/// Parse configuration text into a [`PresentationRegistry`].
///
/// The format is line oriented:
///
/// ```text
/// screen = 1920, 1080
/// image "a.png" {
///     position = 0, 0
///     size = 1920, 1080
///     start = 0
///     duration = 3
///     fadeIn = 1
///     fadeOut = 1
/// }
/// ```
///
/// `screen` must come first and only once. Unrecognized text at the top level
/// is skipped one byte at a time (and reported through `tracing`); inside an
/// `image` block anything but the six known fields is an error. Any error
/// aborts the whole parse.
#[tracing::instrument(skip(text), fields(len = text.len()))]
pub fn parse_config(text: &str) -> Result<PresentationRegistry, ParseError> {
    let mut parser = DirectiveParser {
        cursor: Cursor::new(text),
        screen: None,
        entries: Vec::new(),
        skipped_from: None,
    };
    parser.run()?;
    Ok(PresentationRegistry::from_file_order(
        parser.screen,
        parser.entries,
    ))
}

struct DirectiveParser {
    cursor: Cursor,
    screen: Option<ScreenDimensions>,
    /// File order; reversed once when the registry is built.
    entries: Vec<PresentationEntry>,
    /// Start of the run of top-level text currently being skipped.
    skipped_from: Option<Position>,
}

/// Fields accumulated inside one `image { ... }` block.
struct ImageBlock {
    position: Vec2,
    size: Vec2,
    timing: Timing,
}

impl Default for ImageBlock {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            size: Vec2::ZERO,
            // An omitted `duration` stays 0, so the image never shows.
            timing: Timing {
                start: 0.0,
                duration: 0.0,
                ..Timing::default()
            },
        }
    }
}

impl DirectiveParser {
    fn run(&mut self) -> Result<(), ParseError> {
        while !self.cursor.at_end() {
            self.cursor.skip_whitespace(true);
            let at = self.cursor.position();

            if self.cursor.check_keyword("screen") {
                self.flush_skipped(at);
                self.screen_directive(at)?;
            } else if self.cursor.check_keyword("image") {
                self.flush_skipped(at);
                self.image_directive(at)?;
            } else if !self.cursor.at_end() {
                self.skipped_from.get_or_insert(at);
                self.cursor.advance()?;
            }
        }
        let end = self.cursor.position();
        self.flush_skipped(end);
        Ok(())
    }

    fn flush_skipped(&mut self, until: Position) {
        if let Some(from) = self.skipped_from.take() {
            tracing::warn!(
                "at {from}, skipped unrecognized text ({} bytes)",
                until.offset - from.offset
            );
        }
    }

    fn screen_directive(&mut self, at: Position) -> Result<(), ParseError> {
        if self.screen.is_some() {
            return Err(ParseError::new(ParseErrorKind::DuplicateScreen, at));
        }

        let value_at = self.cursor.position();
        let v = self.cursor.read_assigned_vec2()?;
        if !(v.x > 0.0 && v.y > 0.0) {
            return Err(ParseError::new(
                ParseErrorKind::DegenerateScreen {
                    width: v.x,
                    height: v.y,
                },
                value_at,
            ));
        }

        tracing::info!("screen: {}, {}", v.x, v.y);
        self.screen = Some(ScreenDimensions::new(v.x, v.y));
        Ok(())
    }

    fn image_directive(&mut self, at: Position) -> Result<(), ParseError> {
        let Some(screen) = self.screen else {
            return Err(ParseError::new(ParseErrorKind::ScreenNotSet, at));
        };

        self.cursor.skip_whitespace(false);
        let source = self.cursor.read_quoted_string()?;
        self.cursor.skip_whitespace(true);
        self.cursor.expect_literal("{")?;

        let block = self.image_block()?;

        self.cursor.skip_whitespace(false);
        self.cursor.expect_literal("\n")?;

        let entry = PresentationEntry {
            source,
            position: screen.normalize(block.position),
            size: screen.normalize(block.size),
            timing: block.timing,
        };
        tracing::info!(
            source = %entry.source,
            start = entry.timing.start,
            duration = entry.timing.duration,
            "image"
        );
        self.entries.push(entry);
        Ok(())
    }

    fn image_block(&mut self) -> Result<ImageBlock, ParseError> {
        let mut block = ImageBlock::default();
        // Every field consumes its own newline, so `}` must open a line.
        while !self.cursor.check_keyword("}") {
            self.cursor.skip_whitespace(true);
            let at = self.cursor.position();

            if self.cursor.check_keyword("position") {
                block.position = self.cursor.read_assigned_vec2()?;
            } else if self.cursor.check_keyword("size") {
                block.size = self.cursor.read_assigned_vec2()?;
            } else if self.cursor.check_keyword("start") {
                block.timing.start = self.time_field("start", at)?;
            } else if self.cursor.check_keyword("duration") {
                block.timing.duration = self.time_field("duration", at)?;
            } else if self.cursor.check_keyword("fadeIn") {
                block.timing.fade_in = self.time_field("fadeIn", at)?;
            } else if self.cursor.check_keyword("fadeOut") {
                block.timing.fade_out = self.time_field("fadeOut", at)?;
            } else if self.cursor.at_end() {
                return Err(self.cursor.error(ParseErrorKind::Expected("}".to_string())));
            } else {
                return Err(self.cursor.error(ParseErrorKind::UnexpectedToken));
            }
        }
        Ok(block)
    }

    fn time_field(&mut self, field: &'static str, at: Position) -> Result<f64, ParseError> {
        let value = self.cursor.read_assigned_number()?;
        if value < 0.0 {
            return Err(ParseError::new(ParseErrorKind::NegativeTime { field }, at));
        }
        Ok(value)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/parse/directive.rs"]
mod tests;
