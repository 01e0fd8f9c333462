//! Multi-screen slideshow engine.
//!
//! A slideshow is described by a small line-oriented text file: one `screen`
//! directive giving the size of the virtual screen, then any number of
//! `image "<path>" { ... }` blocks placing an image on that screen and timing
//! its fade in, hold and fade out.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: `&str -> PresentationRegistry` (entries normalized to
//!    screen-fraction space, stored in reverse file order)
//! 2. **Load**: `PresentationRegistry + ImageLoader -> Slideshow` (one image
//!    handle per entry, missing images are fatal)
//! 3. **Evaluate**: `Slideshow + time -> EvaluatedFrame` (opacity of every
//!    visible entry)
//! 4. **Compose**: `EvaluatedFrame + MonitorView -> ViewportDraw` (draw list a
//!    renderer can execute without knowing anything about the timeline)
//!
//! Parsing and evaluation are pure; the only IO happens in the
//! [`ImageLoader`] chosen by the host.
#![forbid(unsafe_code)]

mod assets;
mod compose;
mod eval;
mod foundation;
mod parse;
mod show;

pub use assets::store::{
    ImageHandle, ImageLoader, ImageStore, PreparedImage, SourceCatalog, decode_image,
    normalize_path,
};
pub use compose::viewport::{Compositor, DrawInstruction, MonitorView, ViewportDraw};
pub use eval::clock::{Clock, ManualClock, MonotonicClock};
pub use eval::timeline::{EvaluatedEntry, EvaluatedFrame, Evaluator, opacity};
pub use foundation::core::{Affine, Point, Position, Rect, Vec2};
pub use foundation::error::{
    ParseError, ParseErrorKind, SlideshowError, SlideshowResult,
};
pub use parse::cursor::Cursor;
pub use parse::directive::parse_config;
pub use show::registry::{PresentationEntry, PresentationRegistry, ScreenDimensions, Timing};
pub use show::slideshow::Slideshow;
