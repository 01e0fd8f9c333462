use crate::foundation::core::{Rect, Vec2};

/// Virtual screen size in whatever unit the configuration uses (pixels,
/// monitors, ...). Image coordinates are divided by it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScreenDimensions {
    pub width: f64,
    pub height: f64,
}

impl ScreenDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Map a configuration-space vector into screen-fraction space.
    pub fn normalize(self, v: Vec2) -> Vec2 {
        Vec2::new(v.x / self.width, v.y / self.height)
    }
}

/// Timing of one entry, all in seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    /// Show time at which the entry starts fading in.
    pub start: f64,
    /// Total time on screen, fades included.
    pub duration: f64,
    pub fade_in: f64,
    pub fade_out: f64,
}

impl Timing {
    /// Show time at which the entry is finished.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            start: 0.0,
            duration: 5.0,
            fade_in: 1.0,
            fade_out: 1.0,
        }
    }
}

/// One configured image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PresentationEntry {
    /// Image reference exactly as written in the configuration.
    pub source: String,
    /// Bottom-left corner in screen-fraction space.
    pub position: Vec2,
    /// Extent in screen-fraction space.
    pub size: Vec2,
    pub timing: Timing,
}

impl PresentationEntry {
    /// Entry with default timing.
    pub fn new(source: impl Into<String>, position: Vec2, size: Vec2) -> Self {
        Self {
            source: source.into(),
            position,
            size,
            timing: Timing::default(),
        }
    }

    /// Normalized rectangle covered by the image.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position.to_point(), self.size.to_size())
    }
}

/// Immutable result of one parse pass.
///
/// Entries are stored in reverse file order: the first `image` block of the
/// file is the last entry. Drawing in storage order therefore puts images
/// that appear earlier in the file on top.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PresentationRegistry {
    screen: Option<ScreenDimensions>,
    entries: Vec<PresentationEntry>,
}

impl PresentationRegistry {
    /// `screen` is `None` only for a file that declares neither a screen nor
    /// any image.
    pub(crate) fn from_file_order(
        screen: Option<ScreenDimensions>,
        mut entries: Vec<PresentationEntry>,
    ) -> Self {
        entries.reverse();
        Self { screen, entries }
    }

    pub fn screen(&self) -> Option<ScreenDimensions> {
        self.screen
    }

    /// Entries in draw order (reverse file order).
    pub fn entries(&self) -> &[PresentationEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PresentationEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PresentationEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Latest time at which any entry is still on screen; `0.0` when empty.
    pub fn show_end(&self) -> f64 {
        self.entries
            .iter()
            .map(|e| e.timing.end())
            .fold(0.0, f64::max)
    }
}

impl<'a> IntoIterator for &'a PresentationRegistry {
    type Item = &'a PresentationEntry;
    type IntoIter = std::slice::Iter<'a, PresentationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/registry.rs"]
mod tests;
