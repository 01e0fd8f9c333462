use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{SlideshowError, SlideshowResult};

/// Opaque reference to an image resolved by an [`ImageLoader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ImageHandle(pub(crate) u32);

impl ImageHandle {
    pub fn from_u32(raw: u32) -> Self {
        Self(raw)
    }

    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Maps image references from the configuration to renderable handles.
///
/// A failure is fatal for the slideshow: an entry cannot be shown without its
/// content.
pub trait ImageLoader {
    fn load(&mut self, source: &str) -> SlideshowResult<ImageHandle>;
}

/// Decoded raster image in straight (non-premultiplied) RGBA8.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    pub rgba8: Arc<Vec<u8>>,
}

/// Decode encoded image bytes to RGBA8.
pub fn decode_image(bytes: &[u8]) -> SlideshowResult<PreparedImage> {
    let rgba = image::load_from_memory(bytes)
        .context("decode image from memory")?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PreparedImage {
        width,
        height,
        rgba8: Arc::new(rgba.into_raw()),
    })
}

/// Loader that reads and decodes image files relative to a root directory.
///
/// Every distinct normalized path is decoded once; repeated references share
/// a handle.
#[derive(Clone, Debug)]
pub struct ImageStore {
    root: PathBuf,
    ids_by_path: HashMap<String, ImageHandle>,
    images: Vec<PreparedImage>,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ids_by_path: HashMap::new(),
            images: Vec::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, handle: ImageHandle) -> Option<&PreparedImage> {
        self.images.get(handle.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    fn read_bytes(&self, norm_path: &str) -> SlideshowResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(|e| SlideshowError::asset(format!("required asset missing: {e:#}")))
    }
}

impl ImageLoader for ImageStore {
    fn load(&mut self, source: &str) -> SlideshowResult<ImageHandle> {
        let norm = normalize_path(source)?;
        if let Some(&handle) = self.ids_by_path.get(&norm) {
            return Ok(handle);
        }

        let bytes = self.read_bytes(&norm)?;
        let image = decode_image(&bytes)
            .map_err(|e| SlideshowError::asset(format!("image '{norm}': {e:#}")))?;
        tracing::debug!(
            path = %norm,
            width = image.width,
            height = image.height,
            "decoded image"
        );

        let handle = next_handle(self.images.len())?;
        self.images.push(image);
        self.ids_by_path.insert(norm, handle);
        Ok(handle)
    }
}

/// Loader that only interns source names; it never touches the filesystem.
#[derive(Clone, Debug, Default)]
pub struct SourceCatalog {
    ids_by_path: HashMap<String, ImageHandle>,
    sources: Vec<String>,
}

impl SourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, handle: ImageHandle) -> Option<&str> {
        self.sources.get(handle.0 as usize).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl ImageLoader for SourceCatalog {
    fn load(&mut self, source: &str) -> SlideshowResult<ImageHandle> {
        let norm = normalize_path(source)?;
        if let Some(&handle) = self.ids_by_path.get(&norm) {
            return Ok(handle);
        }
        let handle = next_handle(self.sources.len())?;
        self.sources.push(norm.clone());
        self.ids_by_path.insert(norm, handle);
        Ok(handle)
    }
}

fn next_handle(len: usize) -> SlideshowResult<ImageHandle> {
    u32::try_from(len)
        .map(ImageHandle)
        .map_err(|_| SlideshowError::asset("too many images"))
}

/// Canonical form of an image reference, used as the dedupe key.
///
/// Backslashes become `/`, empty and `.` components are dropped. A leading
/// `/` is kept so absolute paths stay absolute.
pub fn normalize_path(source: &str) -> SlideshowResult<String> {
    let s = source.replace('\\', "/");
    if s.trim().is_empty() {
        return Err(SlideshowError::asset("image path must be non-empty"));
    }

    let parts: Vec<&str> = s
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect();
    if parts.is_empty() {
        return Err(SlideshowError::asset(format!(
            "image path '{source}' must contain a file name"
        )));
    }

    let joined = parts.join("/");
    Ok(if s.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
