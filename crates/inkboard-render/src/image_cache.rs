//! Decoded bitmaps for image elements.
//!
//! Data URLs decode synchronously on request. Any other source stays
//! pending until the host fetches the bytes and calls [`ImageCache::resolve`].
//! Elements stay hit-testable while their bitmap is pending.

use crate::renderer::{RenderResult, RendererError};
use base64::{Engine, engine::general_purpose::STANDARD};
use inkboard_core::Element;
use std::collections::HashMap;
use std::sync::Arc;

/// An RGBA8 bitmap.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Row-major, unpremultiplied RGBA8.
    pub pixels: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Decode PNG, JPEG or WebP bytes.
    pub fn decode(bytes: &[u8]) -> RenderResult<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: Arc::new(rgba.into_raw()),
        })
    }
}

/// Load state of one source.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageState {
    Pending,
    Ready(DecodedImage),
    Failed(String),
}

/// Cache keyed by image `src`.
#[derive(Debug, Default)]
pub struct ImageCache {
    entries: HashMap<String, ImageState>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache key for the rasterised form of an equation.
    pub fn equation_key(latex: &str) -> String {
        format!("latex:{latex}")
    }

    /// Start loading `src` if it is not known yet.
    pub fn request(&mut self, src: &str) -> &ImageState {
        self.entries.entry(src.to_string()).or_insert_with(|| {
            if !src.starts_with("data:") {
                return ImageState::Pending;
            }
            match decode_data_url(src) {
                Ok(image) => ImageState::Ready(image),
                Err(err) => {
                    log::warn!("image data URL failed to decode: {err}");
                    ImageState::Failed(err.to_string())
                }
            }
        })
    }

    /// Request every image source referenced by `elements`.
    pub fn request_elements<'e>(&mut self, elements: impl IntoIterator<Item = &'e Element>) {
        for element in elements {
            if let Element::Image(image) = element {
                self.request(&image.src);
            }
        }
    }

    /// Supply fetched bytes for a pending source.
    ///
    /// Returns `true` the first time a source settles, telling the host to
    /// redraw once; later calls for the same source return `false`.
    pub fn resolve(&mut self, src: &str, bytes: &[u8]) -> bool {
        let state = match DecodedImage::decode(bytes) {
            Ok(image) => ImageState::Ready(image),
            Err(err) => {
                log::warn!("image {src} failed to decode: {err}");
                ImageState::Failed(err.to_string())
            }
        };
        self.settle(src, state)
    }

    /// Insert an already decoded bitmap, e.g. a rasterised equation.
    pub fn insert(&mut self, src: &str, image: DecodedImage) -> bool {
        self.settle(src, ImageState::Ready(image))
    }

    /// Mark a source as unloadable (network error, missing file).
    pub fn fail(&mut self, src: &str, reason: impl Into<String>) -> bool {
        self.settle(src, ImageState::Failed(reason.into()))
    }

    fn settle(&mut self, src: &str, state: ImageState) -> bool {
        if matches!(self.entries.get(src), Some(ImageState::Ready(_) | ImageState::Failed(_))) {
            return false;
        }
        self.entries.insert(src.to_string(), state);
        true
    }

    pub fn get(&self, src: &str) -> Option<&ImageState> {
        self.entries.get(src)
    }

    /// The bitmap for `src` when it is ready.
    pub fn ready(&self, src: &str) -> Option<&DecodedImage> {
        match self.entries.get(src) {
            Some(ImageState::Ready(image)) => Some(image),
            _ => None,
        }
    }

    /// Sources still waiting for bytes.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, state)| matches!(state, ImageState::Pending))
            .map(|(src, _)| src.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode a `data:<mime>;base64,<payload>` URL.
pub fn decode_data_url(src: &str) -> RenderResult<DecodedImage> {
    let rest = src
        .strip_prefix("data:")
        .ok_or_else(|| RendererError::InvalidDataUrl(truncate(src)))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| RendererError::InvalidDataUrl(truncate(src)))?;
    if !meta.ends_with(";base64") {
        return Err(RendererError::InvalidDataUrl(truncate(src)));
    }
    let bytes = STANDARD.decode(payload.trim())?;
    DecodedImage::decode(&bytes)
}

fn truncate(src: &str) -> String {
    src.chars().take(48).collect()
}
