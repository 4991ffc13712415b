//! Inkboard Render Library
//!
//! Backend-agnostic rendering for Inkboard. Drawing code targets the
//! [`Surface`] trait; [`DisplayList`] records a frame for a host to replay
//! onto its own 2D API.

mod display_list;
pub mod draw;
mod image_cache;
mod renderer;
mod surface;

pub use display_list::{DisplayList, DrawCommand};
pub use draw::render_export;
pub use image_cache::{DecodedImage, ImageCache, ImageState, decode_data_url};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
pub use surface::Surface;
