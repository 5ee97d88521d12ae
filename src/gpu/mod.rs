//! GPU plumbing: device/surface ownership, uniform upload, depth target.

/// Core wgpu device, queue, surface, and configuration owner.
pub mod render_context;
/// Depth attachment texture.
pub mod texture;
/// Aligned persistent uniform upload buffer.
pub mod upload_buffer;

pub use render_context::{RenderContext, RenderContextError};
pub use texture::DepthTexture;
pub use upload_buffer::UploadBuffer;
