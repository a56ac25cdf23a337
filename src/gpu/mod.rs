//! GPU resource management and drawing.
//!
//! Provides wgpu device/surface initialization, growable buffers, the depth
//! attachment, and the instanced mesh renderer both demos draw through.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// Instanced filled/wireframe mesh drawing with forward lighting.
pub mod mesh_renderer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth attachment texture.
pub mod texture;
