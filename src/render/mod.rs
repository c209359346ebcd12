//! wgpu forward renderer for the scene graph

mod renderer;
mod texture;
mod uniforms;

pub use renderer::{HudInfo, SceneRenderer};
pub use texture::{load_rgba, GpuTexture, TextureCache};
pub use uniforms::{FrameUniform, LightUniform, ObjectUniform, FLAG_WAVE, MAX_LIGHTS};
