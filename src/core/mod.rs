mod clock;
mod gpu_context;

pub use clock::{Clock, FrameInfo};
pub use gpu_context::GpuContext;
