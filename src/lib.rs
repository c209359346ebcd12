pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod gallery;
pub mod geometry;
pub mod interaction;
pub mod math;
pub mod render;
pub mod scene;
pub mod scenes;

pub use config::GalleryConfig;
pub use gallery::Gallery;
pub use scenes::{build_gallery, GalleryScene, Variant};
