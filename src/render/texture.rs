use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Decodes an image file to tightly packed RGBA8
pub fn load_rgba(path: &Path) -> Result<image::RgbaImage> {
    let image = image::open(path).with_context(|| format!("failed to decode {}", path.display()))?;
    Ok(image.to_rgba8())
}

/// Size that fits `(width, height)` inside `max` on both axes, keeping the
/// aspect ratio. `None` when it already fits.
pub fn fit_within(width: u32, height: u32, max: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max {
        return None;
    }
    let scale = max as f64 / longest as f64;
    let shrink = |v: u32| ((v as f64 * scale).round() as u32).clamp(1, max);
    Some((shrink(width), shrink(height)))
}

/// Downscales `image` so neither side exceeds `max`
pub fn fit_to_limit(image: image::RgbaImage, max: u32) -> image::RgbaImage {
    match fit_within(image.width(), image.height(), max) {
        Some((width, height)) => {
            image::imageops::resize(&image, width, height, image::imageops::FilterType::Triangle)
        }
        None => image,
    }
}

pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    pub fn from_rgba(device: &wgpu::Device, queue: &wgpu::Queue, label: &str, width: u32, height: u32, data: &[u8]) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            texture.as_image_copy(),
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Loads each image path once. Paths that fail to load map to a 1x1 white
/// texture so the material colour shows through unchanged.
pub struct TextureCache {
    white: GpuTexture,
    loaded: HashMap<PathBuf, Option<GpuTexture>>,
    pub sampler: wgpu::Sampler,
}

impl TextureCache {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let white = GpuTexture::from_rgba(device, queue, "White Texture", 1, 1, &[255, 255, 255, 255]);
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Repeat Sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        Self {
            white,
            loaded: HashMap::new(),
            sampler,
        }
    }

    /// Decodes and uploads `path` unless it was tried before
    pub fn load(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, path: &Path) {
        if self.loaded.contains_key(path) {
            return;
        }
        let max = device.limits().max_texture_dimension_2d;
        let texture = match load_rgba(path) {
            Ok(image) if image.width() == 0 || image.height() == 0 => {
                log::warn!("{} is empty; using the plain material colour", path.display());
                None
            }
            Ok(image) => {
                log::info!("loaded texture {} ({}x{})", path.display(), image.width(), image.height());
                if fit_within(image.width(), image.height(), max).is_some() {
                    log::warn!("{} exceeds the {}px texture limit; downscaling", path.display(), max);
                }
                let image = fit_to_limit(image, max);
                Some(GpuTexture::from_rgba(
                    device,
                    queue,
                    &path.display().to_string(),
                    image.width(),
                    image.height(),
                    image.as_raw(),
                ))
            }
            Err(err) => {
                log::warn!("{:#}; using the plain material colour", err);
                None
            }
        };
        self.loaded.insert(path.to_path_buf(), texture);
    }

    /// View for a loaded path, white for no path or a failed load
    pub fn view(&self, path: Option<&Path>) -> &wgpu::TextureView {
        path.and_then(|p| self.loaded.get(p))
            .and_then(Option::as_ref)
            .map_or(&self.white.view, |t| &t.view)
    }
}
