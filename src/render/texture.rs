use anyhow::{anyhow, bail, Context};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

const PLACEHOLDER_PIXEL: [u8; 4] = [255, 255, 255, 255];

/// Material texture plus its view; dropped together when replaced.
pub(crate) struct MaterialTexture {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl MaterialTexture {
    /// 1x1 white texel, so the material renders untextured until (or unless)
    /// the image arrives.
    pub(crate) fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_rgba(device, queue, "wave_placeholder", 1, 1, &PLACEHOLDER_PIXEL)
    }

    pub(crate) fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        image: &image::RgbaImage,
    ) -> Self {
        let (width, height) = image.dimensions();
        Self::from_rgba(device, queue, "wave_texture", width, height, image.as_raw())
    }

    fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Self {
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
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            _texture: texture,
            view,
        }
    }
}

/// Downloads and decodes an image into RGBA8.
pub async fn fetch_rgba(url: &str) -> anyhow::Result<image::RgbaImage> {
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow!("fetching {url}: {e:?}"))?;
    let response: web::Response = response
        .dyn_into()
        .map_err(|_| anyhow!("fetching {url}: not a Response"))?;
    if !response.ok() {
        bail!("fetching {url}: HTTP {}", response.status());
    }
    let buffer = response
        .array_buffer()
        .map_err(|e| anyhow!("reading {url}: {e:?}"))?;
    let buffer = JsFuture::from(buffer)
        .await
        .map_err(|e| anyhow!("reading {url}: {e:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    let image = image::load_from_memory(&bytes).with_context(|| format!("decoding {url}"))?;
    Ok(image.to_rgba8())
}
