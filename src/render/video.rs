use crate::constants::BOX_FALLBACK_RGBA;
use wgpu;
use web_sys as web;

const VIDEO_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Box material texture. Starts as a 1x1 fallback color and switches to the
/// video's frames once it can decode them.
pub(crate) struct VideoTexture {
    texture: wgpu::Texture,
    pub(crate) bind_group: wgpu::BindGroup,
    size: [u32; 2],
    live: bool,
}

impl VideoTexture {
    pub(crate) fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
    ) -> Self {
        let (texture, bind_group) = create(device, layout, sampler, 1, 1);
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &BOX_FALLBACK_RGBA,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        Self {
            texture,
            bind_group,
            size: [1, 1],
            live: false,
        }
    }

    /// Copy the current video frame, resizing the texture on the first frame
    /// or when the stream dimensions change.
    pub(crate) fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        video: &web::HtmlVideoElement,
    ) {
        let size = [video.video_width(), video.video_height()];
        if size[0] == 0 || size[1] == 0 {
            return;
        }
        if !self.live || self.size != size {
            let (texture, bind_group) = create(device, layout, sampler, size[0], size[1]);
            self.texture = texture;
            self.bind_group = bind_group;
            self.size = size;
            self.live = true;
            log::info!("[render] video texture {}x{}", size[0], size[1]);
        }
        queue.copy_external_image_to_texture(
            &wgpu::CopyExternalImageSourceInfo {
                source: wgpu::ExternalImageSource::HTMLVideoElement(video.clone()),
                origin: wgpu::Origin2d::ZERO,
                flip_y: false,
            },
            wgpu::CopyExternalImageDestInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
                color_space: wgpu::PredefinedColorSpace::Srgb,
                premultiplied_alpha: false,
            },
            wgpu::Extent3d {
                width: size[0],
                height: size[1],
                depth_or_array_layers: 1,
            },
        );
    }
}

fn create(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::BindGroup) {
    let (texture, view) = super::helpers::create_texture(
        device,
        "box_texture",
        width,
        height,
        VIDEO_FORMAT,
        wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_DST
            | wgpu::TextureUsages::RENDER_ATTACHMENT,
    );
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("box_texture_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    (texture, bind_group)
}
