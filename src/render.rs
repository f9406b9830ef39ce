use crate::constants::CLEAR_COLOR;
use crate::core::{Camera, FrameSnapshot};
use glam::{Mat4, Quat};
use web_sys as web;

pub mod geometry;
mod helpers;
mod post;
mod scene;
mod targets;
mod video;

use post::PostResources;
use scene::{SceneResources, SceneUniforms};
use targets::RenderTargets;
use video::VideoTexture;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    targets: RenderTargets,
    scene: SceneResources,
    post: PostResources,
    box_texture: VideoTexture,
    linear_sampler: wgpu::Sampler,
    camera: Camera,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let linear_sampler = helpers::create_linear_sampler(&device, "linear_sampler");
        let targets = RenderTargets::new(&device, width, height);
        let scene = SceneResources::new(&device);
        let post = PostResources::new(&device, &queue, &targets, format, &linear_sampler);
        let box_texture =
            VideoTexture::new(&device, &queue, &scene.texture_layout, &linear_sampler);
        log::info!("[render] surface {}x{} {:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            targets,
            scene,
            post,
            box_texture,
            linear_sampler,
            camera: Camera::perspective(width as f32 / height as f32),
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
        })
    }

    /// Draw one frame: scene into HDR, then bloom and composite to the canvas.
    pub fn render(
        &mut self,
        snapshot: &FrameSnapshot,
        video: Option<&web::HtmlVideoElement>,
    ) -> Result<(), wgpu::SurfaceError> {
        if snapshot.video_ready {
            if let Some(v) = video {
                self.box_texture.upload(
                    &self.device,
                    &self.queue,
                    &self.scene.texture_layout,
                    &self.linear_sampler,
                    v,
                );
            }
        }

        self.camera.apply_pose(snapshot.camera);
        let model = Mat4::from_scale_rotation_translation(
            snapshot.box_scale,
            Quat::IDENTITY,
            snapshot.box_position,
        );
        let uniforms = SceneUniforms {
            view_proj: self.camera.view_projection().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
        };
        self.queue
            .write_buffer(&self.scene.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        self.scene.encode(
            &mut encoder,
            &self.targets.hdr_view,
            &self.targets.depth_view,
            self.clear_color,
            &self.box_texture.bind_group,
        );
        self.post
            .encode(&mut encoder, &self.targets, &view, self.clear_color);

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
