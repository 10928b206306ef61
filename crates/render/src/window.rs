//! On-screen display backed by winit and wgpu.
//!
//! The event loop is pumped once per tick with a zero timeout instead of
//! being handed control, so the caller's loop stays in charge of timing.

use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyEvent, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder};

use crate::display::{check_frame_size, Display};
use crate::error::DisplayError;
use crate::input::{InputEvent, Key};
use crate::pipeline;

fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

pub struct WindowDisplay {
    event_loop: EventLoop<()>,
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    frame_texture: wgpu::Texture,
    frame_size: (u32, u32),
    pending_resize: Option<PhysicalSize<u32>>,
}

impl WindowDisplay {
    /// Open a `width`x`height` window titled `title`.
    ///
    /// # Errors
    ///
    /// Fails if no window, adapter, device or surface can be obtained.
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, DisplayError> {
        let event_loop = EventLoop::new()?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(title)
                .with_inner_size(PhysicalSize::new(width, height))
                .with_resizable(false)
                .build(&event_loop)?,
        );

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(DisplayError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Display Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(DisplayError::NoAdapter)?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            desired_maximum_frame_latency: 2,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let bind_group_layout = pipeline::create_bind_group_layout(&device);
        let frame_texture = pipeline::create_frame_texture(&device, width, height);
        let bind_group = pipeline::create_bind_group(&device, &bind_group_layout, &frame_texture);
        let pipeline = pipeline::create_render_pipeline(&device, &bind_group_layout, format);

        tracing::info!(
            "Window open: {}x{} on {} ({:?})",
            width,
            height,
            adapter.get_info().name,
            format
        );

        Ok(Self {
            event_loop,
            window,
            surface,
            device,
            queue,
            config,
            pipeline,
            bind_group,
            frame_texture,
            frame_size: (width, height),
            pending_resize: None,
        })
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn upload(&self, frame: &RgbaImage) {
        let (width, height) = self.frame_size;
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.frame_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            frame.as_raw(),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }

    fn acquire(&mut self) -> Result<wgpu::SurfaceTexture, DisplayError> {
        match self.surface.get_current_texture() {
            Ok(output) => Ok(output),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("Surface lost, reconfiguring");
                self.resize(self.window.inner_size());
                Ok(self.surface.get_current_texture()?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl Display for WindowDisplay {
    fn size(&self) -> (u32, u32) {
        self.frame_size
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let mut resized = None;
        let status = self
            .event_loop
            .pump_events(Some(Duration::ZERO), |event, elwt| {
                let Event::WindowEvent { event, .. } = event else {
                    return;
                };
                match event {
                    WindowEvent::CloseRequested => {
                        events.push(InputEvent::CloseRequested);
                        elwt.exit();
                    }
                    WindowEvent::Resized(size) => resized = Some(size),
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(code),
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    } => events.push(InputEvent::KeyPressed(map_key(code))),
                    _ => {}
                }
            });

        if matches!(status, PumpStatus::Exit(_)) && !events.contains(&InputEvent::CloseRequested) {
            events.push(InputEvent::CloseRequested);
        }
        if resized.is_some() {
            self.pending_resize = resized;
        }
        events
    }

    fn present(&mut self, frame: &RgbaImage) -> Result<(), DisplayError> {
        check_frame_size(self.frame_size, frame)?;
        if let Some(size) = self.pending_resize.take() {
            self.resize(size);
        }
        // Minimised: nothing to draw into.
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }

        self.upload(frame);
        let output = self.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("blit") });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("blit"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.draw(0..3, 0..1);
        }
        self.queue.submit(Some(encoder.finish()));
        output.present();
        Ok(())
    }
}
