use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowId};

use armature::{
    Adjust, AxesMesh, AxesPass, AxisFlags, GpuContext, Input, InputSnapshot, Scene,
};

const WINDOW_SIZE: u32 = 1280;

struct DemoApp {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    pass: Option<AxesPass>,
    mesh: Option<AxesMesh>,
    scene: Option<Scene>,
    input: Input,
    axes: AxisFlags,
}

impl Default for DemoApp {
    fn default() -> Self {
        Self {
            window: None,
            gpu: None,
            pass: None,
            mesh: None,
            scene: None,
            input: Input::new(),
            axes: AxisFlags::default(),
        }
    }
}

impl DemoApp {
    /// Maps this frame's keyboard state to the scene's input snapshot.
    ///
    /// X/Y/Z presses flip the axis toggles; the six digit keys are held
    /// actions and mutually exclusive, first match winning.
    fn snapshot(&mut self) -> InputSnapshot {
        if self.input.key_pressed(KeyCode::KeyX) {
            self.axes.x = !self.axes.x;
        }
        if self.input.key_pressed(KeyCode::KeyY) {
            self.axes.y = !self.axes.y;
        }
        if self.input.key_pressed(KeyCode::KeyZ) {
            self.axes.z = !self.axes.z;
        }

        let held = |key| self.input.key_down(key);
        let action = if held(KeyCode::Digit1) {
            Some(Adjust::TranslateInc)
        } else if held(KeyCode::Digit2) {
            Some(Adjust::TranslateDec)
        } else if held(KeyCode::Digit3) {
            Some(Adjust::RotateInc)
        } else if held(KeyCode::Digit4) {
            Some(Adjust::RotateDec)
        } else if held(KeyCode::Digit5) {
            Some(Adjust::ScaleInc)
        } else if held(KeyCode::Digit6) {
            Some(Adjust::ScaleDec)
        } else {
            None
        };

        InputSnapshot {
            exit: self.input.key_pressed(KeyCode::Escape),
            add_instance: self.input.key_pressed(KeyCode::NumpadAdd)
                || self.input.key_pressed(KeyCode::Equal),
            remove_instance: self.input.key_pressed(KeyCode::NumpadSubtract)
                || self.input.key_pressed(KeyCode::Minus),
            action,
            axes: self.axes,
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let window_attrs = Window::default_attributes()
            .with_title("armature")
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_SIZE, WINDOW_SIZE));
        let window = Arc::new(event_loop.create_window(window_attrs).unwrap());

        let gpu = GpuContext::new(window.clone());
        let pass = AxesPass::new(&gpu);
        let mesh = AxesMesh::new(&gpu);
        let scene = Scene::new(gpu.aspect()).expect("default projection parameters are valid");
        log::info!("scene ready: one instance, {}x{}", gpu.width(), gpu.height());

        self.gpu = Some(gpu);
        self.pass = Some(pass);
        self.mesh = Some(mesh);
        self.scene = Some(scene);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        self.input.handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size.width, size.height);
                }
                if let Some(scene) = &mut self.scene {
                    scene.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let snapshot = self.snapshot();
                if snapshot.exit {
                    event_loop.exit();
                    return;
                }

                let (Some(gpu), Some(pass), Some(mesh), Some(scene)) = (
                    self.gpu.as_ref(),
                    self.pass.as_mut(),
                    self.mesh.as_ref(),
                    self.scene.as_mut(),
                ) else {
                    return;
                };

                // Input mutation strictly precedes the traversal.
                scene.update(&snapshot);

                let view = match scene.view_matrix() {
                    Ok(view) => view,
                    Err(err) => {
                        log::error!("camera failure: {}", err);
                        event_loop.exit();
                        return;
                    }
                };
                let proj = scene.projection.matrix();
                let models = match scene.model_matrices() {
                    Ok(models) => models,
                    Err(err) => {
                        log::error!("render traversal failure: {}", err);
                        event_loop.exit();
                        return;
                    }
                };

                pass.ensure_depth_size(gpu);
                pass.prepare(gpu, &view, &proj, &models);

                let output = gpu.surface.get_current_texture().unwrap();
                let target = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                let mut encoder = gpu
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: None });

                {
                    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("Axes Pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &target,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        })],
                        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                            view: &pass.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        }),
                        timestamp_writes: None,
                        occlusion_query_set: None,
                    });

                    pass.render(&mut render_pass, mesh);
                }

                gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();

                self.input.begin_frame();
                self.window.as_ref().unwrap().request_redraw();
            }
            _ => (),
        }
    }
}

fn main() {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("logger init");

    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp::default();
    event_loop.run_app(&mut app).unwrap();
}
