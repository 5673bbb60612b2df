use std::env;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use glam::Vec2;
use log::{debug, info};
use pollster::block_on;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::run_on_demand::EventLoopExtRunOnDemand;
use winit::window::WindowBuilder;

use glimmer::app::{global_params, FrameStats};
use glimmer::input::{self, Action, DragState, LIGHT_NUDGE};
use glimmer::{
    frame_drawables, Material, MeshCache, Primitive, Renderer, SceneState, TextureLoader,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    if options.summary_only {
        return print_scene_summary();
    }
    match run_interactive(&options) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to --summary-only mode (set DISPLAY or install X11 libs to enable rendering)."
                );
                print_scene_summary()
            } else {
                Err(err)
            }
        }
    }
}

fn print_scene_summary() -> Result<()> {
    let mut cache = MeshCache::new();
    let state = SceneState::new();
    let drawables = frame_drawables(state.light.position);
    println!("Scene contains {} objects:", drawables.len());
    for drawable in &drawables {
        let mesh = cache.get_or_create(drawable.primitive);
        println!(
            " - {} ({} vertices, {})",
            describe_primitive(drawable.primitive),
            mesh.vertex_count,
            describe_material(drawable.material)
        );
    }
    println!("Cached {} unique meshes", cache.len());
    Ok(())
}

fn describe_primitive(primitive: Primitive) -> String {
    match primitive {
        Primitive::Box => "box".to_string(),
        Primitive::Sphere(spec) => {
            format!("sphere {}x{}", spec.lat_segments, spec.long_segments)
        }
    }
}

fn describe_material(material: Material) -> String {
    match material {
        Material::Flat(_) => "flat color".to_string(),
        Material::UvDebug => "uv debug".to_string(),
        Material::Texture(unit) => format!("texture unit {unit}"),
    }
}

fn run_interactive(options: &CliOptions) -> Result<()> {
    let mut event_loop =
        EventLoop::new().map_err(|err| WindowInitError::from_error("event loop", err))?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("glimmer")
            .with_inner_size(LogicalSize::new(1280.0, 720.0))
            .build(&event_loop)
            .map_err(|err| WindowInitError::from_error("window", err))?,
    );

    let renderer = block_on(Renderer::new(Arc::clone(&window)))
        .map_err(|err| WindowInitError::from_error("renderer", err))?;
    let textures = TextureLoader::spawn(&options.assets);

    let mut app = AppState {
        renderer,
        state: SceneState::new(),
        drag: DragState::new(),
        cursor: Vec2::ZERO,
        textures,
        stats: FrameStats::new(),
        started: Instant::now(),
        last_error: None,
    };

    event_loop.run_on_demand(|event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);
        if let Err(err) = app.process_event(&event, elwt) {
            app.last_error = Some(err);
            elwt.exit();
        }
    })?;

    if let Some(err) = app.last_error {
        return Err(err);
    }

    Ok(())
}

struct AppState {
    renderer: Renderer,
    state: SceneState,
    drag: DragState,
    cursor: Vec2,
    textures: TextureLoader,
    stats: FrameStats,
    started: Instant,
    last_error: Option<anyhow::Error>,
}

#[derive(Debug)]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_error(stage: &str, err: impl fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

impl fmt::Display for WindowInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for WindowInitError {}

impl AppState {
    fn process_event(&mut self, event: &Event<()>, elwt: &EventLoopWindowTarget<()>) -> Result<()> {
        match event {
            Event::WindowEvent { event, window_id } if *window_id == self.renderer.window_id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        elwt.exit();
                    }
                    WindowEvent::Resized(size) => {
                        self.renderer.resize(*size);
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        self.handle_keyboard(event);
                    }
                    WindowEvent::MouseInput { state, button, .. } => {
                        self.handle_mouse_button(*state, *button);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        self.cursor = Vec2::new(position.x as f32, position.y as f32);
                        if self.drag.is_active() {
                            self.drag.move_to(self.cursor, &mut self.state);
                            self.renderer.window().request_redraw();
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        self.render_frame()?;
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                self.renderer.window().request_redraw();
            }
            _ => {}
        }
        Ok(())
    }

    fn render_frame(&mut self) -> Result<()> {
        for image in self.textures.drain() {
            self.renderer.apply_texture(&image);
        }

        self.state.tick(self.started.elapsed().as_secs_f32());
        let params = global_params(&self.state, self.renderer.aspect());
        self.renderer.update_globals(&params);

        let drawables = frame_drawables(self.state.light.position);
        if let Err(err) = self.renderer.render(&drawables) {
            match err {
                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                    let size = self.renderer.window().inner_size();
                    self.renderer.resize(size);
                }
                wgpu::SurfaceError::OutOfMemory => {
                    return Err(anyhow!("GPU is out of memory"));
                }
                wgpu::SurfaceError::Timeout => {
                    info!("Surface timeout; retrying next frame");
                }
            }
        }

        if let Some(report) = self.stats.end_frame() {
            debug!("{report}");
            self.renderer.window().set_title(&format!("glimmer | {report}"));
        }
        Ok(())
    }

    fn handle_keyboard(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(action) = action_for_key(code) else {
            return;
        };
        input::apply_action(action, &mut self.state);
        // Input re-renders immediately rather than waiting for the next
        // scheduled frame.
        self.renderer.window().request_redraw();
    }

    fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => self.drag.begin(self.cursor),
            ElementState::Released => self.drag.end(),
        }
    }
}

fn action_for_key(code: KeyCode) -> Option<Action> {
    Some(match code {
        KeyCode::KeyW => Action::MoveForward,
        KeyCode::KeyS => Action::MoveBackward,
        KeyCode::KeyA => Action::MoveLeft,
        KeyCode::KeyD => Action::MoveRight,
        KeyCode::KeyQ => Action::PanLeft,
        KeyCode::KeyE => Action::PanRight,
        KeyCode::KeyO => Action::LookUp,
        KeyCode::KeyP => Action::LookDown,
        KeyCode::KeyL => Action::ToggleLight,
        KeyCode::KeyK => Action::ToggleTint,
        KeyCode::KeyF => Action::ToggleSpot,
        KeyCode::KeyM => Action::ToggleAnimation,
        KeyCode::KeyN => Action::ToggleNormals,
        KeyCode::ArrowLeft => Action::NudgeLight {
            component: 0,
            delta: -LIGHT_NUDGE,
        },
        KeyCode::ArrowRight => Action::NudgeLight {
            component: 0,
            delta: LIGHT_NUDGE,
        },
        KeyCode::PageUp => Action::NudgeLight {
            component: 1,
            delta: LIGHT_NUDGE,
        },
        KeyCode::PageDown => Action::NudgeLight {
            component: 1,
            delta: -LIGHT_NUDGE,
        },
        KeyCode::ArrowUp => Action::NudgeLight {
            component: 2,
            delta: -LIGHT_NUDGE,
        },
        KeyCode::ArrowDown => Action::NudgeLight {
            component: 2,
            delta: LIGHT_NUDGE,
        },
        _ => return None,
    })
}

struct CliOptions {
    assets: PathBuf,
    summary_only: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut assets = PathBuf::from("assets");
        let mut summary_only = false;
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--assets" => {
                    assets = PathBuf::from(args.next().ok_or_else(|| {
                        anyhow!("--assets expects a directory argument")
                    })?);
                }
                "--summary-only" => summary_only = true,
                other => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Usage: glimmer [--assets <dir>] [--summary-only]"
                    ));
                }
            }
        }
        Ok(Self {
            assets,
            summary_only,
        })
    }
}
