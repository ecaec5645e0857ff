use std::collections::HashSet;
use std::error::Error;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::Instant;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use grid_raycaster::movement::{self, Intent};
use grid_raycaster::scaler::{ScaleLut, blit_nearest};
use grid_raycaster::texture::TextureSet;
use grid_raycaster::{DEFAULT_MAP, GridMap, MovementConfig, Pose, RenderConfig, Renderer};

const TEXTURE_SIZE: usize = 64;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    map: GridMap,
    pose: Pose,
    renderer: Renderer,
    movement: MovementConfig,

    // HUD
    frame_counter: u32,
    last_fps_print: Instant,

    // Internal framebuffer at the configured resolution
    fb: Vec<u32>,
    scale_lut: ScaleLut,

    // Input
    keys_down: HashSet<KeyCode>,
    last_tick: Instant,
}

impl App {
    fn new(map: GridMap, config: RenderConfig) -> Self {
        let fb = vec![0; config.screen_width() * config.screen_height()];
        Self {
            window: None,
            surface: None,
            map,
            pose: Pose::new(3.5, 3.5, std::f32::consts::FRAC_PI_4),
            renderer: Renderer::new(config, TextureSet::procedural(TEXTURE_SIZE)),
            movement: MovementConfig::default(),

            frame_counter: 0,
            last_fps_print: Instant::now(),

            fb,
            scale_lut: ScaleLut::default(),

            keys_down: HashSet::new(),
            last_tick: Instant::now(),
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Box<dyn Error>> {
        let config = self.renderer.config();
        let attributes = Window::default_attributes()
            .with_title("Raycaster - WASD to move, arrows to turn")
            .with_inner_size(LogicalSize::new(
                config.screen_width() as f64,
                config.screen_height() as f64,
            ));

        let window = Rc::new(event_loop.create_window(attributes)?);
        let context = softbuffer::Context::new(window.clone())?;
        let surface = softbuffer::Surface::new(&context, window.clone())?;

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        Ok(())
    }

    fn intent(&self) -> Intent {
        let axis = |pos: KeyCode, neg: KeyCode| -> f32 {
            let mut v = 0.0;
            if self.keys_down.contains(&pos) {
                v += 1.0;
            }
            if self.keys_down.contains(&neg) {
                v -= 1.0;
            }
            v
        };
        Intent {
            forward: axis(KeyCode::KeyW, KeyCode::KeyS),
            strafe: axis(KeyCode::KeyD, KeyCode::KeyA),
            turn: axis(KeyCode::ArrowRight, KeyCode::ArrowLeft),
        }
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick);
        self.last_tick = now;

        let intent = self.intent();
        if !intent.is_idle() {
            movement::apply(&mut self.pose, intent, &self.map, &self.movement, dt);
        }
    }

    fn redraw(&mut self, id: WindowId) -> Result<(), Box<dyn Error>> {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return Ok(()),
        };

        let size = window.inner_size();
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return Ok(()); // Minimized window, skip drawing
        };
        surface.resize(w, h)?;

        let (dw, dh) = (size.width as usize, size.height as usize);
        if self.scale_lut.dst_size() != (dw, dh) {
            let config = self.renderer.config();
            self.scale_lut = ScaleLut::new(dw, dh, config.screen_width(), config.screen_height());
        }

        // The pose is only read from here until the frame is presented
        let pose = self.pose;
        self.renderer.render_frame(&mut self.fb, &self.map, &pose);

        let mut buf = surface.buffer_mut()?;
        blit_nearest(
            &mut buf,
            &self.fb,
            self.renderer.config().screen_width(),
            &self.scale_lut,
        );
        buf.present()?;

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            let fps = self.frame_counter as f32 / elapsed;
            info!("FPS: {:.1}", fps);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.create_window(event_loop) {
            error!(%err, "failed to create window");
            event_loop.exit();
            return;
        }
        self.last_tick = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested; stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if code == KeyCode::Escape {
                        event_loop.exit();
                    }
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                self.tick();
                if let Err(err) = self.redraw(id) {
                    error!(%err, "failed to present frame");
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(new_size) => {
                // The scale table is rebuilt on the next redraw
                info!(width = new_size.width, height = new_size.height, "window resized");
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_map() -> Result<GridMap, Box<dyn Error>> {
    if let Some(path) = std::env::args().nth(1) {
        match GridMap::load(&path) {
            Ok(map) => return Ok(map),
            Err(err) => warn!(%err, "falling back to the built-in map"),
        }
    }
    Ok(GridMap::parse(DEFAULT_MAP)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let map = load_map()?;
    let config = RenderConfig::default();
    info!(
        map_width = map.width(),
        map_height = map.height(),
        screen_width = config.screen_width(),
        screen_height = config.screen_height(),
        columns = config.columns(),
        fov = config.fov(),
        "starting renderer"
    );

    let event_loop = EventLoop::new()?;
    // Redraws are requested continuously, like a game loop
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(map, config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
