use std::error::Error;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use raycaster::canvas::Canvas;
use raycaster::game::{self, Game};
use raycaster::grid::Grid;
use raycaster::input::InputState;
use raycaster::logging;
use raycaster::scaler::Upscaler;
use raycaster::settings::{self, Settings};
use raycaster::vector::Vector2;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    game: Game,
    input: InputState,

    // Logical 3D view, stretched to the window
    view: Canvas,
    // Window-pixel minimap, composited top-left
    minimap: Canvas,
    upscaler: Upscaler,

    next_frame: Instant,
}

impl App {
    fn new(settings: Settings, grid: Grid) -> Self {
        let now = Instant::now();
        let (lw, lh) = game::logical_size(&settings, 640, 380);
        Self {
            window: None,
            surface: None,
            input: InputState::new(settings.touch_momentum),
            view: Canvas::new(lw, lh),
            minimap: Canvas::new(0, 0),
            upscaler: Upscaler::new(lw, lh, lw, lh),
            game: Game::new(settings, grid, now),
            next_frame: now,
        }
    }

    fn rebuild_canvases(&mut self, dst_w: usize, dst_h: usize) {
        let settings = self.game.settings();
        let (lw, lh) = game::logical_size(settings, dst_w, dst_h);
        let minimap = game::minimap_size(settings, dst_w, dst_h);

        self.view.set_size(lw, lh);
        self.minimap.set_size(minimap, minimap);
        if !self.upscaler.matches(lw, lh, dst_w, dst_h) {
            self.upscaler = Upscaler::new(lw, lh, dst_w, dst_h);
        }
        info!(
            window = ?(dst_w, dst_h),
            logical = ?(lw, lh),
            minimap,
            rays = self.game.view().ray_count(lw),
            "canvases resized"
        );
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop, id: WindowId) {
        let (window, surface) = match (&self.window, &mut self.surface) {
            (Some(w), Some(s)) if w.id() == id => (w, s),
            _ => return,
        };

        let size = window.inner_size();
        let (Some(dw), Some(dh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // minimized
            self.next_frame = Instant::now() + self.game.idle_delay();
            return;
        };

        let delay = self
            .game
            .frame(&mut self.input, Instant::now, &mut self.view, &mut self.minimap);
        self.next_frame = Instant::now() + delay;

        if let Err(e) = surface.resize(dw, dh) {
            warn!("surface resize failed: {e}");
            return;
        }
        let mut buf = match surface.buffer_mut() {
            Ok(buf) => buf,
            Err(e) => {
                warn!("surface buffer unavailable: {e}");
                return;
            }
        };

        let (dw, dh) = (dw.get() as usize, dh.get() as usize);
        if !self.upscaler.matches(self.view.width(), self.view.height(), dw, dh) {
            // resize event not seen yet
            self.upscaler = Upscaler::new(self.view.width(), self.view.height(), dw, dh);
        }
        self.upscaler.blit(self.view.pixels(), &mut buf);
        self.minimap.draw_to(&mut buf, dw, 0, 0);

        if let Err(e) = buf.present() {
            error!("present failed: {e}");
            event_loop.exit();
        }
    }

    fn teardown(&mut self) {
        self.input.clear();
        self.game.destroy();
        self.surface = None;
        self.window = None;
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let attributes = Window::default_attributes()
            .with_title("Raycaster")
            .with_inner_size(LogicalSize::new(960.0, 570.0));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                error!("could not create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        let surface = match surface {
            Ok(surface) => surface,
            Err(e) => {
                error!("could not create drawing surface: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.rebuild_canvases(size.width as usize, size.height as usize);
        info!("window created");

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        self.next_frame = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested, shutting down");
                self.teardown();
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
            } => {
                self.input
                    .handle_key_code(code, state == ElementState::Pressed);
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.set_touch_mode(false);
                self.input
                    .pointer_moved(Vector2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::Touch(touch) => match touch.phase {
                TouchPhase::Started | TouchPhase::Moved => {
                    let at = touch.location;
                    self.input
                        .touch_moved(Vector2::new(at.x as f32, at.y as f32));
                }
                TouchPhase::Ended | TouchPhase::Cancelled => self.input.touch_ended(),
            },

            WindowEvent::Focused(false) => self.input.reset_all_keys(),

            WindowEvent::Resized(new_size) => {
                self.rebuild_canvases(new_size.width as usize, new_size.height as usize);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop, id),

            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };
        if Instant::now() >= self.next_frame {
            window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_frame));
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(settings::DEFAULT_PATH));
    let settings = Settings::load(&path)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(settings, Grid::sample());
    event_loop.run_app(&mut app)?;
    Ok(())
}
