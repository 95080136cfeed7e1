use std::rc::Rc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{CursorIcon, Window};

use collate::atlas::GlyphAtlasIndex;
use collate::cli::StartupConfig;
use collate::commands::Cmd;
use collate::decode::decode_image;
use collate::interaction::{hit_test, Point};
use collate::messages::{Msg, PointerMsg, SourceMsg};
use collate::model::AppModel;
use collate::placement::PlacementStore;
use collate::update::{request_sources, update};

use super::input::handle_key;
use super::renderer::Renderer;

/// How often pending decodes are polled for
const DECODE_POLL_INTERVAL: Duration = Duration::from_millis(30);

pub struct App {
    model: AppModel,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    mouse_position: Option<(f64, f64)>,
    left_mouse_down: bool,
    /// Display size the window was last fitted to
    fitted_size: (u32, u32),
    title: String,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
}

impl App {
    pub fn new(
        startup: StartupConfig,
        atlas: GlyphAtlasIndex,
        placements: PlacementStore,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let mut model = AppModel::new(atlas, placements, &startup.settings);
        let cmd = request_sources(&mut model, startup.page, startup.font);

        let app = Self {
            model,
            renderer: None,
            window: None,
            context: None,
            mouse_position: None,
            left_mouse_down: false,
            fitted_size: (0, 0),
            title: String::new(),
            msg_tx,
            msg_rx,
        };
        app.process_cmd(cmd);
        app
    }

    fn init_renderer(&mut self, window: Rc<Window>, context: &Context<Rc<Window>>) -> Result<()> {
        self.renderer = Some(Renderer::new(window, context)?);
        Ok(())
    }

    /// Grab cursor over a placement, default elsewhere
    fn update_cursor_icon(&self, x: f64, y: f64) {
        let Some(window) = &self.window else { return };

        let icon = if self.model.interaction.is_dragging() {
            CursorIcon::Grabbing
        } else {
            let point = Point::from_display(x, y, self.model.scale);
            match hit_test(&self.model.placements, &self.model.atlas, point) {
                Some(_) => CursorIcon::Grab,
                None => CursorIcon::Default,
            }
        };
        window.set_cursor(icon);
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Option<Cmd> {
        match event {
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.resize(size.width, size.height) {
                        tracing::error!("{}", e);
                    }
                }
                Some(Cmd::Redraw)
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    handle_key(&mut self.model, &event.logical_key)
                } else {
                    None
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::error!("Render error: {}", e);
                }
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x, position.y));
                let cmd = update(
                    &mut self.model,
                    Msg::Pointer(PointerMsg::Move {
                        x: position.x,
                        y: position.y,
                        button_held: self.left_mouse_down,
                    }),
                );
                self.update_cursor_icon(position.x, position.y);
                cmd
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                self.left_mouse_down = true;
                let (x, y) = self.mouse_position?;
                let cmd = update(&mut self.model, Msg::Pointer(PointerMsg::Down { x, y }));
                self.update_cursor_icon(x, y);
                cmd
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => {
                self.left_mouse_down = false;
                let (x, y) = self.mouse_position?;
                let cmd = update(&mut self.model, Msg::Pointer(PointerMsg::Up { x, y }));
                self.update_cursor_icon(x, y);
                cmd
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_position = None;
                None
            }
            _ => None,
        }
    }

    fn render(&mut self) -> Result<()> {
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&self.model)?;
        }
        Ok(())
    }

    fn process_cmd(&self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::DecodeImage { source, path } => {
                let tx = self.msg_tx.clone();
                std::thread::spawn(move || {
                    let started = Instant::now();
                    let result = decode_image(&path).map_err(|e| e.to_string());
                    tracing::debug!(
                        "Decoded {} image in {:?}",
                        source.name(),
                        started.elapsed()
                    );
                    let _ = tx.send(Msg::Source(SourceMsg::Decoded { source, result }));
                });
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            if let Some(cmd) = update(&mut self.model, msg) {
                if cmd.needs_redraw() {
                    needs_redraw = true;
                }
                self.process_cmd(cmd);
            }
        }
        needs_redraw
    }

    /// Keep the window title and size in step with the model
    fn sync_window(&mut self) {
        let Some(window) = &self.window else { return };

        let title = format!("Collate - {}", self.model.status_line());
        if title != self.title {
            window.set_title(&title);
            self.title = title;
        }

        let size = self.model.display_size();
        if size != self.fitted_size && size.0 > 0 && size.1 > 0 {
            tracing::debug!("Fitting window to {}x{}", size.0, size.1);
            let _ = window.request_inner_size(PhysicalSize::new(size.0, size.1));
            self.fitted_size = size;
        }
    }

    fn decodes_pending(&self) -> bool {
        self.model.page.is_pending() || self.model.font.is_pending()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Collate")
            .with_inner_size(LogicalSize::new(800, 600));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Rc::new(window),
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };
        let context = match Context::new(Rc::clone(&window)) {
            Ok(context) => context,
            Err(e) => {
                tracing::error!("Failed to create graphics context: {}", e);
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = self.init_renderer(Rc::clone(&window), &context) {
            tracing::error!("{}", e);
            event_loop.exit();
            return;
        }
        self.window = Some(window);
        self.context = Some(context);
        self.sync_window();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let should_exit = matches!(event, WindowEvent::CloseRequested);
        let ours = self
            .window
            .as_ref()
            .is_some_and(|window| window.id() == window_id);
        let should_redraw = if ours && !should_exit {
            match self.handle_event(&event) {
                Some(cmd) => {
                    let needs_redraw = cmd.needs_redraw();
                    self.process_cmd(cmd);
                    needs_redraw
                }
                None => false,
            }
        } else {
            false
        };

        if should_exit {
            event_loop.exit();
        } else if should_redraw {
            self.sync_window();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.process_async_messages() {
            self.sync_window();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }

        // Decode results arrive over the channel, which does not wake the loop
        if self.decodes_pending() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(
                Instant::now() + DECODE_POLL_INTERVAL,
            ));
        } else {
            event_loop.set_control_flow(ControlFlow::Wait);
        }
    }
}
