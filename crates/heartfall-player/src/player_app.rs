//! Player application implementing winit ApplicationHandler
//!
//! Stands in for the host page: owns the window, forwards pointer input and
//! viewport changes to the overlay, and runs the physics tick and the paint
//! tick from the event loop.

use anyhow::Context;
use heartfall_core::{Color, OverlayConfig, Viewport};
use heartfall_overlay::Lifecycle;
use heartfall_render::{FramePresenter, RenderContext};
use heartfall_runtime::{PointerEvent, PointerState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Load a configuration file (defaults when absent) and apply a seed override
pub fn load_config(path: Option<&Path>, seed: Option<u64>) -> anyhow::Result<OverlayConfig> {
    let mut config = match path {
        Some(path) => OverlayConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => OverlayConfig::default(),
    };
    if seed.is_some() {
        config.bodies.seed = seed;
    }
    Ok(config)
}

/// Load a config and hand it to the lifecycle, returning the page colour it
/// asks for. The lifecycle keeps its current config on any error.
pub fn apply_config(
    lifecycle: &mut Lifecycle,
    path: Option<&Path>,
    seed: Option<u64>,
) -> anyhow::Result<Color> {
    let config = load_config(path, seed)?;
    let page_color = config.page_color()?;
    lifecycle.set_config(config)?;
    Ok(page_color)
}

pub struct PlayerApp {
    // Overlay state
    pub lifecycle: Lifecycle,
    pub pointer: PointerState,
    show: bool,

    // Where the configuration came from, for reloads
    config_path: Option<PathBuf>,
    seed_override: Option<u64>,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    presenter: Option<FramePresenter>,

    // Window options
    pub fullscreen: bool,
    fatal: Option<anyhow::Error>,
}

impl PlayerApp {
    pub fn new(
        config: OverlayConfig,
        config_path: Option<PathBuf>,
        seed_override: Option<u64>,
        fullscreen: bool,
        show: bool,
    ) -> Self {
        Self {
            lifecycle: Lifecycle::new(config),
            pointer: PointerState::new(),
            show,
            config_path,
            seed_override,
            window: None,
            render_context: None,
            presenter: None,
            fullscreen,
            fatal: None,
        }
    }

    /// Error that stopped the event loop, if any
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.fatal.take()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Heartfall")
            .with_inner_size(PhysicalSize::new(1280, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        if self.fullscreen {
            window.set_fullscreen(Some(winit::window::Fullscreen::Borderless(None)));
        }

        self.window = Some(window.clone());

        let render_context = pollster::block_on(RenderContext::new(window.clone()))
            .context("Failed to initialize rendering")?;
        let page_color = self.lifecycle.config().page_color()?;
        self.presenter = Some(FramePresenter::new(&render_context, page_color));
        self.render_context = Some(render_context);

        if self.show {
            let viewport = self.viewport();
            self.lifecycle.set_show(true, viewport)?;
        }
        Ok(())
    }

    /// Current window size in logical pixels with its scale factor
    fn viewport(&self) -> Viewport {
        match &self.window {
            Some(window) => {
                let size = window.inner_size();
                Viewport::from_physical(size.width, size.height, window.scale_factor())
            }
            None => Viewport::new(1.0, 1.0),
        }
    }

    fn to_logical(&self, position: PhysicalPosition<f64>) -> (f32, f32) {
        let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
        ((position.x / scale) as f32, (position.y / scale) as f32)
    }

    fn forward_pointer(&mut self, event: Option<PointerEvent>) {
        if let Some(event) = event {
            self.lifecycle.pointer(event);
        }
    }

    fn toggle_show(&mut self) {
        let viewport = self.viewport();
        self.show = !self.show;
        if let Err(e) = self.lifecycle.set_show(self.show, viewport) {
            tracing::error!("Failed to toggle overlay: {e}");
            self.show = self.lifecycle.is_active();
        }
    }

    /// Re-read the config file and rebuild the overlay if it is showing
    fn reload(&mut self) {
        match apply_config(&mut self.lifecycle, self.config_path.as_deref(), self.seed_override) {
            Ok(page_color) => self.rebuild_presenter(page_color),
            Err(e) => tracing::warn!("Keeping previous config: {e:#}"),
        }

        if self.lifecycle.is_active() {
            let viewport = self.viewport();
            if let Err(e) = self.lifecycle.reload(viewport) {
                tracing::error!("Failed to reload overlay: {e}");
                self.show = false;
            }
        }
    }

    /// Pick up a changed page colour
    fn rebuild_presenter(&mut self, page_color: Color) {
        if let Some(context) = &self.render_context {
            self.presenter = Some(FramePresenter::new(context, page_color));
        }
    }

    /// Hide the overlay before the event loop exits
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        let viewport = self.viewport();
        if let Err(e) = self.lifecycle.set_show(false, viewport) {
            tracing::warn!("Overlay teardown failed: {e}");
        }
        event_loop.exit();
    }

    fn resize_overlay(&mut self) {
        let viewport = self.viewport();
        if let Err(e) = self.lifecycle.resize(viewport) {
            tracing::warn!("Overlay resize failed: {e}");
        }
    }

    fn render(&mut self) {
        let Some(context) = &self.render_context else {
            return;
        };
        let Some(presenter) = &mut self.presenter else {
            return;
        };

        let canvas = self.lifecycle.paint();
        if let Err(e) = presenter.present(context, canvas) {
            tracing::warn!("Present failed: {e}");
        }

        self.pointer.end_frame();
        for event in self.lifecycle.drain_events() {
            tracing::debug!(?event, "overlay event");
        }
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                tracing::error!("{e:#}");
                self.fatal = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
                self.resize_overlay();
            }

            WindowEvent::ScaleFactorChanged { .. } => self.resize_overlay(),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(key_code) = event.physical_key else {
                    return;
                };

                match key_code {
                    KeyCode::Escape => self.shutdown(event_loop),
                    KeyCode::Space | KeyCode::Enter => self.toggle_show(),
                    KeyCode::KeyR => self.reload(),
                    KeyCode::F11 => {
                        if let Some(window) = &self.window {
                            if window.fullscreen().is_some() {
                                window.set_fullscreen(None);
                            } else {
                                window.set_fullscreen(Some(
                                    winit::window::Fullscreen::Borderless(None),
                                ));
                            }
                        }
                    }
                    _ => {}
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (x, y) = self.to_logical(position);
                let event = self.pointer.process_move(x, y);
                self.forward_pointer(event);
            }

            WindowEvent::CursorLeft { .. } => {
                let event = self.pointer.process_leave();
                self.forward_pointer(event);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let btn = match button {
                    MouseButton::Left => 0,
                    MouseButton::Right => 1,
                    MouseButton::Middle => 2,
                    _ => return,
                };
                let event = self
                    .pointer
                    .process_button(btn, state == ElementState::Pressed);
                self.forward_pointer(event);
            }

            WindowEvent::Touch(touch) => {
                let (x, y) = self.to_logical(touch.location);
                let event = self.pointer.process_touch(touch.id, touch.phase, x, y);
                self.forward_pointer(event);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Left to the host page
                tracing::trace!(?delta, "wheel passed through");
            }

            WindowEvent::RedrawRequested => {
                self.render();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        self.lifecycle.tick_physics_realtime();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_defaults_without_path() {
        let config = load_config(None, None).unwrap();
        assert_eq!(config, OverlayConfig::default());
    }

    #[test]
    fn test_seed_override_applies() {
        let config = load_config(None, Some(31)).unwrap();
        assert_eq!(config.bodies.seed, Some(31));
    }

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("heartfall-{}-{name}.toml", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_apply_config_picks_up_page_color() {
        let path = write_config("page", "[runtime]\npage_color = \"#101820\"\n");
        let mut lifecycle = Lifecycle::new(OverlayConfig::default());

        let page_color = apply_config(&mut lifecycle, Some(&path), None).unwrap();
        assert_eq!(page_color, Color::from_hex(0x101820));
        assert_eq!(lifecycle.config().runtime.page_color, "#101820");

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_apply_config_keeps_previous_on_error() {
        let path = write_config("bad", "[runtime]\nphysics_hz = 1e9\n");
        let mut lifecycle = Lifecycle::new(OverlayConfig::default());

        assert!(apply_config(&mut lifecycle, Some(&path), None).is_err());
        assert_eq!(lifecycle.config(), &OverlayConfig::default());

        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_config_file_errors() {
        let err = load_config(Some(Path::new("does/not/exist.toml")), None).unwrap_err();
        assert!(format!("{err:#}").contains("exist.toml"));
    }
}
