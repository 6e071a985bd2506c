//! Window creation and event handling via winit.
//!
//! [`Orrery`] holds everything that is not GPU state: the simulation, the
//! control panel and its egui context, input, and the orbit camera. [`App`]
//! implements winit's [`ApplicationHandler`], owns the window, renderer, and
//! egui-winit state, and drives one [`Orrery::step`] per redraw.

use std::path::PathBuf;
use std::sync::Arc;

use orrery_config::Config;
use orrery_input::{ControlAction, KeyBindings, KeyboardState, MouseState};
use orrery_render::{
    Camera, OverlayFrame, OverlayRenderer, RenderContext, RenderContextError, SceneRenderer,
    SurfaceError, SurfaceWrapper, init_render_context_blocking,
};
use orrery_sim::{BodySnapshot, CommandQueue, SimulationState, advance};
use tracing::{debug, error, info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::error::{EventLoopError, OsError};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::controls::{ControlPanel, PanelEffect, SliderRange, Theme};
use crate::frame_clock::FrameClock;
use crate::orbit_camera::OrbitCamera;
use crate::overlay::{self, FpsReadout};
use crate::picking::Tooltip;
use crate::scene;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] OsError),

    #[error(transparent)]
    Render(#[from] RenderContextError),

    #[error("GPU ran out of memory")]
    OutOfMemory,
}

/// Returns [`WindowAttributes`] based on the given configuration.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attributes = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ));
    if config.window.fullscreen {
        attributes.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attributes
    }
}

/// What a frame asks of the window and renderer.
#[derive(Clone, Default)]
pub struct FrameOutcome {
    pub quit: bool,
    /// New background after a theme change.
    pub clear_color: Option<wgpu::Color>,
    /// The egui pass: shapes to paint, texture changes, cursor and clipboard.
    pub ui: egui::FullOutput,
}

/// The config file as last read from disk.
///
/// Kept apart from the running config, which carries CLI overrides, so a
/// reload only reports edits to the file itself.
pub struct ConfigSource {
    dir: PathBuf,
    on_disk: Config,
}

impl ConfigSource {
    pub fn new(dir: PathBuf, on_disk: Config) -> Self {
        Self { dir, on_disk }
    }

    /// Re-read the file. `Some` with the new contents when it changed.
    pub fn refresh(&mut self) -> Option<Config> {
        match self.on_disk.reload(&self.dir) {
            Ok(Some(fresh)) => {
                self.on_disk = fresh.clone();
                Some(fresh)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Config reload failed: {e}");
                None
            }
        }
    }
}

fn load_bindings(config: &Config) -> KeyBindings {
    let (bindings, errors) = KeyBindings::from_overrides(&config.input.keybindings);
    for err in &errors {
        warn!("Ignoring keybinding override: {err}");
    }
    for conflict in bindings.detect_conflicts() {
        warn!("Key {} is bound to {:?}", conflict.chord, conflict.actions);
    }
    bindings
}

/// Window-independent application state.
pub struct Orrery {
    sim: SimulationState,
    commands: CommandQueue,
    panel: ControlPanel,
    bindings: KeyBindings,
    keyboard: KeyboardState,
    mouse: MouseState,
    orbit: OrbitCamera,
    camera: Camera,
    surface: SurfaceWrapper,
    ui: egui::Context,
    fps: FpsReadout,
    snapshot: Vec<BodySnapshot>,
    tooltip: Option<Tooltip>,
}

impl Orrery {
    pub fn new(config: &Config, sim: SimulationState) -> Self {
        let bindings = load_bindings(config);
        let commands = CommandQueue::new();
        let panel = ControlPanel::new(
            sim.registry(),
            SliderRange::from_config(&config.controls),
            commands.sender(),
            sim.is_paused(),
            Theme::from_dark(config.theme.start_dark),
        );

        let surface = SurfaceWrapper::new(config.window.width, config.window.height, 1.0);
        let mut camera = Camera {
            fov_y: config.camera.fov_y_degrees.to_radians(),
            near: config.camera.near,
            far: config.camera.far,
            ..Camera::default()
        };
        camera.set_aspect_ratio(surface.size().width as f32, surface.size().height as f32);
        let orbit = OrbitCamera::new(&config.camera);
        orbit.apply(&mut camera);

        let ui = egui::Context::default();
        ui.set_visuals(overlay::visuals(panel.theme()));

        let snapshot = sim.snapshot();
        Self {
            sim,
            commands,
            panel,
            bindings,
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            orbit,
            camera,
            surface,
            ui,
            fps: FpsReadout::default(),
            snapshot,
            tooltip: None,
        }
    }

    pub fn sim(&self) -> &SimulationState {
        &self.sim
    }

    pub fn panel(&self) -> &ControlPanel {
        &self.panel
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn surface(&self) -> &SurfaceWrapper {
        &self.surface
    }

    /// Bodies as of the last step.
    pub fn snapshot(&self) -> &[BodySnapshot] {
        &self.snapshot
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn clear_color(&self) -> wgpu::Color {
        scene::clear_color(self.panel.theme())
    }

    pub fn ui_context(&self) -> &egui::Context {
        &self.ui
    }

    /// Take up the parts of a reloaded config that apply while running:
    /// keybindings and the slider range.
    pub fn reconfigure(&mut self, config: &Config) {
        self.bindings = load_bindings(config);
        self.panel
            .set_range(SliderRange::from_config(&config.controls));
        info!("Applied reloaded keybindings and speed range");
    }

    /// Feed an input event. Returns `true` if it was consumed.
    pub fn handle_input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.keyboard.process_event(event),
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => self.mouse.on_button(*button, *state),
            WindowEvent::MouseWheel { delta, .. } => self.mouse.on_scroll(*delta),
            WindowEvent::CursorEntered { .. } => self.mouse.on_cursor_entered(),
            WindowEvent::CursorLeft { .. } => self.mouse.on_cursor_left(),
            WindowEvent::Focused(false) => {
                // Key releases are not delivered while unfocused.
                self.keyboard.release_all();
            }
            _ => return false,
        }
        true
    }

    /// Record a new physical window size. Returns the size to reconfigure
    /// the swapchain to, if it changed.
    pub fn resize(&mut self, width: u32, height: u32) -> Option<(u32, u32)> {
        let size = self.surface.handle_resize(width, height)?;
        self.camera.set_aspect_ratio(size.width as f32, size.height as f32);
        Some((size.width, size.height))
    }

    pub fn rescale(&mut self, scale_factor: f64, width: u32, height: u32) -> Option<(u32, u32)> {
        let size = self
            .surface
            .handle_scale_factor_changed(scale_factor, width, height)?;
        self.camera.set_aspect_ratio(size.width as f32, size.height as f32);
        Some((size.width, size.height))
    }

    fn apply_action(&mut self, action: ControlAction, outcome: &mut FrameOutcome) {
        match self.panel.handle(action) {
            PanelEffect::None => {}
            PanelEffect::ResetCamera => self.orbit.reset(),
            PanelEffect::ThemeChanged(theme) => {
                info!("Theme set to {theme:?}");
                self.ui.set_visuals(overlay::visuals(theme));
                outcome.clear_color = Some(scene::clear_color(theme));
            }
            PanelEffect::Quit => outcome.quit = true,
        }
    }

    /// Run one frame of `dt` seconds: key shortcuts, camera, simulation,
    /// hover, then the egui pass over `ui_input`.
    ///
    /// Slider moves and button clicks from the egui pass are queued and
    /// reach the simulation at the start of the next step.
    pub fn step(&mut self, dt: f64, fps: f64, ui_input: egui::RawInput) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();

        if !self.ui.wants_keyboard_input() {
            for action in self.bindings.resolve(&self.keyboard) {
                self.apply_action(action, &mut outcome);
            }
        }

        self.orbit.handle_mouse(&self.mouse, &self.camera);
        self.orbit.update(dt);
        self.orbit.apply(&mut self.camera);

        let applied = self.commands.drain_into(&mut self.sim);
        if applied > 0 {
            debug!("Applied {applied} control commands");
        }
        advance(&mut self.sim, dt);
        self.snapshot = self.sim.snapshot();

        let tooltip = if self.ui.is_pointer_over_area() {
            None
        } else {
            self.mouse
                .position()
                .and_then(|cursor| self.camera.screen_ray(cursor, self.surface.size().as_vec2()))
                .and_then(|ray| Tooltip::under_ray(&ray, &self.snapshot))
        };
        match &tooltip {
            Some(t) if self.tooltip.as_ref().map(|old| &old.name) != Some(&t.name) => {
                debug!("Hovering {t}");
            }
            _ => {}
        }
        self.tooltip = tooltip;

        self.fps.update(dt, fps);
        let shown_fps = self.fps.shown();
        let mut clicked = Vec::new();
        let panel = &mut self.panel;
        let hovered = self.tooltip.as_ref();
        outcome.ui = self.ui.run(ui_input, |ctx| {
            clicked.extend(overlay::control_window(ctx, panel, shown_fps));
            overlay::hover_tooltip(ctx, hovered);
        });
        for action in clicked {
            self.apply_action(action, &mut outcome);
        }

        outcome
    }

    /// Upload this frame's camera and bodies.
    pub fn prepare(
        &self,
        renderer: &mut SceneRenderer,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        point_size: f32,
    ) {
        let viewport = self.surface.size().as_vec2();
        let point_size = self.surface.to_physical(point_size);
        renderer.update_camera(queue, &self.camera.to_uniform(viewport, point_size));
        let (bodies, rings) = scene::body_instances(self.sim.registry(), &self.snapshot);
        renderer.update_bodies(device, queue, &bodies, &rings);
    }

    /// Clear per-frame input edges. Call after every step.
    pub fn end_frame(&mut self) {
        self.keyboard.clear_transients();
        self.mouse.clear_transients();
    }
}

struct Graphics {
    window: Arc<Window>,
    context: RenderContext,
    renderer: SceneRenderer,
    overlay: OverlayRenderer,
    ui_state: egui_winit::State,
}

/// winit application: window, GPU, and the frame loop.
pub struct App {
    config: Config,
    source: Option<ConfigSource>,
    orrery: Orrery,
    clock: FrameClock,
    graphics: Option<Graphics>,
    fatal: Option<AppError>,
}

impl App {
    pub fn new(config: Config, sim: SimulationState, source: Option<ConfigSource>) -> Self {
        let orrery = Orrery::new(&config, sim);
        let clock = FrameClock::new(config.simulation.max_frame_delta);
        Self {
            config,
            source,
            orrery,
            clock,
            graphics: None,
            fatal: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<Graphics, AppError> {
        let attributes = window_attributes_from_config(&self.config);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let inner = window.inner_size();
        let scale_factor = window.scale_factor();
        self.orrery.rescale(scale_factor, inner.width, inner.height);
        info!(
            "Window created: {}x{} (scale: {:.2})",
            inner.width, inner.height, scale_factor
        );

        let context = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let (width, height) = context.size();
        let geometry = scene::build_geometry(self.orrery.sim.registry(), &self.config.starfield);
        let mut renderer = SceneRenderer::new(
            &context.device,
            context.surface_format,
            width,
            height,
            &geometry,
        );
        renderer.set_clear_color(self.orrery.clear_color());

        let overlay = OverlayRenderer::new(&context.device, context.surface_format);
        let max_texture_side = context.device.limits().max_texture_dimension_2d as usize;
        let ui_state = egui_winit::State::new(
            self.orrery.ui_context().clone(),
            egui::ViewportId::ROOT,
            &*window,
            Some(scale_factor as f32),
            None,
            Some(max_texture_side),
        );

        Ok(Graphics {
            window,
            context,
            renderer,
            overlay,
            ui_state,
        })
    }

    fn reload_config(&mut self) {
        let Some(fresh) = self.source.as_mut().and_then(ConfigSource::refresh) else {
            return;
        };
        self.orrery.reconfigure(&fresh);
        self.config.input = fresh.input;
        self.config.controls = fresh.controls;
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        error!("{err}");
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn apply_resize(&mut self, size: Option<(u32, u32)>) {
        if let (Some((w, h)), Some(gfx)) = (size, &mut self.graphics) {
            gfx.context.resize(w, h);
            gfx.renderer.resize(&gfx.context.device, w, h);
            debug!("Surface resized to {w}x{h}");
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        let ui_input = match &mut self.graphics {
            Some(gfx) => gfx.ui_state.take_egui_input(&gfx.window),
            None => egui::RawInput::default(),
        };
        let outcome = self.orrery.step(dt, self.clock.fps(), ui_input);
        if outcome.quit {
            info!("Quit requested");
            event_loop.exit();
            return;
        }

        let result = self.draw(outcome);
        self.orrery.end_frame();
        if let Err(err) = result {
            self.fail(event_loop, err);
        }
    }

    fn draw(&mut self, outcome: FrameOutcome) -> Result<(), AppError> {
        let Some(gfx) = &mut self.graphics else {
            return Ok(());
        };
        let FrameOutcome {
            clear_color, ui, ..
        } = outcome;
        if let Some(color) = clear_color {
            gfx.renderer.set_clear_color(color);
        }
        gfx.ui_state
            .handle_platform_output(&gfx.window, ui.platform_output);

        let ctx = &gfx.context;
        gfx.overlay
            .update_textures(&ctx.device, &ctx.queue, &ui.textures_delta.set);
        let result = if self.orrery.surface().is_minimized() {
            Ok(())
        } else {
            let frame_ui = OverlayFrame {
                primitives: self
                    .orrery
                    .ui_context()
                    .tessellate(ui.shapes, ui.pixels_per_point),
                pixels_per_point: ui.pixels_per_point,
            };
            self.orrery.prepare(
                &mut gfx.renderer,
                &ctx.device,
                &ctx.queue,
                self.config.starfield.point_size,
            );
            match ctx.get_current_texture() {
                Ok(texture) => {
                    gfx.renderer
                        .render(&ctx.device, &ctx.queue, texture, &mut gfx.overlay, &frame_ui);
                    Ok(())
                }
                Err(SurfaceError::Timeout) => {
                    debug!("Surface timeout, skipping frame");
                    Ok(())
                }
                Err(SurfaceError::Lost) => {
                    warn!("Surface lost, skipping frame");
                    Ok(())
                }
                Err(SurfaceError::OutOfMemory) => Err(AppError::OutOfMemory),
            }
        };
        gfx.overlay.free_textures(&ui.textures_delta.free);
        result
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }
        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match &mut self.graphics {
            Some(gfx) => gfx.ui_state.on_window_event(&gfx.window, &event).consumed,
            None => false,
        };
        if !consumed && self.orrery.handle_input(&event) {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let resized = self.orrery.resize(size.width, size.height);
                self.apply_resize(resized);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                let Some(gfx) = &self.graphics else {
                    return;
                };
                let inner = gfx.window.inner_size();
                let resized = self.orrery.rescale(scale_factor, inner.width, inner.height);
                info!("Scale factor changed to {scale_factor:.2}");
                self.apply_resize(resized);
            }
            WindowEvent::Focused(true) => self.reload_config(),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gfx) = &self.graphics {
            gfx.window.request_redraw();
        }
    }
}

/// Create the event loop and run until the window closes.
#[instrument(skip_all)]
pub fn run(
    config: Config,
    sim: SimulationState,
    source: Option<ConfigSource>,
) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config, sim, source);
    event_loop.run_app(&mut app)?;
    match app.fatal.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::tests::{painted_text, painted_text_rect};
    use glam::Vec2;
    use orrery_input::RawKeyEvent;
    use orrery_sim::BodyRegistry;
    use winit::keyboard::KeyCode;

    fn orrery() -> Orrery {
        let sim = SimulationState::new(BodyRegistry::solar_system(), 11);
        Orrery::new(&Config::default(), sim)
    }

    /// egui input covering the surface, plus `events`.
    fn ui_input(orrery: &Orrery, events: Vec<egui::Event>) -> egui::RawInput {
        let size = orrery.surface().size().as_vec2();
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(size.x, size.y),
            )),
            events,
            ..Default::default()
        }
    }

    fn frame(orrery: &mut Orrery, dt: f64, events: Vec<egui::Event>) -> FrameOutcome {
        let input = ui_input(orrery, events);
        let outcome = orrery.step(dt, 60.0, input);
        orrery.end_frame();
        outcome
    }

    fn press(orrery: &mut Orrery, code: KeyCode) -> FrameOutcome {
        orrery.keyboard.process_raw(RawKeyEvent::press(code));
        let input = ui_input(orrery, Vec::new());
        let outcome = orrery.step(1.0 / 60.0, 60.0, input);
        orrery.keyboard.process_raw(RawKeyEvent::release(code));
        orrery.end_frame();
        outcome
    }

    fn click(orrery: &mut Orrery, pos: egui::Pos2) -> FrameOutcome {
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };
        frame(orrery, 1.0 / 60.0, vec![egui::Event::PointerMoved(pos), button(true)]);
        frame(orrery, 1.0 / 60.0, vec![button(false)])
    }

    /// Where `world` lands on screen, in physical pixels.
    fn project(orrery: &Orrery, world: glam::Vec3) -> Vec2 {
        let clip = orrery.camera().view_projection_matrix() * world.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        let size = orrery.surface().size().as_vec2();
        Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y)
    }

    fn hover(orrery: &mut Orrery, cursor: Vec2) -> FrameOutcome {
        orrery
            .mouse
            .on_cursor_moved(f64::from(cursor.x), f64::from(cursor.y));
        let moved = egui::Event::PointerMoved(egui::pos2(cursor.x, cursor.y));
        frame(orrery, 0.0, vec![moved]);
        frame(orrery, 0.0, Vec::new())
    }

    #[test]
    fn test_window_attributes() {
        let mut config = Config::default();
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Orrery");
        assert!(attrs.fullscreen.is_none());
        config.window.fullscreen = true;
        assert!(window_attributes_from_config(&config).fullscreen.is_some());
    }

    #[test]
    fn test_initial_state() {
        let orrery = orrery();
        assert_eq!(orrery.surface().size().width, 1280);
        assert_eq!(orrery.snapshot().len(), 9);
        assert_eq!(orrery.clear_color(), wgpu::Color::BLACK);
        assert!(orrery.ui_context().style().visuals.dark_mode);
        assert!((orrery.camera().position - glam::Vec3::new(0.0, 30.0, 50.0)).length() < 1e-3);
    }

    #[test]
    fn test_steps_draw_control_window() {
        let mut orrery = orrery();
        frame(&mut orrery, 1.0 / 60.0, Vec::new());
        let outcome = frame(&mut orrery, 1.0 / 60.0, Vec::new());
        assert!(!outcome.quit);
        let text = painted_text(&outcome.ui);
        for label in ["Pause", "Light Mode", "Reset", "Mercury:", "Neptune:", "60 fps"] {
            assert!(text.iter().any(|t| t == label), "missing {label} in {text:?}");
        }
    }

    #[test]
    fn test_pause_button_click_freezes_orbits() {
        let mut orrery = orrery();
        frame(&mut orrery, 1.0 / 60.0, Vec::new());
        let outcome = frame(&mut orrery, 1.0 / 60.0, Vec::new());
        let button = painted_text_rect(&outcome.ui, "Pause").unwrap();

        let outcome = click(&mut orrery, button.center());
        assert!(orrery.panel().is_paused());
        assert_eq!(orrery.panel().pause_label(), "Resume");
        assert!(outcome.clear_color.is_none());

        // The queued pause lands at the start of the next step.
        frame(&mut orrery, 0.1, Vec::new());
        assert!(orrery.sim().is_paused());
        let before = orrery.snapshot().to_vec();
        frame(&mut orrery, 0.1, Vec::new());
        assert_eq!(orrery.snapshot(), &before[..]);
    }

    #[test]
    fn test_theme_button_click_switches_theme() {
        let mut orrery = orrery();
        frame(&mut orrery, 1.0 / 60.0, Vec::new());
        let outcome = frame(&mut orrery, 1.0 / 60.0, Vec::new());
        let button = painted_text_rect(&outcome.ui, "Light Mode").unwrap();

        let outcome = click(&mut orrery, button.center());
        assert!(outcome.clear_color.is_some());
        assert_eq!(orrery.panel().theme_label(), "Dark Mode");
        assert!(!orrery.ui_context().style().visuals.dark_mode);
    }

    #[test]
    fn test_pause_key_freezes_orbits() {
        let mut orrery = orrery();
        press(&mut orrery, KeyCode::Space);
        assert!(orrery.sim().is_paused());
        let before = orrery.snapshot().to_vec();
        frame(&mut orrery, 0.1, Vec::new());
        assert_eq!(orrery.snapshot(), &before[..]);

        press(&mut orrery, KeyCode::Space);
        assert!(!orrery.sim().is_paused());
        frame(&mut orrery, 0.1, Vec::new());
        assert_ne!(orrery.snapshot()[1].position, before[1].position);
    }

    #[test]
    fn test_theme_key_changes_clear_color() {
        let mut orrery = orrery();
        let outcome = press(&mut orrery, KeyCode::KeyT);
        let color = outcome.clear_color.unwrap();
        assert!((color.r - 0.871).abs() < 1e-3);
        assert_eq!(orrery.panel().theme_label(), "Dark Mode");
    }

    #[test]
    fn test_speed_key_reaches_simulation() {
        let mut orrery = orrery();
        press(&mut orrery, KeyCode::ArrowUp);
        let mercury = &orrery.snapshot()[1];
        assert!((mercury.speed_multiplier - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_slider_value_reaches_simulation_next_step() {
        let mut orrery = orrery();
        frame(&mut orrery, 1.0 / 60.0, Vec::new());
        orrery.panel.set_slider(2, 3.0);
        let outcome = frame(&mut orrery, 1.0 / 60.0, Vec::new());
        assert_eq!(orrery.snapshot()[3].speed_multiplier, 3.0);
        let text = painted_text(&outcome.ui);
        assert_eq!(text.iter().filter(|t| *t == "3.0x").count(), 1);
    }

    #[test]
    fn test_reset_restores_speeds_and_camera() {
        let mut orrery = orrery();
        press(&mut orrery, KeyCode::ArrowUp);
        orrery.orbit.rotate(200.0, 50.0);
        frame(&mut orrery, 0.1, Vec::new());

        press(&mut orrery, KeyCode::KeyR);
        assert!(orrery.snapshot().iter().all(|b| b.speed_multiplier == 1.0));
        assert!(orrery.panel().sliders().iter().all(|s| s.value() == 1.0));
        assert!((orrery.camera().position - glam::Vec3::new(0.0, 30.0, 50.0)).length() < 1e-3);
    }

    #[test]
    fn test_escape_quits() {
        let mut orrery = orrery();
        assert!(press(&mut orrery, KeyCode::Escape).quit);
    }

    #[test]
    fn test_hover_over_planet_shows_tooltip() {
        let mut orrery = orrery();
        frame(&mut orrery, 0.0, Vec::new());
        let eye = orrery.camera().position;
        // A planet in clear view and away from the control window.
        let (target, cursor) = orrery
            .snapshot()
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(i, body)| {
                let center = body.position.as_vec3();
                let ray = orrery_render::Ray {
                    origin: eye,
                    direction: (center - eye).normalize(),
                };
                crate::picking::pick(&ray, orrery.snapshot()) == Some(*i)
            })
            .map(|(_, body)| (body.clone(), project(&orrery, body.position.as_vec3())))
            .find(|(_, cursor)| cursor.x > 450.0 || cursor.y > 450.0)
            .unwrap();

        let outcome = hover(&mut orrery, cursor);
        assert_eq!(orrery.tooltip().unwrap().name, target.name);
        let text = painted_text(&outcome.ui);
        assert!(text.contains(&target.name));
        assert!(text.iter().any(|t| t == "Speed: 1.0x"));
        let distance = format!("Distance: {}", target.orbital_distance);
        assert!(text.contains(&distance));

        orrery.mouse.on_cursor_left();
        frame(&mut orrery, 0.0, vec![egui::Event::PointerGone]);
        let outcome = frame(&mut orrery, 0.0, Vec::new());
        assert!(orrery.tooltip().is_none());
        assert!(!painted_text(&outcome.ui).iter().any(|t| t.starts_with("Speed:")));
    }

    #[test]
    fn test_hover_over_sun_names_it() {
        let mut orrery = orrery();
        frame(&mut orrery, 0.0, Vec::new());
        let cursor = project(&orrery, glam::Vec3::ZERO);
        let outcome = hover(&mut orrery, cursor);
        assert_eq!(orrery.tooltip().unwrap().name, "Sun");
        let text = painted_text(&outcome.ui);
        assert!(text.iter().any(|t| t == "Sun"));
        assert!(text.iter().any(|t| t == "Distance: 0"));
    }

    #[test]
    fn test_config_edit_applies_on_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        let mut source = ConfigSource::new(dir.path().to_path_buf(), config.clone());
        assert!(source.refresh().is_none());

        let mut edited = config.clone();
        edited
            .input
            .keybindings
            .insert("pause".to_string(), "KeyP".to_string());
        edited.controls.speed_max = 2.0;
        edited.save(dir.path()).unwrap();

        let fresh = source.refresh().unwrap();
        assert!(source.refresh().is_none());

        let mut orrery = orrery();
        orrery.panel.set_slider(0, 4.0);
        orrery.reconfigure(&fresh);
        assert_eq!(orrery.panel().sliders()[0].value(), 2.0);
        assert_eq!(orrery.panel().range().max, 2.0);

        press(&mut orrery, KeyCode::Space);
        assert!(!orrery.panel().is_paused());
        press(&mut orrery, KeyCode::KeyP);
        assert!(orrery.panel().is_paused());
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut orrery = orrery();
        assert_eq!(orrery.resize(1000, 500), Some((1000, 500)));
        assert!((orrery.camera().aspect_ratio - 2.0).abs() < 1e-6);
        assert_eq!(orrery.resize(0, 0), None);
        assert!(orrery.surface().is_minimized());
        assert!((orrery.camera().aspect_ratio - 2.0).abs() < 1e-6);
    }
}
