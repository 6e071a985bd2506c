//! egui overlay: the control window and the hover tooltip.
//!
//! Slider drags go straight to the [`ControlPanel`]. Button clicks come
//! back as [`ControlAction`]s so they take the same path as key presses.

use egui::{Align2, Area, Context, Frame, Grid, Id, Order, RichText, Slider, Window};
use orrery_input::ControlAction;

use crate::controls::{ControlPanel, Theme};
use crate::picking::Tooltip;

/// How often the displayed FPS value is refreshed, in seconds.
const FPS_REFRESH_INTERVAL: f64 = 0.5;

/// Tooltip offset from the pointer, in points.
const TOOLTIP_OFFSET: egui::Vec2 = egui::vec2(16.0, 16.0);

pub fn visuals(theme: Theme) -> egui::Visuals {
    match theme {
        Theme::Dark => egui::Visuals::dark(),
        Theme::Light => egui::Visuals::light(),
    }
}

/// Throttles the FPS readout so it stays legible.
#[derive(Debug, Clone)]
pub struct FpsReadout {
    shown: f64,
    since_refresh: f64,
}

impl Default for FpsReadout {
    fn default() -> Self {
        Self {
            shown: 0.0,
            // Show a value on the first frame.
            since_refresh: FPS_REFRESH_INTERVAL,
        }
    }
}

impl FpsReadout {
    /// Advance the refresh timer by `dt` and sample `fps` when due.
    pub fn update(&mut self, dt: f64, fps: f64) {
        self.since_refresh += dt;
        if self.since_refresh >= FPS_REFRESH_INTERVAL {
            self.since_refresh = 0.0;
            self.shown = fps;
        }
    }

    pub fn shown(&self) -> f64 {
        self.shown
    }
}

/// Draw the control window: pause, theme and reset buttons, then one
/// labeled slider per planet with its own readout.
///
/// Returns the buttons clicked this pass.
pub fn control_window(ctx: &Context, panel: &mut ControlPanel, fps: f64) -> Vec<ControlAction> {
    let mut clicked = Vec::new();
    let mut moved = Vec::new();
    let range = panel.range();
    let selected = panel.selected_index();

    Window::new("Controls")
        .anchor(Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(panel.pause_label()).clicked() {
                    clicked.push(ControlAction::TogglePause);
                }
                if ui.button(panel.theme_label()).clicked() {
                    clicked.push(ControlAction::ToggleTheme);
                }
                if ui.button("Reset").clicked() {
                    clicked.push(ControlAction::Reset);
                }
            });
            ui.separator();

            Grid::new("speed_sliders").num_columns(2).show(ui, |ui| {
                for (index, slider) in panel.sliders().iter().enumerate() {
                    let label = RichText::new(format!("{}:", slider.label));
                    ui.label(if index == selected { label.strong() } else { label });

                    let mut value = slider.value();
                    let response = ui.add(
                        Slider::new(&mut value, range.min..=range.max)
                            .step_by(range.step)
                            .fixed_decimals(1)
                            .suffix("x"),
                    );
                    if response.changed() {
                        moved.push((index, value));
                    }
                    ui.end_row();
                }
            });

            ui.separator();
            ui.weak(format!("{fps:.0} fps"));
        });

    for (index, value) in moved {
        panel.select(index);
        panel.set_slider(index, value);
    }
    clicked
}

/// Name, speed ratio, and distance of the hovered body, next to the pointer.
/// Nothing is drawn without a tooltip or a pointer.
pub fn hover_tooltip(ctx: &Context, tooltip: Option<&Tooltip>) {
    let (Some(tooltip), Some(pointer)) = (tooltip, ctx.pointer_hover_pos()) else {
        return;
    };
    Area::new(Id::new("body_tooltip"))
        .order(Order::Tooltip)
        .fixed_pos(pointer + TOOLTIP_OFFSET)
        .interactable(false)
        .show(ctx, |ui| {
            Frame::popup(ui.style()).show(ui, |ui| {
                ui.strong(tooltip.name.as_str());
                ui.label(format!("Speed: {:.1}x", tooltip.speed_ratio));
                ui.label(format!("Distance: {}", tooltip.distance));
            });
        });
}
