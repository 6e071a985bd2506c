//! Control panel: pause, theme, reset, and one speed slider per planet.
//!
//! The panel owns the values the user sees and turns every change into a
//! [`SimCommand`]. It never touches the simulation directly.

use orrery_config::ControlsConfig;
use orrery_input::ControlAction;
use orrery_sim::{BodyId, BodyRegistry, CommandSender, SimCommand};
use tracing::{debug, info, warn};

/// Background theme. Changing it never touches the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Background as sRGB bytes: `#000000` or `#f0f0f0`.
    pub fn background(self) -> u32 {
        match self {
            Self::Dark => 0x000000,
            Self::Light => 0xf0f0f0,
        }
    }

    /// Label of the button that switches away from this theme.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Dark => "Light Mode",
            Self::Light => "Dark Mode",
        }
    }
}

/// Allowed slider values: `min..=max` in increments of `step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub fn from_config(config: &ControlsConfig) -> Self {
        let min = if config.speed_min.is_finite() {
            config.speed_min.max(0.0)
        } else {
            0.0
        };
        let max = if config.speed_max.is_finite() && config.speed_max >= min {
            config.speed_max
        } else {
            warn!(
                "Invalid speed range {}..{}, using {}..5",
                config.speed_min, config.speed_max, min
            );
            min.max(5.0)
        };
        let step = if config.speed_step.is_finite() && config.speed_step > 0.0 {
            config.speed_step
        } else {
            0.1
        };
        Self { min, max, step }
    }

    /// Snap to the nearest step and clamp into range. `None` for NaN or
    /// infinite input.
    pub fn snap(&self, value: f64) -> Option<f64> {
        if !value.is_finite() {
            return None;
        }
        let steps = ((value - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Trim accumulated float error so 0.1 * 3 displays and compares as 0.3.
        let snapped = (snapped * 1e9).round() / 1e9;
        Some(snapped.clamp(self.min, self.max))
    }
}

impl Default for SliderRange {
    fn default() -> Self {
        Self::from_config(&ControlsConfig::default())
    }
}

/// One planet's speed multiplier slider.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedSlider {
    pub body: BodyId,
    pub label: String,
    value: f64,
}

impl SpeedSlider {
    pub fn value(&self) -> f64 {
        self.value
    }

    /// `"2.5x"`.
    pub fn value_text(&self) -> String {
        format!("{:.1}x", self.value)
    }
}

/// What the window must do in response to a control action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEffect {
    None,
    ResetCamera,
    ThemeChanged(Theme),
    Quit,
}

pub struct ControlPanel {
    sliders: Vec<SpeedSlider>,
    range: SliderRange,
    selected: usize,
    paused: bool,
    theme: Theme,
    commands: CommandSender,
}

impl ControlPanel {
    /// One slider per orbiting body, in registry order, all at 1.0.
    pub fn new(
        registry: &BodyRegistry,
        range: SliderRange,
        commands: CommandSender,
        paused: bool,
        theme: Theme,
    ) -> Self {
        let start = range.snap(1.0).unwrap_or(range.min);
        let sliders = registry
            .orbiting_ids()
            .filter_map(|id| {
                registry.get(id).map(|body| SpeedSlider {
                    body: id,
                    label: body.name.clone(),
                    value: start,
                })
            })
            .collect();

        Self {
            sliders,
            range,
            selected: 0,
            paused,
            theme,
            commands,
        }
    }

    pub fn sliders(&self) -> &[SpeedSlider] {
        &self.sliders
    }

    pub fn range(&self) -> SliderRange {
        self.range
    }

    pub fn selected(&self) -> Option<&SpeedSlider> {
        self.sliders.get(self.selected)
    }

    /// Index of the slider the keyboard shortcuts act on.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// `"Pause"` while running, `"Resume"` while paused.
    pub fn pause_label(&self) -> &'static str {
        if self.paused { "Resume" } else { "Pause" }
    }

    pub fn theme_label(&self) -> &'static str {
        self.theme.button_label()
    }

    /// Move slider `index` to `value` (snapped and clamped). Emits a speed
    /// command when the value actually changes. Returns the new value.
    pub fn set_slider(&mut self, index: usize, value: f64) -> Option<f64> {
        let snapped = self.range.snap(value)?;
        let slider = self.sliders.get_mut(index)?;
        if slider.value == snapped {
            return Some(snapped);
        }
        slider.value = snapped;
        debug!("{} speed set to {}", slider.label, slider.value_text());
        let body = slider.body;
        self.send(SimCommand::SetSpeed {
            body,
            value: snapped,
        });
        Some(snapped)
    }

    /// Swap in a new range, re-snapping every slider into it. Sliders whose
    /// value moves send the new value on.
    pub fn set_range(&mut self, range: SliderRange) {
        if range == self.range {
            return;
        }
        info!("Speed range now {}..={} step {}", range.min, range.max, range.step);
        self.range = range;
        for index in 0..self.sliders.len() {
            let value = self.sliders[index].value;
            self.set_slider(index, value);
        }
    }

    /// Move the selected slider by `steps` increments.
    pub fn step_selected(&mut self, steps: i32) -> Option<f64> {
        let current = self.selected()?.value;
        let target = current + f64::from(steps) * self.range.step;
        self.set_slider(self.selected, target)
    }

    /// Select slider `index`, ignoring out-of-range requests.
    pub fn select(&mut self, index: usize) {
        if index < self.sliders.len() {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        if !self.sliders.is_empty() {
            self.selected = (self.selected + 1) % self.sliders.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.sliders.is_empty() {
            self.selected = (self.selected + self.sliders.len() - 1) % self.sliders.len();
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        info!("{}", if self.paused { "Paused" } else { "Resumed" });
        self.send(SimCommand::SetPaused(self.paused));
        self.paused
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// New random phases, unit multipliers, sliders back to 1.0. The pause
    /// flag is left alone.
    pub fn reset(&mut self) {
        let start = self.range.snap(1.0).unwrap_or(self.range.min);
        for slider in &mut self.sliders {
            slider.value = start;
        }
        info!("Reset all orbits");
        self.send(SimCommand::Reset);
        if start != 1.0 {
            // The range excludes 1.0; keep the simulation in step with the sliders.
            for slider in &self.sliders {
                self.send(SimCommand::SetSpeed {
                    body: slider.body,
                    value: start,
                });
            }
        }
    }

    pub fn handle(&mut self, action: ControlAction) -> PanelEffect {
        match action {
            ControlAction::TogglePause => {
                self.toggle_pause();
                PanelEffect::None
            }
            ControlAction::ToggleTheme => PanelEffect::ThemeChanged(self.toggle_theme()),
            ControlAction::Reset => {
                self.reset();
                PanelEffect::ResetCamera
            }
            ControlAction::NextSlider => {
                self.select_next();
                PanelEffect::None
            }
            ControlAction::PrevSlider => {
                self.select_prev();
                PanelEffect::None
            }
            ControlAction::SpeedUp => {
                self.step_selected(1);
                PanelEffect::None
            }
            ControlAction::SpeedDown => {
                self.step_selected(-1);
                PanelEffect::None
            }
            ControlAction::SelectSlider(n) => {
                self.select(usize::from(n).saturating_sub(1));
                PanelEffect::None
            }
            ControlAction::Quit => PanelEffect::Quit,
        }
    }

    fn send(&self, command: SimCommand) {
        if !self.commands.send(command) {
            warn!("Command queue closed, dropped {command:?}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_sim::{CommandQueue, SimulationState};

    fn panel() -> (ControlPanel, CommandQueue, SimulationState) {
        let queue = CommandQueue::new();
        let registry = BodyRegistry::solar_system();
        let panel = ControlPanel::new(
            &registry,
            SliderRange::default(),
            queue.sender(),
            false,
            Theme::Dark,
        );
        (panel, queue, SimulationState::new(registry, 7))
    }

    #[test]
    fn test_one_slider_per_planet() {
        let (panel, _queue, _state) = panel();
        assert_eq!(panel.sliders().len(), 8);
        assert_eq!(panel.sliders()[0].label, "Mercury");
        assert_eq!(panel.sliders()[7].label, "Neptune");
        assert!(panel.sliders().iter().all(|s| s.value() == 1.0));
        assert_eq!(panel.sliders()[0].value_text(), "1.0x");
    }

    #[test]
    fn test_snap_and_clamp() {
        let range = SliderRange::default();
        assert_eq!(range.snap(2.34), Some(2.3));
        assert_eq!(range.snap(0.06), Some(0.1));
        assert_eq!(range.snap(7.0), Some(5.0));
        assert_eq!(range.snap(-1.0), Some(0.0));
        assert_eq!(range.snap(0.1 * 3.0), Some(0.3));
        assert_eq!(range.snap(f64::NAN), None);
    }

    #[test]
    fn test_invalid_config_range_falls_back() {
        let range = SliderRange::from_config(&ControlsConfig {
            speed_min: 0.0,
            speed_max: -3.0,
            speed_step: 0.0,
        });
        assert_eq!(range.max, 5.0);
        assert_eq!(range.step, 0.1);
    }

    #[test]
    fn test_slider_change_reaches_simulation() {
        let (mut panel, queue, mut state) = panel();
        let earth = panel.sliders()[2].body;
        assert_eq!(panel.set_slider(2, 2.5), Some(2.5));
        assert_eq!(panel.sliders()[2].value_text(), "2.5x");

        assert_eq!(queue.drain_into(&mut state), 1);
        assert_eq!(state.body(earth).unwrap().speed_multiplier(), 2.5);
    }

    #[test]
    fn test_unchanged_value_sends_nothing() {
        let (mut panel, queue, _state) = panel();
        panel.set_slider(0, 1.0);
        panel.set_slider(0, 1.04);
        assert_eq!(queue.pending(), 0);
        assert_eq!(panel.set_slider(99, 2.0), None);
    }

    #[test]
    fn test_step_selected_respects_bounds() {
        let (mut panel, _queue, _state) = panel();
        panel.select(3);
        for _ in 0..100 {
            panel.step_selected(1);
        }
        assert_eq!(panel.selected().unwrap().value(), 5.0);
        for _ in 0..100 {
            panel.step_selected(-1);
        }
        assert_eq!(panel.selected().unwrap().value(), 0.0);
    }

    #[test]
    fn test_selection_wraps() {
        let (mut panel, _queue, _state) = panel();
        panel.select_prev();
        assert_eq!(panel.selected().unwrap().label, "Neptune");
        panel.select_next();
        assert_eq!(panel.selected().unwrap().label, "Mercury");
        panel.handle(ControlAction::SelectSlider(3));
        assert_eq!(panel.selected().unwrap().label, "Earth");
        panel.handle(ControlAction::SelectSlider(8));
        assert_eq!(panel.selected_index(), 7);
    }

    #[test]
    fn test_pause_labels_and_command() {
        let (mut panel, queue, mut state) = panel();
        assert_eq!(panel.pause_label(), "Pause");
        panel.handle(ControlAction::TogglePause);
        assert_eq!(panel.pause_label(), "Resume");
        queue.drain_into(&mut state);
        assert!(state.is_paused());

        panel.handle(ControlAction::TogglePause);
        queue.drain_into(&mut state);
        assert!(!state.is_paused());
    }

    #[test]
    fn test_theme_toggle_is_local() {
        let (mut panel, queue, _state) = panel();
        assert_eq!(panel.theme_label(), "Light Mode");
        assert_eq!(
            panel.handle(ControlAction::ToggleTheme),
            PanelEffect::ThemeChanged(Theme::Light)
        );
        assert_eq!(panel.theme_label(), "Dark Mode");
        assert_eq!(panel.theme().background(), 0xf0f0f0);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_reset_restores_sliders_and_keeps_pause() {
        let (mut panel, queue, mut state) = panel();
        panel.set_slider(0, 3.0);
        panel.set_slider(5, 0.0);
        panel.toggle_pause();
        queue.drain_into(&mut state);

        assert_eq!(panel.handle(ControlAction::Reset), PanelEffect::ResetCamera);
        assert!(panel.sliders().iter().all(|s| s.value() == 1.0));
        queue.drain_into(&mut state);
        assert!(state.bodies().iter().all(|b| b.speed_multiplier() == 1.0));
        assert!(state.is_paused());
        assert_eq!(panel.pause_label(), "Resume");
    }

    #[test]
    fn test_narrower_range_pulls_sliders_in() {
        let (mut panel, queue, mut state) = panel();
        panel.set_slider(0, 4.5);
        panel.set_slider(1, 0.5);
        queue.drain_into(&mut state);

        panel.set_range(SliderRange {
            min: 1.0,
            max: 3.0,
            step: 0.5,
        });
        assert_eq!(panel.sliders()[0].value(), 3.0);
        assert_eq!(panel.sliders()[1].value(), 1.0);
        assert_eq!(panel.sliders()[2].value(), 1.0);
        assert_eq!(queue.drain_into(&mut state), 2);
        assert_eq!(state.body(panel.sliders()[0].body).unwrap().speed_multiplier(), 3.0);

        let same = panel.range();
        panel.set_range(same);
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_quit() {
        let (mut panel, _queue, _state) = panel();
        assert_eq!(panel.handle(ControlAction::Quit), PanelEffect::Quit);
    }
}
