use crate::core::fractals::FractalKinds;
use crate::core::fractals::fractal_params::{JULIA_COMPONENT_RANGE, MAX_ITERATIONS_RANGE};
use crate::input::gui::app::state::ViewerState;

/// Buttons pressed during one panel frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PanelActions {
    pub reset_view: bool,
    pub reload_shaders: bool,
    pub screenshot: bool,
}

pub fn show_settings_panel(ctx: &egui::Context, state: &mut ViewerState, fps: f64) -> PanelActions {
    let mut actions = PanelActions::default();

    egui::Window::new("Settings")
        .default_pos([10.0, 10.0])
        .default_size([280.0, 240.0])
        .show(ctx, |ui| {
            ui.label(format!("FPS: {fps:.2}"));
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Fractal:");
                egui::ComboBox::from_id_source("fractal_kind")
                    .selected_text(state.selected_fractal.display_name())
                    .show_ui(ui, |ui| {
                        for &kind in FractalKinds::ALL {
                            ui.selectable_value(
                                &mut state.selected_fractal,
                                kind,
                                kind.display_name(),
                            );
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.label("Max iterations:");
                ui.add(egui::Slider::new(
                    &mut state.params.max_iterations,
                    MAX_ITERATIONS_RANGE,
                ));
            });

            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut rgba = state.params.color.to_array();
                if ui.color_edit_button_rgba_unmultiplied(&mut rgba).changed() {
                    state.params.color = rgba.into();
                }
            });

            if state.selected_fractal.uses_julia_constant() {
                ui.horizontal(|ui| {
                    ui.label("Julia real:");
                    ui.add(egui::Slider::new(
                        &mut state.params.julia.real,
                        JULIA_COMPONENT_RANGE,
                    ));
                });
                ui.horizontal(|ui| {
                    ui.label("Julia imag:");
                    ui.add(egui::Slider::new(
                        &mut state.params.julia.imag,
                        JULIA_COMPONENT_RANGE,
                    ));
                });
            }

            ui.separator();
            let pan = state.camera.pan_offset();
            ui.label(format!("Zoom: {:.3e}", state.camera.zoom_level()));
            ui.label(format!("Offset: ({:.6}, {:.6})", pan.x, pan.y));

            ui.horizontal(|ui| {
                actions.reset_view = ui.button("Reset view").clicked();
                actions.reload_shaders = ui.button("Reload shaders").clicked();
                actions.screenshot = ui.button("Screenshot").clicked();
            });

            if let Some(status) = state.status_message() {
                ui.label(status);
            }
            for message in state.error_messages() {
                ui.separator();
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }
        });

    state.params = state.params.clamped();
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_panel(state: &mut ViewerState) -> PanelActions {
        let ctx = egui::Context::default();
        let mut actions = PanelActions::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            actions = show_settings_panel(ctx, state, 60.0);
        });
        actions
    }

    #[test]
    fn idle_panel_requests_nothing() {
        let mut state = ViewerState::default();

        let actions = run_panel(&mut state);

        assert_eq!(actions, PanelActions::default());
        assert_eq!(state, ViewerState::default());
    }

    #[test]
    fn out_of_range_settings_are_pulled_back() {
        let mut state = ViewerState::default();
        state.params.max_iterations = 10_000;
        state.params.julia.real = 4.0;

        run_panel(&mut state);

        assert_eq!(state.params.max_iterations, 500);
        assert_eq!(state.params.julia.real, 1.0);
    }
}
