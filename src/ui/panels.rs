use egui::{Align2, Context, RichText, Ui};

use crate::ui::state::ViewerState;
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub reset_view: bool,
    pub dismiss_error: bool,
}

pub fn draw_hint(ctx: &Context, loaded: bool) {
    egui::Area::new(egui::Id::new("hint"))
        .anchor(Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                RichText::new("Drag and drop a .off file to load a mesh.")
                    .color(TEXT_HINT)
                    .size(20.0),
            );
            if loaded {
                ui.label(
                    RichText::new("LMB+Drag - Rotate | Scroll - Zoom | R - Reset")
                        .color(TEXT_MUTED),
                );
            }
        });
}

pub fn draw_fps(ctx: &Context, fps: f32) {
    let fps_color = if fps >= 50.0 {
        ACCENT_GREEN
    } else if fps >= 25.0 {
        ACCENT_ORANGE
    } else {
        ACCENT_RED
    };

    egui::Area::new(egui::Id::new("fps"))
        .anchor(Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(RichText::new(format!("{fps:.0} FPS")).color(fps_color).strong());
        });
}

pub fn draw_mesh_panel(ctx: &Context, state: &mut ViewerState) -> UiActions {
    let mut actions = UiActions::default();

    if !state.show_panel {
        return actions;
    }

    egui::Window::new("Mesh")
        .anchor(Align2::LEFT_BOTTOM, egui::vec2(10.0, -10.0))
        .resizable(false)
        .collapsible(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            match &state.mesh_info {
                Some(info) => {
                    ui.label(RichText::new(&info.name).strong());
                    ui.add_space(4.0);
                    egui::Grid::new("mesh_stats")
                        .num_columns(2)
                        .spacing([20.0, 4.0])
                        .show(ui, |ui| {
                            stat_row(ui, "Vertices", fmt_num(info.vertices));
                            stat_row(ui, "Triangles", fmt_num(info.triangles));
                            if info.skipped_faces > 0 {
                                ui.label(RichText::new("Skipped").color(TEXT_MUTED));
                                ui.label(
                                    RichText::new(fmt_num(info.skipped_faces)).color(ACCENT_ORANGE),
                                );
                                ui.end_row();
                            }
                            stat_row(
                                ui,
                                "Center",
                                format!(
                                    "({:.3}, {:.3}, {:.3})",
                                    info.center.x, info.center.y, info.center.z
                                ),
                            );
                            stat_row(ui, "Scale", format!("{:.4}", info.scale));
                        });
                }
                None => {
                    ui.label(RichText::new("No mesh loaded").color(TEXT_MUTED).italics());
                }
            }

            if let Some(err) = &state.last_error {
                ui.add_space(8.0);
                ui.label(RichText::new(err).color(ACCENT_RED).size(11.0));
                if ui.small_button("Dismiss").clicked() {
                    actions.dismiss_error = true;
                }
            }

            ui.add_space(8.0);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Reset view").clicked() {
                    actions.reset_view = true;
                }
                ui.checkbox(&mut state.vsync_enabled, "VSync");
            });
            ui.horizontal(|ui| {
                ui.checkbox(&mut state.fps_cap_enabled, "FPS cap");
                ui.add_enabled(
                    state.fps_cap_enabled,
                    egui::Slider::new(&mut state.fps_cap, 15..=240),
                );
            });
        });

    actions
}

fn stat_row(ui: &mut Ui, label: &str, value: String) {
    ui.label(RichText::new(label).color(TEXT_MUTED));
    ui.label(RichText::new(value).color(TEXT_PRIMARY));
    ui.end_row();
}

fn fmt_num(n: usize) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::fmt_num;

    #[test]
    fn compact_numbers() {
        assert_eq!(fmt_num(42), "42");
        assert_eq!(fmt_num(34_834), "34.8K");
        assert_eq!(fmt_num(2_500_000), "2.50M");
    }
}
