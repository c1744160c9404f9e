use egui::{Color32, Rounding, Stroke, Visuals};

pub const BG_PANEL: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 235);
pub const BG_WIDGET: Color32 = Color32::from_rgb(232, 232, 236);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(220, 220, 228);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(60, 60, 66);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(110, 110, 118);
pub const TEXT_HINT: Color32 = Color32::from_rgb(80, 80, 80);

pub const ACCENT_GREEN: Color32 = Color32::from_rgb(36, 140, 28);
pub const ACCENT_RED: Color32 = Color32::from_rgb(172, 35, 35);
pub const ACCENT_BLUE: Color32 = Color32::from_rgb(84, 102, 206);
pub const ACCENT_ORANGE: Color32 = Color32::from_rgb(190, 120, 20);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(205, 205, 215);

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.window_fill = BG_PANEL;
    visuals.panel_fill = BG_PANEL;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.window_rounding = Rounding::same(6.0);
    visuals.hyperlink_color = ACCENT_BLUE;
    visuals.warn_fg_color = ACCENT_ORANGE;
    visuals.error_fg_color = ACCENT_RED;

    visuals.widgets.inactive.bg_fill = BG_WIDGET;
    visuals.widgets.inactive.weak_bg_fill = BG_WIDGET;
    visuals.widgets.inactive.rounding = Rounding::same(4.0);
    visuals.widgets.hovered.bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_WIDGET_HOVER;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT_BLUE);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);
    visuals.selection.bg_fill = ACCENT_BLUE.gamma_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT_BLUE);

    let mut style = (*ctx.style()).clone();
    style.visuals = visuals;
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);

    ctx.set_style(style);
}
