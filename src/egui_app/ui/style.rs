use crate::egui_app::state::NotificationTone;
use crate::format::ScoreTier;
use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub outline: Color32,
    pub selection_fill: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub accent: Color32,
    pub danger: Color32,
    pub success: Color32,
    pub caution: Color32,
}

/// Slate theme shared by every screen.
pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(15, 18, 24),
        bg_secondary: Color32::from_rgb(24, 29, 38),
        bg_tertiary: Color32::from_rgb(36, 43, 56),
        outline: Color32::from_rgb(52, 61, 78),
        selection_fill: Color32::from_rgb(37, 58, 94),
        text_primary: Color32::from_rgb(222, 228, 238),
        text_muted: Color32::from_rgb(142, 152, 170),
        accent: Color32::from_rgb(96, 150, 245),
        danger: Color32::from_rgb(228, 96, 96),
        success: Color32::from_rgb(72, 187, 120),
        caution: Color32::from_rgb(236, 178, 64),
    }
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.hyperlink_color = palette.accent;
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.error_fg_color = palette.danger;
    visuals.warn_fg_color = palette.caution;
    visuals.selection.bg_fill = palette.selection_fill;
    visuals.selection.stroke = Stroke::new(1.0, palette.accent);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    style_widget(&mut visuals.widgets.inactive, palette, palette.bg_tertiary);
    style_widget(&mut visuals.widgets.hovered, palette, palette.selection_fill);
    style_widget(&mut visuals.widgets.active, palette, palette.accent);
    style_widget(&mut visuals.widgets.open, palette, palette.selection_fill);
    visuals.window_corner_radius = CornerRadius::same(CARD_RADIUS);
    visuals.menu_corner_radius = CornerRadius::same(CARD_RADIUS);
    visuals.popup_shadow = Shadow::NONE;
    visuals.button_frame = true;
}

const CARD_RADIUS: u8 = 6;

fn style_widget(vis: &mut WidgetVisuals, palette: Palette, fill: Color32) {
    vis.corner_radius = CornerRadius::same(4);
    vis.bg_fill = fill;
    vis.weak_bg_fill = fill;
    vis.bg_stroke = Stroke::new(1.0, palette.outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}

pub fn card_stroke() -> Stroke {
    Stroke::new(1.0, palette().outline)
}

/// Score color: green for Excellent, amber for Good, red otherwise.
pub fn tier_color(tier: ScoreTier) -> Color32 {
    let palette = palette();
    match tier {
        ScoreTier::Excellent => palette.success,
        ScoreTier::Good => palette.caution,
        ScoreTier::NeedsImprovement => palette.danger,
    }
}

pub fn score_color(score: u8) -> Color32 {
    tier_color(ScoreTier::from_score(score))
}

pub fn tone_color(tone: NotificationTone) -> Color32 {
    let palette = palette();
    match tone {
        NotificationTone::Info => palette.accent,
        NotificationTone::Success => palette.success,
        NotificationTone::Error => palette.danger,
    }
}
