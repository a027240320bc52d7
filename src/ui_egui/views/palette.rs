use egui::Color32;

use crate::models::schedule::Assignment;

fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |c1: u8, c2: u8| -> u8 { ((c1 as f32 * (1.0 - t)) + (c2 as f32 * t)).round() as u8 };
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

/// Parse `#RRGGBB` as sent for special-group colors.
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[derive(Clone, Copy)]
pub(crate) struct GridPalette {
    pub is_dark: bool,
    pub header_bg: Color32,
    pub header_text: Color32,
    pub part_bg: Color32,
    pub cell_bg: Color32,
    pub cell_border: Color32,
    pub placeholder_text: Color32,
    pub hover_overlay: Color32,
    pub drop_target_border: Color32,
    pub caddie_card: Color32,
    pub group_card: Color32,
    pub card_text: Color32,
    pub badge_bg: Color32,
    pub badge_text: Color32,
    pub inactive_text: Color32,
}

impl GridPalette {
    pub fn from_visuals(visuals: &egui::Visuals) -> Self {
        let is_dark = visuals.dark_mode;
        let base = visuals.extreme_bg_color;
        let accent = visuals.selection.bg_fill;
        let text = visuals.text_color();

        Self {
            is_dark,
            header_bg: blend(base, accent, 0.25),
            header_text: text,
            part_bg: blend(base, accent, 0.12),
            cell_bg: visuals.faint_bg_color,
            cell_border: visuals.widgets.noninteractive.bg_stroke.color,
            placeholder_text: with_alpha(text, 90),
            hover_overlay: with_alpha(accent, if is_dark { 40 } else { 30 }),
            drop_target_border: accent,
            caddie_card: if is_dark {
                Color32::from_rgb(40, 70, 110)
            } else {
                Color32::from_rgb(214, 230, 250)
            },
            group_card: if is_dark {
                Color32::from_rgb(50, 90, 60)
            } else {
                Color32::from_rgb(216, 240, 220)
            },
            card_text: text,
            badge_bg: with_alpha(accent, 200),
            badge_text: if is_dark {
                Color32::from_gray(240)
            } else {
                Color32::WHITE
            },
            inactive_text: with_alpha(text, 120),
        }
    }

    /// Card fill for an occupant; special groups may bring their own color.
    pub fn card_fill(&self, assignment: &Assignment) -> Color32 {
        match assignment {
            Assignment::Caddie(_) => self.caddie_card,
            Assignment::SpecialGroup(group) => group
                .color
                .as_deref()
                .and_then(parse_hex_color)
                .map(|color| blend(self.group_card, color, 0.45))
                .unwrap_or(self.group_card),
        }
    }
}
