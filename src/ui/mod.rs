use egui::{Color32, Visuals, style::Widgets};

pub mod dashboard;

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(12, 12, 12);
pub(crate) const PALETTE_BROWN: Color32 = Color32::from_rgb(72, 30, 20);
pub(crate) const PALETTE_MAROON: Color32 = Color32::from_rgb(155, 57, 34);
pub(crate) const PALETTE_TITLE: Color32 = Color32::from_rgb(80, 61, 54);

/// Qualitative colors for chart categories, cycled when there are more categories.
pub(crate) const CATEGORY_COLORS: [Color32; 10] = [
    Color32::from_rgb(99, 110, 250),
    Color32::from_rgb(239, 85, 59),
    Color32::from_rgb(0, 204, 150),
    Color32::from_rgb(171, 99, 250),
    Color32::from_rgb(255, 161, 90),
    Color32::from_rgb(25, 211, 243),
    Color32::from_rgb(255, 102, 146),
    Color32::from_rgb(182, 232, 128),
    Color32::from_rgb(255, 151, 255),
    Color32::from_rgb(254, 203, 82),
];

pub(crate) fn category_color(idx: usize) -> Color32 {
    CATEGORY_COLORS[idx % CATEGORY_COLORS.len()]
}

pub(crate) fn dashboard_visuals(dark_mode: bool) -> Visuals {
    if dark_mode {
        Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_MAROON,
            faint_bg_color: PALETTE_BLACK,
            extreme_bg_color: PALETTE_BROWN,
            panel_fill: PALETTE_BLACK,
            button_frame: true,
            widgets: Widgets::dark(),
            striped: true,
            ..Visuals::dark()
        }
    } else {
        Visuals {
            striped: true,
            ..Visuals::light()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_colors_cycle() {
        assert_eq!(category_color(0), category_color(CATEGORY_COLORS.len()));
        assert_ne!(category_color(0), category_color(1));
    }
}
