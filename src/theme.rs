use ratatui::style::{Color, Modifier, Style};

// Centralized theme colors. Keep these as small helpers so surfaces never
// hard-code colors of their own.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

/// Glyph used to fill drop shadows.
pub const SHADOW_SYMBOL: &str = "░";

/// Glyph used to tile the demo backdrop.
pub const BACKDROP_SYMBOL: &str = "·";

pub fn accent() -> Color {
    Color::Rgb(ACCENT_RGB.0, ACCENT_RGB.1, ACCENT_RGB.2)
}

// Shadows
pub fn shadow_bg() -> Color {
    Color::Black
}
pub fn shadow_fg() -> Color {
    Color::DarkGray
}

/// Style applied over everything beneath a lightboxed modal.
pub fn lightbox_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::DIM)
}

// Backdrop
pub fn backdrop_bg() -> Color {
    Color::Reset
}
pub fn backdrop_fg() -> Color {
    Color::DarkGray
}

// Panel chrome
pub fn panel_bg() -> Color {
    Color::Black
}
pub fn panel_fg() -> Color {
    Color::White
}
pub fn panel_border() -> Color {
    Color::Gray
}
pub fn panel_header_bg() -> Color {
    Color::Blue
}
pub fn panel_header_fg() -> Color {
    Color::White
}

// Dialog / confirm
pub fn dialog_bg() -> Color {
    Color::Black
}
pub fn dialog_fg() -> Color {
    Color::White
}
pub fn dialog_separator() -> Color {
    Color::DarkGray
}
pub fn button_selected_bg() -> Color {
    accent()
}
pub fn button_selected_fg() -> Color {
    Color::Black
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_is_rgb() {
        assert_eq!(accent(), Color::Rgb(200, 100, 0));
    }

    #[test]
    fn lightbox_dims() {
        assert!(lightbox_style().add_modifier.contains(Modifier::DIM));
    }
}
