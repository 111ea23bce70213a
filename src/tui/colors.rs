//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Priority;

/// Accent for the focused form field and the active tab
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Status bar background
pub const SLATE: Color = Color::Rgb(40, 60, 90);
/// Low priority
pub const GREEN: Color = Color::Rgb(22, 163, 74);
/// Medium priority
pub const ORANGE: Color = Color::Rgb(249, 115, 22);
/// High priority
pub const RED: Color = Color::Rgb(220, 38, 38);
/// Validation message background
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::Low => GREEN,
        Priority::Medium => ORANGE,
        Priority::High => RED,
    }
}
