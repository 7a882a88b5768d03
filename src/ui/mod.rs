/// View functions
///
/// Each panel takes borrowed state and returns an `Element`; none of them
/// hold state of their own.

pub mod channels;
pub mod details;
pub mod moisture;
pub mod notifications;
pub mod recommendation;
pub mod uploader;

use iced::Color;

use crate::display::status::{Severity, StatusTone};

pub fn tone_color(tone: StatusTone) -> Color {
    match tone {
        StatusTone::Red => Color::from_rgb(0.94, 0.27, 0.27),
        StatusTone::Yellow => Color::from_rgb(0.92, 0.70, 0.03),
        StatusTone::Green => Color::from_rgb(0.13, 0.77, 0.37),
        StatusTone::Blue => Color::from_rgb(0.23, 0.51, 0.96),
        StatusTone::Neutral => Color::from_rgb(0.30, 0.49, 0.31),
    }
}

pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Default => Color::from_rgb(0.30, 0.49, 0.31),
        Severity::Destructive => Color::from_rgb(0.86, 0.15, 0.15),
    }
}

/// Muted color for secondary text
pub const MUTED: Color = Color {
    r: 0.45,
    g: 0.47,
    b: 0.45,
    a: 1.0,
};
