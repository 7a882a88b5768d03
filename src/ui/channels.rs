/// RGB channel bars
/// Displays the mean red, green and blue values of the soil photo
use iced::widget::canvas::{self, Path, Stroke};
use iced::{Color, Point, Rectangle, Size};

use crate::state::analysis::ColorChannels;
use crate::Message;

/// Channel means are on a 0-255 scale
const CHANNEL_MAX: f32 = 255.0;

/// Channel bar chart data
#[derive(Debug, Clone, Copy)]
pub struct ChannelBars {
    pub channels: ColorChannels,
}

impl ChannelBars {
    /// Bar heights as fractions of the chart height, in R, G, B order.
    /// A missing channel draws as an empty bar.
    pub fn fractions(&self) -> [f32; 3] {
        [self.channels.red, self.channels.green, self.channels.blue].map(|v| match v {
            Some(v) if v.is_finite() => (v as f32 / CHANNEL_MAX).clamp(0.0, 1.0),
            _ => 0.0,
        })
    }
}

impl canvas::Program<Message> for ChannelBars {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());

        let height = bounds.height;
        let slot = bounds.width / 3.0;
        let bar_width = slot * 0.6;

        let colors = [
            Color::from_rgb(0.86, 0.2, 0.2),  // Red
            Color::from_rgb(0.2, 0.7, 0.3),   // Green
            Color::from_rgb(0.2, 0.4, 0.86),  // Blue
        ];

        for (i, fraction) in self.fractions().iter().enumerate() {
            let bar_height = fraction * height;
            let x = i as f32 * slot + (slot - bar_width) / 2.0;
            frame.fill_rectangle(
                Point::new(x, height - bar_height),
                Size::new(bar_width, bar_height),
                colors[i],
            );
        }

        // Baseline
        let baseline = Path::line(Point::new(0.0, height), Point::new(bounds.width, height));
        frame.stroke(
            &baseline,
            Stroke::default()
                .with_color(Color::from_rgba(0.0, 0.0, 0.0, 0.3))
                .with_width(1.0),
        );

        vec![frame.into_geometry()]
    }
}
