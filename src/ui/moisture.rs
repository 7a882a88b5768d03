/// Moisture gauge panel
use iced::widget::{column, container, horizontal_space, progress_bar, row, text, Row};
use iced::{Alignment, Color, Element, Length};

use super::{tone_color, MUTED};
use crate::display::gauge::{GaugeModel, SCALE_LABELS};
use crate::display::status::IconKind;
use crate::Message;

pub fn view(gauge: &GaugeModel) -> Element<'static, Message> {
    let tone = tone_color(gauge.category.tone());

    let header = row![
        text("Soil Moisture Level").size(18),
        horizontal_space(),
        text(gauge.status_label.clone()).size(16).color(tone),
    ]
    .align_y(Alignment::Center);

    let bar = progress_bar(0.0..=100.0, gauge.percentage as f32).height(Length::Fixed(16.0));

    let scale = Row::with_children(
        SCALE_LABELS
            .iter()
            .enumerate()
            .flat_map(|(i, label)| {
                let mut cells: Vec<Element<'static, Message>> = Vec::new();
                if i > 0 {
                    cells.push(horizontal_space().into());
                }
                cells.push(text(*label).size(11).color(MUTED).into());
                cells
            }),
    );

    let droplets = Row::with_children(gauge.droplets.iter().map(|droplet| -> Element<'static, Message> {
        let color = if droplet.is_filled() {
            tone
        } else {
            Color { a: 0.3, ..tone }
        };
        text(IconKind::Droplet.glyph())
            .size(droplet.size())
            .color(color)
            .into()
    }))
    .spacing(4)
    .align_y(Alignment::End);

    let score = container(
        row![
            column![
                text("Moisture Score").size(14),
                text(gauge.score_label.clone()).size(28),
            ]
            .spacing(2),
            horizontal_space(),
            droplets,
        ]
        .align_y(Alignment::Center),
    )
    .padding(16)
    .width(Length::Fill)
    .style(container::rounded_box);

    column![header, bar, scale, score].spacing(10).into()
}
