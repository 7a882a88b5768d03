/// Detailed analysis panel with Overview / Color / Texture tabs
use iced::widget::{button, canvas, column, container, text, Row};
use iced::{Element, Length, Pixels};
use iced_aw::Wrap;

use super::channels::ChannelBars;
use super::MUTED;
use crate::display::details::{section, DetailTab, Metric, SectionView};
use crate::state::analysis::AnalysisResult;
use crate::Message;

const TILE_WIDTH: f32 = 170.0;

pub fn view(result: &AnalysisResult, active: DetailTab) -> Element<'static, Message> {
    let tabs = Row::with_children(DetailTab::ALL.iter().map(|tab| -> Element<'static, Message> {
        let style: fn(&iced::Theme, button::Status) -> button::Style = if *tab == active {
            button::primary
        } else {
            button::secondary
        };
        button(tab.title())
            .on_press(Message::SelectTab(*tab))
            .style(style)
            .width(Length::Fill)
            .into()
    }))
    .spacing(4);

    let body: Element<Message> = match section(result, active) {
        SectionView::Available(metrics) => {
            let tiles = Wrap::with_elements(metrics.into_iter().map(tile).collect())
                .spacing(Pixels(10.0))
                .line_spacing(Pixels(10.0));

            let channels = result.color().and_then(|color| color.color_channels);
            match (active, channels) {
                (DetailTab::Color, Some(channels)) => column![
                    canvas(ChannelBars { channels })
                    .width(Length::Fill)
                    .height(Length::Fixed(90.0)),
                    tiles,
                ]
                .spacing(12)
                .into(),
                _ => tiles.into(),
            }
        }
        SectionView::NotAvailable => container(
            text(format!("{} metrics not available", active.title()))
                .size(14)
                .color(MUTED),
        )
        .padding(16)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .into(),
    };

    let mut panel = column![text("Detailed Analysis").size(22), tabs, body].spacing(14);

    if let Some(at) = result.analyzed_at() {
        panel = panel.push(
            text(format!("Analyzed {}", at.format("%Y-%m-%d %H:%M")))
                .size(12)
                .color(MUTED),
        );
    }

    panel.into()
}

fn tile(metric: Metric) -> Element<'static, Message> {
    container(
        column![
            text(metric.label).size(13),
            text(metric.value).size(18),
        ]
        .spacing(4),
    )
    .padding(12)
    .width(Length::Fixed(TILE_WIDTH))
    .style(container::rounded_box)
    .into()
}
