/// Recommendation panel: alert, action row, and the dry-soil tip
use iced::widget::{button, column, container, horizontal_space, row, text, Column};
use iced::{Alignment, Color, Element, Length};

use super::{severity_color, MUTED};
use crate::display::status::{moisture_action, recommendation_icon, MoistureCategory};
use crate::Message;

pub fn view(recommendation: &str, status: &str) -> Element<'static, Message> {
    let category = MoistureCategory::parse(status);
    let action = moisture_action(status);
    let alert_color = severity_color(category.alert_severity());

    let alert = container(
        row![
            text(recommendation_icon(status).glyph()).size(18).color(alert_color),
            column![
                text("Plant Care Action Required").size(15).color(alert_color),
                text(recommendation.to_string()).size(14),
            ]
            .spacing(4),
        ]
        .spacing(10),
    )
    .padding(12)
    .width(Length::Fill)
    .style(move |_theme| container::Style {
        border: iced::Border {
            color: alert_color,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..container::Style::default()
    });

    let action_color = severity_color(action.severity);

    let action_row = container(
        row![
            text(action.kind.glyph()).size(18).color(action_color),
            text(action.text).size(16),
            horizontal_space(),
            button("🔔 Schedule Reminder")
                .on_press(Message::ScheduleReminder)
                .padding(8),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
    )
    .padding(12)
    .width(Length::Fill)
    .style(container::rounded_box);

    let mut panel = Column::new()
        .push(text("Recommendation").size(18))
        .push(alert)
        .push(action_row)
        .spacing(12);

    if let Some(tip) = category.care_tip() {
        panel = panel.push(
            container(
                row![
                    text("☀").size(16).color(Color::from_rgb(0.96, 0.62, 0.04)),
                    text(format!("Tip: {}", tip)).size(13).color(MUTED),
                ]
                .spacing(8),
            )
            .padding(10)
            .width(Length::Fill)
            .style(container::rounded_box),
        );
    }

    panel.into()
}
