/// Notification banners
use iced::widget::{button, column, container, horizontal_space, row, text, Column};
use iced::{Alignment, Color, Element, Length};

use crate::state::notification::{Notification, NotificationKind};
use crate::Message;

pub fn view(notifications: &[Notification]) -> Element<'_, Message> {
    Column::with_children(notifications.iter().enumerate().map(|(index, n)| banner(index, n)))
        .spacing(8)
        .into()
}

fn banner(index: usize, notification: &Notification) -> Element<'_, Message> {
    let accent = match notification.kind {
        NotificationKind::Success => Color::from_rgb(0.13, 0.55, 0.27),
        NotificationKind::Error => Color::from_rgb(0.80, 0.15, 0.15),
    };

    container(
        row![
            column![
                text(notification.title.as_str()).size(15).color(accent),
                text(notification.description.as_str()).size(13),
            ]
            .spacing(2),
            horizontal_space(),
            button("✕")
                .on_press(Message::DismissNotification(index))
                .style(button::text),
        ]
        .align_y(Alignment::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .style(move |_theme| container::Style {
        border: iced::Border {
            color: accent,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..container::Style::default()
    })
    .into()
}
