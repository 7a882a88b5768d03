/// Upload area: empty drop target, or the current preview
use iced::widget::{button, column, container, image, stack, text};
use iced::{Alignment, Color, Element, Length};

use super::MUTED;
use crate::state::controller::UploadController;
use crate::Message;

const PREVIEW_HEIGHT: f32 = 280.0;

pub fn view(controller: &UploadController, is_dragging: bool) -> Element<'_, Message> {
    let uploading = controller.is_uploading();
    let pick = (!uploading).then_some(Message::PickImage);

    let content: Element<Message> = match controller.preview() {
        Some(preview) => {
            let picture = image(preview.handle().clone())
                .width(Length::Fill)
                .height(Length::Fixed(PREVIEW_HEIGHT));

            let framed: Element<Message> = if uploading {
                let overlay = container(text("Analyzing...").size(18).color(Color::WHITE))
                    .width(Length::Fill)
                    .height(Length::Fixed(PREVIEW_HEIGHT))
                    .center_x(Length::Fill)
                    .center_y(Length::Fixed(PREVIEW_HEIGHT))
                    .style(|_theme| container::Style {
                        background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.5).into()),
                        ..container::Style::default()
                    });
                stack![picture, overlay].into()
            } else {
                picture.into()
            };

            let status: Element<Message> = match controller.error() {
                Some(message) => text(message).size(13).color(Color::from_rgb(0.86, 0.15, 0.15)).into(),
                None => text(preview.file_name()).size(12).color(MUTED).into(),
            };

            column![
                framed,
                status,
                button("Upload different image")
                    .on_press_maybe(pick)
                    .style(button::secondary)
                    .padding(10),
            ]
            .spacing(10)
            .align_x(Alignment::Center)
            .into()
        }
        None => column![
            text("🖼").size(40),
            text("Upload plant image").size(20),
            text("Drag and drop or choose a clear image of your plant's soil")
                .size(14)
                .color(MUTED),
            button("Choose image").on_press_maybe(pick).padding(10),
            text("For best results, ensure the soil is clearly visible and well-lit")
                .size(12)
                .color(MUTED),
        ]
        .spacing(12)
        .align_x(Alignment::Center)
        .into(),
    };

    let highlight = if is_dragging {
        Color::from_rgb(0.30, 0.49, 0.31)
    } else {
        Color::from_rgb(0.80, 0.82, 0.80)
    };

    container(content)
        .padding(24)
        .width(Length::Fill)
        .center_x(Length::Fill)
        .style(move |_theme| container::Style {
            border: iced::Border {
                color: highlight,
                width: 2.0,
                radius: 8.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}
