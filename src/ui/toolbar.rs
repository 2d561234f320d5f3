use iced::widget::{button, column, row, text};
use iced::{Element, Length};

use crate::Message;

/// Action buttons above the canvas, with the status line underneath
pub fn toolbar<'a>(status: &'a str) -> Element<'a, Message> {
    let buttons = row![
        button("Load Files").on_press(Message::LoadFiles),
        button("< Prev").on_press(Message::Navigate(-1)),
        button("Next >").on_press(Message::Navigate(1)),
        button("Zoom In").on_press(Message::ZoomIn),
        button("Zoom Out").on_press(Message::ZoomOut),
        button("Save Library").on_press(Message::SaveLibrary),
        button("Load Library").on_press(Message::LoadLibrary),
        button("Remove File").on_press(Message::RemoveFile),
    ]
    .spacing(4);

    column![buttons, text(status).size(13)]
        .spacing(4)
        .padding(6)
        .width(Length::Fill)
        .into()
}
