use iced::widget::{button, scrollable, text, Column};
use iced::{Element, Length, Task, Theme};

use crate::state::library::Library;
use crate::Message;

/// Scroll id of the file list, used to keep the selection in view
pub fn list_id() -> scrollable::Id {
    scrollable::Id::new("library-list")
}

/// File list showing basenames; the selected entry is highlighted
pub fn file_list<'a>(library: &Library, selected: Option<usize>, width: f32) -> Element<'a, Message> {
    let items = library.entries().iter().enumerate().map(|(index, _)| {
        let name = library.display_name(index).unwrap_or_default();
        let style: fn(&Theme, button::Status) -> button::Style = if selected == Some(index) {
            button::primary
        } else {
            button::text
        };

        button(text(name).size(14))
            .on_press(Message::FileSelected(index))
            .style(style)
            .width(Length::Fill)
            .into()
    });

    scrollable(Column::with_children(items).spacing(2).padding(4))
        .id(list_id())
        .width(Length::Fixed(width))
        .height(Length::Fill)
        .into()
}

/// Scroll the list so the selected entry is visible
pub fn reveal(library: &Library, selected: Option<usize>) -> Task<Message> {
    let Some(index) = selected else {
        return Task::none();
    };
    let y = if library.len() > 1 {
        index as f32 / (library.len() - 1) as f32
    } else {
        0.0
    };
    scrollable::snap_to(list_id(), scrollable::RelativeOffset { x: 0.0, y })
}
