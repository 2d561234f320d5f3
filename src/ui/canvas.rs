use iced::widget::{container, image, scrollable, Stack};
use iced::{Color, ContentFit, Element, Length, Padding};

use crate::state::data::{Extent, RenderedFrame};
use crate::Message;

/// Canvas background, matching a neutral gray desk
const BACKGROUND: Color = Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

/// Scrollable canvas showing the rendered bitmaps at their placements.
///
/// Each frame is padded to its (x, y) offset and the frames are stacked,
/// so one code path covers centered images, animations and page stacks.
pub fn document_canvas<'a>(frames: Vec<&'a RenderedFrame>, extent: Extent) -> Element<'a, Message> {
    let layers = frames.into_iter().map(|frame| {
        let bitmap = image(frame.bitmap.handle.clone())
            .width(Length::Fixed(frame.bitmap.width as f32))
            .height(Length::Fixed(frame.bitmap.height as f32))
            .content_fit(ContentFit::Fill);

        container(bitmap)
            .padding(Padding {
                top: frame.y.max(0) as f32,
                right: 0.0,
                bottom: 0.0,
                left: frame.x.max(0) as f32,
            })
            .into()
    });

    // Sized to the scroll extent so the scrollbars cover every page
    let content = container(Stack::with_children(layers))
        .width(Length::Fixed(extent.width as f32))
        .height(Length::Fixed(extent.height as f32));

    let scroll = scrollable(content)
        .direction(scrollable::Direction::Both {
            vertical: scrollable::Scrollbar::default(),
            horizontal: scrollable::Scrollbar::default(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

    container(scroll)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| container::Style {
            background: Some(BACKGROUND.into()),
            ..container::Style::default()
        })
        .into()
}
