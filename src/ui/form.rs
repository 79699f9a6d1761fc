/// Layout of the single converter window
use iced::widget::{button, column, container, radio, scrollable, text, text_input, Column};
use iced::{Alignment, Background, Color, Element, Length, Theme};

use crate::state::form::{Direction, FormState};
use crate::state::transcript::Transcript;
use crate::Message;

/// Sepia window background
pub const SEPIA: Color = Color {
    r: 0.961,
    g: 0.961,
    b: 0.863,
    a: 1.0,
};

/// Scrollable id of the log panel, used to keep it pinned to the end
pub fn log_scroll_id() -> scrollable::Id {
    scrollable::Id::new("log-panel")
}

pub fn view<'a>(form: &'a FormState, transcript: &'a Transcript) -> Element<'a, Message> {
    let input = column![
        text("Input File:"),
        text_input("Choose a file...", &form.input)
            .on_input(Message::InputChanged)
            .width(Length::Fixed(320.0)),
        button("Browse...").on_press(Message::Browse),
    ]
    .spacing(5)
    .align_x(Alignment::Center);

    let directions = Direction::ALL.into_iter().fold(
        column![text("Conversion Type:")].spacing(4),
        |col, direction| {
            col.push(radio(
                direction.label(),
                direction,
                Some(form.direction),
                Message::DirectionSelected,
            ))
        },
    );

    let mut content: Column<Message> = column![
        input,
        directions,
        button("Convert").on_press_maybe(form.can_convert().then_some(Message::Convert)),
        button(form.log_button_label()).on_press(Message::ToggleLog),
    ]
    .spacing(10)
    .padding(15)
    .align_x(Alignment::Center);

    if form.log_visible {
        content = content.push(log_panel(transcript));
    }

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(SEPIA)),
            ..container::Style::default()
        })
        .into()
}

fn log_panel(transcript: &Transcript) -> Element<'_, Message> {
    let body = scrollable(text(transcript.as_text()).size(12))
        .id(log_scroll_id())
        .width(Length::Fill)
        .height(Length::Fixed(90.0));

    container(body)
        .padding(5)
        .width(Length::Fill)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(Color::WHITE)),
            text_color: Some(Color::BLACK),
            ..container::Style::default()
        })
        .into()
}
