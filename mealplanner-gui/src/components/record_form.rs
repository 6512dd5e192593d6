use iced::{
    Element, Length,
    widget::{Column, button, checkbox, column, container, row, scrollable, space, text, text_input},
};
use mealplanner_lib::{FieldEdit, MealSlot, session::Form};

#[derive(Debug, Clone)]
pub enum Message {
    DateInput(String),
    WeightInput(String),
    WorkoutToggled(bool),
    CreatineToggled(bool),
    WheyToggled(bool),
    MealInput(MealSlot, String),
    CaloriesInput(String),
    ProteinInput(String),
    NotesInput(String),
    SavePressed,
    CancelPressed,
}

/// Action used for communicating with the parent component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(FieldEdit),
    Save,
    Cancel,
}

pub fn update(message: Message) -> Action {
    match message {
        Message::DateInput(value) => Action::Edit(FieldEdit::Date(value)),
        Message::WeightInput(value) => Action::Edit(FieldEdit::Weight(value)),
        Message::WorkoutToggled(value) => Action::Edit(FieldEdit::Workout(value)),
        Message::CreatineToggled(value) => Action::Edit(FieldEdit::Creatine(value)),
        Message::WheyToggled(value) => Action::Edit(FieldEdit::Whey(value)),
        Message::MealInput(slot, value) => Action::Edit(FieldEdit::Meal(slot, value)),
        Message::CaloriesInput(value) => Action::Edit(FieldEdit::Calories(value)),
        Message::ProteinInput(value) => Action::Edit(FieldEdit::Protein(value)),
        Message::NotesInput(value) => Action::Edit(FieldEdit::Notes(value)),
        Message::SavePressed => Action::Save,
        Message::CancelPressed => Action::Cancel,
    }
}

/// Render the form. Both buttons are disabled while a save is in flight.
pub fn view(form: &Form, saving: bool) -> Element<'_, Message> {
    let fields = form.draft().fields();

    let mut content = column![row![
        text(form.title()).size(22),
        space::horizontal(),
        button("Close").on_press_maybe((!saving).then_some(Message::CancelPressed)),
    ]]
    .spacing(12);

    if let Some(error) = form.error() {
        content = content.push(text(error).style(text::danger));
    }

    content = content
        .push(row![
            labelled(
                "Date *",
                text_input("DD/MM/YYYY", &fields.date).on_input(Message::DateInput)
            ),
            labelled(
                "Weight (kg) *",
                text_input("59.3", &fields.weight).on_input(Message::WeightInput)
            ),
        ]
        .spacing(12))
        .push(text("Supplements"))
        .push(
            row![
                toggle("Workout", fields.workout, Message::WorkoutToggled),
                toggle("Creatine", fields.creatine, Message::CreatineToggled),
                toggle("Whey", fields.whey, Message::WheyToggled),
            ]
            .spacing(16),
        )
        .push(text("Meals").size(18));

    let meals = MealSlot::all().map(|slot| {
        labelled(
            slot.label(),
            text_input(slot.placeholder(), fields.meal(slot))
                .on_input(move |value| Message::MealInput(slot, value)),
        )
    });

    content = content
        .push(Column::with_children(meals).spacing(8))
        .push(
            row![
                labelled(
                    "Approx Calories (kcal)",
                    text_input("2380", &fields.calories).on_input(Message::CaloriesInput)
                ),
                labelled(
                    "Protein Estimate (g)",
                    text_input("132", &fields.protein).on_input(Message::ProteinInput)
                ),
            ]
            .spacing(12),
        )
        .push(labelled(
            "Notes",
            text_input(
                "Energy good. Felt full. Need to add more fats maybe.",
                &fields.notes,
            )
            .on_input(Message::NotesInput),
        ))
        .push(row![
            button(if saving { "Saving..." } else { "Save Record" })
                .style(button::primary)
                .on_press_maybe((!saving).then_some(Message::SavePressed)),
            button("Cancel")
                .style(button::secondary)
                .on_press_maybe((!saving).then_some(Message::CancelPressed)),
        ]
        .spacing(12));

    scrollable(container(content).padding(20).max_width(720))
        .width(Length::Fill)
        .into()
}

fn labelled<'a>(
    label: &'a str,
    input: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    column![text(label), input.into()]
        .spacing(4)
        .width(Length::Fill)
        .into()
}

fn toggle<'a>(
    label: &'a str,
    checked: bool,
    on_toggle: fn(bool) -> Message,
) -> Element<'a, Message> {
    row![checkbox(checked).on_toggle(on_toggle), text(label)]
        .spacing(6)
        .into()
}
