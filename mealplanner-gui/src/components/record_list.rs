use iced::{
    Element, Length,
    widget::{Column, button, column, container, row, rule, scrollable, space, text},
};
use mealplanner_lib::{
    Backend, MealRecord, Planner, RecordId,
    projector::{self, ViewProjector, format_date},
};

#[derive(Debug, Clone)]
pub enum Message {
    NewRecordPressed,
    RetryPressed,
    ExpandToggled(RecordId),
    EditPressed(RecordId),
}

pub fn view<B: Backend>(planner: &Planner<B>) -> Element<'_, Message> {
    let store = planner.store();

    let mut content = column![].spacing(16);

    if store.is_loading() {
        content = content.push(text("Loading meal plans..."));
    } else if let Some(error) = store.error() {
        content = content.push(
            container(
                column![
                    text("Error").style(text::danger),
                    text(error),
                    button("Try again")
                        .style(button::text)
                        .on_press(Message::RetryPressed),
                ]
                .spacing(6),
            )
            .padding(12)
            .style(container::rounded_box),
        );
    }

    if !store.is_loading() {
        let recent = planner.recent();
        let older = planner.older();

        if !recent.is_empty() {
            let cards = recent.iter().map(|record| card(record, planner.view()));
            content = content
                .push(text("Recent Records").size(18))
                .push(Column::with_children(cards).spacing(12));
        }

        if !older.is_empty() {
            let rows = older.iter().map(older_row);
            content = content.push(text("Previous Records").size(18)).push(
                container(Column::with_children(rows).spacing(4))
                    .padding(8)
                    .style(container::rounded_box),
            );
        }

        if recent.is_empty() && store.error().is_none() {
            content = content.push(empty_state());
        }
    }

    scrollable(container(content).padding(20).max_width(900))
        .width(Length::Fill)
        .into()
}

fn card<'a>(record: &'a MealRecord, view: &ViewProjector) -> Element<'a, Message> {
    let fields = &record.fields;
    let expanded = view.is_expanded(&record.id);

    let mut header = row![
        text(format_date(&fields.date)).size(16),
        text(format!("{} kg", fields.weight)),
    ]
    .spacing(12);

    for flag in projector::flags(fields) {
        header = header.push(
            container(text(flag).size(12))
                .padding(4)
                .style(container::rounded_box),
        );
    }

    header = header.push(space::horizontal()).push(
        row![
            button(if expanded { "Hide" } else { "Details" })
                .style(button::subtle)
                .on_press(Message::ExpandToggled(record.id.clone())),
            button("Edit")
                .style(button::subtle)
                .on_press(Message::EditPressed(record.id.clone())),
        ]
        .spacing(4),
    );

    let body: Element<'a, Message> = if expanded {
        row![
            section("Meals", projector::meal_lines(fields)),
            section("Nutrition & Notes", projector::nutrition_lines(fields)),
        ]
        .spacing(24)
        .into()
    } else {
        let summary: Vec<Element<'a, Message>> = projector::summary(fields)
            .into_iter()
            .map(|part| text(part).size(13).into())
            .collect();
        Column::with_children(summary).into()
    };

    container(column![header, rule::horizontal(1), body].spacing(8))
        .padding(12)
        .width(Length::Fill)
        .style(container::rounded_box)
        .into()
}

fn section<'a>(title: &'a str, lines: Vec<String>) -> Element<'a, Message> {
    let lines: Vec<Element<'a, Message>> = lines
        .into_iter()
        .map(|line| text(line).size(13).into())
        .collect();

    column![text(title), Column::with_children(lines).spacing(4)]
        .spacing(6)
        .width(Length::FillPortion(1))
        .into()
}

fn older_row(record: &MealRecord) -> Element<'_, Message> {
    let fields = &record.fields;

    let mut content = row![
        text(format_date(&fields.date)),
        text(format!("{} kg", fields.weight)),
    ]
    .spacing(12);

    if !fields.calories.is_empty() {
        content = content.push(text(format!("{} kcal", fields.calories)));
    }

    content
        .push(space::horizontal())
        .push(
            button("Edit")
                .style(button::subtle)
                .on_press(Message::EditPressed(record.id.clone())),
        )
        .into()
}

fn empty_state<'a>() -> Element<'a, Message> {
    column![
        text("No meal records yet").size(18),
        text("Start tracking your meals and nutrition by creating your first record."),
        button("Create First Record")
            .style(button::primary)
            .on_press(Message::NewRecordPressed),
    ]
    .spacing(8)
    .into()
}
