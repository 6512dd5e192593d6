use chrono::Local;
use iced::{
    Element,
    Length::Fill,
    Task, Theme, application,
    widget::{button, column, row, rule, space, text},
};
use mealplanner_lib::{
    Backend, ClientConfig, Error, HttpBackend, LoadTicket, MealRecord, Planner, WriteKind,
    client, projector::ViewMode,
};
use tracing::{Level, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::{
    components::{record_form, record_list},
    config::GuiConfig,
};

pub mod components;
pub mod config;

fn main() -> iced::Result {
    application(App::new, App::update, App::view)
        .theme(App::theme)
        .title(App::title)
        .run()
}

#[derive(Debug, Clone)]
enum Message {
    Loaded(LoadTicket, Result<Vec<MealRecord>, Error>),
    Saved(WriteKind, Result<(), Error>),
    ThemeToggled,
    // Components
    RecordList(record_list::Message),
    RecordForm(record_form::Message),
}

struct App {
    title: String,
    cfg: GuiConfig,
    planner: Planner<HttpBackend>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        // Human friendly panicking in release mode
        human_panic::setup_panic!();

        // Logging
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::TRACE)
            .with_env_filter(EnvFilter::from_default_env())
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");

        let client_cfg = ClientConfig::load().unwrap_or_else(|err| {
            warn!("Using default client configuration: {err}");
            ClientConfig::default()
        });

        let mut planner = Planner::new(HttpBackend::new(client_cfg.base_url()));
        let ticket = planner.begin_load();
        let task = load_records(planner.backend(), ticket);

        (
            Self {
                title: "Meal Planner".into(),
                cfg: GuiConfig::load(),
                planner,
            },
            task,
        )
    }

    // Update application state based on messages passed by view()
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(ticket, result) => {
                self.planner.finish_load(ticket, result);
                Task::none()
            }
            Message::Saved(kind, result) => {
                if self.planner.finish_save(kind, result) {
                    self.reload()
                } else {
                    Task::none()
                }
            }
            Message::ThemeToggled => {
                self.cfg.theme = self.cfg.theme.toggled();
                self.cfg.save();
                Task::none()
            }
            Message::RecordList(message) => match message {
                record_list::Message::NewRecordPressed => {
                    self.planner.new_record(Local::now().date_naive());
                    Task::none()
                }
                record_list::Message::RetryPressed => self.reload(),
                record_list::Message::ExpandToggled(id) => {
                    self.planner.toggle_expanded(&id);
                    Task::none()
                }
                record_list::Message::EditPressed(id) => {
                    if !self.planner.edit_record(&id) {
                        warn!("Record {id} vanished before it could be edited");
                    }
                    Task::none()
                }
            },
            Message::RecordForm(message) => match record_form::update(message) {
                record_form::Action::Edit(edit) => {
                    self.planner.edit_field(edit);
                    Task::none()
                }
                record_form::Action::Save => self.save(),
                record_form::Action::Cancel => {
                    self.planner.cancel();
                    Task::none()
                }
            },
        }
    }

    // Render the application and pass along messages from components to update()
    pub fn view(&self) -> Element<'_, Message> {
        let form = self.planner.session().form();

        let body = match (self.planner.mode(), form) {
            (ViewMode::Form, Some(form)) => {
                record_form::view(form, self.planner.store().is_saving()).map(Message::RecordForm)
            }
            _ => record_list::view(&self.planner).map(Message::RecordList),
        };

        let new_button = button("+ New Record").style(button::primary).on_press_maybe(
            (self.planner.mode() == ViewMode::List && !self.planner.store().is_loading())
                .then_some(Message::RecordList(record_list::Message::NewRecordPressed)),
        );

        column![
            // Top bar
            row![
                column![
                    text("Meal Planner").size(24),
                    text("Track your daily nutrition and progress").size(14),
                ],
                space::horizontal(),
                button(text(self.cfg.theme.toggled().to_string()))
                    .style(button::subtle)
                    .on_press(Message::ThemeToggled),
                new_button,
            ]
            .spacing(8)
            .padding(12),
            rule::horizontal(1),
            body,
        ]
        .height(Fill)
        .into()
    }

    pub fn title(&self) -> String {
        self.title.clone()
    }

    pub fn theme(&self) -> Theme {
        self.cfg.theme()
    }

    fn reload(&mut self) -> Task<Message> {
        let ticket = self.planner.begin_load();
        load_records(self.planner.backend(), ticket)
    }

    fn save(&mut self) -> Task<Message> {
        let Some(submission) = self.planner.begin_save() else {
            return Task::none();
        };

        let backend = self.planner.backend().clone();
        let kind = submission.kind();

        Task::perform(
            async move { client::submit(&backend, &submission).await },
            move |result| Message::Saved(kind, result),
        )
    }
}

fn load_records(backend: &HttpBackend, ticket: LoadTicket) -> Task<Message> {
    let backend = backend.clone();
    Task::perform(async move { backend.fetch_records().await }, move |result| {
        Message::Loaded(ticket, result)
    })
}
