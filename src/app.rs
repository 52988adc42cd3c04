use std::path::PathBuf;

use iced::Task;
use rfd::{AsyncMessageDialog, MessageLevel};

use crate::api::{ApiConfig, InstaClient};
use crate::application::DownloadCoordinator;
use crate::domain::{AppError, FormInput};
use crate::ui::{FormMessage, FormView};

pub struct App {
    view: FormView,
    coordinator: DownloadCoordinator<InstaClient>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        let client = InstaClient::new(ApiConfig::default());

        Self {
            view: FormView::default(),
            coordinator: DownloadCoordinator::new(client),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    Ui(FormMessage),
    /// Folder picked in the native dialog; None when cancelled
    DirectorySelected(Option<PathBuf>),
    /// Final result of a submission
    DownloadFinished(Result<PathBuf, AppError>),
    AlertClosed,
}

pub fn update(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Ui(ui_msg) => {
            app.view.update(ui_msg.clone());

            match ui_msg {
                FormMessage::BrowsePressed => {
                    let coordinator = app.coordinator.clone();
                    return Task::perform(
                        async move { coordinator.choose_directory().await },
                        Message::DirectorySelected,
                    );
                }
                FormMessage::DownloadPressed => {
                    if app.view.is_downloading {
                        return Task::none();
                    }

                    let input = FormInput {
                        username: app.view.username.clone(),
                        password: app.view.password.clone(),
                        profile: app.view.profile.clone(),
                        directory: app.view.directory.clone(),
                    };
                    let request = match input.validate() {
                        Ok(request) => request,
                        Err(e) => {
                            app.view.status_message = e.to_string();
                            return alert("Missing Information", e.to_string(), MessageLevel::Error);
                        }
                    };

                    app.view.is_downloading = true;
                    app.view.status_message =
                        format!("Downloading profile: {}", request.target_profile);

                    let coordinator = app.coordinator.clone();
                    return Task::perform(
                        async move { coordinator.run(request).await },
                        Message::DownloadFinished,
                    );
                }
                _ => {}
            }
        }
        Message::DirectorySelected(Some(path)) => {
            app.view.directory = path.display().to_string();
        }
        Message::DirectorySelected(None) => {
            // Dialog cancelled; keep the previous value
        }
        Message::DownloadFinished(result) => {
            app.view.is_downloading = false;
            match result {
                Ok(directory) => {
                    let text = format!("Download completed in {}.", directory.display());
                    app.view.status_message = text.clone();
                    return alert("Success", text, MessageLevel::Info);
                }
                Err(e) => {
                    log::error!("download failed: {}", e);
                    app.view.status_message = e.to_string();
                    return alert("Error", e.to_string(), MessageLevel::Error);
                }
            }
        }
        Message::AlertClosed => {}
    }
    Task::none()
}

pub fn view(app: &App) -> iced::Element<'_, Message> {
    app.view.view().map(Message::Ui)
}

/// Blocking native message box, run off the UI thread
fn alert(title: &str, description: String, level: MessageLevel) -> Task<Message> {
    let title = title.to_string();
    Task::perform(
        async move {
            AsyncMessageDialog::new()
                .set_level(level)
                .set_title(&title)
                .set_description(&description)
                .show()
                .await;
        },
        |_| Message::AlertClosed,
    )
}
