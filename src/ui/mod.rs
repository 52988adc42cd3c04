use iced::{
    widget::{button, column, row, text, text_input, Space},
    Element, Length,
};

/// Main form state
pub struct FormView {
    pub username: String,
    pub password: String,
    pub profile: String,
    pub directory: String,
    pub status_message: String,
    pub is_downloading: bool,
}

impl Default for FormView {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            profile: String::new(),
            directory: String::new(),
            status_message: "Enter your credentials and a profile to download".to_string(),
            is_downloading: false,
        }
    }
}

#[derive(Debug, Clone)]
pub enum FormMessage {
    UsernameChanged(String),
    PasswordChanged(String),
    ProfileChanged(String),
    DirectoryChanged(String),
    BrowsePressed,
    DownloadPressed,
}

impl FormView {
    pub fn update(&mut self, message: FormMessage) {
        match message {
            FormMessage::UsernameChanged(username) => self.username = username,
            FormMessage::PasswordChanged(password) => self.password = password,
            FormMessage::ProfileChanged(profile) => self.profile = profile,
            FormMessage::DirectoryChanged(directory) => self.directory = directory,
            FormMessage::BrowsePressed | FormMessage::DownloadPressed => {
                // Handled by the app
            }
        }
    }

    pub fn view(&self) -> Element<'_, FormMessage> {
        column![
            text("Instagram Profile Downloader").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Username:").size(16),
            text_input("Instagram username...", &self.username)
                .on_input(FormMessage::UsernameChanged)
                .padding(10),
            text("Password:").size(16),
            text_input("Password...", &self.password)
                .on_input(FormMessage::PasswordChanged)
                .secure(true)
                .padding(10),
            text("Profile:").size(16),
            text_input("Profile to download...", &self.profile)
                .on_input(FormMessage::ProfileChanged)
                .padding(10),
            text("Download directory:").size(16),
            row![
                text_input("Choose a directory...", &self.directory)
                    .on_input(FormMessage::DirectoryChanged)
                    .padding(10),
                button("Browse...")
                    .on_press(FormMessage::BrowsePressed)
                    .padding(10),
            ]
            .spacing(10),
            Space::new().height(Length::Fixed(10.0)),
            text(&self.status_message).size(14),
            Space::new().height(Length::Fixed(20.0)),
            button("Download")
                .on_press(FormMessage::DownloadPressed)
                .padding([10, 20]),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_messages_update_their_fields() {
        let mut view = FormView::default();
        view.update(FormMessage::UsernameChanged("alice".to_string()));
        view.update(FormMessage::PasswordChanged("secret".to_string()));
        view.update(FormMessage::ProfileChanged("natgeo".to_string()));
        view.update(FormMessage::DirectoryChanged("/tmp/out".to_string()));

        assert_eq!(view.username, "alice");
        assert_eq!(view.password, "secret");
        assert_eq!(view.profile, "natgeo");
        assert_eq!(view.directory, "/tmp/out");
    }

    #[test]
    fn button_presses_leave_fields_untouched() {
        let mut view = FormView::default();
        view.update(FormMessage::ProfileChanged("natgeo".to_string()));
        view.update(FormMessage::DownloadPressed);
        view.update(FormMessage::BrowsePressed);

        assert_eq!(view.profile, "natgeo");
    }
}
