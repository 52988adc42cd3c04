use std::path::PathBuf;

use super::error::AppError;

/// Raw field values exactly as typed into the form
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub username: String,
    pub password: String,
    pub profile: String,
    pub directory: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A validated submission, ready to hand to the media client
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub credentials: Credentials,
    pub target_profile: String,
    pub destination: PathBuf,
}

impl FormInput {
    /// Trim every field and refuse the submission if any of them is empty
    pub fn validate(&self) -> Result<DownloadRequest, AppError> {
        let username = self.username.trim();
        let password = self.password.trim();
        let profile = self.profile.trim();
        let directory = self.directory.trim();

        if username.is_empty() || password.is_empty() || profile.is_empty() || directory.is_empty()
        {
            return Err(AppError::MissingInput);
        }

        Ok(DownloadRequest {
            credentials: Credentials {
                username: username.to_string(),
                password: password.to_string(),
            },
            target_profile: profile.to_string(),
            destination: PathBuf::from(directory),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FormInput {
        FormInput {
            username: "alice".to_string(),
            password: "secret".to_string(),
            profile: "natgeo".to_string(),
            directory: "/tmp/out".to_string(),
        }
    }

    #[test]
    fn validate_trims_every_field() {
        let input = FormInput {
            username: "  alice ".to_string(),
            password: " secret".to_string(),
            profile: "natgeo  ".to_string(),
            directory: " /tmp/out ".to_string(),
        };

        let request = input.validate().unwrap();
        assert_eq!(request.credentials.username, "alice");
        assert_eq!(request.credentials.password, "secret");
        assert_eq!(request.target_profile, "natgeo");
        assert_eq!(request.destination, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn validate_rejects_empty_profile() {
        let mut input = filled();
        input.profile.clear();
        assert!(matches!(input.validate(), Err(AppError::MissingInput)));
    }

    #[test]
    fn validate_rejects_whitespace_only_password() {
        let mut input = filled();
        input.password = "   ".to_string();
        assert!(matches!(input.validate(), Err(AppError::MissingInput)));
    }
}
