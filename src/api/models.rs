use serde::Deserialize;

/// Response from the ajax login endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// Envelope around the profile lookup endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInfoResponse {
    pub data: ProfileData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileData {
    #[serde(default)]
    pub user: Option<ProfileUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUser {
    pub id: String,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
    #[serde(default)]
    pub profile_pic_url_hd: Option<String>,
}

/// One page of a profile's media feed
#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub items: Vec<FeedItem>,
    #[serde(default)]
    pub more_available: bool,
    #[serde(default)]
    pub next_max_id: Option<String>,
}

/// A single post; carousel posts nest their media in `carousel_media`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedItem {
    #[serde(default)]
    pub carousel_media: Option<Vec<FeedItem>>,
    #[serde(default)]
    pub image_versions2: Option<ImageVersions>,
    #[serde(default)]
    pub video_versions: Option<Vec<MediaCandidate>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageVersions {
    #[serde(default)]
    pub candidates: Vec<MediaCandidate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaCandidate {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub height: i64,
}

/// Counters reported back after a completed download
#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadReport {
    pub files_downloaded: usize,
}

/// Configuration for the media client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_web_url: String,
    pub base_api_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_web_url: "https://www.instagram.com".to_string(),
            base_api_url: "https://i.instagram.com/api/v1".to_string(),
        }
    }
}
