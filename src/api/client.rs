use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::{Stream, StreamExt, TryStreamExt};
use regex::Regex;
use reqwest::header::{HeaderMap, SET_COOKIE};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tokio::io::AsyncWriteExt;

use crate::utils::{filename_from_url, get_timestamp, sanitize_filename};

use super::models::{
    ApiConfig, DownloadReport, FeedItem, FeedResponse, LoginResponse, MediaCandidate,
    ProfileInfoResponse, ProfileUser,
};

const APP_ID: &str = "936619743392459";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const FEED_PAGE_SIZE: u32 = 12;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Login rejected: {0}")]
    LoginFailed(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Failed to extract CSRF token from login page")]
    CsrfExtraction,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// The two operations the form consumes. Kept behind a trait so the
/// coordinator can be exercised with a recording double.
#[async_trait]
pub trait MediaClient: Send + Sync {
    /// Authenticate and establish a web session for subsequent requests.
    async fn login(&self, username: &str, password: &str) -> Result<()>;

    /// Download every profile in `targets` into `<root>/<profile>/`,
    /// optionally including the profile picture.
    async fn download_profiles(
        &self,
        targets: &HashSet<String>,
        root: &Path,
        profile_pic: bool,
    ) -> Result<DownloadReport>;
}

struct Session {
    cookie_header: String,
    csrf_token: String,
}

#[derive(Clone)]
pub struct InstaClient {
    config: ApiConfig,
    session: Arc<Mutex<Option<Session>>>,
}

impl InstaClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            session: Arc::new(Mutex::new(None)),
        }
    }

    fn authed_get(&self, http: &Client, url: &str) -> reqwest::RequestBuilder {
        let mut request = http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("X-IG-App-ID", APP_ID)
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Accept", "application/json");
        if let Some(session) = self.session.lock().unwrap().as_ref() {
            request = request
                .header("Cookie", session.cookie_header.clone())
                .header("X-CSRFToken", session.csrf_token.clone());
        }
        request
    }

    async fn fetch_profile(&self, http: &Client, username: &str) -> Result<ProfileUser> {
        let url = format!(
            "{}/users/web_profile_info/?username={}",
            self.config.base_api_url, username
        );
        let response = self.authed_get(http, &url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::ProfileNotFound(username.to_string()));
        }
        let response = response.error_for_status()?;
        let info: ProfileInfoResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

        info.data
            .user
            .ok_or_else(|| ApiError::ProfileNotFound(username.to_string()))
    }

    /// Walk the profile's feed pages and collect every media URL
    async fn collect_feed_media(&self, http: &Client, user_id: &str) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        let mut seen = HashSet::new();
        let mut next_max_id: Option<String> = None;

        loop {
            let mut feed_url = format!(
                "{}/feed/user/{}/?count={}",
                self.config.base_api_url, user_id, FEED_PAGE_SIZE
            );
            if let Some(cursor) = next_max_id.as_deref() {
                feed_url.push_str("&max_id=");
                feed_url.push_str(cursor);
            }

            let response = self
                .authed_get(http, &feed_url)
                .send()
                .await?
                .error_for_status()?;
            let feed: FeedResponse = response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("JSON decode error: {}", e)))?;

            if feed.items.is_empty() {
                break;
            }
            for item in &feed.items {
                for media_url in item_media_urls(item) {
                    if seen.insert(media_url.clone()) {
                        urls.push(media_url);
                    }
                }
            }

            if !feed.more_available {
                break;
            }
            match feed.next_max_id {
                Some(cursor) if !cursor.trim().is_empty() => next_max_id = Some(cursor),
                _ => break,
            }
        }

        Ok(urls)
    }

    /// Open a media download, returning (total_size, chunk stream)
    async fn media_stream(
        &self,
        http: &Client,
        url: &str,
    ) -> Result<(Option<u64>, impl Stream<Item = Result<bytes::Bytes>>)> {
        let response = http
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?
            .error_for_status()?;

        let total_size = response.content_length();
        let stream = response.bytes_stream().map_err(ApiError::RequestError);

        Ok((total_size, stream))
    }

    async fn save_media(&self, http: &Client, url: &str, dest: &Path) -> Result<()> {
        let (total, stream) = self.media_stream(http, url).await?;
        futures::pin_mut!(stream);

        let mut file = tokio::fs::File::create(dest).await?;
        let mut downloaded: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
        }
        file.sync_all().await?;

        if let Some(total) = total {
            if downloaded < total {
                log::warn!("short read for {}: {}/{} bytes", url, downloaded, total);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MediaClient for InstaClient {
    async fn login(&self, username: &str, password: &str) -> Result<()> {
        let http = Client::new();

        // 1. Fetch the login page to obtain a CSRF token
        let login_page = format!("{}/accounts/login/", self.config.base_web_url);
        let response = http
            .get(&login_page)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;
        let mut cookies = set_cookie_pairs(response.headers());
        let html = response.text().await?;
        let csrf_token = cookie_value(&cookies, "csrftoken")
            .or_else(|| extract_csrf_from_html(&html))
            .ok_or(ApiError::CsrfExtraction)?;

        // 2. Post the credentials to the ajax login endpoint
        let enc_password = format!(
            "#PWD_INSTAGRAM_BROWSER:0:{}:{}",
            get_timestamp(),
            password
        );
        let response = http
            .post(format!("{}/accounts/login/ajax/", self.config.base_web_url))
            .header("User-Agent", USER_AGENT)
            .header("X-CSRFToken", &csrf_token)
            .header("X-IG-App-ID", APP_ID)
            .header("Referer", &login_page)
            .form(&[("username", username), ("enc_password", enc_password.as_str())])
            .send()
            .await?;

        cookies = merge_cookie_pairs(cookies, set_cookie_pairs(response.headers()));
        let status = response.status();
        let body = response.text().await?;
        let parsed: LoginResponse = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(ApiError::LoginFailed(format!("HTTP error {}", status)));
            }
            Err(e) => {
                return Err(ApiError::InvalidResponse(format!("JSON decode error: {}", e)));
            }
        };

        if !parsed.authenticated {
            let reason = parsed.message.unwrap_or_else(|| {
                if parsed.user {
                    "Wrong password.".to_string()
                } else {
                    "User not found.".to_string()
                }
            });
            return Err(ApiError::LoginFailed(reason));
        }

        // The login response rotates the CSRF token
        let csrf_token = cookie_value(&cookies, "csrftoken").unwrap_or(csrf_token);
        *self.session.lock().unwrap() = Some(Session {
            cookie_header: cookie_header(&cookies),
            csrf_token,
        });
        log::info!("logged in as {}", username);
        Ok(())
    }

    async fn download_profiles(
        &self,
        targets: &HashSet<String>,
        root: &Path,
        profile_pic: bool,
    ) -> Result<DownloadReport> {
        let http = Client::new();
        let mut files_downloaded = 0;

        for target in targets {
            let user = self.fetch_profile(&http, target).await?;
            let profile_dir = root.join(sanitize_filename(target));
            tokio::fs::create_dir_all(&profile_dir).await?;

            if profile_pic {
                if let Some(pic_url) = user
                    .profile_pic_url_hd
                    .as_deref()
                    .or(user.profile_pic_url.as_deref())
                {
                    let dest =
                        profile_dir.join(format!("{}_profile_pic.jpg", sanitize_filename(target)));
                    self.save_media(&http, pic_url, &dest).await?;
                    files_downloaded += 1;
                }
            }

            let media_urls = self.collect_feed_media(&http, &user.id).await?;
            for (index, media_url) in media_urls.iter().enumerate() {
                let filename = filename_from_url(media_url)
                    .unwrap_or_else(|| format!("{}_{}.jpg", sanitize_filename(target), index + 1));
                self.save_media(&http, media_url, &profile_dir.join(filename))
                    .await?;
                files_downloaded += 1;
            }

            log::info!("{}: saved {} media file(s)", target, media_urls.len());
        }

        Ok(DownloadReport { files_downloaded })
    }
}

fn item_media_urls(item: &FeedItem) -> Vec<String> {
    if let Some(children) = &item.carousel_media {
        return children.iter().filter_map(primary_media_url).collect();
    }
    primary_media_url(item).map(|url| vec![url]).unwrap_or_default()
}

/// Videos win over their cover image; otherwise the best image candidate
fn primary_media_url(item: &FeedItem) -> Option<String> {
    if let Some(videos) = &item.video_versions {
        if let Some(url) = best_candidate(videos) {
            return Some(url);
        }
    }
    item.image_versions2
        .as_ref()
        .and_then(|versions| best_candidate(&versions.candidates))
}

fn best_candidate(candidates: &[MediaCandidate]) -> Option<String> {
    candidates
        .iter()
        .filter(|candidate| !candidate.url.trim().is_empty())
        .max_by_key(|candidate| candidate.width.max(0).saturating_mul(candidate.height.max(0)))
        .map(|candidate| candidate.url.clone())
}

fn set_cookie_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for value in headers.get_all(SET_COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        let Some(first) = raw.split(';').next() else { continue };
        if let Some((name, value)) = first.split_once('=') {
            let name = name.trim();
            let value = value.trim();
            if !name.is_empty() && !value.is_empty() && value != "\"\"" {
                pairs.push((name.to_string(), value.to_string()));
            }
        }
    }
    pairs
}

fn merge_cookie_pairs(
    base: Vec<(String, String)>,
    update: Vec<(String, String)>,
) -> Vec<(String, String)> {
    let mut merged = base;
    for (name, value) in update {
        match merged.iter_mut().find(|(existing, _)| *existing == name) {
            Some(pair) => pair.1 = value,
            None => merged.push((name, value)),
        }
    }
    merged
}

fn cookie_value(pairs: &[(String, String)], name: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(existing, _)| existing == name)
        .map(|(_, value)| value.clone())
}

fn cookie_header(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}

fn extract_csrf_from_html(html: &str) -> Option<String> {
    // Matches "csrf_token":"..." inside the shared-data script tag
    let re = Regex::new(r#""csrf_token":"([^"]+)""#).ok()?;
    re.captures(html).map(|caps| caps[1].to_string())
}
