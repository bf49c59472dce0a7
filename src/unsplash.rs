use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const UNSPLASH_API_URL: &str = "https://api.unsplash.com";

// A slow photo upstream must not stall the request; treat timeouts as a miss.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

const PER_PAGE: &str = "10";
const ORIENTATION: &str = "landscape";
// Strictest filter level; not configurable per request.
const CONTENT_FILTER: &str = "high";

// Mandatory attribution tracking per the API terms of use.
const UTM_PARAMS: &str = "utm_source=Mochi_AI&utm_medium=referral";

#[derive(Debug, Error)]
pub enum UnsplashError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("unsplash rate limit exceeded")]
    RateLimited,

    #[error("unsplash returned status {0}")]
    Status(StatusCode),
}

/// One photo in the shape the front-end consumes, relevance order preserved.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoResult {
    pub id: String,
    pub title: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub photographer: String,
    #[serde(rename = "attributionUrl")]
    pub attribution_url: String,
    pub download_location: Option<String>,
}

#[derive(Clone)]
pub struct UnsplashClient {
    http: Client,
    access_key: Option<String>,
    base_url: String,
}

impl UnsplashClient {
    pub fn new(access_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            access_key,
            base_url: UNSPLASH_API_URL.to_string(),
        }
    }

    /// Point the client at a different host. Used by tests to stand in a
    /// fake upstream.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Search photos for a keyword. Every failure degrades to an empty list;
    /// the search feature must never surface a server error to the client.
    pub async fn search(&self, query: &str) -> Vec<PhotoResult> {
        let Some(key) = self.access_key.clone() else {
            log::error!("UNSPLASH_ACCESS_KEY is missing, returning no results");
            return Vec::new();
        };

        match self.try_search(&key, query).await {
            Ok(results) => results,
            Err(UnsplashError::RateLimited) => {
                log::warn!("unsplash rate limit hit");
                Vec::new()
            }
            Err(e) => {
                log::error!("unsplash search error: {e}");
                Vec::new()
            }
        }
    }

    async fn try_search(&self, key: &str, query: &str) -> Result<Vec<PhotoResult>, UnsplashError> {
        let url = format!("{}/search/photos", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[
                ("query", query),
                ("client_id", key),
                ("per_page", PER_PAGE),
                ("orientation", ORIENTATION),
                ("content_filter", CONTENT_FILTER),
            ])
            .send()
            .await?;

        // Unsplash reports rate limiting as 403 (50 requests/hour on demo keys).
        if response.status() == StatusCode::FORBIDDEN {
            return Err(UnsplashError::RateLimited);
        }
        if !response.status().is_success() {
            return Err(UnsplashError::Status(response.status()));
        }

        let data: SearchPhotosResponse = response.json().await?;
        Ok(data
            .results
            .into_iter()
            .map(|photo| map_photo(photo, query))
            .collect())
    }

    /// Report a download to the tracking URL handed out with the photo.
    /// Required by the API terms whenever a user selects an image; failures
    /// are swallowed so the selection flow is never affected.
    pub async fn track_download(&self, download_url: &str) {
        let Some(key) = self.access_key.clone() else {
            return;
        };
        if download_url.is_empty() {
            return;
        }

        let result = self
            .http
            .get(download_url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("client_id", key.as_str())])
            .send()
            .await;

        match result {
            Ok(_) => log::info!("unsplash download tracked"),
            Err(e) => log::error!("unsplash download tracking error: {e}"),
        }
    }
}

fn map_photo(photo: UnsplashPhoto, query: &str) -> PhotoResult {
    let title = photo
        .alt_description
        .filter(|alt| !alt.trim().is_empty())
        .unwrap_or_else(|| format!("Photo of {query}"));

    PhotoResult {
        id: photo.id,
        title,
        image_url: photo.urls.regular,
        photographer: photo.user.name,
        attribution_url: format!("{}?{}", photo.user.links.html, UTM_PARAMS),
        download_location: photo.links.download_location,
    }
}

#[derive(Debug, Deserialize)]
struct SearchPhotosResponse {
    #[serde(default)]
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: String,
    alt_description: Option<String>,
    urls: PhotoUrls,
    user: PhotoUser,
    links: PhotoLinks,
}

#[derive(Debug, Deserialize)]
struct PhotoUrls {
    regular: String,
}

#[derive(Debug, Deserialize)]
struct PhotoUser {
    name: String,
    links: UserLinks,
}

#[derive(Debug, Deserialize)]
struct UserLinks {
    html: String,
}

#[derive(Debug, Deserialize)]
struct PhotoLinks {
    download_location: Option<String>,
}
