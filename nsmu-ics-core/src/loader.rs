//! Retrieval of raw schedule pages from the NSMU website.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::{error::Error, types::GroupId};

/// URL template of the web schedule. `{week}`, `{group}` and `{spec}`
/// are substituted per request.
pub const DEFAULT_BASE_URL: &str = "https://ruz.nsmu.ru/?week={week}&group={group}&spec={spec}";

/// The site only publishes the current and the next week.
const WEEK_NUMBERS: [u32; 2] = [0, 1];

const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Loader for raw schedule pages.
///
/// Every requested week settles independently; a failed, timed-out or
/// non-success response is represented as an empty page string in its
/// slot, so the caller always receives one page per week and never an
/// error.
pub struct WebScheduleLoader {
    client: Client,
    base_url: String,
}

impl WebScheduleLoader {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("nsmu-ics/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Loader for the base URL from `NSMU_BASE_URL`, falling back to the
    /// public schedule site.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("NSMU_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(base_url)
    }

    /// Fetches the schedule pages for a group, one page per week, all
    /// weeks concurrently.
    pub async fn load_schedule(&self, group: &GroupId) -> Vec<String> {
        let handles: Vec<_> = WEEK_NUMBERS
            .iter()
            .map(|&week| {
                let client = self.client.clone();
                let url = self.week_url(group, week);
                tokio::spawn(async move { fetch_page(&client, &url).await })
            })
            .collect();

        let mut pages = Vec::with_capacity(handles.len());
        for handle in handles {
            pages.push(handle.await.unwrap_or_default());
        }
        pages
    }

    /// URL of one week's schedule page. The site only understands weeks
    /// 0 and 1; anything else is replaced by 0.
    fn week_url(&self, group: &GroupId, week: u32) -> String {
        let week = if WEEK_NUMBERS.contains(&week) { week } else { 0 };
        self.base_url
            .replacen("{group}", &group.group, 1)
            .replacen("{spec}", &group.spec, 1)
            .replacen("{week}", &week.to_string(), 1)
    }
}

impl Default for WebScheduleLoader {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Fetches one page, absorbing every failure into an empty page.
async fn fetch_page(client: &Client, url: &str) -> String {
    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            response.text().await.unwrap_or_else(|e| {
                tracing::warn!(url, error = %classify(e), "failed to read schedule page body");
                String::new()
            })
        }
        Ok(response) => {
            log_non_success(url, response.status());
            String::new()
        }
        Err(e) => {
            tracing::warn!(url, error = %classify(e), "schedule page request failed");
            String::new()
        }
    }
}

fn log_non_success(url: &str, status: StatusCode) {
    tracing::warn!(url, %status, "schedule page returned non-success status");
}

fn classify(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Timeout
    } else {
        Error::Http(error)
    }
}
