use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::models::{Event, EventDraft, PastEvent, UploadedImage};
use crate::validation::validate_events;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Thin wrapper over the REST backend the site talks to.
///
/// One instance per catalog; every request shares the same bounded timeout so
/// a dead backend surfaces as a failure instead of a hung `Loading` state.
#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    api_base_url: Url,
}

impl BackendClient {
    pub fn new(api_base_url: Url, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("http client builds");
        Self {
            client,
            api_base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.api_base_url.as_str().trim_end_matches('/'),
            path
        )
    }

    /// Fetches an event list from either the live endpoint or the static
    /// fallback file; both serve the same JSON shape.
    pub async fn fetch_events(&self, url: &Url) -> Result<Vec<Event>, ClientError> {
        let events: Vec<Event> = self
            .client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        validate_events(&events)?;
        Ok(events)
    }

    pub async fn fetch_past_events(&self, url: &Url) -> Result<Vec<PastEvent>, ClientError> {
        let past: Vec<PastEvent> = self
            .client
            .get(url.as_str())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(past)
    }

    /// POSTs a draft and returns the created event, id assigned by the
    /// backend.
    pub async fn create_event(&self, draft: &EventDraft) -> Result<Event, ClientError> {
        let created: Event = self
            .client
            .post(self.endpoint("/add-event"))
            .json(draft)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        validate_events(std::slice::from_ref(&created))?;
        Ok(created)
    }

    pub async fn delete_event(&self, id: i64) -> Result<(), ClientError> {
        self.client
            .delete(self.endpoint(&format!("/delete-event/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Uploads a raw image body; the returned filename goes into the draft's
    /// `image` field before `add_event` is called.
    pub async fn upload_image(&self, bytes: Vec<u8>) -> Result<UploadedImage, ClientError> {
        let uploaded: UploadedImage = self
            .client
            .post(self.endpoint("/upload-image"))
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(uploaded)
    }
}
