use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::Utc;
use tracing::{error, warn};
use url::Url;

use crate::client::{BackendClient, ClientError};
use crate::error::{CatalogError, ErrorKind};
use crate::models::{Category, Event, EventDraft, PastEvent};
use crate::settings::Settings;
use crate::validation::validate_draft;

/// Progress of the most recent [`EventCatalog::load`] call.
///
/// `Idle -> Loading -> {Ready, Failed}`; a fresh `load()` re-enters
/// `Loading`. There is no retrying state, a retry is a new call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Which source ultimately served a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Primary,
    Fallback,
}

#[derive(Default)]
struct CatalogState {
    events: Vec<Event>,
    past_events: Vec<PastEvent>,
    selected_category: Option<Category>,
    load_status: LoadStatus,
    last_error: Option<ErrorKind>,
}

/// Owns the in-memory event list and every mutation path to it.
///
/// The presentation layer reads derived views ([`visible_events`],
/// [`load_status`], [`last_error`]) and dispatches intents; it never touches
/// the list directly. State sits behind a mutex that is only held for
/// synchronous sections, never across an await, so overlapping asynchronous
/// calls interleave without a shared snapshot: each optimistic delete keeps
/// its own rollback data in its call frame.
///
/// [`visible_events`]: EventCatalog::visible_events
/// [`load_status`]: EventCatalog::load_status
/// [`last_error`]: EventCatalog::last_error
pub struct EventCatalog {
    client: BackendClient,
    events_url: Url,
    fallback_events_url: Url,
    past_events_url: Url,
    fallback_past_events_url: Option<Url>,
    state: Mutex<CatalogState>,
}

impl EventCatalog {
    pub fn new(settings: &Settings) -> Self {
        let client = BackendClient::new(
            settings.api_base_url.clone(),
            Duration::from_secs(settings.request_timeout_secs),
        );
        Self {
            client,
            events_url: settings.events_url.clone(),
            fallback_events_url: settings.fallback_events_url.clone(),
            past_events_url: settings.past_events_url.clone(),
            fallback_past_events_url: settings.fallback_past_events_url.clone(),
            state: Mutex::new(CatalogState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().expect("catalog state lock poisoned")
    }

    /// Replaces the event list wholesale from the live endpoint, falling back
    /// to the static file when the live fetch fails for any reason (connect
    /// error, non-2xx, malformed payload). One attempt per source per call.
    pub async fn load(&self) -> Result<LoadSource, CatalogError> {
        self.lock().load_status = LoadStatus::Loading;

        let primary = match self.client.fetch_events(&self.events_url).await {
            Ok(events) => {
                let mut state = self.lock();
                state.events = events;
                state.load_status = LoadStatus::Ready;
                state.last_error = None;
                return Ok(LoadSource::Primary);
            }
            Err(err) => err,
        };
        warn!(error = %primary, "live events source failed, trying fallback");

        match self.client.fetch_events(&self.fallback_events_url).await {
            Ok(events) => {
                let mut state = self.lock();
                state.events = events;
                state.load_status = LoadStatus::Ready;
                state.last_error = Some(ErrorKind::FallbackUsed);
                Ok(LoadSource::Fallback)
            }
            Err(fallback) => {
                error!(error = %fallback, "fallback events source failed too");
                let mut state = self.lock();
                state.load_status = LoadStatus::Failed;
                state.last_error = Some(ErrorKind::LoadFailed);
                Err(CatalogError::LoadFailed {
                    primary,
                    fallback: Some(fallback),
                })
            }
        }
    }

    /// Same two-tier shape as [`load`](EventCatalog::load) for the read-only
    /// history. Failures are logged and returned but do not touch
    /// `load_status`, which tracks the upcoming-events load.
    pub async fn load_past_events(&self) -> Result<(), CatalogError> {
        let primary = match self.client.fetch_past_events(&self.past_events_url).await {
            Ok(past) => {
                self.lock().past_events = past;
                return Ok(());
            }
            Err(err) => err,
        };
        warn!(error = %primary, "past events source failed");

        let Some(fallback_url) = &self.fallback_past_events_url else {
            return Err(CatalogError::LoadFailed {
                primary,
                fallback: None,
            });
        };
        match self.client.fetch_past_events(fallback_url).await {
            Ok(past) => {
                self.lock().past_events = past;
                Ok(())
            }
            Err(fallback) => {
                warn!(error = %fallback, "past events fallback failed too");
                Err(CatalogError::LoadFailed {
                    primary,
                    fallback: Some(fallback),
                })
            }
        }
    }

    /// Toggle semantics: selecting the active category (or `None`) clears the
    /// filter, anything else replaces it. Returns the now-active filter.
    pub fn set_category_filter(&self, category: Option<Category>) -> Option<Category> {
        let mut state = self.lock();
        state.selected_category = match (state.selected_category, category) {
            (Some(current), Some(next)) if current == next => None,
            (_, next) => next,
        };
        state.selected_category
    }

    /// Pure derived view: the full list, or the entries whose type matches
    /// the selected category (case-insensitive), in insertion order.
    pub fn visible_events(&self) -> Vec<Event> {
        let state = self.lock();
        match state.selected_category {
            Some(category) => state
                .events
                .iter()
                .filter(|event| category.matches(&event.event_type))
                .cloned()
                .collect(),
            None => state.events.clone(),
        }
    }

    /// Sends the draft to the backend and appends the created event. No
    /// optimistic insert: the backend assigns the id, and inserting before
    /// confirmation could collide with it.
    pub async fn add_event(&self, draft: EventDraft) -> Result<Event, CatalogError> {
        if let Err(err) = validate_draft(&draft) {
            self.lock().last_error = Some(err.kind());
            return Err(err);
        }

        match self.client.create_event(&draft).await {
            Ok(created) => {
                let mut state = self.lock();
                if state.events.iter().any(|event| event.id == created.id) {
                    state.last_error = Some(ErrorKind::AddFailed);
                    return Err(CatalogError::AddFailed(ClientError::MalformedPayload(
                        format!("backend returned an id already in the catalog: {}", created.id),
                    )));
                }
                state.events.push(created.clone());
                Ok(created)
            }
            Err(err) => {
                warn!(error = %err, "add event failed");
                self.lock().last_error = Some(ErrorKind::AddFailed);
                Err(CatalogError::AddFailed(err))
            }
        }
    }

    /// Appends a locally-created event without a backend round trip, used
    /// when the site runs with no backend at all. The id is derived from the
    /// current timestamp and bumped past any collision.
    pub fn add_event_offline(&self, draft: EventDraft) -> Result<Event, CatalogError> {
        if let Err(err) = validate_draft(&draft) {
            self.lock().last_error = Some(err.kind());
            return Err(err);
        }

        let mut state = self.lock();
        let mut id = Utc::now().timestamp_millis();
        while state.events.iter().any(|event| event.id == id) {
            id += 1;
        }
        let event = draft.into_event(id);
        state.events.push(event.clone());
        Ok(event)
    }

    /// Optimistic delete: the entry disappears immediately and comes back at
    /// its original position if the backend refuses. An unknown id is a
    /// no-op report, not a failure, and sends nothing over the wire.
    pub async fn delete_event(&self, id: i64) -> Result<(), CatalogError> {
        let removed = {
            let mut state = self.lock();
            let position = state.events.iter().position(|event| event.id == id);
            position.map(|index| (index, state.events.remove(index)))
        };
        let Some((index, event)) = removed else {
            self.lock().last_error = Some(ErrorKind::NotFound);
            return Err(CatalogError::NotFound(id));
        };

        match self.client.delete_event(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(error = %err, id, "delete failed, restoring entry");
                let mut state = self.lock();
                // Another delete may have shrunk the list meanwhile.
                let at = index.min(state.events.len());
                state.events.insert(at, event);
                state.last_error = Some(ErrorKind::DeleteFailed);
                Err(CatalogError::DeleteFailed { id, source: err })
            }
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.lock().events.clone()
    }

    pub fn past_events(&self) -> Vec<PastEvent> {
        self.lock().past_events.clone()
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.lock().selected_category
    }

    pub fn load_status(&self) -> LoadStatus {
        self.lock().load_status
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.lock().last_error
    }

    /// The banner's dismiss button.
    pub fn clear_error(&self) {
        self.lock().last_error = None;
    }
}
