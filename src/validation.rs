use std::collections::HashSet;

use url::Url;

use crate::client::ClientError;
use crate::error::CatalogError;
use crate::models::{Event, EventDraft};

/// Checks a draft before it is sent to the creation endpoint.
///
/// Title, description, link and type are the minimal required subset; the
/// link must additionally be an absolute URL since it backs the outbound
/// registration button.
pub fn validate_draft(draft: &EventDraft) -> Result<(), CatalogError> {
    if draft.title.trim().is_empty() {
        return Err(CatalogError::MalformedPayload("empty title".into()));
    }
    if draft.description.trim().is_empty() {
        return Err(CatalogError::MalformedPayload("empty description".into()));
    }
    if draft.event_type.trim().is_empty() {
        return Err(CatalogError::MalformedPayload("empty type".into()));
    }
    if Url::parse(&draft.link).is_err() {
        return Err(CatalogError::MalformedPayload(format!(
            "link is not a valid URL: {}",
            draft.link
        )));
    }
    Ok(())
}

/// Checks a fetched event list: every entry carries the required subset and
/// no id appears twice. A violation rejects the whole payload so the caller
/// can fall back to the other source instead of displaying broken entries.
pub fn validate_events(events: &[Event]) -> Result<(), ClientError> {
    let mut seen = HashSet::with_capacity(events.len());
    for event in events {
        if event.title.trim().is_empty()
            || event.description.trim().is_empty()
            || event.link.trim().is_empty()
            || event.event_type.trim().is_empty()
        {
            return Err(ClientError::MalformedPayload(format!(
                "event {} is missing required fields",
                event.id
            )));
        }
        if !seen.insert(event.id) {
            return Err(ClientError::MalformedPayload(format!(
                "duplicate event id {}",
                event.id
            )));
        }
    }
    Ok(())
}
