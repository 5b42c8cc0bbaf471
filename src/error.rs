use thiserror::Error;

use crate::client::ClientError;

/// Observable failure classification kept in the catalog state.
///
/// Every operation failure is reduced to one of these so the presentation
/// layer can render a dismissible banner without inspecting error internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Primary source failed but the static fallback served the list.
    /// Soft: the catalog is still usable.
    FallbackUsed,
    /// Both the primary and the fallback source failed.
    LoadFailed,
    AddFailed,
    DeleteFailed,
    /// Delete target did not exist. Non-fatal no-op.
    NotFound,
    /// Payload or draft missing the required field subset.
    MalformedPayload,
}

impl ErrorKind {
    /// Banner text shown to visitors of the site.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorKind::FallbackUsed => "Failed to load live data. Showing cached events.",
            ErrorKind::LoadFailed => "Failed to load events. Please try again later.",
            ErrorKind::AddFailed => "Failed to add event. Backend might be unavailable.",
            ErrorKind::DeleteFailed => "Failed to delete event. Please try again.",
            ErrorKind::NotFound => "That event no longer exists.",
            ErrorKind::MalformedPayload => "Event data was incomplete or invalid.",
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to load events from primary and fallback sources")]
    LoadFailed {
        primary: ClientError,
        fallback: Option<ClientError>,
    },
    #[error("failed to add event")]
    AddFailed(#[source] ClientError),
    #[error("failed to delete event {id}")]
    DeleteFailed {
        id: i64,
        #[source]
        source: ClientError,
    },
    #[error("no event with id {0}")]
    NotFound(i64),
    #[error("malformed event payload: {0}")]
    MalformedPayload(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::LoadFailed { .. } => ErrorKind::LoadFailed,
            CatalogError::AddFailed(_) => ErrorKind::AddFailed,
            CatalogError::DeleteFailed { .. } => ErrorKind::DeleteFailed,
            CatalogError::NotFound(_) => ErrorKind::NotFound,
            CatalogError::MalformedPayload(_) => ErrorKind::MalformedPayload,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}
