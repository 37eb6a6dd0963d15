use std::fmt::Debug;

use crate::core::feed::serializer::SerializeError;
use crate::core::feed::types::Entry;
use crate::core::xml::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationCategory {
    ReadFeed,
    ReadEntry,
    Write,
    Batch,
}

/// The closed set of domain errors a service operation can produce. Expected
/// protocol conditions (304, 409, 412) are values here, never panics, so
/// callers handle each documented case explicitly.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError<E: Debug = ()> {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("authentication required: {0}")]
    Authentication(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("resource not found: {0}")]
    ResourceNotFound(String),
    #[error("resource gone: {0}")]
    ResourceGone(String),
    #[error("resource not modified")]
    ResourceNotModified,
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),
    #[error("conflict detected: {message}")]
    Conflict {
        message: String,
        server_entry: Option<Entry<E>>,
    },
    #[error("entry has no edit uri")]
    MissingEditUri,
    #[error("transport failure with status {status}")]
    Transport { status: u16, body: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
    #[error("serialize failed: {0}")]
    Serialize(#[from] SerializeError),
}

/// Pure status-code translation: given the calling operation's category and
/// the transport status, the resulting error kind is deterministic.
pub fn map_status<E: Debug>(
    category: OperationCategory,
    status: u16,
    body: String,
) -> ServiceError<E> {
    use OperationCategory::*;
    match (status, category) {
        (304, ReadFeed | ReadEntry) => ServiceError::ResourceNotModified,
        (400, Write | Batch) => ServiceError::BadRequest(body),
        (401, _) => ServiceError::Authentication(body),
        (403, _) => ServiceError::Forbidden(body),
        (404, ReadEntry | Write) => ServiceError::ResourceNotFound(body),
        (409, Write) => ServiceError::Conflict {
            message: body,
            server_entry: None,
        },
        (410, ReadFeed | ReadEntry) => ServiceError::ResourceGone(body),
        (412, Write) => ServiceError::PreconditionFailed(body),
        _ => ServiceError::Transport { status, body },
    }
}
