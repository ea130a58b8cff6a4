//! Repository layer over the single-table key-value store.
//!
//! # Responsibility
//! - Encode hotels, rooms and checklist items into keyed store items.
//! - Provide entity-level read and mutation APIs.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - Point reads report absence as `Ok(None)`; mutations of an absent
//!   entity report `RepoError::NotFound`.

use crate::model::checklist::ChecklistValidationError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod checklist_repo;
pub mod hotel_repo;
pub mod records;
pub mod room_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for housekeeping persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Store(StoreError),
    NotFound { entity: &'static str, id: String },
    InvalidId { entity: &'static str, id: String },
    InvalidData(String),
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidId { entity, id } => write!(f, "malformed {entity} id: `{id}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::InvalidData(message) => Self::InvalidData(message),
            other => Self::Store(other),
        }
    }
}

impl From<ChecklistValidationError> for RepoError {
    fn from(value: ChecklistValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}
