//! Data models
//!
//! Records as the remote collection service returns them, plus the
//! payloads sent on create and update. All ids are [`RecordId`].

pub mod department;
pub mod employee;

// Re-exports
pub use department::*;
pub use employee::*;

use crate::RecordId;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// A record type served by one remote collection
pub trait Record: Clone + Send + Sync + DeserializeOwned + Serialize + 'static {
    /// Path segment of the collection (e.g. `employee`)
    const COLLECTION: &'static str;
    /// Noun used in user-facing messages
    const LABEL: &'static str;

    /// Body sent on create/update (the record without its id)
    type Payload: Clone + Send + Sync + Serialize + 'static;

    fn id(&self) -> RecordId;

    /// Materialize a record from a payload and a freshly assigned id
    fn from_payload(id: RecordId, payload: Self::Payload) -> Self;
}
