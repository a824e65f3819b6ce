//! Department Model

use super::Record;
use crate::RecordId;
use serde::{Deserialize, Serialize};

/// Department entity
///
/// Employees embed department copies that may be partial, so the text
/// fields fall back to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
}

/// Create/update department payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentPayload {
    pub name: String,
    pub location: String,
}

impl Record for Department {
    const COLLECTION: &'static str = "department";
    const LABEL: &'static str = "department";

    type Payload = DepartmentPayload;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_payload(id: RecordId, payload: DepartmentPayload) -> Self {
        Self {
            id,
            name: payload.name,
            location: payload.location,
        }
    }
}
