//! Shared types for the roster console
//!
//! Record models, identifiers and page envelopes exchanged with the
//! remote collection service.

pub mod id;
pub mod models;
pub mod page;
pub mod util;

// Re-exports
pub use id::RecordId;
pub use models::{Department, DepartmentPayload, Employee, EmployeePayload, Record};
pub use page::Page;
pub use serde::{Deserialize, Serialize};
