//! Roster Client - console core for the employee/department service
//!
//! Paginated list controllers, record forms and the department
//! relationship resolver, all driving a remote page-addressable
//! collection through a [`DataSource`].

pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod list;
pub mod logger;
pub mod membership;
pub mod memory;
pub mod resolver;
pub mod source;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use form::{
    DepartmentDraft, DepartmentForm, Draft, EmployeeDraft, EmployeeForm, FormController, FormMode,
};
pub use http::{HttpClient, NetworkHttpClient};
pub use list::{ListController, ListSnapshot};
pub use membership::MembershipView;
pub use memory::MemoryDataSource;
pub use resolver::{reconcile_selection, resolve_ids, resolve_selection};
pub use source::{DataSource, RestDataSource};

// Re-export shared types for convenience
pub use shared::{Department, DepartmentPayload, Employee, EmployeePayload, Page, Record, RecordId};

/// Employee list screen controller
pub type EmployeeList<S> = ListController<Employee, S>;

/// Department list screen controller
pub type DepartmentList<S> = ListController<Department, S>;

#[doc(hidden)]
pub mod __private {
    pub use chrono;
    pub use tracing;
}
