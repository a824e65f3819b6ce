//! Department memberships of one employee

use crate::{DataSource, ErrorKind};
use shared::{Department, Employee, Record, RecordId};

/// Read-only view of the departments an employee belongs to
pub struct MembershipView<S> {
    source: S,
    employee_id: RecordId,
    employee: Option<Employee>,
    loading: bool,
    last_error: Option<ErrorKind>,
}

impl<S: DataSource<Employee>> MembershipView<S> {
    /// The view starts out loading until [`load`](Self::load) settles
    pub fn new(source: S, employee_id: RecordId) -> Self {
        Self {
            source,
            employee_id,
            employee: None,
            loading: true,
            last_error: None,
        }
    }

    pub async fn load(&mut self) {
        self.loading = true;
        let result = self.source.get(self.employee_id).await;
        self.loading = false;

        match result {
            Ok(employee) => {
                self.employee = Some(employee);
                self.last_error = None;
            }
            Err(e) => {
                tracing::warn!(employee_id = %self.employee_id, error = %e, "Failed to fetch employee");
                self.employee = None;
                self.last_error = Some(ErrorKind::classify(&e, ErrorKind::FetchFailed));
            }
        }
    }

    pub fn employee_id(&self) -> RecordId {
        self.employee_id
    }

    pub fn employee(&self) -> Option<&Employee> {
        self.employee.as_ref()
    }

    pub fn employee_name(&self) -> Option<&str> {
        self.employee.as_ref().map(|employee| employee.name.as_str())
    }

    pub fn departments(&self) -> &[Department] {
        self.employee
            .as_ref()
            .map(|employee| employee.departments.as_slice())
            .unwrap_or_default()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    pub fn error_message(&self) -> Option<String> {
        self.last_error.map(|kind| kind.message(Employee::LABEL))
    }
}
