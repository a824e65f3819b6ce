use super::{Draft, FormController, FormMode, is_blank};
use crate::resolver::{reconcile_selection, resolve_selection};
use crate::{DataSource, ErrorKind};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{Department, Employee, EmployeePayload, Record};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Employee form fields, as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeDraft {
    pub name: String,
    pub email: String,
    /// Salary text from a numeric input
    pub salary: String,
    /// `YYYY-MM-DD` from a date input
    pub date_of_joining: String,
    pub departments: Vec<Department>,
}

impl Draft for EmployeeDraft {
    type Record = Employee;

    fn hydrate(&mut self, record: &Employee) {
        self.name = record.name.clone();
        self.email = record.email.clone();
        self.salary = record.salary.to_string();
        self.date_of_joining = record.date_of_joining.format(DATE_FORMAT).to_string();
        self.departments = record.departments.clone();
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.email) {
            missing.push("email");
        }
        if is_blank(&self.salary) {
            missing.push("salary");
        }
        if is_blank(&self.date_of_joining) {
            missing.push("date_of_joining");
        }
        if self.departments.is_empty() {
            missing.push("departments");
        }
        missing
    }

    fn assemble(&self) -> Result<EmployeePayload, Vec<&'static str>> {
        let salary = self.salary.trim().parse::<Decimal>();
        let date_of_joining = NaiveDate::parse_from_str(self.date_of_joining.trim(), DATE_FORMAT);

        match (salary, date_of_joining) {
            (Ok(salary), Ok(date_of_joining)) => Ok(EmployeePayload {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                salary,
                date_of_joining,
                departments: self.departments.clone(),
            }),
            (salary, date) => {
                let mut invalid = Vec::new();
                if salary.is_err() {
                    invalid.push("salary");
                }
                if date.is_err() {
                    invalid.push("date_of_joining");
                }
                Err(invalid)
            }
        }
    }
}

/// Employee create/edit form
///
/// Besides the employee itself, activation fetches every department so the
/// multi-select can offer them and the employee's own department copies can
/// be re-keyed against the current records.
pub struct EmployeeForm<E, D> {
    form: FormController<EmployeeDraft, E>,
    departments: D,
    options: Vec<Department>,
    options_error: Option<ErrorKind>,
}

impl<E, D> EmployeeForm<E, D>
where
    E: DataSource<Employee>,
    D: DataSource<Department>,
{
    pub fn new(employees: E, departments: D, mode: FormMode) -> Self {
        Self {
            form: FormController::new(employees, mode),
            departments,
            options: Vec::new(),
            options_error: None,
        }
    }

    /// Fetch the department options and, in edit mode, the employee.
    ///
    /// Both requests run concurrently. Returns whether both succeeded.
    pub async fn activate(&mut self) -> bool {
        let (hydrated, options) = tokio::join!(self.form.activate(), self.departments.list());

        match options {
            Ok(options) => {
                self.options = options;
                self.options_error = None;
                if hydrated && self.form.mode() != FormMode::Create {
                    let draft = self.form.draft_mut();
                    draft.departments = reconcile_selection(&self.options, &draft.departments);
                }
                hydrated
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch department options");
                self.options_error = Some(ErrorKind::classify(&e, ErrorKind::FetchFailed));
                false
            }
        }
    }

    /// Replace the selected departments with the options matching `tokens`
    pub fn select_departments<I, T>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        self.form.draft_mut().departments = resolve_selection(&self.options, tokens);
    }

    /// Ids of the selected departments, as multi-select values
    pub fn selected_tokens(&self) -> Vec<String> {
        self.form
            .draft()
            .departments
            .iter()
            .map(|department| department.id.to_string())
            .collect()
    }

    pub fn options(&self) -> &[Department] {
        &self.options
    }

    pub fn mode(&self) -> FormMode {
        self.form.mode()
    }

    pub fn draft(&self) -> &EmployeeDraft {
        self.form.draft()
    }

    pub fn draft_mut(&mut self) -> &mut EmployeeDraft {
        self.form.draft_mut()
    }

    /// The employee's own error wins over a failed option fetch
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.form.last_error().or(self.options_error)
    }

    pub fn error_message(&self) -> Option<String> {
        self.form.error_message().or_else(|| {
            self.options_error.map(|kind| match kind {
                ErrorKind::FetchFailed => "Error fetching departments".to_string(),
                other => other.message(Department::LABEL),
            })
        })
    }

    pub async fn submit(&mut self) -> Option<Employee> {
        self.form.submit().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Record, RecordId};

    fn filled() -> EmployeeDraft {
        EmployeeDraft {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            salary: "5000.50".into(),
            date_of_joining: "2021-01-01".into(),
            departments: vec![Department {
                id: RecordId(1),
                name: "Sales".into(),
                location: "HQ".into(),
            }],
        }
    }

    #[test]
    fn test_missing_fields() {
        assert!(filled().missing_fields().is_empty());

        let draft = EmployeeDraft {
            email: "  ".into(),
            departments: vec![],
            ..filled()
        };
        assert_eq!(draft.missing_fields(), vec!["email", "departments"]);
    }

    #[test]
    fn test_assemble_parses_inputs() {
        let payload = filled().assemble().unwrap();
        assert_eq!(payload.salary, "5000.50".parse::<Decimal>().unwrap());
        assert_eq!(payload.date_of_joining, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    }

    #[test]
    fn test_assemble_reports_unparsable_fields() {
        let draft = EmployeeDraft {
            salary: "lots".into(),
            date_of_joining: "01/01/2021".into(),
            ..filled()
        };
        assert_eq!(draft.assemble().unwrap_err(), vec!["salary", "date_of_joining"]);
    }

    #[test]
    fn test_hydrate_round_trips_text_fields() {
        let mut draft = EmployeeDraft::default();
        let payload = filled().assemble().unwrap();
        draft.hydrate(&Employee::from_payload(RecordId(4), payload));
        assert_eq!(draft.salary, "5000.50");
        assert_eq!(draft.date_of_joining, "2021-01-01");
    }
}
