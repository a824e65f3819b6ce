use super::{Draft, FormController, is_blank};
use shared::{Department, DepartmentPayload};

/// Department form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentDraft {
    pub name: String,
    pub location: String,
}

impl Draft for DepartmentDraft {
    type Record = Department;

    fn hydrate(&mut self, record: &Department) {
        self.name = record.name.clone();
        self.location = record.location.clone();
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.name) {
            missing.push("name");
        }
        if is_blank(&self.location) {
            missing.push("location");
        }
        missing
    }

    fn assemble(&self) -> Result<DepartmentPayload, Vec<&'static str>> {
        Ok(DepartmentPayload {
            name: self.name.trim().to_string(),
            location: self.location.trim().to_string(),
        })
    }
}

/// Department create/edit form
pub type DepartmentForm<S> = FormController<DepartmentDraft, S>;
