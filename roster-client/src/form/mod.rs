//! Record form controllers
//!
//! A form is either creating a record or editing an existing one. The mode
//! comes from the navigation context once, at construction, and never
//! changes for the lifetime of the form.

mod department;
mod employee;

pub use department::{DepartmentDraft, DepartmentForm};
pub use employee::{EmployeeDraft, EmployeeForm};

use crate::{DataSource, ErrorKind};
use shared::{Record, RecordId};

/// Create or edit, decided at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(RecordId),
}

impl FormMode {
    /// Mode for the record id carried by the navigation context, if any
    pub fn from_context(id: Option<RecordId>) -> Self {
        id.map_or(Self::Create, Self::Edit)
    }

    pub fn record_id(&self) -> Option<RecordId> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(*id),
        }
    }
}

/// In-progress field values of a record form
pub trait Draft: Default + Send {
    type Record: Record;

    /// Fill every field from a fetched record
    fn hydrate(&mut self, record: &Self::Record);

    /// Names of required fields that are still empty
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Build the payload to send; `Err` names the fields that did not parse
    fn assemble(&self) -> Result<<Self::Record as Record>::Payload, Vec<&'static str>>;
}

/// Fetch-for-edit / blank-for-create form over one collection
pub struct FormController<D, S> {
    mode: FormMode,
    source: S,
    draft: D,
    last_error: Option<ErrorKind>,
}

impl<D: Draft, S: DataSource<D::Record>> FormController<D, S> {
    pub fn new(source: S, mode: FormMode) -> Self {
        Self {
            mode,
            source,
            draft: D::default(),
            last_error: None,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut D {
        &mut self.draft
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    pub fn error_message(&self) -> Option<String> {
        self.last_error.map(|kind| kind.message(<D::Record as Record>::LABEL))
    }

    /// Hydrate the draft when editing.
    ///
    /// Returns whether the draft is ready: always in create mode, and in
    /// edit mode only when the record was fetched. On failure the fields
    /// are left as they were.
    pub async fn activate(&mut self) -> bool {
        let FormMode::Edit(id) = self.mode else {
            return true;
        };
        match self.source.get(id).await {
            Ok(record) => {
                self.draft.hydrate(&record);
                true
            }
            Err(e) => {
                tracing::warn!(
                    collection = <D::Record as Record>::COLLECTION,
                    %id,
                    error = %e,
                    "Failed to fetch record for editing"
                );
                self.last_error = Some(ErrorKind::classify(&e, ErrorKind::FetchFailed));
                false
            }
        }
    }

    /// Validate and save the draft.
    ///
    /// Returns the saved record on success, which is the signal to leave
    /// the form. On any failure the draft is kept for another attempt and
    /// `None` is returned. Validation failures never reach the source.
    pub async fn submit(&mut self) -> Option<D::Record> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            tracing::debug!(?missing, "Form has empty required fields");
            self.last_error = Some(ErrorKind::ValidationFailed);
            return None;
        }
        let payload = match self.draft.assemble() {
            Ok(payload) => payload,
            Err(invalid) => {
                tracing::debug!(?invalid, "Form fields did not parse");
                self.last_error = Some(ErrorKind::ValidationFailed);
                return None;
            }
        };

        let (action, result) = match self.mode {
            FormMode::Create => ("create", self.source.create(&payload).await),
            FormMode::Edit(id) => ("update", self.source.update(id, &payload).await),
        };

        match result {
            Ok(saved) => {
                self.last_error = None;
                crate::audit_log!(
                    "console",
                    action,
                    format!("{}:{}", <D::Record as Record>::COLLECTION, saved.id())
                );
                Some(saved)
            }
            Err(e) => {
                tracing::warn!(
                    collection = <D::Record as Record>::COLLECTION,
                    action,
                    error = %e,
                    "Failed to save record"
                );
                self.last_error = Some(ErrorKind::classify(&e, ErrorKind::SaveFailed));
                None
            }
        }
    }
}

/// Required text field check; whitespace-only counts as empty
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
