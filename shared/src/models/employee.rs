//! Employee Model

use super::{Department, Record};
use crate::RecordId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub salary: Decimal,
    pub date_of_joining: NaiveDate,
    /// Departments the employee belongs to (many-to-many)
    #[serde(default)]
    pub departments: Vec<Department>,
}

/// Create/update employee payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub name: String,
    pub email: String,
    pub salary: Decimal,
    pub date_of_joining: NaiveDate,
    pub departments: Vec<Department>,
}

impl Record for Employee {
    const COLLECTION: &'static str = "employee";
    const LABEL: &'static str = "employee";

    type Payload = EmployeePayload;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_payload(id: RecordId, payload: EmployeePayload) -> Self {
        Self {
            id,
            name: payload.name,
            email: payload.email,
            salary: payload.salary,
            date_of_joining: payload.date_of_joining,
            departments: payload.departments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_wire_format() {
        let json = r#"{
            "id": 1,
            "name": "John Doe",
            "email": "john@example.com",
            "salary": 5000,
            "dateOfJoining": "2021-01-01",
            "departments": [{"id": "2", "name": "R&D"}]
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, RecordId(1));
        assert_eq!(employee.salary, Decimal::from(5000));
        assert_eq!(employee.date_of_joining, NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
        assert_eq!(employee.departments[0].id, RecordId(2));
        assert_eq!(employee.departments[0].location, "");
    }

    #[test]
    fn test_payload_uses_camel_case() {
        let payload = EmployeePayload {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            salary: Decimal::from(6000),
            date_of_joining: NaiveDate::from_ymd_opt(2022, 3, 4).unwrap(),
            departments: vec![],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["dateOfJoining"], "2022-03-04");
        assert!(value.get("id").is_none());
    }
}
