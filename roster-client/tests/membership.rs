// roster-client/tests/membership.rs
// Department memberships of one employee

mod common;

use common::{Failure, Op, ScriptedSource, department, employee};
use roster_client::{ErrorKind, MembershipView, RecordId};
use std::sync::Arc;

#[tokio::test]
async fn test_lists_employee_departments() {
    let mut member = employee(3);
    member.departments = vec![department(1, "Sales"), department(4, "Legal")];
    let source = ScriptedSource::new(vec![employee(1), member]);

    let mut view = MembershipView::new(source, RecordId(3));
    assert!(view.loading());
    assert!(view.departments().is_empty());

    view.load().await;
    assert!(!view.loading());
    assert_eq!(view.employee_name(), Some("Employee 3"));
    let names: Vec<_> = view.departments().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Sales", "Legal"]);
    assert!(view.last_error().is_none());
}

#[tokio::test]
async fn test_unknown_employee() {
    let mut view = MembershipView::new(ScriptedSource::new(vec![employee(1)]), RecordId(9));
    view.load().await;

    assert!(!view.loading());
    assert!(view.employee().is_none());
    assert!(view.departments().is_empty());
    assert_eq!(view.last_error(), Some(ErrorKind::FetchFailed));
    assert_eq!(view.error_message().as_deref(), Some("Error fetching employee data"));
}

#[tokio::test]
async fn test_reload_after_outage() {
    let source = Arc::new(ScriptedSource::new(vec![employee(1)]));
    source.fail(Op::Get, Failure::Offline);

    let mut view = MembershipView::new(source.clone(), RecordId(1));
    view.load().await;
    assert_eq!(view.last_error(), Some(ErrorKind::NetworkUnavailable));

    source.recover(Op::Get);
    view.load().await;
    assert!(view.last_error().is_none());
    assert_eq!(view.departments().len(), 1);
    assert_eq!(view.employee_id(), RecordId(1));
}
