// roster-client/tests/common/mod.rs
// Test doubles and fixtures shared by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use roster_client::{ClientError, ClientResult, DataSource, MemoryDataSource};
use rust_decimal::Decimal;
use shared::{Department, Employee, Page, Record, RecordId};
use std::collections::HashMap;
use tokio::sync::oneshot;

pub fn department(id: i64, name: &str) -> Department {
    Department {
        id: RecordId(id),
        name: name.to_string(),
        location: "Madrid".to_string(),
    }
}

pub fn employee(id: i64) -> Employee {
    Employee {
        id: RecordId(id),
        name: format!("Employee {id}"),
        email: format!("employee{id}@example.com"),
        salary: Decimal::from(1000 * id),
        date_of_joining: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
        departments: vec![department(1, "Sales")],
    }
}

pub fn employees(ids: std::ops::RangeInclusive<i64>) -> Vec<Employee> {
    ids.map(employee).collect()
}

pub fn ids<R: Record>(records: &[R]) -> Vec<i64> {
    records.iter().map(|record| record.id().get()).collect()
}

/// Operations a [`ScriptedSource`] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    ListPage,
    Get,
    Create,
    Update,
    Delete,
}

/// How a scripted operation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// The service answered with an error status
    Rejected,
    /// The service could not be reached
    Offline,
}

impl Failure {
    fn error(self) -> ClientError {
        match self {
            Self::Rejected => ClientError::Api {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                message: "scripted failure".into(),
            },
            Self::Offline => ClientError::Unavailable("scripted outage".into()),
        }
    }
}

/// Memory-backed source that counts calls and fails on demand
pub struct ScriptedSource<R> {
    inner: MemoryDataSource<R>,
    failures: Mutex<HashMap<Op, Failure>>,
    calls: Mutex<Vec<Op>>,
}

impl<R: Record> ScriptedSource<R> {
    pub fn new(records: impl IntoIterator<Item = R>) -> Self {
        Self {
            inner: MemoryDataSource::with_records(records),
            failures: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fail(&self, op: Op, failure: Failure) {
        self.failures.lock().insert(op, failure);
    }

    pub fn recover(&self, op: Op) {
        self.failures.lock().remove(&op);
    }

    pub fn calls(&self, op: Op) -> usize {
        self.calls.lock().iter().filter(|call| **call == op).count()
    }

    pub fn inner(&self) -> &MemoryDataSource<R> {
        &self.inner
    }

    fn enter(&self, op: Op) -> ClientResult<()> {
        self.calls.lock().push(op);
        match self.failures.lock().get(&op) {
            Some(failure) => Err(failure.error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R: Record> DataSource<R> for ScriptedSource<R> {
    async fn list(&self) -> ClientResult<Vec<R>> {
        self.enter(Op::List)?;
        self.inner.list().await
    }

    async fn list_page(&self, page_index: u32, page_size: u32) -> ClientResult<Page<R>> {
        self.enter(Op::ListPage)?;
        self.inner.list_page(page_index, page_size).await
    }

    async fn get(&self, id: RecordId) -> ClientResult<R> {
        self.enter(Op::Get)?;
        self.inner.get(id).await
    }

    async fn create(&self, payload: &R::Payload) -> ClientResult<R> {
        self.enter(Op::Create)?;
        self.inner.create(payload).await
    }

    async fn update(&self, id: RecordId, payload: &R::Payload) -> ClientResult<R> {
        self.enter(Op::Update)?;
        self.inner.update(id, payload).await
    }

    async fn delete(&self, id: RecordId) -> ClientResult<()> {
        self.enter(Op::Delete)?;
        self.inner.delete(id).await
    }
}

/// A page request waiting for the test to answer it
pub struct PendingPage<R> {
    pub page_index: u32,
    pub page_size: u32,
    reply: oneshot::Sender<ClientResult<Page<R>>>,
}

/// Source whose page requests stay open until the test answers them,
/// in whatever order it likes
pub struct GatedSource<R> {
    pending: Mutex<Vec<PendingPage<R>>>,
}

impl<R: Record> GatedSource<R> {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Yield until at least `count` page requests are open
    pub async fn wait_for(&self, count: usize) {
        while self.pending() < count {
            tokio::task::yield_now().await;
        }
    }

    /// Answer the first open request matching `which`
    pub fn respond(&self, which: impl Fn(u32, u32) -> bool, result: ClientResult<Page<R>>) {
        let mut pending = self.pending.lock();
        let position = pending
            .iter()
            .position(|p| which(p.page_index, p.page_size))
            .expect("no matching page request");
        let request = pending.remove(position);
        // the requester may already be gone
        let _ = request.reply.send(result);
    }
}

#[async_trait]
impl<R: Record> DataSource<R> for GatedSource<R> {
    async fn list(&self) -> ClientResult<Vec<R>> {
        Err(ClientError::Unavailable("gated source only serves pages".into()))
    }

    async fn list_page(&self, page_index: u32, page_size: u32) -> ClientResult<Page<R>> {
        let (reply, answer) = oneshot::channel();
        self.pending.lock().push(PendingPage {
            page_index,
            page_size,
            reply,
        });
        answer
            .await
            .unwrap_or_else(|_| Err(ClientError::Unavailable("request dropped".into())))
    }

    async fn get(&self, id: RecordId) -> ClientResult<R> {
        Err(ClientError::NotFound(id.to_string()))
    }

    async fn create(&self, _payload: &R::Payload) -> ClientResult<R> {
        Err(ClientError::Unavailable("read only".into()))
    }

    async fn update(&self, _id: RecordId, _payload: &R::Payload) -> ClientResult<R> {
        Err(ClientError::Unavailable("read only".into()))
    }

    async fn delete(&self, _id: RecordId) -> ClientResult<()> {
        Ok(())
    }
}
