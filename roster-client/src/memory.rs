//! In-process data source
//!
//! Serves a collection from memory with the same paging rules as the
//! remote service, so controllers can run without a network.

use crate::{ClientError, ClientResult, DataSource};
use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{Page, Record, RecordId};
use std::collections::BTreeMap;

#[derive(Debug)]
struct Store<R> {
    records: BTreeMap<RecordId, R>,
    next_id: i64,
}

/// In-memory collection of `R` records, ordered by id
#[derive(Debug)]
pub struct MemoryDataSource<R> {
    store: Mutex<Store<R>>,
}

impl<R: Record> MemoryDataSource<R> {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                records: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Seed with existing records; new ids continue after the highest one
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let source = Self::new();
        {
            let mut store = source.store.lock();
            for record in records {
                store.next_id = store.next_id.max(record.id().get() + 1);
                store.records.insert(record.id(), record);
            }
        }
        source
    }

    pub fn len(&self) -> usize {
        self.store.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.store.lock().records.contains_key(&id)
    }

    fn not_found(id: RecordId) -> ClientError {
        ClientError::NotFound(format!("{} {} does not exist", R::LABEL, id))
    }
}

impl<R: Record> Default for MemoryDataSource<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> DataSource<R> for MemoryDataSource<R> {
    async fn list(&self) -> ClientResult<Vec<R>> {
        Ok(self.store.lock().records.values().cloned().collect())
    }

    async fn list_page(&self, page_index: u32, page_size: u32) -> ClientResult<Page<R>> {
        if page_size == 0 {
            return Err(ClientError::Validation("page size must be at least 1".into()));
        }
        let store = self.store.lock();
        let total = store.records.len() as u64;
        let skip = page_index as usize * page_size as usize;
        let content = store
            .records
            .values()
            .skip(skip)
            .take(page_size as usize)
            .cloned()
            .collect();
        Ok(Page::new(content, Page::<R>::total_pages_for(total, page_size))
            .served(page_index, page_size, total))
    }

    async fn get(&self, id: RecordId) -> ClientResult<R> {
        self.store
            .lock()
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, payload: &R::Payload) -> ClientResult<R> {
        let mut store = self.store.lock();
        let id = RecordId::new(store.next_id);
        store.next_id += 1;
        let record = R::from_payload(id, payload.clone());
        store.records.insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: RecordId, payload: &R::Payload) -> ClientResult<R> {
        let mut store = self.store.lock();
        let slot = store.records.get_mut(&id).ok_or_else(|| Self::not_found(id))?;
        *slot = R::from_payload(id, payload.clone());
        Ok(slot.clone())
    }

    async fn delete(&self, id: RecordId) -> ClientResult<()> {
        self.store
            .lock()
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}
