//! Data source adapters
//!
//! A [`DataSource`] is the request/response boundary between a controller
//! and one remote collection. Implementations hold no per-screen state and
//! may be shared between controllers.

use crate::{ClientResult, HttpClient, NetworkHttpClient};
use async_trait::async_trait;
use shared::{Page, Record, RecordId};
use std::marker::PhantomData;
use std::sync::Arc;

/// Remote collection of `R` records
#[async_trait]
pub trait DataSource<R: Record>: Send + Sync {
    /// All records, unpaged
    async fn list(&self) -> ClientResult<Vec<R>>;

    /// One page; `page_index` is zero-based
    async fn list_page(&self, page_index: u32, page_size: u32) -> ClientResult<Page<R>>;

    async fn get(&self, id: RecordId) -> ClientResult<R>;

    async fn create(&self, payload: &R::Payload) -> ClientResult<R>;

    async fn update(&self, id: RecordId, payload: &R::Payload) -> ClientResult<R>;

    async fn delete(&self, id: RecordId) -> ClientResult<()>;
}

#[async_trait]
impl<R: Record, S: DataSource<R> + ?Sized> DataSource<R> for Arc<S> {
    async fn list(&self) -> ClientResult<Vec<R>> {
        (**self).list().await
    }

    async fn list_page(&self, page_index: u32, page_size: u32) -> ClientResult<Page<R>> {
        (**self).list_page(page_index, page_size).await
    }

    async fn get(&self, id: RecordId) -> ClientResult<R> {
        (**self).get(id).await
    }

    async fn create(&self, payload: &R::Payload) -> ClientResult<R> {
        (**self).create(payload).await
    }

    async fn update(&self, id: RecordId, payload: &R::Payload) -> ClientResult<R> {
        (**self).update(id, payload).await
    }

    async fn delete(&self, id: RecordId) -> ClientResult<()> {
        (**self).delete(id).await
    }
}

/// REST adapter over the service's collection endpoints
///
/// ```text
/// GET    {collection}/get
/// GET    {collection}/get-in-batches/{page}/{size}
/// GET    {collection}/getById/{id}
/// POST   {collection}/add
/// PUT    {collection}/update/{id}
/// DELETE {collection}/delete/{id}
/// ```
#[derive(Debug, Clone)]
pub struct RestDataSource<R, H = NetworkHttpClient> {
    http: H,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record, H: HttpClient> RestDataSource<R, H> {
    pub fn new(http: H) -> Self {
        Self {
            http,
            _record: PhantomData,
        }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    fn path(&self, endpoint: &str) -> String {
        format!("{}/{}", R::COLLECTION, endpoint)
    }
}

#[async_trait]
impl<R: Record, H: HttpClient> DataSource<R> for RestDataSource<R, H> {
    async fn list(&self) -> ClientResult<Vec<R>> {
        self.http.get(&self.path("get")).await
    }

    async fn list_page(&self, page_index: u32, page_size: u32) -> ClientResult<Page<R>> {
        let path = self.path(&format!("get-in-batches/{page_index}/{page_size}"));
        self.http.get(&path).await
    }

    async fn get(&self, id: RecordId) -> ClientResult<R> {
        self.http.get(&self.path(&format!("getById/{id}"))).await
    }

    async fn create(&self, payload: &R::Payload) -> ClientResult<R> {
        self.http.post(&self.path("add"), payload).await
    }

    async fn update(&self, id: RecordId, payload: &R::Payload) -> ClientResult<R> {
        self.http.put(&self.path(&format!("update/{id}")), payload).await
    }

    async fn delete(&self, id: RecordId) -> ClientResult<()> {
        self.http.delete(&self.path(&format!("delete/{id}"))).await
    }
}
