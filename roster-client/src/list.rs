//! Paginated list controller
//!
//! Keeps one locally cached page of a remote collection consistent with
//! the source across fetches, deletions and page-size changes.
//!
//! Every request is tagged with the generation current when it was
//! issued. Changing the page index or size issues a new generation, so a
//! response that arrives after a newer request was issued is dropped
//! instead of overwriting the newer state. The controller's lifetime is a
//! cancellation scope: after [`ListController::deactivate`] (or drop), no
//! in-flight response touches the state.

use crate::{DataSource, ErrorKind};
use parking_lot::Mutex;
use shared::{Page, Record, RecordId};
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_util::sync::CancellationToken;

/// Follow-up fetches allowed when a response forces the page index back in range
const MAX_RECONCILE_ROUNDS: usize = 3;

/// Immutable view of a list controller, for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<R> {
    pub records: Vec<R>,
    pub page_index: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub last_error: Option<ErrorKind>,
}

impl<R> ListSnapshot<R> {
    /// "Previous" is disabled on the first page
    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    /// "Next" is disabled on the last page and when there are no pages
    pub fn can_next(&self) -> bool {
        self.page_index < self.total_pages.saturating_sub(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Request {
    generation: u64,
    page_index: u32,
    page_size: u32,
}

#[derive(Debug)]
struct ListState<R> {
    records: Vec<R>,
    page_index: u32,
    page_size: u32,
    total_pages: u32,
    last_error: Option<ErrorKind>,
    generation: u64,
}

impl<R> ListState<R> {
    fn issue(&mut self, page_index: u32, page_size: u32) -> Request {
        self.generation += 1;
        self.page_index = page_index;
        self.page_size = page_size;
        Request {
            generation: self.generation,
            page_index,
            page_size,
        }
    }

    /// Apply a page response and reconcile the request intent with it.
    ///
    /// Returns the follow-up request when the page index had to be clamped
    /// into the new page range.
    fn apply(&mut self, page: Page<R>) -> Option<Request> {
        if let Some(size) = page.size.filter(|size| *size > 0) {
            self.page_size = size;
        }
        if let Some(number) = page.number {
            self.page_index = number;
        }
        self.total_pages = page.total_pages;
        self.last_error = None;

        let clamped = clamp_index(i64::from(self.page_index), self.total_pages);
        if clamped == self.page_index {
            self.records = page.content;
            return None;
        }

        tracing::debug!(
            requested = self.page_index,
            clamped,
            total_pages = self.total_pages,
            "Page index out of range, refetching"
        );
        let page_size = self.page_size;
        Some(self.issue(clamped, page_size))
    }
}

/// Clamp an index into `[0, total_pages - 1]`, or 0 when there are no pages
fn clamp_index(index: i64, total_pages: u32) -> u32 {
    let upper = i64::from(total_pages.saturating_sub(1));
    index.clamp(0, upper) as u32
}

/// Holds the loading flag raised for as long as it lives
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn enter(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Paginated view over a remote collection of `R`
///
/// Construct one per screen activation and drop it (or call
/// [`deactivate`](Self::deactivate)) when the screen goes away.
pub struct ListController<R, S> {
    source: S,
    state: Mutex<ListState<R>>,
    in_flight: AtomicUsize,
    scope: CancellationToken,
}

impl<R: Record, S: DataSource<R>> ListController<R, S> {
    pub fn new(source: S, page_size: u32) -> Self {
        Self {
            source,
            state: Mutex::new(ListState {
                records: Vec::new(),
                page_index: 0,
                page_size: page_size.max(1),
                total_pages: 0,
                last_error: None,
                generation: 0,
            }),
            in_flight: AtomicUsize::new(0),
            scope: CancellationToken::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// First fetch for a freshly mounted screen
    pub async fn activate(&self) {
        tracing::info!(collection = R::COLLECTION, "List activated");
        self.reload().await;
    }

    /// Fetch page `page_index` of size `page_size` (at least 1)
    pub async fn load(&self, page_index: u32, page_size: u32) {
        let request = self.state.lock().issue(page_index, page_size.max(1));
        self.run(request).await;
    }

    /// Re-fetch the current page with the current size
    pub async fn reload(&self) {
        let request = {
            let mut state = self.state.lock();
            let (page_index, page_size) = (state.page_index, state.page_size);
            state.issue(page_index, page_size)
        };
        self.run(request).await;
    }

    async fn run(&self, mut request: Request) {
        if self.scope.is_cancelled() {
            return;
        }
        let _loading = LoadingGuard::enter(&self.in_flight);

        for _ in 0..MAX_RECONCILE_ROUNDS {
            let result = tokio::select! {
                _ = self.scope.cancelled() => {
                    tracing::debug!(collection = R::COLLECTION, "List deactivated, fetch abandoned");
                    return;
                }
                result = self.source.list_page(request.page_index, request.page_size) => result,
            };

            let follow_up = {
                let mut state = self.state.lock();
                if self.scope.is_cancelled() {
                    return;
                }
                if state.generation != request.generation {
                    tracing::debug!(
                        collection = R::COLLECTION,
                        generation = request.generation,
                        current = state.generation,
                        "Discarding superseded page response"
                    );
                    return;
                }
                match result {
                    Ok(page) => state.apply(page),
                    Err(e) => {
                        tracing::warn!(
                            collection = R::COLLECTION,
                            page_index = request.page_index,
                            page_size = request.page_size,
                            error = %e,
                            "Failed to fetch page"
                        );
                        state.last_error = Some(ErrorKind::classify(&e, ErrorKind::FetchFailed));
                        if state.total_pages > 0 {
                            state.page_index = clamp_index(i64::from(state.page_index), state.total_pages);
                        }
                        None
                    }
                }
            };

            match follow_up {
                Some(next) => request = next,
                None => return,
            }
        }

        tracing::warn!(
            collection = R::COLLECTION,
            "Page index still out of range after reconciling"
        );
    }

    /// Delete a record remotely, then drop it from the cached page.
    ///
    /// The page is not re-fetched: `total_pages` and the rest of the page
    /// stay as they were until the next load. Returns whether the record
    /// was deleted.
    pub async fn delete(&self, id: RecordId) -> bool {
        if self.scope.is_cancelled() {
            return false;
        }
        let result = tokio::select! {
            _ = self.scope.cancelled() => return false,
            result = self.source.delete(id) => result,
        };

        let mut state = self.state.lock();
        if self.scope.is_cancelled() {
            return false;
        }
        match result {
            Ok(()) => {
                state.records.retain(|record| record.id() != id);
                crate::audit_log!("console", "delete", format!("{}:{}", R::COLLECTION, id));
                true
            }
            Err(e) => {
                tracing::warn!(collection = R::COLLECTION, %id, error = %e, "Failed to delete record");
                state.last_error = Some(ErrorKind::classify(&e, ErrorKind::DeleteFailed));
                false
            }
        }
    }

    /// Move to page `index`, clamped into the known page range.
    ///
    /// Re-fetches only when the clamped index differs from the current one.
    pub async fn set_page_index(&self, index: i64) {
        let request = {
            let mut state = self.state.lock();
            let target = clamp_index(index, state.total_pages);
            if target == state.page_index {
                tracing::debug!(index, target, "Page index unchanged");
                return;
            }
            let page_size = state.page_size;
            state.issue(target, page_size)
        };
        self.run(request).await;
    }

    /// Apply the 1-based page number typed into the pager.
    ///
    /// Text that is not a number falls to the first page.
    pub async fn set_page_index_input(&self, input: &str) {
        let index = match input.trim().parse::<i64>() {
            Ok(page) => page.saturating_sub(1),
            Err(_) => 0,
        };
        self.set_page_index(index).await;
    }

    pub async fn previous(&self) {
        let snapshot = self.snapshot();
        if snapshot.can_previous() {
            self.set_page_index(i64::from(snapshot.page_index) - 1).await;
        }
    }

    pub async fn next(&self) {
        let snapshot = self.snapshot();
        if snapshot.can_next() {
            self.set_page_index(i64::from(snapshot.page_index) + 1).await;
        }
    }

    /// Change the page size, keeping the current page index.
    ///
    /// Zero is raised to 1. The response decides the new page range.
    pub async fn set_page_size(&self, page_size: u32) {
        let request = {
            let mut state = self.state.lock();
            let page_size = page_size.max(1);
            if page_size == state.page_size {
                return;
            }
            let page_index = state.page_index;
            state.issue(page_index, page_size)
        };
        self.run(request).await;
    }

    /// Apply the page size typed into the size box; non-numbers are ignored
    pub async fn set_page_size_input(&self, input: &str) {
        match input.trim().parse::<u32>() {
            Ok(page_size) => self.set_page_size(page_size).await,
            Err(_) => tracing::debug!(input, "Ignoring non-numeric page size"),
        }
    }

    pub fn snapshot(&self) -> ListSnapshot<R> {
        let state = self.state.lock();
        ListSnapshot {
            records: state.records.clone(),
            page_index: state.page_index,
            page_size: state.page_size,
            total_pages: state.total_pages,
            loading: self.loading(),
            last_error: state.last_error,
        }
    }

    pub fn records(&self) -> Vec<R> {
        self.state.lock().records.clone()
    }

    pub fn page_index(&self) -> u32 {
        self.state.lock().page_index
    }

    pub fn page_size(&self) -> u32 {
        self.state.lock().page_size
    }

    pub fn total_pages(&self) -> u32 {
        self.state.lock().total_pages
    }

    pub fn loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn last_error(&self) -> Option<ErrorKind> {
        self.state.lock().last_error
    }

    /// Message for the current error, if any
    pub fn error_message(&self) -> Option<String> {
        self.last_error().map(|kind| kind.message(R::LABEL))
    }

    pub fn can_previous(&self) -> bool {
        self.snapshot().can_previous()
    }

    pub fn can_next(&self) -> bool {
        self.snapshot().can_next()
    }

    pub fn is_active(&self) -> bool {
        !self.scope.is_cancelled()
    }

    /// End the controller's lifetime; pending responses are discarded
    pub fn deactivate(&self) {
        self.scope.cancel();
    }
}

impl<R, S> Drop for ListController<R, S> {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_index() {
        assert_eq!(clamp_index(-4, 3), 0);
        assert_eq!(clamp_index(1, 3), 1);
        assert_eq!(clamp_index(3, 3), 2);
        assert_eq!(clamp_index(i64::MAX, 3), 2);
        assert_eq!(clamp_index(5, 0), 0);
    }

    #[test]
    fn test_apply_adopts_server_echo() {
        let mut state = ListState::<u8> {
            records: vec![],
            page_index: 1,
            page_size: 5,
            total_pages: 0,
            last_error: Some(ErrorKind::FetchFailed),
            generation: 1,
        };
        let follow_up = state.apply(Page::new(vec![1, 2], 4).served(0, 2, 8));
        assert!(follow_up.is_none());
        assert_eq!(state.page_index, 0);
        assert_eq!(state.page_size, 2);
        assert_eq!(state.records, vec![1, 2]);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_apply_requests_clamped_page() {
        let mut state = ListState::<u8> {
            records: vec![9],
            page_index: 4,
            page_size: 5,
            total_pages: 5,
            last_error: None,
            generation: 7,
        };
        let follow_up = state.apply(Page::new(vec![], 2)).unwrap();
        assert_eq!(follow_up.page_index, 1);
        assert_eq!(follow_up.generation, 8);
        assert_eq!(state.page_index, 1);
        assert_eq!(state.total_pages, 2);
        // previous rows stay until the clamped page arrives
        assert_eq!(state.records, vec![9]);
    }

    #[test]
    fn test_pager_buttons() {
        let snapshot = ListSnapshot::<u8> {
            records: vec![],
            page_index: 0,
            page_size: 2,
            total_pages: 3,
            loading: false,
            last_error: None,
        };
        assert!(!snapshot.can_previous());
        assert!(snapshot.can_next());

        let last = ListSnapshot {
            page_index: 2,
            ..snapshot.clone()
        };
        assert!(last.can_previous());
        assert!(!last.can_next());

        let empty = ListSnapshot {
            total_pages: 0,
            ..snapshot.clone()
        };
        assert!(!empty.can_next());

        let far = ListSnapshot {
            page_index: u32::MAX,
            ..snapshot
        };
        assert!(!far.can_next());
        assert!(far.can_previous());
    }
}
