//! Page envelope returned by paged list endpoints

use serde::{Deserialize, Serialize};

/// One page of a remote collection
///
/// Only `content` and `totalPages` are guaranteed. Servers that echo the
/// page they actually served also send `number` and `size`; callers use
/// those to correct their request intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: u32,
    /// Zero-based index of the page served
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u32>,
    /// Page size the server applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_pages: u32) -> Self {
        Self {
            content,
            total_pages,
            number: None,
            size: None,
            total_elements: None,
        }
    }

    /// Attach the server's echo of the page it served
    pub fn served(mut self, number: u32, size: u32, total_elements: u64) -> Self {
        self.number = Some(number);
        self.size = Some(size);
        self.total_elements = Some(total_elements);
        self
    }

    /// Number of pages needed for `total` records at `size` per page
    pub fn total_pages_for(total: u64, size: u32) -> u32 {
        if size == 0 || total == 0 {
            return 0;
        }
        total.div_ceil(u64::from(size)).min(u64::from(u32::MAX)) as u32
    }
}
