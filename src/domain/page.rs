use serde::{Deserialize, Serialize};

/// Envelope returned by the paginated list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(rename = "pageCount")]
    pub page_count: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self { data: Vec::new(), page_count: 1 }
    }
}
