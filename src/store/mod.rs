//! Store abstraction over the bills and receipt-file collections

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::{BillRecord, FileUpload, StoredFile};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// The bills collection.
#[async_trait]
pub trait BillsCollection: Send + Sync {
    /// Every bill in the store, whichever employee submitted it.
    async fn list(&self) -> Result<Vec<BillRecord>, StoreError>;

    /// Create or replace the bill with `bill.id` and return what was stored.
    async fn update(&self, bill: &BillRecord) -> Result<BillRecord, StoreError>;
}

/// The receipt-file collection.
#[async_trait]
pub trait FileCollection: Send + Sync {
    /// Store an uploaded receipt and return its URL and key.
    async fn create(&self, upload: FileUpload) -> Result<StoredFile, StoreError>;
}

pub trait Store: Send + Sync {
    fn bills(&self) -> &dyn BillsCollection;
    fn files(&self) -> &dyn FileCollection;
}
