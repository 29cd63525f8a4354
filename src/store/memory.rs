//! In-process store, used by the tests and for demos

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{BillRecord, FileUpload, StoredFile};
use crate::store::{BillsCollection, FileCollection, Store};

const DEFAULT_BASE_URL: &str = "https://localhost:3456";

/// Bills and receipts kept in memory.
///
/// Failures can be injected for the next `list`, `update` or `create` call, and every
/// `create`/`update` is recorded so callers can inspect what was sent.
pub struct MemoryStore {
    base_url: String,
    bills: Mutex<Vec<BillRecord>>,
    files: Mutex<HashMap<String, FileUpload>>,
    next_list_failure: Mutex<Option<u16>>,
    next_update_failure: Mutex<Option<u16>>,
    next_create_failure: Mutex<Option<u16>>,
    create_calls: AtomicUsize,
    updates: Mutex<Vec<BillRecord>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bills: Mutex::new(Vec::new()),
            files: Mutex::new(HashMap::new()),
            next_list_failure: Mutex::new(None),
            next_update_failure: Mutex::new(None),
            next_create_failure: Mutex::new(None),
            create_calls: AtomicUsize::new(0),
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn with_bills(bills: Vec<BillRecord>) -> Self {
        let store = Self::new();
        *lock(&store.bills) = bills;
        store
    }

    /// Make the next `list` call fail with `Erreur <status>`.
    pub fn fail_next_list(&self, status: u16) {
        *lock(&self.next_list_failure) = Some(status);
    }

    /// Make the next `update` call fail with `Erreur <status>`.
    pub fn fail_next_update(&self, status: u16) {
        *lock(&self.next_update_failure) = Some(status);
    }

    /// Make the next `create` call fail with `Erreur <status>`.
    pub fn fail_next_create(&self, status: u16) {
        *lock(&self.next_create_failure) = Some(status);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Every bill passed to `update`, in call order, including failed calls.
    pub fn updates(&self) -> Vec<BillRecord> {
        lock(&self.updates).clone()
    }

    pub fn file(&self, key: &str) -> Option<FileUpload> {
        lock(&self.files).get(key).cloned()
    }
}

// Poisoning is ignored; every write leaves the data consistent.
fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl BillsCollection for MemoryStore {
    async fn list(&self) -> Result<Vec<BillRecord>, StoreError> {
        if let Some(status) = lock(&self.next_list_failure).take() {
            return Err(StoreError::Status(status));
        }
        Ok(lock(&self.bills).clone())
    }

    async fn update(&self, bill: &BillRecord) -> Result<BillRecord, StoreError> {
        lock(&self.updates).push(bill.clone());
        if let Some(status) = lock(&self.next_update_failure).take() {
            return Err(StoreError::Status(status));
        }

        let mut bills = lock(&self.bills);
        match bills.iter_mut().find(|b| b.id == bill.id) {
            Some(existing) => *existing = bill.clone(),
            None => bills.push(bill.clone()),
        }
        debug!("Stored bill {} in memory", bill.id);
        Ok(bill.clone())
    }
}

#[async_trait]
impl FileCollection for MemoryStore {
    async fn create(&self, upload: FileUpload) -> Result<StoredFile, StoreError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(status) = lock(&self.next_create_failure).take() {
            return Err(StoreError::Status(status));
        }
        let key = Uuid::new_v4().to_string();
        let file_url = format!("{}/images/{}", self.base_url, upload.file_name);
        lock(&self.files).insert(key.clone(), upload);
        Ok(StoredFile { file_url, key })
    }
}

impl Store for MemoryStore {
    fn bills(&self) -> &dyn BillsCollection {
        self
    }

    fn files(&self) -> &dyn FileCollection {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_list_failure_is_one_shot() {
        let store = MemoryStore::with_bills(fixtures::bills());
        store.fail_next_list(404);

        let err = store.bills().list().await.unwrap_err();
        assert_eq!(err.to_string(), "Erreur 404");
        assert_eq!(store.bills().list().await.unwrap().len(), fixtures::bills().len());
    }

    #[tokio::test]
    async fn test_update_upserts_by_id() {
        let store = MemoryStore::with_bills(fixtures::bills());
        let mut bill = fixtures::bills()[0].clone();
        bill.name = "renamed".to_string();

        store.bills().update(&bill).await.unwrap();

        let bills = store.bills().list().await.unwrap();
        assert_eq!(bills.len(), fixtures::bills().len());
        assert_eq!(bills[0].name, "renamed");
        assert_eq!(store.updates(), vec![bill]);
    }

    #[tokio::test]
    async fn test_create_returns_url_and_key() {
        let store = MemoryStore::new();
        let stored = store
            .files()
            .create(FileUpload {
                file_name: "test.jpg".to_string(),
                mime_type: "image/jpg".to_string(),
                bytes: b"test".to_vec(),
                email: "yusin@yusin".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(stored.file_url, "https://localhost:3456/images/test.jpg");
        assert_eq!(store.create_calls(), 1);
        assert_eq!(store.file(&stored.key).unwrap().email, "yusin@yusin");
    }

    #[tokio::test]
    async fn test_create_failure_is_one_shot() {
        let store = MemoryStore::new();
        store.fail_next_create(500);
        let upload = FileUpload {
            file_name: "test.jpg".to_string(),
            mime_type: "image/jpg".to_string(),
            bytes: b"test".to_vec(),
            email: "yusin@yusin".to_string(),
        };

        let err = store.files().create(upload.clone()).await.unwrap_err();
        assert_eq!(err.to_string(), "Erreur 500");
        assert!(store.files().create(upload).await.is_ok());
        assert_eq!(store.create_calls(), 2);
    }
}
