//! billed - employee expense reports
//!
//! Lists an employee's bills from a store and submits new ones, optionally
//! with an uploaded receipt. The store, navigation and view layers are
//! injected so the containers can run against SQLite, memory or test doubles.

pub mod app;
pub mod cli;
pub mod config;
pub mod containers;
pub mod errors;
pub mod format;
pub mod models;
pub mod routes;
pub mod session;
pub mod store;
pub mod views;

#[cfg(test)]
pub(crate) mod fixtures;

pub use containers::{BillsReader, FormState, NewBillSubmitter};
pub use errors::{AttachmentError, FormError, FormatError, SessionError, StoreError};
pub use routes::{Navigator, Route};
pub use session::SessionContext;
pub use store::{BillsCollection, FileCollection, Store};
