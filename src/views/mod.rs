//! Plain-text views for the bills pages

pub mod bills_ui;
pub mod error_page;

pub use bills_ui::{render_bills_page, BillsPage};
pub use error_page::{render_error_page, render_loading_page};

/// Shows a receipt image in a modal dialog.
pub trait ModalDisplay: Send + Sync {
    fn show_modal(&self, image_url: &str);
}

/// Modal that prints the receipt link to stdout.
pub struct ConsoleModal;

impl ModalDisplay for ConsoleModal {
    fn show_modal(&self, image_url: &str) {
        println!("Justificatif");
        println!("{}", image_url);
    }
}
