use std::sync::Arc;
use tracing::{debug, warn};

use crate::errors::StoreError;
use crate::format::{format_date, format_status};
use crate::models::DisplayBillRecord;
use crate::routes::{Navigator, Route};
use crate::store::Store;
use crate::views::ModalDisplay;

/// Bills list page: fetches bills and handles its buttons.
pub struct BillsReader {
    store: Arc<dyn Store>,
    navigator: Arc<dyn Navigator>,
    modal: Arc<dyn ModalDisplay>,
}

impl BillsReader {
    pub fn new(store: Arc<dyn Store>, navigator: Arc<dyn Navigator>, modal: Arc<dyn ModalDisplay>) -> Self {
        Self { store, navigator, modal }
    }

    /// Fetch every bill and format its date and status for display.
    ///
    /// Order is kept as returned by the store. A date that cannot be
    /// formatted is logged and left raw. A listing failure is returned
    /// untouched so the caller can show its message.
    pub async fn fetch_and_format(&self) -> Result<Vec<DisplayBillRecord>, StoreError> {
        let bills = self.store.bills().list().await?;
        debug!("Fetched {} bills", bills.len());

        let formatted = bills
            .into_iter()
            .map(|bill| {
                let status = format_status(&bill.status);
                let date = match format_date(&bill.date) {
                    Ok(date) => date,
                    Err(e) => {
                        warn!("{} for bill {}", e, bill.id);
                        bill.date.clone()
                    }
                };
                DisplayBillRecord::new(bill, date, status)
            })
            .collect();

        Ok(formatted)
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.on_navigate(Route::NewBill);
    }

    /// Show the receipt behind a bill's eye icon.
    pub fn handle_click_icon_eye(&self, bill_url: &str) {
        self.modal.show_modal(bill_url);
    }
}
