//! Hosts the containers for the command line: resolves navigation
//! into rendered pages.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::config::Config;
use crate::containers::{BillsReader, FormState, NewBillSubmitter};
use crate::models::{BillRecord, FileInput, NewBillForm, SelectedFile};
use crate::routes::{Navigator, Route};
use crate::session::SessionContext;
use crate::store::Store;
use crate::views::{render_bills_page, BillsPage, ModalDisplay};

/// Navigator that remembers the last requested route until the host renders it.
#[derive(Default)]
pub struct PendingNavigator {
    pending: Mutex<Option<Route>>,
}

impl PendingNavigator {
    pub fn take(&self) -> Option<Route> {
        self.pending.lock().ok().and_then(|mut route| route.take())
    }
}

impl Navigator for PendingNavigator {
    fn on_navigate(&self, route: Route) {
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some(route);
        }
    }
}

pub struct App {
    config: Config,
    store: Arc<dyn Store>,
    session: SessionContext,
    navigator: Arc<PendingNavigator>,
    modal: Arc<dyn ModalDisplay>,
}

impl App {
    pub fn new(config: Config, store: Arc<dyn Store>, session: SessionContext, modal: Arc<dyn ModalDisplay>) -> Self {
        Self {
            config,
            store,
            session,
            navigator: Arc::new(PendingNavigator::default()),
            modal,
        }
    }

    fn bills_reader(&self) -> BillsReader {
        BillsReader::new(self.store.clone(), self.navigator.clone(), self.modal.clone())
    }

    /// Render the bills page, or the error page when listing fails.
    pub async fn bills_page(&self) -> String {
        match self.bills_reader().fetch_and_format().await {
            Ok(bills) => render_bills_page(BillsPage::Bills(&bills)),
            Err(e) => {
                warn!("Could not list bills: {}", e);
                render_bills_page(BillsPage::Error(&e.to_string()))
            }
        }
    }

    /// Render whatever page navigation asked for, if any.
    pub async fn render_pending(&self) -> Option<String> {
        match self.navigator.take()? {
            Route::Bills => Some(self.bills_page().await),
            route => Some(format!("Navigated to {}\n", route)),
        }
    }

    pub fn show_receipt(&self, url: &str) {
        self.bills_reader().handle_click_icon_eye(url);
    }

    /// Attach the optional receipt, then submit the form.
    pub async fn submit_new_bill(&self, form: &NewBillForm, receipt: Option<&Path>) -> Result<FormState> {
        let mut submitter = NewBillSubmitter::new(
            self.store.clone(),
            self.navigator.clone(),
            self.session.clone(),
            self.config.attachments.clone(),
        )
        .with_default_pct(self.config.default_pct);

        if let Some(path) = receipt {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Cannot read receipt {}", path.display()))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let mut input = FileInput::with_file(
                path.to_string_lossy().to_string(),
                SelectedFile {
                    name,
                    mime_type: crate::cli::Commands::guess_mime_type(path),
                    bytes,
                },
            );
            submitter.handle_change_file(&mut input).await?;
        }

        submitter.handle_submit(form).await?;
        Ok(submitter.state())
    }

    /// Store every bill of a JSON array, returning how many were saved.
    pub async fn import_bills(&self, json: &str) -> Result<usize> {
        let bills: Vec<BillRecord> = serde_json::from_str(json).context("Invalid bills JSON")?;
        for bill in &bills {
            self.store.bills().update(bill).await?;
        }
        info!("Imported {} bills", bills.len());
        Ok(bills.len())
    }
}
