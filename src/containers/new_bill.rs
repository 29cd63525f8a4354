use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::AttachmentPolicy;
use crate::errors::{AttachmentError, FormError};
use crate::models::{BillRecord, BillStatus, FileInput, FileUpload, NewBillDraft, NewBillForm};
use crate::routes::{Navigator, Route};
use crate::session::SessionContext;
use crate::store::Store;

/// Where a new-bill form session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Empty,
    FileAttaching,
    FileAttached,
    FileRejected,
    Submitting,
    /// The store accepted the bill and the list page was requested.
    Submitted,
    /// The store rejected the bill; the form can be submitted again.
    SubmitFailed,
}

#[derive(Debug, Clone)]
struct Attachment {
    key: String,
    file_url: String,
    file_name: String,
}

/// New-bill form: uploads the receipt, then submits the bill.
pub struct NewBillSubmitter {
    store: Arc<dyn Store>,
    navigator: Arc<dyn Navigator>,
    session: SessionContext,
    policy: AttachmentPolicy,
    default_pct: u32,
    state: FormState,
    attachment: Option<Attachment>,
}

impl NewBillSubmitter {
    pub fn new(
        store: Arc<dyn Store>,
        navigator: Arc<dyn Navigator>,
        session: SessionContext,
        policy: AttachmentPolicy,
    ) -> Self {
        Self {
            store,
            navigator,
            session,
            policy,
            default_pct: 20,
            state: FormState::Empty,
            attachment: None,
        }
    }

    pub fn with_default_pct(mut self, default_pct: u32) -> Self {
        self.default_pct = default_pct;
        self
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn file_url(&self) -> Option<&str> {
        self.attachment.as_ref().map(|a| a.file_url.as_str())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.attachment.as_ref().map(|a| a.file_name.as_str())
    }

    /// Key returned by the file upload; the submitted bill is stored under it.
    pub fn bill_id(&self) -> Option<&str> {
        self.attachment.as_ref().map(|a| a.key.as_str())
    }

    /// Validate the picked receipt and upload it.
    ///
    /// A file of an unaccepted type clears the input and is never sent to the
    /// store. Upload failures are logged. Both drop any earlier attachment
    /// and leave the form open.
    pub async fn handle_change_file(&mut self, input: &mut FileInput) -> Result<(), AttachmentError> {
        let Some(file) = input.file.clone() else {
            return Err(AttachmentError::NoFile);
        };
        let file_name = match input.file_name() {
            "" => file.name.clone(),
            name => name.to_string(),
        };

        if !self.policy.accepts(&file_name, &file.mime_type) {
            warn!("Rejected receipt {} ({})", file_name, file.mime_type);
            input.clear();
            self.attachment = None;
            self.state = FormState::FileRejected;
            return Err(AttachmentError::UnsupportedType {
                file_name,
                mime_type: file.mime_type,
                accepted: self.policy.describe(),
            });
        }

        self.state = FormState::FileAttaching;
        let upload = FileUpload {
            file_name: file_name.clone(),
            mime_type: file.mime_type,
            bytes: file.bytes,
            email: self.session.email().to_string(),
        };

        match self.store.files().create(upload).await {
            Ok(stored) => {
                info!("Uploaded receipt {} as {}", file_name, stored.key);
                self.attachment = Some(Attachment {
                    key: stored.key,
                    file_url: stored.file_url,
                    file_name,
                });
                self.state = FormState::FileAttached;
                Ok(())
            }
            Err(e) => {
                error!("Receipt upload failed: {}", e);
                self.attachment = None;
                self.state = FormState::FileRejected;
                Err(e.into())
            }
        }
    }

    /// Collect the form, stamp it as a pending bill and submit it.
    ///
    /// Only invalid form values are reported; the outcome of the store call
    /// is visible through [`state`](Self::state) and navigation.
    pub async fn handle_submit(&mut self, form: &NewBillForm) -> Result<(), FormError> {
        let draft = self.collect_draft(form)?;
        let bill = self.assemble(draft);
        self.update_bill(bill).await;
        Ok(())
    }

    /// Send the bill to the store; navigate to the list on success.
    pub async fn update_bill(&mut self, bill: BillRecord) {
        self.state = FormState::Submitting;
        match self.store.bills().update(&bill).await {
            Ok(saved) => {
                info!("Submitted bill {} for {}", saved.id, saved.email);
                self.state = FormState::Submitted;
                self.navigator.on_navigate(Route::Bills);
            }
            Err(e) => {
                error!("Failed to submit bill {}: {}", bill.id, e);
                self.state = FormState::SubmitFailed;
            }
        }
    }

    pub fn collect_draft(&self, form: &NewBillForm) -> Result<NewBillDraft, FormError> {
        let bill_type = form.expense_type.trim();
        if bill_type.is_empty() {
            return Err(FormError::MissingField("type"));
        }

        let date = form.date.trim();
        if date.is_empty() {
            return Err(FormError::MissingField("date"));
        }
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| FormError::InvalidDate(date.to_string()))?;

        let amount = form.amount.trim();
        if amount.is_empty() {
            return Err(FormError::MissingField("amount"));
        }
        let amount: f64 = amount
            .parse()
            .ok()
            .filter(|a: &f64| a.is_finite() && *a >= 0.0)
            .ok_or_else(|| FormError::InvalidAmount(amount.to_string()))?;

        let pct = form.pct.trim().parse().unwrap_or(self.default_pct);

        Ok(NewBillDraft {
            bill_type: bill_type.to_string(),
            name: form.name.trim().to_string(),
            date: date.to_string(),
            amount,
            vat: non_empty(&form.vat),
            pct,
            commentary: non_empty(&form.commentary),
        })
    }

    fn assemble(&self, draft: NewBillDraft) -> BillRecord {
        let id = self
            .bill_id()
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        BillRecord {
            id,
            email: self.session.email().to_string(),
            bill_type: draft.bill_type,
            name: draft.name,
            amount: draft.amount,
            date: draft.date,
            status: BillStatus::Pending,
            commentary: draft.commentary,
            comment_admin: None,
            file_url: self.file_url().map(str::to_string),
            file_name: self.file_name().map(str::to_string),
            vat: draft.vat,
            pct: draft.pct,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectedFile;
    use crate::routes::testing::RecordingNavigator;
    use crate::store::MemoryStore;

    fn submitter(store: Arc<MemoryStore>) -> (NewBillSubmitter, Arc<RecordingNavigator>) {
        let navigator = Arc::new(RecordingNavigator::default());
        let submitter = NewBillSubmitter::new(
            store,
            navigator.clone(),
            SessionContext::employee("yusin@yusin"),
            AttachmentPolicy::default(),
        );
        (submitter, navigator)
    }

    fn filled_form() -> NewBillForm {
        NewBillForm {
            expense_type: "Transports".to_string(),
            name: "Vol Paris-Bordeaux".to_string(),
            date: "2023-04-01".to_string(),
            amount: "42".to_string(),
            vat: "18".to_string(),
            pct: "20".to_string(),
            commentary: "test bill".to_string(),
        }
    }

    fn file_input(name: &str, mime_type: &str) -> FileInput {
        FileInput::with_file(
            format!("C:\\fakepath\\{}", name),
            SelectedFile {
                name: name.to_string(),
                mime_type: mime_type.to_string(),
                bytes: b"test".to_vec(),
            },
        )
    }

    #[tokio::test]
    async fn test_submit_creates_pending_bill_and_navigates() {
        let store = Arc::new(MemoryStore::new());
        let (mut submitter, navigator) = submitter(store.clone());

        submitter.handle_submit(&filled_form()).await.unwrap();

        let updates = store.updates();
        assert_eq!(updates.len(), 1);
        let bill = &updates[0];
        assert_eq!(bill.bill_type, "Transports");
        assert_eq!(bill.name, "Vol Paris-Bordeaux");
        assert_eq!(bill.date, "2023-04-01");
        assert_eq!(bill.amount, 42.0);
        assert_eq!(bill.vat.as_deref(), Some("18"));
        assert_eq!(bill.pct, 20);
        assert_eq!(bill.commentary.as_deref(), Some("test bill"));
        assert_eq!(bill.status, BillStatus::Pending);
        assert_eq!(bill.email, "yusin@yusin");

        assert_eq!(navigator.routes(), vec![Route::Bills]);
        assert_eq!(submitter.state(), FormState::Submitted);
    }

    #[tokio::test]
    async fn test_accepted_upload_is_sent_once_and_attached_to_bill() {
        let store = Arc::new(MemoryStore::new());
        let (mut submitter, _) = submitter(store.clone());
        let mut input = file_input("test.jpg", "image/jpg");

        submitter.handle_change_file(&mut input).await.unwrap();

        assert_eq!(store.create_calls(), 1);
        assert_eq!(submitter.state(), FormState::FileAttached);
        assert_eq!(submitter.file_name(), Some("test.jpg"));
        assert_eq!(submitter.file_url(), Some("https://localhost:3456/images/test.jpg"));
        let key = submitter.bill_id().unwrap().to_string();
        assert_eq!(store.file(&key).unwrap().email, "yusin@yusin");

        submitter.handle_submit(&filled_form()).await.unwrap();
        let bill = &store.updates()[0];
        assert_eq!(bill.id, key);
        assert_eq!(bill.file_name.as_deref(), Some("test.jpg"));
        assert_eq!(bill.file_url.as_deref(), Some("https://localhost:3456/images/test.jpg"));
    }

    #[tokio::test]
    async fn test_rejected_upload_resets_input_without_store_call() {
        let store = Arc::new(MemoryStore::new());
        let (mut submitter, navigator) = submitter(store.clone());
        let mut input = file_input("invoice.pdf", "application/pdf");

        let err = submitter.handle_change_file(&mut input).await.unwrap_err();

        assert!(matches!(err, AttachmentError::UnsupportedType { .. }));
        assert_eq!(store.create_calls(), 0);
        assert!(input.is_empty());
        assert_eq!(submitter.state(), FormState::FileRejected);
        assert!(navigator.routes().is_empty());

        // The form stays usable after a rejected file
        let mut input = file_input("receipt.png", "image/png");
        submitter.handle_change_file(&mut input).await.unwrap();
        assert_eq!(store.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_failed_submission_is_logged_not_raised() {
        let store = Arc::new(MemoryStore::new());
        store.fail_next_update(500);
        let (mut submitter, navigator) = submitter(store.clone());

        submitter.handle_submit(&filled_form()).await.unwrap();
        assert_eq!(submitter.state(), FormState::SubmitFailed);
        assert!(navigator.routes().is_empty());

        submitter.handle_submit(&filled_form()).await.unwrap();
        assert_eq!(submitter.state(), FormState::Submitted);
        assert_eq!(navigator.routes(), vec![Route::Bills]);
        assert_eq!(store.updates().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_submitted() {
        let store = Arc::new(MemoryStore::new());
        let (mut submitter, _) = submitter(store.clone());

        let form = NewBillForm { amount: "abc".to_string(), ..filled_form() };
        assert_eq!(
            submitter.handle_submit(&form).await,
            Err(FormError::InvalidAmount("abc".to_string()))
        );

        let form = NewBillForm { date: "01/04/2023".to_string(), ..filled_form() };
        assert_eq!(
            submitter.handle_submit(&form).await,
            Err(FormError::InvalidDate("01/04/2023".to_string()))
        );

        let form = NewBillForm { expense_type: String::new(), ..filled_form() };
        assert_eq!(submitter.handle_submit(&form).await, Err(FormError::MissingField("type")));

        assert!(store.updates().is_empty());
        assert_eq!(submitter.state(), FormState::Empty);
    }

    #[test]
    fn test_draft_defaults() {
        let (submitter, _) = submitter(Arc::new(MemoryStore::new()));
        let form = NewBillForm {
            pct: String::new(),
            vat: "  ".to_string(),
            commentary: String::new(),
            ..filled_form()
        };

        let draft = submitter.collect_draft(&form).unwrap();
        assert_eq!(draft.pct, 20);
        assert_eq!(draft.vat, None);
        assert_eq!(draft.commentary, None);

        let submitter = submitter.with_default_pct(10);
        assert_eq!(submitter.collect_draft(&form).unwrap().pct, 10);
    }

    #[tokio::test]
    async fn test_failed_upload_drops_earlier_attachment() {
        let store = Arc::new(MemoryStore::new());
        let (mut submitter, _) = submitter(store.clone());

        let mut input = file_input("first.png", "image/png");
        submitter.handle_change_file(&mut input).await.unwrap();
        assert_eq!(submitter.file_name(), Some("first.png"));

        store.fail_next_create(500);
        let mut input = file_input("second.png", "image/png");
        let err = submitter.handle_change_file(&mut input).await.unwrap_err();

        assert!(matches!(err, AttachmentError::Upload(_)));
        assert_eq!(err.to_string(), "Upload failed: Erreur 500");
        assert_eq!(submitter.state(), FormState::FileRejected);
        assert_eq!(submitter.file_name(), None);
        assert_eq!(submitter.file_url(), None);
        assert_eq!(submitter.bill_id(), None);

        submitter.handle_submit(&filled_form()).await.unwrap();
        let bill = &store.updates()[0];
        assert_eq!(bill.file_name, None);
        assert_eq!(bill.file_url, None);
        assert_eq!(submitter.state(), FormState::Submitted);
    }
}
