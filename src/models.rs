use serde::{Deserialize, Serialize};

/// An expense record as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub id: String,
    /// Email of the employee who submitted the bill
    pub email: String,
    /// Expense category label, e.g. "Transports"
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub amount: f64,
    /// Raw ISO date as entered; compared as a string for ordering
    pub date: String,
    pub status: BillStatus,
    #[serde(default)]
    pub commentary: Option<String>,
    /// Remark left by the administrator who reviewed the bill
    #[serde(default)]
    pub comment_admin: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    /// VAT amount exactly as typed in the form
    #[serde(default)]
    pub vat: Option<String>,
    pub pct: u32,
}

/// Review status of a bill. Unknown values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
    Other(String),
}

impl BillStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
            BillStatus::Other(s) => s,
        }
    }
}

impl From<String> for BillStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => BillStatus::Pending,
            "accepted" => BillStatus::Accepted,
            "refused" => BillStatus::Refused,
            _ => BillStatus::Other(s),
        }
    }
}

impl From<&str> for BillStatus {
    fn from(s: &str) -> Self {
        BillStatus::from(s.to_string())
    }
}

impl From<BillStatus> for String {
    fn from(status: BillStatus) -> Self {
        status.as_str().to_string()
    }
}

/// A bill ready for display: `date` and `status` hold human-readable text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayBillRecord {
    pub id: String,
    pub email: String,
    #[serde(rename = "type")]
    pub bill_type: String,
    pub name: String,
    pub amount: f64,
    /// Formatted date, or the raw date when it could not be parsed
    pub date: String,
    /// Unformatted date, used to order rows
    #[serde(skip)]
    pub raw_date: String,
    pub status: String,
    pub commentary: Option<String>,
    pub comment_admin: Option<String>,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
    pub vat: Option<String>,
    pub pct: u32,
}

impl DisplayBillRecord {
    pub fn new(bill: BillRecord, date: String, status: String) -> Self {
        Self {
            id: bill.id,
            email: bill.email,
            bill_type: bill.bill_type,
            name: bill.name,
            amount: bill.amount,
            date,
            raw_date: bill.date,
            status,
            commentary: bill.commentary,
            comment_admin: bill.comment_admin,
            file_url: bill.file_url,
            file_name: bill.file_name,
            vat: bill.vat,
            pct: bill.pct,
        }
    }
}

/// Raw values of the new-bill form inputs, as the user typed them.
#[derive(Debug, Clone, Default)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// Validated form values, not yet stamped with id, email or status.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBillDraft {
    pub bill_type: String,
    pub name: String,
    pub date: String,
    pub amount: f64,
    pub vat: Option<String>,
    pub pct: u32,
    pub commentary: Option<String>,
}

/// A file picked in the form's file input.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// State of the form's file input.
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    /// Path reported by the input, e.g. `C:\fakepath\receipt.jpg`
    pub value: String,
    pub file: Option<SelectedFile>,
}

impl FileInput {
    pub fn with_file(value: impl Into<String>, file: SelectedFile) -> Self {
        Self {
            value: value.into(),
            file: Some(file),
        }
    }

    /// Last segment of the reported path.
    pub fn file_name(&self) -> &str {
        self.value
            .rsplit(|c| c == '\\' || c == '/')
            .next()
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.file = None;
    }

    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.value.is_empty()
    }
}

/// Payload sent to the file collection.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// Email of the uploader
    pub email: String,
}

/// What the file collection returns for an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub file_url: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
}
