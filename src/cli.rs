use clap::{Parser, Subcommand};
use chrono::NaiveDate;
use std::path::PathBuf;
use crate::models::NewBillForm;

#[derive(Parser)]
#[command(name = "billed")]
#[command(about = "List your expense reports and submit new bills with their receipts")]
#[command(version)]
pub struct Cli {
    /// Database file path (overrides BILLED_DB_PATH)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Session file holding the signed-in user (overrides BILLED_SESSION_PATH)
    #[arg(short, long, global = true)]
    pub session: Option<PathBuf>,

    /// Directory for uploaded receipts (overrides BILLED_ATTACHMENTS_DIR)
    #[arg(short, long, global = true)]
    pub attachments: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show my bills, newest first
    Bills,

    /// Submit a new bill
    New {
        /// Expense category, e.g. "Transports"
        #[arg(short = 't', long = "type")]
        expense_type: String,

        /// Short description of the expense
        #[arg(short, long, default_value = "")]
        name: String,

        /// Expense date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,

        /// Amount including taxes
        #[arg(long)]
        amount: String,

        /// VAT amount
        #[arg(long, default_value = "")]
        vat: String,

        /// VAT percentage (defaults to BILLED_DEFAULT_PCT)
        #[arg(long, default_value = "")]
        pct: String,

        /// Free-text commentary
        #[arg(short, long, default_value = "")]
        commentary: String,

        /// Receipt image to attach
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Preview a bill's receipt
    Show {
        /// Receipt URL as listed by `billed bills`
        url: String,
    },

    /// Import bills from a JSON array into the local store
    Import {
        /// JSON file containing bill records
        file: PathBuf,
    },

    /// Store the signed-in employee in the session file
    Login {
        /// Employee email
        email: String,
    },
}

impl Commands {
    pub fn new_bill_form(&self) -> Option<NewBillForm> {
        match self {
            Commands::New {
                expense_type,
                name,
                date,
                amount,
                vat,
                pct,
                commentary,
                ..
            } => Some(NewBillForm {
                expense_type: expense_type.clone(),
                name: name.clone(),
                date: date.format("%Y-%m-%d").to_string(),
                amount: amount.clone(),
                vat: vat.clone(),
                pct: pct.clone(),
                commentary: commentary.clone(),
            }),
            _ => None,
        }
    }

    /// MIME type guessed from a receipt's extension.
    pub fn guess_mime_type(path: &std::path::Path) -> String {
        match path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .as_deref()
        {
            Some("jpg") => "image/jpg".to_string(),
            Some("jpeg") => "image/jpeg".to_string(),
            Some("png") => "image/png".to_string(),
            Some("gif") => "image/gif".to_string(),
            Some("pdf") => "application/pdf".to_string(),
            _ => String::new(),
        }
    }
}
