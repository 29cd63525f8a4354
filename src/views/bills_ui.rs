//! Bills list page

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::DisplayBillRecord;
use crate::views::error_page::{render_error_page, render_loading_page};

const TYPE_WIDTH: usize = 20;
const NAME_WIDTH: usize = 20;
const DATE_WIDTH: usize = 11;
const AMOUNT_WIDTH: usize = 10;
const STATUS_WIDTH: usize = 11;

/// What the bills page should show
#[derive(Debug, Clone, Copy)]
pub enum BillsPage<'a> {
    Loading,
    Error(&'a str),
    Bills(&'a [DisplayBillRecord]),
}

pub fn render_bills_page(page: BillsPage<'_>) -> String {
    match page {
        BillsPage::Loading => render_loading_page(),
        BillsPage::Error(message) => render_error_page(message),
        BillsPage::Bills(bills) => render_table(bills),
    }
}

/// Rows ordered by raw date, newest first.
pub fn display_order(bills: &[DisplayBillRecord]) -> Vec<&DisplayBillRecord> {
    let mut rows: Vec<&DisplayBillRecord> = bills.iter().collect();
    rows.sort_by(|a, b| b.raw_date.cmp(&a.raw_date));
    rows
}

fn render_table(bills: &[DisplayBillRecord]) -> String {
    let mut out = String::new();
    out.push_str("Mes notes de frais\n");
    out.push_str("[Nouvelle note de frais]\n\n");

    out.push_str(&row(["Type", "Nom", "Date", "Montant", "Statut"], "Actions"));
    out.push_str(&"-".repeat(TYPE_WIDTH + NAME_WIDTH + DATE_WIDTH + AMOUNT_WIDTH + STATUS_WIDTH + 15));
    out.push('\n');

    for bill in display_order(bills) {
        let amount = format_amount(bill.amount);
        let receipt = bill.file_url.as_deref().unwrap_or("-");
        out.push_str(&row(
            [&bill.bill_type, &bill.name, &bill.date, &amount, &bill.status],
            receipt,
        ));
    }
    out
}

fn row(cells: [&str; 5], actions: &str) -> String {
    let widths = [TYPE_WIDTH, NAME_WIDTH, DATE_WIDTH, AMOUNT_WIDTH, STATUS_WIDTH];
    let mut line = String::new();
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str(&fit_width(cell, width));
        line.push_str("  ");
    }
    line.push_str(actions);
    line.push('\n');
    line
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{} €", amount as i64)
    } else {
        format!("{:.2} €", amount)
    }
}

/// Pad or truncate to an exact display width (Unicode-aware)
fn fit_width(s: &str, max_width: usize) -> String {
    let display_width = s.width();
    if display_width <= max_width {
        let padding = max_width - display_width;
        format!("{}{}", s, " ".repeat(padding))
    } else {
        // Leave one column for the ellipsis
        let target_width = max_width.saturating_sub(1);
        let mut truncated = String::new();
        let mut current_width = 0;

        for ch in s.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if current_width + ch_width > target_width {
                break;
            }
            truncated.push(ch);
            current_width += ch_width;
        }

        let padding_needed = max_width.saturating_sub(current_width + 1);
        format!("{}…{}", truncated, " ".repeat(padding_needed))
    }
}
