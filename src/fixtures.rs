//! Bills shared by the unit tests

use crate::models::{BillRecord, BillStatus};

pub(crate) fn bills() -> Vec<BillRecord> {
    vec![
        BillRecord {
            id: "47qAXb6fIm2zOKkLzMro".to_string(),
            email: "a@a".to_string(),
            bill_type: "Hôtel et logement".to_string(),
            name: "encore".to_string(),
            amount: 400.0,
            date: "2004-04-04".to_string(),
            status: BillStatus::Pending,
            commentary: Some("séminaire billed".to_string()),
            comment_admin: Some("ok".to_string()),
            file_url: Some("https://localhost:3456/images/preview-facture-free-201801-pdf-1.jpg".to_string()),
            file_name: Some("preview-facture-free-201801-pdf-1.jpg".to_string()),
            vat: Some("80".to_string()),
            pct: 20,
        },
        BillRecord {
            id: "BeKy5Mo4jkmdfPGYpTxZ".to_string(),
            email: "a@a".to_string(),
            bill_type: "Transports".to_string(),
            name: "test1".to_string(),
            amount: 100.0,
            date: "2001-01-01".to_string(),
            status: BillStatus::Refused,
            commentary: Some("plop".to_string()),
            comment_admin: Some("en fait non".to_string()),
            file_url: Some("https://localhost:3456/images/1592770761.jpeg".to_string()),
            file_name: Some("1592770761.jpeg".to_string()),
            vat: Some(String::new()),
            pct: 20,
        },
        BillRecord {
            id: "UIUZtnPQvnbFnB0ozvJh".to_string(),
            email: "a@a".to_string(),
            bill_type: "Services en ligne".to_string(),
            name: "test3".to_string(),
            amount: 300.0,
            date: "2003-03-03".to_string(),
            status: BillStatus::Accepted,
            commentary: None,
            comment_admin: Some("bon bah d'accord".to_string()),
            file_url: Some("https://localhost:3456/images/facture-client-php-exemple.jpg".to_string()),
            file_name: Some("facture-client-php-exemple.jpg".to_string()),
            vat: Some(String::new()),
            pct: 20,
        },
        BillRecord {
            id: "qcCK3SzECmaZAGRrHjaC".to_string(),
            email: "a@a".to_string(),
            bill_type: "Restaurants et bars".to_string(),
            name: "test2".to_string(),
            amount: 200.0,
            date: "2002-02-02".to_string(),
            status: BillStatus::Refused,
            commentary: Some("test2".to_string()),
            comment_admin: Some("pas la bonne facture".to_string()),
            file_url: Some("https://localhost:3456/images/test.jpg".to_string()),
            file_name: Some("preview-facture-free-201801-pdf-1.jpg".to_string()),
            vat: Some("40".to_string()),
            pct: 20,
        },
    ]
}
