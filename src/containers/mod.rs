//! Page logic behind the bills list and the new-bill form

pub mod bills;
pub mod new_bill;

pub use bills::BillsReader;
pub use new_bill::{FormState, NewBillSubmitter};
