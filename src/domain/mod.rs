pub mod expense;

pub use expense::{ExpenseInput, PaymentMode, DEFAULT_CATEGORIES};
