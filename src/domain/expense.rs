//! Domain types produced by the expense form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Categories offered by the form when no configuration overrides them.
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Groceries",
    "Transport",
    "Utilities",
    "Entertainment",
    "Other",
];

/// How an expense was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMode {
    Card,
    Cash,
    #[serde(rename = "UPI")]
    Upi,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 3] = [PaymentMode::Card, PaymentMode::Cash, PaymentMode::Upi];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMode::Card => "Card",
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
        }
    }

    /// Display labels in presentation order.
    pub fn labels() -> Vec<String> {
        Self::ALL.iter().map(|mode| mode.label().to_string()).collect()
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown payment mode `{trimmed}`"))
    }
}

/// A validated expense handed to the submit callback.
///
/// The form never keeps a copy: once constructed, the value is moved into the
/// callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseInput {
    pub description: String,
    pub amount: f64,
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,
    pub category: String,
    pub payment_mode: PaymentMode,
}
