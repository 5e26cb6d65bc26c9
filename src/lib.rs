#![doc(test(attr(deny(warnings))))]

//! Expense Form offers a schema-validated expense entry form: field state,
//! per-field validation with inline error text, and a submit callback that
//! receives the captured [`domain::ExpenseInput`].

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod form;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense form tracing initialized.");
    });
}
