#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use expense_form::{config::FormConfig, domain::ExpenseInput, form::ExpenseForm};

/// Form wired to a callback that records every submitted expense.
pub fn recording_form() -> (ExpenseForm, Rc<RefCell<Vec<ExpenseInput>>>) {
    let received = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&received);
    let form = ExpenseForm::new(&FormConfig::default())
        .with_on_submit(move |expense| sink.borrow_mut().push(expense));
    (form, received)
}

pub fn fill(form: &mut ExpenseForm, entries: &[(&str, &str)]) {
    for (key, value) in entries {
        form.set_field(key, *value).expect("known field");
    }
}

pub const COFFEE: [(&str, &str); 5] = [
    ("description", "Coffee"),
    ("amount", "4.50"),
    ("date", "2024-01-05"),
    ("category", "Groceries"),
    ("paymentMode", "Cash"),
];
