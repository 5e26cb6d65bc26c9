//! Field state and submit lifecycle of the expense form.

use std::collections::BTreeMap;
use std::fmt;

use crate::config::FormConfig;
use crate::domain::{ExpenseInput, PaymentMode};
use crate::errors::FormError;
use crate::form::schema::{expense_descriptor, fields, FieldErrors, FormDescriptor};

type SubmitCallback = Box<dyn FnMut(ExpenseInput)>;

/// Where the form is in its edit/submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Validating,
    /// The last submit reached the callback and the fields were cleared.
    Submitted,
    /// The last submit failed validation; field values are untouched.
    Rejected,
}

/// Result of a single submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Submitted,
    Rejected(FieldErrors),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted)
    }
}

/// Expense entry form: raw field values, the current error mapping, and an
/// optional callback that receives every successfully validated expense.
pub struct ExpenseForm {
    descriptor: FormDescriptor,
    values: BTreeMap<String, String>,
    errors: FieldErrors,
    phase: FormPhase,
    submit_count: usize,
    on_submit: Option<SubmitCallback>,
}

impl ExpenseForm {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            descriptor: expense_descriptor(config),
            values: BTreeMap::new(),
            errors: FieldErrors::new(),
            phase: FormPhase::Editing,
            submit_count: 0,
            on_submit: None,
        }
    }

    pub fn with_on_submit(mut self, callback: impl FnMut(ExpenseInput) + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn descriptor(&self) -> &FormDescriptor {
        &self.descriptor
    }

    /// Stores a raw value for `key`.
    ///
    /// After a rejected submit the edited field is validated again so its
    /// inline error tracks the correction.
    pub fn set_field(&mut self, key: &str, value: impl Into<String>) -> Result<(), FormError> {
        let field = self
            .descriptor
            .field(key)
            .ok_or_else(|| FormError::UnknownField(key.to_string()))?;
        let field_key = field.key;
        let value = value.into();

        if self.submit_count > 0 {
            match field.validator.validate(&value) {
                Ok(_) => {
                    self.errors.remove(field_key);
                }
                Err(err) => self.errors.insert(field_key, err),
            }
        }

        tracing::debug!(field = field_key, "field updated");
        self.values.insert(field_key.to_string(), value);
        self.phase = FormPhase::Editing;
        Ok(())
    }

    /// Current raw value; unset fields read as empty.
    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Number of submit attempts since construction or the last reset.
    pub fn submit_count(&self) -> usize {
        self.submit_count
    }

    /// Validates the current values without touching form state.
    ///
    /// The inner result carries the user-facing outcome: the expense, or one
    /// error per invalid field. The outer `Err` is reserved for a normalized
    /// value that fails to convert into [`ExpenseInput`].
    pub fn validate(&self) -> Result<Result<ExpenseInput, FieldErrors>, FormError> {
        match self.descriptor.validate(&self.values) {
            Ok(normalized) => build_expense(&normalized).map(Ok),
            Err(errors) => Ok(Err(errors)),
        }
    }

    /// Validates and, when every field passes, hands the expense to the
    /// callback and clears the form.
    pub fn submit(&mut self) -> Result<SubmitOutcome, FormError> {
        let _span = tracing::debug_span!("submit", form = self.descriptor.name).entered();
        self.phase = FormPhase::Validating;
        self.submit_count += 1;

        match self.validate()? {
            Ok(expense) => {
                tracing::info!(
                    category = %expense.category,
                    payment_mode = %expense.payment_mode,
                    "expense submitted"
                );
                if let Some(callback) = self.on_submit.as_mut() {
                    callback(expense);
                }
                self.reset();
                self.phase = FormPhase::Submitted;
                Ok(SubmitOutcome::Submitted)
            }
            Err(errors) => {
                tracing::warn!(
                    invalid = errors.len(),
                    fields = ?errors.keys().collect::<Vec<_>>(),
                    "expense rejected"
                );
                self.errors = errors.clone();
                self.phase = FormPhase::Rejected;
                Ok(SubmitOutcome::Rejected(errors))
            }
        }
    }

    /// Clears every field and error back to the empty defaults.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.submit_count = 0;
        self.phase = FormPhase::Editing;
    }
}

impl fmt::Debug for ExpenseForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpenseForm")
            .field("values", &self.values)
            .field("errors", &self.errors)
            .field("phase", &self.phase)
            .field("submit_count", &self.submit_count)
            .field("has_callback", &self.on_submit.is_some())
            .finish()
    }
}

fn build_expense(values: &BTreeMap<String, String>) -> Result<ExpenseInput, FormError> {
    let text = |key: &str| -> Result<String, FormError> {
        values
            .get(key)
            .cloned()
            .ok_or_else(|| FormError::Commit(format!("missing `{key}`")))
    };

    let amount = text(fields::AMOUNT)?
        .parse::<f64>()
        .map_err(|err| FormError::Commit(format!("amount: {err}")))?;
    let payment_mode = text(fields::PAYMENT_MODE)?
        .parse::<PaymentMode>()
        .map_err(FormError::Commit)?;

    Ok(ExpenseInput {
        description: text(fields::DESCRIPTION)?,
        amount,
        date: text(fields::DATE)?,
        category: text(fields::CATEGORY)?,
        payment_mode,
    })
}
