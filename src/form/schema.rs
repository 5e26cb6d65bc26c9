//! Declarative field schema for the expense form.
//!
//! A [`FormDescriptor`] lists the fields in presentation order; each
//! [`FieldDescriptor`] carries the validator that turns raw input into a
//! normalized value or a [`ValidationError`]. Validation is a pure function of
//! the raw values, so the form state only has to store strings.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::FormConfig;
use crate::domain::PaymentMode;

/// Field keys used by the expense form.
pub mod fields {
    pub const DESCRIPTION: &str = "description";
    pub const AMOUNT: &str = "amount";
    pub const DATE: &str = "date";
    pub const CATEGORY: &str = "category";
    pub const PAYMENT_MODE: &str = "paymentMode";
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Classifies why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorKind {
    Required,
    InvalidType,
    NotPositive,
    InvalidDate,
    NotInList,
}

impl ErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::InvalidType => "invalid-type",
            ErrorKind::NotPositive => "not-positive",
            ErrorKind::InvalidDate => "invalid-date",
            ErrorKind::NotInList => "not-in-list",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Error mapping keyed by field, at most one entry per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, ValidationError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &'static str, error: ValidationError) {
        self.0.insert(key, error);
    }

    pub fn remove(&mut self, key: &str) -> Option<ValidationError> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&ValidationError> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ValidationError)> {
        self.0.iter().map(|(key, err)| (*key, err))
    }
}

/// Supported data kinds for form fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Decimal,
    Date,
    Choice(Vec<String>),
}

/// Built-in validation rules. Each carries the message shown when the field is
/// missing or malformed.
#[derive(Debug, Clone)]
pub enum Validator {
    /// Non-blank text; the trimmed value is kept.
    NonEmpty { required: &'static str },
    /// Finite number strictly greater than zero.
    PositiveNumber {
        invalid: &'static str,
        not_positive: &'static str,
    },
    /// Non-empty `YYYY-MM-DD` calendar date.
    Date { required: &'static str },
    /// Closed list, matched case-insensitively and normalized to the listed spelling.
    OneOf {
        options: Vec<String>,
        required: &'static str,
        label: &'static str,
    },
}

impl Validator {
    pub fn validate(&self, input: &str) -> Result<String, ValidationError> {
        let trimmed = input.trim();
        match self {
            Validator::NonEmpty { required } => {
                if trimmed.is_empty() {
                    Err(ValidationError::new(ErrorKind::Required, *required))
                } else {
                    Ok(trimmed.to_string())
                }
            }
            Validator::PositiveNumber {
                invalid,
                not_positive,
            } => {
                let value = trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| ValidationError::new(ErrorKind::InvalidType, *invalid))?;
                if value > 0.0 {
                    Ok(value.to_string())
                } else {
                    Err(ValidationError::new(ErrorKind::NotPositive, *not_positive))
                }
            }
            Validator::Date { required } => {
                if trimmed.is_empty() {
                    return Err(ValidationError::new(ErrorKind::Required, *required));
                }
                NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
                    .map(|date| date.format(DATE_FORMAT).to_string())
                    .map_err(|_| {
                        ValidationError::new(ErrorKind::InvalidDate, "Use YYYY-MM-DD format")
                    })
            }
            Validator::OneOf {
                options,
                required,
                label,
            } => {
                if trimmed.is_empty() {
                    return Err(ValidationError::new(ErrorKind::Required, *required));
                }
                let normalized = trimmed.to_lowercase();
                options
                    .iter()
                    .find(|candidate| candidate.to_lowercase() == normalized)
                    .cloned()
                    .ok_or_else(|| {
                        ValidationError::new(
                            ErrorKind::NotInList,
                            format!("{} must be one of: {}", label, options.join(", ")),
                        )
                    })
            }
        }
    }
}

/// Declarative description of a single form field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: String,
    pub kind: FieldKind,
    pub placeholder: Option<&'static str>,
    pub validator: Validator,
}

impl FieldDescriptor {
    pub fn new(
        key: &'static str,
        label: impl Into<String>,
        kind: FieldKind,
        validator: Validator,
    ) -> Self {
        Self {
            key,
            label: label.into(),
            kind,
            placeholder: None,
            validator,
        }
    }

    pub fn with_placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn options(&self) -> Option<&[String]> {
        match &self.kind {
            FieldKind::Choice(options) => Some(options),
            _ => None,
        }
    }
}

/// Metadata describing a full form, including field order.
#[derive(Debug, Clone)]
pub struct FormDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub submit_label: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

impl FormDescriptor {
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Validates every field; absent keys are treated as empty input.
    pub fn validate(
        &self,
        values: &BTreeMap<String, String>,
    ) -> Result<BTreeMap<String, String>, FieldErrors> {
        let mut normalized = BTreeMap::new();
        let mut errors = FieldErrors::new();
        for field in &self.fields {
            let raw = values.get(field.key).map(String::as_str).unwrap_or("");
            match field.validator.validate(raw) {
                Ok(value) => {
                    normalized.insert(field.key.to_string(), value);
                }
                Err(err) => errors.insert(field.key, err),
            }
        }
        if errors.is_empty() {
            Ok(normalized)
        } else {
            Err(errors)
        }
    }
}

/// Builds the expense schema from the active configuration.
pub fn expense_descriptor(config: &FormConfig) -> FormDescriptor {
    let categories: Vec<String> = config
        .categories
        .iter()
        .map(|c| c.trim().to_string())
        .collect();
    let payment_modes = PaymentMode::labels();

    let fields = vec![
        FieldDescriptor::new(
            fields::DESCRIPTION,
            "Description",
            FieldKind::Text,
            Validator::NonEmpty {
                required: "Description is required",
            },
        )
        .with_placeholder("e.g. Weekly Groceries"),
        FieldDescriptor::new(
            fields::AMOUNT,
            format!("Amount ({})", config.currency_symbol.trim()),
            FieldKind::Decimal,
            Validator::PositiveNumber {
                invalid: "Enter a valid amount",
                not_positive: "Amount must be greater than 0",
            },
        )
        .with_placeholder("0.00"),
        FieldDescriptor::new(
            fields::DATE,
            "Date",
            FieldKind::Date,
            Validator::Date {
                required: "Pick a date",
            },
        )
        .with_placeholder("YYYY-MM-DD"),
        FieldDescriptor::new(
            fields::CATEGORY,
            "Category",
            FieldKind::Choice(categories.clone()),
            Validator::OneOf {
                options: categories,
                required: "Select a category",
                label: "Category",
            },
        )
        .with_placeholder("Select a category"),
        FieldDescriptor::new(
            fields::PAYMENT_MODE,
            "Payment mode",
            FieldKind::Choice(payment_modes.clone()),
            Validator::OneOf {
                options: payment_modes,
                required: "Select a payment mode",
                label: "Payment mode",
            },
        )
        .with_placeholder("Select payment mode"),
    ];

    FormDescriptor {
        name: "expense",
        title: "Add New Expense",
        submit_label: "Save Expense",
        fields,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn amount_validator() -> Validator {
        expense_descriptor(&FormConfig::default())
            .field(fields::AMOUNT)
            .unwrap()
            .validator
            .clone()
    }

    #[test]
    fn amount_rejects_non_numeric_and_non_positive() {
        let validator = amount_validator();
        for input in ["", "abc", "NaN", "inf"] {
            let err = validator.validate(input).unwrap_err();
            assert_eq!(err.kind, ErrorKind::InvalidType, "input {input:?}");
            assert_eq!(err.message, "Enter a valid amount");
        }
        for input in ["0", "-5", "-0.01"] {
            let err = validator.validate(input).unwrap_err();
            assert_eq!(err.kind, ErrorKind::NotPositive, "input {input:?}");
            assert_eq!(err.message, "Amount must be greater than 0");
        }
        assert_eq!(validator.validate(" 4.50 ").unwrap(), "4.5");
    }

    #[test]
    fn date_requires_calendar_date() {
        let validator = Validator::Date {
            required: "Pick a date",
        };
        assert_eq!(
            validator.validate("").unwrap_err().kind,
            ErrorKind::Required
        );
        assert_eq!(
            validator.validate("2024-02-30").unwrap_err().kind,
            ErrorKind::InvalidDate
        );
        assert_eq!(validator.validate("2024-01-05").unwrap(), "2024-01-05");
    }

    #[test]
    fn choice_normalizes_to_listed_spelling() {
        let descriptor = expense_descriptor(&FormConfig::default());
        let payment = &descriptor.field(fields::PAYMENT_MODE).unwrap().validator;
        assert_eq!(payment.validate("upi").unwrap(), "UPI");
        let err = payment.validate("Cheque").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotInList);
        assert_eq!(err.message, "Payment mode must be one of: Card, Cash, UPI");

        let category = &descriptor.field(fields::CATEGORY).unwrap().validator;
        assert_eq!(category.validate(" groceries").unwrap(), "Groceries");
        assert_eq!(
            category.validate("").unwrap_err().message,
            "Select a category"
        );
    }

    #[test]
    fn descriptor_reports_one_error_per_invalid_field() {
        let descriptor = expense_descriptor(&FormConfig::default());
        let errors = descriptor
            .validate(&values(&[
                ("description", "  "),
                ("amount", "0"),
                ("date", ""),
                ("category", ""),
            ]))
            .unwrap_err();

        assert_eq!(errors.len(), 5);
        assert_eq!(
            errors.get(fields::DESCRIPTION).unwrap().message,
            "Description is required"
        );
        assert_eq!(errors.get(fields::AMOUNT).unwrap().kind, ErrorKind::NotPositive);
        assert_eq!(errors.get(fields::DATE).unwrap().message, "Pick a date");
        assert_eq!(
            errors.get(fields::PAYMENT_MODE).unwrap().message,
            "Select a payment mode"
        );
    }

    #[test]
    fn amount_label_uses_configured_currency() {
        let config = FormConfig {
            currency_symbol: "₹".into(),
            ..FormConfig::default()
        };
        let descriptor = expense_descriptor(&config);
        assert_eq!(descriptor.field(fields::AMOUNT).unwrap().label, "Amount (₹)");
    }
}
