pub mod render;
pub mod schema;
pub mod state;

pub use render::FormRenderer;
pub use schema::{
    expense_descriptor, fields, ErrorKind, FieldDescriptor, FieldErrors, FieldKind,
    FormDescriptor, ValidationError, Validator,
};
pub use state::{ExpenseForm, FormPhase, SubmitOutcome};
