//! Form domain layer
//!
//! Schema-driven wizard sessions, their validation rules, and the plain
//! text inputs of the login screen.

mod input;
mod login_form;
mod session;
mod validation;
mod values;

pub use input::TextInput;
pub use login_form::LoginForm;
pub use session::{
    FormSession, NavButton, SessionError, StepOutcome, SubmitError, Submission,
};
pub use values::{FieldValue, FormValues};
