//! The form tree state engine and its wizard shell.

pub mod changes;
pub mod error;
pub mod state;
pub mod validation;
pub mod wizard;

pub use changes::{Change, ChangeKind, ChangeLog};
pub use error::{EngineError, IncompleteSubmission};
pub use state::FormEngine;
pub use wizard::{Wizard, WizardTab};
