use thiserror::Error;
use validator::ValidationErrors;

use crate::state::{
    form::{FormError, PlayType},
    game::StoreError,
    state_machine::InvalidTransition,
};

/// Errors raised by tracker operations.
///
/// Server refusals and transport failures are not errors: they are reported to the operator
/// through notifications and surface as outcome variants.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The operation needs an open form and none is open.
    #[error("no play form is open")]
    NoOpenForm,
    /// A submission named a different type than the open form.
    #[error("open form is `{open}`, cannot submit `{requested}`")]
    FormTypeMismatch { open: PlayType, requested: PlayType },
    /// Editing the open form failed.
    #[error(transparent)]
    Form(#[from] FormError),
    /// Operation cannot be performed in the current phase.
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Seed data failed validation.
    #[error("invalid seed data: {0}")]
    Seed(#[from] ValidationErrors),
}
