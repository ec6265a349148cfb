//! Contact-world error types.

use std::error::Error;
use std::fmt;

use impact_core::ColliderId;

/// Errors from configuring a contact world or registering colliders.
///
/// Step-time failures use [`impact_core::StepError`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactError {
    /// The contact configuration failed validation.
    InvalidConfig {
        /// Description of the violated constraint.
        reason: String,
    },
    /// The collider is not registered (never was, or has been destroyed).
    UnknownCollider {
        /// The id that failed to resolve.
        id: ColliderId,
    },
    /// Every collider id has been handed out.
    IdsExhausted,
}

impl fmt::Display for ContactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid contact config: {reason}"),
            Self::UnknownCollider { id } => write!(f, "unknown collider {id}"),
            Self::IdsExhausted => write!(f, "collider id space exhausted"),
        }
    }
}

impl Error for ContactError {}
