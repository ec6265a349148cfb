//! Error types shared across the Impact workspace.

use std::error::Error;
use std::fmt;

use crate::id::{ColliderId, FrameId};

/// Errors that abort a contact step.
///
/// A failed step leaves the registry exactly as the update pass left it;
/// there is no retry or rollback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The frame counter cannot advance any further.
    FrameOverflow {
        /// The last frame that was stepped.
        last: FrameId,
    },
    /// A manifold named a collider the side table does not know, and the
    /// world is configured to treat that as fatal.
    UnknownCollider {
        /// The unresolved user index.
        id: ColliderId,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrameOverflow { last } => {
                write!(f, "frame counter overflow after frame {last}")
            }
            Self::UnknownCollider { id } => {
                write!(f, "manifold references unregistered collider {id}")
            }
        }
    }
}

impl Error for StepError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_collider() {
        let e = StepError::UnknownCollider { id: ColliderId(9) };
        assert_eq!(e.to_string(), "manifold references unregistered collider 9");
    }

    #[test]
    fn display_names_the_frame() {
        let e = StepError::FrameOverflow {
            last: FrameId(u64::MAX),
        };
        assert!(e.to_string().contains(&u64::MAX.to_string()));
    }
}
