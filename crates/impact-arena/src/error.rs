//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use impact_core::UnitId;

/// Errors that can occur during transform arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// Every unit is full and `max_units` forbids growing another one.
    CapacityExceeded {
        /// Units currently allocated.
        units: u32,
        /// Configured unit limit.
        max_units: u32,
    },
    /// The arena configuration failed validation.
    InvalidConfig {
        /// Description of the violated constraint.
        reason: String,
    },
    /// A view names a unit or slot this arena never allocated.
    ForeignView {
        /// Unit named by the view.
        unit: UnitId,
        /// Slot index named by the view.
        index: u32,
    },
    /// A slot was released while not on the using list (double release).
    NotLive {
        /// Unit containing the slot.
        unit: UnitId,
        /// Slot index within the unit.
        index: u32,
    },
    /// The free/using partition of a unit is broken.
    CorruptedLists {
        /// The unit that failed the check.
        unit: UnitId,
        /// What the check found.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { units, max_units } => {
                write!(
                    f,
                    "transform arena capacity exceeded: {units} units allocated, limit {max_units}"
                )
            }
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
            Self::ForeignView { unit, index } => {
                write!(f, "slot view (unit {unit}, index {index}) does not belong to this arena")
            }
            Self::NotLive { unit, index } => {
                write!(f, "slot (unit {unit}, index {index}) is not in use")
            }
            Self::CorruptedLists { unit, reason } => {
                write!(f, "unit {unit} link lists corrupted: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
