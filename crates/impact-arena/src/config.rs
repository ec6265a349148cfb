//! Transform arena configuration parameters.

use crate::error::ArenaError;
use crate::node::NODE_STRIDE_WORDS;

/// Configuration for the transform arena.
///
/// Validated at construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Number of transform slots carved out of each unit.
    ///
    /// Default: 128. Must be at least 1, and a unit's word count
    /// (`nodes_per_unit * NODE_STRIDE_WORDS`) must fit in a `u32`.
    pub nodes_per_unit: u32,

    /// Upper bound on the number of units, or `None` for unbounded growth.
    ///
    /// When the bound is hit, [`acquire`](crate::TransformArena::acquire)
    /// fails with [`ArenaError::CapacityExceeded`].
    pub max_units: Option<u32>,

    /// Units allocated up front at construction. Default: 1.
    pub initial_units: u32,
}

impl ArenaConfig {
    /// Default slots per unit.
    pub const DEFAULT_NODES_PER_UNIT: u32 = 128;

    /// Create a config with the given unit size and default limits.
    pub fn new(nodes_per_unit: u32) -> Self {
        Self {
            nodes_per_unit,
            max_units: None,
            initial_units: 1,
        }
    }

    /// Total `u32` words in one unit.
    pub fn unit_words(&self) -> usize {
        self.nodes_per_unit as usize * NODE_STRIDE_WORDS
    }

    /// Size of one unit in bytes.
    pub fn unit_bytes(&self) -> usize {
        self.unit_words() * std::mem::size_of::<u32>()
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.nodes_per_unit == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "nodes_per_unit must be at least 1".into(),
            });
        }
        // Slot indices use u32::MAX as the end-of-list marker, and raw word
        // offsets must stay addressable as u32.
        if u32::try_from(self.unit_words()).is_err() {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "nodes_per_unit {} overflows the u32 word offset range",
                    self.nodes_per_unit
                ),
            });
        }
        if self.initial_units == 0 {
            return Err(ArenaError::InvalidConfig {
                reason: "initial_units must be at least 1".into(),
            });
        }
        if let Some(max) = self.max_units {
            if self.initial_units > max {
                return Err(ArenaError::InvalidConfig {
                    reason: format!(
                        "initial_units ({}) exceeds max_units ({max})",
                        self.initial_units
                    ),
                });
            }
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NODES_PER_UNIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_128_nodes_unbounded() {
        let config = ArenaConfig::default();
        assert_eq!(config.nodes_per_unit, 128);
        assert_eq!(config.max_units, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unit_bytes_uses_stride() {
        let config = ArenaConfig::new(128);
        assert_eq!(config.unit_bytes(), 128 * 45 * 4);
    }

    #[test]
    fn zero_nodes_rejected() {
        let config = ArenaConfig::new(0);
        assert!(matches!(
            config.validate(),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn oversized_unit_rejected() {
        let config = ArenaConfig::new(u32::MAX / 2);
        assert!(matches!(
            config.validate(),
            Err(ArenaError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn initial_units_bounded_by_max() {
        let config = ArenaConfig {
            max_units: Some(2),
            initial_units: 3,
            ..ArenaConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ArenaConfig {
            initial_units: 0,
            ..ArenaConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
