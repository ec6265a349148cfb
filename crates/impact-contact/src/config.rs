//! Contact world configuration.

use crate::error::ContactError;

/// How narrow-phase coordinates map onto scene coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Handedness {
    /// The narrow phase's x axis points the other way: negate the x
    /// component of every normal and position when copying contacts.
    #[default]
    MirrorX,
    /// Copy contact geometry unchanged.
    Native,
}

/// Configuration for a [`ContactWorld`](crate::ContactWorld).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactConfig {
    /// Coordinate conversion applied to contact normals and positions.
    pub handedness: Handedness,
    /// Contact records reserved in the pool up front. Default: 64.
    pub contact_capacity: usize,
    /// Collision records reserved in the registry up front. Default: 32.
    pub record_capacity: usize,
    /// Abort the step when a manifold names an unregistered collider,
    /// instead of skipping that manifold. Default: `false`.
    pub strict_manifolds: bool,
}

impl ContactConfig {
    /// Handles index records with `u32`, so capacities must fit.
    const MAX_CAPACITY: usize = u32::MAX as usize;

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.contact_capacity > Self::MAX_CAPACITY {
            return Err(ContactError::InvalidConfig {
                reason: format!(
                    "contact_capacity {} exceeds {}",
                    self.contact_capacity,
                    Self::MAX_CAPACITY
                ),
            });
        }
        if self.record_capacity > Self::MAX_CAPACITY {
            return Err(ContactError::InvalidConfig {
                reason: format!(
                    "record_capacity {} exceeds {}",
                    self.record_capacity,
                    Self::MAX_CAPACITY
                ),
            });
        }
        Ok(())
    }
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            handedness: Handedness::MirrorX,
            contact_capacity: 64,
            record_capacity: 32,
            strict_manifolds: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_mirrors_x_and_is_valid() {
        let config = ContactConfig::default();
        assert_eq!(config.handedness, Handedness::MirrorX);
        assert!(!config.strict_manifolds);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn oversized_capacity_rejected() {
        let config = ContactConfig {
            contact_capacity: u32::MAX as usize + 1,
            ..ContactConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ContactError::InvalidConfig { .. })
        ));
    }
}
