//! Single-active-capability state machine
//!
//! The ship has three subsystems and power for one. Whatever is active is the
//! only thing the rest of the simulation is allowed to actuate.

use serde::{Deserialize, Serialize};

use super::state::Capability;

/// Owns which capability is currently powered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SubsystemController {
    active: Capability,
}

impl SubsystemController {
    pub fn new(initial: Capability) -> Self {
        Self { active: initial }
    }

    /// Power `capability`, cutting the other two. Returns true if this changed anything.
    pub fn set_active(&mut self, capability: Capability) -> bool {
        if self.active == capability {
            return false;
        }
        log::debug!("Subsystem switch: {} -> {}", self.active.as_str(), capability.as_str());
        self.active = capability;
        true
    }

    #[inline]
    pub fn is_active(&self, capability: Capability) -> bool {
        self.active == capability
    }

    #[inline]
    pub fn active(&self) -> Capability {
        self.active
    }
}
