//! Registry of external jar vaults.
//!
//! Deposits into a jar always go through the PICKLE zap, whatever token the
//! caller supplies.

use std::collections::HashSet;

use alloy_primitives::{address, Address};

/// Jar vaults known at build time.
pub const PICKLE_JARS: &[Address] = &[
    // yvBOOST-ETH SLP jar
    address!("CeD67a187b923F0E5ebcc77C7f2F7da20099e378"),
];

/// Membership set of jar vault addresses.
#[derive(Debug, Clone)]
pub struct JarRegistry {
    jars: HashSet<Address>,
}

impl JarRegistry {
    /// Build a registry from an explicit list of jars.
    pub fn new(jars: impl IntoIterator<Item = Address>) -> Self {
        Self {
            jars: jars.into_iter().collect(),
        }
    }

    /// Registry with no jars.
    #[must_use]
    pub fn empty() -> Self {
        Self::new([])
    }

    #[must_use]
    pub fn contains(&self, vault: Address) -> bool {
        self.jars.contains(&vault)
    }
}

impl Default for JarRegistry {
    fn default() -> Self {
        Self::new(PICKLE_JARS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_contains_known_jars() {
        let registry = JarRegistry::default();
        for jar in PICKLE_JARS {
            assert!(registry.contains(*jar));
        }
        assert!(!registry.contains(Address::ZERO));
    }

    #[test]
    fn empty_registry_contains_nothing() {
        assert!(!JarRegistry::empty().contains(PICKLE_JARS[0]));
    }
}
