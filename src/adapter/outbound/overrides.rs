//! Config-driven token corrections applied after enrichment.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::Address;
use serde::Deserialize;

use crate::domain::{Token, TokenMetadata};
use crate::port::outbound::TokenMetadataHook;

/// Corrections for one token. Unset fields leave the enriched value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TokenOverride {
    pub address: Address,
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
}

/// Token hook backed by a fixed list of [`TokenOverride`]s.
#[derive(Debug, Clone, Default)]
pub struct TokenOverrides {
    by_address: Arc<HashMap<Address, TokenOverride>>,
}

impl TokenOverrides {
    /// Later entries for the same address win.
    pub fn new(overrides: impl IntoIterator<Item = TokenOverride>) -> Self {
        Self {
            by_address: Arc::new(overrides.into_iter().map(|o| (o.address, o)).collect()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_address.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_address.is_empty()
    }
}

impl TokenMetadataHook for TokenOverrides {
    fn fill(&self, token: &mut Token) {
        let Some(o) = self.by_address.get(&token.address) else {
            return;
        };

        if let Some(name) = &o.name {
            token.name.clone_from(name);
        }
        if let Some(symbol) = &o.symbol {
            token.symbol.clone_from(symbol);
        }
        if let Some(icon) = &o.icon {
            token.icon = Some(icon.clone());
        }
        if o.description.is_some() || o.website.is_some() {
            let address = token.address;
            let metadata = token.metadata.get_or_insert_with(|| TokenMetadata {
                address,
                ..TokenMetadata::default()
            });
            if let Some(description) = &o.description {
                metadata.description.clone_from(description);
            }
            if o.website.is_some() {
                metadata.website.clone_from(&o.website);
            }
        }
    }
}
