//! Token enrichment and balance joins.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::Address;
use futures_util::future::try_join_all;
use tracing::{debug, info};

use crate::domain::{Balance, CallOverrides, Token, TokenDataSource, NATIVE_ASSET_ADDRESS};
use crate::error::{IntegrityError, Result};

use super::cache_gate::CacheGate;
use super::services::VaultServices;

/// Builds merged token records and joins balances onto them.
pub struct TokenEnricher {
    services: Arc<VaultServices>,
    cache: CacheGate<Token>,
}

impl TokenEnricher {
    pub fn new(services: Arc<VaultServices>) -> Self {
        let cache = CacheGate::new(services.caches.tokens.clone(), services.cache_key("tokens"));
        Self { services, cache }
    }

    /// Every vault underlying token, enriched with icon, price, metadata,
    /// and alias.
    pub async fn tokens(&self, overrides: Option<&CallOverrides>) -> Result<Vec<Token>> {
        if let Some(cached) = self.cache.fetch(None).await? {
            return Ok(cached);
        }

        let services = &self.services;
        let addresses = services.lens.tokens(overrides).await?;

        let mut icon_addresses = addresses.clone();
        icon_addresses.push(NATIVE_ASSET_ADDRESS);

        let (icons, descriptors, metadata) = tokio::try_join!(
            services.assets.icons(&icon_addresses),
            services.helper.tokens(&addresses, overrides),
            services.meta.token_metadata(&addresses),
        )?;

        let (prices, aliases) = tokio::try_join!(
            try_join_all(
                descriptors
                    .iter()
                    .map(|d| services.oracle.price_usdc(d.address, overrides)),
            ),
            try_join_all(descriptors.iter().map(|d| services.assets.alias(d.address))),
        )?;

        let tokens: Vec<Token> = descriptors
            .into_iter()
            .zip(prices)
            .zip(aliases)
            .map(|((descriptor, price), alias)| {
                let mut token = Token::from_erc20(descriptor);
                if let Some(alias) = alias {
                    token.name = alias.name;
                    token.symbol = alias.symbol;
                }
                token.icon = icons.get(&token.address).cloned();
                token.price_usdc = price;
                token.data_source = TokenDataSource::Vaults;
                token.supported.vaults = true;
                token.metadata = metadata.iter().find(|m| m.address == token.address).cloned();
                services.token_hook.fill(&mut token);
                token
            })
            .collect();
        info!(count = tokens.len(), "Enriched tokens");

        if overrides.is_none() {
            self.cache.fill(&tokens).await;
        }
        Ok(tokens)
    }

    /// Balances of `account` for every enriched token, each joined to its
    /// token record.
    pub async fn balances(
        &self,
        account: Address,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Balance>> {
        let tokens = self.tokens(overrides).await?;
        let addresses: Vec<Address> = tokens.iter().map(|t| t.address).collect();
        let raw = self
            .services
            .helper
            .token_balances(account, &addresses, overrides)
            .await?;
        debug!(%account, count = raw.len(), "Fetched raw balances");

        let by_address: HashMap<Address, &Token> =
            tokens.iter().map(|t| (t.address, t)).collect();
        raw.into_iter()
            .map(|balance| -> Result<Balance> {
                let token = by_address
                    .get(&balance.address)
                    .map(|t| (*t).clone())
                    .ok_or(IntegrityError::TokenMissing {
                        address: balance.address,
                    })?;
                Ok(Balance::new(balance, token))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::overrides::{TokenOverride, TokenOverrides};
    use crate::domain::{TokenAlias, TokenMetadata};
    use crate::testkit::domain::{addr, erc20, token_balance};
    use crate::testkit::mocks::MockSet;
    use alloy_primitives::U256;
    use std::collections::BTreeMap;

    fn enricher(mocks: &MockSet) -> TokenEnricher {
        TokenEnricher::new(Arc::new(mocks.services()))
    }

    fn seed_tokens(mocks: &MockSet) {
        mocks.lens.set_tokens(vec![addr(1), addr(2)]);
        mocks
            .helper
            .set_descriptors(vec![erc20(addr(1), "DAI"), erc20(addr(2), "USDC")]);
    }

    #[tokio::test]
    async fn tokens_requests_icons_with_native_sentinel() {
        let mocks = MockSet::new();
        seed_tokens(&mocks);

        enricher(&mocks).tokens(None).await.unwrap();

        assert_eq!(
            mocks.assets.icons_calls.calls(),
            vec![vec![addr(1), addr(2), NATIVE_ASSET_ADDRESS]]
        );
        assert_eq!(mocks.helper.token_calls.calls(), vec![vec![addr(1), addr(2)]]);
    }

    #[tokio::test]
    async fn tokens_merges_price_icon_alias_and_metadata() {
        let mocks = MockSet::new();
        seed_tokens(&mocks);
        mocks.oracle.set_price(addr(1), U256::from(1_000_000u64));
        mocks.assets.set_icon(addr(1), "dai.png");
        mocks.assets.set_alias(TokenAlias {
            address: addr(2),
            name: "USD Coin".to_string(),
            symbol: "USDC.e".to_string(),
        });
        mocks.meta.set_token_metadata(vec![TokenMetadata {
            address: addr(1),
            description: "Stablecoin".to_string(),
            website: None,
            localization: BTreeMap::new(),
        }]);

        let tokens = enricher(&mocks).tokens(None).await.unwrap();

        assert_eq!(tokens.len(), 2);
        let dai = &tokens[0];
        assert_eq!(dai.price_usdc, U256::from(1_000_000u64));
        assert_eq!(dai.icon.as_deref(), Some("dai.png"));
        assert_eq!(dai.data_source, TokenDataSource::Vaults);
        assert!(dai.supported.vaults);
        assert_eq!(dai.metadata.as_ref().unwrap().description, "Stablecoin");

        let usdc = &tokens[1];
        assert_eq!(usdc.symbol, "USDC.e");
        assert_eq!(usdc.name, "USD Coin");
        assert!(usdc.icon.is_none());
        assert!(usdc.metadata.is_none());
    }

    #[tokio::test]
    async fn tokens_runs_override_hook_last() {
        let mocks = MockSet::new().with_token_overrides(TokenOverrides::new(vec![TokenOverride {
            address: addr(1),
            symbol: Some("xDAI".to_string()),
            ..TokenOverride::default()
        }]));
        seed_tokens(&mocks);
        mocks.assets.set_alias(TokenAlias {
            address: addr(1),
            name: "Dai".to_string(),
            symbol: "DAI2".to_string(),
        });

        let tokens = enricher(&mocks).tokens(None).await.unwrap();

        assert_eq!(tokens[0].symbol, "xDAI");
        assert_eq!(tokens[0].name, "Dai");
    }

    #[tokio::test]
    async fn tokens_served_from_cache_skip_upstream() {
        let mocks = MockSet::new().with_memory_cache();
        seed_tokens(&mocks);
        let enricher = enricher(&mocks);

        let first = enricher.tokens(None).await.unwrap();
        let second = enricher.tokens(None).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(mocks.lens.token_calls.count(), 1);
        assert_eq!(mocks.oracle.calls.count(), 2);
    }

    #[tokio::test]
    async fn balances_join_tokens_by_address() {
        let mocks = MockSet::new();
        seed_tokens(&mocks);
        mocks
            .helper
            .set_balances(vec![token_balance(addr(2), 7), token_balance(addr(1), 3)]);

        let balances = enricher(&mocks).balances(addr(50), None).await.unwrap();

        assert_eq!(balances.len(), 2);
        assert_eq!(balances[0].token.symbol, "USDC");
        assert_eq!(balances[0].balance, U256::from(7u64));
        assert_eq!(balances[1].token.symbol, "DAI");
        assert_eq!(
            mocks.helper.balance_calls.calls(),
            vec![(addr(50), vec![addr(1), addr(2)])]
        );
    }

    #[tokio::test]
    async fn balance_without_token_is_integrity_fault() {
        let mocks = MockSet::new();
        seed_tokens(&mocks);
        mocks.helper.set_balances(vec![token_balance(addr(1), 3), token_balance(addr(9), 1)]);

        let err = enricher(&mocks).balances(addr(50), None).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("Token does not exist for Balance({})", addr(9))
        );
    }
}
