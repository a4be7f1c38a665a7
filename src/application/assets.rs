//! Vault aggregation: static and dynamic lens records merged with off-chain
//! metadata into a single vault view.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use alloy_primitives::Address;
use futures_util::future::try_join_all;
use tracing::{debug, info};

use crate::domain::{
    Apy, ApyMap, CallOverrides, Vault, VaultDynamic, VaultMetadata, VaultMetadataOverrides,
    VaultStatic, FALLBACK_DISPLAY_NAME, NATIVE_ASSET_ADDRESS,
};
use crate::error::{IntegrityError, Result};

use super::cache_gate::CacheGate;
use super::services::VaultServices;

/// APY type tag attached when an override supplies the only APY figure.
const APY_OVERRIDE_TYPE: &str = "override";

/// Off-chain metadata resolved once per `get_dynamic` call.
struct MetadataContext {
    overrides: HashMap<Address, VaultMetadataOverrides>,
    /// Vaults some zap backend supports; `None` when the caller supplied
    /// overrides and no network lookup was made.
    zap_supported: Option<HashSet<Address>>,
}

/// Builds merged vault records.
pub struct AssetAggregator {
    services: Arc<VaultServices>,
    vaults: CacheGate<Vault>,
    dynamic: CacheGate<VaultDynamic>,
}

impl AssetAggregator {
    pub fn new(services: Arc<VaultServices>) -> Self {
        let vaults = CacheGate::new(services.caches.vaults.clone(), services.cache_key("get"));
        let dynamic = CacheGate::new(
            services.caches.dynamic.clone(),
            services.cache_key("get-dynamic"),
        );
        Self {
            services,
            vaults,
            dynamic,
        }
    }

    /// Static vault records, straight from the lens.
    pub async fn get_static(
        &self,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultStatic>> {
        self.services.lens.assets_static(addresses, overrides).await
    }

    /// Dynamic vault records enriched with icons, display names, APY, and
    /// metadata overrides.
    ///
    /// With `metadata_overrides` supplied, the metadata service is not
    /// consulted.
    pub async fn get_dynamic(
        &self,
        addresses: Option<&[Address]>,
        metadata_overrides: Option<&[VaultMetadataOverrides]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultDynamic>> {
        if let Some(cached) = self.dynamic.fetch(addresses).await? {
            return Ok(cached);
        }

        let context = self.metadata_context(metadata_overrides).await?;
        let assets = self.services.lens.assets_dynamic(addresses, overrides).await?;
        let asset_addresses: Vec<Address> = assets.iter().map(|a| a.address).collect();
        let apys = self.services.vision.apy(&asset_addresses).await?;

        let enriched = try_join_all(
            assets
                .into_iter()
                .map(|asset| self.enrich_dynamic(asset, &context, &apys)),
        )
        .await?;
        debug!(count = enriched.len(), "Enriched dynamic assets");

        if addresses.is_none() && metadata_overrides.is_none() && overrides.is_none() {
            self.dynamic.fill(&enriched).await;
        }
        Ok(enriched)
    }

    /// Merged vault records.
    ///
    /// Every static record must have a dynamic counterpart.
    pub async fn get(
        &self,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Vault>> {
        if let Some(cached) = self.vaults.fetch(addresses).await? {
            return Ok(cached);
        }

        let (statics, dynamics) = tokio::try_join!(
            self.get_static(addresses, overrides),
            self.get_dynamic(addresses, None, overrides),
        )?;

        let vault_addresses: Vec<Address> = statics.iter().map(|s| s.address).collect();
        let (strategies, earnings) = tokio::try_join!(
            self.services
                .strategies
                .vaults_strategies_metadata(&vault_addresses),
            self.services
                .earnings
                .assets_historic_earnings(&vault_addresses),
        )?;

        let dynamics: HashMap<Address, VaultDynamic> =
            dynamics.into_iter().map(|d| (d.address, d)).collect();

        let mut vaults = Vec::with_capacity(statics.len());
        for vault_static in statics {
            let address = vault_static.address;
            let dynamic = dynamics
                .get(&address)
                .cloned()
                .ok_or(IntegrityError::DynamicAssetMissing { address })?;

            let decimals = vault_static.decimals;
            let mut vault = Vault::merge(vault_static, dynamic);
            vault.metadata.historic_earnings = earnings
                .iter()
                .find(|e| e.asset_address == address)
                .map(|e| e.scaled_to(decimals));
            vault.metadata.strategies = strategies
                .iter()
                .find(|s| s.vault_address == address)
                .cloned();
            vaults.push(vault);
        }
        info!(count = vaults.len(), "Aggregated vaults");

        if addresses.is_none() && overrides.is_none() {
            self.vaults.fill(&vaults).await;
        }
        Ok(vaults)
    }

    async fn metadata_context(
        &self,
        metadata_overrides: Option<&[VaultMetadataOverrides]>,
    ) -> Result<MetadataContext> {
        if let Some(explicit) = metadata_overrides {
            return Ok(MetadataContext {
                overrides: index_overrides(explicit.iter().cloned()),
                zap_supported: None,
            });
        }

        let (overrides, zap_supported) = tokio::try_join!(
            self.services.meta.vault_overrides(),
            self.zap_supported_vaults(),
        )?;
        Ok(MetadataContext {
            overrides: index_overrides(overrides),
            zap_supported: Some(zap_supported),
        })
    }

    async fn zap_supported_vaults(&self) -> Result<HashSet<Address>> {
        let sets = try_join_all(
            self.services
                .zaps
                .iter()
                .map(|zap| zap.supported_vault_addresses()),
        )
        .await?;
        Ok(sets.into_iter().flatten().collect())
    }

    async fn enrich_dynamic(
        &self,
        mut asset: VaultDynamic,
        context: &MetadataContext,
        apys: &ApyMap,
    ) -> Result<VaultDynamic> {
        let assets = &self.services.assets;

        if asset.token_id == self.services.chain_id.wrapped_native() {
            asset.metadata.display_icon = assets.icon(NATIVE_ASSET_ADDRESS).await?;
        } else {
            let (icon, alias) = tokio::try_join!(
                assets.icon(asset.address),
                assets.alias(asset.address),
            )?;
            asset.metadata.display_icon = icon;
            if asset.metadata.display_name.is_empty() {
                asset.metadata.display_name = alias
                    .map_or_else(|| FALLBACK_DISPLAY_NAME.to_string(), |alias| alias.symbol);
            }
            asset.metadata.default_display_token = asset.token_id;
        }

        asset.metadata.apy = apys.get(&asset.address).cloned();

        if let Some(supported) = &context.zap_supported {
            let allowed = supported.contains(&asset.address);
            asset.metadata.allow_zap_in = allowed;
            asset.metadata.allow_zap_out = allowed;
        }
        if let Some(overrides) = context.overrides.get(&asset.address) {
            apply_overrides(&mut asset.metadata, overrides);
        }
        Ok(asset)
    }
}

fn index_overrides(
    overrides: impl IntoIterator<Item = VaultMetadataOverrides>,
) -> HashMap<Address, VaultMetadataOverrides> {
    overrides.into_iter().map(|o| (o.address, o)).collect()
}

fn apply_overrides(metadata: &mut VaultMetadata, overrides: &VaultMetadataOverrides) {
    if overrides.hide_always {
        metadata.hide_if_no_deposits = true;
    }
    if let Some(disabled) = overrides.deposits_disabled {
        metadata.deposits_disabled = disabled;
    }
    if let Some(disabled) = overrides.withdrawals_disabled {
        metadata.withdrawals_disabled = disabled;
    }
    if let Some(allow) = overrides.allow_zap_in {
        metadata.allow_zap_in = allow;
    }
    if let Some(allow) = overrides.allow_zap_out {
        metadata.allow_zap_out = allow;
    }
    if let Some(name) = &overrides.display_name {
        metadata.display_name.clone_from(name);
    }
    if let Some(address) = overrides.migration_contract_address {
        metadata.migration_contract_address = Some(address);
    }
    if let Some(target) = overrides.migration_target_vault {
        metadata.migration_target_vault = Some(target);
        metadata.migration_available = true;
        metadata.latest_vault_address = target;
    }
    if overrides.vault_name_override.is_some() {
        metadata.vault_name_override.clone_from(&overrides.vault_name_override);
    }
    if overrides.vault_symbol_override.is_some() {
        metadata
            .vault_symbol_override
            .clone_from(&overrides.vault_symbol_override);
    }
    if let Some(net_apy) = overrides.apy_override {
        let apy = metadata.apy.get_or_insert_with(|| Apy {
            type_id: APY_OVERRIDE_TYPE.to_string(),
            ..Apy::default()
        });
        apy.net_apy = net_apy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChainId, TokenAlias};
    use crate::testkit::domain::{
        addr, historic_earnings, vault_dynamic, vault_dynamic_unnamed, vault_static,
    };
    use crate::testkit::mocks::MockSet;
    use alloy_primitives::U256;
    use rust_decimal_macros::dec;

    fn aggregator(mocks: &MockSet) -> AssetAggregator {
        AssetAggregator::new(Arc::new(mocks.services()))
    }

    #[tokio::test]
    async fn get_static_passes_lens_result_through() {
        let mocks = MockSet::new();
        let records = vec![vault_static(addr(1), addr(10)), vault_static(addr(2), addr(20))];
        mocks.lens.set_statics(records.clone());

        let result = aggregator(&mocks).get_static(None, None).await.unwrap();

        assert_eq!(result, records);
        assert_eq!(mocks.lens.static_calls.calls(), vec![None]);
    }

    #[tokio::test]
    async fn get_dynamic_with_explicit_overrides_skips_meta_service() {
        let mocks = MockSet::new();
        mocks.lens.set_dynamics(vec![vault_dynamic(addr(1), addr(10))]);
        let mut overrides = VaultMetadataOverrides::for_vault(addr(1));
        overrides.deposits_disabled = Some(true);

        let result = aggregator(&mocks)
            .get_dynamic(None, Some(&[overrides]), None)
            .await
            .unwrap();

        assert_eq!(mocks.meta.override_calls.count(), 0);
        assert_eq!(mocks.zap().supported_calls.count(), 0);
        assert!(result[0].metadata.deposits_disabled);
    }

    #[tokio::test]
    async fn get_dynamic_without_overrides_fetches_meta_and_zap_support() {
        let mocks = MockSet::new();
        mocks.lens.set_dynamics(vec![
            vault_dynamic(addr(1), addr(10)),
            vault_dynamic(addr(2), addr(20)),
        ]);
        mocks.zap().support(addr(2));

        let result = aggregator(&mocks).get_dynamic(None, None, None).await.unwrap();

        assert_eq!(mocks.meta.override_calls.count(), 1);
        assert_eq!(mocks.zap().supported_calls.count(), 1);
        assert!(!result[0].metadata.allow_zap_in);
        assert!(result[1].metadata.allow_zap_in);
        assert!(result[1].metadata.allow_zap_out);
    }

    #[tokio::test]
    async fn wrapped_native_vault_uses_native_icon() {
        let mocks = MockSet::new();
        let weth = ChainId::Mainnet.wrapped_native();
        mocks.lens.set_dynamics(vec![vault_dynamic(addr(1), weth)]);
        mocks.assets.set_icon(NATIVE_ASSET_ADDRESS, "eth.png");

        let result = aggregator(&mocks).get_dynamic(None, None, None).await.unwrap();

        assert_eq!(mocks.assets.icon_calls.calls(), vec![NATIVE_ASSET_ADDRESS]);
        assert_eq!(
            result[0].metadata.display_icon.get(&NATIVE_ASSET_ADDRESS),
            Some(&"eth.png".to_string())
        );
        assert_eq!(mocks.assets.alias_calls.count(), 0);
        assert_eq!(result[0].metadata.display_name, "Vault Metadata");
    }

    #[tokio::test]
    async fn other_vault_uses_own_icon_and_token() {
        let mocks = MockSet::new();
        mocks.lens.set_dynamics(vec![vault_dynamic(addr(1), addr(10))]);
        mocks.assets.set_icon(addr(1), "vault.png");
        mocks.assets.set_alias(TokenAlias {
            address: addr(1),
            name: "Aliased".into(),
            symbol: "ALS".into(),
        });

        let result = aggregator(&mocks).get_dynamic(None, None, None).await.unwrap();

        assert_eq!(mocks.assets.icon_calls.calls(), vec![addr(1)]);
        assert_eq!(mocks.assets.alias_calls.calls(), vec![addr(1)]);
        assert_eq!(result[0].metadata.display_icon.len(), 1);
        assert_eq!(result[0].metadata.default_display_token, addr(10));
        assert_eq!(result[0].metadata.display_name, "Vault Metadata");
    }

    #[tokio::test]
    async fn blank_display_name_falls_back_to_alias_then_label() {
        let mocks = MockSet::new();
        mocks.lens.set_dynamics(vec![
            vault_dynamic_unnamed(addr(1), addr(10)),
            vault_dynamic_unnamed(addr(2), addr(20)),
        ]);
        mocks.assets.set_alias(TokenAlias {
            address: addr(1),
            name: "Alias Name".to_string(),
            symbol: "ALIAS".to_string(),
        });

        let result = aggregator(&mocks).get_dynamic(None, None, None).await.unwrap();

        assert_eq!(result[0].metadata.display_name, "ALIAS");
        assert_eq!(result[1].metadata.display_name, FALLBACK_DISPLAY_NAME);
    }

    #[tokio::test]
    async fn apy_override_replaces_net_apy() {
        let mocks = MockSet::new();
        mocks.lens.set_dynamics(vec![vault_dynamic(addr(1), addr(10))]);
        mocks.vision.set_apys(ApyMap::from([(
            addr(1),
            Apy {
                type_id: "v2:averaged".to_string(),
                gross_apr: dec!(0.12),
                net_apy: dec!(0.10),
            },
        )]));
        let mut overrides = VaultMetadataOverrides::for_vault(addr(1));
        overrides.apy_override = Some(dec!(0.25));
        mocks.meta.set_overrides(vec![overrides]);

        let result = aggregator(&mocks).get_dynamic(None, None, None).await.unwrap();

        let apy = result[0].metadata.apy.as_ref().unwrap();
        assert_eq!(apy.net_apy, dec!(0.25));
        assert_eq!(apy.gross_apr, dec!(0.12));
    }

    #[test]
    fn migration_override_points_at_target() {
        let mut metadata = VaultMetadata::default();
        let mut overrides = VaultMetadataOverrides::for_vault(addr(1));
        overrides.migration_target_vault = Some(addr(7));
        overrides.hide_always = true;

        apply_overrides(&mut metadata, &overrides);

        assert!(metadata.migration_available);
        assert_eq!(metadata.latest_vault_address, addr(7));
        assert!(metadata.hide_if_no_deposits);
    }

    #[tokio::test]
    async fn get_merges_static_dynamic_earnings_and_strategies() {
        let mocks = MockSet::new();
        mocks.lens.set_statics(vec![vault_static(addr(1), addr(10))]);
        mocks.lens.set_dynamics(vec![vault_dynamic(addr(1), addr(10))]);
        mocks.earnings.set_historic(vec![historic_earnings(addr(1), 6, 5)]);

        let vaults = aggregator(&mocks).get(None, None).await.unwrap();

        assert_eq!(vaults.len(), 1);
        let vault = &vaults[0];
        assert_eq!(vault.token, addr(10));
        assert_eq!(vault.decimals, 18);
        let earnings = vault.metadata.historic_earnings.as_ref().unwrap();
        assert_eq!(earnings[0].earnings.amount, U256::from(5_000_000_000_000u64));
        assert!(vault.metadata.strategies.is_none());
    }

    #[tokio::test]
    async fn get_fails_when_dynamic_counterpart_missing() {
        let mocks = MockSet::new();
        mocks.lens.set_statics(vec![
            vault_static(addr(1), addr(10)),
            vault_static(addr(2), addr(20)),
        ]);
        mocks.lens.set_dynamics(vec![vault_dynamic(addr(1), addr(10))]);

        let err = aggregator(&mocks).get(None, None).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("Dynamic asset does not exist for {}", addr(2))
        );
    }

    #[tokio::test]
    async fn upstream_failure_propagates_from_get() {
        let mocks = MockSet::new();
        mocks.lens.set_statics(vec![vault_static(addr(1), addr(10))]);
        mocks.lens.set_dynamics(vec![vault_dynamic(addr(1), addr(10))]);
        mocks.strategies.failures.fail_next("vaults_strategies_metadata", "boom");

        let err = aggregator(&mocks).get(None, None).await.unwrap_err();

        assert_eq!(err.to_string(), "strategies failed: boom");
    }
}
