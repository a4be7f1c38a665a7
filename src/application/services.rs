//! Collaborator wiring shared by every vault use case.

use std::sync::Arc;

use crate::domain::{ChainId, JarRegistry, Token, Vault, VaultDynamic};
use crate::port::outbound::{
    AllowanceService, AssetService, CacheStore, EarningsService, MetaService, PartnerService,
    PriceOracle, PropertiesAggregator, StrategiesService, TokenHelper, TokenMetadataHook,
    TransactionSender, VaultContract, VaultLens, VisionService, ZapBackend,
};

/// Optional cache stores, one per cached record list.
///
/// A `None` store disables caching for that list.
#[derive(Clone, Default)]
pub struct VaultCaches {
    pub vaults: Option<Arc<dyn CacheStore<Vault>>>,
    pub dynamic: Option<Arc<dyn CacheStore<VaultDynamic>>>,
    pub tokens: Option<Arc<dyn CacheStore<Token>>>,
}

/// Every outbound port the vault interface talks to, for one chain.
///
/// Built once by the caller and shared behind an `Arc`. Nothing here holds
/// per-call state.
#[derive(Clone)]
pub struct VaultServices {
    pub chain_id: ChainId,
    pub lens: Arc<dyn VaultLens>,
    pub meta: Arc<dyn MetaService>,
    pub assets: Arc<dyn AssetService>,
    pub vision: Arc<dyn VisionService>,
    pub strategies: Arc<dyn StrategiesService>,
    pub earnings: Arc<dyn EarningsService>,
    pub helper: Arc<dyn TokenHelper>,
    pub oracle: Arc<dyn PriceOracle>,
    pub allowance: Arc<dyn AllowanceService>,
    pub vault_contract: Arc<dyn VaultContract>,
    pub sender: Arc<dyn TransactionSender>,
    /// Deposit wrapper; absent on chains without a partner program.
    pub partner: Option<Arc<dyn PartnerService>>,
    /// Zap backends in priority order.
    pub zaps: Vec<Arc<dyn ZapBackend>>,
    pub properties: Arc<dyn PropertiesAggregator>,
    pub token_hook: Arc<dyn TokenMetadataHook>,
    pub jars: JarRegistry,
    pub caches: VaultCaches,
}

impl VaultServices {
    /// Cache key for `list` on this chain.
    #[must_use]
    pub fn cache_key(&self, list: &str) -> String {
        format!("vaults/{list}/{}", self.chain_id.id())
    }
}
