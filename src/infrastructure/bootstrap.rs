//! Composition root: wires configured adapters into [`VaultServices`].

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::cache::MemoryCache;
use crate::adapter::outbound::chain::{
    ChainConnection, ChainSender, Erc20Allowances, PartnerTracker, VaultCallEncoder,
    VaultPropertyReader,
};
use crate::adapter::outbound::overrides::TokenOverrides;
use crate::adapter::outbound::unconfigured::Unconfigured;
use crate::application::{VaultCaches, VaultServices};
use crate::domain::{JarRegistry, Token, Vault, VaultDynamic};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::PartnerService;

/// Build the chain connection, attaching the signer when a key is configured.
///
/// # Errors
///
/// Returns an error if the RPC URL or the private key is invalid.
pub fn build_connection(config: &Config) -> Result<ChainConnection> {
    let connection = ChainConnection::new(config.rpc_url()?);
    match config.wallet.private_key.as_deref() {
        Some(key) => connection.with_private_key(key, config.chain_id),
        None => Ok(connection),
    }
}

fn build_caches(config: &Config) -> VaultCaches {
    let Some(ttl) = config.cache.ttl() else {
        return VaultCaches::default();
    };
    info!(ttl_secs = ttl.as_secs(), "Vault caching enabled");
    VaultCaches {
        vaults: Some(Arc::new(MemoryCache::<Vault>::new(Some(ttl)))),
        dynamic: Some(Arc::new(MemoryCache::<VaultDynamic>::new(Some(ttl)))),
        tokens: Some(Arc::new(MemoryCache::<Token>::new(Some(ttl)))),
    }
}

fn build_partner(config: &Config) -> Option<Arc<dyn PartnerService>> {
    let partner = config.partner.as_ref()?;
    let id = partner.id?;
    let mut tracker = PartnerTracker::new(id, partner.address);
    if let Some(vaults) = &partner.vaults {
        tracker = tracker.with_vaults(vaults.iter().copied());
    }
    info!(partner_id = %id, tracker = %partner.address, "Partner deposits enabled");
    Some(Arc::new(tracker))
}

/// Wire every port for the configured chain.
///
/// Chain-backed ports (allowances, properties, submission) use the RPC
/// endpoint. Off-chain services have no configured endpoint and reject
/// every call.
///
/// # Errors
///
/// Returns an error if the chain connection cannot be built.
pub fn build_services(config: &Config) -> Result<VaultServices> {
    let connection = Arc::new(build_connection(config)?);
    if connection.signer_address().is_none() {
        warn!("WALLET_PRIVATE_KEY not set; writes will be rejected");
    }

    Ok(VaultServices {
        chain_id: config.chain_id,
        lens: Arc::new(Unconfigured::new("lens")),
        meta: Arc::new(Unconfigured::new("meta")),
        assets: Arc::new(Unconfigured::new("assets")),
        vision: Arc::new(Unconfigured::new("vision")),
        strategies: Arc::new(Unconfigured::new("strategies")),
        earnings: Arc::new(Unconfigured::new("earnings")),
        helper: Arc::new(Unconfigured::new("helper")),
        oracle: Arc::new(Unconfigured::new("oracle")),
        allowance: Arc::new(Erc20Allowances::new(connection.clone())),
        vault_contract: Arc::new(VaultCallEncoder),
        sender: Arc::new(ChainSender::new(connection.clone())),
        partner: build_partner(config),
        zaps: Vec::new(),
        properties: Arc::new(VaultPropertyReader::new(connection)),
        token_hook: Arc::new(TokenOverrides::new(config.token_overrides.iter().cloned())),
        jars: JarRegistry::default(),
        caches: build_caches(config),
    })
}
