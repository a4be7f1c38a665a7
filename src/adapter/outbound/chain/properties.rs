//! Vault property reads straight from the vault contract.

use std::sync::Arc;

use alloy_primitives::Address;
use alloy_provider::ProviderBuilder;
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::debug;

use super::connection::ChainConnection;
use crate::domain::RawVaultProperties;
use crate::error::{Error, Result};
use crate::port::outbound::PropertiesAggregator;

sol! {
    #[sol(rpc)]
    contract IVaultProperties {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function apiVersion() external view returns (string);
        function emergencyShutdown() external view returns (bool);
        function managementFee() external view returns (uint256);
        function performanceFee() external view returns (uint256);
        function totalAssets() external view returns (uint256);
        function depositLimit() external view returns (uint256);
        function debtRatio() external view returns (uint256);
        function management() external view returns (address);
        function governance() external view returns (address);
        function guardian() external view returns (address);
        function rewards() external view returns (address);
        function lastReport() external view returns (uint256);
    }
}

/// Reads every property with concurrent view calls.
pub struct VaultPropertyReader {
    connection: Arc<ChainConnection>,
}

impl VaultPropertyReader {
    pub fn new(connection: Arc<ChainConnection>) -> Self {
        Self { connection }
    }
}

fn rpc_error(property: &'static str) -> impl Fn(alloy_contract::Error) -> Error {
    move |e| Error::upstream("properties", format!("Failed to read {property}: {e}"))
}

#[async_trait]
impl PropertiesAggregator for VaultPropertyReader {
    async fn get_properties(&self, vault: Address) -> Result<RawVaultProperties> {
        let provider = ProviderBuilder::new().connect_http(self.connection.rpc_url().clone());
        let contract = IVaultProperties::new(vault, &provider);

        let name = contract.name();
        let symbol = contract.symbol();
        let api_version = contract.apiVersion();
        let emergency_shutdown = contract.emergencyShutdown();
        let management_fee = contract.managementFee();
        let performance_fee = contract.performanceFee();
        let total_assets = contract.totalAssets();
        let deposit_limit = contract.depositLimit();
        let debt_ratio = contract.debtRatio();
        let management = contract.management();
        let governance = contract.governance();
        let guardian = contract.guardian();
        let rewards = contract.rewards();
        let last_report = contract.lastReport();

        let (
            name,
            symbol,
            api_version,
            emergency_shutdown,
            management_fee,
            performance_fee,
            total_assets,
        ) = tokio::try_join!(
            async { name.call().await.map_err(rpc_error("name")) },
            async { symbol.call().await.map_err(rpc_error("symbol")) },
            async { api_version.call().await.map_err(rpc_error("apiVersion")) },
            async { emergency_shutdown.call().await.map_err(rpc_error("emergencyShutdown")) },
            async { management_fee.call().await.map_err(rpc_error("managementFee")) },
            async { performance_fee.call().await.map_err(rpc_error("performanceFee")) },
            async { total_assets.call().await.map_err(rpc_error("totalAssets")) },
        )?;
        let (deposit_limit, debt_ratio, management, governance, guardian, rewards, last_report) =
            tokio::try_join!(
                async { deposit_limit.call().await.map_err(rpc_error("depositLimit")) },
                async { debt_ratio.call().await.map_err(rpc_error("debtRatio")) },
                async { management.call().await.map_err(rpc_error("management")) },
                async { governance.call().await.map_err(rpc_error("governance")) },
                async { guardian.call().await.map_err(rpc_error("guardian")) },
                async { rewards.call().await.map_err(rpc_error("rewards")) },
                async { last_report.call().await.map_err(rpc_error("lastReport")) },
            )?;

        debug!(%vault, %name, "Read vault properties");

        Ok(RawVaultProperties {
            name,
            symbol,
            api_version,
            emergency_shutdown,
            management_fee,
            performance_fee,
            total_assets,
            deposit_limit,
            debt_ratio,
            management,
            governance,
            guardian,
            rewards,
            last_report,
        })
    }
}
