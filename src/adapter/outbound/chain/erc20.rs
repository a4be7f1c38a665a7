//! ERC-20 allowance reads and approvals over JSON-RPC.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use alloy_provider::ProviderBuilder;
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::info;

use super::connection::ChainConnection;
use crate::domain::{CallOverrides, TokenAllowance, TransactionResponse};
use crate::error::{Error, Result};
use crate::port::outbound::AllowanceService;

sol! {
    #[sol(rpc)]
    contract IERC20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

const SERVICE: &str = "erc20";

/// Allowance service backed by the connection's RPC endpoint.
///
/// Approvals are signed by the connection's key, so `owner` must be the
/// signer's address.
pub struct Erc20Allowances {
    connection: Arc<ChainConnection>,
}

impl Erc20Allowances {
    pub fn new(connection: Arc<ChainConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AllowanceService for Erc20Allowances {
    async fn allowance(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
    ) -> Result<TokenAllowance> {
        let provider = ProviderBuilder::new().connect_http(self.connection.rpc_url().clone());
        let erc20 = IERC20::new(token, &provider);

        let amount: U256 = erc20
            .allowance(owner, spender)
            .call()
            .await
            .map_err(|e| Error::upstream(SERVICE, format!("Failed to get allowance: {e}")))?;

        Ok(TokenAllowance {
            owner,
            token,
            spender,
            amount,
        })
    }

    async fn approve(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
        amount: U256,
        overrides: Option<&CallOverrides>,
    ) -> Result<TransactionResponse> {
        let signer = self.connection.signer()?;
        if signer.address() != owner {
            return Err(Error::upstream(
                SERVICE,
                format!("signer {} cannot approve for {owner}", signer.address()),
            ));
        }

        info!(%owner, %token, %spender, %amount, "Approving token spending");

        let provider = ProviderBuilder::new()
            .wallet(self.connection.wallet()?)
            .connect_http(self.connection.rpc_url().clone());
        let erc20 = IERC20::new(token, &provider);

        let mut call = erc20.approve(spender, amount);
        if let Some(gas_price) = overrides.and_then(|o| o.gas_price) {
            let gas_price = u128::try_from(gas_price)
                .map_err(|e| Error::upstream(SERVICE, format!("gas price too large: {e}")))?;
            call = call.gas_price(gas_price);
        }

        let pending = call
            .send()
            .await
            .map_err(|e| Error::upstream(SERVICE, format!("Failed to send approval: {e}")))?;
        let hash = *pending.tx_hash();

        info!(tx_hash = %hash, "Approval submitted");

        Ok(TransactionResponse {
            hash,
            from: owner,
            to: token,
        })
    }
}
