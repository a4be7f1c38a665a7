//! Signer-backed transaction population and submission.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use alloy_provider::network::{Ethereum, Network, TransactionBuilder};
use alloy_provider::{Provider, ProviderBuilder};
use async_trait::async_trait;
use tracing::{debug, info};

use super::connection::ChainConnection;
use crate::domain::{TransactionRequest, TransactionResponse};
use crate::error::{Error, Result};
use crate::port::outbound::TransactionSender;

const SERVICE: &str = "sender";

type RpcRequest = <Ethereum as Network>::TransactionRequest;

/// Sends transactions through the connection's signing key.
pub struct ChainSender {
    connection: Arc<ChainConnection>,
}

impl ChainSender {
    pub fn new(connection: Arc<ChainConnection>) -> Self {
        Self { connection }
    }
}

fn to_rpc(request: &TransactionRequest) -> Result<RpcRequest> {
    let mut rpc = RpcRequest::default()
        .with_from(request.from)
        .with_to(request.to)
        .with_input(request.data.clone())
        .with_value(request.value);
    if let Some(gas) = request.gas {
        let gas = u64::try_from(gas)
            .map_err(|e| Error::upstream(SERVICE, format!("gas limit too large: {e}")))?;
        rpc = rpc.with_gas_limit(gas);
    }
    if let Some(gas_price) = request.gas_price {
        let gas_price = u128::try_from(gas_price)
            .map_err(|e| Error::upstream(SERVICE, format!("gas price too large: {e}")))?;
        rpc = rpc.with_gas_price(gas_price);
    }
    Ok(rpc)
}

#[async_trait]
impl TransactionSender for ChainSender {
    async fn populate_transaction(
        &self,
        mut request: TransactionRequest,
    ) -> Result<TransactionRequest> {
        if request.from == Address::ZERO {
            if let Some(signer) = self.connection.signer_address() {
                request.from = signer;
            }
        }

        let provider = ProviderBuilder::new().connect_http(self.connection.rpc_url().clone());

        if request.gas_price.is_none() {
            let gas_price = provider
                .get_gas_price()
                .await
                .map_err(|e| Error::upstream(SERVICE, format!("Failed to get gas price: {e}")))?;
            request.gas_price = Some(U256::from(gas_price));
        }
        if request.gas.is_none() {
            let gas = provider
                .estimate_gas(to_rpc(&request)?)
                .await
                .map_err(|e| Error::upstream(SERVICE, format!("Failed to estimate gas: {e}")))?;
            request.gas = Some(U256::from(gas));
        }

        debug!(to = %request.to, from = %request.from, gas = ?request.gas, "Populated transaction");
        Ok(request)
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TransactionResponse> {
        let provider = ProviderBuilder::new()
            .wallet(self.connection.wallet()?)
            .connect_http(self.connection.rpc_url().clone());

        let pending = provider
            .send_transaction(to_rpc(&request)?)
            .await
            .map_err(|e| Error::upstream(SERVICE, format!("Failed to send transaction: {e}")))?;
        let hash = *pending.tx_hash();

        info!(tx_hash = %hash, to = %request.to, "Transaction submitted");

        Ok(TransactionResponse {
            hash,
            from: request.from,
            to: request.to,
        })
    }
}
