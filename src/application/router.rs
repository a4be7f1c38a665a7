//! Deposit and withdraw routing.
//!
//! Every write picks one of two paths:
//!
//! - **Direct**: the supplied token is the vault's reference token. The vault
//!   contract is called directly, or through the partner wrapper for deposits
//!   when a partner is configured and allows the vault.
//! - **Zap**: anything else. The first zap backend whose supported set holds
//!   the vault builds a swap-and-deposit (or withdraw-and-swap). Jar vaults
//!   always zap in through the PICKLE protocol.
//!
//! Allowance reads and approvals resolve their spender through the same
//! decision, so an approval always targets the contract that will spend.

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use tracing::{debug, info};

use crate::domain::{
    CallOverrides, Route, TokenAllowance, TransactionRequest, TransactionResponse, WriteOptions,
    ZapProtocol, ZapRequest, NATIVE_ASSET_ADDRESS,
};
use crate::error::{IntegrityError, Result, RoutingError, ValidationError};
use crate::port::outbound::{PartnerService, ZapBackend};

use super::assets::AssetAggregator;
use super::services::VaultServices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    In,
    Out,
}

/// Routes deposits, withdrawals, allowance reads, and approvals.
pub struct TransactionRouter {
    services: Arc<VaultServices>,
    assets: Arc<AssetAggregator>,
}

impl TransactionRouter {
    pub fn new(services: Arc<VaultServices>, assets: Arc<AssetAggregator>) -> Self {
        Self { services, assets }
    }

    /// Deposit `amount` of `token` into `vault` on behalf of `account`.
    pub async fn deposit(
        &self,
        vault: Address,
        token: Address,
        amount: U256,
        account: Address,
        options: &WriteOptions,
    ) -> Result<TransactionResponse> {
        let overrides = options.overrides.as_ref();
        let route = self.deposit_route(vault, token, overrides).await?;
        info!(%vault, %token, %account, ?route, "Routing deposit");

        let request = match route {
            Route::Direct => {
                let call = match self.wrapping_partner(vault).await? {
                    Some(partner) => {
                        debug!(%vault, "Deposit wrapped by partner");
                        partner
                            .populate_deposit_transaction(vault, amount, account, options)
                            .await?
                    }
                    None => self.services.vault_contract.deposit(vault, amount, account)?,
                };
                self.services
                    .sender
                    .populate_transaction(with_overrides(call, overrides))
                    .await?
            }
            Route::Zap(protocol) => {
                let request =
                    self.zap_request(vault, token, amount, account, options, protocol)?;
                let backend = self.zap_backend(vault).await?;
                debug!(backend = backend.name(), %protocol, "Zapping in");
                with_overrides(backend.zap_in(&request).await?, overrides)
            }
        };

        self.services.sender.send_transaction(request).await
    }

    /// Withdraw `amount` vault shares from `vault` into `token` for `account`.
    pub async fn withdraw(
        &self,
        vault: Address,
        token: Address,
        amount: U256,
        account: Address,
        options: &WriteOptions,
    ) -> Result<TransactionResponse> {
        let overrides = options.overrides.as_ref();
        let route = self.withdraw_route(vault, token, overrides).await?;
        info!(%vault, %token, %account, ?route, "Routing withdraw");

        let request = match route {
            Route::Direct => {
                let call = self.services.vault_contract.withdraw(vault, amount, account)?;
                self.services
                    .sender
                    .populate_transaction(with_overrides(call, overrides))
                    .await?
            }
            Route::Zap(protocol) => {
                let request =
                    self.zap_request(vault, token, amount, account, options, protocol)?;
                let backend = self.zap_backend(vault).await?;
                debug!(backend = backend.name(), %protocol, "Zapping out");
                with_overrides(backend.zap_out(&request).await?, overrides)
            }
        };

        self.services.sender.send_transaction(request).await
    }

    /// Allowance of the deposit spender over `account`'s `token`.
    pub async fn get_deposit_allowance(
        &self,
        account: Address,
        vault: Address,
        token: Address,
    ) -> Result<TokenAllowance> {
        let spender = self.spender(Direction::In, vault, token, None).await?;
        self.services.allowance.allowance(account, token, spender).await
    }

    /// Allowance of the withdraw spender over `account`'s vault shares.
    pub async fn get_withdraw_allowance(
        &self,
        account: Address,
        vault: Address,
        token: Address,
    ) -> Result<TokenAllowance> {
        let spender = self.spender(Direction::Out, vault, token, None).await?;
        self.services.allowance.allowance(account, vault, spender).await
    }

    /// Approve the deposit spender for `amount` of `token`, or without
    /// limit when `amount` is `None`.
    pub async fn approve_deposit(
        &self,
        account: Address,
        vault: Address,
        token: Address,
        amount: Option<U256>,
        overrides: Option<&CallOverrides>,
    ) -> Result<TransactionResponse> {
        let spender = self.spender(Direction::In, vault, token, overrides).await?;
        let amount = amount.unwrap_or(U256::MAX);
        info!(%account, %token, %spender, %amount, "Approving deposit");
        self.services
            .allowance
            .approve(account, token, spender, amount, overrides)
            .await
    }

    /// Approve the withdraw spender for `amount` vault shares, or without
    /// limit when `amount` is `None`.
    pub async fn approve_withdraw(
        &self,
        account: Address,
        vault: Address,
        token: Address,
        amount: Option<U256>,
        overrides: Option<&CallOverrides>,
    ) -> Result<TransactionResponse> {
        let spender = self.spender(Direction::Out, vault, token, overrides).await?;
        let amount = amount.unwrap_or(U256::MAX);
        info!(%account, %vault, %spender, %amount, "Approving withdraw");
        self.services
            .allowance
            .approve(account, vault, spender, amount, overrides)
            .await
    }

    async fn deposit_route(
        &self,
        vault: Address,
        token: Address,
        overrides: Option<&CallOverrides>,
    ) -> Result<Route> {
        if self.services.jars.contains(vault) {
            return Ok(Route::Zap(ZapProtocol::Pickle));
        }
        let reference = self.reference_token(vault, overrides).await?;
        if reference == token && token != NATIVE_ASSET_ADDRESS {
            Ok(Route::Direct)
        } else {
            Ok(Route::Zap(ZapProtocol::Yearn))
        }
    }

    async fn withdraw_route(
        &self,
        vault: Address,
        token: Address,
        overrides: Option<&CallOverrides>,
    ) -> Result<Route> {
        let reference = self.reference_token(vault, overrides).await?;
        if reference == token {
            Ok(Route::Direct)
        } else {
            Ok(Route::Zap(ZapProtocol::Yearn))
        }
    }

    async fn reference_token(
        &self,
        vault: Address,
        overrides: Option<&CallOverrides>,
    ) -> Result<Address> {
        self.assets
            .get_static(Some(&[vault]), overrides)
            .await?
            .into_iter()
            .find(|v| v.address == vault)
            .map(|v| v.token)
            .ok_or_else(|| IntegrityError::VaultMissing { address: vault }.into())
    }

    /// The partner, if one is configured and wraps deposits into `vault`.
    async fn wrapping_partner(&self, vault: Address) -> Result<Option<Arc<dyn PartnerService>>> {
        let Some(partner) = &self.services.partner else {
            return Ok(None);
        };
        if partner.is_allowed(vault).await? {
            Ok(Some(partner.clone()))
        } else {
            Ok(None)
        }
    }

    /// First backend whose supported set contains `vault`.
    async fn zap_backend(&self, vault: Address) -> Result<Arc<dyn ZapBackend>> {
        for backend in &self.services.zaps {
            if backend.supported_vault_addresses().await?.contains(&vault) {
                return Ok(backend.clone());
            }
        }
        Err(RoutingError::NoZapBackend { vault }.into())
    }

    fn zap_request(
        &self,
        vault: Address,
        token: Address,
        amount: U256,
        account: Address,
        options: &WriteOptions,
        protocol: ZapProtocol,
    ) -> Result<ZapRequest> {
        let slippage = options.slippage.ok_or(ValidationError::MissingSlippage)?;
        Ok(ZapRequest {
            vault,
            token,
            amount,
            account,
            slippage,
            is_native: token == NATIVE_ASSET_ADDRESS,
            partner_id: self.services.partner.as_ref().map(|p| p.partner_id()),
            protocol,
        })
    }

    async fn spender(
        &self,
        direction: Direction,
        vault: Address,
        token: Address,
        overrides: Option<&CallOverrides>,
    ) -> Result<Address> {
        let route = match direction {
            Direction::In => self.deposit_route(vault, token, overrides).await?,
            Direction::Out => self.withdraw_route(vault, token, overrides).await?,
        };

        let spender = match (route, direction) {
            (Route::Direct, Direction::In) => match self.wrapping_partner(vault).await? {
                Some(partner) => partner.address(),
                None => vault,
            },
            (Route::Direct, Direction::Out) => vault,
            (Route::Zap(_), Direction::In) => {
                self.zap_backend(vault).await?.zap_in_spender(vault, token).await?
            }
            (Route::Zap(_), Direction::Out) => {
                self.zap_backend(vault).await?.zap_out_spender(vault, token).await?
            }
        };
        debug!(%vault, %token, ?direction, ?route, %spender, "Resolved spender");
        Ok(spender)
    }
}

/// Apply the caller's sender and gas price to a built request.
fn with_overrides(
    mut request: TransactionRequest,
    overrides: Option<&CallOverrides>,
) -> TransactionRequest {
    if let Some(overrides) = overrides {
        if let Some(from) = overrides.from {
            request.from = from;
        }
        if let Some(gas_price) = overrides.gas_price {
            request.gas_price = Some(gas_price);
        }
    }
    request
}
