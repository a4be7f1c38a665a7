//! Partner tracker wrapping direct deposits for attribution.

use std::collections::HashSet;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;

use crate::domain::{TransactionRequest, WriteOptions};
use crate::error::Result;
use crate::port::outbound::PartnerService;

sol! {
    interface IPartnerTracker {
        function deposit(address vault, address partnerId, uint256 amount) external returns (uint256);
    }
}

/// Encodes deposits through the on-chain partner tracker contract.
#[derive(Debug, Clone)]
pub struct PartnerTracker {
    partner_id: Address,
    tracker: Address,
    /// Vaults the partner wraps; `None` wraps every vault.
    vaults: Option<HashSet<Address>>,
}

impl PartnerTracker {
    pub fn new(partner_id: Address, tracker: Address) -> Self {
        Self {
            partner_id,
            tracker,
            vaults: None,
        }
    }

    /// Only wrap deposits into `vaults`.
    #[must_use]
    pub fn with_vaults(mut self, vaults: impl IntoIterator<Item = Address>) -> Self {
        self.vaults = Some(vaults.into_iter().collect());
        self
    }
}

#[async_trait]
impl PartnerService for PartnerTracker {
    fn partner_id(&self) -> Address {
        self.partner_id
    }

    fn address(&self) -> Address {
        self.tracker
    }

    async fn is_allowed(&self, vault: Address) -> Result<bool> {
        Ok(self.vaults.as_ref().map_or(true, |v| v.contains(&vault)))
    }

    async fn populate_deposit_transaction(
        &self,
        vault: Address,
        amount: U256,
        account: Address,
        options: &WriteOptions,
    ) -> Result<TransactionRequest> {
        let data = IPartnerTracker::depositCall {
            vault,
            partnerId: self.partner_id,
            amount,
        }
        .abi_encode();
        let from = options
            .overrides
            .as_ref()
            .and_then(|o| o.from)
            .unwrap_or(account);
        let mut request = TransactionRequest::call(from, self.tracker, data);
        request.gas_price = options.overrides.as_ref().and_then(|o| o.gas_price);
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CallOverrides;

    const PARTNER: Address = Address::repeat_byte(0x0a);
    const TRACKER: Address = Address::repeat_byte(0x0b);
    const VAULT: Address = Address::repeat_byte(0x01);

    #[tokio::test]
    async fn allows_every_vault_by_default() {
        let tracker = PartnerTracker::new(PARTNER, TRACKER);
        assert!(tracker.is_allowed(VAULT).await.unwrap());
    }

    #[tokio::test]
    async fn vault_list_limits_wrapping() {
        let tracker = PartnerTracker::new(PARTNER, TRACKER).with_vaults([VAULT]);
        assert!(tracker.is_allowed(VAULT).await.unwrap());
        assert!(!tracker.is_allowed(Address::repeat_byte(0x02)).await.unwrap());
    }

    #[tokio::test]
    async fn deposit_call_targets_tracker_with_partner_id() {
        let tracker = PartnerTracker::new(PARTNER, TRACKER);
        let account = Address::repeat_byte(0x33);

        let request = tracker
            .populate_deposit_transaction(VAULT, U256::from(7u64), account, &WriteOptions::default())
            .await
            .unwrap();

        assert_eq!(request.to, TRACKER);
        assert_eq!(request.from, account);
        assert_eq!(request.data[..4], IPartnerTracker::depositCall::SELECTOR);
        assert_eq!(request.data[4 + 32 + 12..4 + 64], PARTNER[..]);
    }

    #[tokio::test]
    async fn override_sender_and_gas_price_win() {
        let tracker = PartnerTracker::new(PARTNER, TRACKER);
        let relayer = Address::repeat_byte(0x44);
        let options = WriteOptions {
            overrides: Some(CallOverrides {
                from: Some(relayer),
                gas_price: Some(U256::from(99u64)),
                ..CallOverrides::default()
            }),
            ..WriteOptions::default()
        };

        let request = tracker
            .populate_deposit_transaction(VAULT, U256::from(7u64), Address::repeat_byte(0x33), &options)
            .await
            .unwrap();

        assert_eq!(request.from, relayer);
        assert_eq!(request.gas_price, Some(U256::from(99u64)));
    }
}
