//! ABI encoding of direct vault deposits and withdrawals.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};

use crate::domain::TransactionRequest;
use crate::error::Result;
use crate::port::outbound::VaultContract;

sol! {
    interface IYearnVault {
        function deposit(uint256 amount, address recipient) external returns (uint256);
        function withdraw(uint256 maxShares, address recipient) external returns (uint256);
    }
}

/// Builds unsigned v2 vault calls from `account` to the vault.
#[derive(Debug, Clone, Copy, Default)]
pub struct VaultCallEncoder;

impl VaultContract for VaultCallEncoder {
    fn deposit(
        &self,
        vault: Address,
        amount: U256,
        account: Address,
    ) -> Result<TransactionRequest> {
        let data = IYearnVault::depositCall {
            amount,
            recipient: account,
        }
        .abi_encode();
        Ok(TransactionRequest::call(account, vault, data))
    }

    fn withdraw(
        &self,
        vault: Address,
        amount: U256,
        account: Address,
    ) -> Result<TransactionRequest> {
        let data = IYearnVault::withdrawCall {
            maxShares: amount,
            recipient: account,
        }
        .abi_encode();
        Ok(TransactionRequest::call(account, vault, data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    fn selector(signature: &str) -> [u8; 4] {
        let hash = keccak256(signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    #[test]
    fn deposit_targets_vault_from_account() {
        let vault = Address::repeat_byte(0x11);
        let account = Address::repeat_byte(0x22);

        let request = VaultCallEncoder
            .deposit(vault, U256::from(1_000u64), account)
            .unwrap();

        assert_eq!(request.to, vault);
        assert_eq!(request.from, account);
        assert_eq!(request.value, U256::ZERO);
        assert_eq!(request.data[..4], selector("deposit(uint256,address)"));
        assert_eq!(request.data.len(), 4 + 32 * 2);
        assert_eq!(request.data[4 + 32 + 12..], account[..]);
    }

    #[test]
    fn withdraw_uses_withdraw_selector() {
        let request = VaultCallEncoder
            .withdraw(
                Address::repeat_byte(0x11),
                U256::from(5u64),
                Address::repeat_byte(0x22),
            )
            .unwrap();

        assert_eq!(request.data[..4], selector("withdraw(uint256,address)"));
        assert_eq!(request.data[4 + 31], 5);
    }
}
