use std::sync::Arc;

use alloy_primitives::{Address, U256};
use rust_decimal_macros::dec;
use yieldroute::adapter::outbound::chain::PartnerTracker;
use yieldroute::application::VaultInterface;
use yieldroute::domain::{
    JarRegistry, WriteOptions, ZapProtocol, NATIVE_ASSET_ADDRESS, PICKLE_JARS,
};
use yieldroute::error::{Error, IntegrityError, RoutingError, ValidationError};
use yieldroute::testkit::domain::{addr, vault_static};
use yieldroute::testkit::mocks::{
    sent_hash, ApproveCall, MockSet, MockZap, MOCK_GAS, MOCK_PARTNER_ADDRESS, MOCK_PARTNER_ID,
    MOCK_ZAP_IN_SPENDER, MOCK_ZAP_OUT_SPENDER,
};

const AMOUNT: u64 = 1_000;

fn vault() -> Address {
    addr(1)
}

fn reference() -> Address {
    addr(10)
}

fn other_token() -> Address {
    addr(20)
}

fn account() -> Address {
    addr(50)
}

fn seeded(mocks: MockSet) -> MockSet {
    mocks
        .lens
        .set_statics(vec![vault_static(vault(), reference())]);
    mocks
}

fn zap_options() -> WriteOptions {
    WriteOptions::with_slippage(dec!(0.01))
}

#[tokio::test]
async fn direct_deposit_is_populated_then_sent() {
    let mocks = seeded(MockSet::new());
    let vaults = VaultInterface::new(mocks.services());

    let response = vaults
        .deposit(
            vault(),
            reference(),
            U256::from(AMOUNT),
            account(),
            &WriteOptions::default(),
        )
        .await
        .unwrap();

    let sent = mocks.sender.sent.last().unwrap();
    assert_eq!(sent.to, vault());
    assert_eq!(sent.gas, Some(U256::from(MOCK_GAS)));
    assert_eq!(response.hash, sent_hash(&sent));
    assert_eq!(mocks.zap().zap_in_calls.count(), 0);
}

#[tokio::test]
async fn partner_wraps_direct_deposits_it_allows() {
    let mocks = seeded(MockSet::new().with_partner());
    mocks.partner().allow(vault());
    let vaults = VaultInterface::new(mocks.services());

    vaults
        .deposit(
            vault(),
            reference(),
            U256::from(AMOUNT),
            account(),
            &WriteOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(mocks.partner().populate_calls.count(), 1);
    assert_eq!(mocks.vault_contract.deposit_calls.count(), 0);
    let sent = mocks.sender.sent.last().unwrap();
    assert_eq!(sent.to, MOCK_PARTNER_ADDRESS);
    assert_eq!(sent.from, account());
    assert_eq!(sent.gas, Some(U256::from(MOCK_GAS)));
}

#[tokio::test]
async fn tracker_deposit_is_signed_by_the_depositor() {
    let mocks = seeded(MockSet::new());
    let mut services = mocks.services();
    services.partner = Some(Arc::new(
        PartnerTracker::new(MOCK_PARTNER_ID, MOCK_PARTNER_ADDRESS).with_vaults([vault()]),
    ));
    let vaults = VaultInterface::new(services);

    vaults
        .deposit(
            vault(),
            reference(),
            U256::from(5u64),
            account(),
            &WriteOptions::default(),
        )
        .await
        .unwrap();

    let sent = mocks.sender.sent.last().unwrap();
    assert_eq!(sent.from, account());
    assert_eq!(sent.to, MOCK_PARTNER_ADDRESS);
    assert!(sent.gas.is_some());
    assert_eq!(mocks.sender.populate_calls.count(), 1);
}

#[tokio::test]
async fn partner_that_rejects_the_vault_falls_back_to_the_vault_call() {
    let mocks = seeded(MockSet::new().with_partner());
    let vaults = VaultInterface::new(mocks.services());

    vaults
        .deposit(
            vault(),
            reference(),
            U256::from(AMOUNT),
            account(),
            &WriteOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(mocks.partner().allowed_calls.calls(), vec![vault()]);
    assert_eq!(mocks.partner().populate_calls.count(), 0);
    assert_eq!(mocks.vault_contract.deposit_calls.count(), 1);
}

#[tokio::test]
async fn native_deposit_zaps_even_into_its_own_vault() {
    let mocks = MockSet::new();
    mocks
        .lens
        .set_statics(vec![vault_static(vault(), NATIVE_ASSET_ADDRESS)]);
    mocks.zap().support(vault());
    let vaults = VaultInterface::new(mocks.services());

    vaults
        .deposit(
            vault(),
            NATIVE_ASSET_ADDRESS,
            U256::from(AMOUNT),
            account(),
            &zap_options(),
        )
        .await
        .unwrap();

    let request = mocks.zap().zap_in_calls.last().unwrap();
    assert!(request.is_native);
    assert_eq!(request.protocol, ZapProtocol::Yearn);
    assert_eq!(mocks.vault_contract.deposit_calls.count(), 0);
}

#[tokio::test]
async fn zap_deposit_forwards_partner_id_and_slippage() {
    let mocks = seeded(MockSet::new().with_partner());
    mocks.zap().support(vault());
    let vaults = VaultInterface::new(mocks.services());

    vaults
        .deposit(
            vault(),
            other_token(),
            U256::from(AMOUNT),
            account(),
            &zap_options(),
        )
        .await
        .unwrap();

    let request = mocks.zap().zap_in_calls.last().unwrap();
    assert_eq!(request.partner_id, Some(MOCK_PARTNER_ID));
    assert_eq!(request.slippage, dec!(0.01));
    assert_eq!(request.token, other_token());
    assert!(!request.is_native);
    assert_eq!(mocks.sender.sent.last().unwrap().to, MOCK_ZAP_IN_SPENDER);
}

#[tokio::test]
async fn jar_deposits_use_pickle_without_reading_the_vault() {
    let jar = PICKLE_JARS[0];
    let mocks = MockSet::new().with_jars(JarRegistry::default());
    mocks.zap().support(jar);
    let vaults = VaultInterface::new(mocks.services());

    vaults
        .deposit(jar, reference(), U256::from(AMOUNT), account(), &zap_options())
        .await
        .unwrap();

    assert_eq!(
        mocks.zap().zap_in_calls.last().unwrap().protocol,
        ZapProtocol::Pickle
    );
    assert_eq!(mocks.lens.static_calls.count(), 0);
}

#[tokio::test]
async fn zap_without_slippage_is_rejected_before_any_transaction() {
    let mocks = seeded(MockSet::new());
    mocks.zap().support(vault());
    let vaults = VaultInterface::new(mocks.services());

    let err = vaults
        .deposit(
            vault(),
            other_token(),
            U256::from(AMOUNT),
            account(),
            &WriteOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingSlippage)
    ));
    assert_eq!(err.to_string(), "zap operations should have a slippage set");
    assert_eq!(mocks.zap().zap_in_calls.count(), 0);
    assert_eq!(mocks.sender.sent.count(), 0);
}

#[tokio::test]
async fn unsupported_vault_has_no_zap_route() {
    let mocks = seeded(MockSet::new());
    let vaults = VaultInterface::new(mocks.services());

    let err = vaults
        .deposit(
            vault(),
            other_token(),
            U256::from(AMOUNT),
            account(),
            &zap_options(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Routing(RoutingError::NoZapBackend { vault: v }) if v == vault()
    ));
}

#[tokio::test]
async fn second_backend_serves_vaults_the_first_lacks() {
    let fallback = MockZap::new("fallback", addr(0x6a), addr(0x6b));
    fallback.support(vault());
    let mocks = seeded(MockSet::new().with_zap(fallback));
    let vaults = VaultInterface::new(mocks.services());

    vaults
        .withdraw(
            vault(),
            other_token(),
            U256::from(AMOUNT),
            account(),
            &zap_options(),
        )
        .await
        .unwrap();

    assert_eq!(mocks.zap().zap_out_calls.count(), 0);
    assert_eq!(mocks.zaps[1].zap_out_calls.count(), 1);
    assert_eq!(mocks.sender.sent.last().unwrap().to, addr(0x6b));
}

#[tokio::test]
async fn direct_withdraw_calls_the_vault() {
    let mocks = seeded(MockSet::new());
    let vaults = VaultInterface::new(mocks.services());

    vaults
        .withdraw(
            vault(),
            reference(),
            U256::from(AMOUNT),
            account(),
            &WriteOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(
        mocks.vault_contract.withdraw_calls.calls(),
        vec![(vault(), U256::from(AMOUNT), account())]
    );
    assert_eq!(mocks.sender.populate_calls.count(), 1);
}

#[tokio::test]
async fn unknown_vault_is_an_integrity_error() {
    let mocks = seeded(MockSet::new());
    let vaults = VaultInterface::new(mocks.services());

    let err = vaults
        .withdraw(
            addr(9),
            reference(),
            U256::from(AMOUNT),
            account(),
            &WriteOptions::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        Error::Integrity(IntegrityError::VaultMissing { address }) if address == addr(9)
    ));
}

#[tokio::test]
async fn allowances_target_the_spending_contract() {
    let mocks = seeded(MockSet::new().with_partner());
    mocks.partner().allow(vault());
    mocks.zap().support(vault());
    let vaults = VaultInterface::new(mocks.services());

    let direct_in = vaults
        .get_deposit_allowance(account(), vault(), reference())
        .await
        .unwrap();
    let zap_in = vaults
        .get_deposit_allowance(account(), vault(), other_token())
        .await
        .unwrap();
    let direct_out = vaults
        .get_withdraw_allowance(account(), vault(), reference())
        .await
        .unwrap();
    let zap_out = vaults
        .get_withdraw_allowance(account(), vault(), other_token())
        .await
        .unwrap();

    assert_eq!(direct_in.spender, MOCK_PARTNER_ADDRESS);
    assert_eq!(direct_in.token, reference());
    assert_eq!(zap_in.spender, MOCK_ZAP_IN_SPENDER);
    assert_eq!(zap_in.token, other_token());
    assert_eq!(direct_out.spender, vault());
    assert_eq!(direct_out.token, vault());
    assert_eq!(zap_out.spender, MOCK_ZAP_OUT_SPENDER);
    assert_eq!(zap_out.token, vault());
}

#[tokio::test]
async fn approvals_default_to_unlimited() {
    let mocks = seeded(MockSet::new());
    mocks.zap().support(vault());
    let vaults = VaultInterface::new(mocks.services());

    vaults
        .approve_deposit(account(), vault(), reference(), None, None)
        .await
        .unwrap();
    vaults
        .approve_withdraw(
            account(),
            vault(),
            other_token(),
            Some(U256::from(AMOUNT)),
            None,
        )
        .await
        .unwrap();

    assert_eq!(
        mocks.allowance.approve_calls.calls(),
        vec![
            ApproveCall {
                owner: account(),
                token: reference(),
                spender: vault(),
                amount: U256::MAX,
            },
            ApproveCall {
                owner: account(),
                token: vault(),
                spender: MOCK_ZAP_OUT_SPENDER,
                amount: U256::from(AMOUNT),
            },
        ]
    );
}
