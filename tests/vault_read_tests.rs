use alloy_primitives::U256;
use rust_decimal_macros::dec;
use yieldroute::application::VaultInterface;
use yieldroute::domain::{
    Apy, ApyMap, ChainId, TokenAlias, VaultMetadataOverrides, NATIVE_ASSET_ADDRESS,
};
use yieldroute::error::{Error, IntegrityError};
use yieldroute::testkit::domain::{
    addr, earnings_user_data, erc20, historic_earnings, position, token_balance, vault_dynamic,
    vault_dynamic_unnamed, vault_static,
};
use yieldroute::testkit::mocks::MockSet;

fn seeded(mocks: MockSet) -> MockSet {
    mocks.lens.set_statics(vec![
        vault_static(addr(1), addr(10)),
        vault_static(addr(2), addr(20)),
    ]);
    mocks.lens.set_dynamics(vec![
        vault_dynamic(addr(1), addr(10)),
        vault_dynamic(addr(2), addr(20)),
    ]);
    mocks
}

#[tokio::test]
async fn get_merges_static_and_dynamic_halves() {
    let mocks = seeded(MockSet::new());
    mocks
        .earnings
        .set_historic(vec![historic_earnings(addr(2), 18, 5)]);
    let vaults = VaultInterface::new(mocks.services());

    let merged = vaults.get(None, None).await.unwrap();

    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].address, addr(1));
    assert_eq!(merged[0].token, addr(10));
    assert_eq!(merged[0].metadata.display_name, "Vault Metadata");
    assert!(merged[0].metadata.historic_earnings.is_none());
    assert_eq!(
        merged[1].metadata.historic_earnings.as_ref().map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
async fn get_fails_when_a_dynamic_half_is_missing() {
    let mocks = seeded(MockSet::new());
    mocks
        .lens
        .set_dynamics(vec![vault_dynamic(addr(1), addr(10))]);
    let vaults = VaultInterface::new(mocks.services());

    let err = vaults.get(None, None).await.unwrap_err();

    assert!(matches!(
        err,
        Error::Integrity(IntegrityError::DynamicAssetMissing { address }) if address == addr(2)
    ));
    assert_eq!(
        err.to_string(),
        format!("Dynamic asset does not exist for {}", addr(2))
    );
}

#[tokio::test]
async fn cached_vault_list_is_filtered_without_touching_the_lens() {
    let mocks = seeded(MockSet::new().with_memory_cache());
    let vaults = VaultInterface::new(mocks.services());

    let warm = vaults.get(None, None).await.unwrap();
    assert_eq!(warm.len(), 2);
    let static_reads = mocks.lens.static_calls.count();

    let filtered = vaults.get(Some(&[addr(2)]), None).await.unwrap();
    let empty = vaults.get(Some(&[]), None).await.unwrap();

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].address, addr(2));
    assert!(empty.is_empty());
    assert_eq!(mocks.lens.static_calls.count(), static_reads);
}

#[tokio::test]
async fn filtered_reads_never_populate_the_cache() {
    let mocks = seeded(MockSet::new().with_memory_cache());
    let vaults = VaultInterface::new(mocks.services());

    vaults.get(Some(&[addr(1)]), None).await.unwrap();
    let full = vaults.get(None, None).await.unwrap();

    assert_eq!(full.len(), 2);
    assert_eq!(
        mocks.lens.static_calls.calls(),
        vec![Some(vec![addr(1)]), None]
    );
}

#[tokio::test]
async fn cache_keys_are_scoped_per_chain() {
    let mocks = MockSet::new().with_chain(ChainId::Fantom);
    assert_eq!(mocks.services().cache_key("get"), "vaults/get/250");
    assert_eq!(mocks.services().cache_key("tokens"), "vaults/tokens/250");
}

#[tokio::test]
async fn dynamic_assets_are_enriched_from_every_metadata_source() {
    let mocks = MockSet::new();
    mocks.lens.set_dynamics(vec![
        vault_dynamic(addr(1), ChainId::Mainnet.wrapped_native()),
        vault_dynamic_unnamed(addr(2), addr(20)),
        vault_dynamic_unnamed(addr(3), addr(30)),
    ]);
    mocks.assets.set_icon(NATIVE_ASSET_ADDRESS, "eth.png");
    mocks.assets.set_icon(addr(2), "two.png");
    mocks.assets.set_alias(TokenAlias {
        address: addr(2),
        name: "Two Token".into(),
        symbol: "TWO".into(),
    });
    mocks.vision.set_apys(ApyMap::from([(
        addr(2),
        Apy {
            net_apy: dec!(0.12),
            ..Apy::default()
        },
    )]));
    mocks.zap().support(addr(3));
    let vaults = VaultInterface::new(mocks.services());

    let dynamics = vaults.get_dynamic(None, None, None).await.unwrap();

    let weth = &dynamics[0].metadata;
    assert_eq!(
        weth.display_icon.get(&NATIVE_ASSET_ADDRESS).map(String::as_str),
        Some("eth.png")
    );
    assert_eq!(weth.display_name, "Vault Metadata");

    let aliased = &dynamics[1].metadata;
    assert_eq!(aliased.display_name, "TWO");
    assert_eq!(aliased.default_display_token, addr(20));
    assert_eq!(aliased.apy.as_ref().map(|a| a.net_apy), Some(dec!(0.12)));
    assert!(!aliased.allow_zap_in);

    let zappable = &dynamics[2].metadata;
    assert!(zappable.allow_zap_in);
    assert!(zappable.allow_zap_out);
    assert!(zappable.apy.is_none());
}

#[tokio::test]
async fn explicit_metadata_overrides_skip_the_metadata_service() {
    let mocks = MockSet::new();
    mocks
        .lens
        .set_dynamics(vec![vault_dynamic(addr(1), addr(10))]);
    let vaults = VaultInterface::new(mocks.services());

    let overrides = VaultMetadataOverrides {
        display_name: Some("Renamed".into()),
        deposits_disabled: Some(true),
        hide_always: true,
        ..VaultMetadataOverrides::for_vault(addr(1))
    };
    let dynamics = vaults
        .get_dynamic(None, Some(&[overrides]), None)
        .await
        .unwrap();

    assert_eq!(dynamics[0].metadata.display_name, "Renamed");
    assert!(dynamics[0].metadata.deposits_disabled);
    assert!(dynamics[0].metadata.hide_if_no_deposits);
    assert_eq!(mocks.meta.override_calls.count(), 0);
    assert_eq!(mocks.zap().supported_calls.count(), 0);
}

#[tokio::test]
async fn tokens_and_balances_are_joined_by_address() {
    let mocks = MockSet::new();
    mocks.lens.set_tokens(vec![addr(10), addr(20)]);
    mocks
        .helper
        .set_descriptors(vec![erc20(addr(10), "DAI"), erc20(addr(20), "USDC")]);
    mocks.oracle.set_price(addr(10), U256::from(1_000_000u64));
    mocks.helper.set_balances(vec![
        token_balance(addr(20), 3),
        token_balance(addr(10), 7),
    ]);
    let vaults = VaultInterface::new(mocks.services());

    let balances = vaults.balances(addr(50), None).await.unwrap();

    assert_eq!(balances.len(), 2);
    assert_eq!(balances[0].token.symbol, "USDC");
    assert_eq!(balances[1].token.symbol, "DAI");
    assert_eq!(balances[1].token.price_usdc, U256::from(1_000_000u64));
    assert_eq!(
        mocks.helper.balance_calls.calls(),
        vec![(addr(50), vec![addr(10), addr(20)])]
    );
}

#[tokio::test]
async fn balance_without_token_record_is_an_integrity_error() {
    let mocks = MockSet::new();
    mocks.lens.set_tokens(vec![addr(10)]);
    mocks.helper.set_descriptors(vec![erc20(addr(10), "DAI")]);
    mocks.helper.set_balances(vec![token_balance(addr(99), 1)]);
    let vaults = VaultInterface::new(mocks.services());

    let err = vaults.balances(addr(50), None).await.unwrap_err();

    assert_eq!(
        err.to_string(),
        format!("Token does not exist for Balance({})", addr(99))
    );
}

#[tokio::test]
async fn positions_retry_once_with_every_static_vault() {
    let mocks = seeded(MockSet::new());
    mocks.lens.set_positions(vec![position(addr(1), addr(10))]);
    mocks.lens.failures.fail_next("positions_of", "too many vaults");
    let vaults = VaultInterface::new(mocks.services());

    let positions = vaults.positions_of(addr(50), None, None).await.unwrap();

    assert_eq!(positions.len(), 1);
    assert_eq!(mocks.lens.position_calls.count(), 2);
    assert_eq!(
        mocks.lens.position_calls.last(),
        Some((addr(50), Some(vec![addr(1), addr(2)])))
    );
}

#[tokio::test]
async fn earnings_views_share_one_data_source() {
    let mocks = MockSet::new();
    mocks
        .earnings
        .set_user_data(earnings_user_data(&[(addr(1), 3), (addr(2), 5)]));
    let vaults = VaultInterface::new(mocks.services());

    let summary = vaults.summary_of(addr(50)).await.unwrap();
    let metadata = vaults.metadata_of(addr(50), Some(&[addr(2)])).await.unwrap();

    assert_eq!(summary.earnings, U256::from(8u64));
    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata[0].earned, U256::from(5u64));
}
