//! Recording mocks for every outbound port.
//!
//! Each mock serves data set through `set_*` methods, records the arguments
//! of every call in a [`CallLog`], and can be scripted to reject the next call
//! of a method through its [`Failures`] queue. [`MockSet`] bundles one of each
//! and builds the [`VaultServices`] handed to the application layer.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use async_trait::async_trait;
use parking_lot::Mutex;

use crate::adapter::outbound::cache::MemoryCache;
use crate::adapter::outbound::overrides::TokenOverrides;
use crate::application::{VaultCaches, VaultServices};
use crate::domain::{
    filter_by_address, ApyMap, AssetHistoricEarnings, CallOverrides, ChainId, EarningsUserData,
    Erc20, IconMap, JarRegistry, Position, RawVaultProperties, TokenAlias, TokenAllowance,
    Token, TokenBalance, TokenMetadata, TransactionRequest, TransactionResponse, Vault,
    VaultDynamic, VaultMetadataOverrides, VaultStatic, VaultStrategiesMetadata, WriteOptions,
    ZapRequest,
};
use crate::error::{Error, Result};
use crate::port::outbound::{
    AllowanceService, AssetService, EarningsService, MetaService, PartnerService, PriceOracle,
    PropertiesAggregator, StrategiesService, TokenHelper, TransactionSender, VaultContract,
    VaultLens, VisionService, ZapBackend,
};

// ---------------------------------------------------------------------------
// Recording helpers
// ---------------------------------------------------------------------------

/// Append-only record of the arguments a mock was called with.
pub struct CallLog<T>(Mutex<Vec<T>>);

impl<T: Clone> CallLog<T> {
    fn record(&self, call: T) {
        self.0.lock().push(call);
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> Vec<T> {
        self.0.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().len()
    }

    /// The most recent call, if any.
    pub fn last(&self) -> Option<T> {
        self.0.lock().last().cloned()
    }
}

impl<T> Default for CallLog<T> {
    fn default() -> Self {
        Self(Mutex::new(Vec::new()))
    }
}

/// One-shot failures keyed by method name.
///
/// Each scripted message rejects exactly one call of that method.
#[derive(Default)]
pub struct Failures(Mutex<HashMap<&'static str, VecDeque<String>>>);

impl Failures {
    /// Reject the next call of `method` with `message`.
    pub fn fail_next(&self, method: &'static str, message: impl Into<String>) {
        self.0
            .lock()
            .entry(method)
            .or_default()
            .push_back(message.into());
    }

    fn check(&self, service: &'static str, method: &'static str) -> Result<()> {
        match self.0.lock().get_mut(method).and_then(VecDeque::pop_front) {
            Some(message) => Err(Error::upstream(service, message)),
            None => Ok(()),
        }
    }
}

fn to_owned(addresses: Option<&[Address]>) -> Option<Vec<Address>> {
    addresses.map(<[Address]>::to_vec)
}

// ---------------------------------------------------------------------------
// Lens
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockLens {
    statics: Mutex<Vec<VaultStatic>>,
    dynamics: Mutex<Vec<VaultDynamic>>,
    tokens: Mutex<Vec<Address>>,
    positions: Mutex<Vec<Position>>,
    pub failures: Failures,
    pub static_calls: CallLog<Option<Vec<Address>>>,
    pub static_overrides: CallLog<Option<CallOverrides>>,
    pub dynamic_calls: CallLog<Option<Vec<Address>>>,
    pub token_calls: CallLog<Option<CallOverrides>>,
    pub position_calls: CallLog<(Address, Option<Vec<Address>>)>,
}

impl MockLens {
    pub fn set_statics(&self, statics: Vec<VaultStatic>) {
        *self.statics.lock() = statics;
    }

    pub fn set_dynamics(&self, dynamics: Vec<VaultDynamic>) {
        *self.dynamics.lock() = dynamics;
    }

    pub fn set_tokens(&self, tokens: Vec<Address>) {
        *self.tokens.lock() = tokens;
    }

    pub fn set_positions(&self, positions: Vec<Position>) {
        *self.positions.lock() = positions;
    }
}

#[async_trait]
impl VaultLens for MockLens {
    async fn assets_static(
        &self,
        addresses: Option<&[Address]>,
        overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultStatic>> {
        self.static_calls.record(to_owned(addresses));
        self.static_overrides.record(overrides.cloned());
        self.failures.check("lens", "assets_static")?;
        Ok(filter_by_address(self.statics.lock().clone(), addresses))
    }

    async fn assets_dynamic(
        &self,
        addresses: Option<&[Address]>,
        _overrides: Option<&CallOverrides>,
    ) -> Result<Vec<VaultDynamic>> {
        self.dynamic_calls.record(to_owned(addresses));
        self.failures.check("lens", "assets_dynamic")?;
        Ok(filter_by_address(self.dynamics.lock().clone(), addresses))
    }

    async fn tokens(&self, overrides: Option<&CallOverrides>) -> Result<Vec<Address>> {
        self.token_calls.record(overrides.cloned());
        self.failures.check("lens", "tokens")?;
        Ok(self.tokens.lock().clone())
    }

    async fn positions_of(
        &self,
        account: Address,
        addresses: Option<&[Address]>,
        _overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Position>> {
        self.position_calls.record((account, to_owned(addresses)));
        self.failures.check("lens", "positions_of")?;
        let positions = self.positions.lock().clone();
        Ok(match addresses {
            Some(addresses) => positions
                .into_iter()
                .filter(|p| addresses.contains(&p.asset_address))
                .collect(),
            None => positions,
        })
    }
}

// ---------------------------------------------------------------------------
// Metadata services
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockMeta {
    overrides: Mutex<Vec<VaultMetadataOverrides>>,
    token_metadata: Mutex<Vec<TokenMetadata>>,
    pub failures: Failures,
    pub override_calls: CallLog<()>,
    pub token_metadata_calls: CallLog<Vec<Address>>,
}

impl MockMeta {
    pub fn set_overrides(&self, overrides: Vec<VaultMetadataOverrides>) {
        *self.overrides.lock() = overrides;
    }

    pub fn set_token_metadata(&self, metadata: Vec<TokenMetadata>) {
        *self.token_metadata.lock() = metadata;
    }
}

#[async_trait]
impl MetaService for MockMeta {
    async fn vault_overrides(&self) -> Result<Vec<VaultMetadataOverrides>> {
        self.override_calls.record(());
        self.failures.check("meta", "vault_overrides")?;
        Ok(self.overrides.lock().clone())
    }

    async fn token_metadata(&self, addresses: &[Address]) -> Result<Vec<TokenMetadata>> {
        self.token_metadata_calls.record(addresses.to_vec());
        self.failures.check("meta", "token_metadata")?;
        Ok(self
            .token_metadata
            .lock()
            .iter()
            .filter(|m| addresses.contains(&m.address))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MockAssets {
    icons: Mutex<IconMap>,
    aliases: Mutex<HashMap<Address, TokenAlias>>,
    pub failures: Failures,
    pub icon_calls: CallLog<Address>,
    pub icons_calls: CallLog<Vec<Address>>,
    pub alias_calls: CallLog<Address>,
}

impl MockAssets {
    pub fn set_icon(&self, address: Address, url: impl Into<String>) {
        self.icons.lock().insert(address, url.into());
    }

    pub fn set_alias(&self, alias: TokenAlias) {
        self.aliases.lock().insert(alias.address, alias);
    }
}

#[async_trait]
impl AssetService for MockAssets {
    async fn icon(&self, address: Address) -> Result<IconMap> {
        self.icon_calls.record(address);
        self.failures.check("assets", "icon")?;
        Ok(self
            .icons
            .lock()
            .get(&address)
            .map(|url| IconMap::from([(address, url.clone())]))
            .unwrap_or_default())
    }

    async fn icons(&self, addresses: &[Address]) -> Result<IconMap> {
        self.icons_calls.record(addresses.to_vec());
        self.failures.check("assets", "icons")?;
        let icons = self.icons.lock();
        Ok(addresses
            .iter()
            .filter_map(|a| icons.get(a).map(|url| (*a, url.clone())))
            .collect())
    }

    async fn alias(&self, address: Address) -> Result<Option<TokenAlias>> {
        self.alias_calls.record(address);
        self.failures.check("assets", "alias")?;
        Ok(self.aliases.lock().get(&address).cloned())
    }
}

#[derive(Default)]
pub struct MockVision {
    apys: Mutex<ApyMap>,
    pub failures: Failures,
    pub calls: CallLog<Vec<Address>>,
}

impl MockVision {
    pub fn set_apys(&self, apys: ApyMap) {
        *self.apys.lock() = apys;
    }
}

#[async_trait]
impl VisionService for MockVision {
    async fn apy(&self, addresses: &[Address]) -> Result<ApyMap> {
        self.calls.record(addresses.to_vec());
        self.failures.check("vision", "apy")?;
        let apys = self.apys.lock();
        Ok(addresses
            .iter()
            .filter_map(|a| apys.get(a).map(|apy| (*a, apy.clone())))
            .collect())
    }
}

#[derive(Default)]
pub struct MockStrategies {
    metadata: Mutex<Vec<VaultStrategiesMetadata>>,
    pub failures: Failures,
    pub calls: CallLog<Vec<Address>>,
}

impl MockStrategies {
    pub fn set_metadata(&self, metadata: Vec<VaultStrategiesMetadata>) {
        *self.metadata.lock() = metadata;
    }
}

#[async_trait]
impl StrategiesService for MockStrategies {
    async fn vaults_strategies_metadata(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<VaultStrategiesMetadata>> {
        self.calls.record(addresses.to_vec());
        self.failures.check("strategies", "vaults_strategies_metadata")?;
        Ok(self.metadata.lock().clone())
    }
}

#[derive(Default)]
pub struct MockEarnings {
    user_data: Mutex<Option<EarningsUserData>>,
    historic: Mutex<Vec<AssetHistoricEarnings>>,
    pub failures: Failures,
    pub account_calls: CallLog<Address>,
    pub historic_calls: CallLog<Vec<Address>>,
}

impl MockEarnings {
    pub fn set_user_data(&self, data: EarningsUserData) {
        *self.user_data.lock() = Some(data);
    }

    pub fn set_historic(&self, historic: Vec<AssetHistoricEarnings>) {
        *self.historic.lock() = historic;
    }
}

#[async_trait]
impl EarningsService for MockEarnings {
    async fn account_assets_data(&self, account: Address) -> Result<EarningsUserData> {
        self.account_calls.record(account);
        self.failures.check("earnings", "account_assets_data")?;
        self.user_data
            .lock()
            .clone()
            .ok_or_else(|| Error::upstream("earnings", format!("no data for {account}")))
    }

    async fn assets_historic_earnings(
        &self,
        addresses: &[Address],
    ) -> Result<Vec<AssetHistoricEarnings>> {
        self.historic_calls.record(addresses.to_vec());
        self.failures.check("earnings", "assets_historic_earnings")?;
        Ok(self.historic.lock().clone())
    }
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MockTokenHelper {
    descriptors: Mutex<Vec<Erc20>>,
    balances: Mutex<Vec<TokenBalance>>,
    pub failures: Failures,
    pub token_calls: CallLog<Vec<Address>>,
    pub balance_calls: CallLog<(Address, Vec<Address>)>,
}

impl MockTokenHelper {
    pub fn set_descriptors(&self, descriptors: Vec<Erc20>) {
        *self.descriptors.lock() = descriptors;
    }

    /// Raw balances returned as-is, whatever addresses are requested.
    pub fn set_balances(&self, balances: Vec<TokenBalance>) {
        *self.balances.lock() = balances;
    }
}

#[async_trait]
impl TokenHelper for MockTokenHelper {
    async fn tokens(
        &self,
        addresses: &[Address],
        _overrides: Option<&CallOverrides>,
    ) -> Result<Vec<Erc20>> {
        self.token_calls.record(addresses.to_vec());
        self.failures.check("helper", "tokens")?;
        Ok(self
            .descriptors
            .lock()
            .iter()
            .filter(|d| addresses.contains(&d.address))
            .cloned()
            .collect())
    }

    async fn token_balances(
        &self,
        account: Address,
        addresses: &[Address],
        _overrides: Option<&CallOverrides>,
    ) -> Result<Vec<TokenBalance>> {
        self.balance_calls.record((account, addresses.to_vec()));
        self.failures.check("helper", "token_balances")?;
        Ok(self.balances.lock().clone())
    }
}

#[derive(Default)]
pub struct MockOracle {
    prices: Mutex<HashMap<Address, U256>>,
    pub failures: Failures,
    pub calls: CallLog<Address>,
}

impl MockOracle {
    pub fn set_price(&self, token: Address, price: U256) {
        self.prices.lock().insert(token, price);
    }
}

#[async_trait]
impl PriceOracle for MockOracle {
    async fn price_usdc(&self, token: Address, _overrides: Option<&CallOverrides>) -> Result<U256> {
        self.calls.record(token);
        self.failures.check("oracle", "price_usdc")?;
        Ok(self.prices.lock().get(&token).copied().unwrap_or_default())
    }
}

/// Arguments of an `approve` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveCall {
    pub owner: Address,
    pub token: Address,
    pub spender: Address,
    pub amount: U256,
}

#[derive(Default)]
pub struct MockAllowance {
    amount: Mutex<U256>,
    pub failures: Failures,
    pub allowance_calls: CallLog<(Address, Address, Address)>,
    pub approve_calls: CallLog<ApproveCall>,
}

impl MockAllowance {
    /// Amount reported for every allowance read.
    pub fn set_amount(&self, amount: U256) {
        *self.amount.lock() = amount;
    }
}

#[async_trait]
impl AllowanceService for MockAllowance {
    async fn allowance(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
    ) -> Result<TokenAllowance> {
        self.allowance_calls.record((owner, token, spender));
        self.failures.check("allowance", "allowance")?;
        Ok(TokenAllowance {
            owner,
            token,
            spender,
            amount: *self.amount.lock(),
        })
    }

    async fn approve(
        &self,
        owner: Address,
        token: Address,
        spender: Address,
        amount: U256,
        _overrides: Option<&CallOverrides>,
    ) -> Result<TransactionResponse> {
        self.approve_calls.record(ApproveCall {
            owner,
            token,
            spender,
            amount,
        });
        self.failures.check("allowance", "approve")?;
        Ok(TransactionResponse {
            hash: keccak256(spender),
            from: owner,
            to: token,
        })
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Encodes calls as readable markers instead of ABI data.
#[derive(Default)]
pub struct MockVaultContract {
    pub deposit_calls: CallLog<(Address, U256, Address)>,
    pub withdraw_calls: CallLog<(Address, U256, Address)>,
}

impl VaultContract for MockVaultContract {
    fn deposit(
        &self,
        vault: Address,
        amount: U256,
        account: Address,
    ) -> Result<TransactionRequest> {
        self.deposit_calls.record((vault, amount, account));
        Ok(TransactionRequest::call(
            account,
            vault,
            Bytes::from(format!("deposit:{amount}").into_bytes()),
        ))
    }

    fn withdraw(
        &self,
        vault: Address,
        amount: U256,
        account: Address,
    ) -> Result<TransactionRequest> {
        self.withdraw_calls.record((vault, amount, account));
        Ok(TransactionRequest::call(
            account,
            vault,
            Bytes::from(format!("withdraw:{amount}").into_bytes()),
        ))
    }
}

/// Gas filled in by [`MockSender::populate_transaction`].
pub const MOCK_GAS: u64 = 21_000;

#[derive(Default)]
pub struct MockSender {
    pub failures: Failures,
    pub populate_calls: CallLog<TransactionRequest>,
    pub sent: CallLog<TransactionRequest>,
}

#[async_trait]
impl TransactionSender for MockSender {
    async fn populate_transaction(&self, request: TransactionRequest) -> Result<TransactionRequest> {
        self.populate_calls.record(request.clone());
        self.failures.check("sender", "populate_transaction")?;
        Ok(TransactionRequest {
            gas: request.gas.or(Some(U256::from(MOCK_GAS))),
            ..request
        })
    }

    async fn send_transaction(&self, request: TransactionRequest) -> Result<TransactionResponse> {
        self.sent.record(request.clone());
        self.failures.check("sender", "send_transaction")?;
        Ok(TransactionResponse {
            hash: keccak256(&request.data),
            from: request.from,
            to: request.to,
        })
    }
}

pub struct MockPartner {
    partner_id: Address,
    address: Address,
    allowed: Mutex<HashSet<Address>>,
    pub failures: Failures,
    pub allowed_calls: CallLog<Address>,
    pub populate_calls: CallLog<(Address, U256, WriteOptions)>,
}

impl MockPartner {
    pub fn new(partner_id: Address, address: Address) -> Self {
        Self {
            partner_id,
            address,
            allowed: Mutex::new(HashSet::new()),
            failures: Failures::default(),
            allowed_calls: CallLog::default(),
            populate_calls: CallLog::default(),
        }
    }

    pub fn allow(&self, vault: Address) {
        self.allowed.lock().insert(vault);
    }
}

#[async_trait]
impl PartnerService for MockPartner {
    fn partner_id(&self) -> Address {
        self.partner_id
    }

    fn address(&self) -> Address {
        self.address
    }

    async fn is_allowed(&self, vault: Address) -> Result<bool> {
        self.allowed_calls.record(vault);
        self.failures.check("partner", "is_allowed")?;
        Ok(self.allowed.lock().contains(&vault))
    }

    async fn populate_deposit_transaction(
        &self,
        vault: Address,
        amount: U256,
        account: Address,
        options: &WriteOptions,
    ) -> Result<TransactionRequest> {
        self.populate_calls.record((vault, amount, options.clone()));
        self.failures.check("partner", "populate_deposit_transaction")?;
        Ok(TransactionRequest::call(
            account,
            self.address,
            Bytes::from(format!("partner-deposit:{vault}:{amount}").into_bytes()),
        ))
    }
}

pub struct MockZap {
    name: &'static str,
    supported: Mutex<Vec<Address>>,
    in_spender: Address,
    out_spender: Address,
    pub failures: Failures,
    pub supported_calls: CallLog<()>,
    pub zap_in_calls: CallLog<ZapRequest>,
    pub zap_out_calls: CallLog<ZapRequest>,
}

impl MockZap {
    pub fn new(name: &'static str, in_spender: Address, out_spender: Address) -> Self {
        Self {
            name,
            supported: Mutex::new(Vec::new()),
            in_spender,
            out_spender,
            failures: Failures::default(),
            supported_calls: CallLog::default(),
            zap_in_calls: CallLog::default(),
            zap_out_calls: CallLog::default(),
        }
    }

    pub fn support(&self, vault: Address) {
        self.supported.lock().push(vault);
    }

    pub fn in_spender(&self) -> Address {
        self.in_spender
    }

    pub fn out_spender(&self) -> Address {
        self.out_spender
    }
}

#[async_trait]
impl ZapBackend for MockZap {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn supported_vault_addresses(&self) -> Result<Vec<Address>> {
        self.supported_calls.record(());
        self.failures.check(self.name, "supported_vault_addresses")?;
        Ok(self.supported.lock().clone())
    }

    async fn zap_in(&self, request: &ZapRequest) -> Result<TransactionRequest> {
        self.zap_in_calls.record(request.clone());
        self.failures.check(self.name, "zap_in")?;
        Ok(TransactionRequest::call(
            request.account,
            self.in_spender,
            Bytes::from(format!("{}-zap-in:{}", self.name, request.protocol).into_bytes()),
        ))
    }

    async fn zap_out(&self, request: &ZapRequest) -> Result<TransactionRequest> {
        self.zap_out_calls.record(request.clone());
        self.failures.check(self.name, "zap_out")?;
        Ok(TransactionRequest::call(
            request.account,
            self.out_spender,
            Bytes::from(format!("{}-zap-out:{}", self.name, request.protocol).into_bytes()),
        ))
    }

    async fn zap_in_spender(&self, _vault: Address, _token: Address) -> Result<Address> {
        Ok(self.in_spender)
    }

    async fn zap_out_spender(&self, _vault: Address, _token: Address) -> Result<Address> {
        Ok(self.out_spender)
    }
}

#[derive(Default)]
pub struct MockProperties {
    properties: Mutex<Option<RawVaultProperties>>,
    pub calls: CallLog<Address>,
}

impl MockProperties {
    pub fn set_properties(&self, properties: RawVaultProperties) {
        *self.properties.lock() = Some(properties);
    }
}

#[async_trait]
impl PropertiesAggregator for MockProperties {
    async fn get_properties(&self, vault: Address) -> Result<RawVaultProperties> {
        self.calls.record(vault);
        self.properties
            .lock()
            .clone()
            .ok_or_else(|| Error::upstream("properties", format!("no properties for {vault}")))
    }
}

// ---------------------------------------------------------------------------
// MockSet
// ---------------------------------------------------------------------------

/// Partner id used by [`MockSet::with_partner`].
pub const MOCK_PARTNER_ID: Address = Address::repeat_byte(0x9a);
/// Partner tracker contract used by [`MockSet::with_partner`].
pub const MOCK_PARTNER_ADDRESS: Address = Address::repeat_byte(0x9b);
/// Spenders of the default zap backend.
pub const MOCK_ZAP_IN_SPENDER: Address = Address::repeat_byte(0x7a);
pub const MOCK_ZAP_OUT_SPENDER: Address = Address::repeat_byte(0x7b);

/// One mock per port, with handles kept for assertions.
pub struct MockSet {
    pub chain_id: ChainId,
    pub lens: Arc<MockLens>,
    pub meta: Arc<MockMeta>,
    pub assets: Arc<MockAssets>,
    pub vision: Arc<MockVision>,
    pub strategies: Arc<MockStrategies>,
    pub earnings: Arc<MockEarnings>,
    pub helper: Arc<MockTokenHelper>,
    pub oracle: Arc<MockOracle>,
    pub allowance: Arc<MockAllowance>,
    pub vault_contract: Arc<MockVaultContract>,
    pub sender: Arc<MockSender>,
    pub partner: Option<Arc<MockPartner>>,
    pub zaps: Vec<Arc<MockZap>>,
    pub properties: Arc<MockProperties>,
    pub token_overrides: TokenOverrides,
    pub jars: JarRegistry,
    pub caches: VaultCaches,
}

impl MockSet {
    /// Mainnet mocks with one zap backend, no partner, and caching disabled.
    pub fn new() -> Self {
        Self {
            chain_id: ChainId::Mainnet,
            lens: Arc::default(),
            meta: Arc::default(),
            assets: Arc::default(),
            vision: Arc::default(),
            strategies: Arc::default(),
            earnings: Arc::default(),
            helper: Arc::default(),
            oracle: Arc::default(),
            allowance: Arc::default(),
            vault_contract: Arc::default(),
            sender: Arc::default(),
            partner: None,
            zaps: vec![Arc::new(MockZap::new(
                "zapper",
                MOCK_ZAP_IN_SPENDER,
                MOCK_ZAP_OUT_SPENDER,
            ))],
            properties: Arc::default(),
            token_overrides: TokenOverrides::default(),
            jars: JarRegistry::default(),
            caches: VaultCaches::default(),
        }
    }

    #[must_use]
    pub fn with_chain(mut self, chain_id: ChainId) -> Self {
        self.chain_id = chain_id;
        self
    }

    #[must_use]
    pub fn with_partner(mut self) -> Self {
        self.partner = Some(Arc::new(MockPartner::new(
            MOCK_PARTNER_ID,
            MOCK_PARTNER_ADDRESS,
        )));
        self
    }

    /// Append a backend after the default one.
    #[must_use]
    pub fn with_zap(mut self, zap: MockZap) -> Self {
        self.zaps.push(Arc::new(zap));
        self
    }

    #[must_use]
    pub fn with_jars(mut self, jars: JarRegistry) -> Self {
        self.jars = jars;
        self
    }

    #[must_use]
    pub fn with_token_overrides(mut self, overrides: TokenOverrides) -> Self {
        self.token_overrides = overrides;
        self
    }

    /// Back every cached list with its own in-memory store.
    #[must_use]
    pub fn with_memory_cache(mut self) -> Self {
        self.caches = VaultCaches {
            vaults: Some(Arc::new(MemoryCache::<Vault>::new(None))),
            dynamic: Some(Arc::new(MemoryCache::<VaultDynamic>::new(None))),
            tokens: Some(Arc::new(MemoryCache::<Token>::new(None))),
        };
        self
    }

    /// The default zap backend.
    pub fn zap(&self) -> &MockZap {
        &self.zaps[0]
    }

    /// The partner mock; panics unless built [`with_partner`](Self::with_partner).
    pub fn partner(&self) -> &MockPartner {
        match &self.partner {
            Some(partner) => partner,
            None => panic!("MockSet built without a partner"),
        }
    }

    pub fn services(&self) -> VaultServices {
        VaultServices {
            chain_id: self.chain_id,
            lens: self.lens.clone(),
            meta: self.meta.clone(),
            assets: self.assets.clone(),
            vision: self.vision.clone(),
            strategies: self.strategies.clone(),
            earnings: self.earnings.clone(),
            helper: self.helper.clone(),
            oracle: self.oracle.clone(),
            allowance: self.allowance.clone(),
            vault_contract: self.vault_contract.clone(),
            sender: self.sender.clone(),
            partner: self
                .partner
                .clone()
                .map(|p| p as Arc<dyn PartnerService>),
            zaps: self
                .zaps
                .iter()
                .map(|z| z.clone() as Arc<dyn ZapBackend>)
                .collect(),
            properties: self.properties.clone(),
            token_hook: Arc::new(self.token_overrides.clone()),
            jars: self.jars.clone(),
            caches: self.caches.clone(),
        }
    }
}

impl Default for MockSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a mock sender would report for `request`.
pub fn sent_hash(request: &TransactionRequest) -> B256 {
    keccak256(&request.data)
}
