use crate as pallet_automation_master;

use codec::{Decode, Encode};
use polkadot_sdk::frame_support::traits::fungibles::Mutate as FungiblesMutate;
use polkadot_sdk::frame_support::traits::tokens::Preservation;
use polkadot_sdk::frame_support::{
  BoundedVec, PalletId, construct_runtime, derive_impl,
  traits::{ConstU32, ConstU128, Get},
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{
  Balance, OracleId, OrderType, Price, PriceFeed, SwapVenue, TokenId, params::PRICE_SCALE,
};
use std::cell::RefCell;
use std::collections::BTreeMap;

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const KEEPER: u64 = 3;
pub const PAUSER: u64 = 4;
pub const SETTER: u64 = 5;
pub const TREASURY: u64 = 50;
pub const DEX: u64 = 100;
pub const ROGUE_DEX: u64 = 101;

pub const WETH: TokenId = 1;
pub const USDC: TokenId = 2;
pub const WBTC: TokenId = 3;

pub const WETH_FEED: OracleId = 11;
pub const USDC_FEED: OracleId = 12;
pub const WBTC_FEED: OracleId = 13;

pub const ONE_WETH: Balance = 1_000_000_000_000_000_000;
pub const ONE_USDC: Balance = 1_000_000;
pub const ONE_WBTC: Balance = 100_000_000;

pub const NATIVE_BALANCE: Balance = 1_000_000;
/// Minimum order value, $10
pub const MIN_ORDER_USD: Price = 10 * PRICE_SCALE;

thread_local! {
    // USD prices by feed, 1e8-scaled
    pub static FEEDS: RefCell<BTreeMap<OracleId, Price>> = const { RefCell::new(BTreeMap::new()) };
}

pub fn set_price(feed: OracleId, usd: Price) {
  FEEDS.with(|f| f.borrow_mut().insert(feed, usd * PRICE_SCALE));
}

/// Exchange rate of `whole` output units per input unit, 1e8-scaled
pub fn rate(whole: Price) -> Price {
  whole * PRICE_SCALE
}

pub struct MockPriceFeed;
impl PriceFeed for MockPriceFeed {
  fn latest_price(oracle: OracleId) -> Option<Price> {
    FEEDS.with(|f| f.borrow().get(&oracle).copied())
  }
}

/// Route the keeper hands to the venue, SCALE-encoded as call data
#[derive(Clone, Debug, Decode, Encode)]
pub struct MockSwap {
  pub pay: (TokenId, Balance),
  pub receive: (TokenId, Balance),
}

impl MockSwap {
  pub fn new(pay: (TokenId, Balance), receive: (TokenId, Balance)) -> Self {
    Self { pay, receive }
  }
}

pub struct MockVenue;
impl SwapVenue<u64> for MockVenue {
  fn execute(caller: &u64, target: &u64, call_data: &[u8]) -> DispatchResult {
    let swap = MockSwap::decode(&mut &call_data[..])
      .map_err(|_| DispatchError::Other("undecodable swap"))?;
    let (token_in, amount_in) = swap.pay;
    <Assets as FungiblesMutate<u64>>::transfer(
      token_in,
      caller,
      target,
      amount_in,
      Preservation::Expendable,
    )?;
    let (token_out, amount_out) = swap.receive;
    <Assets as FungiblesMutate<u64>>::transfer(
      token_out,
      target,
      caller,
      amount_out,
      Preservation::Expendable,
    )?;
    Ok(())
  }
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    AutomationMaster: pallet_automation_master,
    StopLimit: pallet_stop_limit,
    Bracket: pallet_bracket,
    OracleLess: pallet_oracle_less,
  }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
  type Block = Block;
  type AccountId = u64;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Hash = H256;
  type Hashing = BlakeTwo256;
  type AccountData = polkadot_sdk::pallet_balances::AccountData<u128>;
}

impl polkadot_sdk::pallet_balances::Config for Test {
  type MaxLocks = ();
  type MaxReserves = ();
  type ReserveIdentifier = [u8; 8];
  type Balance = u128;
  type DustRemoval = ();
  type RuntimeEvent = RuntimeEvent;
  type ExistentialDeposit = ConstU128<1>;
  type AccountStore = System;
  type WeightInfo = ();
  type FreezeIdentifier = ();
  type MaxFreezes = ();
  type RuntimeHoldReason = ();
  type RuntimeFreezeReason = ();
  type DoneSlashHandler = ();
}

impl polkadot_sdk::pallet_assets::Config for Test {
  type RuntimeEvent = RuntimeEvent;
  type Balance = u128;
  type AssetId = u32;
  type AssetIdParameter = u32;
  type Currency = Balances;
  type CreateOrigin = polkadot_sdk::frame_support::traits::AsEnsureOriginWithArg<
    frame_system::EnsureSigned<Self::AccountId>,
  >;
  type ForceOrigin = frame_system::EnsureRoot<Self::AccountId>;
  type AssetDeposit = ConstU128<1>;
  type AssetAccountDeposit = ConstU128<1>;
  type MetadataDepositBase = ConstU128<1>;
  type MetadataDepositPerByte = ConstU128<1>;
  type ApprovalDeposit = ConstU128<1>;
  type StringLimit = ConstU32<50>;
  type Freezer = ();
  type Extra = ();
  type ReserveData = ();
  type CallbackHandle = ();
  type WeightInfo = ();
  type RemoveItemsLimit = ConstU32<5>;
  type Holder = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = AssetBenchmarkHelper;
}

#[cfg(feature = "runtime-benchmarks")]
pub struct AssetBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl polkadot_sdk::pallet_assets::BenchmarkHelper<u32, ()> for AssetBenchmarkHelper {
  fn create_asset_id_parameter(id: u32) -> u32 {
    id
  }
  fn create_reserve_id_parameter(_id: u32) -> () {
    ()
  }
}

pub struct AutomationMasterPalletId;
impl Get<PalletId> for AutomationMasterPalletId {
  fn get() -> PalletId {
    PalletId(primitives::pallet_ids::AUTOMATION_MASTER_PALLET_ID)
  }
}

pub struct StopLimitPalletId;
impl Get<PalletId> for StopLimitPalletId {
  fn get() -> PalletId {
    PalletId(primitives::pallet_ids::STOP_LIMIT_PALLET_ID)
  }
}

pub struct BracketPalletId;
impl Get<PalletId> for BracketPalletId {
  fn get() -> PalletId {
    PalletId(primitives::pallet_ids::BRACKET_PALLET_ID)
  }
}

pub struct OracleLessPalletId;
impl Get<PalletId> for OracleLessPalletId {
  fn get() -> PalletId {
    PalletId(primitives::pallet_ids::ORACLE_LESS_PALLET_ID)
  }
}

impl pallet_automation_master::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type PriceFeed = MockPriceFeed;
  type StopLimit = StopLimit;
  type Bracket = Bracket;
  type OracleLess = OracleLess;
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type PalletId = AutomationMasterPalletId;
  type MaxBatchSize = ConstU32<16>;
  type MaxRegisteredTokens = ConstU32<16>;
  type MaxPerformDataLen = ConstU32<1024>;
  type MaxOrdersPerBook = ConstU32<100>;
  type WeightInfo = ();
}

impl pallet_stop_limit::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type Master = AutomationMaster;
  type Bracket = Bracket;
  type SwapVenue = MockVenue;
  type PreAuthorizedTransfer = ();
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type PalletId = StopLimitPalletId;
  type MaxPendingOrders = ConstU32<100>;
  type MaxCallDataLen = ConstU32<256>;
  type WeightInfo = ();
}

impl pallet_bracket::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type Master = AutomationMaster;
  type SwapVenue = MockVenue;
  type PreAuthorizedTransfer = ();
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type PalletId = BracketPalletId;
  type MaxPendingOrders = ConstU32<100>;
  type MaxCallDataLen = ConstU32<256>;
  type WeightInfo = ();
}

impl pallet_oracle_less::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type Master = AutomationMaster;
  type SwapVenue = MockVenue;
  type PreAuthorizedTransfer = ();
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type PalletId = OracleLessPalletId;
  type MaxPendingOrders = ConstU32<100>;
  type MaxCallDataLen = ConstU32<256>;
  type MaxBatchSize = ConstU32<16>;
  type WeightInfo = ();
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  polkadot_sdk::pallet_balances::GenesisConfig::<Test> {
    balances: [ALICE, BOB, KEEPER, PAUSER, SETTER, DEX, ROGUE_DEX]
      .into_iter()
      .map(|acc| (acc, NATIVE_BALANCE))
      .collect(),
    dev_accounts: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  let holdings = |acc| {
    [
      (WETH, acc, 100 * ONE_WETH),
      (USDC, acc, 1_000_000 * ONE_USDC),
      (WBTC, acc, 10 * ONE_WBTC),
    ]
  };
  polkadot_sdk::pallet_assets::GenesisConfig::<Test> {
    assets: vec![
      (WETH, ALICE, true, 1),
      (USDC, ALICE, true, 1),
      (WBTC, ALICE, true, 1),
    ],
    metadata: vec![
      (WETH, b"Wrapped Ether".to_vec(), b"WETH".to_vec(), 18),
      (USDC, b"USD Coin".to_vec(), b"USDC".to_vec(), 6),
      (WBTC, b"Wrapped Bitcoin".to_vec(), b"WBTC".to_vec(), 8),
    ],
    accounts: [ALICE, BOB]
      .into_iter()
      .flat_map(holdings)
      .chain([
        (WETH, DEX, 10_000 * ONE_WETH),
        (USDC, DEX, 100_000_000 * ONE_USDC),
        (WBTC, DEX, 1_000 * ONE_WBTC),
      ])
      .collect(),
    reserves: vec![],
    next_asset_id: None,
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_automation_master::GenesisConfig::<Test> {
    order_fee: 0,
    min_order_size: MIN_ORDER_USD,
    max_pending_orders: 50,
    sub_keepers: vec![OrderType::StopLimit, OrderType::Bracket, OrderType::OracleLess],
    oracles: vec![(WETH, WETH_FEED), (USDC, USDC_FEED), (WBTC, WBTC_FEED)],
    target_setters: vec![SETTER],
    pauser: Some(PAUSER),
  }
  .assimilate_storage(&mut t)
  .unwrap();

  pallet_stop_limit::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();
  pallet_bracket::GenesisConfig::<Test>::default()
    .assimilate_storage(&mut t)
    .unwrap();
  pallet_oracle_less::GenesisConfig::<Test> {
    whitelisted_tokens: vec![WETH, USDC, WBTC],
    ..Default::default()
  }
  .assimilate_storage(&mut t)
  .unwrap();

  FEEDS.with(|f| f.borrow_mut().clear());

  let mut ext: polkadot_sdk::sp_io::TestExternalities = t.into();
  ext.execute_with(|| {
    set_price(WETH_FEED, 3_000);
    set_price(USDC_FEED, 1);
    set_price(WBTC_FEED, 60_000);
    let dex = BoundedVec::try_from(vec![DEX]).unwrap();
    let _ = AutomationMaster::whitelist_targets(RuntimeOrigin::signed(SETTER), dex);
  });
  ext
}
