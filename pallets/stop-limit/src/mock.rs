use crate as pallet_stop_limit;

use codec::{Decode, Encode};
use polkadot_sdk::frame_support::traits::fungibles::Mutate as FungiblesMutate;
use polkadot_sdk::frame_support::traits::tokens::Preservation;
use polkadot_sdk::frame_support::{
  PalletId, construct_runtime, derive_impl,
  traits::{ConstU32, ConstU128, Currency, Get},
};
use polkadot_sdk::frame_system;
use polkadot_sdk::sp_runtime::{
  BuildStorage, DispatchError, DispatchResult,
  testing::H256,
  traits::{BlakeTwo256, IdentityLookup},
};
use primitives::{
  AutomationContext, Balance, Bips, BracketFactory, BracketParams, OrderId, Price,
  PreAuthorizedTransfer, SwapVenue, TokenId,
  params::{MAX_BIPS, PRICE_SCALE},
};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const KEEPER: u64 = 3;
pub const PAUSER: u64 = 4;
pub const FEE_COLLECTOR: u64 = 99;
pub const DEX: u64 = 100;
pub const ROGUE_DEX: u64 = 101;
pub const BRACKET_ESCROW: u64 = 200;

pub const WETH: TokenId = 1;
pub const USDC: TokenId = 2;
pub const WBTC: TokenId = 3;
pub const UNPRICED: TokenId = 4;

pub const INITIAL_BALANCE: Balance = 1_000_000;

thread_local! {
    // USD prices, 1e8-scaled
    pub static PRICES: RefCell<BTreeMap<TokenId, Price>> = const { RefCell::new(BTreeMap::new()) };
    pub static TARGETS: RefCell<BTreeSet<u64>> = const { RefCell::new(BTreeSet::new()) };
    pub static MASTER_PAUSED: RefCell<bool> = const { RefCell::new(false) };
    pub static ORDER_FEE: RefCell<Balance> = const { RefCell::new(0) };
    // USD, whole units
    pub static MIN_ORDER_SIZE: RefCell<Balance> = const { RefCell::new(0) };
    pub static MAX_PENDING: RefCell<u32> = const { RefCell::new(25) };
    pub static LAST_ORDER_ID: RefCell<OrderId> = const { RefCell::new(0) };
    pub static CONVERTED: RefCell<Vec<BracketParams<u64>>> = const { RefCell::new(Vec::new()) };
}

pub fn set_price(token: TokenId, usd: Price) {
  PRICES.with(|p| p.borrow_mut().insert(token, usd * PRICE_SCALE));
}

pub fn set_master_paused(paused: bool) {
  MASTER_PAUSED.with(|p| *p.borrow_mut() = paused);
}

pub fn set_order_fee(fee: Balance) {
  ORDER_FEE.with(|f| *f.borrow_mut() = fee);
}

pub fn set_min_order_size(usd: Balance) {
  MIN_ORDER_SIZE.with(|m| *m.borrow_mut() = usd);
}

pub fn set_max_pending(max: u32) {
  MAX_PENDING.with(|m| *m.borrow_mut() = max);
}

pub fn converted_orders() -> Vec<BracketParams<u64>> {
  CONVERTED.with(|c| c.borrow().clone())
}

/// Swap the mock venue performs, SCALE-encoded as call data.
#[derive(Clone, Debug, Decode, Encode)]
pub struct MockSwap {
  pub pay: (TokenId, Balance),
  pub receive: (TokenId, Balance),
  /// Extra amount the venue pulls from the caller
  pub drain: Option<(TokenId, Balance)>,
  /// Call back into the order book mid-swap
  pub reenter: bool,
}

impl MockSwap {
  pub fn new(pay: (TokenId, Balance), receive: (TokenId, Balance)) -> Self {
    Self {
      pay,
      receive,
      drain: None,
      reenter: false,
    }
  }
}

pub struct MockVenue;
impl SwapVenue<u64> for MockVenue {
  fn execute(caller: &u64, target: &u64, call_data: &[u8]) -> DispatchResult {
    let swap = MockSwap::decode(&mut &call_data[..])
      .map_err(|_| DispatchError::Other("undecodable swap"))?;
    if swap.reenter {
      StopLimit::cancel_order(RuntimeOrigin::signed(ALICE), 1)?;
    }
    let (token_in, amount_in) = swap.pay;
    <Assets as FungiblesMutate<u64>>::transfer(
      token_in,
      caller,
      target,
      amount_in,
      Preservation::Expendable,
    )?;
    if let Some((token, amount)) = swap.drain {
      <Assets as FungiblesMutate<u64>>::transfer(token, caller, target, amount, Preservation::Expendable)?;
    }
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

/// Accepts `b"signed"` in full and `b"short"` at half the amount
pub struct MockPermit;
impl PreAuthorizedTransfer<u64> for MockPermit {
  fn pull(owner: &u64, token: TokenId, amount: Balance, to: &u64, payload: &[u8]) -> DispatchResult {
    let amount = match payload {
      b"signed" => amount,
      b"short" => amount / 2,
      _ => return Err(DispatchError::Other("invalid permit")),
    };
    <Assets as FungiblesMutate<u64>>::transfer(token, owner, to, amount, Preservation::Expendable)?;
    Ok(())
  }
}

/// Same-decimals stand-in for the automation master
pub struct MockMaster;
impl AutomationContext<u64> for MockMaster {
  fn is_paused() -> bool {
    MASTER_PAUSED.with(|p| *p.borrow())
  }

  fn is_pauser(who: &u64) -> bool {
    *who == PAUSER
  }

  fn exchange_rate(token_in: TokenId, token_out: TokenId) -> Result<Price, DispatchError> {
    let price = |token| PRICES.with(|p| p.borrow().get(&token).copied());
    let price_in = price(token_in).ok_or(DispatchError::Other("OracleNotFound"))?;
    let price_out = price(token_out)
      .filter(|p| *p > 0)
      .ok_or(DispatchError::Other("OracleNotFound"))?;
    Ok(price_in * PRICE_SCALE / price_out)
  }

  fn min_amount_received(
    amount_in: Balance,
    token_in: TokenId,
    token_out: TokenId,
    slippage: Bips,
  ) -> Result<Balance, DispatchError> {
    let rate = Self::exchange_rate(token_in, token_out)?;
    let fair = amount_in * rate / PRICE_SCALE;
    Ok(fair * (MAX_BIPS - slippage) as Balance / MAX_BIPS as Balance)
  }

  fn check_min_order_size(token: TokenId, amount: Balance) -> DispatchResult {
    let price = PRICES
      .with(|p| p.borrow().get(&token).copied())
      .ok_or(DispatchError::Other("OracleNotFound"))?;
    let min = MIN_ORDER_SIZE.with(|m| *m.borrow());
    if amount * price / PRICE_SCALE < min {
      return Err(DispatchError::Other("OrderTooSmall"));
    }
    Ok(())
  }

  fn validate_target(target: &u64) -> DispatchResult {
    if TARGETS.with(|t| t.borrow().contains(target)) {
      Ok(())
    } else {
      Err(DispatchError::Other("TargetNotValid"))
    }
  }

  fn max_pending_orders() -> u32 {
    MAX_PENDING.with(|m| *m.borrow())
  }

  fn order_fee() -> Balance {
    ORDER_FEE.with(|f| *f.borrow())
  }

  fn next_order_id() -> OrderId {
    LAST_ORDER_ID.with(|id| {
      *id.borrow_mut() += 1;
      *id.borrow()
    })
  }

  fn fee_collector() -> u64 {
    FEE_COLLECTOR
  }
}

/// Records conversions instead of running a bracket book
pub struct MockBracketFactory;
impl BracketFactory<u64> for MockBracketFactory {
  fn escrow_account() -> u64 {
    BRACKET_ESCROW
  }

  fn register_converted_order(params: BracketParams<u64>) -> DispatchResult {
    CONVERTED.with(|c| c.borrow_mut().push(params));
    Ok(())
  }
}

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
    StopLimit: pallet_stop_limit,
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

pub struct StopLimitPalletId;
impl Get<PalletId> for StopLimitPalletId {
  fn get() -> PalletId {
    PalletId(primitives::pallet_ids::STOP_LIMIT_PALLET_ID)
  }
}

impl pallet_stop_limit::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type Master = MockMaster;
  type Bracket = MockBracketFactory;
  type SwapVenue = MockVenue;
  type PreAuthorizedTransfer = MockPermit;
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type PalletId = StopLimitPalletId;
  type MaxPendingOrders = ConstU32<100>;
  type MaxCallDataLen = ConstU32<128>;
  type WeightInfo = ();
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let ext = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  let mut ext: polkadot_sdk::sp_io::TestExternalities = ext.into();

  PRICES.with(|p| p.borrow_mut().clear());
  TARGETS.with(|t| {
    let mut targets = t.borrow_mut();
    targets.clear();
    targets.insert(DEX);
  });
  MASTER_PAUSED.with(|p| *p.borrow_mut() = false);
  ORDER_FEE.with(|f| *f.borrow_mut() = 0);
  MIN_ORDER_SIZE.with(|m| *m.borrow_mut() = 0);
  MAX_PENDING.with(|m| *m.borrow_mut() = 25);
  LAST_ORDER_ID.with(|id| *id.borrow_mut() = 0);
  CONVERTED.with(|c| c.borrow_mut().clear());

  ext.execute_with(|| {
    for acc in [ALICE, BOB, KEEPER, FEE_COLLECTOR, DEX, ROGUE_DEX] {
      let _ = Balances::deposit_creating(&acc, 1_000);
    }
    for token in [WETH, USDC, WBTC, UNPRICED] {
      let _ = Assets::force_create(RuntimeOrigin::root(), token, ALICE, true, 1);
      for acc in [ALICE, BOB, DEX, ROGUE_DEX] {
        let _ = Assets::mint_into(token, &acc, INITIAL_BALANCE);
      }
    }
    set_price(WETH, 3_000);
    set_price(USDC, 1);
    set_price(WBTC, 60_000);
  });
  ext
}
