use crate as pallet_oracle_less;

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
  AutomationContext, Balance, Bips, OrderId, Price, PreAuthorizedTransfer, SwapVenue, TokenId,
};
use std::cell::RefCell;
use std::collections::BTreeSet;

pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const KEEPER: u64 = 3;
pub const PAUSER: u64 = 4;
pub const FEE_COLLECTOR: u64 = 99;
pub const DEX: u64 = 100;
pub const ROGUE_DEX: u64 = 101;

pub const WETH: TokenId = 1;
pub const USDC: TokenId = 2;
pub const WBTC: TokenId = 3;
pub const UNLISTED: TokenId = 4;

pub const INITIAL_BALANCE: Balance = 1_000_000;

thread_local! {
    pub static TARGETS: RefCell<BTreeSet<u64>> = const { RefCell::new(BTreeSet::new()) };
    pub static MASTER_PAUSED: RefCell<bool> = const { RefCell::new(false) };
    pub static ORDER_FEE: RefCell<Balance> = const { RefCell::new(0) };
    pub static MAX_PENDING: RefCell<u32> = const { RefCell::new(25) };
    pub static LAST_ORDER_ID: RefCell<OrderId> = const { RefCell::new(0) };
}

pub fn set_master_paused(paused: bool) {
  MASTER_PAUSED.with(|p| *p.borrow_mut() = paused);
}

pub fn set_order_fee(fee: Balance) {
  ORDER_FEE.with(|f| *f.borrow_mut() = fee);
}

pub fn set_max_pending(max: u32) {
  MAX_PENDING.with(|m| *m.borrow_mut() = max);
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
      OracleLess::cancel_order(RuntimeOrigin::signed(ALICE), 1)?;
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

/// Automation master without an oracle registry
pub struct MockMaster;
impl AutomationContext<u64> for MockMaster {
  fn is_paused() -> bool {
    MASTER_PAUSED.with(|p| *p.borrow())
  }

  fn is_pauser(who: &u64) -> bool {
    *who == PAUSER
  }

  fn exchange_rate(_token_in: TokenId, _token_out: TokenId) -> Result<Price, DispatchError> {
    Err(DispatchError::Other("OracleNotFound"))
  }

  fn min_amount_received(
    _amount_in: Balance,
    _token_in: TokenId,
    _token_out: TokenId,
    _slippage: Bips,
  ) -> Result<Balance, DispatchError> {
    Err(DispatchError::Other("OracleNotFound"))
  }

  fn check_min_order_size(_token: TokenId, _amount: Balance) -> DispatchResult {
    Err(DispatchError::Other("OracleNotFound"))
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

type Block = frame_system::mocking::MockBlock<Test>;

construct_runtime!(
  pub struct Test {
    System: frame_system,
    Balances: polkadot_sdk::pallet_balances,
    Assets: polkadot_sdk::pallet_assets,
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

pub struct OracleLessPalletId;
impl Get<PalletId> for OracleLessPalletId {
  fn get() -> PalletId {
    PalletId(primitives::pallet_ids::ORACLE_LESS_PALLET_ID)
  }
}

impl pallet_oracle_less::Config for Test {
  type Assets = Assets;
  type Currency = Balances;
  type Master = MockMaster;
  type SwapVenue = MockVenue;
  type PreAuthorizedTransfer = MockPermit;
  type AdminOrigin = frame_system::EnsureRoot<u64>;
  type PalletId = OracleLessPalletId;
  type MaxPendingOrders = ConstU32<100>;
  type MaxCallDataLen = ConstU32<256>;
  type MaxBatchSize = ConstU32<8>;
  type WeightInfo = ();
}

pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  let ext = frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();
  let mut ext: polkadot_sdk::sp_io::TestExternalities = ext.into();

  TARGETS.with(|t| {
    let mut targets = t.borrow_mut();
    targets.clear();
    targets.insert(DEX);
  });
  MASTER_PAUSED.with(|p| *p.borrow_mut() = false);
  ORDER_FEE.with(|f| *f.borrow_mut() = 0);
  MAX_PENDING.with(|m| *m.borrow_mut() = 25);
  LAST_ORDER_ID.with(|id| *id.borrow_mut() = 0);

  ext.execute_with(|| {
    for acc in [ALICE, BOB, KEEPER, FEE_COLLECTOR, DEX, ROGUE_DEX] {
      let _ = Balances::deposit_creating(&acc, 1_000);
    }
    for token in [WETH, USDC, WBTC, UNLISTED] {
      let _ = Assets::force_create(RuntimeOrigin::root(), token, ALICE, true, 1);
      for acc in [ALICE, BOB, DEX, ROGUE_DEX] {
        let _ = Assets::mint_into(token, &acc, INITIAL_BALANCE);
      }
    }
    for token in [WETH, USDC, WBTC] {
      pallet_oracle_less::WhitelistedTokens::<Test>::insert(token, ());
    }
  });
  ext
}
