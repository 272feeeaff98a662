use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use core::ops::Range;
use polkadot_sdk::sp_runtime::traits::TrailingZeroInput;
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};
use sp_arithmetic::{PerThing, Permill};

extern crate alloc;
use alloc::vec::Vec;

use crate::ecosystem::{Balance, params::MAX_BIPS};

/// Asset identifier of a token held in the `fungibles` asset pallet.
pub type TokenId = u32;
/// Globally unique order identifier issued by the automation master.
pub type OrderId = u64;
/// USD price or exchange rate scaled by `params::PRICE_SCALE`.
pub type Price = u128;
/// Basis points, `0..=10_000`.
pub type Bips = u16;
/// Handle of a price feed understood by the `PriceFeed` collaborator.
pub type OracleId = u32;

/// Order kind carried as the leading tag byte of every upkeep instruction.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum OrderType {
  #[codec(index = 0)]
  StopLimit,
  #[codec(index = 1)]
  Bracket,
  #[codec(index = 2)]
  OracleLess,
}

impl OrderType {
  /// Priority in which the master polls sub-keepers.
  pub const PRIORITY: [OrderType; 3] = [OrderType::StopLimit, OrderType::Bracket, OrderType::OracleLess];

  pub fn from_tag(tag: u8) -> Option<Self> {
    match tag {
      0 => Some(OrderType::StopLimit),
      1 => Some(OrderType::Bracket),
      2 => Some(OrderType::OracleLess),
      _ => None,
    }
  }

  pub fn tag(self) -> u8 {
    match self {
      OrderType::StopLimit => 0,
      OrderType::Bracket => 1,
      OrderType::OracleLess => 2,
    }
  }
}

/// Instruction produced by `check_upkeep` and consumed by `perform_upkeep`.
///
/// Everything in here is a hint: the executing pallet re-reads the order by id and
/// re-evaluates the trigger against the current price before moving any funds.
/// `target` and `call_data` are filled in by the keeper with a concrete swap route.
#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct UpkeepInstruction<AccountId> {
  pub order_type: OrderType,
  pub target: AccountId,
  pub token_in: TokenId,
  pub token_out: TokenId,
  pub order_id: OrderId,
  pub pending_order_idx: u32,
  pub bips: Bips,
  pub amount_in: Balance,
  pub exchange_rate: Price,
  pub call_data: Vec<u8>,
}

/// Half-open index window `[start, end)` over a pending-order list.
#[derive(Clone, Copy, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct ScanRange {
  pub start: u32,
  pub end: u32,
}

impl ScanRange {
  pub const fn full() -> Self {
    Self { start: 0, end: u32::MAX }
  }

  /// Empty or undecodable check data scans the whole book.
  pub fn from_check_data(data: &[u8]) -> Self {
    if data.is_empty() {
      return Self::full();
    }
    <(u32, u32)>::decode(&mut &data[..])
      .map(|(start, end)| Self { start, end })
      .unwrap_or_else(|_| Self::full())
  }

  /// Clamp the window to a list of `len` elements.
  pub fn clamp(&self, len: usize) -> Range<usize> {
    let end = (self.end as usize).min(len);
    let start = (self.start as usize).min(end);
    start..end
  }
}

/// Everything the bracket book needs to take over a converted stop-limit order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BracketParams<AccountId> {
  pub order_id: OrderId,
  pub owner: AccountId,
  pub recipient: AccountId,
  pub token_in: TokenId,
  pub token_out: TokenId,
  pub amount_in: Balance,
  pub take_profit: Price,
  pub stop_price: Price,
  pub take_profit_slippage: Bips,
  pub stop_slippage: Bips,
  pub fee_bips: Bips,
}

/// Clamped `[start, start + count)` window over a list of `len` elements.
pub fn page_bounds(len: usize, start: u32, count: u32) -> Range<usize> {
  let start = (start as usize).min(len);
  let end = start.saturating_add(count as usize).min(len);
  start..end
}

/// `amount * bips / 10_000`, rounded down.
pub fn bips_of(amount: Balance, bips: Bips) -> Balance {
  let parts = u32::from(bips.min(MAX_BIPS)) * 100;
  Permill::from_parts(parts).mul_floor(amount)
}

pub fn bips_in_range(bips: Bips) -> bool {
  bips <= MAX_BIPS
}

/// Whether `who` is the account decoded from all-zero bytes.
pub fn is_zero_account<AccountId: Decode + PartialEq>(who: &AccountId) -> bool {
  AccountId::decode(&mut TrailingZeroInput::zeroes())
    .map(|zero| &zero == who)
    .unwrap_or(false)
}
