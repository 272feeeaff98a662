use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

use primitives::{Balance, Bips, OrderId, Price, TokenId};

/// Take-profit / stop-loss order resting in the bracket book.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct BracketOrder<AccountId> {
  pub order_id: OrderId,
  pub owner: AccountId,
  pub recipient: AccountId,
  pub token_in: TokenId,
  pub token_out: TokenId,
  pub amount_in: Balance,
  /// Fires when the exchange rate reaches or exceeds this value
  pub take_profit: Price,
  /// Fires when the exchange rate falls to or below this value
  pub stop_price: Price,
  pub take_profit_slippage: Bips,
  pub stop_slippage: Bips,
  pub fee_bips: Bips,
  pub active: bool,
}

impl<AccountId> BracketOrder<AccountId> {
  /// Slippage to fill with if `rate` triggers the order.
  ///
  /// Both thresholds are checked literally: with `stop_price >= take_profit` the order may
  /// trigger at every rate or at none.
  pub fn triggered_slippage(&self, rate: Price) -> Option<Bips> {
    if rate >= self.take_profit {
      Some(self.take_profit_slippage)
    } else if rate <= self.stop_price {
      Some(self.stop_slippage)
    } else {
      None
    }
  }
}

/// Swap executed on creation to acquire the order's `token_in`.
#[derive(Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo)]
pub struct SwapParams<AccountId, CallData> {
  pub token_in: TokenId,
  pub amount_in: Balance,
  pub target: AccountId,
  pub slippage: Bips,
  pub call_data: CallData,
}
