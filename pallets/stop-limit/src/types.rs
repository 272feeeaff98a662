use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

use primitives::{Balance, Bips, OrderId, Price, TokenId};

/// Order waiting for its stop-limit price before turning into a bracket order.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct StopLimitOrder<AccountId> {
  pub order_id: OrderId,
  pub owner: AccountId,
  pub recipient: AccountId,
  pub token_in: TokenId,
  pub token_out: TokenId,
  pub amount_in: Balance,
  pub stop_limit_price: Price,
  /// Take-profit of the resulting bracket order
  pub take_profit: Price,
  /// Stop price of the resulting bracket order
  pub stop_price: Price,
  pub take_profit_slippage: Bips,
  pub stop_slippage: Bips,
  /// Slippage of the conversion swap when `swap_on_fill` is set
  pub swap_slippage: Bips,
  pub swap_on_fill: bool,
  /// `true` when the order waits for the rate to fall to `stop_limit_price`
  pub direction: bool,
  pub fee_bips: Bips,
  pub active: bool,
}

impl<AccountId> StopLimitOrder<AccountId> {
  pub fn direction_for(rate: Price, stop_limit_price: Price) -> bool {
    rate > stop_limit_price
  }

  pub fn is_triggered(&self, rate: Price) -> bool {
    if self.direction {
      rate <= self.stop_limit_price
    } else {
      rate >= self.stop_limit_price
    }
  }
}
