use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

use primitives::{Balance, Bips, OrderId, TokenId};

/// Limit order priced by its owner instead of an oracle.
#[derive(
  Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
)]
pub struct OracleLessOrder<AccountId> {
  pub order_id: OrderId,
  pub owner: AccountId,
  pub recipient: AccountId,
  pub token_in: TokenId,
  pub token_out: TokenId,
  pub amount_in: Balance,
  pub min_amount_out: Balance,
  pub fee_bips: Bips,
  pub active: bool,
}
