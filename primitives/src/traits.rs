//! Capability traits wiring the automation master and the order-book pallets together.
//!
//! The master implements [`AutomationContext`] and is handed to every order book through its
//! `Config`; each order book implements [`SubKeeper`] and is handed back to the master. The
//! remaining traits describe collaborators that live outside these pallets.

use polkadot_sdk::sp_runtime::{DispatchError, DispatchResult};

use crate::ecosystem::Balance;
use crate::orders::{
  Bips, BracketParams, OracleId, OrderId, Price, ScanRange, TokenId, UpkeepInstruction,
};

/// Source of USD prices, 1e8-scaled, keyed by feed handle.
pub trait PriceFeed {
  fn latest_price(oracle: OracleId) -> Option<Price>;
}

/// Shared services the master exposes to every order book.
pub trait AutomationContext<AccountId> {
  /// Global pause flag; order books combine it with their own.
  fn is_paused() -> bool;

  fn is_pauser(who: &AccountId) -> bool;

  fn exchange_rate(token_in: TokenId, token_out: TokenId) -> Result<Price, DispatchError>;

  /// Oracle-fair output for `amount_in`, reduced by `slippage` bips.
  fn min_amount_received(
    amount_in: Balance,
    token_in: TokenId,
    token_out: TokenId,
    slippage: Bips,
  ) -> Result<Balance, DispatchError>;

  fn check_min_order_size(token: TokenId, amount: Balance) -> DispatchResult;

  /// Fails unless `target` is a whitelisted swap target.
  fn validate_target(target: &AccountId) -> DispatchResult;

  fn max_pending_orders() -> u32;

  /// Native-currency fee charged on order creation.
  fn order_fee() -> Balance;

  fn next_order_id() -> OrderId;

  /// Account receiving order fees and fill fees.
  fn fee_collector() -> AccountId;
}

/// One order book as seen by the master's upkeep loop.
pub trait SubKeeper<AccountId> {
  /// First triggered order inside `range`, if any.
  fn check_upkeep(range: ScanRange) -> Option<UpkeepInstruction<AccountId>>;

  fn perform_upkeep(keeper: &AccountId, instruction: UpkeepInstruction<AccountId>) -> DispatchResult;
}

impl<AccountId> SubKeeper<AccountId> for () {
  fn check_upkeep(_range: ScanRange) -> Option<UpkeepInstruction<AccountId>> {
    None
  }

  fn perform_upkeep(_keeper: &AccountId, _instruction: UpkeepInstruction<AccountId>) -> DispatchResult {
    Err(DispatchError::Other("no sub-keeper"))
  }
}

/// External liquidity venue invoked with opaque call data.
///
/// The venue pulls input tokens from `caller` and is expected to deliver output tokens back to
/// `caller`; the order books never trust it and diff balances around the call.
pub trait SwapVenue<AccountId> {
  fn execute(caller: &AccountId, target: &AccountId, call_data: &[u8]) -> DispatchResult;
}

/// Pulls tokens from `owner` on the strength of a signed payload instead of a direct transfer.
pub trait PreAuthorizedTransfer<AccountId> {
  fn pull(
    owner: &AccountId,
    token: TokenId,
    amount: Balance,
    to: &AccountId,
    payload: &[u8],
  ) -> DispatchResult;
}

impl<AccountId> PreAuthorizedTransfer<AccountId> for () {
  fn pull(
    _owner: &AccountId,
    _token: TokenId,
    _amount: Balance,
    _to: &AccountId,
    _payload: &[u8],
  ) -> DispatchResult {
    Err(DispatchError::Other("pre-authorized transfers unsupported"))
  }
}

/// Receives stop-limit orders that have fired and become brackets.
pub trait BracketFactory<AccountId> {
  /// Escrow account the converted funds must be moved into before registration.
  fn escrow_account() -> AccountId;

  fn register_converted_order(params: BracketParams<AccountId>) -> DispatchResult;
}
