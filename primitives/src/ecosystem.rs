//! Ecosystem Constants for the Order Automation Pallets
//!
//! This module centralizes the pallet identifiers used to derive escrow accounts and the
//! fixed-point scales shared by the oracle registry and every order book.

/// Balance type alias for consistency across ecosystem
pub type Balance = u128;

/// Pallet identifiers for deriving pallet-owned accounts.
///
/// These IDs are used by Polkadot SDK's `PalletId::into_account_truncating()`
/// to deterministically generate the fee and escrow accounts.
pub mod pallet_ids {
  /// Automation master pallet ID (fee collection account)
  pub const AUTOMATION_MASTER_PALLET_ID: &[u8; 8] = b"autmastr";

  /// Stop-limit order book pallet ID (escrow account)
  pub const STOP_LIMIT_PALLET_ID: &[u8; 8] = b"stoplmt0";

  /// Bracket order book pallet ID (escrow account)
  pub const BRACKET_PALLET_ID: &[u8; 8] = b"bracket0";

  /// Oracle-less order book pallet ID (escrow account)
  pub const ORACLE_LESS_PALLET_ID: &[u8; 8] = b"oraclels";
}

/// Fixed-point parameters shared by the oracle registry and the order books.
pub mod params {
  use super::Balance;

  /// Scale of every USD price and exchange rate (10^8).
  pub const PRICE_SCALE: Balance = 100_000_000;

  /// Denominator of all basis-point quantities.
  pub const MAX_BIPS: u16 = 10_000;

  /// Largest token decimal count the registry converts between.
  pub const MAX_DECIMALS: u8 = 18;
}
