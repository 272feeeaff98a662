//! Balance accounting around an untrusted external swap.
//!
//! An order book snapshots every token it escrows before handing control to a swap venue and
//! settles the snapshot afterwards: only `token_in` may go down (by at most the instruction
//! amount), only `token_out` may go up, and everything else must be untouched.

use polkadot_sdk::frame_support::traits::fungibles::Inspect;

extern crate alloc;
use alloc::{collections::BTreeSet, vec::Vec};

use crate::ecosystem::Balance;
use crate::orders::TokenId;

/// Observed effect of a swap on the holder's balances.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SwapOutcome {
  pub spent: Balance,
  pub received: Balance,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SwapViolation {
  /// More `token_in` left the holder than the instruction allowed.
  OverSpend,
  /// A tracked balance moved in a direction the swap cannot explain.
  BalanceManipulated { token: TokenId },
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BalanceSnapshot {
  balances: Vec<(TokenId, Balance)>,
}

impl BalanceSnapshot {
  pub fn take<AccountId, Assets>(holder: &AccountId, tokens: impl IntoIterator<Item = TokenId>) -> Self
  where
    Assets: Inspect<AccountId, AssetId = TokenId, Balance = Balance>,
  {
    let tokens: BTreeSet<TokenId> = tokens.into_iter().collect();
    let balances = tokens
      .into_iter()
      .map(|token| (token, Assets::balance(token, holder)))
      .collect();
    Self { balances }
  }

  pub fn balance_of(&self, token: TokenId) -> Option<Balance> {
    self
      .balances
      .iter()
      .find(|(t, _)| *t == token)
      .map(|(_, balance)| *balance)
  }

  /// Compare current balances with the snapshot.
  ///
  /// `token_in` and `token_out` must both have been part of the snapshot.
  pub fn settle<AccountId, Assets>(
    &self,
    holder: &AccountId,
    token_in: TokenId,
    token_out: TokenId,
    max_spend: Balance,
  ) -> Result<SwapOutcome, SwapViolation>
  where
    Assets: Inspect<AccountId, AssetId = TokenId, Balance = Balance>,
  {
    let mut outcome = SwapOutcome::default();
    for (token, before) in self.balances.iter().copied() {
      let after = Assets::balance(token, holder);
      if token == token_in {
        if after > before {
          return Err(SwapViolation::BalanceManipulated { token });
        }
        outcome.spent = before - after;
        if outcome.spent > max_spend {
          return Err(SwapViolation::OverSpend);
        }
      } else if token == token_out {
        if after < before {
          return Err(SwapViolation::BalanceManipulated { token });
        }
        outcome.received = after - before;
      } else if after != before {
        return Err(SwapViolation::BalanceManipulated { token });
      }
    }
    Ok(outcome)
  }
}
