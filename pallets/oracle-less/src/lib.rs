//! Oracle-Less Order Pallet
//!
//! Limit orders on tokens without a price feed. The owner states the minimum output it
//! accepts and anyone may fill the order by routing its escrow through a whitelisted swap
//! target, either directly with [`Pallet::fill_order`] or through the automation master.
//! Orders are only accepted on admin-approved tokens.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod types;
pub use types::*;

#[cfg(test)]
pub mod mock;

pub mod weights;
pub use weights::WeightInfo;

pub(crate) const LOG_TARGET: &str = "runtime::oracle-less";

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, OracleLessOrder, WeightInfo};
  use alloc::vec::Vec;
  use frame::deps::{
    frame_support::{
      PalletId,
      traits::{
        EnsureOrigin,
        fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
        fungibles::{Inspect as FungiblesInspect, Mutate as FungiblesMutate},
        tokens::{Fortitude, Preservation},
      },
    },
    sp_runtime::{
      DispatchError,
      traits::{AccountIdConversion, Zero},
    },
  };
  use frame::prelude::*;
  use primitives::{
    AutomationContext, Balance, BalanceSnapshot, Bips, OrderId, OrderType, PreAuthorizedTransfer,
    ScanRange, SubKeeper, SwapOutcome, SwapVenue, SwapViolation, TokenId, UpkeepInstruction,
    bips_in_range, bips_of, is_zero_account, page_bounds,
  };

  pub type CallDataOf<T> = BoundedVec<u8, <T as Config>::MaxCallDataLen>;
  pub type OracleLessOrderOf<T> = OracleLessOrder<<T as frame_system::Config>::AccountId>;

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    type Assets: FungiblesInspect<Self::AccountId, AssetId = TokenId, Balance = Balance>
      + FungiblesMutate<Self::AccountId>;
    type Currency: NativeInspect<Self::AccountId, Balance = Balance> + NativeMutate<Self::AccountId>;
    /// Whitelist, policy and pause state shared by all order books
    type Master: AutomationContext<Self::AccountId>;
    type SwapVenue: SwapVenue<Self::AccountId>;
    type PreAuthorizedTransfer: PreAuthorizedTransfer<Self::AccountId>;
    /// Origin managing the token whitelist, pausing and force-cancelling
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
    #[pallet::constant]
    type PalletId: Get<PalletId>;
    #[pallet::constant]
    type MaxPendingOrders: Get<u32>;
    #[pallet::constant]
    type MaxCallDataLen: Get<u32>;
    /// Maximum tokens per whitelist update
    #[pallet::constant]
    type MaxBatchSize: Get<u32>;
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  #[pallet::storage]
  #[pallet::getter(fn orders)]
  pub type Orders<T: Config> =
    StorageMap<_, Blake2_128Concat, OrderId, OracleLessOrderOf<T>, OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn pending_order_ids)]
  pub type PendingOrderIds<T: Config> =
    StorageValue<_, BoundedVec<OrderId, T::MaxPendingOrders>, ValueQuery>;

  #[pallet::storage]
  pub type PendingIndex<T: Config> = StorageMap<_, Blake2_128Concat, OrderId, u32, OptionQuery>;

  /// Tokens orders may be placed on
  #[pallet::storage]
  pub type WhitelistedTokens<T: Config> = StorageMap<_, Blake2_128Concat, TokenId, (), OptionQuery>;

  #[pallet::storage]
  pub type Paused<T: Config> = StorageValue<_, bool, ValueQuery>;

  #[pallet::storage]
  pub type Locked<T: Config> = StorageValue<_, bool, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    OrderCreated {
      order_id: OrderId,
      owner: T::AccountId,
      token_in: TokenId,
      token_out: TokenId,
      amount_in: Balance,
      min_amount_out: Balance,
    },
    OrderModified {
      order_id: OrderId,
      amount_in: Balance,
      min_amount_out: Balance,
    },
    OrderCancelled { order_id: OrderId, refunded: Balance },
    OrderProcessed {
      order_id: OrderId,
      filler: T::AccountId,
      amount_in: Balance,
      amount_out: Balance,
      fee: Balance,
      refund: Balance,
    },
    TokenWhitelistUpdated { token: TokenId, approved: bool },
    PauseSet { paused: bool },
  }

  #[pallet::error]
  pub enum Error<T> {
    Paused,
    Reentrancy,
    NotAuthorized,
    /// Tokens and approvals differ in length
    ArrayLengthMismatch,
    /// Token pair not approved for orders
    TokensNotWhitelisted,
    AmountInIsZero,
    SameToken,
    InvalidRecipient,
    BipsTooHigh,
    MaxOrderCountReached,
    InsufficientFee,
    OrderNotFound,
    OrderNotActive,
    NotOrderOwner,
    InvalidDelta,
    OrderFillMismatch,
    OverSpend,
    TooLittleReceived,
    BalanceManipulated,
    PermitTransferFailed,
    ArithmeticOverflow,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::create_order())]
    pub fn create_order(
      origin: OriginFor<T>,
      token_in: TokenId,
      token_out: TokenId,
      amount_in: Balance,
      min_amount_out: Balance,
      recipient: T::AccountId,
      fee_bips: Bips,
      permit: Option<CallDataOf<T>>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::with_lock(|| {
        ensure!(!Self::is_paused(), Error::<T>::Paused);
        ensure!(!amount_in.is_zero(), Error::<T>::AmountInIsZero);
        ensure!(token_in != token_out, Error::<T>::SameToken);
        ensure!(!is_zero_account(&recipient), Error::<T>::InvalidRecipient);
        ensure!(bips_in_range(fee_bips), Error::<T>::BipsTooHigh);
        Self::ensure_tradable(token_in, token_out)?;
        Self::collect_order_fee(&who)?;
        Self::pull_tokens(&who, token_in, amount_in, permit.as_ref().map(|p| p.as_slice()))?;
        Self::insert_order(OracleLessOrder {
          order_id: T::Master::next_order_id(),
          owner: who.clone(),
          recipient,
          token_in,
          token_out,
          amount_in,
          min_amount_out,
          fee_bips,
          active: true,
        })
      })
    }

    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::modify_order())]
    pub fn modify_order(
      origin: OriginFor<T>,
      order_id: OrderId,
      token_out: TokenId,
      amount_in_delta: Balance,
      min_amount_out: Balance,
      recipient: T::AccountId,
      increase_position: bool,
      permit: Option<CallDataOf<T>>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::with_lock(|| {
        ensure!(!Self::is_paused(), Error::<T>::Paused);
        let mut order = Self::active_order(order_id)?;
        ensure!(order.owner == who, Error::<T>::NotOrderOwner);
        ensure!(!is_zero_account(&recipient), Error::<T>::InvalidRecipient);
        ensure!(order.token_in != token_out, Error::<T>::SameToken);
        Self::ensure_tradable(order.token_in, token_out)?;
        if !amount_in_delta.is_zero() {
          if increase_position {
            Self::pull_tokens(
              &order.owner,
              order.token_in,
              amount_in_delta,
              permit.as_ref().map(|p| p.as_slice()),
            )?;
            order.amount_in = order
              .amount_in
              .checked_add(amount_in_delta)
              .ok_or(Error::<T>::ArithmeticOverflow)?;
          } else {
            ensure!(amount_in_delta < order.amount_in, Error::<T>::InvalidDelta);
            Self::transfer_out(order.token_in, &order.recipient, amount_in_delta)?;
            order.amount_in -= amount_in_delta;
          }
        }
        order.token_out = token_out;
        order.min_amount_out = min_amount_out;
        order.recipient = recipient;
        let amount_in = order.amount_in;
        Orders::<T>::insert(order_id, order);
        Self::deposit_event(Event::OrderModified {
          order_id,
          amount_in,
          min_amount_out,
        });
        Ok(())
      })
    }

    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::cancel_order())]
    pub fn cancel_order(origin: OriginFor<T>, order_id: OrderId) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::with_lock(|| {
        ensure!(!Self::is_paused(), Error::<T>::Paused);
        let order = Self::active_order(order_id)?;
        ensure!(order.owner == who, Error::<T>::NotOrderOwner);
        Self::close_order(order, true)
      })
    }

    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::admin_cancel_order())]
    pub fn admin_cancel_order(
      origin: OriginFor<T>,
      order_id: OrderId,
      refund: bool,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::with_lock(|| {
        let order = Self::active_order(order_id)?;
        Self::close_order(order, refund)
      })
    }

    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::pause())]
    pub fn pause(origin: OriginFor<T>, paused: bool) -> DispatchResult {
      if let Err(origin) = T::AdminOrigin::try_origin(origin) {
        let who = ensure_signed(origin)?;
        ensure!(T::Master::is_pauser(&who), Error::<T>::NotAuthorized);
      }
      Paused::<T>::put(paused);
      Self::deposit_event(Event::PauseSet { paused });
      Ok(())
    }

    /// Approve or revoke tokens for new orders
    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::whitelist_tokens(tokens.len() as u32))]
    pub fn whitelist_tokens(
      origin: OriginFor<T>,
      tokens: BoundedVec<TokenId, T::MaxBatchSize>,
      approved: BoundedVec<bool, T::MaxBatchSize>,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(tokens.len() == approved.len(), Error::<T>::ArrayLengthMismatch);
      for (token, approved) in tokens.into_iter().zip(approved) {
        if approved {
          WhitelistedTokens::<T>::insert(token, ());
        } else {
          WhitelistedTokens::<T>::remove(token);
        }
        Self::deposit_event(Event::TokenWhitelistUpdated { token, approved });
      }
      Ok(())
    }

    /// Fill a pending order with a caller-supplied swap.
    ///
    /// `pending_order_idx` must hold `order_id`; the whole escrow is offered to the swap.
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::fill_order(T::MaxPendingOrders::get()))]
    pub fn fill_order(
      origin: OriginFor<T>,
      pending_order_idx: u32,
      order_id: OrderId,
      target: T::AccountId,
      call_data: CallDataOf<T>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::with_lock(|| {
        let order = Self::active_order(order_id)?;
        Self::fill(
          &who,
          UpkeepInstruction {
            order_type: OrderType::OracleLess,
            target,
            token_in: order.token_in,
            token_out: order.token_out,
            order_id,
            pending_order_idx,
            bips: Zero::zero(),
            amount_in: order.amount_in,
            exchange_rate: Zero::zero(),
            call_data: call_data.into_inner(),
          },
        )
      })
    }
  }

  impl<T: Config> Pallet<T> {
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    pub fn is_paused() -> bool {
      Paused::<T>::get() || T::Master::is_paused()
    }

    pub fn is_whitelisted_token(token: TokenId) -> bool {
      WhitelistedTokens::<T>::contains_key(token)
    }

    pub fn get_pending_orders() -> Vec<OracleLessOrderOf<T>> {
      PendingOrderIds::<T>::get()
        .iter()
        .filter_map(|id| Orders::<T>::get(id))
        .collect()
    }

    pub fn get_specific_pending_orders(start: u32, count: u32) -> Vec<OracleLessOrderOf<T>> {
      let ids = PendingOrderIds::<T>::get();
      ids[page_bounds(ids.len(), start, count)]
        .iter()
        .filter_map(|id| Orders::<T>::get(id))
        .collect()
    }

    fn fill(filler: &T::AccountId, instruction: UpkeepInstruction<T::AccountId>) -> DispatchResult {
      ensure!(!Self::is_paused(), Error::<T>::Paused);
      let order = Self::active_order(instruction.order_id)?;
      if PendingOrderIds::<T>::get().get(instruction.pending_order_idx as usize)
        != Some(&order.order_id)
      {
        log::warn!(
          target: LOG_TARGET,
          "stale index {} for order {}",
          instruction.pending_order_idx,
          order.order_id
        );
        return Err(Error::<T>::OrderFillMismatch.into());
      }
      ensure!(!instruction.amount_in.is_zero(), Error::<T>::AmountInIsZero);
      ensure!(
        instruction.amount_in <= order.amount_in,
        Error::<T>::OverSpend
      );
      let outcome = Self::execute_swap(
        order.token_in,
        order.token_out,
        instruction.amount_in,
        &instruction.target,
        &instruction.call_data,
      )?;
      ensure!(!outcome.received.is_zero(), Error::<T>::TooLittleReceived);
      ensure!(
        outcome.received >= order.min_amount_out,
        Error::<T>::TooLittleReceived
      );

      Self::remove_pending(order.order_id)?;
      Orders::<T>::mutate(order.order_id, |stored| {
        if let Some(stored) = stored {
          stored.active = false;
        }
      });
      let refund = order.amount_in.saturating_sub(outcome.spent);
      Self::transfer_out(order.token_in, &order.recipient, refund)?;
      let fee = bips_of(outcome.received, order.fee_bips);
      Self::transfer_out(order.token_out, &T::Master::fee_collector(), fee)?;
      Self::transfer_out(
        order.token_out,
        &order.recipient,
        outcome.received.saturating_sub(fee),
      )?;
      log::debug!(
        target: LOG_TARGET,
        "order {} filled: spent {} received {}",
        order.order_id,
        outcome.spent,
        outcome.received
      );
      Self::deposit_event(Event::OrderProcessed {
        order_id: order.order_id,
        filler: filler.clone(),
        amount_in: outcome.spent,
        amount_out: outcome.received,
        fee,
        refund,
      });
      Ok(())
    }

    fn ensure_tradable(token_in: TokenId, token_out: TokenId) -> DispatchResult {
      ensure!(
        Self::is_whitelisted_token(token_in) && Self::is_whitelisted_token(token_out),
        Error::<T>::TokensNotWhitelisted
      );
      Ok(())
    }

    fn close_order(order: OracleLessOrderOf<T>, refund: bool) -> DispatchResult {
      Self::remove_pending(order.order_id)?;
      let refunded = if refund {
        Self::transfer_out(order.token_in, &order.recipient, order.amount_in)?;
        order.amount_in
      } else {
        // Withheld escrow goes where the master's sweep can reach it
        Self::transfer_out(order.token_in, &T::Master::fee_collector(), order.amount_in)?;
        Zero::zero()
      };
      let order_id = order.order_id;
      Orders::<T>::insert(
        order_id,
        OracleLessOrder {
          active: false,
          ..order
        },
      );
      Self::deposit_event(Event::OrderCancelled { order_id, refunded });
      Ok(())
    }

    fn insert_order(order: OracleLessOrderOf<T>) -> DispatchResult {
      let max = T::Master::max_pending_orders();
      PendingOrderIds::<T>::try_mutate(|ids| -> DispatchResult {
        ensure!((ids.len() as u32) < max, Error::<T>::MaxOrderCountReached);
        let idx = ids.len() as u32;
        ids
          .try_push(order.order_id)
          .map_err(|_| Error::<T>::MaxOrderCountReached)?;
        PendingIndex::<T>::insert(order.order_id, idx);
        Ok(())
      })?;
      log::debug!(target: LOG_TARGET, "order {} created", order.order_id);
      Self::deposit_event(Event::OrderCreated {
        order_id: order.order_id,
        owner: order.owner.clone(),
        token_in: order.token_in,
        token_out: order.token_out,
        amount_in: order.amount_in,
        min_amount_out: order.min_amount_out,
      });
      Orders::<T>::insert(order.order_id, order);
      Ok(())
    }

    fn remove_pending(order_id: OrderId) -> DispatchResult {
      let idx = PendingIndex::<T>::take(order_id).ok_or(Error::<T>::OrderNotActive)? as usize;
      PendingOrderIds::<T>::try_mutate(|ids| -> DispatchResult {
        ensure!(ids.get(idx) == Some(&order_id), Error::<T>::OrderNotActive);
        ids.swap_remove(idx);
        if let Some(moved) = ids.get(idx) {
          PendingIndex::<T>::insert(moved, idx as u32);
        }
        Ok(())
      })
    }

    fn active_order(order_id: OrderId) -> Result<OracleLessOrderOf<T>, DispatchError> {
      let order = Orders::<T>::get(order_id).ok_or(Error::<T>::OrderNotFound)?;
      ensure!(order.active, Error::<T>::OrderNotActive);
      Ok(order)
    }

    fn execute_swap(
      token_in: TokenId,
      token_out: TokenId,
      amount_in: Balance,
      target: &T::AccountId,
      call_data: &[u8],
    ) -> Result<SwapOutcome, DispatchError> {
      let escrow = Self::account_id();
      let tracked = Self::get_pending_orders()
        .into_iter()
        .flat_map(|order| [order.token_in, order.token_out])
        .chain([token_in, token_out]);
      let snapshot = BalanceSnapshot::take::<T::AccountId, T::Assets>(&escrow, tracked);
      T::Master::validate_target(target)?;
      T::SwapVenue::execute(&escrow, target, call_data)?;
      snapshot
        .settle::<T::AccountId, T::Assets>(&escrow, token_in, token_out, amount_in)
        .map_err(|violation| match violation {
          SwapViolation::OverSpend => Error::<T>::OverSpend.into(),
          SwapViolation::BalanceManipulated { token } => {
            log::warn!(target: LOG_TARGET, "swap moved balance of token {token}");
            Error::<T>::BalanceManipulated.into()
          }
        })
    }

    fn pull_tokens(
      owner: &T::AccountId,
      token: TokenId,
      amount: Balance,
      permit: Option<&[u8]>,
    ) -> DispatchResult {
      let escrow = Self::account_id();
      match permit {
        Some(payload) => {
          let before = T::Assets::balance(token, &escrow);
          T::PreAuthorizedTransfer::pull(owner, token, amount, &escrow, payload)?;
          let received = T::Assets::balance(token, &escrow).saturating_sub(before);
          ensure!(received >= amount, Error::<T>::PermitTransferFailed);
        }
        None => {
          T::Assets::transfer(token, owner, &escrow, amount, Preservation::Expendable)?;
        }
      }
      Ok(())
    }

    fn transfer_out(token: TokenId, to: &T::AccountId, amount: Balance) -> DispatchResult {
      if amount.is_zero() {
        return Ok(());
      }
      T::Assets::transfer(token, &Self::account_id(), to, amount, Preservation::Expendable)?;
      Ok(())
    }

    fn collect_order_fee(who: &T::AccountId) -> DispatchResult {
      let fee = T::Master::order_fee();
      if fee.is_zero() {
        return Ok(());
      }
      let spendable = T::Currency::reducible_balance(who, Preservation::Preserve, Fortitude::Polite);
      ensure!(spendable >= fee, Error::<T>::InsufficientFee);
      T::Currency::transfer(who, &T::Master::fee_collector(), fee, Preservation::Preserve)?;
      Ok(())
    }

    fn with_lock<R>(f: impl FnOnce() -> Result<R, DispatchError>) -> Result<R, DispatchError> {
      ensure!(!Locked::<T>::get(), Error::<T>::Reentrancy);
      Locked::<T>::put(true);
      let result = f();
      Locked::<T>::kill();
      result
    }
  }

  impl<T: Config> SubKeeper<T::AccountId> for Pallet<T> {
    /// Oracle-less orders have no price trigger for a keeper to find
    fn check_upkeep(_range: ScanRange) -> Option<UpkeepInstruction<T::AccountId>> {
      None
    }

    fn perform_upkeep(
      keeper: &T::AccountId,
      instruction: UpkeepInstruction<T::AccountId>,
    ) -> DispatchResult {
      Self::with_lock(|| Self::fill(keeper, instruction))
    }
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    pub whitelisted_tokens: Vec<TokenId>,
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<T>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
      for token in &self.whitelisted_tokens {
        WhitelistedTokens::<T>::insert(token, ());
      }
    }
  }
}
