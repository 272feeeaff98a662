//! Stop-Limit Order Pallet
//!
//! A stop-limit order escrows `token_in` and waits for the oracle exchange rate to cross its
//! `stop_limit_price`. The crossing direction is fixed whenever the price is set: an order
//! placed below the current rate fires on a fall, one placed at or above it fires on a rise.
//!
//! When it fires, the order becomes a bracket order with the same id:
//! - without `swap_on_fill` the escrow moves to the bracket book unchanged;
//! - with `swap_on_fill` a keeper-supplied swap converts `token_in` to `token_out` first and
//!   the bracket order trades the proceeds back, so its tokens are reversed.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod types;
pub use types::*;

#[cfg(test)]
pub mod mock;

pub mod weights;
pub use weights::WeightInfo;

pub(crate) const LOG_TARGET: &str = "runtime::stop-limit";

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, StopLimitOrder, WeightInfo};
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
    AutomationContext, Balance, BalanceSnapshot, Bips, BracketFactory, BracketParams, OrderId,
    OrderType, Price, PreAuthorizedTransfer, ScanRange, SubKeeper, SwapOutcome, SwapVenue,
    SwapViolation, TokenId, UpkeepInstruction, bips_in_range, is_zero_account, page_bounds,
  };

  pub type CallDataOf<T> = BoundedVec<u8, <T as Config>::MaxCallDataLen>;
  pub type StopLimitOrderOf<T> = StopLimitOrder<<T as frame_system::Config>::AccountId>;

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Fungible tokens escrowed by orders
    type Assets: FungiblesInspect<Self::AccountId, AssetId = TokenId, Balance = Balance>
      + FungiblesMutate<Self::AccountId>;
    /// Native currency the order fee is paid in
    type Currency: NativeInspect<Self::AccountId, Balance = Balance> + NativeMutate<Self::AccountId>;
    /// Oracle, whitelist, policy and pause state shared by all order books
    type Master: AutomationContext<Self::AccountId>;
    /// Book receiving fired orders
    type Bracket: BracketFactory<Self::AccountId>;
    type SwapVenue: SwapVenue<Self::AccountId>;
    type PreAuthorizedTransfer: PreAuthorizedTransfer<Self::AccountId>;
    /// Origin allowed to pause and to force-cancel orders
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
    #[pallet::constant]
    type PalletId: Get<PalletId>;
    /// Storage bound of the pending order list
    #[pallet::constant]
    type MaxPendingOrders: Get<u32>;
    /// Maximum size of a permit payload
    #[pallet::constant]
    type MaxCallDataLen: Get<u32>;
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  #[pallet::storage]
  #[pallet::getter(fn orders)]
  pub type Orders<T: Config> =
    StorageMap<_, Blake2_128Concat, OrderId, StopLimitOrderOf<T>, OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn pending_order_ids)]
  pub type PendingOrderIds<T: Config> =
    StorageValue<_, BoundedVec<OrderId, T::MaxPendingOrders>, ValueQuery>;

  #[pallet::storage]
  pub type PendingIndex<T: Config> = StorageMap<_, Blake2_128Concat, OrderId, u32, OptionQuery>;

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
      stop_limit_price: Price,
    },
    OrderModified {
      order_id: OrderId,
      amount_in: Balance,
      direction: bool,
    },
    OrderCancelled { order_id: OrderId, refunded: Balance },
    /// Order fired and was handed to the bracket book under the same id
    OrderProcessed {
      order_id: OrderId,
      swapped: bool,
      amount_in: Balance,
      bracket_amount: Balance,
      refund: Balance,
    },
    PauseSet { paused: bool },
  }

  #[pallet::error]
  pub enum Error<T> {
    Paused,
    Reentrancy,
    NotAuthorized,
    AmountInIsZero,
    SameToken,
    InvalidRecipient,
    BipsTooHigh,
    MaxOrderCountReached,
    InsufficientFee,
    OrderNotFound,
    OrderNotActive,
    NotOrderOwner,
    /// Decrease would leave nothing escrowed
    InvalidDelta,
    /// Stop-limit price not crossed
    OrderNotInRange,
    /// Pending index does not hold the given order
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
      stop_limit_price: Price,
      take_profit: Price,
      stop_price: Price,
      amount_in: Balance,
      token_in: TokenId,
      token_out: TokenId,
      recipient: T::AccountId,
      fee_bips: Bips,
      take_profit_slippage: Bips,
      stop_slippage: Bips,
      swap_slippage: Bips,
      swap_on_fill: bool,
      permit: Option<CallDataOf<T>>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::with_lock(|| {
        ensure!(!Self::is_paused(), Error::<T>::Paused);
        ensure!(!amount_in.is_zero(), Error::<T>::AmountInIsZero);
        ensure!(token_in != token_out, Error::<T>::SameToken);
        ensure!(!is_zero_account(&recipient), Error::<T>::InvalidRecipient);
        ensure!(
          [fee_bips, take_profit_slippage, stop_slippage, swap_slippage]
            .into_iter()
            .all(bips_in_range),
          Error::<T>::BipsTooHigh
        );
        let rate = T::Master::exchange_rate(token_in, token_out)?;
        T::Master::check_min_order_size(token_in, amount_in)?;
        Self::collect_order_fee(&who)?;
        Self::pull_tokens(&who, token_in, amount_in, permit.as_ref().map(|p| p.as_slice()))?;
        let order = StopLimitOrder {
          order_id: T::Master::next_order_id(),
          owner: who.clone(),
          recipient,
          token_in,
          token_out,
          amount_in,
          stop_limit_price,
          take_profit,
          stop_price,
          take_profit_slippage,
          stop_slippage,
          swap_slippage,
          swap_on_fill,
          direction: StopLimitOrder::<T::AccountId>::direction_for(rate, stop_limit_price),
          fee_bips,
          active: true,
        };
        Self::insert_order(order)
      })
    }

    /// Reprice or resize an order; the trigger direction is derived again from the current rate
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::modify_order())]
    pub fn modify_order(
      origin: OriginFor<T>,
      order_id: OrderId,
      stop_limit_price: Price,
      take_profit: Price,
      stop_price: Price,
      amount_in_delta: Balance,
      token_out: TokenId,
      recipient: T::AccountId,
      take_profit_slippage: Bips,
      stop_slippage: Bips,
      swap_slippage: Bips,
      swap_on_fill: bool,
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
        ensure!(
          [take_profit_slippage, stop_slippage, swap_slippage]
            .into_iter()
            .all(bips_in_range),
          Error::<T>::BipsTooHigh
        );
        let rate = T::Master::exchange_rate(order.token_in, token_out)?;

        let mut amount_in = order.amount_in;
        if !amount_in_delta.is_zero() {
          if increase_position {
            Self::pull_tokens(
              &order.owner,
              order.token_in,
              amount_in_delta,
              permit.as_ref().map(|p| p.as_slice()),
            )?;
            amount_in = amount_in
              .checked_add(amount_in_delta)
              .ok_or(Error::<T>::ArithmeticOverflow)?;
          } else {
            ensure!(amount_in_delta < amount_in, Error::<T>::InvalidDelta);
            Self::transfer_out(order.token_in, &order.recipient, amount_in_delta)?;
            amount_in -= amount_in_delta;
          }
        }
        T::Master::check_min_order_size(order.token_in, amount_in)?;

        order.stop_limit_price = stop_limit_price;
        order.take_profit = take_profit;
        order.stop_price = stop_price;
        order.amount_in = amount_in;
        order.token_out = token_out;
        order.recipient = recipient;
        order.take_profit_slippage = take_profit_slippage;
        order.stop_slippage = stop_slippage;
        order.swap_slippage = swap_slippage;
        order.swap_on_fill = swap_on_fill;
        order.direction = StopLimitOrder::<T::AccountId>::direction_for(rate, stop_limit_price);
        let direction = order.direction;
        Orders::<T>::insert(order_id, order);
        Self::deposit_event(Event::OrderModified {
          order_id,
          amount_in,
          direction,
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
  }

  impl<T: Config> Pallet<T> {
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    pub fn is_paused() -> bool {
      Paused::<T>::get() || T::Master::is_paused()
    }

    pub fn get_pending_orders() -> Vec<StopLimitOrderOf<T>> {
      PendingOrderIds::<T>::get()
        .iter()
        .filter_map(|id| Orders::<T>::get(id))
        .collect()
    }

    pub fn get_specific_pending_orders(start: u32, count: u32) -> Vec<StopLimitOrderOf<T>> {
      let ids = PendingOrderIds::<T>::get();
      ids[page_bounds(ids.len(), start, count)]
        .iter()
        .filter_map(|id| Orders::<T>::get(id))
        .collect()
    }

    pub fn check_upkeep(range: ScanRange) -> Option<UpkeepInstruction<T::AccountId>> {
      if Self::is_paused() {
        return None;
      }
      let ids = PendingOrderIds::<T>::get();
      for idx in range.clamp(ids.len()) {
        let Some(order) = Orders::<T>::get(ids[idx]) else {
          continue;
        };
        let Ok(rate) = T::Master::exchange_rate(order.token_in, order.token_out) else {
          continue;
        };
        if order.is_triggered(rate) {
          return Some(UpkeepInstruction {
            order_type: OrderType::StopLimit,
            target: Self::account_id(),
            token_in: order.token_in,
            token_out: order.token_out,
            order_id: order.order_id,
            pending_order_idx: idx as u32,
            bips: if order.swap_on_fill {
              order.swap_slippage
            } else {
              Zero::zero()
            },
            amount_in: order.amount_in,
            exchange_rate: rate,
            call_data: Vec::new(),
          });
        }
      }
      None
    }

    fn perform(instruction: UpkeepInstruction<T::AccountId>) -> DispatchResult {
      ensure!(!Self::is_paused(), Error::<T>::Paused);
      let order = Self::active_order(instruction.order_id)?;
      Self::ensure_pending_at(instruction.pending_order_idx, order.order_id)?;
      let rate = T::Master::exchange_rate(order.token_in, order.token_out)?;
      ensure!(order.is_triggered(rate), Error::<T>::OrderNotInRange);
      ensure!(
        instruction.amount_in <= order.amount_in,
        Error::<T>::OverSpend
      );

      let escrow = T::Bracket::escrow_account();
      let (token_in, token_out, spent, bracket_amount) = if order.swap_on_fill {
        let outcome = Self::execute_swap(
          order.token_in,
          order.token_out,
          instruction.amount_in,
          &instruction.target,
          &instruction.call_data,
        )?;
        let min_out = T::Master::min_amount_received(
          instruction.amount_in,
          order.token_in,
          order.token_out,
          order.swap_slippage,
        )?;
        ensure!(
          outcome.received >= min_out,
          Error::<T>::TooLittleReceived
        );
        ensure!(!outcome.received.is_zero(), Error::<T>::TooLittleReceived);
        Self::transfer_out(order.token_out, &escrow, outcome.received)?;
        (order.token_out, order.token_in, outcome.spent, outcome.received)
      } else {
        Self::transfer_out(order.token_in, &escrow, order.amount_in)?;
        (order.token_in, order.token_out, order.amount_in, order.amount_in)
      };

      Self::remove_pending(order.order_id)?;
      Orders::<T>::mutate(order.order_id, |stored| {
        if let Some(stored) = stored {
          stored.active = false;
        }
      });
      let refund = order.amount_in.saturating_sub(spent);
      Self::transfer_out(order.token_in, &order.recipient, refund)?;

      T::Bracket::register_converted_order(BracketParams {
        order_id: order.order_id,
        owner: order.owner.clone(),
        recipient: order.recipient.clone(),
        token_in,
        token_out,
        amount_in: bracket_amount,
        take_profit: order.take_profit,
        stop_price: order.stop_price,
        take_profit_slippage: order.take_profit_slippage,
        stop_slippage: order.stop_slippage,
        fee_bips: order.fee_bips,
      })?;
      log::debug!(
        target: LOG_TARGET,
        "order {} converted to bracket with {} of token {}",
        order.order_id,
        bracket_amount,
        token_in
      );
      Self::deposit_event(Event::OrderProcessed {
        order_id: order.order_id,
        swapped: order.swap_on_fill,
        amount_in: spent,
        bracket_amount,
        refund,
      });
      Ok(())
    }

    fn close_order(order: StopLimitOrderOf<T>, refund: bool) -> DispatchResult {
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
        StopLimitOrder {
          active: false,
          ..order
        },
      );
      log::debug!(target: LOG_TARGET, "order {order_id} cancelled, refunded {refunded}");
      Self::deposit_event(Event::OrderCancelled { order_id, refunded });
      Ok(())
    }

    fn insert_order(order: StopLimitOrderOf<T>) -> DispatchResult {
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
      log::debug!(
        target: LOG_TARGET,
        "order {} created, fires on {}",
        order.order_id,
        if order.direction { "fall" } else { "rise" }
      );
      Self::deposit_event(Event::OrderCreated {
        order_id: order.order_id,
        owner: order.owner.clone(),
        token_in: order.token_in,
        token_out: order.token_out,
        amount_in: order.amount_in,
        stop_limit_price: order.stop_limit_price,
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

    fn active_order(order_id: OrderId) -> Result<StopLimitOrderOf<T>, DispatchError> {
      let order = Orders::<T>::get(order_id).ok_or(Error::<T>::OrderNotFound)?;
      ensure!(order.active, Error::<T>::OrderNotActive);
      Ok(order)
    }

    fn ensure_pending_at(idx: u32, order_id: OrderId) -> DispatchResult {
      if PendingOrderIds::<T>::get().get(idx as usize) != Some(&order_id) {
        log::warn!(target: LOG_TARGET, "stale index {idx} for order {order_id}");
        return Err(Error::<T>::OrderFillMismatch.into());
      }
      Ok(())
    }

    fn execute_swap(
      token_in: TokenId,
      token_out: TokenId,
      amount_in: Balance,
      target: &T::AccountId,
      call_data: &[u8],
    ) -> Result<SwapOutcome, DispatchError> {
      let escrow = Self::account_id();
      let tracked = PendingOrderIds::<T>::get()
        .iter()
        .filter_map(|id| Orders::<T>::get(id))
        .flat_map(|order| [order.token_in, order.token_out])
        .chain([token_in, token_out])
        .collect::<Vec<_>>();
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
      let Some(payload) = permit else {
        T::Assets::transfer(token, owner, &escrow, amount, Preservation::Expendable)?;
        return Ok(());
      };
      let before = T::Assets::balance(token, &escrow);
      T::PreAuthorizedTransfer::pull(owner, token, amount, &escrow, payload)?;
      ensure!(
        T::Assets::balance(token, &escrow).saturating_sub(before) >= amount,
        Error::<T>::PermitTransferFailed
      );
      Ok(())
    }

    fn transfer_out(token: TokenId, to: &T::AccountId, amount: Balance) -> DispatchResult {
      if !amount.is_zero() {
        T::Assets::transfer(token, &Self::account_id(), to, amount, Preservation::Expendable)?;
      }
      Ok(())
    }

    fn collect_order_fee(who: &T::AccountId) -> DispatchResult {
      let fee = T::Master::order_fee();
      if fee.is_zero() {
        return Ok(());
      }
      ensure!(
        T::Currency::reducible_balance(who, Preservation::Preserve, Fortitude::Polite) >= fee,
        Error::<T>::InsufficientFee
      );
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
    fn check_upkeep(range: ScanRange) -> Option<UpkeepInstruction<T::AccountId>> {
      Self::check_upkeep(range)
    }

    fn perform_upkeep(
      _keeper: &T::AccountId,
      instruction: UpkeepInstruction<T::AccountId>,
    ) -> DispatchResult {
      Self::with_lock(|| Self::perform(instruction))
    }
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    #[serde(skip)]
    pub _marker: core::marker::PhantomData<T>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }
}
