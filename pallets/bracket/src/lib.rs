//! Bracket Order Pallet
//!
//! Take-profit / stop-loss orders. Each order escrows `amount_in` of `token_in` and fires
//! when the oracle exchange rate of `token_in` in `token_out` reaches `take_profit` or falls
//! to `stop_price`, whichever happens first. A keeper then routes the escrow through a
//! whitelisted swap target; the pallet diffs its own balances around the call, refunds any
//! unspent input, takes the protocol fee and pays the recipient.
//!
//! Converted stop-limit orders enter this book through [`primitives::BracketFactory`].

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod types;
pub use types::*;


pub mod weights;
pub use weights::WeightInfo;

pub(crate) const LOG_TARGET: &str = "runtime::bracket";

#[frame::pallet]
pub mod pallet {
  use super::{BracketOrder, LOG_TARGET, SwapParams, WeightInfo};
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
    SwapViolation, TokenId, UpkeepInstruction, bips_in_range, bips_of, is_zero_account,
    page_bounds,
  };

  pub type CallDataOf<T> = BoundedVec<u8, <T as Config>::MaxCallDataLen>;
  pub type BracketOrderOf<T> = BracketOrder<<T as frame_system::Config>::AccountId>;
  pub type SwapParamsOf<T> = SwapParams<<T as frame_system::Config>::AccountId, CallDataOf<T>>;

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Fungible tokens escrowed by orders
    type Assets: FungiblesInspect<Self::AccountId, AssetId = TokenId, Balance = Balance>
      + FungiblesMutate<Self::AccountId>;
    /// Native currency the order fee is paid in
    type Currency: NativeInspect<Self::AccountId, Balance = Balance> + NativeMutate<Self::AccountId>;
    /// Oracle, whitelist, policy and pause state shared by all order books
    type Master: AutomationContext<Self::AccountId>;
    /// External liquidity venue
    type SwapVenue: SwapVenue<Self::AccountId>;
    /// Signed-payload token pulls
    type PreAuthorizedTransfer: PreAuthorizedTransfer<Self::AccountId>;
    /// Origin allowed to pause and to force-cancel orders
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
    /// Pallet ID for the escrow account
    #[pallet::constant]
    type PalletId: Get<PalletId>;
    /// Storage bound of the pending order list
    #[pallet::constant]
    type MaxPendingOrders: Get<u32>;
    /// Maximum size of swap call data and permit payloads
    #[pallet::constant]
    type MaxCallDataLen: Get<u32>;
    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Every order ever created, terminal ones included
  #[pallet::storage]
  #[pallet::getter(fn orders)]
  pub type Orders<T: Config> = StorageMap<_, Blake2_128Concat, OrderId, BracketOrderOf<T>, OptionQuery>;

  /// Active order ids in insertion order, modulo swap-and-pop removals
  #[pallet::storage]
  #[pallet::getter(fn pending_order_ids)]
  pub type PendingOrderIds<T: Config> =
    StorageValue<_, BoundedVec<OrderId, T::MaxPendingOrders>, ValueQuery>;

  /// Position of each active order in `PendingOrderIds`
  #[pallet::storage]
  pub type PendingIndex<T: Config> = StorageMap<_, Blake2_128Concat, OrderId, u32, OptionQuery>;

  /// Local pause flag, combined with the master's
  #[pallet::storage]
  pub type Paused<T: Config> = StorageValue<_, bool, ValueQuery>;

  /// Held while an order operation is in progress
  #[pallet::storage]
  pub type Locked<T: Config> = StorageValue<_, bool, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Order escrowed and added to the book
    OrderCreated {
      order_id: OrderId,
      owner: T::AccountId,
      token_in: TokenId,
      token_out: TokenId,
      amount_in: Balance,
      take_profit: Price,
      stop_price: Price,
    },
    OrderModified { order_id: OrderId, amount_in: Balance },
    /// Order removed without a fill
    OrderCancelled { order_id: OrderId, refunded: Balance },
    /// Order filled by a keeper
    OrderProcessed {
      order_id: OrderId,
      amount_in: Balance,
      amount_out: Balance,
      fee: Balance,
      refund: Balance,
    },
    PauseSet { paused: bool },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Order book is paused
    Paused,
    /// Order operation already in progress
    Reentrancy,
    /// Caller may not pause
    NotAuthorized,
    AmountInIsZero,
    /// Input and output token are the same
    SameToken,
    /// Recipient cannot be the zero account
    InvalidRecipient,
    /// Basis points above 10_000
    BipsTooHigh,
    /// Pending order limit reached
    MaxOrderCountReached,
    /// Caller cannot afford the order fee
    InsufficientFee,
    OrderNotFound,
    OrderNotActive,
    /// Only the order owner may do this
    NotOrderOwner,
    /// Decrease would leave nothing escrowed
    InvalidDelta,
    /// Exchange rate does not trigger the order
    OrderNotInRange,
    /// Pending index does not hold the given order
    OrderFillMismatch,
    /// Swap consumed more input than allowed
    OverSpend,
    /// Swap output below the order minimum
    TooLittleReceived,
    /// Swap moved a balance it had no business touching
    BalanceManipulated,
    /// Pre-authorized transfer delivered less than requested
    PermitTransferFailed,
    ArithmeticOverflow,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Create a bracket order, optionally acquiring `token_in` through a swap first.
    ///
    /// With `swap` set, `amount_in` is ignored and the order escrows the swap output.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::create_order())]
    pub fn create_order(
      origin: OriginFor<T>,
      swap: Option<SwapParamsOf<T>>,
      take_profit: Price,
      stop_price: Price,
      amount_in: Balance,
      token_in: TokenId,
      token_out: TokenId,
      recipient: T::AccountId,
      fee_bips: Bips,
      take_profit_slippage: Bips,
      stop_slippage: Bips,
      permit: Option<CallDataOf<T>>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::with_lock(|| {
        ensure!(!Self::is_paused(), Error::<T>::Paused);
        ensure!(token_in != token_out, Error::<T>::SameToken);
        ensure!(!is_zero_account(&recipient), Error::<T>::InvalidRecipient);
        ensure!(
          bips_in_range(fee_bips)
            && bips_in_range(take_profit_slippage)
            && bips_in_range(stop_slippage),
          Error::<T>::BipsTooHigh
        );
        T::Master::exchange_rate(token_in, token_out)?;
        Self::collect_order_fee(&who)?;
        let permit = permit.as_ref().map(|p| p.as_slice());
        let amount_in = match swap {
          Some(swap) => Self::swap_on_create(&who, token_in, swap, permit)?,
          None => {
            ensure!(!amount_in.is_zero(), Error::<T>::AmountInIsZero);
            T::Master::check_min_order_size(token_in, amount_in)?;
            Self::pull_tokens(&who, token_in, amount_in, permit)?;
            amount_in
          }
        };
        let order = BracketOrder {
          order_id: T::Master::next_order_id(),
          owner: who.clone(),
          recipient,
          token_in,
          token_out,
          amount_in,
          take_profit,
          stop_price,
          take_profit_slippage,
          stop_slippage,
          fee_bips,
          active: true,
        };
        Self::insert_order(order)
      })
    }

    /// Adjust trigger prices, output token, recipient or escrowed amount.
    ///
    /// `amount_in_delta` is pulled from the owner when `increase_position` is set and
    /// refunded to the current recipient otherwise.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::modify_order())]
    pub fn modify_order(
      origin: OriginFor<T>,
      order_id: OrderId,
      take_profit: Price,
      stop_price: Price,
      amount_in_delta: Balance,
      token_out: TokenId,
      recipient: T::AccountId,
      take_profit_slippage: Bips,
      stop_slippage: Bips,
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
          bips_in_range(take_profit_slippage) && bips_in_range(stop_slippage),
          Error::<T>::BipsTooHigh
        );
        T::Master::exchange_rate(order.token_in, token_out)?;
        let amount_in = Self::apply_delta(
          &order,
          amount_in_delta,
          increase_position,
          permit.as_ref().map(|p| p.as_slice()),
        )?;
        T::Master::check_min_order_size(order.token_in, amount_in)?;
        order.take_profit = take_profit;
        order.stop_price = stop_price;
        order.amount_in = amount_in;
        order.token_out = token_out;
        order.recipient = recipient;
        order.take_profit_slippage = take_profit_slippage;
        order.stop_slippage = stop_slippage;
        Orders::<T>::insert(order_id, order);
        Self::deposit_event(Event::OrderModified {
          order_id,
          amount_in,
        });
        Ok(())
      })
    }

    /// Cancel an order and return its escrow to the recipient
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

    /// Force-cancel any order, also while paused; `refund = false` hands the escrow to the master fee account
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
    /// Escrow account
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Own flag or the master's
    pub fn is_paused() -> bool {
      Paused::<T>::get() || T::Master::is_paused()
    }

    pub fn get_pending_orders() -> Vec<BracketOrderOf<T>> {
      PendingOrderIds::<T>::get()
        .iter()
        .filter_map(|id| Orders::<T>::get(id))
        .collect()
    }

    /// Clamped page of pending orders; never fails
    pub fn get_specific_pending_orders(start: u32, count: u32) -> Vec<BracketOrderOf<T>> {
      let ids = PendingOrderIds::<T>::get();
      ids[page_bounds(ids.len(), start, count)]
        .iter()
        .filter_map(|id| Orders::<T>::get(id))
        .collect()
    }

    /// First order in `range` triggered at the current exchange rate
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
        if let Some(bips) = order.triggered_slippage(rate) {
          return Some(UpkeepInstruction {
            order_type: OrderType::Bracket,
            target: Self::account_id(),
            token_in: order.token_in,
            token_out: order.token_out,
            order_id: order.order_id,
            pending_order_idx: idx as u32,
            bips,
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
      let slippage = order
        .triggered_slippage(rate)
        .ok_or(Error::<T>::OrderNotInRange)?;
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
      let min_out = T::Master::min_amount_received(
        instruction.amount_in,
        order.token_in,
        order.token_out,
        slippage,
      )?;
      ensure!(!outcome.received.is_zero(), Error::<T>::TooLittleReceived);
      ensure!(
        outcome.received >= min_out,
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
        "order {} filled: spent {} received {} fee {}",
        order.order_id,
        outcome.spent,
        outcome.received,
        fee
      );
      Self::deposit_event(Event::OrderProcessed {
        order_id: order.order_id,
        amount_in: outcome.spent,
        amount_out: outcome.received,
        fee,
        refund,
      });
      Ok(())
    }

    fn swap_on_create(
      who: &T::AccountId,
      token_in: TokenId,
      swap: SwapParamsOf<T>,
      permit: Option<&[u8]>,
    ) -> Result<Balance, DispatchError> {
      ensure!(!swap.amount_in.is_zero(), Error::<T>::AmountInIsZero);
      ensure!(swap.token_in != token_in, Error::<T>::SameToken);
      ensure!(bips_in_range(swap.slippage), Error::<T>::BipsTooHigh);
      Self::pull_tokens(who, swap.token_in, swap.amount_in, permit)?;
      let outcome = Self::execute_swap(
        swap.token_in,
        token_in,
        swap.amount_in,
        &swap.target,
        &swap.call_data,
      )?;
      let min_out =
        T::Master::min_amount_received(swap.amount_in, swap.token_in, token_in, swap.slippage)?;
      ensure!(
        outcome.received >= min_out,
        Error::<T>::TooLittleReceived
      );
      ensure!(!outcome.received.is_zero(), Error::<T>::AmountInIsZero);
      Self::transfer_out(
        swap.token_in,
        who,
        swap.amount_in.saturating_sub(outcome.spent),
      )?;
      T::Master::check_min_order_size(token_in, outcome.received)?;
      Ok(outcome.received)
    }

    fn apply_delta(
      order: &BracketOrderOf<T>,
      delta: Balance,
      increase: bool,
      permit: Option<&[u8]>,
    ) -> Result<Balance, DispatchError> {
      if delta.is_zero() {
        return Ok(order.amount_in);
      }
      if increase {
        Self::pull_tokens(&order.owner, order.token_in, delta, permit)?;
        order
          .amount_in
          .checked_add(delta)
          .ok_or_else(|| Error::<T>::ArithmeticOverflow.into())
      } else {
        ensure!(delta < order.amount_in, Error::<T>::InvalidDelta);
        Self::transfer_out(order.token_in, &order.recipient, delta)?;
        Ok(order.amount_in - delta)
      }
    }

    fn close_order(order: BracketOrderOf<T>, refund: bool) -> DispatchResult {
      Self::remove_pending(order.order_id)?;
      let refunded = if refund {
        Self::transfer_out(order.token_in, &order.recipient, order.amount_in)?;
        order.amount_in
      } else {
        // Withheld escrow goes where the master's sweep can reach it
        Self::transfer_out(order.token_in, &T::Master::fee_collector(), order.amount_in)?;
        Zero::zero()
      };
      Orders::<T>::insert(
        order.order_id,
        BracketOrder {
          active: false,
          ..order.clone()
        },
      );
      log::debug!(target: LOG_TARGET, "order {} cancelled, refunded {}", order.order_id, refunded);
      Self::deposit_event(Event::OrderCancelled {
        order_id: order.order_id,
        refunded,
      });
      Ok(())
    }

    fn insert_order(order: BracketOrderOf<T>) -> DispatchResult {
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
      Self::deposit_event(Event::OrderCreated {
        order_id: order.order_id,
        owner: order.owner.clone(),
        token_in: order.token_in,
        token_out: order.token_out,
        amount_in: order.amount_in,
        take_profit: order.take_profit,
        stop_price: order.stop_price,
      });
      log::debug!(target: LOG_TARGET, "order {} created", order.order_id);
      Orders::<T>::insert(order.order_id, order);
      Ok(())
    }

    /// Swap-and-pop removal through the id index
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

    fn active_order(order_id: OrderId) -> Result<BracketOrderOf<T>, DispatchError> {
      let order = Orders::<T>::get(order_id).ok_or(Error::<T>::OrderNotFound)?;
      ensure!(order.active, Error::<T>::OrderNotActive);
      Ok(order)
    }

    fn ensure_pending_at(idx: u32, order_id: OrderId) -> DispatchResult {
      let ids = PendingOrderIds::<T>::get();
      if ids.get(idx as usize) != Some(&order_id) {
        log::warn!(target: LOG_TARGET, "stale index {idx} for order {order_id}");
        return Err(Error::<T>::OrderFillMismatch.into());
      }
      Ok(())
    }

    /// Call the venue and settle the balance snapshot of every escrowed token
    fn execute_swap(
      token_in: TokenId,
      token_out: TokenId,
      amount_in: Balance,
      target: &T::AccountId,
      call_data: &[u8],
    ) -> Result<SwapOutcome, DispatchError> {
      let escrow = Self::account_id();
      let mut tokens = Self::escrowed_tokens();
      tokens.extend([token_in, token_out]);
      let snapshot = BalanceSnapshot::take::<T::AccountId, T::Assets>(&escrow, tokens);
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

    fn escrowed_tokens() -> Vec<TokenId> {
      PendingOrderIds::<T>::get()
        .iter()
        .filter_map(|id| Orders::<T>::get(id))
        .flat_map(|order| [order.token_in, order.token_out])
        .collect()
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

  impl<T: Config> BracketFactory<T::AccountId> for Pallet<T> {
    fn escrow_account() -> T::AccountId {
      Self::account_id()
    }

    fn register_converted_order(params: BracketParams<T::AccountId>) -> DispatchResult {
      ensure!(params.token_in != params.token_out, Error::<T>::SameToken);
      ensure!(!params.amount_in.is_zero(), Error::<T>::AmountInIsZero);
      Self::insert_order(BracketOrder {
        order_id: params.order_id,
        owner: params.owner,
        recipient: params.recipient,
        token_in: params.token_in,
        token_out: params.token_out,
        amount_in: params.amount_in,
        take_profit: params.take_profit,
        stop_price: params.stop_price,
        take_profit_slippage: params.take_profit_slippage,
        stop_slippage: params.stop_slippage,
        fee_bips: params.fee_bips,
        active: true,
      })
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
