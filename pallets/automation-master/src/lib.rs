//! Automation Master Pallet
//!
//! Keeper-facing coordinator for the conditional order books (stop-limit, bracket and
//! oracle-less). It owns the state every order book shares:
//!
//! - **Price oracle registry**: token to price feed mapping, exchange rates and slippage-adjusted
//!   minimum outputs, normalized across token decimals.
//! - **Target whitelist**: accounts a swap may be routed through, maintained by dedicated setters.
//!   Whitelisting is a toggle.
//! - **Order policy**: native order fee, minimum order size in USD and the pending order cap.
//! - **Global pause**: order books read this flag through at decision time.
//!
//! `check_upkeep` polls the registered order books in a fixed priority and returns the first
//! triggered order as an encoded [`primitives::UpkeepInstruction`]; `perform_upkeep` routes the
//! instruction back to the order book named by its leading tag byte.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

#[cfg(test)]
pub mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub mod weights;
pub use weights::WeightInfo;

pub(crate) const LOG_TARGET: &str = "runtime::automation-master";

#[frame::pallet]
pub mod pallet {
  use super::{LOG_TARGET, WeightInfo};
  use alloc::vec::Vec;
  use codec::{DecodeAll, Encode};
  use frame::deps::{
    frame_support::{
      PalletId,
      traits::{
        EnsureOrigin,
        fungible::{Inspect as NativeInspect, Mutate as NativeMutate},
        fungibles::{
          Inspect as FungiblesInspect, Mutate as FungiblesMutate,
          metadata::Inspect as MetadataInspect,
        },
        tokens::{Fortitude, Preservation},
      },
    },
    sp_core::U256,
    sp_runtime::{
      DispatchError,
      traits::{AccountIdConversion, Zero},
    },
  };
  use frame::prelude::*;
  use primitives::{
    AutomationContext, Balance, Bips, OracleId, OrderId, OrderType, Price, PriceFeed, ScanRange,
    SubKeeper, TokenId, UpkeepInstruction, bips_in_range, is_zero_account,
    params::{MAX_BIPS, MAX_DECIMALS, PRICE_SCALE},
  };

  #[pallet::config]
  pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
    /// Fungible tokens traded by the order books
    type Assets: FungiblesInspect<Self::AccountId, AssetId = TokenId, Balance = Balance>
      + FungiblesMutate<Self::AccountId>
      + MetadataInspect<Self::AccountId>;
    /// Native currency the order fee is paid in
    type Currency: NativeInspect<Self::AccountId, Balance = Balance> + NativeMutate<Self::AccountId>;
    /// USD price source behind registered oracles
    type PriceFeed: PriceFeed;
    /// Stop-limit order book
    type StopLimit: SubKeeper<Self::AccountId>;
    /// Bracket order book
    type Bracket: SubKeeper<Self::AccountId>;
    /// Oracle-less order book
    type OracleLess: SubKeeper<Self::AccountId>;
    /// Origin allowed to change policy, oracles, setters and to sweep fees
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;
    /// Pallet ID for the fee collection account
    #[pallet::constant]
    type PalletId: Get<PalletId>;
    /// Maximum entries accepted by a single batch call
    #[pallet::constant]
    type MaxBatchSize: Get<u32>;
    /// Maximum number of tokens with a registered oracle
    #[pallet::constant]
    type MaxRegisteredTokens: Get<u32>;
    /// Maximum size of encoded perform data
    #[pallet::constant]
    type MaxPerformDataLen: Get<u32>;
    /// Capacity of the largest order book's pending list; a fill scans every pending order
    #[pallet::constant]
    type MaxOrdersPerBook: Get<u32>;
    /// Weight information for extrinsics
    type WeightInfo: WeightInfo;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(PhantomData<T>);

  /// Price feed registered for each token
  #[pallet::storage]
  #[pallet::getter(fn oracle_of)]
  pub type Oracles<T: Config> = StorageMap<_, Blake2_128Concat, TokenId, OracleId, OptionQuery>;

  /// Tokens with a registered oracle, in registration order
  #[pallet::storage]
  pub type RegisteredTokens<T: Config> =
    StorageValue<_, BoundedVec<TokenId, T::MaxRegisteredTokens>, ValueQuery>;

  /// Accounts a swap may be routed through
  #[pallet::storage]
  pub type WhitelistedTargets<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

  /// Accounts allowed to toggle the target whitelist
  #[pallet::storage]
  pub type TargetSetters<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, (), OptionQuery>;

  /// Order books polled by the upkeep loop
  #[pallet::storage]
  pub type SubKeepers<T: Config> = StorageMap<_, Blake2_128Concat, OrderType, (), OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn is_paused)]
  pub type Paused<T: Config> = StorageValue<_, bool, ValueQuery>;

  /// Account allowed to pause besides the admin origin
  #[pallet::storage]
  #[pallet::getter(fn pauser)]
  pub type Pauser<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  /// Native currency charged on order creation
  #[pallet::storage]
  #[pallet::getter(fn order_fee)]
  pub type OrderFee<T: Config> = StorageValue<_, Balance, ValueQuery>;

  /// Minimum order value in USD, 1e8-scaled
  #[pallet::storage]
  #[pallet::getter(fn min_order_size)]
  pub type MinOrderSize<T: Config> = StorageValue<_, Price, ValueQuery>;

  /// Pending order cap applied to each order book
  #[pallet::storage]
  #[pallet::getter(fn max_pending_orders)]
  pub type MaxPendingOrders<T: Config> = StorageValue<_, u32, ValueQuery>;

  /// Last issued order id
  #[pallet::storage]
  #[pallet::getter(fn last_order_id)]
  pub type LastOrderId<T: Config> = StorageValue<_, OrderId, ValueQuery>;

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Price feed registered for a token
    OracleRegistered { token: TokenId, oracle: OracleId },
    /// Token removed from the oracle registry
    OracleDeregistered { token: TokenId },
    /// Target setter permission changed
    TargetSetterUpdated { who: T::AccountId, allowed: bool },
    /// Target whitelist membership flipped
    TargetToggled { target: T::AccountId, whitelisted: bool },
    /// Order book added to or removed from the upkeep loop
    SubKeeperUpdated { order_type: OrderType, registered: bool },
    OrderFeeUpdated { fee: Balance },
    MinOrderSizeUpdated { min_order_size: Price },
    MaxPendingOrdersUpdated { max_pending_orders: u32 },
    PauserUpdated { pauser: Option<T::AccountId> },
    /// Global pause flag changed
    PauseSet { paused: bool },
    /// Keeper executed an upkeep instruction
    UpkeepPerformed {
      keeper: T::AccountId,
      order_type: OrderType,
      order_id: OrderId,
    },
    /// Collected token fees withdrawn
    Swept {
      token: TokenId,
      to: T::AccountId,
      amount: Balance,
    },
    /// Collected native fees withdrawn
    NativeSwept { to: T::AccountId, amount: Balance },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Parallel input arrays differ in length
    ArrayLengthMismatch,
    /// Token has no registered oracle
    OracleNotFound,
    /// Oracle reported no price or a zero price
    InvalidPrice,
    /// Intermediate value does not fit
    ArithmeticOverflow,
    /// Basis points above 10_000
    BipsTooHigh,
    /// Token reports more than 18 decimals
    UnsupportedDecimals,
    /// Order value below the configured minimum
    OrderTooSmall,
    /// Swap target is not whitelisted
    TargetNotValid,
    /// Caller may not modify the target whitelist
    NotAllowedToSetTargets,
    /// Caller may not pause
    NotAuthorized,
    /// Automation is paused
    Paused,
    /// Unknown or unregistered order kind tag
    InvalidOrderType,
    /// Perform data does not decode
    InvalidPerformData,
    /// Registry is full
    TooManyRegisteredTokens,
    /// Nothing to withdraw
    NothingToSweep,
    /// Recipient cannot be the zero account
    InvalidRecipient,
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Register or deregister price feeds; `None` removes the token from the registry
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::register_oracles(tokens.len() as u32))]
    pub fn register_oracles(
      origin: OriginFor<T>,
      tokens: BoundedVec<TokenId, T::MaxBatchSize>,
      oracles: BoundedVec<Option<OracleId>, T::MaxBatchSize>,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(tokens.len() == oracles.len(), Error::<T>::ArrayLengthMismatch);
      for (token, oracle) in tokens.into_iter().zip(oracles) {
        match oracle {
          Some(oracle) => Self::register_oracle(token, oracle)?,
          None => Self::deregister_oracle(token),
        }
      }
      Ok(())
    }

    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::set_target_setter())]
    pub fn set_target_setter(
      origin: OriginFor<T>,
      who: T::AccountId,
      allowed: bool,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      if allowed {
        TargetSetters::<T>::insert(&who, ());
      } else {
        TargetSetters::<T>::remove(&who);
      }
      Self::deposit_event(Event::TargetSetterUpdated { who, allowed });
      Ok(())
    }

    /// Flip whitelist membership of every listed target
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::whitelist_targets(targets.len() as u32))]
    pub fn whitelist_targets(
      origin: OriginFor<T>,
      targets: BoundedVec<T::AccountId, T::MaxBatchSize>,
    ) -> DispatchResult {
      let who = ensure_signed(origin)?;
      ensure!(
        TargetSetters::<T>::contains_key(&who),
        Error::<T>::NotAllowedToSetTargets
      );
      for target in targets {
        let whitelisted = !WhitelistedTargets::<T>::contains_key(&target);
        if whitelisted {
          WhitelistedTargets::<T>::insert(&target, ());
        } else {
          WhitelistedTargets::<T>::remove(&target);
        }
        Self::deposit_event(Event::TargetToggled { target, whitelisted });
      }
      Ok(())
    }

    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::set_order_fee())]
    pub fn set_order_fee(origin: OriginFor<T>, fee: Balance) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      OrderFee::<T>::put(fee);
      Self::deposit_event(Event::OrderFeeUpdated { fee });
      Ok(())
    }

    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_min_order_size())]
    pub fn set_min_order_size(origin: OriginFor<T>, min_order_size: Price) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      MinOrderSize::<T>::put(min_order_size);
      Self::deposit_event(Event::MinOrderSizeUpdated { min_order_size });
      Ok(())
    }

    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::set_max_pending_orders())]
    pub fn set_max_pending_orders(origin: OriginFor<T>, max_pending_orders: u32) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      MaxPendingOrders::<T>::put(max_pending_orders);
      Self::deposit_event(Event::MaxPendingOrdersUpdated { max_pending_orders });
      Ok(())
    }

    /// Add or remove order books from the upkeep loop
    #[pallet::call_index(6)]
    #[pallet::weight(T::WeightInfo::register_sub_keepers())]
    pub fn register_sub_keepers(
      origin: OriginFor<T>,
      order_types: BoundedVec<OrderType, ConstU32<3>>,
      registered: bool,
    ) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      for order_type in order_types {
        if registered {
          SubKeepers::<T>::insert(order_type, ());
        } else {
          SubKeepers::<T>::remove(order_type);
        }
        Self::deposit_event(Event::SubKeeperUpdated {
          order_type,
          registered,
        });
      }
      Ok(())
    }

    #[pallet::call_index(7)]
    #[pallet::weight(T::WeightInfo::set_pauser())]
    pub fn set_pauser(origin: OriginFor<T>, pauser: Option<T::AccountId>) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Pauser::<T>::set(pauser.clone());
      Self::deposit_event(Event::PauserUpdated { pauser });
      Ok(())
    }

    /// Pause or resume every order book at once
    #[pallet::call_index(8)]
    #[pallet::weight(T::WeightInfo::pause_all())]
    pub fn pause_all(origin: OriginFor<T>, paused: bool) -> DispatchResult {
      if let Err(origin) = T::AdminOrigin::try_origin(origin) {
        let who = ensure_signed(origin)?;
        ensure!(Self::is_pauser_account(&who), Error::<T>::NotAuthorized);
      }
      Paused::<T>::put(paused);
      log::debug!(target: LOG_TARGET, "global pause set to {paused}");
      Self::deposit_event(Event::PauseSet { paused });
      Ok(())
    }

    /// Execute perform data previously returned by `check_upkeep`
    #[pallet::call_index(9)]
    #[pallet::weight(T::WeightInfo::perform_upkeep(T::MaxOrdersPerBook::get()))]
    pub fn perform_upkeep(
      origin: OriginFor<T>,
      perform_data: BoundedVec<u8, T::MaxPerformDataLen>,
    ) -> DispatchResult {
      let keeper = ensure_signed(origin)?;
      ensure!(!Paused::<T>::get(), Error::<T>::Paused);
      let instruction = Self::decode_perform_data(&perform_data)?;
      let order_type = instruction.order_type;
      let order_id = instruction.order_id;
      match order_type {
        OrderType::StopLimit => T::StopLimit::perform_upkeep(&keeper, instruction)?,
        OrderType::Bracket => T::Bracket::perform_upkeep(&keeper, instruction)?,
        OrderType::OracleLess => T::OracleLess::perform_upkeep(&keeper, instruction)?,
      }
      Self::deposit_event(Event::UpkeepPerformed {
        keeper,
        order_type,
        order_id,
      });
      Ok(())
    }

    /// Withdraw collected fees in `token`
    #[pallet::call_index(10)]
    #[pallet::weight(T::WeightInfo::sweep())]
    pub fn sweep(origin: OriginFor<T>, token: TokenId, to: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(!is_zero_account(&to), Error::<T>::InvalidRecipient);
      let account = Self::account_id();
      let amount = T::Assets::balance(token, &account);
      ensure!(!amount.is_zero(), Error::<T>::NothingToSweep);
      T::Assets::transfer(token, &account, &to, amount, Preservation::Expendable)?;
      Self::deposit_event(Event::Swept { token, to, amount });
      Ok(())
    }

    /// Withdraw collected native order fees
    #[pallet::call_index(11)]
    #[pallet::weight(T::WeightInfo::sweep_native())]
    pub fn sweep_native(origin: OriginFor<T>, to: T::AccountId) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      ensure!(!is_zero_account(&to), Error::<T>::InvalidRecipient);
      let account = Self::account_id();
      let amount =
        T::Currency::reducible_balance(&account, Preservation::Expendable, Fortitude::Polite);
      ensure!(!amount.is_zero(), Error::<T>::NothingToSweep);
      T::Currency::transfer(&account, &to, amount, Preservation::Expendable)?;
      Self::deposit_event(Event::NativeSwept { to, amount });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Fee collection account
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    /// Poll registered order books in priority order and encode the first triggered order.
    ///
    /// `check_data` may carry a SCALE-encoded `(start, end)` index window; empty data scans
    /// every order. Returns `(false, [])` while paused or when nothing is triggered.
    pub fn check_upkeep(check_data: &[u8]) -> (bool, Vec<u8>) {
      if Paused::<T>::get() {
        return (false, Vec::new());
      }
      let range = ScanRange::from_check_data(check_data);
      for order_type in OrderType::PRIORITY {
        if !SubKeepers::<T>::contains_key(order_type) {
          continue;
        }
        let found = match order_type {
          OrderType::StopLimit => T::StopLimit::check_upkeep(range),
          OrderType::Bracket => T::Bracket::check_upkeep(range),
          OrderType::OracleLess => T::OracleLess::check_upkeep(range),
        };
        if let Some(instruction) = found {
          return (true, instruction.encode());
        }
      }
      (false, Vec::new())
    }

    /// Tokens with a registered oracle
    pub fn registered_tokens() -> Vec<TokenId> {
      RegisteredTokens::<T>::get().into_inner()
    }

    pub fn is_sub_keeper(order_type: OrderType) -> bool {
      SubKeepers::<T>::contains_key(order_type)
    }

    pub fn is_whitelisted_target(target: &T::AccountId) -> bool {
      WhitelistedTargets::<T>::contains_key(target)
    }

    pub fn is_target_setter(who: &T::AccountId) -> bool {
      TargetSetters::<T>::contains_key(who)
    }

    /// USD price of `token`, 1e8-scaled
    pub fn price_of(token: TokenId) -> Result<Price, DispatchError> {
      let oracle = Oracles::<T>::get(token).ok_or(Error::<T>::OracleNotFound)?;
      let price = T::PriceFeed::latest_price(oracle)
        .filter(|price| !price.is_zero())
        .ok_or(Error::<T>::InvalidPrice)?;
      Ok(price)
    }

    /// Price of `token_in` denominated in `token_out`, 1e8-scaled, truncated toward zero
    pub fn exchange_rate(token_in: TokenId, token_out: TokenId) -> Result<Price, DispatchError> {
      let price_in = Self::price_of(token_in)?;
      let price_out = Self::price_of(token_out)?;
      let rate = U256::from(price_in)
        .checked_mul(U256::from(PRICE_SCALE))
        .ok_or(Error::<T>::ArithmeticOverflow)?
        / U256::from(price_out);
      Self::to_balance(rate)
    }

    /// Oracle-fair amount of `token_out` for `amount_in` of `token_in`, less `slippage` bips.
    ///
    /// Both token decimal counts are honoured, so the result is in `token_out` base units.
    pub fn min_amount_received(
      amount_in: Balance,
      token_in: TokenId,
      token_out: TokenId,
      slippage: Bips,
    ) -> Result<Balance, DispatchError> {
      ensure!(bips_in_range(slippage), Error::<T>::BipsTooHigh);
      let price_in = Self::price_of(token_in)?;
      let price_out = Self::price_of(token_out)?;
      let decimals_in = Self::decimals_of(token_in)?;
      let decimals_out = Self::decimals_of(token_out)?;
      let numerator = U256::from(amount_in)
        .checked_mul(U256::from(price_in))
        .and_then(|v| v.checked_mul(U256::exp10(decimals_out as usize)))
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      let denominator = U256::from(price_out)
        .checked_mul(U256::exp10(decimals_in as usize))
        .ok_or(Error::<T>::ArithmeticOverflow)?;
      let fair_out = numerator / denominator;
      let keep = U256::from(MAX_BIPS - slippage);
      let min_out = fair_out
        .checked_mul(keep)
        .ok_or(Error::<T>::ArithmeticOverflow)?
        / U256::from(MAX_BIPS);
      Self::to_balance(min_out)
    }

    /// USD value of `amount` of `token`, 1e8-scaled
    pub fn usd_value(token: TokenId, amount: Balance) -> Result<Price, DispatchError> {
      let price = Self::price_of(token)?;
      let decimals = Self::decimals_of(token)?;
      let value = U256::from(amount)
        .checked_mul(U256::from(price))
        .ok_or(Error::<T>::ArithmeticOverflow)?
        / U256::exp10(decimals as usize);
      Self::to_balance(value)
    }

    pub fn check_min_order_size(token: TokenId, amount: Balance) -> DispatchResult {
      let value = Self::usd_value(token, amount)?;
      ensure!(value >= MinOrderSize::<T>::get(), Error::<T>::OrderTooSmall);
      Ok(())
    }

    pub fn validate_target(target: &T::AccountId) -> DispatchResult {
      ensure!(
        WhitelistedTargets::<T>::contains_key(target),
        Error::<T>::TargetNotValid
      );
      Ok(())
    }

    fn decimals_of(token: TokenId) -> Result<u8, DispatchError> {
      let decimals = <T::Assets as MetadataInspect<T::AccountId>>::decimals(token);
      ensure!(decimals <= MAX_DECIMALS, Error::<T>::UnsupportedDecimals);
      Ok(decimals)
    }

    fn to_balance(value: U256) -> Result<Balance, DispatchError> {
      ensure!(
        value <= U256::from(u128::MAX),
        Error::<T>::ArithmeticOverflow
      );
      Ok(value.as_u128())
    }

    fn is_pauser_account(who: &T::AccountId) -> bool {
      Pauser::<T>::get().as_ref() == Some(who)
    }

    fn register_oracle(token: TokenId, oracle: OracleId) -> DispatchResult {
      RegisteredTokens::<T>::try_mutate(|tokens| -> DispatchResult {
        if !tokens.contains(&token) {
          tokens
            .try_push(token)
            .map_err(|_| Error::<T>::TooManyRegisteredTokens)?;
        }
        Ok(())
      })?;
      Oracles::<T>::insert(token, oracle);
      Self::deposit_event(Event::OracleRegistered { token, oracle });
      Ok(())
    }

    fn deregister_oracle(token: TokenId) {
      Oracles::<T>::remove(token);
      RegisteredTokens::<T>::mutate(|tokens| {
        if let Some(i) = tokens.iter().position(|t| *t == token) {
          tokens.remove(i);
        }
      });
      Self::deposit_event(Event::OracleDeregistered { token });
    }

    fn decode_perform_data(
      perform_data: &[u8],
    ) -> Result<UpkeepInstruction<T::AccountId>, DispatchError> {
      let tag = perform_data
        .first()
        .copied()
        .ok_or(Error::<T>::InvalidPerformData)?;
      let order_type = OrderType::from_tag(tag).ok_or(Error::<T>::InvalidOrderType)?;
      ensure!(
        SubKeepers::<T>::contains_key(order_type),
        Error::<T>::InvalidOrderType
      );
      UpkeepInstruction::<T::AccountId>::decode_all(&mut &perform_data[..])
        .map_err(|_| Error::<T>::InvalidPerformData.into())
    }
  }

  impl<T: Config> AutomationContext<T::AccountId> for Pallet<T> {
    fn is_paused() -> bool {
      Paused::<T>::get()
    }

    fn is_pauser(who: &T::AccountId) -> bool {
      Self::is_pauser_account(who)
    }

    fn exchange_rate(token_in: TokenId, token_out: TokenId) -> Result<Price, DispatchError> {
      Self::exchange_rate(token_in, token_out)
    }

    fn min_amount_received(
      amount_in: Balance,
      token_in: TokenId,
      token_out: TokenId,
      slippage: Bips,
    ) -> Result<Balance, DispatchError> {
      Self::min_amount_received(amount_in, token_in, token_out, slippage)
    }

    fn check_min_order_size(token: TokenId, amount: Balance) -> DispatchResult {
      Self::check_min_order_size(token, amount)
    }

    fn validate_target(target: &T::AccountId) -> DispatchResult {
      Self::validate_target(target)
    }

    fn max_pending_orders() -> u32 {
      MaxPendingOrders::<T>::get()
    }

    fn order_fee() -> Balance {
      OrderFee::<T>::get()
    }

    fn next_order_id() -> OrderId {
      LastOrderId::<T>::mutate(|last| {
        *last = last.saturating_add(1);
        *last
      })
    }

    fn fee_collector() -> T::AccountId {
      Self::account_id()
    }
  }

  #[pallet::genesis_config]
  #[derive(frame::prelude::DefaultNoBound)]
  pub struct GenesisConfig<T: Config> {
    pub order_fee: Balance,
    pub min_order_size: Price,
    pub max_pending_orders: u32,
    pub sub_keepers: Vec<OrderType>,
    pub oracles: Vec<(TokenId, OracleId)>,
    pub target_setters: Vec<T::AccountId>,
    pub pauser: Option<T::AccountId>,
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      OrderFee::<T>::put(self.order_fee);
      MinOrderSize::<T>::put(self.min_order_size);
      MaxPendingOrders::<T>::put(self.max_pending_orders);
      for order_type in &self.sub_keepers {
        SubKeepers::<T>::insert(order_type, ());
      }
      for (token, oracle) in &self.oracles {
        Pallet::<T>::register_oracle(*token, *oracle).expect("Registered tokens exceed max limit");
      }
      for who in &self.target_setters {
        TargetSetters::<T>::insert(who, ());
      }
      if let Some(pauser) = &self.pauser {
        Pauser::<T>::put(pauser);
      }
      // Fee account survives a full native sweep
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }
}
