extern crate alloc;

use crate::*;
use alloc::vec::Vec;
use polkadot_sdk::frame_benchmarking::v2::*;
use polkadot_sdk::frame_support::{
  BoundedVec,
  traits::{
    Get,
    fungible::{Inspect, Mutate},
  },
};
use polkadot_sdk::frame_system::RawOrigin;
use primitives::{Balance, OrderType};

#[benchmarks]
mod benches {
  use super::*;

  #[benchmark]
  fn register_oracles(n: Linear<1, 16>) {
    let n = n.min(T::MaxBatchSize::get()).min(T::MaxRegisteredTokens::get());
    RegisteredTokens::<T>::kill();
    let tokens: BoundedVec<_, T::MaxBatchSize> = (0..n)
      .map(|i| 1_000 + i)
      .collect::<Vec<_>>()
      .try_into()
      .expect("Batch within bounds");
    let oracles: BoundedVec<_, T::MaxBatchSize> = (0..n)
      .map(Some)
      .collect::<Vec<_>>()
      .try_into()
      .expect("Batch within bounds");

    #[extrinsic_call]
    register_oracles(RawOrigin::Root, tokens, oracles);

    assert_eq!(Oracles::<T>::get(1_000), Some(0));
  }

  #[benchmark]
  fn set_target_setter() {
    let who: T::AccountId = account("setter", 0, 0);

    #[extrinsic_call]
    set_target_setter(RawOrigin::Root, who.clone(), true);

    assert!(TargetSetters::<T>::contains_key(&who));
  }

  #[benchmark]
  fn whitelist_targets(n: Linear<1, 16>) {
    let n = n.min(T::MaxBatchSize::get());
    let caller: T::AccountId = whitelisted_caller();
    TargetSetters::<T>::insert(&caller, ());
    let targets: BoundedVec<T::AccountId, T::MaxBatchSize> = (0..n)
      .map(|i| account("target", i, 0))
      .collect::<Vec<_>>()
      .try_into()
      .expect("Batch within bounds");

    #[extrinsic_call]
    whitelist_targets(RawOrigin::Signed(caller), targets);

    assert!(WhitelistedTargets::<T>::contains_key(account::<T::AccountId>("target", 0, 0)));
  }

  #[benchmark]
  fn set_order_fee() {
    #[extrinsic_call]
    set_order_fee(RawOrigin::Root, 1_000);
  }

  #[benchmark]
  fn set_min_order_size() {
    #[extrinsic_call]
    set_min_order_size(RawOrigin::Root, 25 * primitives::params::PRICE_SCALE);
  }

  #[benchmark]
  fn set_max_pending_orders() {
    #[extrinsic_call]
    set_max_pending_orders(RawOrigin::Root, 150);
  }

  #[benchmark]
  fn register_sub_keepers() {
    let order_types = BoundedVec::try_from(OrderType::PRIORITY.to_vec()).expect("Three order types");

    #[extrinsic_call]
    register_sub_keepers(RawOrigin::Root, order_types, true);

    assert!(SubKeepers::<T>::contains_key(OrderType::OracleLess));
  }

  #[benchmark]
  fn set_pauser() {
    let pauser: T::AccountId = account("pauser", 0, 0);

    #[extrinsic_call]
    set_pauser(RawOrigin::Root, Some(pauser));
  }

  #[benchmark]
  fn pause_all() {
    let pauser: T::AccountId = whitelisted_caller();
    Pauser::<T>::put(&pauser);

    #[extrinsic_call]
    pause_all(RawOrigin::Signed(pauser), true);

    assert!(Paused::<T>::get());
  }

  #[benchmark]
  fn sweep_native() {
    let to: T::AccountId = account("treasury", 0, 0);
    let fees: Balance = 1_000_000;
    T::Currency::mint_into(&Pallet::<T>::account_id(), fees).expect("Failed to fund fee account");

    #[extrinsic_call]
    sweep_native(RawOrigin::Root, to.clone());

    assert_eq!(T::Currency::balance(&to), fees);
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
