#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn create_order() -> Weight;
	fn modify_order() -> Weight;
	fn cancel_order() -> Weight;
	fn admin_cancel_order() -> Weight;
	fn pause() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn create_order() -> Weight {
		Weight::from_parts(120_000_000, 9_000)
			.saturating_add(T::DbWeight::get().reads(11))
			.saturating_add(T::DbWeight::get().writes(8))
	}
	fn modify_order() -> Weight {
		Weight::from_parts(90_000_000, 8_000)
			.saturating_add(T::DbWeight::get().reads(9))
			.saturating_add(T::DbWeight::get().writes(5))
	}
	fn cancel_order() -> Weight {
		Weight::from_parts(70_000_000, 6_000)
			.saturating_add(T::DbWeight::get().reads(6))
			.saturating_add(T::DbWeight::get().writes(6))
	}
	fn admin_cancel_order() -> Weight {
		Weight::from_parts(70_000_000, 6_000)
			.saturating_add(T::DbWeight::get().reads(6))
			.saturating_add(T::DbWeight::get().writes(6))
	}
	fn pause() -> Weight {
		Weight::from_parts(9_000_000, 1500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
}

impl WeightInfo for () {
	fn create_order() -> Weight {
		Weight::from_parts(120_000_000, 9_000)
	}
	fn modify_order() -> Weight {
		Weight::from_parts(90_000_000, 8_000)
	}
	fn cancel_order() -> Weight {
		Weight::from_parts(70_000_000, 6_000)
	}
	fn admin_cancel_order() -> Weight {
		Weight::from_parts(70_000_000, 6_000)
	}
	fn pause() -> Weight {
		Weight::from_parts(9_000_000, 1500)
	}
}
