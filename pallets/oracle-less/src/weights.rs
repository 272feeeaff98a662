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
	fn whitelist_tokens(n: u32) -> Weight;
	fn fill_order(n: u32) -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn create_order() -> Weight {
		Weight::from_parts(110_000_000, 8_500)
			.saturating_add(T::DbWeight::get().reads(9))
			.saturating_add(T::DbWeight::get().writes(7))
	}
	fn modify_order() -> Weight {
		Weight::from_parts(80_000_000, 7_000)
			.saturating_add(T::DbWeight::get().reads(7))
			.saturating_add(T::DbWeight::get().writes(4))
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
	fn whitelist_tokens(n: u32) -> Weight {
		Weight::from_parts(10_000_000, 0)
			.saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(n.into()))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(n.into())))
	}
	/// Worst case: `n` pending orders read while collecting escrowed tokens.
	fn fill_order(n: u32) -> Weight {
		Weight::from_parts(230_000_000, 36_000)
			.saturating_add(Weight::from_parts(4_000_000, 2600).saturating_mul(n.into()))
			.saturating_add(T::DbWeight::get().reads(26))
			.saturating_add(T::DbWeight::get().reads((n as u64).saturating_mul(2)))
			.saturating_add(T::DbWeight::get().writes(14))
	}
}

impl WeightInfo for () {
	fn create_order() -> Weight {
		Weight::from_parts(110_000_000, 8_500)
	}
	fn modify_order() -> Weight {
		Weight::from_parts(80_000_000, 7_000)
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
	fn whitelist_tokens(n: u32) -> Weight {
		Weight::from_parts(10_000_000, 0)
			.saturating_add(Weight::from_parts(4_000_000, 0).saturating_mul(n.into()))
	}
	fn fill_order(n: u32) -> Weight {
		Weight::from_parts(230_000_000, 36_000)
			.saturating_add(Weight::from_parts(4_000_000, 2600).saturating_mul(n.into()))
	}
}
