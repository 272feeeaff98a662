#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use polkadot_sdk::frame_support::{traits::Get, weights::{Weight, constants::RocksDbWeight}};
use core::marker::PhantomData;

pub trait WeightInfo {
	fn register_oracles(n: u32) -> Weight;
	fn set_target_setter() -> Weight;
	fn whitelist_targets(n: u32) -> Weight;
	fn set_order_fee() -> Weight;
	fn set_min_order_size() -> Weight;
	fn set_max_pending_orders() -> Weight;
	fn register_sub_keepers() -> Weight;
	fn set_pauser() -> Weight;
	fn pause_all() -> Weight;
	fn perform_upkeep(n: u32) -> Weight;
	fn sweep() -> Weight;
	fn sweep_native() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config> WeightInfo for SubstrateWeight<T> {
	fn register_oracles(n: u32) -> Weight {
		Weight::from_parts(12_000_000, 1600)
			.saturating_add(Weight::from_parts(6_000_000, 0).saturating_mul(n.into()))
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(n.into())))
	}
	fn set_target_setter() -> Weight {
		Weight::from_parts(10_000_000, 1500)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn whitelist_targets(n: u32) -> Weight {
		Weight::from_parts(12_000_000, 1500)
			.saturating_add(Weight::from_parts(5_000_000, 0).saturating_mul(n.into()))
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().reads((1_u64).saturating_mul(n.into())))
			.saturating_add(T::DbWeight::get().writes((1_u64).saturating_mul(n.into())))
	}
	fn set_order_fee() -> Weight {
		Weight::from_parts(8_000_000, 0)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_min_order_size() -> Weight {
		Weight::from_parts(8_000_000, 0)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn set_max_pending_orders() -> Weight {
		Weight::from_parts(8_000_000, 0)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn register_sub_keepers() -> Weight {
		Weight::from_parts(10_000_000, 0)
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn set_pauser() -> Weight {
		Weight::from_parts(8_000_000, 0)
			.saturating_add(T::DbWeight::get().writes(1))
	}
	fn pause_all() -> Weight {
		Weight::from_parts(9_000_000, 1500)
			.saturating_add(T::DbWeight::get().reads(1))
			.saturating_add(T::DbWeight::get().writes(1))
	}
	/// Worst case: `n` pending orders read while collecting the book's escrowed tokens.
	fn perform_upkeep(n: u32) -> Weight {
		Weight::from_parts(250_000_000, 40_000)
			.saturating_add(Weight::from_parts(4_000_000, 2600).saturating_mul(n.into()))
			.saturating_add(T::DbWeight::get().reads(30))
			.saturating_add(T::DbWeight::get().reads((n as u64).saturating_mul(2)))
			.saturating_add(T::DbWeight::get().writes(16))
	}
	fn sweep() -> Weight {
		Weight::from_parts(45_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(3))
			.saturating_add(T::DbWeight::get().writes(3))
	}
	fn sweep_native() -> Weight {
		Weight::from_parts(40_000_000, 3600)
			.saturating_add(T::DbWeight::get().reads(2))
			.saturating_add(T::DbWeight::get().writes(2))
	}
}

impl WeightInfo for () {
	fn register_oracles(n: u32) -> Weight {
		Weight::from_parts(12_000_000, 1600)
			.saturating_add(Weight::from_parts(6_000_000, 0).saturating_mul(n.into()))
	}
	fn set_target_setter() -> Weight {
		Weight::from_parts(10_000_000, 1500)
	}
	fn whitelist_targets(n: u32) -> Weight {
		Weight::from_parts(12_000_000, 1500)
			.saturating_add(Weight::from_parts(5_000_000, 0).saturating_mul(n.into()))
	}
	fn set_order_fee() -> Weight {
		Weight::from_parts(8_000_000, 0)
	}
	fn set_min_order_size() -> Weight {
		Weight::from_parts(8_000_000, 0)
	}
	fn set_max_pending_orders() -> Weight {
		Weight::from_parts(8_000_000, 0)
	}
	fn register_sub_keepers() -> Weight {
		Weight::from_parts(10_000_000, 0)
	}
	fn set_pauser() -> Weight {
		Weight::from_parts(8_000_000, 0)
	}
	fn pause_all() -> Weight {
		Weight::from_parts(9_000_000, 1500)
	}
	fn perform_upkeep(n: u32) -> Weight {
		Weight::from_parts(250_000_000, 40_000)
			.saturating_add(Weight::from_parts(4_000_000, 2600).saturating_mul(n.into()))
			.saturating_add(RocksDbWeight::get().reads(30))
			.saturating_add(RocksDbWeight::get().reads((n as u64).saturating_mul(2)))
			.saturating_add(RocksDbWeight::get().writes(16))
	}
	fn sweep() -> Weight {
		Weight::from_parts(45_000_000, 3600)
	}
	fn sweep_native() -> Weight {
		Weight::from_parts(40_000_000, 3600)
	}
}
