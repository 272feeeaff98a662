#![cfg_attr(not(feature = "std"), no_std)]

pub mod ecosystem;
pub mod execution;
pub mod orders;
pub mod traits;

pub use ecosystem::*;
pub use execution::*;
pub use orders::*;
pub use traits::*;
