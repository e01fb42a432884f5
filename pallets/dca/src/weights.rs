#![cfg_attr(rustfmt, rustfmt_skip)]
#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(missing_docs)]

use core::marker::PhantomData;
use polkadot_sdk::frame_support::{
  traits::Get,
  weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
  fn deposit() -> Weight;
  fn withdraw_principal() -> Weight;
  fn withdraw_converted() -> Weight;
  fn execute_tick() -> Weight;
  fn set_params() -> Weight;
  fn set_paused() -> Weight;
}

pub struct SubstrateWeight<T>(PhantomData<T>);
impl<T: polkadot_sdk::frame_system::Config + crate::Config> WeightInfo for SubstrateWeight<T> {
  // Params, Paused, Depositors, TotalPrincipal + two asset accounts
  fn deposit() -> Weight {
    Weight::from_parts(28_000_000, 3600)
      .saturating_add(T::DbWeight::get().reads(6))
      .saturating_add(T::DbWeight::get().writes(4))
  }

  fn withdraw_principal() -> Weight {
    Weight::from_parts(28_000_000, 3600)
      .saturating_add(T::DbWeight::get().reads(5))
      .saturating_add(T::DbWeight::get().writes(4))
  }

  fn withdraw_converted() -> Weight {
    Weight::from_parts(28_000_000, 3600)
      .saturating_add(T::DbWeight::get().reads(5))
      .saturating_add(T::DbWeight::get().writes(4))
  }

  // Quote plus a swap walking every pool on the longest path
  fn execute_tick() -> Weight {
    let pool_reads = u64::from(T::MaxPathLength::get()).saturating_mul(2);
    Weight::from_parts(85_000_000, 8000)
      .saturating_add(T::DbWeight::get().reads(pool_reads.saturating_add(5)))
      .saturating_add(T::DbWeight::get().writes(pool_reads.saturating_add(3)))
  }

  fn set_params() -> Weight {
    Weight::from_parts(14_000_000, 1000)
      .saturating_add(T::DbWeight::get().reads(3))
      .saturating_add(T::DbWeight::get().writes(1))
  }

  fn set_paused() -> Weight {
    Weight::from_parts(8_000_000, 600)
      .saturating_add(T::DbWeight::get().writes(1))
  }
}

impl WeightInfo for () {
  fn deposit() -> Weight { Weight::from_parts(28_000_000, 3600) }
  fn withdraw_principal() -> Weight { Weight::from_parts(28_000_000, 3600) }
  fn withdraw_converted() -> Weight { Weight::from_parts(28_000_000, 3600) }
  fn execute_tick() -> Weight { Weight::from_parts(85_000_000, 8000) }
  fn set_params() -> Weight { Weight::from_parts(14_000_000, 1000) }
  fn set_paused() -> Weight { Weight::from_parts(8_000_000, 600) }
}
