#![cfg(feature = "runtime-benchmarks")]

extern crate alloc;

use crate::*;
use alloc::vec::Vec;
use frame::prelude::*;
use polkadot_sdk::frame_benchmarking::{account, v2::*};
use polkadot_sdk::frame_system::RawOrigin;

#[benchmarks]
mod benches {
  use super::*;

  const SEED: u32 = 0;

  fn configured_path<T: Config>() -> Vec<T::AssetId> {
    Params::<T>::get()
      .map(|params| params.path.to_vec())
      .expect("benchmarks require a genesis-configured engine")
  }

  fn unit<T: Config>() -> T::Balance {
    Params::<T>::get()
      .map(|params| params.tranche)
      .expect("benchmarks require a genesis-configured engine")
  }

  /// Funds `who` and deposits ten tranches.
  fn funded_depositor<T: Config>(name: &'static str) -> T::AccountId {
    let who: T::AccountId = account(name, 0, SEED);
    let path = configured_path::<T>();
    let amount = unit::<T>().saturating_mul(10u32.into());
    T::BenchmarkHelper::fund(&who, path[0], amount.saturating_mul(2u32.into()))
      .expect("benchmark helper funds depositor");
    Pallet::<T>::deposit(RawOrigin::Signed(who.clone()).into(), amount)
      .expect("deposit succeeds");
    who
  }

  #[benchmark]
  fn deposit() {
    let caller: T::AccountId = account("caller", 0, SEED);
    let path = configured_path::<T>();
    let amount = unit::<T>();
    T::BenchmarkHelper::fund(&caller, path[0], amount).expect("benchmark helper funds caller");

    #[extrinsic_call]
    _(RawOrigin::Signed(caller.clone()), amount);

    assert_eq!(Depositors::<T>::get(&caller).map(|info| info.principal), Some(amount));
  }

  #[benchmark]
  fn withdraw_principal() {
    let caller = funded_depositor::<T>("caller");
    let amount = unit::<T>();

    #[extrinsic_call]
    _(RawOrigin::Signed(caller.clone()), amount);

    assert_eq!(
      Depositors::<T>::get(&caller).map(|info| info.principal),
      Some(amount.saturating_mul(9u32.into()))
    );
  }

  #[benchmark]
  fn withdraw_converted() {
    let caller = funded_depositor::<T>("caller");
    T::BenchmarkHelper::prepare_route(&configured_path::<T>())
      .expect("benchmark helper prepares route");
    let (_, amount_out) =
      Pallet::<T>::do_execute_tick(&caller, T::Time::now()).expect("tick succeeds");

    #[extrinsic_call]
    _(RawOrigin::Signed(caller.clone()), amount_out);

    assert_eq!(
      Depositors::<T>::get(&caller).map(|info| info.converted),
      Some(T::Balance::zero())
    );
  }

  #[benchmark]
  fn execute_tick() {
    let depositor = funded_depositor::<T>("depositor");
    let keeper: T::AccountId = account("keeper", 0, SEED);
    T::BenchmarkHelper::prepare_route(&configured_path::<T>())
      .expect("benchmark helper prepares route");

    #[extrinsic_call]
    _(RawOrigin::Signed(keeper), depositor.clone());

    assert!(
      Depositors::<T>::get(&depositor)
        .and_then(|info| info.last_execution)
        .is_some()
    );
  }

  #[benchmark]
  fn set_params() -> Result<(), BenchmarkError> {
    let origin =
      T::AdminOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
    let current = Params::<T>::get().ok_or(BenchmarkError::Weightless)?;
    let params = EngineParams {
      interval: current.interval.saturating_add(1u32.into()),
      ..current
    };

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, params.clone());

    assert_eq!(Params::<T>::get(), Some(params));
    Ok(())
  }

  #[benchmark]
  fn set_paused() -> Result<(), BenchmarkError> {
    let origin =
      T::AdminOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;

    #[extrinsic_call]
    _(origin as T::RuntimeOrigin, true);

    assert!(Paused::<T>::get());
    Ok(())
  }

  #[cfg(test)]
  use crate::mock::{Test, new_test_ext};
  #[cfg(test)]
  impl_benchmark_test_suite!(Pallet, new_test_ext(), Test);
}
