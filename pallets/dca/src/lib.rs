//! # DCA Pallet
//!
//! Dollar-cost averaging engine: depositors park an input asset in the pallet's
//! custody account, and a keeper (any signed account, or the pallet's own
//! `on_idle` sweep) periodically converts a fixed tranche of each depositor's
//! principal into the output asset through a Uniswap V2 style router.
//!
//! ## Ledger
//!
//! Every depositor has a `DepositorInfo` holding the unconverted `principal`,
//! the accumulated `converted` output and the time of the last conversion.
//! `TotalPrincipal` and `TotalConverted` mirror the sums over all depositors.
//! A record whose balances both reach zero is removed.
//!
//! ## Execution
//!
//! A depositor is due once `interval` has elapsed since its last conversion
//! (or immediately if it never converted). A tick sells
//! `min(tranche, principal)` along the configured path with a minimum output
//! of the router quote minus `max_slippage`, and a deadline of the tick time
//! plus `swap_deadline`. A failed swap leaves the ledger and the schedule
//! untouched so the next keeper call retries.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use pallet::*;

pub mod adapters;
pub use adapters::{AssetOps, RouterAdapter, RouterError, SwapRouter};

pub mod weights;
pub use weights::WeightInfo;

#[cfg(test)]
mod mock;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

pub(crate) const LOG_TARGET: &str = "runtime::dca";

#[cfg(feature = "runtime-benchmarks")]
pub trait BenchmarkHelper<AccountId, AssetId, Balance> {
  /// Credits `amount` of `asset` to `who`.
  fn fund(
    who: &AccountId,
    asset: AssetId,
    amount: Balance,
  ) -> Result<(), polkadot_sdk::sp_runtime::DispatchError>;

  /// Makes the configured router able to settle a swap along `path`.
  fn prepare_route(path: &[AssetId]) -> Result<(), polkadot_sdk::sp_runtime::DispatchError>;
}

#[frame::pallet]
pub mod pallet {
  use super::{AssetOps, LOG_TARGET, RouterAdapter, RouterError, SwapRouter, WeightInfo};
  use alloc::vec::Vec;
  use frame::prelude::*;
  use polkadot_sdk::{
    frame_support::{
      PalletId,
      storage::with_storage_layer,
      traits::{EnsureOrigin, Time},
    },
    sp_runtime::traits::{AccountIdConversion, SaturatedConversion, Zero},
  };
  use primitives::{SwapOrder, params};

  pub type MomentOf<T> = <<T as Config>::Time as Time>::Moment;
  pub type PathOf<T> = BoundedVec<<T as Config>::AssetId, <T as Config>::MaxPathLength>;
  pub type DepositorInfoOf<T> = DepositorInfo<<T as Config>::Balance, MomentOf<T>>;
  pub type EngineParamsOf<T> = EngineParams<<T as Config>::Balance, MomentOf<T>, PathOf<T>>;
  pub type RouterOf<T> = RouterAdapter<
    <T as Config>::Router,
    <T as frame_system::Config>::AccountId,
    <T as Config>::AssetId,
    <T as Config>::Balance,
    MomentOf<T>,
  >;

  /// Per-depositor ledger entry.
  #[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Decode,
    DecodeWithMemTracking,
    Encode,
    Eq,
    PartialEq,
    TypeInfo,
    MaxEncodedLen,
  )]
  pub struct DepositorInfo<Balance, Moment> {
    /// Input asset deposited and not yet converted
    pub principal: Balance,
    /// Output asset received from conversions and not yet withdrawn
    pub converted: Balance,
    /// Timestamp of the last successful conversion
    pub last_execution: Option<Moment>,
  }

  impl<Balance: Zero, Moment> DepositorInfo<Balance, Moment> {
    pub fn is_empty(&self) -> bool {
      self.principal.is_zero() && self.converted.is_zero()
    }
  }

  /// Engine-wide execution parameters, set at genesis or by `AdminOrigin`.
  #[derive(
    Clone, Debug, Decode, DecodeWithMemTracking, Encode, Eq, PartialEq, TypeInfo, MaxEncodedLen,
  )]
  pub struct EngineParams<Balance, Moment, Path> {
    /// Router path; first entry is the input asset, last the output asset
    pub path: Path,
    /// Minimum time between two conversions of the same depositor
    pub interval: Moment,
    /// Input amount sold per conversion
    pub tranche: Balance,
    /// Accepted shortfall of the executed output against the router quote
    pub max_slippage: Permill,
    /// Validity window added to the tick time to form the swap deadline
    pub swap_deadline: Moment,
  }

  #[pallet::config]
  pub trait Config: frame_system::Config {
    type AssetId: Parameter + Member + Copy + MaybeSerializeDeserialize + MaxEncodedLen;

    type Balance: Parameter
      + Member
      + AtLeast32BitUnsigned
      + Default
      + Copy
      + MaybeSerializeDeserialize
      + MaxEncodedLen;

    /// Custody of deposits and proceeds
    type AssetOps: AssetOps<Self::AccountId, Self::AssetId, Self::Balance>;

    /// Router every conversion is executed through
    type Router: SwapRouter<
        Self::AccountId,
        Self::AssetId,
        Self::Balance,
        <Self::Time as Time>::Moment,
      >;

    /// Wall clock driving schedules and swap deadlines
    type Time: Time;

    #[pallet::constant]
    type PalletId: Get<PalletId>;

    /// Origin allowed to change parameters and pause the engine
    type AdminOrigin: EnsureOrigin<Self::RuntimeOrigin>;

    #[pallet::constant]
    type MaxPathLength: Get<u32>;

    /// Upper bound on conversions attempted by a single `on_idle`
    #[pallet::constant]
    type MaxTicksPerBlock: Get<u32>;

    type WeightInfo: WeightInfo;

    #[cfg(feature = "runtime-benchmarks")]
    type BenchmarkHelper: crate::BenchmarkHelper<Self::AccountId, Self::AssetId, Self::Balance>;
  }

  #[pallet::pallet]
  pub struct Pallet<T>(_);

  #[pallet::storage]
  #[pallet::getter(fn params)]
  pub type Params<T: Config> = StorageValue<_, EngineParamsOf<T>, OptionQuery>;

  #[pallet::storage]
  #[pallet::getter(fn depositor)]
  pub type Depositors<T: Config> =
    StorageMap<_, Blake2_128Concat, T::AccountId, DepositorInfoOf<T>, OptionQuery>;

  /// Sum of all depositors' principal
  #[pallet::storage]
  #[pallet::getter(fn total_principal)]
  pub type TotalPrincipal<T: Config> = StorageValue<_, T::Balance, ValueQuery>;

  /// Sum of all depositors' converted balance
  #[pallet::storage]
  #[pallet::getter(fn total_converted)]
  pub type TotalConverted<T: Config> = StorageValue<_, T::Balance, ValueQuery>;

  /// Blocks deposits and conversions; withdrawals stay open
  #[pallet::storage]
  #[pallet::getter(fn paused)]
  pub type Paused<T> = StorageValue<_, bool, ValueQuery>;

  /// Last depositor visited by the `on_idle` sweep
  #[pallet::storage]
  pub type SweepCursor<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

  #[pallet::genesis_config]
  pub struct GenesisConfig<T: Config> {
    /// Leave empty to start unconfigured
    pub path: Vec<T::AssetId>,
    pub interval: u64,
    pub tranche: T::Balance,
    pub max_slippage: Permill,
    pub swap_deadline: u64,
    pub _marker: core::marker::PhantomData<T>,
  }

  impl<T: Config> Default for GenesisConfig<T> {
    fn default() -> Self {
      Self {
        path: Vec::new(),
        interval: params::DEFAULT_INTERVAL,
        tranche: params::DEFAULT_TRANCHE.saturated_into(),
        max_slippage: params::DEFAULT_MAX_SLIPPAGE,
        swap_deadline: params::DEFAULT_SWAP_DEADLINE,
        _marker: Default::default(),
      }
    }
  }

  #[pallet::genesis_build]
  impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
    fn build(&self) {
      if self.path.is_empty() {
        return;
      }
      let path: PathOf<T> = self
        .path
        .clone()
        .try_into()
        .expect("DCA path exceeds MaxPathLength");
      let engine_params = EngineParams {
        path,
        interval: self.interval.saturated_into(),
        tranche: self.tranche,
        max_slippage: self.max_slippage,
        swap_deadline: self.swap_deadline.saturated_into(),
      };
      Pallet::<T>::validate_params(&engine_params).expect("Invalid DCA genesis parameters");
      Params::<T>::put(engine_params);
      // Custody account must survive holding no native balance
      frame_system::Pallet::<T>::inc_providers(&Pallet::<T>::account_id());
    }
  }

  #[pallet::hooks]
  impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
    fn on_idle(_now: BlockNumberFor<T>, remaining_weight: Weight) -> Weight {
      Self::execute_due_ticks(remaining_weight)
    }

    #[cfg(feature = "try-runtime")]
    fn try_state(_now: BlockNumberFor<T>) -> Result<(), polkadot_sdk::sp_runtime::TryRuntimeError> {
      Self::do_try_state()
    }
  }

  #[pallet::event]
  #[pallet::generate_deposit(pub(super) fn deposit_event)]
  pub enum Event<T: Config> {
    /// Input asset moved into custody and credited to principal
    Deposited {
      who: T::AccountId,
      amount: T::Balance,
      principal: T::Balance,
    },
    PrincipalWithdrawn {
      who: T::AccountId,
      amount: T::Balance,
    },
    ConvertedWithdrawn {
      who: T::AccountId,
      amount: T::Balance,
    },
    /// Both balances reached zero and the record was removed
    DepositorClosed { who: T::AccountId },
    /// One tranche converted
    TickExecuted {
      who: T::AccountId,
      amount_in: T::Balance,
      amount_out: T::Balance,
      executed_at: MomentOf<T>,
    },
    /// Due conversion attempted by `on_idle` and rolled back
    TickFailed {
      who: T::AccountId,
      error: DispatchError,
    },
    ParamsUpdated {
      interval: MomentOf<T>,
      tranche: T::Balance,
      max_slippage: Permill,
    },
    PausedSet { paused: bool },
  }

  #[pallet::error]
  pub enum Error<T> {
    /// Amount must be greater than zero
    ZeroAmount,
    /// Requested more than the depositor holds
    InsufficientBalance,
    /// Depositor has no principal or its interval has not elapsed
    NotDue,
    /// Router reverted or paid less than the slippage-adjusted minimum
    SwapFailed,
    /// Swap attempted after its deadline
    DeadlineExceeded,
    /// Path too short, too long, or starting and ending on the same asset
    InvalidPath,
    /// Interval must be greater than zero
    ZeroInterval,
    /// No execution parameters have been set
    NotConfigured,
    /// Engine is paused
    EnginePaused,
    /// Input or output asset cannot change while balances are held
    LedgerNotEmpty,
    /// Arithmetic overflow
    Overflow,
  }

  impl<T> From<RouterError> for Error<T> {
    fn from(error: RouterError) -> Self {
      match error {
        RouterError::SwapFailed => Error::<T>::SwapFailed,
        RouterError::DeadlineExceeded => Error::<T>::DeadlineExceeded,
      }
    }
  }

  #[pallet::call]
  impl<T: Config> Pallet<T> {
    /// Moves `amount` of the input asset from the caller into custody.
    #[pallet::call_index(0)]
    #[pallet::weight(T::WeightInfo::deposit())]
    pub fn deposit(origin: OriginFor<T>, amount: T::Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_deposit(&who, amount)
    }

    /// Returns unconverted input asset to the caller. Allowed while paused.
    #[pallet::call_index(1)]
    #[pallet::weight(T::WeightInfo::withdraw_principal())]
    pub fn withdraw_principal(origin: OriginFor<T>, amount: T::Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_withdraw_principal(&who, amount)
    }

    /// Pays converted output asset to the caller. Allowed while paused.
    #[pallet::call_index(2)]
    #[pallet::weight(T::WeightInfo::withdraw_converted())]
    pub fn withdraw_converted(origin: OriginFor<T>, amount: T::Balance) -> DispatchResult {
      let who = ensure_signed(origin)?;
      Self::do_withdraw_converted(&who, amount)
    }

    /// Converts one tranche for `who` if due. Callable by any signed keeper.
    #[pallet::call_index(3)]
    #[pallet::weight(T::WeightInfo::execute_tick())]
    pub fn execute_tick(origin: OriginFor<T>, who: T::AccountId) -> DispatchResult {
      ensure_signed(origin)?;
      ensure!(!Paused::<T>::get(), Error::<T>::EnginePaused);
      Self::do_execute_tick(&who, T::Time::now()).map(|_| ())
    }

    #[pallet::call_index(4)]
    #[pallet::weight(T::WeightInfo::set_params())]
    pub fn set_params(origin: OriginFor<T>, params: EngineParamsOf<T>) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Self::validate_params(&params)?;
      if let Some(current) = Params::<T>::get() {
        let ends_changed = current.path.first() != params.path.first()
          || current.path.last() != params.path.last();
        let ledger_empty =
          TotalPrincipal::<T>::get().is_zero() && TotalConverted::<T>::get().is_zero();
        ensure!(!ends_changed || ledger_empty, Error::<T>::LedgerNotEmpty);
      }
      Self::deposit_event(Event::ParamsUpdated {
        interval: params.interval,
        tranche: params.tranche,
        max_slippage: params.max_slippage,
      });
      Params::<T>::put(params);
      Ok(())
    }

    #[pallet::call_index(5)]
    #[pallet::weight(T::WeightInfo::set_paused())]
    pub fn set_paused(origin: OriginFor<T>, paused: bool) -> DispatchResult {
      T::AdminOrigin::ensure_origin(origin)?;
      Paused::<T>::put(paused);
      Self::deposit_event(Event::PausedSet { paused });
      Ok(())
    }
  }

  impl<T: Config> Pallet<T> {
    /// Custody account holding every depositor's principal and proceeds
    pub fn account_id() -> T::AccountId {
      T::PalletId::get().into_account_truncating()
    }

    pub fn is_due(info: &DepositorInfoOf<T>, interval: MomentOf<T>, now: MomentOf<T>) -> bool {
      match info.last_execution {
        None => true,
        Some(last) => now.saturating_sub(last) >= interval,
      }
    }

    pub fn mark_executed(info: &mut DepositorInfoOf<T>, now: MomentOf<T>) {
      info.last_execution = Some(now);
    }

    /// Whether a keeper call for `who` would attempt a conversion right now.
    pub fn is_due_now(who: &T::AccountId) -> bool {
      if Paused::<T>::get() {
        return false;
      }
      let (Some(engine_params), Some(info)) = (Params::<T>::get(), Depositors::<T>::get(who))
      else {
        return false;
      };
      !info.principal.is_zero() && Self::is_due(&info, engine_params.interval, T::Time::now())
    }

    pub(crate) fn validate_params(engine_params: &EngineParamsOf<T>) -> DispatchResult {
      ensure!(
        primitives::is_valid_path(&engine_params.path),
        Error::<T>::InvalidPath
      );
      ensure!(!engine_params.interval.is_zero(), Error::<T>::ZeroInterval);
      ensure!(!engine_params.tranche.is_zero(), Error::<T>::ZeroAmount);
      Ok(())
    }

    fn configured_params() -> Result<EngineParamsOf<T>, DispatchError> {
      Params::<T>::get().ok_or_else(|| Error::<T>::NotConfigured.into())
    }

    fn path_ends(engine_params: &EngineParamsOf<T>) -> Result<(T::AssetId, T::AssetId), DispatchError> {
      match (engine_params.path.first(), engine_params.path.last()) {
        (Some(asset_in), Some(asset_out)) => Ok((*asset_in, *asset_out)),
        _ => Err(Error::<T>::InvalidPath.into()),
      }
    }

    /// Writes `info` back, or removes the record once both balances are zero.
    fn store_or_close(who: &T::AccountId, info: DepositorInfoOf<T>) {
      if info.is_empty() {
        Depositors::<T>::remove(who);
        Self::deposit_event(Event::DepositorClosed { who: who.clone() });
      } else {
        Depositors::<T>::insert(who, info);
      }
    }

    pub fn do_deposit(who: &T::AccountId, amount: T::Balance) -> DispatchResult {
      ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
      ensure!(!Paused::<T>::get(), Error::<T>::EnginePaused);
      let engine_params = Self::configured_params()?;
      let (asset_in, _) = Self::path_ends(&engine_params)?;

      let mut info = Depositors::<T>::get(who).unwrap_or_default();
      let principal = info
        .principal
        .checked_add(&amount)
        .ok_or(Error::<T>::Overflow)?;
      let total = TotalPrincipal::<T>::get()
        .checked_add(&amount)
        .ok_or(Error::<T>::Overflow)?;

      T::AssetOps::transfer(who, &Self::account_id(), asset_in, amount)?;

      info.principal = principal;
      Depositors::<T>::insert(who, info);
      TotalPrincipal::<T>::put(total);
      Self::deposit_event(Event::Deposited {
        who: who.clone(),
        amount,
        principal,
      });
      Ok(())
    }

    pub fn do_withdraw_principal(who: &T::AccountId, amount: T::Balance) -> DispatchResult {
      ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
      let engine_params = Self::configured_params()?;
      let (asset_in, _) = Self::path_ends(&engine_params)?;

      let mut info = Depositors::<T>::get(who).unwrap_or_default();
      ensure!(amount <= info.principal, Error::<T>::InsufficientBalance);

      T::AssetOps::transfer(&Self::account_id(), who, asset_in, amount)?;

      info.principal = info.principal.saturating_sub(amount);
      TotalPrincipal::<T>::mutate(|total| *total = total.saturating_sub(amount));
      Self::store_or_close(who, info);
      Self::deposit_event(Event::PrincipalWithdrawn {
        who: who.clone(),
        amount,
      });
      Ok(())
    }

    pub fn do_withdraw_converted(who: &T::AccountId, amount: T::Balance) -> DispatchResult {
      ensure!(!amount.is_zero(), Error::<T>::ZeroAmount);
      let engine_params = Self::configured_params()?;
      let (_, asset_out) = Self::path_ends(&engine_params)?;

      let mut info = Depositors::<T>::get(who).unwrap_or_default();
      ensure!(amount <= info.converted, Error::<T>::InsufficientBalance);

      T::AssetOps::transfer(&Self::account_id(), who, asset_out, amount)?;

      info.converted = info.converted.saturating_sub(amount);
      TotalConverted::<T>::mutate(|total| *total = total.saturating_sub(amount));
      Self::store_or_close(who, info);
      Self::deposit_event(Event::ConvertedWithdrawn {
        who: who.clone(),
        amount,
      });
      Ok(())
    }

    /// Converts one tranche of `who`'s principal if due at `now`.
    ///
    /// Returns `(amount_in, amount_out)`. Router effects and ledger updates
    /// commit together or not at all.
    pub fn do_execute_tick(
      who: &T::AccountId,
      now: MomentOf<T>,
    ) -> Result<(T::Balance, T::Balance), DispatchError> {
      let engine_params = Self::configured_params()?;
      let mut info = Depositors::<T>::get(who).ok_or(Error::<T>::NotDue)?;
      ensure!(
        !info.principal.is_zero() && Self::is_due(&info, engine_params.interval, now),
        Error::<T>::NotDue
      );

      let amount_in = engine_params.tranche.min(info.principal);
      let order = Self::build_order(&engine_params, amount_in, now)?;
      let custody = Self::account_id();

      let amount_out = with_storage_layer(|| -> Result<T::Balance, DispatchError> {
        let amount_out =
          RouterOf::<T>::execute(&custody, &order, T::Time::now()).map_err(Error::<T>::from)?;
        let converted = info
          .converted
          .checked_add(&amount_out)
          .ok_or(Error::<T>::Overflow)?;
        let total_converted = TotalConverted::<T>::get()
          .checked_add(&amount_out)
          .ok_or(Error::<T>::Overflow)?;

        info.principal = info.principal.saturating_sub(amount_in);
        info.converted = converted;
        Self::mark_executed(&mut info, now);
        Depositors::<T>::insert(who, info);
        TotalPrincipal::<T>::mutate(|total| *total = total.saturating_sub(amount_in));
        TotalConverted::<T>::put(total_converted);
        Ok(amount_out)
      })?;

      log::debug!(
        target: LOG_TARGET,
        "converted {:?} into {:?} for {:?}",
        amount_in,
        amount_out,
        who
      );
      Self::deposit_event(Event::TickExecuted {
        who: who.clone(),
        amount_in,
        amount_out,
        executed_at: now,
      });
      Ok((amount_in, amount_out))
    }

    fn build_order(
      engine_params: &EngineParamsOf<T>,
      amount_in: T::Balance,
      now: MomentOf<T>,
    ) -> Result<SwapOrder<T::AssetId, T::Balance, MomentOf<T>>, DispatchError> {
      let quote = RouterOf::<T>::quote(amount_in, &engine_params.path).ok_or_else(|| {
        log::warn!(target: LOG_TARGET, "router has no quote for {:?}", amount_in);
        Error::<T>::SwapFailed
      })?;
      let min_amount_out = quote.saturating_sub(engine_params.max_slippage.mul_floor(quote));
      let deadline = now.saturating_add(engine_params.swap_deadline);
      SwapOrder::new(
        engine_params.path.to_vec(),
        amount_in,
        min_amount_out,
        deadline,
      )
      .ok_or_else(|| Error::<T>::InvalidPath.into())
    }

    /// Round-robin pass over depositors within `remaining_weight`.
    pub(crate) fn execute_due_ticks(remaining_weight: Weight) -> Weight {
      let mut consumed = T::DbWeight::get().reads(2);
      if !remaining_weight.all_gte(consumed) {
        return Weight::zero();
      }
      if Paused::<T>::get() || !Params::<T>::exists() {
        return consumed;
      }

      let candidates = Self::sweep_candidates(T::MaxTicksPerBlock::get() as usize);
      consumed = consumed.saturating_add(T::DbWeight::get().reads(candidates.len() as u64 + 1));

      let now = T::Time::now();
      let tick_weight = T::WeightInfo::execute_tick();
      let not_due: DispatchError = Error::<T>::NotDue.into();
      let mut last_visited = None;

      for who in candidates {
        if !remaining_weight.all_gte(consumed.saturating_add(tick_weight)) {
          break;
        }
        match Self::do_execute_tick(&who, now) {
          Ok(_) => consumed = consumed.saturating_add(tick_weight),
          Err(error) if error == not_due => {
            consumed = consumed.saturating_add(T::DbWeight::get().reads(2));
          }
          Err(error) => {
            log::warn!(
              target: LOG_TARGET,
              "scheduled conversion for {:?} failed: {:?}",
              who,
              error
            );
            Self::deposit_event(Event::TickFailed {
              who: who.clone(),
              error,
            });
            consumed = consumed.saturating_add(tick_weight);
          }
        }
        last_visited = Some(who);
      }

      if let Some(who) = last_visited {
        SweepCursor::<T>::put(who);
        consumed = consumed.saturating_add(T::DbWeight::get().writes(1));
      }
      consumed
    }

    /// Up to `max` depositors following the cursor, wrapping to the start of the map.
    fn sweep_candidates(max: usize) -> Vec<T::AccountId> {
      let mut batch: Vec<T::AccountId> = match SweepCursor::<T>::get() {
        Some(cursor) => Depositors::<T>::iter_keys_from(Depositors::<T>::hashed_key_for(&cursor))
          .take(max)
          .collect(),
        None => Vec::new(),
      };
      for who in Depositors::<T>::iter_keys() {
        if batch.len() >= max || batch.contains(&who) {
          break;
        }
        batch.push(who);
      }
      batch
    }

    /// Ledger aggregates match the records and custody covers both.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> DispatchResult {
      let mut principal = T::Balance::zero();
      let mut converted = T::Balance::zero();
      for info in Depositors::<T>::iter_values() {
        ensure!(!info.is_empty(), "empty depositor record left in storage");
        principal = principal.saturating_add(info.principal);
        converted = converted.saturating_add(info.converted);
      }
      ensure!(
        principal == TotalPrincipal::<T>::get(),
        "TotalPrincipal does not match depositor records"
      );
      ensure!(
        converted == TotalConverted::<T>::get(),
        "TotalConverted does not match depositor records"
      );
      if let Some(engine_params) = Params::<T>::get() {
        let (asset_in, asset_out) = Self::path_ends(&engine_params)?;
        let custody = Self::account_id();
        ensure!(
          T::AssetOps::balance(&custody, asset_in) >= principal,
          "custody holds less input asset than the principal ledger"
        );
        ensure!(
          T::AssetOps::balance(&custody, asset_out) >= converted,
          "custody holds less output asset than the converted ledger"
        );
      }
      Ok(())
    }
  }
}
