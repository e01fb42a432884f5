//! Ecosystem constants for the DCA engine
//!
//! Pallet identifiers and the default execution parameters used by genesis
//! presets and mock runtimes. Runtime configurations re-use these through the
//! primitives crate so the values have a single source of truth.

/// Balance type alias for consistency across the workspace
pub type Balance = u128;

/// Timestamp type (milliseconds since the Unix epoch, as `pallet_timestamp` reports it)
pub type Moment = u64;

pub mod pallet_ids {
  /// DCA pallet ID (custody account for deposited principal and converted proceeds)
  pub const DCA_PALLET_ID: &[u8; 8] = b"py/dca00";
}

pub mod time {
  use super::Moment;

  pub const MILLISECS_PER_SECOND: Moment = 1_000;
  pub const MILLISECS_PER_MINUTE: Moment = 60 * MILLISECS_PER_SECOND;
  pub const MILLISECS_PER_HOUR: Moment = 60 * MILLISECS_PER_MINUTE;
  pub const MILLISECS_PER_DAY: Moment = 24 * MILLISECS_PER_HOUR;
}

/// Default DCA execution parameters.
pub mod params {
  use super::{Balance, Moment, time};
  use sp_arithmetic::Permill;

  /// One conversion per depositor per day.
  pub const DEFAULT_INTERVAL: Moment = time::MILLISECS_PER_DAY;

  /// 100 tokens at 18 decimals per execution.
  pub const DEFAULT_TRANCHE: Balance = 100 * 1_000_000_000_000_000_000;

  /// Accepted shortfall between the router quote and the executed output (1%).
  pub const DEFAULT_MAX_SLIPPAGE: Permill = Permill::from_percent(1);

  /// Validity window added to the tick timestamp to form the swap deadline.
  pub const DEFAULT_SWAP_DEADLINE: Moment = 20 * time::MILLISECS_PER_MINUTE;

  /// Longest swap path accepted (input, up to two intermediate hops, output).
  pub const MAX_PATH_LENGTH: u32 = 4;

  /// Upper bound on keeper executions performed in a single `on_idle`.
  pub const MAX_TICKS_PER_BLOCK: u32 = 16;
}
