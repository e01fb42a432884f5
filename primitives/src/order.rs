use codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

/// A single exact-input swap request handed to the router.
///
/// Built fresh for every execution and never persisted. The first path entry
/// is the asset sold and the last one the asset bought; anything between is an
/// intermediate hop.
#[derive(Clone, Debug, Decode, Encode, Eq, PartialEq, TypeInfo)]
pub struct SwapOrder<AssetId, Balance, Moment> {
  path: Vec<AssetId>,
  pub amount_in: Balance,
  pub min_amount_out: Balance,
  pub deadline: Moment,
}

impl<AssetId: PartialEq, Balance, Moment> SwapOrder<AssetId, Balance, Moment> {
  /// Returns `None` for paths with fewer than two assets or identical ends.
  pub fn new(
    path: Vec<AssetId>,
    amount_in: Balance,
    min_amount_out: Balance,
    deadline: Moment,
  ) -> Option<Self> {
    if !is_valid_path(&path) {
      return None;
    }
    Some(Self {
      path,
      amount_in,
      min_amount_out,
      deadline,
    })
  }

  pub fn path(&self) -> &[AssetId] {
    &self.path
  }
}

/// A routable path has at least two assets and does not end where it starts.
pub fn is_valid_path<AssetId: PartialEq>(path: &[AssetId]) -> bool {
  match (path.first(), path.last()) {
    (Some(first), Some(last)) => path.len() >= 2 && first != last,
    _ => false,
  }
}
