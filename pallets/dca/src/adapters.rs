//! Adapter traits for the DCA pallet
//!
//! Custody and conversion are reached through two traits so the pallet stays
//! generic over asset types and independent of the DEX a runtime deploys.
//! `RouterAdapter` is the thin, stateless wrapper every execution goes through.

use alloc::vec::Vec;
use core::marker::PhantomData;
use frame::prelude::*;
use primitives::SwapOrder;

use crate::LOG_TARGET;

/// Asset movements and balance queries for the pallet's custody account.
pub trait AssetOps<AccountId, AssetId, Balance> {
  fn transfer(
    from: &AccountId,
    to: &AccountId,
    asset: AssetId,
    amount: Balance,
  ) -> Result<(), DispatchError>;

  fn balance(who: &AccountId, asset: AssetId) -> Balance;
}

/// Exact-input surface of a Uniswap V2 style router.
pub trait SwapRouter<AccountId, AssetId, Balance, Moment> {
  /// Sells exactly `amount_in` of `path[0]` for `path[last]`, paying `recipient`.
  ///
  /// Returns the amount produced at every hop, starting with `amount_in`.
  /// Must revert if the final amount is below `amount_out_min` or the current
  /// time is past `deadline`.
  fn swap_exact_tokens_for_tokens(
    who: &AccountId,
    amount_in: Balance,
    amount_out_min: Balance,
    path: &[AssetId],
    recipient: &AccountId,
    deadline: Moment,
  ) -> Result<Vec<Balance>, DispatchError>;

  /// Amounts `swap_exact_tokens_for_tokens` would produce at every hop right now.
  fn get_amounts_out(amount_in: Balance, path: &[AssetId]) -> Option<Vec<Balance>>;
}

/// No-op router for configurations that never convert.
impl<AccountId, AssetId, Balance, Moment> SwapRouter<AccountId, AssetId, Balance, Moment> for () {
  fn swap_exact_tokens_for_tokens(
    _: &AccountId,
    _: Balance,
    _: Balance,
    _: &[AssetId],
    _: &AccountId,
    _: Moment,
  ) -> Result<Vec<Balance>, DispatchError> {
    Err(DispatchError::Other("SwapRouter not configured"))
  }

  fn get_amounts_out(_: Balance, _: &[AssetId]) -> Option<Vec<Balance>> {
    None
  }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RouterError {
  /// Router reverted, returned a malformed result, or paid less than the order minimum
  SwapFailed,
  /// Called after the order deadline; the router was not invoked
  DeadlineExceeded,
}

pub struct RouterAdapter<Router, AccountId, AssetId, Balance, Moment>(
  PhantomData<(Router, AccountId, AssetId, Balance, Moment)>,
);

impl<Router, AccountId, AssetId, Balance, Moment>
  RouterAdapter<Router, AccountId, AssetId, Balance, Moment>
where
  Router: SwapRouter<AccountId, AssetId, Balance, Moment>,
  AssetId: Copy + PartialEq,
  Balance: Copy + PartialOrd + core::fmt::Debug,
  Moment: Copy + PartialOrd,
{
  /// Final-hop output the router currently quotes for `amount_in`.
  pub fn quote(amount_in: Balance, path: &[AssetId]) -> Option<Balance> {
    let amounts = Router::get_amounts_out(amount_in, path)?;
    if amounts.len() != path.len() {
      return None;
    }
    amounts.last().copied()
  }

  /// Executes `order` on behalf of `who`, who also receives the output.
  pub fn execute(
    who: &AccountId,
    order: &SwapOrder<AssetId, Balance, Moment>,
    now: Moment,
  ) -> Result<Balance, RouterError> {
    if now > order.deadline {
      return Err(RouterError::DeadlineExceeded);
    }
    let amounts = Router::swap_exact_tokens_for_tokens(
      who,
      order.amount_in,
      order.min_amount_out,
      order.path(),
      who,
      order.deadline,
    )
    .map_err(|error| {
      log::warn!(target: LOG_TARGET, "router reverted: {:?}", error);
      RouterError::SwapFailed
    })?;
    if amounts.len() != order.path().len() {
      log::warn!(
        target: LOG_TARGET,
        "router returned {} amounts for a {}-asset path",
        amounts.len(),
        order.path().len()
      );
      return Err(RouterError::SwapFailed);
    }
    let amount_out = amounts.last().copied().ok_or(RouterError::SwapFailed)?;
    if amount_out < order.min_amount_out {
      log::warn!(
        target: LOG_TARGET,
        "router paid {:?}, below the order minimum {:?}",
        amount_out,
        order.min_amount_out
      );
      return Err(RouterError::SwapFailed);
    }
    Ok(amount_out)
  }
}
