use crate as pallet_dca;
use frame::prelude::*;
use polkadot_sdk::{
  frame_support::{
    PalletId, construct_runtime,
    traits::{ConstU32, Get, Time},
  },
  frame_system::EnsureRoot,
  sp_runtime::{
    BuildStorage,
    traits::{BlakeTwo256, IdentityLookup},
  },
};
use primitives::{AssetKind, time, well_known};

use alloc::{collections::BTreeMap, vec, vec::Vec};
use core::cell::RefCell;

use crate::{AssetOps, SwapRouter};

type Block = polkadot_sdk::frame_system::mocking::MockBlock<Test>;
pub type AccountId = u64;
pub type Balance = u128;
pub type Moment = u64;

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const CHARLIE: AccountId = 3;
pub const KEEPER: AccountId = 9;
/// Pool account the mock router trades against
pub const LIQUIDITY: AccountId = u64::MAX;

pub const USDT: AssetKind = AssetKind::Local(well_known::USDT);
pub const BUSD: AssetKind = AssetKind::Local(well_known::BUSD);
pub const WBNB: AssetKind = AssetKind::Local(well_known::WBNB);

pub const DAY: Moment = time::MILLISECS_PER_DAY;
pub const MINUTE: Moment = time::MILLISECS_PER_MINUTE;
pub const START: Moment = 1_700_000_000_000;
pub const TRANCHE: Balance = 100;
pub const INITIAL_BALANCE: Balance = 1_000_000;

construct_runtime!(
  pub enum Test {
    System: polkadot_sdk::frame_system,
    Dca: pallet_dca,
  }
);

impl polkadot_sdk::frame_system::Config for Test {
  type BaseCallFilter = polkadot_sdk::frame_support::traits::Everything;
  type BlockWeights = ();
  type BlockLength = ();
  type DbWeight = ();
  type RuntimeOrigin = RuntimeOrigin;
  type RuntimeCall = RuntimeCall;
  type Nonce = u64;
  type Hash = polkadot_sdk::sp_core::H256;
  type Hashing = BlakeTwo256;
  type AccountId = AccountId;
  type Lookup = IdentityLookup<Self::AccountId>;
  type Block = Block;
  type RuntimeEvent = RuntimeEvent;
  type BlockHashCount = polkadot_sdk::frame_support::traits::ConstU64<250>;
  type Version = ();
  type PalletInfo = PalletInfo;
  type AccountData = ();
  type OnNewAccount = ();
  type OnKilledAccount = ();
  type SystemWeightInfo = ();
  type SS58Prefix = ();
  type OnSetCode = ();
  type MaxConsumers = ConstU32<16>;
  type RuntimeTask = ();
  type ExtensionsWeightInfo = ();
  type SingleBlockMigrations = ();
  type MultiBlockMigrator = ();
  type PreInherents = ();
  type PostInherents = ();
  type PostTransactions = ();
}

pub struct DcaPalletId;
impl Get<PalletId> for DcaPalletId {
  fn get() -> PalletId {
    PalletId(*primitives::pallet_ids::DCA_PALLET_ID)
  }
}

thread_local! {
  static NOW: RefCell<Moment> = const { RefCell::new(START) };

  static ASSET_BALANCES: RefCell<BTreeMap<(AccountId, AssetKind), Balance>> =
    RefCell::new(BTreeMap::new());

  /// Output per unit of input the router quotes
  static QUOTE_RATE: RefCell<Permill> = RefCell::new(Permill::from_percent(99));
  /// Output per unit of input the router actually pays
  static FILL_RATE: RefCell<Permill> = RefCell::new(Permill::from_percent(99));
  static ROUTER_REVERTS: RefCell<bool> = const { RefCell::new(false) };
  /// Pays below the order minimum instead of reverting
  static ROUTER_IGNORES_MIN: RefCell<bool> = const { RefCell::new(false) };
  static SWAP_CALLS: RefCell<u32> = const { RefCell::new(0) };
}

pub fn reset_mock_adapters() {
  NOW.with(|n| *n.borrow_mut() = START);
  ASSET_BALANCES.with(|b| b.borrow_mut().clear());
  QUOTE_RATE.with(|r| *r.borrow_mut() = Permill::from_percent(99));
  FILL_RATE.with(|r| *r.borrow_mut() = Permill::from_percent(99));
  ROUTER_REVERTS.with(|r| *r.borrow_mut() = false);
  ROUTER_IGNORES_MIN.with(|r| *r.borrow_mut() = false);
  SWAP_CALLS.with(|c| *c.borrow_mut() = 0);
}

pub fn now() -> Moment {
  NOW.with(|n| *n.borrow())
}

pub fn set_now(moment: Moment) {
  NOW.with(|n| *n.borrow_mut() = moment);
}

pub fn advance_time(by: Moment) {
  NOW.with(|n| {
    let mut now = n.borrow_mut();
    *now = now.saturating_add(by);
  });
}

pub fn set_asset_balance(who: AccountId, asset: AssetKind, amount: Balance) {
  ASSET_BALANCES.with(|b| {
    b.borrow_mut().insert((who, asset), amount);
  });
}

pub fn get_asset_balance(who: AccountId, asset: AssetKind) -> Balance {
  ASSET_BALANCES.with(|b| b.borrow().get(&(who, asset)).copied().unwrap_or(0))
}

pub fn set_quote_rate(rate: Permill) {
  QUOTE_RATE.with(|r| *r.borrow_mut() = rate);
}

pub fn set_fill_rate(rate: Permill) {
  FILL_RATE.with(|r| *r.borrow_mut() = rate);
}

pub fn set_router_reverts(reverts: bool) {
  ROUTER_REVERTS.with(|r| *r.borrow_mut() = reverts);
}

pub fn set_router_ignores_min(ignores: bool) {
  ROUTER_IGNORES_MIN.with(|r| *r.borrow_mut() = ignores);
}

pub fn swap_calls() -> u32 {
  SWAP_CALLS.with(|c| *c.borrow())
}

pub struct MockTime;
impl Time for MockTime {
  type Moment = Moment;

  fn now() -> Moment {
    now()
  }
}

pub struct MockAssetOps;

impl AssetOps<AccountId, AssetKind, Balance> for MockAssetOps {
  fn transfer(
    from: &AccountId,
    to: &AccountId,
    asset: AssetKind,
    amount: Balance,
  ) -> Result<(), DispatchError> {
    ASSET_BALANCES.with(|b| {
      let mut map = b.borrow_mut();
      let src = map.get(&(*from, asset)).copied().unwrap_or(0);
      if src < amount {
        return Err(DispatchError::Token(
          polkadot_sdk::sp_runtime::TokenError::FundsUnavailable,
        ));
      }
      map.insert((*from, asset), src - amount);
      let dst = map.get(&(*to, asset)).copied().unwrap_or(0);
      map.insert((*to, asset), dst + amount);
      Ok(())
    })
  }

  fn balance(who: &AccountId, asset: AssetKind) -> Balance {
    get_asset_balance(*who, asset)
  }
}

/// Constant-rate router: every hop but the last is passed through at par and
/// the final hop applies the quote (or fill) rate.
pub struct MockRouter;

impl MockRouter {
  fn amounts(amount_in: Balance, hops: usize, rate: Permill) -> Vec<Balance> {
    let mut amounts = vec![amount_in; hops];
    amounts.push(rate.mul_floor(amount_in));
    amounts
  }
}

impl SwapRouter<AccountId, AssetKind, Balance, Moment> for MockRouter {
  fn swap_exact_tokens_for_tokens(
    who: &AccountId,
    amount_in: Balance,
    amount_out_min: Balance,
    path: &[AssetKind],
    recipient: &AccountId,
    deadline: Moment,
  ) -> Result<Vec<Balance>, DispatchError> {
    SWAP_CALLS.with(|c| *c.borrow_mut() += 1);
    if ROUTER_REVERTS.with(|r| *r.borrow()) {
      return Err(DispatchError::Other("PoolReverted"));
    }
    if now() > deadline {
      return Err(DispatchError::Other("Expired"));
    }
    let (Some(asset_in), Some(asset_out)) = (path.first(), path.last()) else {
      return Err(DispatchError::Other("InvalidPath"));
    };
    let amounts = Self::amounts(amount_in, path.len() - 1, FILL_RATE.with(|r| *r.borrow()));
    let amount_out = amounts[amounts.len() - 1];
    if amount_out < amount_out_min && !ROUTER_IGNORES_MIN.with(|r| *r.borrow()) {
      return Err(DispatchError::Other("InsufficientOutputAmount"));
    }
    MockAssetOps::transfer(who, &LIQUIDITY, *asset_in, amount_in)?;
    MockAssetOps::transfer(&LIQUIDITY, recipient, *asset_out, amount_out)?;
    Ok(amounts)
  }

  fn get_amounts_out(amount_in: Balance, path: &[AssetKind]) -> Option<Vec<Balance>> {
    if path.len() < 2 {
      return None;
    }
    Some(Self::amounts(
      amount_in,
      path.len() - 1,
      QUOTE_RATE.with(|r| *r.borrow()),
    ))
  }
}

#[cfg(feature = "runtime-benchmarks")]
pub struct MockBenchmarkHelper;

#[cfg(feature = "runtime-benchmarks")]
impl crate::BenchmarkHelper<AccountId, AssetKind, Balance> for MockBenchmarkHelper {
  fn fund(who: &AccountId, asset: AssetKind, amount: Balance) -> Result<(), DispatchError> {
    set_asset_balance(*who, asset, get_asset_balance(*who, asset) + amount);
    Ok(())
  }

  fn prepare_route(path: &[AssetKind]) -> Result<(), DispatchError> {
    let asset_out = path.last().copied().ok_or(DispatchError::Other("InvalidPath"))?;
    set_asset_balance(LIQUIDITY, asset_out, Balance::MAX / 2);
    Ok(())
  }
}

impl pallet_dca::Config for Test {
  type AssetId = AssetKind;
  type Balance = Balance;
  type AssetOps = MockAssetOps;
  type Router = MockRouter;
  type Time = MockTime;
  type PalletId = DcaPalletId;
  type AdminOrigin = EnsureRoot<AccountId>;
  type MaxPathLength = ConstU32<{ primitives::params::MAX_PATH_LENGTH }>;
  type MaxTicksPerBlock = ConstU32<2>;
  type WeightInfo = ();
  #[cfg(feature = "runtime-benchmarks")]
  type BenchmarkHelper = MockBenchmarkHelper;
}

pub fn custody() -> AccountId {
  Dca::account_id()
}

fn build_ext(path: Vec<AssetKind>) -> polkadot_sdk::sp_io::TestExternalities {
  let mut t = polkadot_sdk::frame_system::GenesisConfig::<Test>::default()
    .build_storage()
    .unwrap();

  pallet_dca::GenesisConfig::<Test> {
    path,
    interval: DAY,
    tranche: TRANCHE,
    max_slippage: Permill::from_percent(1),
    swap_deadline: 20 * MINUTE,
    _marker: Default::default(),
  }
  .assimilate_storage(&mut t)
  .unwrap();

  let mut ext = polkadot_sdk::sp_io::TestExternalities::new(t);
  ext.execute_with(|| {
    System::set_block_number(1);
    reset_mock_adapters();
    for who in [ALICE, BOB, CHARLIE] {
      set_asset_balance(who, USDT, INITIAL_BALANCE);
    }
    set_asset_balance(LIQUIDITY, BUSD, 1_000_000_000_000);
  });
  ext
}

/// USDT -> BUSD engine with a daily tranche of 100 and 1% slippage.
pub fn new_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  build_ext(vec![USDT, BUSD])
}

/// Engine with no execution parameters set.
pub fn new_unconfigured_test_ext() -> polkadot_sdk::sp_io::TestExternalities {
  build_ext(Vec::new())
}
