use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Asset identifier shared by the DCA engine and the swap router it talks to.
///
/// - `Native`: the chain's native token.
/// - `Local(u32)`: assets issued on this chain (stablecoins, wrapped tokens).
/// - `Foreign(u32)`: assets reserved on another chain and mapped in.
#[derive(
  Clone,
  Copy,
  Debug,
  Decode,
  DecodeWithMemTracking,
  Default,
  Encode,
  Eq,
  MaxEncodedLen,
  Ord,
  PartialEq,
  PartialOrd,
  TypeInfo,
  Serialize,
  Deserialize,
)]
pub enum AssetKind {
  #[default]
  Native,
  Local(u32),
  Foreign(u32),
}

impl From<u32> for AssetKind {
  fn from(asset_id: u32) -> Self {
    AssetKind::Local(asset_id)
  }
}

// 32-bit local ids carry their class in the top nibble:
// [ 4 bits: Type ] [ 28 bits: Index ]
//
// 0x1... -> Standard / wrapped tokens (WBNB, ETH, ...)
// 0x2... -> Stablecoins (USDT, BUSD, USDC, ...)

pub const MASK_TYPE: u32 = 0xF000_0000;
pub const MASK_INDEX: u32 = 0x0FFF_FFFF;

pub const TYPE_STD: u32 = 0x1000_0000;
pub const TYPE_STABLE: u32 = 0x2000_0000;

const fn make_id(type_mask: u32, index: u32) -> u32 {
  type_mask | (index & MASK_INDEX)
}

/// Well-known asset ids. USDT and BUSD are the pair the DCA engine is
/// deployed against by default.
pub mod well_known {
  use super::*;

  pub const WBNB: u32 = make_id(TYPE_STD, 1);
  pub const ETH: u32 = make_id(TYPE_STD, 2);

  pub const USDT: u32 = make_id(TYPE_STABLE, 1);
  pub const BUSD: u32 = make_id(TYPE_STABLE, 2);
  pub const USDC: u32 = make_id(TYPE_STABLE, 3);
}
