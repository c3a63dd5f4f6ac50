//! Asset and pair identity
//!
//! A pool is keyed by the canonically ordered pair of its two asset ids, so
//! `(x, y)` and `(y, x)` resolve to the same pool and storage key.

use crate::error::{AmmError, AmmResult};
use crate::operation::Direction;
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Seed prefix for pool storage keys
pub const POOL_SEED: &[u8] = b"pool";

/// 32-byte asset identifier (mint address), hex encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AssetId([u8; 32]);

impl AssetId {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for AssetId {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<AssetId> for String {
    fn from(id: AssetId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for AssetId {
    type Error = hex::FromHexError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

/// Canonically ordered trading pair; `asset_a < asset_b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(AssetId, AssetId)", into = "(AssetId, AssetId)")]
pub struct PairId {
    asset_a: AssetId,
    asset_b: AssetId,
}

impl PairId {
    /// Build the canonical pair for two distinct assets in either order
    pub fn new(x: AssetId, y: AssetId) -> AmmResult<Self> {
        if x == y {
            return Err(AmmError::InvalidPair {
                asset: x.to_string(),
            });
        }
        let (asset_a, asset_b) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { asset_a, asset_b })
    }

    pub fn asset_a(&self) -> AssetId {
        self.asset_a
    }

    pub fn asset_b(&self) -> AssetId {
        self.asset_b
    }

    pub fn contains(&self, asset: AssetId) -> bool {
        self.asset_a == asset || self.asset_b == asset
    }

    /// Swap direction for a trade paying in `input`; `None` for foreign assets
    pub fn direction_from(&self, input: AssetId) -> Option<Direction> {
        if input == self.asset_a {
            Some(Direction::AToB)
        } else if input == self.asset_b {
            Some(Direction::BToA)
        } else {
            None
        }
    }

    /// Deterministic storage key: `keccak256("pool" || asset_a || asset_b)`
    pub fn storage_key(&self) -> [u8; 32] {
        let mut hasher = Keccak256::new();
        hasher.update(POOL_SEED);
        hasher.update(self.asset_a.as_bytes());
        hasher.update(self.asset_b.as_bytes());
        hasher.finalize().into()
    }
}

impl TryFrom<(AssetId, AssetId)> for PairId {
    type Error = AmmError;

    fn try_from((x, y): (AssetId, AssetId)) -> AmmResult<Self> {
        Self::new(x, y)
    }
}

impl From<PairId> for (AssetId, AssetId) {
    fn from(pair: PairId) -> Self {
        (pair.asset_a, pair.asset_b)
    }
}

impl fmt::Display for PairId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.asset_a, self.asset_b)
    }
}
