use std::fmt;

pub type AssetId = usize;

/// Number of tradable assets on the market.
pub const ASSET_COUNT: usize = 5;

/// The five light elements traded on the market.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Asset {
    Hydrogen,
    Helium,
    Lithium,
    Beryllium,
    Boron,
}

impl Asset {
    pub const ALL: [Asset; ASSET_COUNT] = [
        Asset::Hydrogen,
        Asset::Helium,
        Asset::Lithium,
        Asset::Beryllium,
        Asset::Boron,
    ];

    /// Position of the asset in every per-asset array.
    #[inline(always)]
    pub fn index(self) -> AssetId {
        self as AssetId
    }

    pub fn ticker(self) -> &'static str {
        match self {
            Asset::Hydrogen => "H",
            Asset::Helium => "He",
            Asset::Lithium => "Li",
            Asset::Beryllium => "Be",
            Asset::Boron => "B",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

#[test]
fn test_asset_indices_match_order() {
    for (i, asset) in Asset::ALL.iter().enumerate() {
        assert_eq!(asset.index(), i);
    }
}
