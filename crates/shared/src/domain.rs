use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

/// Lightweight pointer into the remote catalog, in catalog arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    #[serde(rename = "url")]
    pub reference_handle: String,
}

impl IndexEntry {
    pub fn new(name: impl Into<String>, reference_handle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference_handle: reference_handle.into(),
        }
    }

    /// Trailing numeric segment of the reference handle, e.g. `.../pokemon/25/` -> 25.
    pub fn numeric_id(&self) -> Option<u32> {
        self.reference_handle
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .and_then(|segment| segment.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub category: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    #[serde(rename = "stat")]
    pub attribute: NamedResource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_female: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: ArtworkSprites,
    #[serde(default)]
    pub dream_world: ArtworkSprites,
    #[serde(default)]
    pub home: ArtworkSprites,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub front_female: Option<String>,
    #[serde(default)]
    pub front_shiny: Option<String>,
    #[serde(default)]
    pub back_default: Option<String>,
    #[serde(default)]
    pub back_shiny: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

impl Sprites {
    /// Candidate image URLs in preference order.
    pub fn candidates(&self) -> [Option<&str>; 8] {
        [
            self.front_default.as_deref(),
            self.other.official_artwork.front_default.as_deref(),
            self.other.home.front_default.as_deref(),
            self.other.dream_world.front_default.as_deref(),
            self.front_female.as_deref(),
            self.front_shiny.as_deref(),
            self.back_default.as_deref(),
            self.back_shiny.as_deref(),
        ]
    }
}

/// Full record for one catalog item as served by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub base_experience: Option<u32>,
    /// Decimetres.
    pub height: u32,
    /// Hectograms.
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<CategorySlot>,
    #[serde(default)]
    pub stats: Vec<AttributeStat>,
    #[serde(default)]
    pub sprites: Sprites,
}

impl DetailRecord {
    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats
            .iter()
            .find(|stat| stat.attribute.name == name)
            .map(|stat| stat.base_stat)
    }
}

/// Flattened, display-ready projection of a [`DetailRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub categories: Vec<String>,
    pub weight: f64,
    pub height: f64,
    pub hp: u32,
    pub experience: u32,
    pub attack: u32,
    pub defense: u32,
    pub special_attack: u32,
    pub special_defense: u32,
    pub speed: u32,
    pub record: Arc<DetailRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Image,
    Types,
    Weight,
    Height,
    Hp,
    Experience,
    Attack,
    Defense,
    SpecialAttack,
    SpecialDefense,
    Speed,
}

impl SortKey {
    pub const ALL: [SortKey; 13] = [
        SortKey::Id,
        SortKey::Name,
        SortKey::Image,
        SortKey::Types,
        SortKey::Weight,
        SortKey::Height,
        SortKey::Hp,
        SortKey::Experience,
        SortKey::Attack,
        SortKey::Defense,
        SortKey::SpecialAttack,
        SortKey::SpecialDefense,
        SortKey::Speed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Image => "image",
            SortKey::Types => "types",
            SortKey::Weight => "weight",
            SortKey::Height => "height",
            SortKey::Hp => "hp",
            SortKey::Experience => "experience",
            SortKey::Attack => "attack",
            SortKey::Defense => "defense",
            SortKey::SpecialAttack => "special_attack",
            SortKey::SpecialDefense => "special_defense",
            SortKey::Speed => "speed",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_'], "");
        let key = match normalized.as_str() {
            "id" => SortKey::Id,
            "name" => SortKey::Name,
            "image" => SortKey::Image,
            "types" | "type" | "categories" => SortKey::Types,
            "weight" => SortKey::Weight,
            "height" => SortKey::Height,
            "hp" => SortKey::Hp,
            "experience" | "exp" => SortKey::Experience,
            "attack" => SortKey::Attack,
            "defense" => SortKey::Defense,
            "specialattack" => SortKey::SpecialAttack,
            "specialdefense" => SortKey::SpecialDefense,
            "speed" => SortKey::Speed,
            _ => return Err(format!("unknown sort key '{raw}'")),
        };
        Ok(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Table,
    Grid,
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        if raw.trim().eq_ignore_ascii_case("table") {
            Ok(ViewMode::Table)
        } else if raw.trim().eq_ignore_ascii_case("grid") {
            Ok(ViewMode::Grid)
        } else {
            Err(format!("unknown view mode '{raw}'"))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    #[default]
    Ten,
    TwentyFive,
    Fifty,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Ten, PageSize::TwentyFive, PageSize::Fifty];

    pub fn get(self) -> usize {
        match self {
            PageSize::Ten => 10,
            PageSize::TwentyFive => 25,
            PageSize::Fifty => 50,
        }
    }
}

impl TryFrom<usize> for PageSize {
    type Error = String;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PageSize::ALL
            .into_iter()
            .find(|size| size.get() == value)
            .ok_or_else(|| format!("page size must be one of 10, 25, 50 (got {value})"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    LoadingIndex,
    LoadingDetails,
    Ready,
    Failed,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Ready | Phase::Failed)
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
