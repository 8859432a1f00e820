use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::Status;

/// User selections that drive the filter/sort pipeline.
#[derive(Serialize, Deserialize, Default, Clone, PartialEq, Debug)]
pub struct FilterState {
    #[serde(default)]
    pub sort: SortOption,

    #[serde(default)]
    pub platform: PlatformFilter,

    /// Lower price bound in display currency, as typed by the user.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<String>,

    /// Upper price bound in display currency, as typed by the user.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SortOption {
    /// Ascending by sale price.
    #[default]
    Price,

    /// Descending by savings percentage.
    Discount,

    /// Keeps the filtered order untouched.
    Unsorted,
}

impl From<&str> for SortOption {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "price" => SortOption::Price,
            "discount" => SortOption::Discount,
            _ => SortOption::Unsorted,
        }
    }
}

#[derive(Serialize, Deserialize, Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum PlatformFilter {
    #[default]
    All,
    Steam,
    Gog,
}

impl PlatformFilter {
    /// Store name a deal must resolve to in order to pass the filter.
    pub fn store_name(&self) -> Option<&'static str> {
        match self {
            PlatformFilter::All => None,
            PlatformFilter::Steam => Some("Steam"),
            PlatformFilter::Gog => Some("GOG"),
        }
    }
}

impl FromStr for PlatformFilter {
    type Err = Status;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(PlatformFilter::All),
            "steam" => Ok(PlatformFilter::Steam),
            "gog" => Ok(PlatformFilter::Gog),
            other => Err(Status::invalid_argument(format!(
                "unknown platform '{other}', expected one of: all, steam, gog"
            ))),
        }
    }
}

impl fmt::Display for PlatformFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.store_name().unwrap_or("All"))
    }
}
