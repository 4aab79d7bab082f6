use std::fmt;
use std::str::FromStr;

/// Ordering applied to a catalog query after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Catalog order as loaded
    Popular,
    /// Highest rating first, ties keep catalog order
    Rating,
    /// Reverse catalog order. There is no timestamp on a widget, so this is
    /// a stand-in and not a real recency ordering.
    Recent,
}

#[allow(clippy::derivable_impls)]
impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Popular
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Popular => "popular",
            SortOrder::Rating => "rating",
            SortOrder::Recent => "recent",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a sort name is not one of `popular`, `rating`, `recent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortOrder(pub String);

impl fmt::Display for UnknownSortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown sort order: {}", self.0)
    }
}

impl std::error::Error for UnknownSortOrder {}

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(SortOrder::Popular),
            "rating" => Ok(SortOrder::Rating),
            "recent" => Ok(SortOrder::Recent),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}
