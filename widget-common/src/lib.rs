mod favorites;
mod filters;
mod format;
mod rating;
mod sort_order;

pub use favorites::{FavoriteAction, FavoriteIntent, FavoritesState, PendingToggle};
pub use filters::BrowseFilters;
pub use format::{format_file_size, format_number};
pub use rating::{RatingState, MAX_STARS};
pub use sort_order::{SortOrder, UnknownSortOrder};
