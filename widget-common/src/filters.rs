use crate::SortOrder;

/// Filter state of the browse page: what the user typed and clicked.
///
/// Any change to search, tags or sort resets to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseFilters {
    pub search: String,
    pub tags: Vec<String>,
    pub sort: SortOrder,
    pub page: usize,
}

impl Default for BrowseFilters {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowseFilters {
    pub fn new() -> Self {
        Self {
            search: String::new(),
            tags: Vec::new(),
            sort: SortOrder::default(),
            page: 1,
        }
    }

    /// Select `tag` if it is not selected, deselect it otherwise.
    pub fn toggle_tag(&mut self, tag: &str) {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
        } else {
            self.tags.push(tag.to_string());
        }
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
        self.page = 1;
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.page = 1;
    }

    /// Pages are 1-based; 0 is stored as 1.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Drop tags and sort. The search text stays.
    pub fn clear(&mut self) {
        self.tags.clear();
        self.sort = SortOrder::default();
        self.page = 1;
    }

    pub fn has_active_filters(&self) -> bool {
        !self.tags.is_empty() || !self.search.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_tag_adds_then_removes() {
        let mut filters = BrowseFilters::new();
        filters.toggle_tag("email");
        filters.toggle_tag("analytics");
        assert_eq!(filters.tags, vec!["email", "analytics"]);

        filters.toggle_tag("email");
        assert_eq!(filters.tags, vec!["analytics"]);
    }

    #[test]
    fn test_toggle_tag_resets_page() {
        let mut filters = BrowseFilters::new();
        filters.set_page(4);
        filters.toggle_tag("email");
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_set_sort_resets_page() {
        let mut filters = BrowseFilters::new();
        filters.set_page(3);
        filters.set_sort(SortOrder::Rating);
        assert_eq!(filters.sort, SortOrder::Rating);
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_set_page_zero_becomes_one() {
        let mut filters = BrowseFilters::new();
        filters.set_page(0);
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn test_clear_keeps_search() {
        let mut filters = BrowseFilters::new();
        filters.set_search("mail");
        filters.toggle_tag("email");
        filters.set_sort(SortOrder::Recent);
        filters.set_page(2);

        filters.clear();
        assert_eq!(filters.search, "mail");
        assert!(filters.tags.is_empty());
        assert_eq!(filters.sort, SortOrder::Popular);
        assert_eq!(filters.page, 1);
        assert!(filters.has_active_filters());
    }

    #[test]
    fn test_has_active_filters() {
        let mut filters = BrowseFilters::new();
        assert!(!filters.has_active_filters());
        filters.set_sort(SortOrder::Rating);
        assert!(!filters.has_active_filters());
        filters.toggle_tag("email");
        assert!(filters.has_active_filters());
    }
}
