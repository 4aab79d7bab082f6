use std::collections::HashMap;

/// Which way a toggle is going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteIntent {
    Add,
    Remove,
}

/// A toggle that has started and not yet resolved.
///
/// `token` identifies this toggle among all toggles of the session; a
/// completion only lands while its token is still the one recorded for the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingToggle {
    pub intent: FavoriteIntent,
    pub token: u64,
}

/// A transition of the favorites state.
///
/// A toggle always runs `Start` followed by exactly one of `Succeeded` or
/// `Failed` for the same id, intent and token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteAction {
    Start {
        id: String,
        intent: FavoriteIntent,
        token: u64,
    },
    Succeeded {
        id: String,
        intent: FavoriteIntent,
        token: u64,
    },
    Failed {
        id: String,
        intent: FavoriteIntent,
        token: u64,
    },
    Clear,
}

/// Pure data structure for the favorites set.
///
/// Holds membership, the last added id and the token of the toggle in
/// flight for each loading id. No I/O and no timers; the async side lives
/// in the store that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesState {
    ids: Vec<String>,
    last_added: Option<String>,
    loading: HashMap<String, u64>,
    /// Never reset, so a token is not reused after `Clear`
    next_token: u64,
}

impl FavoritesState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a transition in place.
    ///
    /// Returns false when a `Succeeded` or `Failed` no longer matches the
    /// toggle in flight for its id (the store was cleared, or another toggle
    /// has started since). Such a completion changes nothing.
    pub fn apply(&mut self, action: &FavoriteAction) -> bool {
        match action {
            FavoriteAction::Start { id, token, .. } => {
                self.loading.insert(id.clone(), *token);
                self.next_token = self.next_token.max(token + 1);
                true
            }
            FavoriteAction::Succeeded { id, intent, token } => {
                if !self.is_current(id, *token) {
                    return false;
                }
                match intent {
                    FavoriteIntent::Add => {
                        if !self.is_favorite(id) {
                            self.ids.push(id.clone());
                            self.last_added = Some(id.clone());
                        }
                    }
                    FavoriteIntent::Remove => {
                        self.ids.retain(|existing| existing != id);
                        if self.last_added.as_deref() == Some(id.as_str()) {
                            self.last_added = None;
                        }
                    }
                }
                self.loading.remove(id);
                true
            }
            FavoriteAction::Failed { id, token, .. } => {
                if !self.is_current(id, *token) {
                    return false;
                }
                self.loading.remove(id);
                true
            }
            FavoriteAction::Clear => {
                self.ids.clear();
                self.last_added = None;
                self.loading.clear();
                true
            }
        }
    }

    /// Apply a transition and return the resulting state.
    pub fn reduce(mut self, action: &FavoriteAction) -> Self {
        self.apply(action);
        self
    }

    /// Start a toggle for `id`.
    ///
    /// Returns the chosen intent and its token, or `None` without touching
    /// anything when a toggle for the same id is still in flight. Membership
    /// is not changed until the matching `Succeeded` is applied.
    pub fn begin_toggle(&mut self, id: &str) -> Option<PendingToggle> {
        if self.is_loading(id) {
            return None;
        }
        let intent = if self.is_favorite(id) {
            FavoriteIntent::Remove
        } else {
            FavoriteIntent::Add
        };
        let token = self.next_token;
        self.apply(&FavoriteAction::Start {
            id: id.to_string(),
            intent,
            token,
        });
        Some(PendingToggle { intent, token })
    }

    fn is_current(&self, id: &str, token: u64) -> bool {
        self.loading.get(id) == Some(&token)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    pub fn is_loading(&self, id: &str) -> bool {
        self.loading.contains_key(id)
    }

    /// Favorited ids in the order they were added.
    pub fn favorite_ids(&self) -> &[String] {
        &self.ids
    }

    pub fn last_added(&self) -> Option<&str> {
        self.last_added.as_deref()
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }
}
