/// Star rating of one widget as seen by the current user.
///
/// A user rates a widget once. The submitted stars replace the shown rating
/// when the submission completes; nothing is averaged in.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingState {
    rating: f64,
    user_rated: bool,
    pending: bool,
}

/// Stars a user can give
pub const MAX_STARS: u8 = 5;

impl RatingState {
    pub fn new(initial_rating: f64) -> Self {
        Self {
            rating: initial_rating,
            user_rated: false,
            pending: false,
        }
    }

    /// Start a submission of `stars`.
    ///
    /// Returns false without touching anything when the user already rated,
    /// a submission is still pending, or `stars` is outside `1..=MAX_STARS`.
    pub fn begin(&mut self, stars: u8) -> bool {
        if self.user_rated || self.pending || !(1..=MAX_STARS).contains(&stars) {
            return false;
        }
        self.pending = true;
        true
    }

    /// Finish the pending submission. Ignored when none is pending.
    pub fn complete(&mut self, stars: u8) {
        if !self.pending {
            return;
        }
        self.rating = f64::from(stars);
        self.user_rated = true;
        self.pending = false;
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn user_rated(&self) -> bool {
        self.user_rated
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Whether star `star` (1-based) shows as filled.
    pub fn is_star_filled(&self, star: u8) -> bool {
        self.rating >= f64::from(star)
    }
}
