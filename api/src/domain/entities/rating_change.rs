//! Judge-reported rating change events.

use serde::{Deserialize, Serialize};

use super::participant::OnlineJudge;

/// One participant's rating movement as reported by the judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingChangeEvent {
    pub handle: String,
    pub old_rating: i32,
    pub new_rating: i32,
}

impl RatingChangeEvent {
    pub fn delta(&self) -> i32 {
        self.new_rating - self.old_rating
    }
}

/// The `update_ratings` webhook body: a batch of events for one judge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingUpdatePayload {
    pub online_judge: OnlineJudge,
    pub ratings: Vec<RatingChangeEvent>,
}
