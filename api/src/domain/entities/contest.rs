//! Contest payload entities
//!
//! Wire types for the `add_standings` webhook action. Field names match the
//! JSON the judge bots post (`sheet_name`, `online_judge`, ...).

use chrono::NaiveDate;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use super::participant::{OnlineJudge, Participant};
use super::rating_change::RatingUpdatePayload;

/// A participant's place in a contest.
///
/// Unofficial participants carry the `"-"` sentinel instead of a rank;
/// on the wire a place is either an integer or that sentinel string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Place {
    Ranked(u32),
    Unranked,
}

impl Place {
    pub fn is_ranked(&self) -> bool {
        matches!(self, Place::Ranked(_))
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Place::Ranked(p) => write!(f, "{}", p),
            Place::Unranked => write!(f, "-"),
        }
    }
}

impl Serialize for Place {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Place::Ranked(p) => serializer.serialize_u32(*p),
            Place::Unranked => serializer.serialize_str("-"),
        }
    }
}

impl<'de> Deserialize<'de> for Place {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PlaceVisitor;

        impl<'de> Visitor<'de> for PlaceVisitor {
            type Value = Place;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a positive integer place or the string \"-\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Place, E> {
                if v >= 1 && v <= u32::MAX as u64 {
                    Ok(Place::Ranked(v as u32))
                } else {
                    Err(E::custom(format!("place out of range: {}", v)))
                }
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Place, E> {
                if v >= 1 {
                    self.visit_u64(v as u64)
                } else {
                    Err(E::custom(format!("place out of range: {}", v)))
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Place, E> {
                match v {
                    "-" => Ok(Place::Unranked),
                    other => other
                        .parse::<u32>()
                        .map(Place::Ranked)
                        .map_err(|_| E::custom(format!("invalid place: {:?}", other))),
                }
            }
        }

        deserializer.deserialize_any(PlaceVisitor)
    }
}

/// One row of a contest's standings, in the judge's own ranking order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestResult {
    pub place: Place,
    pub user: Participant,
    pub points: f64,
    #[serde(default)]
    pub penalty: f64,
    /// Classifier: 0 is the official field, higher groups are unofficial.
    #[serde(default)]
    pub user_group: u32,
}

impl ContestResult {
    /// Numeric place used by the rating formula: the judge-reported rank,
    /// or the row's 1-based position for unranked entries.
    pub fn effective_place(&self, index: usize) -> u32 {
        match self.place {
            Place::Ranked(p) => p,
            Place::Unranked => index as u32 + 1,
        }
    }
}

/// A full contest standings delivery. `sheet_name` is the idempotency key:
/// a payload whose sheet already exists is ignored for creation purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContestPayload {
    pub sheet_name: String,
    pub online_judge: OnlineJudge,
    pub contest_id: String,
    pub start_date: NaiveDate,
    pub results: Vec<ContestResult>,
    pub official_participant_count: u32,
}

/// The inbound webhook body, tagged by `action`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WebhookPayload {
    AddStandings(ContestPayload),
    UpdateRatings(RatingUpdatePayload),
}
