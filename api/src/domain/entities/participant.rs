//! Participant entity and the supported judge systems.

use serde::{Deserialize, Serialize};

/// An external online-judge platform that feeds results into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnlineJudge {
    Codeforces,
    #[serde(rename = "atcoder")]
    AtCoder,
    Tlx,
}

impl OnlineJudge {
    /// The handle this participant uses on this judge, if any.
    /// Handles are per-judge; no cross-judge identity resolution happens.
    pub fn handle_of<'a>(&self, user: &'a Participant) -> Option<&'a str> {
        let handle = match self {
            OnlineJudge::Codeforces => user.codeforces_handle.as_deref(),
            OnlineJudge::AtCoder => user.atcoder_handle.as_deref(),
            OnlineJudge::Tlx => user.tlx_handle.as_deref(),
        };
        handle.filter(|h| !h.is_empty())
    }
}

impl std::fmt::Display for OnlineJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OnlineJudge::Codeforces => write!(f, "codeforces"),
            OnlineJudge::AtCoder => write!(f, "atcoder"),
            OnlineJudge::Tlx => write!(f, "tlx"),
        }
    }
}

impl std::str::FromStr for OnlineJudge {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "codeforces" => Ok(OnlineJudge::Codeforces),
            "atcoder" => Ok(OnlineJudge::AtCoder),
            "tlx" => Ok(OnlineJudge::Tlx),
            _ => Err(format!("Unknown online judge: {}", s)),
        }
    }
}

/// A contest participant with one handle per judge system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(default)]
    pub codeforces_handle: Option<String>,
    #[serde(default)]
    pub atcoder_handle: Option<String>,
    #[serde(default)]
    pub tlx_handle: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judge_roundtrips_through_str() {
        for judge in [OnlineJudge::Codeforces, OnlineJudge::AtCoder, OnlineJudge::Tlx] {
            let parsed: OnlineJudge = judge.to_string().parse().unwrap();
            assert_eq!(parsed, judge);
        }
    }

    #[test]
    fn unknown_judge_is_rejected() {
        assert!("topcoder".parse::<OnlineJudge>().is_err());
    }

    #[test]
    fn handle_of_picks_the_right_column() {
        let user = Participant {
            name: "Alice".to_string(),
            codeforces_handle: Some("alice_cf".to_string()),
            atcoder_handle: Some("alice_ac".to_string()),
            tlx_handle: None,
        };
        assert_eq!(OnlineJudge::Codeforces.handle_of(&user), Some("alice_cf"));
        assert_eq!(OnlineJudge::AtCoder.handle_of(&user), Some("alice_ac"));
        assert_eq!(OnlineJudge::Tlx.handle_of(&user), None);
    }

    #[test]
    fn empty_handle_counts_as_absent() {
        let user = Participant {
            name: "Bob".to_string(),
            codeforces_handle: Some(String::new()),
            atcoder_handle: None,
            tlx_handle: None,
        };
        assert_eq!(OnlineJudge::Codeforces.handle_of(&user), None);
    }
}
