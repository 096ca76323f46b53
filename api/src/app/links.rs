//! Judge URL builders
//!
//! Profile and standings hyperlinks per judge system, returned as tagged
//! [`Formula`] values for the store adapter to render.

use crate::domain::entities::{OnlineJudge, Place};
use crate::domain::ports::Formula;

/// Link to a participant's profile page, labelled with the handle.
pub fn profile_link(judge: OnlineJudge, handle: &str) -> Formula {
    let encoded = urlencoding::encode(handle);
    let url = match judge {
        OnlineJudge::Codeforces => format!("https://codeforces.com/profile/{}", encoded),
        OnlineJudge::AtCoder => format!("https://atcoder.jp/users/{}", encoded),
        OnlineJudge::Tlx => format!("https://tlx.toki.id/profiles/{}", encoded),
    };
    Formula::Hyperlink {
        url,
        label: handle.to_string(),
    }
}

/// Link to a contest's standings page. Codeforces links carry the
/// configured list key when one is set.
pub fn standings_link(
    judge: OnlineJudge,
    contest_id: &str,
    label: &str,
    codeforces_list_key: Option<&str>,
) -> Formula {
    let url = match judge {
        OnlineJudge::Codeforces => match codeforces_list_key {
            Some(key) => format!(
                "https://codeforces.com/contest/{}/standings?list={}",
                contest_id, key
            ),
            None => format!("https://codeforces.com/contest/{}/standings", contest_id),
        },
        OnlineJudge::AtCoder => format!("https://atcoder.jp/contests/{}/standings", contest_id),
        OnlineJudge::Tlx => format!("https://tlx.toki.id/contests/{}/scoreboard", contest_id),
    };
    Formula::Hyperlink {
        url,
        label: label.to_string(),
    }
}

/// AtCoder rank-cell link: the contest standings filtered to one
/// participant, labelled with their place.
pub fn atcoder_result_link(contest_id: &str, handle: &str, place: Place) -> Formula {
    Formula::Hyperlink {
        url: format!(
            "https://atcoder.jp/contests/{}/standings?watching={}",
            contest_id,
            urlencoding::encode(handle)
        ),
        label: place.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_of(formula: Formula) -> (String, String) {
        match formula {
            Formula::Hyperlink { url, label } => (url, label),
            other => panic!("expected hyperlink, got {:?}", other),
        }
    }

    #[test]
    fn profile_links_per_judge() {
        let (url, label) = url_of(profile_link(OnlineJudge::Codeforces, "tourist"));
        assert_eq!(url, "https://codeforces.com/profile/tourist");
        assert_eq!(label, "tourist");

        let (url, _) = url_of(profile_link(OnlineJudge::AtCoder, "chokudai"));
        assert_eq!(url, "https://atcoder.jp/users/chokudai");

        let (url, _) = url_of(profile_link(OnlineJudge::Tlx, "someone"));
        assert_eq!(url, "https://tlx.toki.id/profiles/someone");
    }

    #[test]
    fn profile_link_encodes_odd_handles() {
        let (url, label) = url_of(profile_link(OnlineJudge::Codeforces, "a b&c"));
        assert_eq!(url, "https://codeforces.com/profile/a%20b%26c");
        assert_eq!(label, "a b&c");
    }

    #[test]
    fn codeforces_standings_link_honors_list_key() {
        let (url, _) = url_of(standings_link(
            OnlineJudge::Codeforces,
            "1234",
            "Round1",
            Some("abcdef"),
        ));
        assert_eq!(
            url,
            "https://codeforces.com/contest/1234/standings?list=abcdef"
        );

        let (url, _) = url_of(standings_link(OnlineJudge::Codeforces, "1234", "Round1", None));
        assert_eq!(url, "https://codeforces.com/contest/1234/standings");
    }

    #[test]
    fn atcoder_and_tlx_standings_links() {
        let (url, _) = url_of(standings_link(OnlineJudge::AtCoder, "abc300", "ABC 300", None));
        assert_eq!(url, "https://atcoder.jp/contests/abc300/standings");

        let (url, _) = url_of(standings_link(OnlineJudge::Tlx, "troc-30", "TROC 30", None));
        assert_eq!(url, "https://tlx.toki.id/contests/troc-30/scoreboard");
    }

    #[test]
    fn atcoder_result_link_watches_the_handle() {
        let (url, label) = url_of(atcoder_result_link("abc300", "chokudai", Place::Ranked(12)));
        assert_eq!(
            url,
            "https://atcoder.jp/contests/abc300/standings?watching=chokudai"
        );
        assert_eq!(label, "12");
    }
}
