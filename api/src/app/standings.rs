//! Standings writer
//!
//! Creates the per-contest sheet: a fixed 7-column header followed by one
//! row per result in the judge's ranking order, with profile links and the
//! 2-decimal rating contribution in the last column.

use std::sync::Arc;

use crate::app::links;
use crate::config::BoardConfig;
use crate::domain::entities::{ContestPayload, OnlineJudge, Place};
use crate::domain::ports::{CellValue, TabularStore};
use crate::error::DomainError;

/// Column the rating contribution lands in; the aggregator references it
/// from the cumulative table.
pub const RATING_COL: u32 = 7;
/// Row of the first result on a standings sheet.
pub const FIRST_RESULT_ROW: u32 = 2;

const COLUMN_WIDTHS: [u32; 7] = [75, 300, 150, 75, 75, 75, 75];
const HEADERS: [&str; 6] = ["Name", "Handle", "Points", "Penalty", "User Group", "Rating"];

pub struct StandingsService<S: TabularStore> {
    store: Arc<S>,
    config: Arc<BoardConfig>,
}

impl<S: TabularStore> StandingsService<S> {
    pub fn new(store: Arc<S>, config: Arc<BoardConfig>) -> Self {
        Self { store, config }
    }

    /// Create and populate the contest sheet. The dispatcher has already
    /// checked the sheet does not exist; a partial write on failure is left
    /// as-is and never retried into a duplicate sheet.
    pub async fn write_standings(&self, contest: &ContestPayload) -> Result<(), DomainError> {
        let sheet = contest.sheet_name.as_str();
        self.store.create_sheet(sheet).await?;

        for (i, width) in COLUMN_WIDTHS.iter().enumerate() {
            self.store
                .set_column_width(sheet, i as u32 + 1, *width)
                .await?;
        }

        // The rank-column header doubles as the link to the judge's own
        // standings page.
        self.store
            .set_formula(
                sheet,
                1,
                1,
                &links::standings_link(
                    contest.online_judge,
                    &contest.contest_id,
                    "Place",
                    self.config.codeforces_list_key.as_deref(),
                ),
            )
            .await?;
        for (i, header) in HEADERS.iter().enumerate() {
            self.store
                .set_value(sheet, 1, i as u32 + 2, CellValue::Text(header.to_string()))
                .await?;
        }

        let winner_points = self.config.scoring.winner_points(&contest.results);
        let participant_count = contest.official_participant_count;

        for (i, result) in contest.results.iter().enumerate() {
            let row = FIRST_RESULT_ROW + i as u32;
            let contribution = self.config.scoring.contribution(
                winner_points,
                participant_count,
                result.points,
                result.effective_place(i),
            );

            let handle = contest.online_judge.handle_of(&result.user);
            match (contest.online_judge, result.place, handle) {
                (OnlineJudge::AtCoder, Place::Ranked(_), Some(h)) => {
                    self.store
                        .set_formula(
                            sheet,
                            row,
                            1,
                            &links::atcoder_result_link(&contest.contest_id, h, result.place),
                        )
                        .await?;
                }
                (_, Place::Ranked(p), _) => {
                    self.store
                        .set_value(sheet, row, 1, CellValue::Number(p as f64))
                        .await?;
                }
                (_, Place::Unranked, _) => {
                    self.store
                        .set_value(sheet, row, 1, CellValue::Text("-".to_string()))
                        .await?;
                }
            }

            self.store
                .set_value(sheet, row, 2, CellValue::Text(result.user.name.clone()))
                .await?;
            match handle {
                Some(h) => {
                    self.store
                        .set_formula(sheet, row, 3, &links::profile_link(contest.online_judge, h))
                        .await?;
                }
                None => {
                    self.store
                        .set_value(sheet, row, 3, CellValue::Text("-".to_string()))
                        .await?;
                }
            }
            self.store
                .set_value(sheet, row, 4, CellValue::Number(result.points))
                .await?;
            self.store
                .set_value(sheet, row, 5, CellValue::Number(result.penalty))
                .await?;
            self.store
                .set_value(sheet, row, 6, CellValue::Number(result.user_group as f64))
                .await?;
            self.store
                .set_value(
                    sheet,
                    row,
                    RATING_COL,
                    CellValue::Number((contribution * 100.0).round() / 100.0),
                )
                .await?;
        }

        tracing::info!(
            sheet = sheet,
            judge = %contest.online_judge,
            results = contest.results.len(),
            "Standings sheet written"
        );
        Ok(())
    }
}
