//! Cumulative-table aggregation
//!
//! Appends one rating-contribution column per processed contest to the
//! cumulative leaderboard, then re-sorts the data rows by total rating and
//! renumbers the place column. Called only right after a successful
//! standings write for the same payload.

use std::sync::Arc;

use crate::app::links;
use crate::app::roster::RosterResolver;
use crate::app::standings;
use crate::config::BoardConfig;
use crate::domain::entities::ContestPayload;
use crate::domain::ports::{CellRef, CellValue, ExternalCell, Formula, TabularStore};
use crate::domain::schema::BoardSchema;
use crate::error::DomainError;

pub struct AggregationService<S: TabularStore> {
    store: Arc<S>,
    config: Arc<BoardConfig>,
    schema: BoardSchema,
    roster: RosterResolver<S>,
}

impl<S: TabularStore> AggregationService<S> {
    pub fn new(store: Arc<S>, config: Arc<BoardConfig>) -> Self {
        let schema = BoardSchema::new(config.judges.clone());
        let roster = RosterResolver::new(store.clone(), config.clone());
        Self {
            store,
            config,
            schema,
            roster,
        }
    }

    /// Wire the contest's contributions into a fresh column of the
    /// cumulative table and restore the standings order.
    pub async fn aggregate(&self, contest: &ContestPayload) -> Result<(), DomainError> {
        let table = self.config.table_name.as_str();
        let rows = self.roster.resolve_rows(contest.online_judge).await?;

        let col = self.store.last_column(table).await? + 1;

        self.store
            .set_formula(
                table,
                BoardSchema::COEFFICIENT_ROW,
                col,
                &self.coefficient_formula(col),
            )
            .await?;
        self.store
            .set_value(
                table,
                BoardSchema::DATE_ROW,
                col,
                CellValue::Date(contest.start_date),
            )
            .await?;
        self.store
            .set_formula(
                table,
                BoardSchema::LINK_ROW,
                col,
                &links::standings_link(
                    contest.online_judge,
                    &contest.contest_id,
                    &contest.sheet_name,
                    self.config.codeforces_list_key.as_deref(),
                ),
            )
            .await?;

        let mut wired = 0usize;
        for (i, result) in contest.results.iter().enumerate() {
            let Some(handle) = contest.online_judge.handle_of(&result.user) else {
                continue;
            };
            let Some(&row) = rows.get(handle) else {
                tracing::debug!(handle = handle, "Result handle not on the roster, skipped");
                continue;
            };
            let formula = Formula::WeightedReference {
                weight: CellRef {
                    row: BoardSchema::COEFFICIENT_ROW,
                    col,
                },
                value: ExternalCell {
                    sheet: contest.sheet_name.clone(),
                    cell: format!(
                        "G{}",
                        standings::FIRST_RESULT_ROW + i as u32
                    ),
                },
            };
            self.store.set_formula(table, row, col, &formula).await?;
            wired += 1;
        }

        self.resort().await?;

        tracing::info!(
            sheet = contest.sheet_name.as_str(),
            column = col,
            wired = wired,
            "Contest aggregated into the cumulative table"
        );
        Ok(())
    }

    /// Round-type classifier for the new column: matches the sheet-name
    /// cell below it against the configured keywords and picks that round
    /// type's coefficient cell.
    fn coefficient_formula(&self, col: u32) -> Formula {
        Formula::ConditionalLookup {
            subject: CellRef {
                row: BoardSchema::LINK_ROW,
                col,
            },
            branches: self
                .config
                .coefficient_rules
                .iter()
                .map(|(keyword, cell)| {
                    (
                        keyword.clone(),
                        ExternalCell {
                            sheet: self.config.config_sheet.clone(),
                            cell: cell.clone(),
                        },
                    )
                })
                .collect(),
            default: 0.0,
        }
    }

    /// Sort data rows by total rating descending, then renumber the place
    /// column top-to-bottom, leaving `-` rows untouched.
    async fn resort(&self) -> Result<(), DomainError> {
        let table = self.config.table_name.as_str();
        let last_row = self.store.last_row(table).await?;
        if last_row < BoardSchema::FIRST_DATA_ROW {
            return Ok(());
        }

        self.store
            .sort_rows(
                table,
                BoardSchema::FIRST_DATA_ROW..=last_row,
                self.schema.total_col(),
                true,
            )
            .await?;

        let places = self
            .store
            .get_range(
                table,
                BoardSchema::FIRST_DATA_ROW..=last_row,
                BoardSchema::PLACE_COL..=BoardSchema::PLACE_COL,
            )
            .await?;

        let mut current = 0u32;
        for (i, row) in places.iter().enumerate() {
            if row.first().and_then(|c| c.as_text()) == Some("-") {
                continue;
            }
            current += 1;
            self.store
                .set_value(
                    table,
                    BoardSchema::FIRST_DATA_ROW + i as u32,
                    BoardSchema::PLACE_COL,
                    CellValue::Number(current as f64),
                )
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTabularStore;
    use crate::domain::entities::{OnlineJudge, Place};
    use crate::test_utils::{contest_payload, contest_result, participant, seeded_board};

    #[tokio::test]
    async fn contest_column_carries_header_metadata() {
        let (store, config) = seeded_board(&[("alice", "a"), ("bob", "b")]).await;
        let service = AggregationService::new(store.clone(), config.clone());

        let contest = contest_payload(
            "Codeforces Round Div. 2",
            OnlineJudge::Codeforces,
            vec![contest_result(Place::Ranked(1), participant("alice", "a"), 100.0, 0.0)],
        );
        service.aggregate(&contest).await.unwrap();

        let col = config_total_col(&config) + 1;
        let coefficient = store.formula_at(&config.table_name, 1, col).unwrap();
        assert!(coefficient.contains("SEARCH(\"Div. 2\""));
        assert!(coefficient.contains(&format!("'{}'!B7", config.config_sheet)));
        assert_eq!(
            store.value_at(&config.table_name, 2, col),
            CellValue::Date(contest.start_date)
        );
        let link = store.formula_at(&config.table_name, 3, col).unwrap();
        assert!(link.contains("\"Codeforces Round Div. 2\""));
    }

    #[tokio::test]
    async fn resolved_handles_get_weighted_references() {
        let (store, config) = seeded_board(&[("alice", "a"), ("bob", "b")]).await;
        let service = AggregationService::new(store.clone(), config.clone());

        let contest = contest_payload(
            "Round1",
            OnlineJudge::Codeforces,
            vec![
                contest_result(Place::Ranked(1), participant("bob", "b"), 100.0, 0.0),
                contest_result(Place::Ranked(2), participant("ghost", "nobody"), 90.0, 0.0),
            ],
        );
        service.aggregate(&contest).await.unwrap();

        let col = config_total_col(&config) + 1;
        // bob was seeded at data row 5
        let formula = store.formula_at(&config.table_name, 5, col).unwrap();
        assert!(formula.contains("'Round1'!G2"));
        // the unknown handle wired nothing anywhere in the new column
        for row in [4u32, 6] {
            assert!(store.formula_at(&config.table_name, row, col).is_none());
        }
    }

    #[tokio::test]
    async fn rows_resort_by_total_and_places_renumber() {
        let (store, config) = seeded_board(&[("alice", "a"), ("bob", "b"), ("carol", "c")]).await;
        let table = config.table_name.as_str();
        let total = config_total_col(&config);
        // totals: bob > carol > alice
        for (row, value) in [(4, 10.0), (5, 90.0), (6, 50.0)] {
            store
                .set_value(table, row, total, CellValue::Number(value))
                .await
                .unwrap();
        }

        let service = AggregationService::new(store.clone(), config.clone());
        let contest = contest_payload("Round1", OnlineJudge::Codeforces, vec![]);
        service.aggregate(&contest).await.unwrap();

        let names: Vec<_> = (4..=6)
            .map(|row| store.value_at(table, row, 2))
            .collect();
        assert_eq!(
            names,
            vec![
                CellValue::Text("bob".to_string()),
                CellValue::Text("carol".to_string()),
                CellValue::Text("alice".to_string()),
            ]
        );
        for (row, place) in [(4u32, 1.0), (5, 2.0), (6, 3.0)] {
            assert_eq!(store.value_at(table, row, 1), CellValue::Number(place));
        }
    }

    #[tokio::test]
    async fn unranked_rows_keep_their_dash_place() {
        let (store, config) = seeded_board(&[("alice", "a"), ("guest", "g")]).await;
        let table = config.table_name.as_str();
        let total = config_total_col(&config);
        store
            .set_value(table, 5, 1, CellValue::Text("-".to_string()))
            .await
            .unwrap();
        store
            .set_value(table, 4, total, CellValue::Number(10.0))
            .await
            .unwrap();
        store
            .set_value(table, 5, total, CellValue::Number(90.0))
            .await
            .unwrap();

        let service = AggregationService::new(store.clone(), config.clone());
        let contest = contest_payload("Round1", OnlineJudge::Codeforces, vec![]);
        service.aggregate(&contest).await.unwrap();

        // guest sorted to the top but keeps the sentinel; alice is place 1
        assert_eq!(store.value_at(table, 4, 1), CellValue::Text("-".to_string()));
        assert_eq!(store.value_at(table, 4, 2), CellValue::Text("guest".to_string()));
        assert_eq!(store.value_at(table, 5, 1), CellValue::Number(1.0));
    }

    fn config_total_col(config: &Arc<BoardConfig>) -> u32 {
        BoardSchema::new(config.judges.clone()).total_col()
    }
}
