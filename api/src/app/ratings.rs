//! Live rating updates
//!
//! Applies judge-reported rating changes onto the cumulative table: the
//! handle cell is recolored for the new rating band and the judge's delta
//! cell gets `"old → new"` text over the delta-blend background. Unknown
//! handles are logged and skipped; one bad event never aborts the batch.

use std::sync::Arc;

use crate::app::colors;
use crate::app::roster::RosterResolver;
use crate::config::BoardConfig;
use crate::domain::entities::{OnlineJudge, RatingChangeEvent};
use crate::domain::ports::{CellValue, TabularStore};
use crate::domain::schema::BoardSchema;
use crate::error::DomainError;

/// Outcome counts for one `update_ratings` batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingUpdateSummary {
    pub applied: usize,
    pub skipped: usize,
}

pub struct RatingService<S: TabularStore> {
    store: Arc<S>,
    config: Arc<BoardConfig>,
    schema: BoardSchema,
    roster: RosterResolver<S>,
}

impl<S: TabularStore> RatingService<S> {
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

    pub async fn update_ratings(
        &self,
        judge: OnlineJudge,
        events: &[RatingChangeEvent],
    ) -> Result<RatingUpdateSummary, DomainError> {
        let table = self.config.table_name.as_str();
        let rows = self.roster.resolve_rows(judge).await?;
        let (Some(handle_col), Some(delta_col)) =
            (self.schema.handle_col(judge), self.schema.delta_col(judge))
        else {
            return Err(DomainError::Validation(format!(
                "judge not tracked by this board: {}",
                judge
            )));
        };

        let mut summary = RatingUpdateSummary {
            applied: 0,
            skipped: 0,
        };
        for event in events {
            let Some(&row) = rows.get(&event.handle) else {
                tracing::warn!(
                    judge = %judge,
                    handle = event.handle.as_str(),
                    "Rating update for a handle not on the roster, skipped"
                );
                summary.skipped += 1;
                continue;
            };

            self.store
                .set_text_style(
                    table,
                    row,
                    handle_col,
                    &colors::handle_text_style(judge, event.new_rating),
                )
                .await?;
            self.store
                .set_value(
                    table,
                    row,
                    delta_col,
                    CellValue::Text(format!("{} → {}", event.old_rating, event.new_rating)),
                )
                .await?;
            self.store
                .set_background(
                    table,
                    row,
                    delta_col,
                    colors::delta_color(event.delta(), self.config.delta_intensity),
                )
                .await?;
            summary.applied += 1;
        }

        tracing::info!(
            judge = %judge,
            applied = summary.applied,
            skipped = summary.skipped,
            "Rating update batch processed"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::Rgb;
    use crate::test_utils::seeded_board;

    fn event(handle: &str, old: i32, new: i32) -> RatingChangeEvent {
        RatingChangeEvent {
            handle: handle.to_string(),
            old_rating: old,
            new_rating: new,
        }
    }

    #[tokio::test]
    async fn known_handle_gets_style_delta_text_and_background() {
        let (store, config) = seeded_board(&[("alice", "a"), ("bob", "b")]).await;
        let service = RatingService::new(store.clone(), config.clone());

        let summary = service
            .update_ratings(OnlineJudge::Codeforces, &[event("b", 1400, 1550)])
            .await
            .unwrap();
        assert_eq!(summary, RatingUpdateSummary { applied: 1, skipped: 0 });

        let table = config.table_name.as_str();
        // bob sits at data row 5; handles col 4, codeforces delta col 7
        let style = store.text_style(table, 5, 4).unwrap();
        assert_eq!(style.foreground, "#03a89e");
        assert!(style.bold);

        assert_eq!(
            store.value_at(table, 5, 7),
            CellValue::Text("1400 → 1550".to_string())
        );
        assert_eq!(store.background(table, 5, 7), Some(Rgb(155, 255, 155)));
    }

    #[tokio::test]
    async fn unknown_handle_is_skipped_without_aborting_the_batch() {
        let (store, config) = seeded_board(&[("alice", "a")]).await;
        let service = RatingService::new(store.clone(), config.clone());

        let summary = service
            .update_ratings(
                OnlineJudge::Codeforces,
                &[event("nobody", 1000, 1100), event("a", 1200, 1150)],
            )
            .await
            .unwrap();
        assert_eq!(summary, RatingUpdateSummary { applied: 1, skipped: 1 });

        let table = config.table_name.as_str();
        assert_eq!(
            store.value_at(table, 4, 7),
            CellValue::Text("1200 → 1150".to_string())
        );
        // a rating drop tints red
        let Rgb(r, g, b) = store.background(table, 4, 7).unwrap();
        assert_eq!(r, 255);
        assert!(g < 255 && b < 255);
    }

    #[tokio::test]
    async fn zero_delta_paints_white() {
        let (store, config) = seeded_board(&[("alice", "a")]).await;
        let service = RatingService::new(store.clone(), config.clone());
        service
            .update_ratings(OnlineJudge::Codeforces, &[event("a", 1500, 1500)])
            .await
            .unwrap();
        assert_eq!(
            store.background(&config.table_name, 4, 7),
            Some(Rgb(255, 255, 255))
        );
    }
}
