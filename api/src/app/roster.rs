//! Roster resolution
//!
//! Builds the handle -> cumulative-table-row mapping for one judge by
//! reading the judge's handle column. The roster mutates between calls, so
//! the map is recomputed on every invocation, never cached.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::BoardConfig;
use crate::domain::entities::OnlineJudge;
use crate::domain::ports::TabularStore;
use crate::domain::schema::BoardSchema;
use crate::error::DomainError;

pub struct RosterResolver<S: TabularStore> {
    store: Arc<S>,
    config: Arc<BoardConfig>,
    schema: BoardSchema,
}

impl<S: TabularStore> RosterResolver<S> {
    pub fn new(store: Arc<S>, config: Arc<BoardConfig>) -> Self {
        let schema = BoardSchema::new(config.judges.clone());
        Self {
            store,
            config,
            schema,
        }
    }

    /// Map each handle in the judge's column to its row index. Scanned
    /// top-to-bottom; a duplicate handle overwrites the earlier row
    /// (last wins). Empty for a table with no data rows yet.
    pub async fn resolve_rows(
        &self,
        judge: OnlineJudge,
    ) -> Result<HashMap<String, u32>, DomainError> {
        let col = self.schema.handle_col(judge).ok_or_else(|| {
            DomainError::Validation(format!("judge not tracked by this board: {}", judge))
        })?;

        let last_row = self.store.last_row(&self.config.table_name).await?;
        if last_row < BoardSchema::FIRST_DATA_ROW {
            return Ok(HashMap::new());
        }

        let grid = self
            .store
            .get_range(
                &self.config.table_name,
                BoardSchema::FIRST_DATA_ROW..=last_row,
                col..=col,
            )
            .await?;

        let mut rows = HashMap::new();
        for (i, row) in grid.iter().enumerate() {
            if let Some(handle) = row.first().and_then(|c| c.as_text()) {
                if !handle.is_empty() {
                    rows.insert(handle.to_string(), BoardSchema::FIRST_DATA_ROW + i as u32);
                }
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryTabularStore;
    use crate::domain::ports::CellValue;

    async fn board_with_handles(handles: &[(u32, &str)]) -> (Arc<InMemoryTabularStore>, Arc<BoardConfig>) {
        let config = Arc::new(BoardConfig::default());
        let store = Arc::new(InMemoryTabularStore::new());
        store.create_sheet(&config.table_name).await.unwrap();
        // codeforces handle column in the default three-judge layout
        for (row, handle) in handles {
            store
                .set_value(
                    &config.table_name,
                    *row,
                    4,
                    CellValue::Text(handle.to_string()),
                )
                .await
                .unwrap();
        }
        (store, config)
    }

    #[tokio::test]
    async fn empty_table_resolves_to_empty_map() {
        let (store, config) = board_with_handles(&[]).await;
        let resolver = RosterResolver::new(store, config);
        let rows = resolver.resolve_rows(OnlineJudge::Codeforces).await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn handles_resolve_to_their_rows() {
        let (store, config) = board_with_handles(&[(4, "alice"), (5, "bob"), (7, "carol")]).await;
        let resolver = RosterResolver::new(store, config);
        let rows = resolver.resolve_rows(OnlineJudge::Codeforces).await.unwrap();
        assert_eq!(rows.get("alice"), Some(&4));
        assert_eq!(rows.get("bob"), Some(&5));
        assert_eq!(rows.get("carol"), Some(&7));
        // row 6 has no handle
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn duplicate_handles_keep_the_last_row() {
        let (store, config) = board_with_handles(&[(4, "alice"), (6, "alice")]).await;
        let resolver = RosterResolver::new(store, config);
        let rows = resolver.resolve_rows(OnlineJudge::Codeforces).await.unwrap();
        assert_eq!(rows.get("alice"), Some(&6));
    }

    #[tokio::test]
    async fn untracked_judge_is_a_validation_error() {
        let store = Arc::new(InMemoryTabularStore::new());
        let config = Arc::new(BoardConfig {
            judges: vec![OnlineJudge::Codeforces],
            ..BoardConfig::default()
        });
        store.create_sheet(&config.table_name).await.unwrap();
        let resolver = RosterResolver::new(store, config);
        let err = resolver.resolve_rows(OnlineJudge::Tlx).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
