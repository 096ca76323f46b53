//! Test fixtures
//!
//! Factory functions for payloads and pre-seeded cumulative tables with
//! sensible defaults.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::adapters::InMemoryTabularStore;
use crate::config::BoardConfig;
use crate::domain::entities::{ContestPayload, ContestResult, OnlineJudge, Participant, Place};
use crate::domain::ports::{CellValue, TabularStore};
use crate::domain::schema::BoardSchema;

/// A participant with a codeforces handle.
pub fn participant(name: &str, codeforces_handle: &str) -> Participant {
    Participant {
        name: name.to_string(),
        codeforces_handle: Some(codeforces_handle.to_string()),
        atcoder_handle: None,
        tlx_handle: None,
    }
}

pub fn contest_result(place: Place, user: Participant, points: f64, penalty: f64) -> ContestResult {
    ContestResult {
        place,
        user,
        points,
        penalty,
        user_group: 0,
    }
}

/// A contest payload with a fixed id and date. The official participant
/// count defaults to the number of results.
pub fn contest_payload(
    sheet_name: &str,
    online_judge: OnlineJudge,
    results: Vec<ContestResult>,
) -> ContestPayload {
    let official_participant_count = results.len() as u32;
    ContestPayload {
        sheet_name: sheet_name.to_string(),
        online_judge,
        contest_id: "1234".to_string(),
        start_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        results,
        official_participant_count,
    }
}

/// A store holding a cumulative table with the given `(name, codeforces
/// handle)` roster seeded from the first data row down, plus the default
/// config. A marker in the total column keeps `last_column` at the total,
/// so the next aggregation column lands right after it, as on a live board.
pub async fn seeded_board(
    roster: &[(&str, &str)],
) -> (Arc<InMemoryTabularStore>, Arc<BoardConfig>) {
    let config = Arc::new(BoardConfig::default());
    let schema = BoardSchema::new(config.judges.clone());
    let store = Arc::new(InMemoryTabularStore::new());
    let table = config.table_name.as_str();

    store.create_sheet(table).await.unwrap();
    store
        .set_value(
            table,
            BoardSchema::LINK_ROW,
            schema.total_col(),
            CellValue::Text("Total".to_string()),
        )
        .await
        .unwrap();

    let handle_col = schema.handle_col(OnlineJudge::Codeforces).unwrap();
    for (i, (name, handle)) in roster.iter().enumerate() {
        let row = BoardSchema::FIRST_DATA_ROW + i as u32;
        store
            .set_value(
                table,
                row,
                BoardSchema::PLACE_COL,
                CellValue::Number(i as f64 + 1.0),
            )
            .await
            .unwrap();
        store
            .set_value(
                table,
                row,
                BoardSchema::NAME_COL,
                CellValue::Text(name.to_string()),
            )
            .await
            .unwrap();
        store
            .set_value(table, row, handle_col, CellValue::Text(handle.to_string()))
            .await
            .unwrap();
    }

    (store, config)
}
