use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Local, NaiveDate};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::entry::BreakfastEntry;
use crate::models::stats::{DaySlot, WeekStats, WeekSummary};
use crate::services::calendar::{shift_weeks, start_of_day, start_of_week, WeekWindow};
use crate::services::journal::day_slots;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct WeekQuery {
    /// Any day in the wanted week. Defaults to today.
    pub date: Option<NaiveDate>,
    /// Whole weeks to move from there, negative goes back.
    pub offset: Option<i64>,
}

impl WeekQuery {
    /// With an explicit date the week starts at local midnight of its Monday.
    /// Without one it starts on this Monday at the current time of day.
    pub fn resolve(&self, now: &DateTime<Local>) -> AppResult<WeekWindow> {
        let anchor = match self.date {
            Some(date) => start_of_day(&Local, date)
                .ok_or_else(|| AppError::Validation(format!("{date} has no local midnight")))?,
            None => *now,
        };
        let offset = self.offset.unwrap_or(0);

        start_of_week(&anchor)
            .and_then(|monday| shift_weeks(&monday, offset))
            .and_then(|week_start| WeekWindow::starting_at(&week_start))
            .ok_or_else(|| AppError::Validation(format!("Week offset {offset} is out of range")))
    }
}

pub async fn week_entries(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<Vec<BreakfastEntry>>> {
    let week = query.resolve(&Local::now())?;
    Ok(Json(state.journal.entries_for_week(&week).await))
}

pub async fn week_days(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<Vec<DaySlot>>> {
    let week = query.resolve(&Local::now())?;
    let slots = state.journal.week_entries_by_day(&week).await;
    Ok(Json(day_slots(slots, &week)))
}

pub async fn week_stats(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<WeekStats>> {
    let week = query.resolve(&Local::now())?;
    Ok(Json(state.journal.week_stats(&week).await))
}

pub async fn week_summary(
    State(state): State<AppState>,
    Query(query): Query<WeekQuery>,
) -> AppResult<Json<WeekSummary>> {
    let now = Local::now();
    let week = query.resolve(&now)?;
    Ok(Json(state.journal.week_summary(&week, &now).await))
}
