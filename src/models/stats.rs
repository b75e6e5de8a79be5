use serde::Serialize;

use crate::models::entry::BreakfastEntry;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStats {
    pub total_breakfasts: usize,
    /// 0 when the week is empty
    pub average_rating: f64,
    pub top_repeated_items: Vec<LabelCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

/// One weekday position, holding the latest entry of that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySlot {
    pub weekday: &'static str,
    pub date_key: String,
    pub entry: Option<BreakfastEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub week_start: String,
    pub week_end: String,
    /// Weekday index of today, when today falls in this week
    pub today_index: Option<usize>,
    pub days: Vec<DaySlot>,
    pub stats: WeekStats,
}
