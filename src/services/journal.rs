//! Breakfast entry store and week aggregator.
//!
//! The whole collection lives as one JSON array under a single storage key.
//! Every operation reads the full array; writes serialize it back in full.
//!
//! Reads never fail: an unreadable or undecodable payload is logged and
//! treated as an empty journal. Writes log and return the error.
//!
//! There is no locking. Two writes in flight at once each read, mutate a
//! private copy and write back, so the later `set` wins.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};

use crate::error::StorageError;
use crate::models::entry::BreakfastEntry;
use crate::models::stats::{DaySlot, LabelCount, WeekStats, WeekSummary};
use crate::services::calendar::{weekday_index, WeekWindow, WEEKDAY_LABELS};
use crate::storage::KeyValueStore;

pub const STORAGE_KEY: &str = "@breakfast_entries";
pub const TOP_ITEMS_LIMIT: usize = 5;

/// How `primary_label` values are grouped for "most eaten" counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelGrouping {
    /// Labels are compared as stored: "Eggs" and "eggs" are two groups.
    #[default]
    Exact,
    /// Trimmed and lowercased before grouping.
    Normalized,
}

impl LabelGrouping {
    fn group_key(self, label: &str) -> Option<String> {
        let key = match self {
            LabelGrouping::Exact => label.to_string(),
            LabelGrouping::Normalized => label.trim().to_lowercase(),
        };
        (!key.is_empty()).then_some(key)
    }
}

#[derive(Debug, Clone)]
pub struct JournalOptions {
    pub storage_key: String,
    pub label_grouping: LabelGrouping,
    pub top_items_limit: usize,
}

impl Default for JournalOptions {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            label_grouping: LabelGrouping::Exact,
            top_items_limit: TOP_ITEMS_LIMIT,
        }
    }
}

#[derive(Clone)]
pub struct Journal {
    store: Arc<dyn KeyValueStore>,
    options: JournalOptions,
}

impl Journal {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_options(store, JournalOptions::default())
    }

    pub fn with_options(store: Arc<dyn KeyValueStore>, options: JournalOptions) -> Self {
        Self { store, options }
    }

    async fn load(&self) -> Result<Vec<BreakfastEntry>, StorageError> {
        match self.store.get(&self.options.storage_key).await? {
            Some(raw) if !raw.is_empty() => Ok(serde_json::from_str(&raw)?),
            _ => Ok(Vec::new()),
        }
    }

    async fn persist(&self, entries: &[BreakfastEntry]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(entries)?;
        self.store.set(&self.options.storage_key, &payload).await
    }

    // ── CRUD ─────────────────────────────────────────────────────────────

    /// Entries in storage (append) order.
    pub async fn all_entries(&self) -> Vec<BreakfastEntry> {
        match self.load().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    key = %self.options.storage_key,
                    "Failed to read breakfast entries, treating journal as empty"
                );
                Vec::new()
            }
        }
    }

    /// Appends `entry`. An `id` already present is not rejected: the
    /// collection then holds two rows with that id.
    pub async fn save_entry(&self, entry: BreakfastEntry) -> Result<(), StorageError> {
        let mut entries = self.all_entries().await;
        if entries.iter().any(|e| e.id == entry.id) {
            tracing::warn!(entry_id = %entry.id, "Saving entry with an existing id, appending duplicate");
        }

        let entry_id = entry.id.clone();
        entries.push(entry);
        self.persist(&entries).await.map_err(|e| {
            tracing::error!(error = %e, entry_id = %entry_id, "Failed to save breakfast entry");
            e
        })?;

        tracing::debug!(entry_id = %entry_id, total = entries.len(), "Breakfast entry saved");
        Ok(())
    }

    pub async fn entry_by_id(&self, id: &str) -> Option<BreakfastEntry> {
        self.all_entries().await.into_iter().find(|e| e.id == id)
    }

    /// Replaces the first entry with the same `id`, in place. Unknown ids are
    /// ignored and nothing is written.
    pub async fn update_entry(&self, entry: BreakfastEntry) -> Result<(), StorageError> {
        let mut entries = self.all_entries().await;
        let entry_id = entry.id.clone();

        let Some(slot) = entries.iter_mut().find(|e| e.id == entry_id) else {
            tracing::debug!(entry_id = %entry_id, "Update for unknown entry ignored");
            return Ok(());
        };
        *slot = entry;

        self.persist(&entries).await.map_err(|e| {
            tracing::error!(error = %e, entry_id = %entry_id, "Failed to update breakfast entry");
            e
        })
    }

    /// Removes every entry with this `id` and writes the rest back.
    pub async fn delete_entry(&self, id: &str) -> Result<(), StorageError> {
        let mut entries = self.all_entries().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);

        self.persist(&entries).await.map_err(|e| {
            tracing::error!(error = %e, entry_id = %id, "Failed to delete breakfast entry");
            e
        })?;

        tracing::debug!(entry_id = %id, removed = before - entries.len(), "Breakfast entry deleted");
        Ok(())
    }

    /// Drops the stored collection entirely.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store
            .remove(&self.options.storage_key)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to clear breakfast journal");
                e
            })
    }

    // ── Week queries ─────────────────────────────────────────────────────

    pub async fn entries_for_week(&self, week: &WeekWindow) -> Vec<BreakfastEntry> {
        entries_in_week(self.all_entries().await, week)
    }

    /// Seven slots, Monday first, each holding the latest entry of that day.
    pub async fn week_entries_by_day(&self, week: &WeekWindow) -> [Option<BreakfastEntry>; 7] {
        let entries = self.entries_for_week(week).await;
        latest_per_day(&entries, week)
    }

    pub async fn latest_entry_for_date(&self, date_key: &str) -> Option<BreakfastEntry> {
        let entries = self.all_entries().await;
        latest_of(entries.iter().filter(|e| e.date_key == date_key)).cloned()
    }

    pub async fn week_stats(&self, week: &WeekWindow) -> WeekStats {
        let entries = self.entries_for_week(week).await;
        compute_week_stats(
            &entries,
            self.options.label_grouping,
            self.options.top_items_limit,
        )
    }

    /// Slots and stats from a single read of the collection. `today_index`
    /// is set only when `now` falls inside `week`.
    pub async fn week_summary<Tz: TimeZone>(
        &self,
        week: &WeekWindow,
        now: &DateTime<Tz>,
    ) -> WeekSummary {
        let entries = self.entries_for_week(week).await;
        let days = day_slots(latest_per_day(&entries, week), week);

        WeekSummary {
            week_start: week.first_day_key().to_string(),
            week_end: week.last_day_key().to_string(),
            today_index: week
                .contains(now.timestamp_millis())
                .then(|| weekday_index(now)),
            days,
            stats: compute_week_stats(
                &entries,
                self.options.label_grouping,
                self.options.top_items_limit,
            ),
        }
    }
}

fn entries_in_week(entries: Vec<BreakfastEntry>, week: &WeekWindow) -> Vec<BreakfastEntry> {
    entries
        .into_iter()
        .filter(|e| week.contains(e.timestamp))
        .collect()
}

/// Greatest `timestamp` wins; on equal timestamps the one seen first stays.
pub fn latest_of<'a, I>(entries: I) -> Option<&'a BreakfastEntry>
where
    I: IntoIterator<Item = &'a BreakfastEntry>,
{
    entries.into_iter().fold(None, |best, entry| match best {
        Some(current) if current.timestamp >= entry.timestamp => Some(current),
        _ => Some(entry),
    })
}

pub fn latest_per_day(entries: &[BreakfastEntry], week: &WeekWindow) -> [Option<BreakfastEntry>; 7] {
    std::array::from_fn(|i| {
        latest_of(entries.iter().filter(|e| e.date_key == week.day_keys[i])).cloned()
    })
}

/// Labels each of the seven slots with its weekday and date key.
pub fn day_slots(slots: [Option<BreakfastEntry>; 7], week: &WeekWindow) -> Vec<DaySlot> {
    slots
        .into_iter()
        .zip(WEEKDAY_LABELS)
        .zip(week.day_keys.iter())
        .map(|((entry, weekday), date_key)| DaySlot {
            weekday,
            date_key: date_key.clone(),
            entry,
        })
        .collect()
}

pub fn compute_week_stats(
    entries: &[BreakfastEntry],
    grouping: LabelGrouping,
    top_items_limit: usize,
) -> WeekStats {
    let total_breakfasts = entries.len();
    let average_rating = if total_breakfasts > 0 {
        entries.iter().map(|e| e.rating as f64).sum::<f64>() / total_breakfasts as f64
    } else {
        0.0
    };

    // Groups stay in first-encounter order so the stable sort below breaks
    // count ties by that order.
    let mut groups: Vec<LabelCount> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for label in entries.iter().filter_map(|e| e.primary_label.as_deref()) {
        let Some(key) = grouping.group_key(label) else {
            continue;
        };
        match positions.get(&key) {
            Some(&pos) => groups[pos].count += 1,
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(LabelCount { label: key, count: 1 });
            }
        }
    }
    groups.sort_by(|a, b| b.count.cmp(&a.count));
    groups.truncate(top_items_limit);

    WeekStats {
        total_breakfasts,
        average_rating,
        top_repeated_items: groups,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::calendar::format_date_key;
    use crate::storage::MemoryStore;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, d, h, min, 0).unwrap()
    }

    fn entry(id: &str, when: DateTime<Utc>, rating: i32, label: Option<&str>) -> BreakfastEntry {
        BreakfastEntry {
            id: id.to_string(),
            timestamp: when.timestamp_millis(),
            date_key: format_date_key(&when),
            photo_uri: None,
            rating,
            notes: None,
            primary_label: label.map(str::to_string),
        }
    }

    fn journal() -> (Journal, MemoryStore) {
        let store = MemoryStore::new();
        (Journal::new(Arc::new(store.clone())), store)
    }

    // Week of Monday 2026-02-09
    fn week() -> WeekWindow {
        WeekWindow::starting_at(&at(9, 0, 0)).unwrap()
    }

    // ── CRUD ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_then_find_by_id() {
        let (journal, _) = journal();
        let mut saved = entry("a", at(10, 8, 0), 4, Some("eggs"));
        saved.photo_uri = Some("file:///a.jpg".into());
        saved.notes = Some("runny yolks".into());

        journal.save_entry(saved.clone()).await.unwrap();
        assert_eq!(journal.entry_by_id("a").await, Some(saved));
        assert_eq!(journal.entry_by_id("missing").await, None);
    }

    #[tokio::test]
    async fn test_all_entries_keeps_append_order() {
        let (journal, _) = journal();
        journal.save_entry(entry("late", at(12, 8, 0), 3, None)).await.unwrap();
        journal.save_entry(entry("early", at(10, 8, 0), 3, None)).await.unwrap();

        let ids: Vec<String> = journal.all_entries().await.into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["late", "early"]);
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_payload_untouched() {
        let (journal, store) = journal();
        journal.save_entry(entry("a", at(10, 8, 0), 4, None)).await.unwrap();
        let before = store.raw(STORAGE_KEY).await;

        journal.update_entry(entry("ghost", at(11, 8, 0), 1, None)).await.unwrap();
        assert_eq!(store.raw(STORAGE_KEY).await, before);
    }

    #[tokio::test]
    async fn test_update_unknown_id_does_not_write() {
        let (journal, store) = journal();
        store.set_fail_writes(true);
        // Nothing to replace, so the failing store is never touched
        assert!(journal.update_entry(entry("ghost", at(11, 8, 0), 1, None)).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_replaces_in_place() {
        let (journal, _) = journal();
        journal.save_entry(entry("a", at(10, 8, 0), 2, None)).await.unwrap();
        journal.save_entry(entry("b", at(11, 8, 0), 3, None)).await.unwrap();

        let mut changed = entry("a", at(10, 8, 0), 5, Some("toast"));
        changed.notes = Some("second look".into());
        journal.update_entry(changed.clone()).await.unwrap();

        let all = journal.all_entries().await;
        assert_eq!(all[0], changed);
        assert_eq!(all[1].id, "b");
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let (journal, _) = journal();
        journal.save_entry(entry("a", at(10, 8, 0), 4, None)).await.unwrap();
        journal.delete_entry("nope").await.unwrap();
        assert_eq!(journal.all_entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_twice_same_as_once() {
        let (journal, store) = journal();
        journal.save_entry(entry("a", at(10, 8, 0), 4, None)).await.unwrap();
        journal.save_entry(entry("b", at(11, 8, 0), 4, None)).await.unwrap();

        journal.delete_entry("a").await.unwrap();
        let once = store.raw(STORAGE_KEY).await;
        journal.delete_entry("a").await.unwrap();
        assert_eq!(store.raw(STORAGE_KEY).await, once);
        assert_eq!(journal.all_entries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_save_duplicate_id_appends() {
        let (journal, _) = journal();
        journal.save_entry(entry("a", at(10, 8, 0), 1, None)).await.unwrap();
        journal.save_entry(entry("a", at(11, 8, 0), 5, None)).await.unwrap();

        assert_eq!(journal.all_entries().await.len(), 2);
        // Lookup returns the first row
        assert_eq!(journal.entry_by_id("a").await.unwrap().rating, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_all_duplicates() {
        let (journal, _) = journal();
        journal.save_entry(entry("a", at(10, 8, 0), 1, None)).await.unwrap();
        journal.save_entry(entry("b", at(10, 9, 0), 2, None)).await.unwrap();
        journal.save_entry(entry("a", at(11, 8, 0), 5, None)).await.unwrap();

        journal.delete_entry("a").await.unwrap();
        let all = journal.all_entries().await;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "b");
    }

    #[tokio::test]
    async fn test_clear() {
        let (journal, store) = journal();
        journal.save_entry(entry("a", at(10, 8, 0), 4, None)).await.unwrap();
        journal.clear().await.unwrap();
        assert_eq!(store.raw(STORAGE_KEY).await, None);
        assert!(journal.all_entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let store = MemoryStore::new();
        let journal = Journal::with_options(
            Arc::new(store.clone()),
            JournalOptions {
                storage_key: "@other".into(),
                ..JournalOptions::default()
            },
        );
        journal.save_entry(entry("a", at(10, 8, 0), 4, None)).await.unwrap();
        assert!(store.raw("@other").await.is_some());
        assert_eq!(store.raw(STORAGE_KEY).await, None);
    }

    // ── failure handling ─────────────────────────────────────────────────

    #[tokio::test]
    async fn test_read_failure_degrades_to_empty() {
        let (journal, store) = journal();
        journal.save_entry(entry("a", at(10, 8, 0), 4, Some("eggs"))).await.unwrap();
        store.set_fail_reads(true);

        assert!(journal.all_entries().await.is_empty());
        assert_eq!(journal.entry_by_id("a").await, None);
        assert_eq!(journal.latest_entry_for_date("2026-02-10").await, None);
        assert_eq!(journal.week_stats(&week()).await.total_breakfasts, 0);
        assert!(journal.week_entries_by_day(&week()).await.iter().all(Option::is_none));
    }

    #[tokio::test]
    async fn test_corrupt_payload_degrades_to_empty() {
        let (journal, store) = journal();
        store.set(STORAGE_KEY, "{not json").await.unwrap();
        assert!(journal.all_entries().await.is_empty());

        store.set(STORAGE_KEY, "").await.unwrap();
        assert!(journal.all_entries().await.is_empty());
    }

    #[tokio::test]
    async fn test_write_failures_propagate() {
        let (journal, store) = journal();
        journal.save_entry(entry("a", at(10, 8, 0), 4, None)).await.unwrap();
        store.set_fail_writes(true);

        assert!(journal.save_entry(entry("b", at(11, 8, 0), 4, None)).await.is_err());
        assert!(journal.update_entry(entry("a", at(10, 8, 0), 1, None)).await.is_err());
        assert!(journal.delete_entry("a").await.is_err());
        assert!(journal.clear().await.is_err());

        // Nothing changed underneath
        assert_eq!(journal.all_entries().await, vec![entry("a", at(10, 8, 0), 4, None)]);
    }

    #[tokio::test]
    async fn test_save_over_corrupt_payload_replaces_it() {
        let (journal, store) = journal();
        store.set(STORAGE_KEY, "garbage").await.unwrap();

        journal.save_entry(entry("a", at(10, 8, 0), 4, None)).await.unwrap();
        assert_eq!(journal.all_entries().await.len(), 1);
    }

    // ── week queries ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_week_interval_is_half_open() {
        let (journal, _) = journal();
        journal.save_entry(entry("start", at(9, 0, 0), 3, None)).await.unwrap();
        journal.save_entry(entry("end", at(16, 0, 0), 3, None)).await.unwrap();
        journal.save_entry(entry("before", at(8, 23, 59), 3, None)).await.unwrap();

        let ids: Vec<String> = journal
            .entries_for_week(&week())
            .await
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["start"]);
    }

    #[tokio::test]
    async fn test_latest_wins_for_date_and_slot() {
        let (journal, _) = journal();
        journal.save_entry(entry("later", at(11, 9, 0), 5, None)).await.unwrap();
        journal.save_entry(entry("earlier", at(11, 7, 0), 2, None)).await.unwrap();

        let latest = journal.latest_entry_for_date("2026-02-11").await.unwrap();
        assert_eq!(latest.id, "later");

        let slots = journal.week_entries_by_day(&week()).await;
        assert_eq!(slots[2].as_ref().map(|e| e.id.as_str()), Some("later"));
    }

    #[tokio::test]
    async fn test_latest_for_date_outside_any_week() {
        let (journal, _) = journal();
        journal.save_entry(entry("old", Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(), 3, None))
            .await
            .unwrap();
        assert_eq!(
            journal.latest_entry_for_date("2024-06-01").await.map(|e| e.id),
            Some("old".to_string())
        );
        assert_eq!(journal.latest_entry_for_date("2024-06-02").await, None);
    }

    #[test]
    fn test_latest_tie_keeps_first_stored() {
        let first = entry("first", at(10, 8, 0), 1, None);
        let second = entry("second", at(10, 8, 0), 5, None);
        let entries = [first, second];
        assert_eq!(latest_of(entries.iter()).unwrap().id, "first");
        assert!(latest_of(std::iter::empty::<&BreakfastEntry>()).is_none());
    }

    #[tokio::test]
    async fn test_weekly_scenario() {
        let (journal, _) = journal();
        journal.save_entry(entry("mon", at(9, 8, 0), 4, Some("eggs"))).await.unwrap();
        journal.save_entry(entry("wed-early", at(11, 7, 30), 3, Some("toast"))).await.unwrap();
        journal.save_entry(entry("wed-late", at(11, 9, 0), 5, Some("eggs"))).await.unwrap();
        journal.save_entry(entry("fri", at(13, 8, 0), 2, None)).await.unwrap();
        // Next week, must not leak in
        journal.save_entry(entry("next-mon", at(16, 8, 0), 1, Some("eggs"))).await.unwrap();

        let slots = journal.week_entries_by_day(&week()).await;
        let shape: Vec<Option<(String, i32)>> = slots
            .iter()
            .map(|s| s.as_ref().map(|e| (e.id.clone(), e.rating)))
            .collect();
        assert_eq!(
            shape,
            vec![
                Some(("mon".into(), 4)),
                None,
                Some(("wed-late".into(), 5)),
                None,
                Some(("fri".into(), 2)),
                None,
                None,
            ]
        );

        let stats = journal.week_stats(&week()).await;
        assert_eq!(stats.total_breakfasts, 4);
        assert!((stats.average_rating - 3.5).abs() < f64::EPSILON);
        assert_eq!(
            stats.top_repeated_items,
            vec![
                LabelCount { label: "eggs".into(), count: 2 },
                LabelCount { label: "toast".into(), count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_week_summary() {
        let (journal, _) = journal();
        journal.save_entry(entry("sun", at(15, 10, 0), 4, Some("waffles"))).await.unwrap();

        let summary = journal.week_summary(&week(), &at(20, 12, 0)).await;
        assert_eq!(summary.week_start, "2026-02-09");
        assert_eq!(summary.week_end, "2026-02-15");
        assert_eq!(summary.days.len(), 7);
        assert_eq!(summary.days[0].weekday, "MON");
        assert_eq!(summary.days[6].weekday, "SUN");
        assert_eq!(summary.days[6].date_key, "2026-02-15");
        assert_eq!(summary.days[6].entry.as_ref().map(|e| e.id.as_str()), Some("sun"));
        assert_eq!(summary.stats.total_breakfasts, 1);
        assert_eq!(summary.today_index, None);

        let wednesday = journal.week_summary(&week(), &at(11, 12, 0)).await;
        assert_eq!(wednesday.today_index, Some(2));
        assert_eq!(wednesday.days, summary.days);
    }

    // ── statistics ───────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_stats_on_empty_week() {
        let (journal, _) = journal();
        let stats = journal.week_stats(&week()).await;
        assert_eq!(stats.total_breakfasts, 0);
        assert_eq!(stats.average_rating, 0.0);
        assert!(stats.top_repeated_items.is_empty());
    }

    #[test]
    fn test_top_items_ranking() {
        let labels = ["toast", "oatmeal", "eggs", "eggs", "oatmeal", "eggs"];
        let entries: Vec<BreakfastEntry> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| entry(&format!("e{i}"), at(10, 6 + i as u32, 0), 3, Some(*l)))
            .collect();

        let stats = compute_week_stats(&entries, LabelGrouping::Exact, TOP_ITEMS_LIMIT);
        let ranking: Vec<(&str, usize)> = stats
            .top_repeated_items
            .iter()
            .map(|item| (item.label.as_str(), item.count))
            .collect();
        assert_eq!(ranking, vec![("eggs", 3), ("oatmeal", 2), ("toast", 1)]);
    }

    #[test]
    fn test_top_items_capped_and_ties_keep_encounter_order() {
        let labels = ["g", "f", "e", "d", "c", "b", "a", "a"];
        let entries: Vec<BreakfastEntry> = labels
            .iter()
            .enumerate()
            .map(|(i, l)| entry(&format!("e{i}"), at(10, 6 + i as u32, 0), 3, Some(*l)))
            .collect();

        let stats = compute_week_stats(&entries, LabelGrouping::Exact, TOP_ITEMS_LIMIT);
        let ranked: Vec<&str> = stats.top_repeated_items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(ranked, vec!["a", "g", "f", "e", "d"]);
    }

    #[test]
    fn test_unlabelled_entries_count_but_do_not_group() {
        let entries = vec![
            entry("a", at(10, 8, 0), 5, None),
            entry("b", at(11, 8, 0), 1, Some("")),
            entry("c", at(12, 8, 0), 3, Some("yogurt")),
        ];
        let stats = compute_week_stats(&entries, LabelGrouping::Exact, TOP_ITEMS_LIMIT);
        assert_eq!(stats.total_breakfasts, 3);
        assert!((stats.average_rating - 3.0).abs() < f64::EPSILON);
        assert_eq!(stats.top_repeated_items.len(), 1);
    }

    #[test]
    fn test_label_grouping_modes() {
        let entries = vec![
            entry("a", at(10, 8, 0), 3, Some("Eggs")),
            entry("b", at(11, 8, 0), 3, Some("eggs")),
            entry("c", at(12, 8, 0), 3, Some(" eggs ")),
        ];

        let exact = compute_week_stats(&entries, LabelGrouping::Exact, TOP_ITEMS_LIMIT);
        assert_eq!(exact.top_repeated_items.len(), 3);

        let normalized = compute_week_stats(&entries, LabelGrouping::Normalized, TOP_ITEMS_LIMIT);
        assert_eq!(
            normalized.top_repeated_items,
            vec![LabelCount { label: "eggs".into(), count: 3 }]
        );
    }
}
