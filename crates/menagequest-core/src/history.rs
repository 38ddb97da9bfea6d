//! Append-only cleaning log and the reports derived from it.

use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::day_of;
use crate::room::RoomRegistry;
use crate::rules::{CYCLE_DAYS, MAX_CALENDAR_DAYS};

/// Immutable record of one completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningLogEntry {
    pub id: String,
    pub room_id: String,
    /// Display name of the room at completion time.
    pub room_name: String,
    pub date: DateTime<Utc>,
    pub points_earned: u32,
    pub is_bonus_streak_awarded: bool,
}

/// Completions in insertion order, which is chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CleaningLog {
    entries: Vec<CleaningLogEntry>,
}

/// Summary of the last seven days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    /// Distinct rooms cleaned.
    pub rooms_cleaned: usize,
    /// Total completions.
    pub total_actions: usize,
    /// Active rooms currently overdue, by display name.
    pub overdue_rooms: Vec<String>,
}

/// Number of completions on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub completions: usize,
}

impl CleaningLog {
    pub(crate) fn append(&mut self, entry: CleaningLogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[CleaningLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&CleaningLogEntry> {
        self.entries.last()
    }

    /// Up to `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &CleaningLogEntry> {
        self.entries.iter().rev().take(limit)
    }

    /// Report over the seven days before today's midnight (UTC) up to now.
    ///
    /// A room counts as overdue here when it was never cleaned or was cleaned
    /// strictly more than a full cycle before today's midnight.
    pub fn weekly_report(&self, rooms: &RoomRegistry, now: DateTime<Utc>) -> WeeklyReport {
        let today = day_of(now).and_time(chrono::NaiveTime::MIN).and_utc();
        let week_start = today - Duration::days(7);
        let cycle_start = today - Duration::days(CYCLE_DAYS);

        let recent: Vec<&CleaningLogEntry> =
            self.entries.iter().filter(|e| e.date >= week_start).collect();
        let rooms_cleaned = recent
            .iter()
            .map(|e| e.room_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let overdue_rooms = rooms
            .active()
            .filter(|room| match room.last_cleaned_date {
                Some(last) => last < cycle_start,
                None => true,
            })
            .map(|room| room.name.clone())
            .collect();

        WeeklyReport {
            rooms_cleaned,
            total_actions: recent.len(),
            overdue_rooms,
        }
    }

    /// Completions per day for the last `days` days, oldest first, today last.
    ///
    /// The window is capped at [`MAX_CALENDAR_DAYS`] and stops early at the
    /// first representable date.
    pub fn activity_calendar(&self, days: u32, now: DateTime<Utc>) -> Vec<CalendarDay> {
        let today = day_of(now);
        let window = days.min(MAX_CALENDAR_DAYS);
        let mut calendar: Vec<CalendarDay> = (0..i64::from(window))
            .map_while(|offset| today.checked_sub_signed(Duration::days(offset)))
            .map(|date| {
                let completions = self
                    .entries
                    .iter()
                    .filter(|e| day_of(e.date) == date)
                    .count();
                CalendarDay { date, completions }
            })
            .collect();
        calendar.reverse();
        calendar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, m, d, h, 0, 0).unwrap()
    }

    fn entry(room_id: &str, date: DateTime<Utc>) -> CleaningLogEntry {
        CleaningLogEntry {
            id: format!("{room_id}-{}", date.timestamp()),
            room_id: room_id.to_string(),
            room_name: room_id.to_string(),
            date,
            points_earned: 1,
            is_bonus_streak_awarded: false,
        }
    }

    #[test]
    fn recent_is_newest_first() {
        let mut log = CleaningLog::default();
        log.append(entry("salon", at(4, 1, 9)));
        log.append(entry("cave", at(4, 2, 9)));
        log.append(entry("garage", at(4, 3, 9)));
        let ids: Vec<_> = log.recent(2).map(|e| e.room_id.as_str()).collect();
        assert_eq!(ids, ["garage", "cave"]);
    }

    #[test]
    fn weekly_report_counts_distinct_rooms() {
        let now = at(4, 20, 15);
        let mut rooms = RoomRegistry::default();
        for room in ["salon", "cave"] {
            rooms.get_mut(room).unwrap().mark_cleaned(at(4, 18, 9));
        }

        let mut log = CleaningLog::default();
        log.append(entry("salon", at(4, 12, 9)));
        log.append(entry("salon", at(4, 13, 0)));
        log.append(entry("salon", at(4, 18, 9)));
        log.append(entry("cave", at(4, 18, 9)));

        let report = log.weekly_report(&rooms, now);
        assert_eq!(report.total_actions, 3);
        assert_eq!(report.rooms_cleaned, 2);
        assert_eq!(report.overdue_rooms.len(), 11);
        assert!(!report.overdue_rooms.contains(&"Salon".to_string()));
    }

    #[test]
    fn weekly_report_overdue_is_strictly_past_cycle() {
        let now = at(4, 20, 15);
        let mut rooms = RoomRegistry::new(vec![
            crate::room::Room::new("a", "A", "✨"),
            crate::room::Room::new("b", "B", "✨"),
        ]);
        rooms.get_mut("a").unwrap().mark_cleaned(at(4, 6, 0));
        rooms.get_mut("b").unwrap().mark_cleaned(at(4, 5, 23));

        let report = CleaningLog::default().weekly_report(&rooms, now);
        assert_eq!(report.overdue_rooms, ["B"]);
    }

    #[test]
    fn activity_calendar_ends_today() {
        let now = at(4, 20, 15);
        let mut log = CleaningLog::default();
        log.append(entry("salon", at(4, 18, 9)));
        log.append(entry("cave", at(4, 18, 22)));
        log.append(entry("cave", at(4, 20, 1)));
        log.append(entry("cave", at(3, 1, 1)));

        let calendar = log.activity_calendar(3, now);
        let counts: Vec<_> = calendar.iter().map(|d| (d.date.to_string(), d.completions)).collect();
        assert_eq!(
            counts,
            [
                ("2024-04-18".to_string(), 2),
                ("2024-04-19".to_string(), 0),
                ("2024-04-20".to_string(), 1)
            ]
        );
    }

    #[test]
    fn activity_calendar_window_is_capped() {
        let now = at(4, 20, 15);
        let mut log = CleaningLog::default();
        log.append(entry("cave", at(4, 20, 1)));

        let calendar = log.activity_calendar(u32::MAX, now);
        assert_eq!(calendar.len(), MAX_CALENDAR_DAYS as usize);
        assert_eq!(calendar.last().unwrap().date, day_of(now));
        assert_eq!(calendar.last().unwrap().completions, 1);
    }

    #[test]
    fn activity_calendar_stops_at_earliest_date() {
        let now = NaiveDate::MIN.and_hms_opt(12, 0, 0).unwrap().and_utc() + Duration::days(2);
        let calendar = CleaningLog::default().activity_calendar(30, now);
        assert_eq!(calendar.len(), 3);
        assert_eq!(calendar[0].date, NaiveDate::MIN);
    }
}
