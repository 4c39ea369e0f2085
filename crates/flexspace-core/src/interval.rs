//! Calendar-day interval algebra
//!
//! Every interval handled by the pricing core is a half-open range of whole
//! calendar days `[start, end)`. Bookings already follow this shape (the
//! nights model: the departure day is not charged). Rate validity windows
//! are stored inclusive of their last day and are converted with
//! [`DateRange::from_inclusive`] before any comparison, so the two kinds of
//! interval can be intersected without off-by-one adjustments.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Half-open range of calendar days `[start, end)`.
///
/// A `DateRange` is never empty: `start < end` is enforced by every
/// constructor. The derived ordering sorts by `start`, then by `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range from an inclusive start and an exclusive end.
    ///
    /// Returns `None` when `start >= end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// Create a range from an inclusive first day and an inclusive last day.
    ///
    /// Returns `None` when `last < first` or when `last` is the maximum
    /// representable date.
    pub fn from_inclusive(first: NaiveDate, last: NaiveDate) -> Option<Self> {
        if last < first {
            return None;
        }
        let end = last.succ_opt()?;
        Some(Self { start: first, end })
    }

    /// First day in the range
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day after the range
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Last day inside the range
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.start)
    }

    /// Number of days (nights) covered
    #[inline]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Check whether a single day falls inside the range
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Check whether `other` lies completely inside this range
    pub fn contains(&self, other: &DateRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check whether the two ranges share at least one day
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check whether `other` starts exactly where this range ends, or the
    /// other way around
    pub fn is_adjacent(&self, other: &DateRange) -> bool {
        self.end == other.start || other.end == self.start
    }

    /// Days shared by both ranges, if any
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        Self::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// Days of this range that are not in `other`.
    ///
    /// Yields zero, one or two ranges, ordered by start.
    pub fn subtract(&self, other: &DateRange) -> Vec<DateRange> {
        if !self.overlaps(other) {
            return vec![*self];
        }
        [
            Self::new(self.start, other.start),
            Self::new(other.end, self.end),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Iterate over every day in the range
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let days = self.days().max(0) as usize;
        self.start.iter_days().take(days)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Canonical ordering: by start day, then by end day.
pub fn sort_by_start(mut ranges: Vec<DateRange>) -> Vec<DateRange> {
    ranges.sort_unstable();
    ranges
}

/// Merge overlapping or adjacent ranges into a minimal sorted set.
pub fn coalesce(ranges: Vec<DateRange>) -> Vec<DateRange> {
    let mut merged: Vec<DateRange> = Vec::with_capacity(ranges.len());
    for range in sort_by_start(ranges) {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => {
                last.end = last.end.max(range.end);
            }
            _ => merged.push(range),
        }
    }
    merged
}

/// Days of `target` covered by none of `covering`, as sorted maximal ranges.
///
/// This is the gap detector used by the segmenter: each returned range is a
/// maximal run of uncovered days.
pub fn uncovered(target: &DateRange, covering: &[DateRange]) -> Vec<DateRange> {
    let mut remaining = vec![*target];
    for cover in coalesce(covering.to_vec()) {
        remaining = remaining
            .iter()
            .flat_map(|range| range.subtract(&cover))
            .collect();
        if remaining.is_empty() {
            break;
        }
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn r(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_and_inverted() {
        assert!(DateRange::new(d("2025-01-15"), d("2025-01-15")).is_none());
        assert!(DateRange::new(d("2025-01-20"), d("2025-01-15")).is_none());
        assert!(DateRange::new(d("2025-01-15"), d("2025-01-16")).is_some());
    }

    #[test]
    fn test_from_inclusive_covers_last_day() {
        let q1 = DateRange::from_inclusive(d("2025-01-01"), d("2025-03-31")).unwrap();
        assert_eq!(q1.end(), d("2025-04-01"));
        assert_eq!(q1.last_day(), d("2025-03-31"));
        assert_eq!(q1.days(), 90);

        let single = DateRange::from_inclusive(d("2025-02-01"), d("2025-02-01")).unwrap();
        assert_eq!(single.days(), 1);

        assert!(DateRange::from_inclusive(d("2025-02-02"), d("2025-02-01")).is_none());
    }

    #[test]
    fn test_days_counts_nights() {
        assert_eq!(r("2025-01-15", "2025-01-20").days(), 5);
        assert_eq!(r("2025-01-15", "2025-01-16").days(), 1);
    }

    #[test]
    fn test_overlaps_is_exclusive_at_end() {
        let a = r("2025-01-01", "2025-01-10");
        assert!(a.overlaps(&r("2025-01-09", "2025-01-12")));
        assert!(!a.overlaps(&r("2025-01-10", "2025-01-12")));
        assert!(a.is_adjacent(&r("2025-01-10", "2025-01-12")));
    }

    #[test]
    fn test_contains() {
        let a = r("2025-01-01", "2025-01-10");
        assert!(a.contains(&r("2025-01-01", "2025-01-10")));
        assert!(a.contains(&r("2025-01-03", "2025-01-05")));
        assert!(!a.contains(&r("2025-01-03", "2025-01-11")));
        assert!(a.contains_date(d("2025-01-09")));
        assert!(!a.contains_date(d("2025-01-10")));
    }

    #[test]
    fn test_intersect() {
        let a = r("2025-01-01", "2025-01-10");
        assert_eq!(
            a.intersect(&r("2025-01-05", "2025-01-20")),
            Some(r("2025-01-05", "2025-01-10"))
        );
        assert_eq!(a.intersect(&r("2025-01-10", "2025-01-20")), None);
    }

    #[test]
    fn test_subtract() {
        let a = r("2025-01-01", "2025-01-31");

        assert_eq!(
            a.subtract(&r("2025-01-10", "2025-01-20")),
            vec![r("2025-01-01", "2025-01-10"), r("2025-01-20", "2025-01-31")]
        );
        assert_eq!(
            a.subtract(&r("2024-12-01", "2025-01-10")),
            vec![r("2025-01-10", "2025-01-31")]
        );
        assert!(a.subtract(&r("2024-12-01", "2025-02-10")).is_empty());
        assert_eq!(a.subtract(&r("2025-03-01", "2025-03-10")), vec![a]);
    }

    #[test]
    fn test_sort_by_start() {
        let sorted = sort_by_start(vec![
            r("2025-03-01", "2025-03-05"),
            r("2025-01-01", "2025-01-10"),
            r("2025-01-01", "2025-01-05"),
        ]);
        assert_eq!(
            sorted,
            vec![
                r("2025-01-01", "2025-01-05"),
                r("2025-01-01", "2025-01-10"),
                r("2025-03-01", "2025-03-05"),
            ]
        );
    }

    #[test]
    fn test_coalesce_merges_adjacent_and_overlapping() {
        let merged = coalesce(vec![
            r("2025-01-10", "2025-01-20"),
            r("2025-01-01", "2025-01-10"),
            r("2025-01-15", "2025-01-25"),
            r("2025-02-01", "2025-02-05"),
        ]);
        assert_eq!(
            merged,
            vec![r("2025-01-01", "2025-01-25"), r("2025-02-01", "2025-02-05")]
        );
    }

    #[test]
    fn test_uncovered_lists_every_gap() {
        let booking = r("2025-03-15", "2025-07-15");
        let gaps = uncovered(
            &booking,
            &[r("2025-01-01", "2025-04-01"), r("2025-07-01", "2026-01-01")],
        );
        assert_eq!(gaps, vec![r("2025-04-01", "2025-07-01")]);

        let gaps = uncovered(&booking, &[r("2025-04-10", "2025-04-20")]);
        assert_eq!(
            gaps,
            vec![r("2025-03-15", "2025-04-10"), r("2025-04-20", "2025-07-15")]
        );

        assert_eq!(uncovered(&booking, &[]), vec![booking]);
    }

    #[test]
    fn test_iter_days() {
        let days: Vec<_> = r("2025-01-30", "2025-02-02").iter_days().collect();
        assert_eq!(days, vec![d("2025-01-30"), d("2025-01-31"), d("2025-02-01")]);
    }

    #[test]
    fn test_display() {
        assert_eq!(r("2025-01-15", "2025-01-20").to_string(), "2025-01-15..2025-01-20");
    }
}
