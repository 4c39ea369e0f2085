//! Rate selector
//!
//! Splits a booking into elementary slices at every boundary of every
//! candidate validity window. Within a slice the set of valid records is
//! constant, so each rate type has exactly one winner per slice.
//!
//! Overlap tie-break: the record with the later `effective_date` wins; equal
//! effective dates fall back to the greater `rate_id`.

use chrono::NaiveDate;
use flexspace_core::{
    interval::DateRange,
    models::{OverlapResolution, RateRecord, RateType},
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Winning record of one rate type over a slice
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    pub rate: &'a RateRecord,
    /// Other records of the same type valid on the slice, by `rate_id`
    pub superseded: Vec<&'a RateRecord>,
}

/// Elementary sub-range of the booking
#[derive(Debug, Clone)]
pub struct Slice<'a> {
    pub span: DateRange,
    pub by_type: BTreeMap<RateType, Resolved<'a>>,
}

impl<'a> Slice<'a> {
    /// Rate types with a valid record on this slice, finest first
    pub fn available(&self) -> Vec<RateType> {
        self.by_type.keys().copied().collect()
    }

    /// Check whether no record of any type covers the slice
    pub fn is_gap(&self) -> bool {
        self.by_type.is_empty()
    }
}

/// Slices covering the booking, plus the overlaps resolved on the way
#[derive(Debug, Clone, Default)]
pub struct Selection<'a> {
    pub slices: Vec<Slice<'a>>,
    pub overlaps: Vec<OverlapResolution>,
}

/// Precedence between two records of the same rate type
pub fn precedence(a: &RateRecord, b: &RateRecord) -> Ordering {
    a.effective_date
        .cmp(&b.effective_date)
        .then_with(|| a.rate_id.cmp(&b.rate_id))
}

/// Records whose validity window meets the booking, clipped to it.
///
/// Records with an inverted window are skipped. The result is ordered by
/// rate type, then by precedence.
pub fn candidates<'a>(rates: &'a [RateRecord], stay: &DateRange) -> Vec<(DateRange, &'a RateRecord)> {
    let mut found: Vec<(DateRange, &RateRecord)> = rates
        .iter()
        .filter_map(|rate| {
            let window = rate.validity_window()?.intersect(stay)?;
            Some((window, rate))
        })
        .collect();

    found.sort_by(|(_, a), (_, b)| a.rate_type.cmp(&b.rate_type).then_with(|| precedence(a, b)));
    found
}

/// Resolve the winning record of every rate type over every slice of `stay`
pub fn select<'a>(rates: &'a [RateRecord], stay: &DateRange) -> Selection<'a> {
    let candidates = candidates(rates, stay);

    let mut cuts: Vec<NaiveDate> = vec![stay.start(), stay.end()];
    for (window, _) in &candidates {
        cuts.push(window.start());
        cuts.push(window.end());
    }
    cuts.sort_unstable();
    cuts.dedup();

    let slices: Vec<Slice<'a>> = cuts
        .windows(2)
        .filter_map(|pair| DateRange::new(pair[0], pair[1]))
        .map(|span| resolve_slice(span, &candidates))
        .collect();

    let overlaps = collect_overlaps(&slices);

    Selection { slices, overlaps }
}

fn resolve_slice<'a>(span: DateRange, candidates: &[(DateRange, &'a RateRecord)]) -> Slice<'a> {
    let mut grouped: BTreeMap<RateType, Vec<&'a RateRecord>> = BTreeMap::new();
    for (window, rate) in candidates {
        if window.contains(&span) {
            grouped.entry(rate.rate_type).or_default().push(*rate);
        }
    }

    let by_type = grouped
        .into_iter()
        .filter_map(|(rate_type, mut valid)| {
            valid.sort_by(|a, b| precedence(b, a));
            let (winner, rest) = valid.split_first()?;
            let mut superseded = rest.to_vec();
            superseded.sort_by(|a, b| a.rate_id.cmp(&b.rate_id));
            Some((
                rate_type,
                Resolved {
                    rate: *winner,
                    superseded,
                },
            ))
        })
        .collect();

    Slice { span, by_type }
}

fn superseded_ids(resolved: &Resolved<'_>) -> Vec<String> {
    resolved
        .superseded
        .iter()
        .map(|rate| rate.rate_id.clone())
        .collect()
}

/// Merge contested slices into maximal overlap records per rate type
fn collect_overlaps(slices: &[Slice<'_>]) -> Vec<OverlapResolution> {
    let mut overlaps: Vec<OverlapResolution> = Vec::new();
    let mut open: BTreeMap<RateType, usize> = BTreeMap::new();

    for slice in slices {
        for (rate_type, resolved) in &slice.by_type {
            if resolved.superseded.is_empty() {
                open.remove(rate_type);
                continue;
            }

            let superseded = superseded_ids(resolved);
            let extends = open.get(rate_type).and_then(|&idx| overlaps.get_mut(idx)).filter(|o| {
                o.period_end == slice.span.start()
                    && o.winning_rate_id == resolved.rate.rate_id
                    && o.superseded_rate_ids == superseded
            });

            match extends {
                Some(overlap) => overlap.period_end = slice.span.end(),
                None => {
                    open.insert(*rate_type, overlaps.len());
                    overlaps.push(OverlapResolution {
                        period_start: slice.span.start(),
                        period_end: slice.span.end(),
                        rate_type: *rate_type,
                        winning_rate_id: resolved.rate.rate_id.clone(),
                        superseded_rate_ids: superseded,
                    });
                }
            }
        }

        // A type missing from this slice cannot continue an open overlap
        open.retain(|rate_type, _| slice.by_type.contains_key(rate_type));
    }

    overlaps.sort_by(|a, b| {
        a.period_start
            .cmp(&b.period_start)
            .then(a.rate_type.cmp(&b.rate_type))
    });
    overlaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn r(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    fn rate(id: &str, rate_type: RateType, from: &str, to: &str) -> RateRecord {
        RateRecord {
            rate_id: id.to_string(),
            room_type_id: "rt_office".to_string(),
            rate_type,
            amount: dec!(120.00),
            currency: "USD".to_string(),
            effective_date: d(from),
            end_date: d(to),
        }
    }

    #[test]
    fn test_candidates_skip_windows_outside_booking() {
        let rates = vec![
            rate("q1", RateType::Daily, "2025-01-01", "2025-03-31"),
            rate("q3", RateType::Daily, "2025-07-01", "2025-09-30"),
        ];
        let found = candidates(&rates, &r("2025-02-01", "2025-02-10"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].1.rate_id, "q1");
        assert_eq!(found[0].0, r("2025-02-01", "2025-02-10"));
    }

    #[test]
    fn test_window_ending_on_arrival_eve_is_not_a_candidate() {
        let rates = vec![rate("jan", RateType::Daily, "2025-01-01", "2025-01-14")];
        assert!(candidates(&rates, &r("2025-01-15", "2025-01-20")).is_empty());
    }

    #[test]
    fn test_select_single_window() {
        let rates = vec![rate("q1", RateType::Daily, "2025-01-01", "2025-03-31")];
        let selection = select(&rates, &r("2025-01-15", "2025-01-20"));
        assert_eq!(selection.slices.len(), 1);
        assert_eq!(selection.slices[0].available(), vec![RateType::Daily]);
        assert!(selection.overlaps.is_empty());
    }

    #[test]
    fn test_slices_partition_booking() {
        let rates = vec![
            rate("a", RateType::Daily, "2025-01-01", "2025-01-10"),
            rate("b", RateType::Daily, "2025-01-20", "2025-01-31"),
        ];
        let stay = r("2025-01-05", "2025-01-25");
        let selection = select(&rates, &stay);

        let spans: Vec<DateRange> = selection.slices.iter().map(|s| s.span).collect();
        assert_eq!(
            spans,
            vec![
                r("2025-01-05", "2025-01-11"),
                r("2025-01-11", "2025-01-20"),
                r("2025-01-20", "2025-01-25"),
            ]
        );
        assert!(selection.slices[1].is_gap());
    }

    #[test]
    fn test_later_effective_date_wins_overlap() {
        let rates = vec![
            rate("rate_h1", RateType::Daily, "2025-01-01", "2025-06-30"),
            rate("rate_q3", RateType::Daily, "2025-06-15", "2025-09-30"),
        ];
        let selection = select(&rates, &r("2025-06-10", "2025-06-20"));

        let winners: Vec<&str> = selection
            .slices
            .iter()
            .map(|s| s.by_type[&RateType::Daily].rate.rate_id.as_str())
            .collect();
        assert_eq!(winners, vec!["rate_h1", "rate_q3"]);

        assert_eq!(
            selection.overlaps,
            vec![OverlapResolution {
                period_start: d("2025-06-15"),
                period_end: d("2025-06-20"),
                rate_type: RateType::Daily,
                winning_rate_id: "rate_q3".to_string(),
                superseded_rate_ids: vec!["rate_h1".to_string()],
            }]
        );
    }

    #[test]
    fn test_equal_effective_dates_break_tie_by_rate_id() {
        let rates = vec![
            rate("rate_b", RateType::Daily, "2025-01-01", "2025-01-31"),
            rate("rate_a", RateType::Daily, "2025-01-01", "2025-01-31"),
        ];
        let selection = select(&rates, &r("2025-01-10", "2025-01-12"));
        let resolved = &selection.slices[0].by_type[&RateType::Daily];
        assert_eq!(resolved.rate.rate_id, "rate_b");
        assert_eq!(resolved.superseded[0].rate_id, "rate_a");
    }

    #[test]
    fn test_overlap_record_spans_adjacent_contested_slices() {
        let rates = vec![
            rate("base", RateType::Daily, "2025-01-01", "2025-12-31"),
            rate("promo", RateType::Daily, "2025-03-01", "2025-03-31"),
            rate("monthly", RateType::Monthly, "2025-03-10", "2025-03-20"),
        ];
        let selection = select(&rates, &r("2025-02-25", "2025-04-05"));

        // Monthly boundaries cut the contested daily range into three slices
        let daily: Vec<_> = selection
            .overlaps
            .iter()
            .filter(|o| o.rate_type == RateType::Daily)
            .collect();
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].period_start, d("2025-03-01"));
        assert_eq!(daily[0].period_end, d("2025-04-01"));
        assert_eq!(daily[0].winning_rate_id, "promo");
    }

    #[test]
    fn test_types_are_resolved_independently() {
        let rates = vec![
            rate("daily", RateType::Daily, "2025-01-01", "2025-12-31"),
            rate("monthly", RateType::Monthly, "2025-01-01", "2025-12-31"),
        ];
        let selection = select(&rates, &r("2025-01-01", "2025-02-01"));
        assert_eq!(
            selection.slices[0].available(),
            vec![RateType::Daily, RateType::Monthly]
        );
        assert!(selection.overlaps.is_empty());
    }
}
