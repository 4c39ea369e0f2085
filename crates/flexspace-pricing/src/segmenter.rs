//! Segmenter
//!
//! Groups the selector's slices into coverage runs (maximal ranges where the
//! set of available rate types does not change), lets the caller pick a rate
//! type per run, and emits the resulting segments and gaps. Adjacent pieces
//! priced by the same record are merged, across run boundaries too.

use crate::selector::{Selection, Slice};
use flexspace_core::{
    interval::{self, DateRange},
    models::{PricingStage, RateRecord, RateType},
    PricingError, PricingResult,
};

/// Contiguous range priced by a single rate record
#[derive(Debug, Clone)]
pub struct Piece<'a> {
    pub span: DateRange,
    pub rate: &'a RateRecord,
}

/// Maximal range over which the same rate types are available
#[derive(Debug, Clone)]
pub struct Run<'s, 'a> {
    pub span: DateRange,
    pub available: Vec<RateType>,
    slices: &'s [Slice<'a>],
}

impl<'s, 'a> Run<'s, 'a> {
    /// Nights in the run
    pub fn days(&self) -> i64 {
        self.span.days()
    }

    /// Check whether `rate_type` has a record on every day of the run
    pub fn offers(&self, rate_type: RateType) -> bool {
        self.available.contains(&rate_type)
    }

    /// Pieces covering the run with records of `rate_type`.
    ///
    /// Empty when the type is not available on the run.
    pub fn pieces(&self, rate_type: RateType) -> Vec<Piece<'a>> {
        let mut pieces = Vec::new();
        for slice in self.slices {
            if let Some(resolved) = slice.by_type.get(&rate_type) {
                push_or_extend(
                    &mut pieces,
                    Piece {
                        span: slice.span,
                        rate: resolved.rate,
                    },
                );
            }
        }
        pieces
    }
}

/// Segmenter output: priced pieces and unpriced gaps, both chronological
#[derive(Debug, Clone, Default)]
pub struct Segmentation<'a> {
    pub pieces: Vec<Piece<'a>>,
    pub gaps: Vec<DateRange>,
}

fn same_record(a: &RateRecord, b: &RateRecord) -> bool {
    a.rate_id == b.rate_id && a.rate_type == b.rate_type
}

fn push_or_extend<'a>(pieces: &mut Vec<Piece<'a>>, piece: Piece<'a>) {
    if let Some(last) = pieces.last_mut() {
        if last.span.is_adjacent(&piece.span) && same_record(last.rate, piece.rate) {
            if let Some(span) = DateRange::new(last.span.start(), piece.span.end()) {
                last.span = span;
                return;
            }
        }
    }
    pieces.push(piece);
}

/// Split the selection into coverage runs and gap ranges
pub fn runs<'s, 'a>(selection: &'s Selection<'a>) -> (Vec<Run<'s, 'a>>, Vec<DateRange>) {
    let slices = &selection.slices;
    let mut runs = Vec::new();
    let mut gaps = Vec::new();

    let mut idx = 0;
    while idx < slices.len() {
        let first = &slices[idx];
        if first.is_gap() {
            gaps.push(first.span);
            idx += 1;
            continue;
        }

        let available = first.available();
        let mut end = idx + 1;
        while end < slices.len()
            && slices[end].available() == available
            && slices[end - 1].span.is_adjacent(&slices[end].span)
        {
            end += 1;
        }

        let last = &slices[end - 1];
        if let Some(span) = DateRange::new(first.span.start(), last.span.end()) {
            runs.push(Run {
                span,
                available,
                slices: &slices[idx..end],
            });
        }
        idx = end;
    }

    (runs, interval::coalesce(gaps))
}

/// Segment the booking, picking each run's rate type with `choose`.
///
/// Fails with `InternalInconsistency` when `choose` returns a type the run
/// does not offer, or when the pieces and gaps do not partition `stay`.
pub fn segment<'a, F>(
    selection: &Selection<'a>,
    stay: &DateRange,
    mut choose: F,
) -> PricingResult<Segmentation<'a>>
where
    F: FnMut(&Run<'_, 'a>) -> PricingResult<RateType>,
{
    let (runs, gaps) = runs(selection);

    let mut pieces: Vec<Piece<'a>> = Vec::new();
    for run in &runs {
        let rate_type = choose(run)?;
        if !run.offers(rate_type) {
            return Err(PricingError::inconsistency(
                PricingStage::Segmenting,
                format!("{} rate chosen for {} where it is not available", rate_type, run.span),
            ));
        }
        for piece in run.pieces(rate_type) {
            push_or_extend(&mut pieces, piece);
        }
    }

    verify_partition(stay, &pieces, &gaps)?;

    Ok(Segmentation { pieces, gaps })
}

/// Check that pieces are ordered, disjoint, inside `stay`, and that together
/// with `gaps` they cover every day of it
pub fn verify_partition(stay: &DateRange, pieces: &[Piece<'_>], gaps: &[DateRange]) -> PricingResult<()> {
    for pair in pieces.windows(2) {
        if pair[0].span.end() > pair[1].span.start() {
            return Err(PricingError::inconsistency(
                PricingStage::Segmenting,
                format!(
                    "segments {} and {} overlap or are out of order",
                    pair[0].span, pair[1].span
                ),
            ));
        }
    }

    if let Some(outside) = pieces.iter().find(|p| !stay.contains(&p.span)) {
        return Err(PricingError::inconsistency(
            PricingStage::Segmenting,
            format!("segment {} lies outside booking {}", outside.span, stay),
        ));
    }

    let spans: Vec<DateRange> = pieces.iter().map(|p| p.span).collect();
    if interval::uncovered(stay, &spans) != gaps {
        return Err(PricingError::inconsistency(
            PricingStage::Segmenting,
            format!("segments and gaps do not partition booking {}", stay),
        ));
    }

    Ok(())
}
