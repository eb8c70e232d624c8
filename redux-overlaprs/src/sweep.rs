use num_traits::{PrimInt, ToPrimitive, Unsigned};

use redux_core::models::Interval;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoverageOverlap {
    /// sum of `end - start` over the first range set
    pub total: u64,
    /// width where at least one range of each set is active
    pub shared: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    A,
    B,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

/// Compute the total width of `a` and the width shared between `a` and `b`.
///
/// Endpoints of both sets are merged into one ascending event list, each tagged with its set
/// and whether it opens or closes a range. The sweep keeps an active count per set and
/// accumulates width while both counts are positive. Events at the same coordinate span zero
/// width, so their relative order does not matter.
///
/// ```
/// use redux_overlaprs::overlap;
/// use redux_core::models::CoverageRange;
///
/// let a = vec![CoverageRange::new(100, 200)];
/// let b = vec![CoverageRange::new(150, 300)];
/// let result = overlap(&a, &b);
/// assert_eq!(result.total, 100);
/// assert_eq!(result.shared, 50);
/// ```
pub fn overlap<I>(a: &[Interval<I>], b: &[Interval<I>]) -> CoverageOverlap
where
    I: PrimInt + Unsigned + Send + Sync,
{
    let total: u64 = a
        .iter()
        .map(|r| r.width().to_u64().unwrap_or(0))
        .sum();

    let mut events: Vec<(I, Source, Edge)> = Vec::with_capacity(2 * (a.len() + b.len()));
    for (ranges, source) in [(a, Source::A), (b, Source::B)] {
        for r in ranges.iter() {
            events.push((r.start, source, Edge::Start));
            events.push((r.end, source, Edge::End));
        }
    }
    events.sort_by_key(|e| e.0);

    let mut active_a: usize = 0;
    let mut active_b: usize = 0;
    let mut shared: u64 = 0;
    let mut prev: Option<I> = None;

    for (pos, source, edge) in events {
        if let Some(prev) = prev {
            if active_a > 0 && active_b > 0 {
                shared += (pos - prev).to_u64().unwrap_or(0);
            }
        }

        let counter = match source {
            Source::A => &mut active_a,
            Source::B => &mut active_b,
        };
        match edge {
            Edge::Start => *counter += 1,
            Edge::End => *counter = counter.saturating_sub(1),
        }
        prev = Some(pos);
    }

    CoverageOverlap { total, shared }
}
