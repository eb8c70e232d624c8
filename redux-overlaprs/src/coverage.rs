use redux_core::models::{CoverageRange, Position};

use crate::traits::CoverageClassifier;

/// Where a position falls relative to a kit's coverage ranges.
///
/// Variants are declared in increasing precedence: when a position is an endpoint of two
/// adjacent ranges the greater tag wins, so `max` picks the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Coverage {
    NotCovered,
    /// strictly between a range's endpoints
    Covered,
    /// equal to a range's upper endpoint
    BoundaryUpper,
    /// equal to a range's lower endpoint
    BoundaryLower,
    /// the range is the single point itself
    BoundaryPoint,
}

impl Coverage {
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            Coverage::BoundaryLower | Coverage::BoundaryUpper | Coverage::BoundaryPoint
        )
    }

    /// Tag of `pos` against a single range
    #[inline]
    pub fn of(range: &CoverageRange, pos: Position) -> Coverage {
        if range.start == pos && range.end == pos {
            Coverage::BoundaryPoint
        } else if range.start == pos {
            Coverage::BoundaryLower
        } else if range.end == pos {
            Coverage::BoundaryUpper
        } else if range.contains_interior(pos) {
            Coverage::Covered
        } else {
            Coverage::NotCovered
        }
    }
}

/// Classification over one kit's sorted, non-overlapping coverage ranges.
///
/// # Sequential Queries with `seek`
///
/// For ascending queries, use `seek` with a cursor to avoid a binary search per position:
///
/// ```
/// use redux_overlaprs::{Coverage, KitCoverage};
/// use redux_core::models::CoverageRange;
///
/// let ranges = (0u32..100).step_by(10)
///     .map(|x| CoverageRange::new(x, x + 5))
///     .collect::<Vec<_>>();
/// let coverage = KitCoverage::new(&ranges);
///
/// let mut cursor = 0;
/// for pos in [3u32, 10, 17, 45] {
///     let _ = coverage.seek(pos, &mut cursor);
/// }
/// assert_eq!(coverage.seek(47, &mut cursor), Coverage::NotCovered);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct KitCoverage<'a> {
    ranges: &'a [CoverageRange],
}

impl<'a> KitCoverage<'a> {
    /// `ranges` must be sorted by start (as the readers return them).
    pub fn new(ranges: &'a [CoverageRange]) -> Self {
        KitCoverage { ranges }
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Index of the first range whose end is at or past `pos`.
    #[inline]
    pub fn lower_bound(&self, pos: Position) -> usize {
        self.ranges.partition_point(|r| r.end < pos)
    }

    /// Best tag among the ranges from `from` that can touch `pos`.
    #[inline]
    fn scan(&self, pos: Position, from: usize) -> Coverage {
        self.ranges[from..]
            .iter()
            .take_while(|r| r.start <= pos)
            .map(|r| Coverage::of(r, pos))
            .max()
            .unwrap_or(Coverage::NotCovered)
    }

    /// Classify `pos`, advancing `cursor` past ranges that end before it.
    ///
    /// If `pos` is behind the cursor (queries went out of order) the cursor is
    /// reset with a binary search, so the answer is always the same as [`classify`](CoverageClassifier::classify).
    pub fn seek(&self, pos: Position, cursor: &mut usize) -> Coverage {
        if *cursor > self.ranges.len() || (*cursor > 0 && self.ranges[*cursor - 1].end >= pos) {
            *cursor = self.lower_bound(pos);
        }

        while *cursor < self.ranges.len() && self.ranges[*cursor].end < pos {
            *cursor += 1;
        }

        self.scan(pos, *cursor)
    }
}

impl CoverageClassifier for KitCoverage<'_> {
    fn classify(&self, pos: Position) -> Coverage {
        self.scan(pos, self.lower_bound(pos))
    }

    fn classify_sorted(&self, positions: &[Position]) -> Vec<Coverage> {
        let mut cursor = 0;
        positions
            .iter()
            .map(|p| self.seek(*p, &mut cursor))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ranges() -> Vec<CoverageRange> {
        vec![
            CoverageRange::new(100, 200),
            CoverageRange::new(200, 300),
            CoverageRange::new(400, 400),
            CoverageRange::new(500, 600),
        ]
    }

    #[rstest]
    #[case(99, Coverage::NotCovered)]
    #[case(100, Coverage::BoundaryLower)]
    #[case(101, Coverage::Covered)]
    #[case(199, Coverage::Covered)]
    #[case(200, Coverage::BoundaryLower)]
    #[case(300, Coverage::BoundaryUpper)]
    #[case(350, Coverage::NotCovered)]
    #[case(400, Coverage::BoundaryPoint)]
    #[case(600, Coverage::BoundaryUpper)]
    #[case(601, Coverage::NotCovered)]
    fn test_classify(ranges: Vec<CoverageRange>, #[case] pos: u32, #[case] expected: Coverage) {
        let coverage = KitCoverage::new(&ranges);
        assert_eq!(coverage.classify(pos), expected);
    }

    #[rstest]
    fn test_endpoints_are_never_covered(ranges: Vec<CoverageRange>) {
        let coverage = KitCoverage::new(&ranges);
        for range in ranges.iter() {
            assert!(coverage.classify(range.start).is_boundary());
            assert!(coverage.classify(range.end).is_boundary());
        }
    }

    #[rstest]
    fn test_point_beats_adjacent_bounds() {
        let ranges = vec![
            CoverageRange::new(10, 20),
            CoverageRange::new(20, 20),
            CoverageRange::new(20, 30),
        ];
        let coverage = KitCoverage::new(&ranges);
        assert_eq!(coverage.classify(20), Coverage::BoundaryPoint);
    }

    #[rstest]
    fn test_seek_matches_classify(ranges: Vec<CoverageRange>) {
        let coverage = KitCoverage::new(&ranges);
        let queries: Vec<u32> = (90..620).step_by(5).collect();

        let sorted = coverage.classify_sorted(&queries);
        let independent: Vec<Coverage> = queries.iter().map(|p| coverage.classify(*p)).collect();
        assert_eq!(sorted, independent);
    }

    #[rstest]
    fn test_seek_recovers_from_out_of_order(ranges: Vec<CoverageRange>) {
        let coverage = KitCoverage::new(&ranges);
        let mut cursor = 0;

        assert_eq!(coverage.seek(550, &mut cursor), Coverage::Covered);
        assert_eq!(coverage.seek(150, &mut cursor), Coverage::Covered);
        assert_eq!(coverage.seek(100, &mut cursor), Coverage::BoundaryLower);
        assert_eq!(coverage.seek(400, &mut cursor), Coverage::BoundaryPoint);
        assert_eq!(coverage.seek(350, &mut cursor), Coverage::NotCovered);
    }

    #[rstest]
    fn test_empty_kit() {
        let coverage = KitCoverage::new(&[]);
        let mut cursor = 0;
        assert_eq!(coverage.classify(5), Coverage::NotCovered);
        assert_eq!(coverage.seek(5, &mut cursor), Coverage::NotCovered);
    }
}
