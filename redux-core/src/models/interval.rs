use num_traits::{PrimInt, Unsigned, identities::zero};
use std::cmp::Ordering::{self};

use super::variant::Position;

/// Represent a closed range [start, end]
/// Both endpoints are part of the range; `start == end` is a single point.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Interval<I>
where
    I: PrimInt + Unsigned + Send + Sync,
{
    pub start: I,
    pub end: I,
}

/// A covered stretch of one kit's chromosome.
pub type CoverageRange = Interval<Position>;

impl<I> Ord for Interval<I>
where
    I: PrimInt + Unsigned + Send + Sync,
{
    #[inline]
    fn cmp(&self, other: &Interval<I>) -> Ordering {
        match self.start.cmp(&other.start) {
            Ordering::Less => Ordering::Less,
            Ordering::Greater => Ordering::Greater,
            Ordering::Equal => self.end.cmp(&other.end),
        }
    }
}

impl<I> PartialOrd for Interval<I>
where
    I: PrimInt + Unsigned + Send + Sync,
{
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<I> Interval<I>
where
    I: PrimInt + Unsigned + Send + Sync,
{
    pub fn new(start: I, end: I) -> Self {
        Interval { start, end }
    }

    /// Width of the range, `end - start`. A single point has width zero.
    #[inline]
    pub fn width(&self) -> I {
        self.end.checked_sub(&self.start).unwrap_or_else(zero::<I>)
    }

    /// Position lies strictly between the endpoints
    #[inline]
    pub fn contains_interior(&self, pos: I) -> bool {
        self.start < pos && pos < self.end
    }

    /// Whether `other` lies entirely inside this range
    #[inline]
    pub fn encloses(&self, other: &Interval<I>) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(100, 200, 100)]
    #[case(5, 5, 0)]
    fn test_width(#[case] start: u32, #[case] end: u32, #[case] expected: u32) {
        assert_eq!(Interval::new(start, end).width(), expected);
    }

    #[rstest]
    fn test_interior_excludes_endpoints() {
        let range = Interval::new(10u32, 20);
        assert!(!range.contains_interior(10));
        assert!(range.contains_interior(11));
        assert!(range.contains_interior(19));
        assert!(!range.contains_interior(20));
    }

    #[rstest]
    fn test_sort_by_start_then_end() {
        let mut ranges = vec![
            Interval::new(30u32, 40),
            Interval::new(10, 25),
            Interval::new(10, 20),
        ];
        ranges.sort();
        assert_eq!(
            ranges,
            vec![
                Interval::new(10, 20),
                Interval::new(10, 25),
                Interval::new(30, 40)
            ]
        );
    }

    #[rstest]
    fn test_encloses() {
        let parent = Interval::new(4usize, 7);
        assert!(parent.encloses(&Interval::new(4, 7)));
        assert!(parent.encloses(&Interval::new(5, 6)));
        assert!(!parent.encloses(&Interval::new(3, 6)));
    }
}
