use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::io::Write;

use redux_core::models::{CallOrigin, Position, VariantId, VariantKind};
use redux_overlaprs::Coverage;

use crate::errors::CallMatrixError;

/// Special status of a kit that has no direct call for a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Annotation {
    /// the kit's coverage range is the single point at the variant
    Point,
    /// the variant sits on the upper end of a coverage range
    Upper,
    /// the variant sits on the lower end of a coverage range
    Lower,
    NotCovered,
}

impl Annotation {
    /// `None` for a position strictly inside coverage: no special status.
    pub fn from_coverage(coverage: Coverage) -> Option<Annotation> {
        match coverage {
            Coverage::BoundaryPoint => Some(Annotation::Point),
            Coverage::BoundaryUpper => Some(Annotation::Upper),
            Coverage::BoundaryLower => Some(Annotation::Lower),
            Coverage::NotCovered => Some(Annotation::NotCovered),
            Coverage::Covered => None,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Annotation::Point => ";cblu",
            Annotation::Upper => ";cbu",
            Annotation::Lower => ";cbl",
            Annotation::NotCovered => ";nc",
        }
    }
}

/// Annotations keyed by (kit index, variant). A missing entry means the kit
/// either called the variant or covered it without a boundary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusMap {
    statuses: BTreeMap<(usize, VariantId), Annotation>,
}

impl StatusMap {
    pub fn insert(&mut self, kit: usize, variant: VariantId, annotation: Annotation) {
        self.statuses.insert((kit, variant), annotation);
    }

    pub fn get(&self, kit: usize, variant: VariantId) -> Option<Annotation> {
        self.statuses.get(&(kit, variant)).copied()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// In canonical kit order, then variant id.
    pub fn iter(&self) -> impl Iterator<Item = (usize, VariantId, Annotation)> + '_ {
        self.statuses.iter().map(|((k, v), a)| (*k, *v, *a))
    }
}

/// One line of the call report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub variant: VariantId,
    pub pos: Position,
    /// display alleles, with `,` already replaced by `|`
    pub reference: String,
    pub alternate: String,
    pub kind: Option<VariantKind>,
    pub count: usize,
    pub origin: CallOrigin,
    /// one cell per kit, canonical order
    pub cells: Vec<String>,
}

impl Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},,{},{},", self.pos, self.reference, self.alternate)?;
        if let Some(kind) = self.kind {
            write!(f, "{},", kind)?;
        }
        write!(f, "{},,,,,,,,,,,", self.count)?;
        for cell in self.cells.iter() {
            write!(f, ",{}", cell)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallMatrix {
    /// ascending (position, reference, alternate)
    pub rows: Vec<ReportRow>,
    pub statuses: StatusMap,
}

impl CallMatrix {
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rows.iter().map(|r| r.to_string())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), CallMatrixError> {
        for row in self.rows.iter() {
            writeln!(writer, "{}", row)?;
        }
        Ok(())
    }
}
