use std::fmt::{self, Display};

/// A 1-based coordinate on the target chromosome.
pub type Position = u32;

/// Dense identifier handed out by [`super::VariantStore`] in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantId(pub u32);

impl VariantId {
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identity of a variant. Ordering is position, then reference, then alternate,
/// which is also the order rows are reported in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariantKey {
    pub pos: Position,
    pub reference: String,
    pub alternate: String,
}

impl VariantKey {
    pub fn new(pos: Position, reference: impl Into<String>, alternate: impl Into<String>) -> Self {
        VariantKey {
            pos,
            reference: reference.into(),
            alternate: alternate.into(),
        }
    }

    /// A variant known only by its position, as created from a numeric tree marker.
    pub fn position_only(pos: Position) -> Self {
        VariantKey::new(pos, "", "")
    }

    /// The same site with reference and alternate exchanged.
    pub fn inverted(&self) -> Self {
        VariantKey::new(self.pos, self.alternate.clone(), self.reference.clone())
    }

    pub fn kind(&self) -> Option<VariantKind> {
        let (r, a) = (self.reference.len(), self.alternate.len());
        if r == 1 && a == 1 {
            Some(VariantKind::Snp)
        } else if r > 1 || a > 1 {
            Some(VariantKind::Indel)
        } else {
            None
        }
    }
}

impl Display for VariantKey {
    /// The call string, `pos.ref.alt`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.pos, self.reference, self.alternate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
    Snp,
    Indel,
}

impl Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariantKind::Snp => write!(f, "SNP"),
            VariantKind::Indel => write!(f, "Indel"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub key: VariantKey,
    /// Names from the reference SNP list; several names may share one site
    pub names: Vec<String>,
}

impl Variant {
    pub fn new(key: VariantKey) -> Self {
        Variant {
            key,
            names: Vec::new(),
        }
    }
}
