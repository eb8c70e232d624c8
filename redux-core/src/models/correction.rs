use super::variant::VariantId;

/// Why a variant record exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallOrigin {
    /// A PASS call from a kit's VCF
    Normal,
    /// `^` correction: report the variant even when no kit calls it
    ForceInsert,
    /// `<` correction: the stored ref/alt are inverted relative to the reference
    ReferenceSwap,
}

impl CallOrigin {
    /// Map the leading token of a correction line to its origin.
    pub fn from_marker(token: &str) -> Option<CallOrigin> {
        match token {
            "^" => Some(CallOrigin::ForceInsert),
            "<" => Some(CallOrigin::ReferenceSwap),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correction {
    pub variant: VariantId,
    pub origin: CallOrigin,
}
