pub mod correction;
pub mod dataset;
pub mod interval;
pub mod kit;
pub mod store;
pub mod variant;

// re-export for cleaner imports
pub use self::correction::{CallOrigin, Correction};
pub use self::dataset::Dataset;
pub use self::interval::{CoverageRange, Interval};
pub use self::kit::{Kit, VcfStats};
pub use self::store::VariantStore;
pub use self::variant::{Position, Variant, VariantId, VariantKey, VariantKind};
