#[cfg(feature = "core")]
#[doc(inline)]
pub use redux_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use redux_io as io;

#[cfg(feature = "overlaprs")]
#[doc(inline)]
pub use redux_overlaprs as overlaprs;

#[cfg(feature = "calls")]
#[doc(inline)]
pub use redux_calls as calls;

#[cfg(feature = "clades")]
#[doc(inline)]
pub use redux_clades as clades;
