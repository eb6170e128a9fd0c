//! Thistle: element set switching for satellite propagation
//!
//! An object tracked over a long period is described by a series of element
//! sets (TLEs), each valid around its own epoch. This crate decides which
//! element set to propagate at any instant and propagates arbitrary time
//! arrays accordingly, calling each element set once with all of its times.
//!
//! # Overview
//!
//! - [`time`]: conversions between UTC timestamps and split Julian dates
//! - [`elements`]: the [`ElementSet`] abstraction over a batch propagator and
//!   the epoch-sorted [`ElementSeries`]
//! - [`switching`]: switching policies and their [`TransitionTable`]
//! - [`partition`]: grouping of query times by transition segment
//! - [`switcher`]: the [`Switcher`] facade tying it all together
//!
//! ```ignore
//! use thistle::{Policy, Switcher};
//!
//! let switcher = Switcher::new(&element_sets, Policy::Midpoint)?;
//! let states = switcher.propagate(&times)?;
//! ```

pub mod constants;
pub mod elements;
pub mod errors;
pub mod partition;
pub mod switcher;
pub mod switching;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use elements::{ElementSeries, ElementSet, PropagationBatch};
pub use errors::{Result, SwitchError};
pub use partition::{partition, Segment};
pub use switcher::{Propagation, Switcher};
pub use switching::{compute_transitions, Policy, TcaOptions, TransitionTable};
pub use time::{from_julian, to_julian, JulianMoment};
