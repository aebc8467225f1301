//! Growable arrays with sorted insertion
//!
//! - [`GenericArray`]: typed elements, the usual choice
//! - [`RawArray`]: fixed-size byte slots with the size chosen at runtime
//!
//! Both share the same growth policy, item limits and ordered search.

pub mod array;
pub mod raw_array;
mod search;

pub use array::{DEFAULT_MAX_ITEMS, GenericArray, LEGACY_MAX_ITEMS};
pub use raw_array::RawArray;
