//! cellkit - storage primitives for list and grid controls
//!
//! Two building blocks shared by the controls of a desktop widget toolkit:
//!
//! - [`GenericArray`]: a growable array that can keep itself sorted by a
//!   caller-supplied comparator, with plain, hinted and reposition-after-edit
//!   insertion. [`RawArray`] is the same with byte slots sized at runtime.
//! - [`Value`]: one cell's worth of typed data (integers, owned or shared text,
//!   colors, icon handles) with per-kind copy, compare, parse, format and render.
//!
//! Controls store `Value`s in a `GenericArray` and keep rows ordered with
//! [`Value::compare`]. Nothing here is synchronized; use one thread or guard
//! access externally.
//!
//! # Example
//! ```
//! use cellkit::{GenericArray, Value, ValueKind};
//!
//! let mut column = GenericArray::new();
//! for text in ["5", "3", "8", "1"] {
//!     let value = ValueKind::Int32.parse(text).unwrap();
//!     column.insert_sorted(value, Value::compare).unwrap();
//! }
//! let sorted: Vec<String> = column.iter().map(|v| v.to_string()).collect();
//! assert_eq!(sorted, ["1", "3", "5", "8"]);
//! ```

pub mod collections;
pub mod color;
pub mod convert;
pub mod error;
pub mod render;
pub mod text;
pub mod util;
pub mod value;

// Re-export main types
pub use collections::{GenericArray, RawArray};
pub use color::ColorRef;
pub use error::{Error, ErrorKind, Result};
pub use render::{Alignment, HorizontalAlign, Rect, Surface, VerticalAlign};
pub use text::StringTable;
pub use util::FormatLen;
pub use value::{IconHandle, Value, ValueKind};
