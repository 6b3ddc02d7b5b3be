//! Common value types and utilities.
//!
//! This module provides the dynamic value model shared by every collection
//! operation:
//!
//! * [`Value`]: tagged union of scalars, sequences, mappings and
//!   object-like values, carrying the loose comparison table;
//! * [`Key`]: integer-or-string key with array-key normalization;
//! * [`Record`]: object-like value with named properties;
//! * [`path`]: dotted-path resolution with `*` fan-out;
//! * [`SortOrder`] / [`SortFlag`]: sorting direction and comparison rule.

mod key;
pub mod path;
mod record;
mod sort_order;
mod util;
pub(crate) mod value;

pub use key::Key;
pub use record::Record;
pub use sort_order::{SortFlag, SortOrder};
pub use util::*;
pub use value::{Value, ValueMap};

pub(crate) use value::{num_add, num_cmp, NumVal};
