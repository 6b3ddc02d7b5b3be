//! # Gather - In-Memory Collection Queries
//!
//! Gather is a lightweight, in-memory, chainable collection library for
//! Rust. It models an ordered mapping of keys to dynamically typed values
//! and provides query, transform and aggregation operations over it, a
//! small in-process query language over arrays and dictionaries.
//!
//! ## Key Features
//!
//! - **Ordered**: insertion order is preserved and semantically meaningful
//! - **Chainable**: every transformation returns a new collection
//! - **Dotted paths**: nested values resolve through `a.b.c` paths with a
//!   `*` fan-out wildcard
//! - **Loose queries**: where-clauses compare across types under a
//!   documented coercion table (`50` matches `"50"`)
//! - **Grouping and ordering**: stable sorts, multi-level grouping,
//!   chunking and slicing with preserved keys
//! - **Serialization**: strict JSON encoding with recursive unwrapping of
//!   nested containers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gather::collect;
//!
//! let orders = collect![
//!     { account_id: "account-x15", price: "50" },
//!     { account_id: "account-x11", price: "50" },
//!     { account_id: "account-x5411", price: "40" },
//! ];
//!
//! // keep the expensive orders, original keys intact
//! let expensive = orders.where_eq("price", "50");
//!
//! // group by a field
//! let by_price = orders.group_by("price", false);
//!
//! // project a column
//! let ids = orders.pluck("account_id");
//!
//! // aggregate
//! let total = orders.sum_by("price");
//!
//! // encode
//! let json = orders.to_json()?;
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - The collection container and its operation set
//! - [`common`] - Value model, keys, dotted-path resolution, sort options
//! - [`errors`] - Error types and result definitions
//!
//! ## Concurrency
//!
//! All operations are pure, synchronous computations over in-memory
//! structures. Non-mutating operations are safe for concurrent reads; the
//! mutating operations (`insert`, `push`, `remove`) require external
//! synchronization when a collection is shared.

pub mod collection;
pub mod common;
pub mod errors;

pub use collection::{Collection, CompareOp, Fallback, Selector};
pub use common::{Key, Record, SortFlag, SortOrder, Value, ValueMap};
pub use errors::{ErrorKind, GatherError, GatherResult};

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    colog::init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::path::get_path;

    #[test]
    fn test_root_reexports() {
        let coll = Collection::make(vec![Value::Int(1)]);
        assert_eq!(coll.len(), 1);
        assert_eq!(
            get_path(&Value::Collection(coll), Some("0"), Fallback::null()),
            Value::Int(1)
        );
    }
}
