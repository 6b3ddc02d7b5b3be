//! The collection container and its operation set.
//!
//! A [`Collection`] is an ordered mapping of [`Key`](crate::common::Key)s
//! to [`Value`](crate::common::Value)s with chainable query, transform and
//! aggregation operations. Operations come in families:
//!
//! * filtering: `filter`, `where_field`, `where_in`, `reject`;
//! * retrieval: `first`, `last`, `contains`, `first_where`;
//! * aggregation: `sum`, `avg`, `min_by`, `max_by`, `reduce`;
//! * transforms: `map`, `pluck`, `key_by`, `group_by`, `sort_by`,
//!   `chunk`, `slice`, `values`, `reverse`;
//! * serialization: `to_json`, `json_serialize`.
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
//! let ids = orders.where_eq("price", "50").pluck("account_id");
//! let by_price = orders.group_by("price", false);
//! let total = orders.sum_by("price");
//! ```
//!
//! String-or-callable arguments are expressed as [`Selector`] variants,
//! lazy defaults as [`Fallback`] variants, and where-clause operators as
//! [`CompareOp`].

#[allow(clippy::module_inception)]
mod collection;
mod predicate;
mod selector;
mod serialize;

pub use collection::*;
pub use predicate::CompareOp;
pub use selector::{Fallback, Selector};
