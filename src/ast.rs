//! # Aggregation expressions - syntax tree
//!
//! An expression names the parts of an aggregation result to keep and how to
//! shape them:
//!
//! ```text
//! expression := subAgg (whitespace subAgg)*
//! subAgg     := [ type ':' ] namePath [ '[' expression ']' ]
//! namePath   := segment ('.' segment)*
//! ```
//!
//! - **[agg_type]** - the closed set of type keywords and their output shapes
//! - **[expressions]** - parsed sub-expressions and whole expressions
//!
//! ## Example
//!
//! ```text
//! terms:name[transaction_count nested:transactions salesTotal[sales]]
//! ```
//!
//! produces one record per `name` bucket, each holding the bucket's key and
//! count, the `transaction_count` metric, the `transactions` count and a
//! `salesTotals` list built from the `salesTotal` buckets.
pub mod agg_type;
pub mod expressions;

pub use agg_type::{AggType, Shape};
pub use expressions::{Expression, SubAgg};
