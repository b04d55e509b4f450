#![doc = include_str!("../README.md")]
//!
//! ## Technical Overview
//!
//! A code array assigns every detector pixel an integer whose bits are
//! independent named quality conditions. The pipeline decodes those bits
//! against a bit-definition table and aggregates the result spatially.
//!
//! ### Pipeline
//!
//! 1. Define (or reuse) the flag vocabulary as a
//!    [`BitDefinitionTable`](structs::bit_table::BitDefinitionTable);
//!    [`structs::registry::pixel`] ships the standard pixel mnemonics.
//! 2. Sweep a code array with
//!    [`FlagTableBuilder`](process::table::FlagTableBuilder) to obtain a
//!    [`FlagTable`](structs::flag_table::FlagTable): one row per
//!    nonzero-coded element, with linear index, N-D coordinate, and one
//!    boolean column per flag.
//! 3. Aggregate with [`process::summary`] for per-flag counts and
//!    detector-plane point series ready for a plotting layer.
//!
//! ### Sparsity
//!
//! Only nonzero codes materialize rows. The selection happens before any
//! row is built, so an array that is 95% clean yields a table 5% of its
//! size rather than a dense table filtered after the fact.
//!
//! ### Validation policy
//!
//! Bit values are normally distinct powers of two. Definitions that break
//! this (composite values, shared bits) still decode by OR-matching and
//! are logged as warnings by default; `set_fail_level(log::Level::Warn)`
//! turns them into hard errors. Zero-valued definitions always fail.

/// Pipeline stages for bitmask decoding.
///
/// 1. **Flag decoding** ([`process::decode`]): one code against the
///    bit-definition table.
///
/// 2. **Table building** ([`process::table`]): a full array swept into a
///    structured flag table.
///
/// 3. **Aggregation** ([`process::summary`]): counts and point series for
///    presentation layers.
pub mod process;

/// Data structures for bitmask decoding.
///
/// - **Bit definitions** ([`structs::bit_table`]): named flag-to-bit
///   mappings
/// - **Flag tables** ([`structs::flag_table`]): per-pixel decoded records
/// - **Registry** ([`structs::registry`]): standard pixel DQ mnemonics
pub mod structs;

/// Supporting infrastructure.
///
/// - **Errors** ([`utils::errors`]): shape and definition error types,
///   fail-level policy macro
/// - **Index math** ([`utils::index`]): row-major ravel/unravel
pub mod utils;
