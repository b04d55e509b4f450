//! Data structures for bitmask decoding.
//!
//! - **Bit definitions** ([`bit_table`]): named flag-to-bit mappings
//! - **Flag tables** ([`flag_table`]): per-pixel decoded flag records
//! - **Registry** ([`registry`]): the standard pixel DQ mnemonic table

pub mod bit_table;
pub mod flag_table;
pub mod registry;
