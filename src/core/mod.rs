//! Core types, traits, and sizing utilities.
//!
//! - **Traits**: [`AccessCounter`] (the per-bucket backend surface),
//!   [`SketchCounter`] (sketch cell widths)
//! - **Data Structures**: [`BitVec`]
//! - **Utilities**: backend sizing formulas in [`params`]
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── counter.rs   - Backend capability traits
//! ├── bitvec.rs    - Bit vector for the membership filter
//! ├── params.rs    - Filter and sketch sizing
//! └── mod.rs       - This file (public API)
//! ```
//!
//! # Examples
//!
//! ```
//! use accesstrack::core::params::{sketch_depth, sketch_error_margin, sketch_width};
//!
//! // One count of error per million operations, 99% of the time.
//! let margin = sketch_error_margin(1, 1_000_000).unwrap();
//! let width = sketch_width(margin, 8_000_000).unwrap();
//! let depth = sketch_depth(0.99, 8).unwrap();
//! assert_eq!((width, depth), (2_000_000, 7));
//! ```

#![allow(clippy::module_name_repetitions)]

pub mod bitvec;
pub mod counter;
pub mod params;

pub use bitvec::BitVec;
pub use counter::{AccessCounter, SketchCounter};

pub use params::{
    expected_fp_rate, optimal_bit_count, optimal_hash_count, sketch_depth, sketch_error_margin,
    sketch_width,
};
