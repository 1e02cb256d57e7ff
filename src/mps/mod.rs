//! MPS file format.
//!
//! ```text
//! NAME          TESTLP
//! ROWS
//!  N  COST
//!  L  LIM1
//! COLUMNS
//!     X1        COST         1.0   LIM1         1.0
//!     X2        COST         2.0   LIM1         1.0
//! RHS
//!     RHS       LIM1        10.0
//! ENDATA
//! ```
//!
//! [`parse`] produces an [`MpsModel`] of dense arrays, which
//! [`MpsModel::into_linear_program`] turns into a validated program.

pub mod bounds;
pub mod error;
pub mod parser;

pub use bounds::BoundType;
pub use error::{MpsError, MpsErrorKind};
pub use parser::{parse, parse_str, read_mps, MpsModel, RangeEntry};
