//! Diagnostic and error reporting for the Folio compiler.
//!
//! Lowering errors are fatal and non-recoverable: a lowering call either
//! returns a completed code fragment or returns a [`Diagnostic`] carrying
//! the source position of the most specific failing sub-construct, a
//! catalog-rendered message, and an optional wrapped cause. This crate
//! never prints or logs; reporting policy belongs to the driver.

mod catalog;
mod diagnostic;
mod error_code;

pub use catalog::{DefaultCatalog, MessageCatalog};
pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;

/// Result alias used throughout lowering.
pub type LowerResult<T> = Result<T, Diagnostic>;
