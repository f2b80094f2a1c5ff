//! Signature blob decoding (ECMA-335 II.23.2).
//!
//! Methods, properties and type specifications describe their types through compact binary
//! signatures stored in the `#Blob` heap. [`SignatureParser`] turns them into
//! [`TypeSignature`] trees that still refer to named types by token.

mod parser;
mod types;

pub use parser::SignatureParser;
pub use types::*;
