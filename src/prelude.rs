//! # harmonygen Prelude
//!
//! This module provides a convenient prelude for the most commonly used types from the
//! harmonygen library. Import it to get quick access to everything needed to load a module,
//! generate stubs and write a report.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all harmonygen operations
pub use crate::Error;

/// The result type used throughout harmonygen
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// A loaded .NET module and the stub generation entry point
pub use crate::{generate, CilModule};

/// Low-level file parsing utilities
pub use crate::{File, Parser};

/// Metadata token type for referencing table entries
pub use crate::metadata::token::Token;

// ================================================================================================
// Descriptor Model
// ================================================================================================

/// Types, methods, parameters and properties
pub use crate::model::{
    MethodDescriptor, MethodFlags, MethodRole, MethodSemantics, ParameterDescriptor,
    ParameterFlags, PropertyDescriptor, TypeDescriptor, TypeFlags,
};

/// The audit log of encountered types
pub use crate::model::{RegisteredType, TypeRegistry};

// ================================================================================================
// Stub Generation
// ================================================================================================

/// Member selection and its output rows
pub use crate::stubs::{select_and_emit, ReportRow, TypeFilter};

/// Stub synthesis
pub use crate::stubs::{
    display_name, sanitize_identifier, synthesize, synthesize_triple, PatchKind, StubRequest,
    StubText, StubTriple, TypeNameNormalizer,
};

// ================================================================================================
// Reports
// ================================================================================================

/// Report writers, markup and the library list
pub use crate::report::{HtmlReport, LibraryList, Markup, ReportWriter, TextReport};
