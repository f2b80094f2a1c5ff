//! Harmony stub generation.
//!
//! The pipeline is [`select_and_emit`] walking the type tree, [`synthesize`] writing the
//! three stubs of every selected member, [`TypeNameNormalizer`] turning metadata types into
//! display names and [`sanitize_identifier`] escaping parameter names. All of it is pure text
//! transformation over the descriptor model; the only state is the [`TypeRegistry`] the
//! normalizer records into.
//!
//! [`TypeRegistry`]: crate::model::TypeRegistry

mod normalize;
mod sanitize;
mod select;
mod synth;

pub use normalize::{
    display_name, TypeNameNormalizer, HOST_FRAMEWORK_NAMESPACE, HOST_FRAMEWORK_OBJECT,
    HOST_FRAMEWORK_SHORT_NAMES, PRIMITIVE_KEYWORDS,
};
pub use sanitize::{sanitize_identifier, ESCAPE_MARKER, RESERVED_KEYWORDS};
pub use select::{select_and_emit, ReportRow, TypeFilter};
pub use synth::{synthesize, synthesize_triple, PatchKind, StubRequest, StubText, StubTriple};
