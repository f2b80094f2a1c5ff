//! The descriptor graph the stub generator works on.
//!
//! Descriptors are immutable views of the types, methods, parameters and properties of one
//! module. The metadata reader builds them once per module; the stub core only reads them.
//!
//! Ownership follows the metadata: a [`TypeDescriptor`] owns its methods, properties and
//! nested types, while a [`PropertyDescriptor`] shares its accessors with the owning type's
//! method list. Types referenced from signatures are shared through [`Arc`](std::sync::Arc),
//! since the same type shows up as parameter or return type of many members.

mod method;
mod registry;
mod types;

pub use method::{
    MethodDescriptor, MethodFlags, MethodRole, MethodSemantics, ParameterDescriptor,
    ParameterFlags, PropertyDescriptor, EXTENSION_ATTRIBUTE,
};
pub use registry::{RegisteredType, TypeRegistry};
pub use types::{TypeDescriptor, TypeFlags, PRIMITIVE_TYPE_NAMES};
