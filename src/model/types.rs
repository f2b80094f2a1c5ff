use std::sync::Arc;

use bitflags::bitflags;

use crate::model::{MethodDescriptor, PropertyDescriptor};

bitflags! {
    /// Classification of a [`TypeDescriptor`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct TypeFlags: u32 {
        /// Array of any rank; `element_type` holds the innermost element
        const ARRAY = 0x0001;
        /// One of the runtime's primitive value types
        const PRIMITIVE = 0x0002;
        /// A type definition or reference that declares generic parameters
        const GENERIC_PARAMETERS = 0x0004;
        /// A generic type instantiated with arguments
        const GENERIC_INSTANCE = 0x0008;
        /// A placeholder for a generic parameter (`T`, `!0`, `!!0`)
        const GENERIC_PARAMETER = 0x0010;
        /// Managed reference (`T&`)
        const BY_REFERENCE = 0x0020;
        /// Unmanaged pointer (`T*`)
        const POINTER = 0x0040;
        /// Carries a `modreq`/`modopt` custom modifier
        const MODIFIED = 0x0080;
        /// Pinned local
        const PINNED = 0x0100;
        /// Function pointer
        const FUNCTION_POINTER = 0x0200;
        /// Declared inside another type
        const NESTED = 0x0400;
    }
}

/// Simple names of the primitive types in namespace `System`.
pub const PRIMITIVE_TYPE_NAMES: [&str; 14] = [
    "Boolean", "Char", "SByte", "Byte", "Int16", "UInt16", "Int32", "UInt32", "Int64", "UInt64",
    "Single", "Double", "IntPtr", "UIntPtr",
];

/// A type as seen by the stub generator.
///
/// The same struct describes both type definitions of the module (with members and nested
/// types) and types referenced from signatures (identity only). Wrapper types such as arrays,
/// by-reference types and generic instances keep the namespace of the type they wrap and
/// decorate its name, e.g. `Int32[]`, `Int32&` or ``List`1<System.Int32>``.
#[derive(Debug, Clone, Default)]
pub struct TypeDescriptor {
    /// Namespace, empty for nested types and generic parameters
    pub namespace: String,
    /// Simple name, including decorations of wrapper types
    pub name: String,
    /// Qualified name; nested types use `Outer/Inner`
    pub full_name: String,
    /// Classification
    pub flags: TypeFlags,
    /// For wrapper types, the innermost non-wrapper type
    pub element_type: Option<Arc<TypeDescriptor>>,
    /// Full name of the enclosing type, for nested types
    pub declaring_type: Option<String>,
    /// Names of the generic parameters declared by this type
    pub generic_parameters: Vec<String>,
    /// Methods in declaration order
    pub methods: Vec<Arc<MethodDescriptor>>,
    /// Properties in declaration order
    pub properties: Vec<PropertyDescriptor>,
    /// Nested types in declaration order
    pub nested_types: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Creates a plain type `namespace.name`.
    #[must_use]
    pub fn new(namespace: &str, name: &str) -> Self {
        let full_name = if namespace.is_empty() {
            name.to_string()
        } else {
            format!("{namespace}.{name}")
        };

        TypeDescriptor {
            namespace: namespace.to_string(),
            name: name.to_string(),
            full_name,
            ..TypeDescriptor::default()
        }
    }

    /// Creates a type in namespace `System`, flagged primitive when `name` is one of
    /// [`PRIMITIVE_TYPE_NAMES`].
    #[must_use]
    pub fn system(name: &str) -> Self {
        let mut descriptor = TypeDescriptor::new("System", name);
        if PRIMITIVE_TYPE_NAMES.contains(&name) {
            descriptor.flags |= TypeFlags::PRIMITIVE;
        }
        descriptor
    }

    /// Creates a type nested in `enclosing`.
    #[must_use]
    pub fn nested(enclosing: &TypeDescriptor, name: &str) -> Self {
        TypeDescriptor {
            name: name.to_string(),
            full_name: format!("{}/{}", enclosing.full_name, name),
            flags: TypeFlags::NESTED,
            declaring_type: Some(enclosing.full_name.clone()),
            ..TypeDescriptor::default()
        }
    }

    /// Creates a generic parameter placeholder.
    #[must_use]
    pub fn generic_parameter(name: &str) -> Self {
        TypeDescriptor {
            name: name.to_string(),
            full_name: name.to_string(),
            flags: TypeFlags::GENERIC_PARAMETER,
            ..TypeDescriptor::default()
        }
    }

    /// Wraps `inner` in a decoration such as an array, by-reference or pointer suffix.
    ///
    /// The result keeps the namespace of `inner`, appends `suffix` to both names, and points
    /// its element type at the innermost wrapped type.
    #[must_use]
    pub fn wrap(inner: &Arc<TypeDescriptor>, suffix: &str, flags: TypeFlags) -> Self {
        TypeDescriptor {
            namespace: inner.namespace.clone(),
            name: format!("{}{}", inner.name, suffix),
            full_name: format!("{}{}", inner.full_name, suffix),
            flags,
            element_type: Some(inner.innermost()),
            declaring_type: inner.declaring_type.clone(),
            ..TypeDescriptor::default()
        }
    }

    /// Creates a single-dimensional array of `element`.
    #[must_use]
    pub fn array_of(element: &Arc<TypeDescriptor>) -> Self {
        TypeDescriptor::wrap(element, "[]", TypeFlags::ARRAY)
    }

    /// Creates a managed reference to `element`.
    #[must_use]
    pub fn by_reference(element: &Arc<TypeDescriptor>) -> Self {
        TypeDescriptor::wrap(element, "&", TypeFlags::BY_REFERENCE)
    }

    /// Creates an instantiation of `definition` with `arguments`.
    ///
    /// The simple name stays the definition's (``List`1``); the full name lists the argument
    /// full names, e.g. ``System.Collections.Generic.List`1<System.Int32>``.
    #[must_use]
    pub fn generic_instance(
        definition: &Arc<TypeDescriptor>,
        arguments: &[Arc<TypeDescriptor>],
    ) -> Self {
        let arguments = arguments
            .iter()
            .map(|argument| argument.full_name.as_str())
            .collect::<Vec<_>>()
            .join(",");

        TypeDescriptor {
            namespace: definition.namespace.clone(),
            name: definition.name.clone(),
            full_name: format!("{}<{}>", definition.full_name, arguments),
            flags: TypeFlags::GENERIC_INSTANCE,
            element_type: Some(definition.innermost()),
            declaring_type: definition.declaring_type.clone(),
            ..TypeDescriptor::default()
        }
    }

    /// The innermost non-wrapper type: the element type if there is one, otherwise `self`.
    #[must_use]
    pub fn innermost(self: &Arc<Self>) -> Arc<TypeDescriptor> {
        match &self.element_type {
            Some(element) => element.clone(),
            None => self.clone(),
        }
    }

    /// Adds `flags` to the classification.
    #[must_use]
    pub fn with_flags(mut self, flags: TypeFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Declares generic parameters, flagging the type as generic.
    #[must_use]
    pub fn with_generic_parameters(mut self, names: &[&str]) -> Self {
        self.generic_parameters = names.iter().map(ToString::to_string).collect();
        if !self.generic_parameters.is_empty() {
            self.flags |= TypeFlags::GENERIC_PARAMETERS;
        }
        self
    }

    /// Appends a method.
    #[must_use]
    pub fn with_method(mut self, method: Arc<MethodDescriptor>) -> Self {
        self.methods.push(method);
        self
    }

    /// Appends a property.
    #[must_use]
    pub fn with_property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Appends a nested type.
    #[must_use]
    pub fn with_nested(mut self, nested: TypeDescriptor) -> Self {
        self.nested_types.push(nested);
        self
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        self.flags.contains(TypeFlags::ARRAY)
    }

    #[must_use]
    pub fn is_primitive(&self) -> bool {
        self.flags.contains(TypeFlags::PRIMITIVE)
    }

    #[must_use]
    pub fn is_nested(&self) -> bool {
        self.flags.contains(TypeFlags::NESTED)
    }

    /// Returns `true` if the type declares any generic parameters.
    #[must_use]
    pub fn has_generic_parameters(&self) -> bool {
        self.flags.contains(TypeFlags::GENERIC_PARAMETERS) || !self.generic_parameters.is_empty()
    }

    /// The type without its members, for use as a reference from signatures.
    #[must_use]
    pub fn identity(&self) -> TypeDescriptor {
        TypeDescriptor {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
            full_name: self.full_name.clone(),
            flags: self.flags,
            element_type: self.element_type.clone(),
            declaring_type: self.declaring_type.clone(),
            generic_parameters: self.generic_parameters.clone(),
            ..TypeDescriptor::default()
        }
    }
}
