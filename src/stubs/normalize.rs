//! Display names for metadata types.
//!
//! The rules are a fixed ladder of lookups, checked in order:
//!
//! 1. a type named `Void` is `void`,
//! 2. primitives map to their language keyword ([`PRIMITIVE_KEYWORDS`]),
//! 3. `System.String` and `System.Object` become `string` and `object`, other `System` types
//!    keep their simple name,
//! 4. `System.Collections.IEnumerator` keeps its simple name,
//! 5. the engine types in [`HOST_FRAMEWORK_SHORT_NAMES`] keep their simple name,
//! 6. everything else is spelled out by full name.
//!
//! Arrays are resolved through their innermost element type and get `[]` appended once,
//! whatever their rank. Generic arity markers (`` `1 `` to `` `9 ``) are dropped and nested
//! type separators become dots.

use crate::{
    model::{TypeDescriptor, TypeRegistry},
    report::Markup,
};

/// Keywords of the primitive types; primitives missing here keep their simple name.
pub const PRIMITIVE_KEYWORDS: [(&str, &str); 14] = [
    ("Boolean", "bool"),
    ("Byte", "byte"),
    ("SByte", "sbyte"),
    ("Char", "char"),
    ("Decimal", "decimal"),
    ("Double", "double"),
    ("Single", "float"),
    ("Int32", "int"),
    ("UInt32", "uint"),
    ("Int64", "long"),
    ("UInt64", "ulong"),
    ("Int16", "short"),
    ("UInt16", "ushort"),
    ("IntPtr", "IntPtr"),
];

/// Namespace of the game engine the stubs are written against.
pub const HOST_FRAMEWORK_NAMESPACE: &str = "UnityEngine";

/// Engine types that are written by simple name.
pub const HOST_FRAMEWORK_SHORT_NAMES: [&str; 9] = [
    "Material",
    "Mesh",
    "RenderTexture",
    "Vector3",
    "Vector4",
    "Color",
    "Camera",
    "Matrix4x4",
    "Transform",
];

/// The engine's base object, always qualified to keep it apart from `object`.
pub const HOST_FRAMEWORK_OBJECT: &str = "UnityEngine.Object";

fn base_name(ty: &TypeDescriptor) -> &str {
    if ty.name == "Void" {
        return "void";
    }

    if ty.is_primitive() {
        return PRIMITIVE_KEYWORDS
            .iter()
            .find(|(name, _)| *name == ty.name)
            .map_or(ty.name.as_str(), |(_, keyword)| *keyword);
    }

    match ty.namespace.as_str() {
        "System" => match ty.name.as_str() {
            "String" => "string",
            "Object" => "object",
            _ => &ty.name,
        },
        "System.Collections" => match ty.name.as_str() {
            "IEnumerator" => &ty.name,
            _ => &ty.full_name,
        },
        HOST_FRAMEWORK_NAMESPACE => match ty.name.as_str() {
            "Object" => HOST_FRAMEWORK_OBJECT,
            name if HOST_FRAMEWORK_SHORT_NAMES.contains(&name) => &ty.name,
            _ => &ty.full_name,
        },
        _ => &ty.full_name,
    }
}

fn strip_generic_arity(name: &str) -> String {
    let mut stripped = name.to_string();
    for arity in '1'..='9' {
        let marker = format!("`{arity}");
        if stripped.contains(&marker) {
            stripped = stripped.replace(&marker, "");
        }
    }
    stripped
}

/// The normalized display form of `ty`, escaped for `markup`.
///
/// Pure: does not touch any registry.
#[must_use]
pub fn display_name(ty: &TypeDescriptor, markup: Markup) -> String {
    let (target, is_array) = match (ty.is_array(), ty.element_type.as_deref()) {
        (true, Some(element)) => (element, true),
        _ => (ty, false),
    };

    let resolved = base_name(target).replace('/', ".");
    let stripped = strip_generic_arity(&resolved);

    let mut display = markup.escape(&stripped).into_owned();
    if is_array {
        display.push_str("[]");
    }
    display
}

/// Normalizes type names and records every type it sees in a [`TypeRegistry`].
pub struct TypeNameNormalizer<'r> {
    registry: &'r mut TypeRegistry,
    markup: Markup,
}

impl<'r> TypeNameNormalizer<'r> {
    /// Creates a normalizer writing into `registry` and escaping for `markup`.
    pub fn new(registry: &'r mut TypeRegistry, markup: Markup) -> Self {
        TypeNameNormalizer { registry, markup }
    }

    /// The markup names are escaped for.
    #[must_use]
    pub fn markup(&self) -> Markup {
        self.markup
    }

    /// Records `ty` without normalizing it.
    pub fn record(&mut self, ty: &TypeDescriptor) {
        self.registry.record(ty);
    }

    /// Returns the display name of `ty` and records it, along with the element type of an
    /// array, in the registry.
    pub fn normalize(&mut self, ty: &TypeDescriptor) -> String {
        self.registry.record(ty);
        if ty.is_array() {
            if let Some(element) = &ty.element_type {
                self.registry.record(element);
            }
        }

        display_name(ty, self.markup)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::model::TypeFlags;

    fn normalize(ty: &TypeDescriptor) -> String {
        let mut registry = TypeRegistry::new();
        TypeNameNormalizer::new(&mut registry, Markup::Html).normalize(ty)
    }

    #[test]
    fn primitives() {
        let cases = [
            ("Boolean", "bool"),
            ("Byte", "byte"),
            ("SByte", "sbyte"),
            ("Char", "char"),
            ("Double", "double"),
            ("Single", "float"),
            ("Int32", "int"),
            ("UInt32", "uint"),
            ("Int64", "long"),
            ("UInt64", "ulong"),
            ("Int16", "short"),
            ("UInt16", "ushort"),
            ("IntPtr", "IntPtr"),
            ("UIntPtr", "UIntPtr"),
        ];

        for (name, expected) in cases {
            assert_eq!(normalize(&TypeDescriptor::system(name)), expected, "{name}");
        }
    }

    #[test]
    fn decimal_keyword_applies_to_primitive_flag_only() {
        assert_eq!(normalize(&TypeDescriptor::system("Decimal")), "Decimal");
        assert_eq!(
            normalize(&TypeDescriptor::system("Decimal").with_flags(TypeFlags::PRIMITIVE)),
            "decimal"
        );
    }

    #[test]
    fn system_types() {
        assert_eq!(normalize(&TypeDescriptor::system("Void")), "void");
        assert_eq!(normalize(&TypeDescriptor::system("String")), "string");
        assert_eq!(normalize(&TypeDescriptor::system("Object")), "object");
        assert_eq!(normalize(&TypeDescriptor::system("Exception")), "Exception");
        assert_eq!(normalize(&TypeDescriptor::new("Game", "Void")), "void");
    }

    #[test]
    fn collections_namespace() {
        assert_eq!(
            normalize(&TypeDescriptor::new("System.Collections", "IEnumerator")),
            "IEnumerator"
        );
        assert_eq!(
            normalize(&TypeDescriptor::new("System.Collections", "Hashtable")),
            "System.Collections.Hashtable"
        );
        assert_eq!(
            normalize(&TypeDescriptor::new("System.Collections.Generic", "List`1")),
            "System.Collections.Generic.List"
        );
    }

    #[test]
    fn host_framework_types() {
        for name in HOST_FRAMEWORK_SHORT_NAMES {
            assert_eq!(normalize(&TypeDescriptor::new(HOST_FRAMEWORK_NAMESPACE, name)), name);
        }
        assert_eq!(
            normalize(&TypeDescriptor::new(HOST_FRAMEWORK_NAMESPACE, "Object")),
            "UnityEngine.Object"
        );
        assert_eq!(
            normalize(&TypeDescriptor::new(HOST_FRAMEWORK_NAMESPACE, "GameObject")),
            "UnityEngine.GameObject"
        );
    }

    #[test]
    fn nested_and_generic_names() {
        let outer = TypeDescriptor::new("Game", "Inventory");
        let nested = TypeDescriptor::nested(&outer, "Slot");
        assert_eq!(normalize(&nested), "Game.Inventory.Slot");

        let list = Arc::new(TypeDescriptor::new("System.Collections.Generic", "List`1"));
        let item = Arc::new(TypeDescriptor::new("Game", "Item"));
        let instance = TypeDescriptor::generic_instance(&list, &[item]);
        assert_eq!(
            normalize(&instance),
            "System.Collections.Generic.List&lt;Game.Item&gt;"
        );

        let compiler_generated = TypeDescriptor::nested(&outer, "<>c");
        assert_eq!(normalize(&compiler_generated), "Game.Inventory.&lt;&gt;c");
    }

    #[test]
    fn arrays_normalize_their_element() {
        let int = Arc::new(TypeDescriptor::system("Int32"));
        let array = Arc::new(TypeDescriptor::array_of(&int));
        let jagged = TypeDescriptor::array_of(&array);
        let matrix = TypeDescriptor::wrap(&int, "[0...,0...]", TypeFlags::ARRAY);

        assert_eq!(normalize(&array), format!("{}[]", normalize(&int)));
        assert_eq!(normalize(&jagged), "int[]");
        assert_eq!(normalize(&matrix), "int[]");

        let transform = Arc::new(TypeDescriptor::new(HOST_FRAMEWORK_NAMESPACE, "Transform"));
        assert_eq!(normalize(&TypeDescriptor::array_of(&transform)), "Transform[]");
    }

    #[test]
    fn wrappers_are_not_primitive() {
        let int = Arc::new(TypeDescriptor::system("Int32"));
        assert_eq!(normalize(&TypeDescriptor::by_reference(&int)), "Int32&");
    }

    #[test]
    fn arity_markers_are_stripped() {
        assert_eq!(strip_generic_arity("Dictionary`2"), "Dictionary");
        assert_eq!(strip_generic_arity("A`1/B`3"), "A/B");
        assert_eq!(strip_generic_arity("Tuple`10"), "Tuple0");
        assert_eq!(strip_generic_arity("Plain"), "Plain");
    }

    #[test]
    fn plain_markup_does_not_escape() {
        let outer = TypeDescriptor::new("Game", "Inventory");
        let nested = TypeDescriptor::nested(&outer, "<>c");
        assert_eq!(display_name(&nested, Markup::Plain), "Game.Inventory.<>c");
    }

    #[test]
    fn records_types_and_array_elements() {
        let mut registry = TypeRegistry::new();
        let int = Arc::new(TypeDescriptor::system("Int32"));
        let array = TypeDescriptor::array_of(&int);

        let mut normalizer = TypeNameNormalizer::new(&mut registry, Markup::Html);
        let first = normalizer.normalize(&array);
        let second = normalizer.normalize(&array);
        assert_eq!(first, second);

        let names = registry.iter().map(|t| t.full_name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["System.Int32[]", "System.Int32"]);
    }
}
