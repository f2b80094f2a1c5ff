use std::borrow::Cow;

/// The reserved keywords of the target declaration language, in byte order.
///
/// Contextual keywords (`value`, `var`, `get`, ...) are valid identifiers and stay out.
pub const RESERVED_KEYWORDS: [&str; 78] = [
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "record", "ref", "return", "sbyte", "sealed",
    "short", "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw",
    "true", "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using",
    "virtual", "void", "volatile", "while",
];

/// Prefix that turns a keyword into a verbatim identifier.
pub const ESCAPE_MARKER: char = '@';

/// Escapes `name` if it is exactly one of [`RESERVED_KEYWORDS`].
///
/// ```rust
/// use harmonygen::stubs::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("object"), "@object");
/// assert_eq!(sanitize_identifier("Object"), "Object");
/// assert_eq!(sanitize_identifier("value"), "value");
/// ```
#[must_use]
pub fn sanitize_identifier(name: &str) -> Cow<'_, str> {
    if RESERVED_KEYWORDS.binary_search(&name).is_ok() {
        Cow::Owned(format!("{ESCAPE_MARKER}{name}"))
    } else {
        Cow::Borrowed(name)
    }
}
