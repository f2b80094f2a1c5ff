use std::sync::Arc;

use crate::model::TypeDescriptor;

pub use crate::metadata::tables::{
    MethodAttributes as MethodFlags, MethodSemanticsAttributes as MethodSemantics,
    ParamAttributes as ParameterFlags,
};

/// Full name of the attribute the compiler places on extension methods.
pub const EXTENSION_ATTRIBUTE: &str = "System.Runtime.CompilerServices.ExtensionAttribute";

/// The special role a method plays, derived from its name and semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodRole {
    /// An ordinary method
    None,
    /// Property getter
    Getter,
    /// Property setter
    Setter,
    /// Instance constructor (`.ctor`)
    Constructor,
    /// Type initializer (`.cctor`)
    StaticConstructor,
}

/// A method declared by a type.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    /// Simple name, `.ctor` and `.cctor` for constructors
    pub name: String,
    /// `MethodAttributes`
    pub flags: MethodFlags,
    /// Accessor semantics, empty for ordinary methods
    pub semantics: MethodSemantics,
    /// Return type, `System.Void` for none
    pub return_type: Arc<TypeDescriptor>,
    /// Declared parameters, in signature order
    pub parameters: Vec<ParameterDescriptor>,
    /// Names of the generic parameters declared by the method
    pub generic_parameters: Vec<String>,
    /// Full names of the attribute types applied to the method
    pub custom_attributes: Vec<String>,
}

impl MethodDescriptor {
    /// Creates a public instance method without parameters.
    #[must_use]
    pub fn new(name: &str, return_type: Arc<TypeDescriptor>) -> Self {
        MethodDescriptor {
            name: name.to_string(),
            flags: MethodFlags::empty(),
            semantics: MethodSemantics::empty(),
            return_type,
            parameters: Vec::new(),
            generic_parameters: Vec::new(),
            custom_attributes: Vec::new(),
        }
    }

    /// Adds `flags` to the method attributes.
    #[must_use]
    pub fn with_flags(mut self, flags: MethodFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Marks the method as a property accessor.
    #[must_use]
    pub fn with_semantics(mut self, semantics: MethodSemantics) -> Self {
        self.semantics |= semantics;
        self
    }

    /// Appends a parameter, numbering it after the existing ones.
    #[must_use]
    pub fn with_parameter(mut self, mut parameter: ParameterDescriptor) -> Self {
        parameter.sequence = self.parameters.len() as u32 + 1;
        self.parameters.push(parameter);
        self
    }

    /// Declares generic parameters.
    #[must_use]
    pub fn with_generic_parameters(mut self, names: &[&str]) -> Self {
        self.generic_parameters = names.iter().map(ToString::to_string).collect();
        self
    }

    /// Applies an attribute, by the full name of its type.
    #[must_use]
    pub fn with_attribute(mut self, full_name: &str) -> Self {
        self.custom_attributes.push(full_name.to_string());
        self
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.flags.contains(MethodFlags::STATIC)
    }

    #[must_use]
    pub fn has_generic_parameters(&self) -> bool {
        !self.generic_parameters.is_empty()
    }

    /// Returns `true` for property getters and setters.
    #[must_use]
    pub fn is_accessor(&self) -> bool {
        self.semantics
            .intersects(MethodSemantics::GETTER | MethodSemantics::SETTER)
    }

    /// Returns `true` if the method carries the compiler's extension-method marker.
    #[must_use]
    pub fn is_extension(&self) -> bool {
        self.custom_attributes
            .iter()
            .any(|attribute| attribute == EXTENSION_ATTRIBUTE)
    }

    /// The special role of the method.
    ///
    /// Constructor names win over accessor semantics; a getter that is also marked as setter
    /// counts as getter.
    #[must_use]
    pub fn role(&self) -> MethodRole {
        match self.name.as_str() {
            ".ctor" => MethodRole::Constructor,
            ".cctor" => MethodRole::StaticConstructor,
            _ if self.semantics.contains(MethodSemantics::GETTER) => MethodRole::Getter,
            _ if self.semantics.contains(MethodSemantics::SETTER) => MethodRole::Setter,
            _ => MethodRole::None,
        }
    }
}

/// A declared parameter of a method.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    /// Declared name, empty when the metadata has none
    pub name: String,
    /// Declared type; by-reference parameters have a `T&` type
    pub parameter_type: Arc<TypeDescriptor>,
    /// `ParamAttributes`
    pub flags: ParameterFlags,
    /// 1-based position in the signature
    pub sequence: u32,
}

impl ParameterDescriptor {
    #[must_use]
    pub fn new(name: &str, parameter_type: Arc<TypeDescriptor>) -> Self {
        ParameterDescriptor {
            name: name.to_string(),
            parameter_type,
            flags: ParameterFlags::empty(),
            sequence: 0,
        }
    }

    /// Marks the parameter as `out`.
    #[must_use]
    pub fn out(mut self) -> Self {
        self.flags |= ParameterFlags::OUT;
        self
    }

    #[must_use]
    pub fn is_out(&self) -> bool {
        self.flags.contains(ParameterFlags::OUT)
    }
}

/// A property and its accessors.
///
/// The accessors are shared with the method list of the declaring type.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    /// Simple name
    pub name: String,
    /// `get` accessor
    pub getter: Option<Arc<MethodDescriptor>>,
    /// `set` accessor
    pub setter: Option<Arc<MethodDescriptor>>,
}

impl PropertyDescriptor {
    #[must_use]
    pub fn new(
        name: &str,
        getter: Option<Arc<MethodDescriptor>>,
        setter: Option<Arc<MethodDescriptor>>,
    ) -> Self {
        PropertyDescriptor {
            name: name.to_string(),
            getter,
            setter,
        }
    }

    /// The accessors in emission order, getter first.
    pub fn accessors(&self) -> impl Iterator<Item = &Arc<MethodDescriptor>> {
        self.getter.iter().chain(self.setter.iter())
    }
}
