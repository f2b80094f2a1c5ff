use std::{fmt, sync::Arc};

use strum::{AsRefStr, Display, EnumIter};

use crate::{
    model::{MethodDescriptor, MethodRole, ParameterDescriptor, PropertyDescriptor, TypeDescriptor},
    report::Markup,
    stubs::{sanitize_identifier, TypeNameNormalizer},
};

/// The three interception points a stub can be written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, AsRefStr)]
pub enum PatchKind {
    /// Runs before the original
    Prefix,
    /// Runs before the original and decides whether it still runs
    Replacement,
    /// Runs after the original
    Postfix,
}

impl PatchKind {
    /// Column title of the kind in reports.
    #[must_use]
    pub fn column_title(self) -> &'static str {
        match self {
            PatchKind::Prefix => "Before",
            PatchKind::Replacement => "Replace",
            PatchKind::Postfix => "After",
        }
    }

    fn hook_attribute(self) -> &'static str {
        match self {
            PatchKind::Prefix | PatchKind::Replacement => "[HarmonyPrefix]",
            PatchKind::Postfix => "[HarmonyPostfix]",
        }
    }

    fn return_type(self) -> &'static str {
        match self {
            PatchKind::Prefix | PatchKind::Postfix => "void",
            PatchKind::Replacement => "bool",
        }
    }
}

/// The source text of one stub, as lines without line terminators.
///
/// Body lines carry their indentation as leading spaces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StubText {
    lines: Vec<String>,
}

impl StubText {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl fmt::Display for StubText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// The prefix, replacement and postfix stubs of one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubTriple {
    pub prefix: StubText,
    pub replacement: StubText,
    pub postfix: StubText,
}

impl StubTriple {
    #[must_use]
    pub fn get(&self, kind: PatchKind) -> &StubText {
        match kind {
            PatchKind::Prefix => &self.prefix,
            PatchKind::Replacement => &self.replacement,
            PatchKind::Postfix => &self.postfix,
        }
    }

    /// The stubs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (PatchKind, &StubText)> {
        [
            (PatchKind::Prefix, &self.prefix),
            (PatchKind::Replacement, &self.replacement),
            (PatchKind::Postfix, &self.postfix),
        ]
        .into_iter()
    }
}

/// The member a stub is written for.
#[derive(Debug, Clone, Copy)]
pub struct StubRequest<'a> {
    /// The method to intercept
    pub method: &'a Arc<MethodDescriptor>,
    /// The type declaring `method`
    pub owner: &'a TypeDescriptor,
    /// Treat the first parameter as the extended instance
    pub is_extension: bool,
    /// The property `method` is an accessor of
    pub property: Option<&'a PropertyDescriptor>,
}

impl<'a> StubRequest<'a> {
    /// A request for an ordinary method.
    #[must_use]
    pub fn method(method: &'a Arc<MethodDescriptor>, owner: &'a TypeDescriptor) -> Self {
        StubRequest {
            method,
            owner,
            is_extension: method.is_extension(),
            property: None,
        }
    }

    /// A request for an accessor of `property`.
    #[must_use]
    pub fn accessor(
        method: &'a Arc<MethodDescriptor>,
        owner: &'a TypeDescriptor,
        property: &'a PropertyDescriptor,
    ) -> Self {
        StubRequest {
            method,
            owner,
            is_extension: method.is_extension(),
            property: Some(property),
        }
    }
}

/// Name of the method as the patch attribute and stub name spell it.
fn member_name(method: &MethodDescriptor) -> &str {
    match method.role() {
        MethodRole::Constructor => "Constructor",
        MethodRole::StaticConstructor => "StaticConstructor",
        _ => &method.name,
    }
}

/// `Getter` or `Setter`, depending on which accessor of `property` the method is.
fn accessor_role(property: &PropertyDescriptor, method: &Arc<MethodDescriptor>) -> Option<&'static str> {
    if property.getter.as_ref().is_some_and(|getter| Arc::ptr_eq(getter, method)) {
        Some("Getter")
    } else if property.setter.as_ref().is_some_and(|setter| Arc::ptr_eq(setter, method)) {
        Some("Setter")
    } else {
        None
    }
}

fn parameter_name(markup: Markup, parameter: &ParameterDescriptor) -> String {
    let sanitized = sanitize_identifier(&parameter.name);
    markup.escape(&sanitized).into_owned()
}

/// `[out ]<type> <name>`
fn declared_parameter(
    normalizer: &mut TypeNameNormalizer<'_>,
    parameter: &ParameterDescriptor,
) -> String {
    let type_name = normalizer.normalize(&parameter.parameter_type);
    let name = parameter_name(normalizer.markup(), parameter);

    if parameter.is_out() {
        format!("out {type_name} {name}")
    } else {
        format!("{type_name} {name}")
    }
}

/// `[static ]<ret> <Owner>.<Name>(<params>)`
fn friendly_signature(
    normalizer: &mut TypeNameNormalizer<'_>,
    request: &StubRequest<'_>,
    member: &str,
) -> String {
    let method = request.method;

    let mut parameters = method
        .parameters
        .iter()
        .map(|parameter| declared_parameter(normalizer, parameter))
        .collect::<Vec<_>>();

    if request.is_extension {
        if let Some(first) = parameters.first_mut() {
            first.insert_str(0, "this ");
        }
    }

    let modifier = if method.is_static() { "static " } else { "" };
    let return_type = normalizer.normalize(&method.return_type);
    let owner = normalizer.normalize(request.owner);

    format!(
        "{modifier}{return_type} {owner}.{member}({})",
        parameters.join(", ")
    )
}

/// Writes the stub of `kind` for the requested member.
///
/// Every type name that appears in the stub goes through `normalizer`, which records it.
pub fn synthesize(
    normalizer: &mut TypeNameNormalizer<'_>,
    request: &StubRequest<'_>,
    kind: PatchKind,
) -> StubText {
    let markup = normalizer.markup();
    let method = request.method;
    let replacement = kind == PatchKind::Replacement;

    let mut parameters = Vec::new();
    let mut parameter_types = Vec::new();

    let return_type = normalizer.normalize(&method.return_type);
    if replacement && return_type != "void" {
        parameters.push(format!("ref {return_type} __result"));
    }

    if !method.is_static() {
        parameters.push(format!("{} __instance", normalizer.normalize(request.owner)));
    }

    for (index, parameter) in method.parameters.iter().enumerate() {
        let type_name = normalizer.normalize(&parameter.parameter_type);

        if replacement && !(request.is_extension && index == 0) {
            // `out` is dropped here, `ref out` does not compile
            let name = parameter_name(markup, parameter);
            parameters.push(format!("ref {type_name} {name}"));
        } else {
            parameters.push(declared_parameter(normalizer, parameter));
        }

        parameter_types.push(format!("typeof({type_name})"));
    }

    let member = markup.escape(member_name(method)).into_owned();
    let mut stub_name = format!("{member}{kind}");

    let mut lines = Vec::with_capacity(9);
    lines.push(format!(
        "[HarmonyPatch(typeof({}))]",
        markup.escape(&request.owner.full_name)
    ));

    if method.role() == MethodRole::Constructor {
        lines.push("[HarmonyPatch(MethodType.Constructor)]".to_string());
    } else if let Some(property) = request.property {
        if let Some(role) = accessor_role(property, method) {
            let property_name = markup.escape(&property.name);
            lines.push(format!(
                "[HarmonyPatch(\"{property_name}\", MethodType.{role})]"
            ));
            stub_name = format!("{property_name}{role}{kind}");
        }
    } else {
        lines.push(format!("[HarmonyPatch(\"{member}\")]"));
    }

    if !parameter_types.is_empty() {
        lines.push(format!(
            "[HarmonyPatch(new Type[] {{ {} }})]",
            parameter_types.join(", ")
        ));
    }

    lines.push(kind.hook_attribute().to_string());
    lines.push(format!(
        "private static {} {stub_name}({})",
        kind.return_type(),
        parameters.join(", ")
    ));
    lines.push("{".to_string());
    lines.push(format!(
        "    Logger.LogInfo(\"Autogenerated {} stub for {}\");",
        kind.as_ref().to_lowercase(),
        friendly_signature(normalizer, request, &member)
    ));
    if replacement {
        lines.push("    return true; // Run the original method.".to_string());
    }
    lines.push("}".to_string());

    StubText { lines }
}

/// Writes all three stubs for the requested member.
pub fn synthesize_triple(
    normalizer: &mut TypeNameNormalizer<'_>,
    request: &StubRequest<'_>,
) -> StubTriple {
    StubTriple {
        prefix: synthesize(normalizer, request, PatchKind::Prefix),
        replacement: synthesize(normalizer, request, PatchKind::Replacement),
        postfix: synthesize(normalizer, request, PatchKind::Postfix),
    }
}
