use log::trace;

use crate::{
    model::{TypeDescriptor, TypeRegistry},
    report::Markup,
    stubs::{synthesize_triple, StubRequest, StubTriple, TypeNameNormalizer},
};

/// Case-insensitive substring filter over type full names.
///
/// An empty filter matches every type.
#[derive(Debug, Clone, Default)]
pub struct TypeFilter {
    terms: Vec<String>,
    folded: Vec<String>,
}

impl TypeFilter {
    /// Builds a filter from the terms given on the command line.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|term| term.as_ref().to_string())
            .collect::<Vec<_>>();
        let folded = terms.iter().map(|term| term.to_lowercase()).collect();

        TypeFilter { terms, folded }
    }

    /// The filter terms as given.
    #[must_use]
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns `true` if `full_name` contains any term, ignoring case.
    #[must_use]
    pub fn matches(&self, full_name: &str) -> bool {
        if self.folded.is_empty() {
            return true;
        }

        let full_name = full_name.to_lowercase();
        self.folded.iter().any(|term| full_name.contains(term.as_str()))
    }
}

/// One row of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportRow {
    /// Starts the section of a type; holds its display name
    Header(String),
    /// The stubs of one member
    Stubs(StubTriple),
}

struct MemberSelector<'f, 'r> {
    filter: &'f TypeFilter,
    normalizer: TypeNameNormalizer<'r>,
    rows: Vec<ReportRow>,
}

impl MemberSelector<'_, '_> {
    fn visit(&mut self, ty: &TypeDescriptor, depth: usize) {
        self.normalizer.record(ty);

        // Nested types of a generic type are not visited either.
        if ty.has_generic_parameters() {
            trace!("{:depth$}skip generic {}", "", ty.full_name);
            return;
        }

        if self.filter.matches(&ty.full_name) {
            trace!("{:depth$}emit {}", "", ty.full_name);
            self.emit(ty);
        } else {
            trace!("{:depth$}visit {}", "", ty.full_name);
        }

        for nested in &ty.nested_types {
            self.visit(nested, depth + 1);
        }
    }

    fn emit(&mut self, ty: &TypeDescriptor) {
        let header = self.normalizer.normalize(ty);
        self.rows.push(ReportRow::Header(header));

        for method in &ty.methods {
            if method.has_generic_parameters() || method.is_accessor() {
                continue;
            }

            let request = StubRequest::method(method, ty);
            let stubs = synthesize_triple(&mut self.normalizer, &request);
            self.rows.push(ReportRow::Stubs(stubs));
        }

        for property in &ty.properties {
            for accessor in property.accessors() {
                let request = StubRequest::accessor(accessor, ty, property);
                let stubs = synthesize_triple(&mut self.normalizer, &request);
                self.rows.push(ReportRow::Stubs(stubs));
            }
        }
    }
}

/// Walks `root_types` depth-first and returns the report rows of every type matching
/// `filter`, in traversal order.
///
/// Every visited type is recorded in `registry`, whether it matches or not. Types with
/// generic parameters produce no rows and their nested types are not visited. Within a
/// matching type, methods come first in declaration order (skipping generic methods and
/// property accessors), followed by the getter and setter of each property.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use harmonygen::prelude::*;
///
/// let int = Arc::new(TypeDescriptor::system("Int32"));
/// let compute = MethodDescriptor::new("Compute", int.clone())
///     .with_flags(MethodFlags::STATIC)
///     .with_parameter(ParameterDescriptor::new("x", int));
/// let types = [TypeDescriptor::new("N", "C").with_method(Arc::new(compute))];
///
/// let mut registry = TypeRegistry::new();
/// let rows = select_and_emit(&types, &TypeFilter::default(), &mut registry, Markup::Html);
///
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0], ReportRow::Header("N.C".to_string()));
/// ```
pub fn select_and_emit(
    root_types: &[TypeDescriptor],
    filter: &TypeFilter,
    registry: &mut TypeRegistry,
    markup: Markup,
) -> Vec<ReportRow> {
    let mut selector = MemberSelector {
        filter,
        normalizer: TypeNameNormalizer::new(registry, markup),
        rows: Vec::new(),
    };

    for ty in root_types {
        selector.visit(ty, 0);
    }

    selector.rows
}
