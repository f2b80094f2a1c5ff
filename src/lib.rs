// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![warn(missing_docs)]

//! # harmonygen
//!
//! Generates [Harmony](https://github.com/pardeike/Harmony) patch stubs from the metadata of
//! .NET assemblies. For every method and property accessor of the selected types, three
//! templates are written: a prefix that runs before the original, a replacement that may take
//! its place, and a postfix that runs after it. The templates are meant to be pasted into a
//! mod and filled in; nothing is patched at runtime.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use harmonygen::prelude::*;
//! use std::{fs::File, io::BufWriter, path::Path};
//!
//! let module = CilModule::from_file(Path::new("Assembly-CSharp.dll"))?;
//! let filter = TypeFilter::new(["PlayerController"]);
//! let mut registry = TypeRegistry::new();
//!
//! let mut report = HtmlReport::new(BufWriter::new(File::create("output.html")?))?;
//! let rows = generate(&module, &filter, &mut registry, report.markup());
//! report.write_module(module.name(), &rows)?;
//! report.finish()?;
//! # Ok::<(), harmonygen::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`metadata`] - reads a managed PE image into the descriptor model
//! - [`model`] - types, methods, parameters and properties as the generator sees them
//! - [`stubs`] - the generator: name normalization, stub synthesis and member selection
//! - [`report`] - HTML and text report emitters, the library list
//! - [`prelude`] - re-exports of the commonly used types
//!
//! Reading a module is the only fallible step. Once a [`CilModule`] is loaded, generating
//! stubs is a deterministic walk over its types that cannot fail.
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use harmonygen::{CilModule, Error};
//! use std::path::Path;
//!
//! match CilModule::from_file(Path::new("Assembly-CSharp.dll")) {
//!     Ok(module) => println!("{} root types", module.types().len()),
//!     Err(Error::NotSupported) => println!("Uncompressed metadata is not supported"),
//!     Err(Error::Malformed { message, .. }) => println!("Malformed file: {}", message),
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```

#[macro_use]
pub(crate) mod error;
pub(crate) mod file;

/// Shared functionality which is used in unit-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust,no_run
/// use harmonygen::prelude::*;
///
/// let module = CilModule::from_file("Assembly-CSharp.dll".as_ref())?;
/// let mut registry = TypeRegistry::new();
/// let rows = generate(&module, &TypeFilter::default(), &mut registry, Markup::Html);
/// println!("{} rows, {} types seen", rows.len(), registry.len());
/// # Ok::<(), harmonygen::Error>(())
/// ```
pub mod prelude;

/// Reading of ECMA-335 metadata: headers, streams, tables, signatures and the module reader.
pub mod metadata;

/// The descriptor model the stub generator works on.
///
/// Descriptors are plain values. [`metadata::reader::CilModule`] builds them from an
/// assembly; tests and tools can also assemble them by hand with the builder methods.
pub mod model;

/// Report documents and the library list.
pub mod report;

/// Stub generation.
pub mod stubs;

pub use error::Error;
pub use file::{parser::Parser, File};
pub use metadata::reader::CilModule;

/// `Result<T, Error>`
///
/// # Example
///
/// ```rust,no_run
/// fn load(path: &std::path::Path) -> harmonygen::Result<harmonygen::CilModule> {
///     harmonygen::CilModule::from_file(path)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Generates the report rows of every type in `module` that `filter` selects.
///
/// Every type the walk encounters, selected or not, is recorded in `registry`; pass the same
/// registry for all modules of a run to get one listing. Names are escaped for `markup`.
#[must_use]
pub fn generate(
    module: &CilModule,
    filter: &stubs::TypeFilter,
    registry: &mut model::TypeRegistry,
    markup: report::Markup,
) -> Vec<stubs::ReportRow> {
    stubs::select_and_emit(module.types(), filter, registry, markup)
}
