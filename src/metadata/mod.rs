//! .NET metadata reading.
//!
//! This module contains everything needed to get from the bytes of a managed PE image to the
//! descriptor model in [`crate::model`]: the CLI header, the metadata root, the `#~`,
//! `#Strings` and `#Blob` streams, the subset of tables the stub generator consumes, and
//! signature blob decoding.
//!
//! # Key Components
//!
//! - [`reader`] - [`reader::CilModule`], the module loader that builds type descriptors
//! - [`cor20header`] - The CLI header located through the PE data directories
//! - [`root`] - The metadata root and its stream directory
//! - [`streams`] - The heaps and the tables stream header
//! - [`tables`] - Raw rows of the tables the reader consumes
//! - [`signatures`] - Method, property and type specification signatures
//! - [`token`] - Metadata tokens
//!
//! # Examples
//!
//! ```rust,no_run
//! use harmonygen::metadata::reader::CilModule;
//! use std::path::Path;
//!
//! let module = CilModule::from_file(Path::new("Assembly-CSharp.dll"))?;
//! println!("Module: {}", module.name());
//! println!("Types: {}", module.types().len());
//! # Ok::<(), harmonygen::Error>(())
//! ```

/// Implementation of the Header of CIL
pub mod cor20header;
/// Loads modules into type descriptors
pub mod reader;
/// Implementation of the root metadata structure
pub mod root;
/// Implementation of method and type signatures
pub mod signatures;
/// Implementation of the metadata streams
pub mod streams;
/// Implementation of the metadata tables
pub mod tables;
/// Metadata tokens
pub mod token;
