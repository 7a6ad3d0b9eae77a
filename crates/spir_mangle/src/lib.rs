//! Mangles OpenCL C function signatures into the SPIR flavour of the Itanium
//! C++ name mangling scheme.
//!
//! ```
//! use spir_mangle::NameMangler;
//! use spir_types::{FunctionDescriptor, SpirVersion};
//!
//! let desc: FunctionDescriptor = "vload4(ulong, const __global float *)".parse().unwrap();
//! let mangled = NameMangler::new(SpirVersion::Spir20).mangle(&desc).unwrap();
//!
//! assert_eq!(mangled, "_Z6vload4mPKU3AS1f");
//! ```

pub mod errors;
pub mod visitor;

pub use errors::{MangleError, MangleErrorKind};
use spir_types::{FunctionDescriptor, SpirVersion};

use crate::visitor::MangleVisitor;

/// Prefix of all mangled names.
pub const MANGLED_PREFIX: &str = "_Z";

/// Mangles function descriptors for a single SPIR version.
///
/// The mangler holds no state between calls; each call to
/// [`NameMangler::mangle`] starts with an empty substitution table.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameMangler {
    version: SpirVersion,
}

impl NameMangler {
    pub fn new(version: SpirVersion) -> Self {
        Self { version }
    }

    /// Gets the SPIR version which names are mangled for.
    pub fn version(&self) -> SpirVersion {
        self.version
    }

    /// Mangles the given function descriptor into its symbol name.
    ///
    /// A function without any parameters is mangled without a parameter list,
    /// so `barrier()` is mangled into `_Z7barrier`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the descriptor is the null descriptor, or if any of its
    /// parameters cannot be encoded in the SPIR version of the mangler. In the
    /// latter case, the first offending parameter is reported.
    #[tracing::instrument(level = "DEBUG", skip_all, fields(version = %self.version))]
    pub fn mangle(&self, desc: &FunctionDescriptor) -> Result<String, MangleError> {
        if desc.is_null() {
            return Err(MangleError::NullDescriptor);
        }

        let mut mangled = format!("{MANGLED_PREFIX}{}{}", desc.name.len(), desc.name);
        let mut visitor = MangleVisitor::new(self.version, &mut mangled);

        for param in &desc.parameters {
            if let Err(err) = param.accept(&mut visitor) {
                tracing::debug!(target: "spir_mangle", node = %err.node, "unsupported type in {desc}");

                return Err(MangleError::TypeNotSupported {
                    ty: param.to_string(),
                    version: self.version,
                });
            }
        }

        tracing::debug!(target: "spir_mangle", "mangled {desc} into {mangled}");

        Ok(mangled)
    }
}

/// Mangles the given function descriptor for the given SPIR version.
///
/// # Errors
///
/// See [`NameMangler::mangle`].
pub fn mangle(version: SpirVersion, desc: &FunctionDescriptor) -> Result<String, MangleError> {
    NameMangler::new(version).mangle(desc)
}
