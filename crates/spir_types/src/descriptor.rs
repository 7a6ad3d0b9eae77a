use std::str::FromStr;

use crate::ParamType;

/// Describes the signature of a single function, which is the input of the
/// name mangler.
///
/// A descriptor with neither a name nor any parameters is the "null"
/// descriptor, which is used to signal that there is no function to mangle.
#[derive(Hash, Default, Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// Defines the unmangled name of the function.
    pub name: String,

    /// Defines the types of all parameters, in the order they're declared.
    pub parameters: Vec<ParamType>,
}

impl FunctionDescriptor {
    /// Rendering of the null descriptor.
    pub const NULL_STRING: &'static str = "<invalid>";

    /// Creates a new descriptor with the given name and parameters.
    pub fn new(name: impl Into<String>, parameters: impl IntoIterator<Item = ParamType>) -> Self {
        Self {
            name: name.into(),
            parameters: parameters.into_iter().collect(),
        }
    }

    /// Creates the null descriptor.
    pub fn null() -> Self {
        Self::default()
    }

    /// Determines whether the descriptor is the null descriptor.
    pub fn is_null(&self) -> bool {
        self.name.is_empty() && self.parameters.is_empty()
    }
}

impl std::fmt::Display for FunctionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return f.write_str(FunctionDescriptor::NULL_STRING);
        }

        write!(f, "{}(", self.name)?;

        for (idx, param) in self.parameters.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{param}")?;
        }

        f.write_str(")")
    }
}

impl FromStr for FunctionDescriptor {
    type Err = error_snippet::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_signature(s)
    }
}

impl FromStr for ParamType {
    type Err = error_snippet::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parse::parse_type(s)
    }
}
