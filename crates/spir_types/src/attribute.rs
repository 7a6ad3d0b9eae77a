use crate::SpirVersion;

bitflags::bitflags! {
    /// Set of type qualifiers which can be attached to a pointer.
    #[derive(Hash, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Qualifiers: u8 {
        const RESTRICT = 1 << 0;
        const VOLATILE = 1 << 1;
        const CONST = 1 << 2;
    }
}

/// Readable and mangled tokens of every qualifier.
///
/// Qualifiers are always rendered and mangled in this order, regardless of
/// the order they were declared in.
const QUALIFIER_TOKENS: [(Qualifiers, &str, &str); 3] = [
    (Qualifiers::RESTRICT, "restrict", "r"),
    (Qualifiers::VOLATILE, "volatile", "V"),
    (Qualifiers::CONST, "const", "K"),
];

impl Qualifiers {
    /// Attempts to find the qualifier with the given readable name.
    pub fn from_readable(name: &str) -> Option<Qualifiers> {
        QUALIFIER_TOKENS
            .iter()
            .find(|(_, readable, _)| *readable == name)
            .map(|(qual, _, _)| *qual)
    }

    /// Iterates over the readable names of all qualifiers in the set.
    pub fn readable(self) -> impl Iterator<Item = &'static str> {
        QUALIFIER_TOKENS
            .into_iter()
            .filter(move |(qual, _, _)| self.contains(*qual))
            .map(|(_, readable, _)| readable)
    }

    /// Iterates over the mangled tokens of all qualifiers in the set.
    pub fn mangled(self) -> impl Iterator<Item = &'static str> {
        QUALIFIER_TOKENS
            .into_iter()
            .filter(move |(qual, _, _)| self.contains(*qual))
            .map(|(_, _, mangled)| mangled)
    }
}

/// Defines which address space a pointer points into.
#[derive(Hash, Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AddressSpace {
    #[default]
    Private,
    Global,
    Constant,
    Local,
    Generic,
}

impl AddressSpace {
    pub const ALL: [AddressSpace; 5] = [
        AddressSpace::Private,
        AddressSpace::Global,
        AddressSpace::Constant,
        AddressSpace::Local,
        AddressSpace::Generic,
    ];

    /// Gets the readable name of the address space.
    pub fn readable(self) -> &'static str {
        match self {
            AddressSpace::Private => "__private",
            AddressSpace::Global => "__global",
            AddressSpace::Constant => "__constant",
            AddressSpace::Local => "__local",
            AddressSpace::Generic => "__generic",
        }
    }

    /// Gets the mangled token of the address space.
    ///
    /// The private address space is the default and has no token.
    pub fn mangled(self) -> &'static str {
        match self {
            AddressSpace::Private => "",
            AddressSpace::Global => "U3AS1",
            AddressSpace::Constant => "U3AS2",
            AddressSpace::Local => "U3AS3",
            AddressSpace::Generic => "U3AS4",
        }
    }

    /// Gets the first SPIR version which is able to encode the address space.
    pub fn since(self) -> SpirVersion {
        match self {
            AddressSpace::Generic => SpirVersion::Spir20,
            _ => SpirVersion::Spir12,
        }
    }

    /// Attempts to find the address space with the given readable name.
    pub fn from_readable(name: &str) -> Option<AddressSpace> {
        AddressSpace::ALL.into_iter().find(|space| space.readable() == name)
    }
}

impl std::fmt::Display for AddressSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.readable())
    }
}
