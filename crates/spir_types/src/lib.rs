//! Type trees of OpenCL C function signatures, as consumed by the SPIR name
//! mangler.
//!
//! A signature is described by a [`FunctionDescriptor`], which holds the name
//! of the function and one [`ParamType`] tree per parameter. Every node in a
//! tree renders into its readable OpenCL C spelling via [`std::fmt::Display`],
//! which [`parse::SignatureParser`] accepts back.

pub mod attribute;
pub mod descriptor;
pub mod errors;
pub mod parse;
pub mod primitive;
pub mod source;
pub mod version;
pub mod visitor;

pub use attribute::{AddressSpace, Qualifiers};
pub use descriptor::FunctionDescriptor;
pub use primitive::Primitive;
pub use version::SpirVersion;
pub use visitor::TypeVisitor;

/// A single node within a type tree.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    Primitive(Primitive),
    Pointer(PointerType),
    Vector(VectorType),
    Atomic(AtomicType),
    Block(BlockType),
    UserDefined(UserDefinedType),
}

impl ParamType {
    /// Creates a pointer into the private address space, without qualifiers.
    pub fn pointer_to(pointee: ParamType) -> ParamType {
        ParamType::Pointer(PointerType::new(pointee))
    }

    /// Creates a vector with the given element type and length.
    pub fn vector_of(scalar: ParamType, len: u32) -> ParamType {
        ParamType::Vector(VectorType::new(scalar, len))
    }

    /// Creates an atomic type of the given base type.
    pub fn atomic(base: ParamType) -> ParamType {
        ParamType::Atomic(AtomicType::new(base))
    }

    /// Creates a block type with the given parameters.
    pub fn block(params: impl IntoIterator<Item = ParamType>) -> ParamType {
        ParamType::Block(BlockType::new(params))
    }

    /// Creates an opaque, user-defined type with the given name.
    pub fn user_defined(name: impl Into<String>) -> ParamType {
        ParamType::UserDefined(UserDefinedType::new(name))
    }
}

impl From<Primitive> for ParamType {
    fn from(value: Primitive) -> Self {
        ParamType::Primitive(value)
    }
}

impl From<PointerType> for ParamType {
    fn from(value: PointerType) -> Self {
        ParamType::Pointer(value)
    }
}

impl From<VectorType> for ParamType {
    fn from(value: VectorType) -> Self {
        ParamType::Vector(value)
    }
}

impl From<AtomicType> for ParamType {
    fn from(value: AtomicType) -> Self {
        ParamType::Atomic(value)
    }
}

impl From<BlockType> for ParamType {
    fn from(value: BlockType) -> Self {
        ParamType::Block(value)
    }
}

impl From<UserDefinedType> for ParamType {
    fn from(value: UserDefinedType) -> Self {
        ParamType::UserDefined(value)
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamType::Primitive(prim) => write!(f, "{prim}"),
            ParamType::Pointer(ptr) => write!(f, "{ptr}"),
            ParamType::Vector(vec) => write!(f, "{vec}"),
            ParamType::Atomic(atomic) => write!(f, "{atomic}"),
            ParamType::Block(block) => write!(f, "{block}"),
            ParamType::UserDefined(ty) => write!(f, "{ty}"),
        }
    }
}

/// A pointer to some other type, along with the qualifiers and address space
/// of the pointer.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub struct PointerType {
    pointee: Box<ParamType>,
    qualifiers: Qualifiers,
    address_space: AddressSpace,
}

impl PointerType {
    pub fn new(pointee: ParamType) -> Self {
        Self {
            pointee: Box::new(pointee),
            qualifiers: Qualifiers::empty(),
            address_space: AddressSpace::Private,
        }
    }

    /// Adds the given qualifiers to the pointer.
    #[must_use]
    pub fn with_qualifiers(mut self, qualifiers: Qualifiers) -> Self {
        self.qualifiers |= qualifiers;
        self
    }

    /// Moves the pointer into the given address space.
    #[must_use]
    pub fn with_address_space(mut self, address_space: AddressSpace) -> Self {
        self.address_space = address_space;
        self
    }

    pub fn pointee(&self) -> &ParamType {
        &self.pointee
    }

    pub fn qualifiers(&self) -> Qualifiers {
        self.qualifiers
    }

    /// Determines whether all the given qualifiers are present on the pointer.
    pub fn has_qualifier(&self, qualifier: Qualifiers) -> bool {
        self.qualifiers.contains(qualifier)
    }

    pub fn address_space(&self) -> AddressSpace {
        self.address_space
    }
}

impl std::fmt::Display for PointerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for qualifier in self.qualifiers.readable() {
            write!(f, "{qualifier} ")?;
        }

        write!(f, "{} {} *", self.address_space, self.pointee)
    }
}

/// A fixed-length vector of some scalar type.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub struct VectorType {
    scalar: Box<ParamType>,
    len: u32,
}

impl VectorType {
    pub fn new(scalar: ParamType, len: u32) -> Self {
        Self {
            scalar: Box::new(scalar),
            len,
        }
    }

    pub fn scalar(&self) -> &ParamType {
        &self.scalar
    }

    pub fn len(&self) -> u32 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl std::fmt::Display for VectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.scalar, self.len)
    }
}

#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub struct AtomicType {
    base: Box<ParamType>,
}

impl AtomicType {
    pub fn new(base: ParamType) -> Self {
        Self { base: Box::new(base) }
    }

    pub fn base(&self) -> &ParamType {
        &self.base
    }
}

impl std::fmt::Display for AtomicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "atomic_{}", self.base)
    }
}

/// A block (closure) type. Blocks always return `void`, so only the
/// parameters are stored.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub struct BlockType {
    params: Vec<ParamType>,
}

impl BlockType {
    pub fn new(params: impl IntoIterator<Item = ParamType>) -> Self {
        Self {
            params: params.into_iter().collect(),
        }
    }

    pub fn params(&self) -> &[ParamType] {
        &self.params
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("void (^)(")?;

        for (idx, param) in self.params.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }

            write!(f, "{param}")?;
        }

        f.write_str(")")
    }
}

/// An opaque type, which is referred to only by name.
#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub struct UserDefinedType {
    name: String,
}

impl UserDefinedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for UserDefinedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
