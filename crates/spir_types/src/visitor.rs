use crate::*;

/// Visitor for traversing the nodes of a type tree.
///
/// The visitor is used with [`ParamType::accept`], which dispatches to the
/// method matching the kind of the node. Composite nodes are not traversed
/// automatically; implementations decide whether and when to visit children,
/// usually by calling [`ParamType::accept`] on them in turn.
pub trait TypeVisitor {
    /// Defines the error which can be raised while visiting a node.
    type Error;

    fn visit_primitive(&mut self, prim: Primitive) -> Result<(), Self::Error>;

    fn visit_pointer(&mut self, ptr: &PointerType) -> Result<(), Self::Error>;

    fn visit_vector(&mut self, vec: &VectorType) -> Result<(), Self::Error>;

    fn visit_atomic(&mut self, atomic: &AtomicType) -> Result<(), Self::Error>;

    fn visit_block(&mut self, block: &BlockType) -> Result<(), Self::Error>;

    fn visit_user_defined(&mut self, ty: &UserDefinedType) -> Result<(), Self::Error>;
}

impl ParamType {
    /// Dispatches the node to the matching method on the given visitor.
    pub fn accept<V: TypeVisitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error> {
        match self {
            ParamType::Primitive(prim) => visitor.visit_primitive(*prim),
            ParamType::Pointer(ptr) => visitor.visit_pointer(ptr),
            ParamType::Vector(vec) => visitor.visit_vector(vec),
            ParamType::Atomic(atomic) => visitor.visit_atomic(atomic),
            ParamType::Block(block) => visitor.visit_block(block),
            ParamType::UserDefined(ty) => visitor.visit_user_defined(ty),
        }
    }
}
