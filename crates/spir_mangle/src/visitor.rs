use std::collections::HashMap;

use spir_types::*;

/// Prefix of every back-reference to a previously mangled type.
pub const SUBSTITUTION_INDICATOR: char = 'S';

/// Suffix of every back-reference to a previously mangled type.
pub const SUBSTITUTION_TERMINATOR: char = '_';

/// Indicator for the start of a pointer type.
pub const POINTER_INDICATOR: &str = "P";

/// Indicator for the start of a vector type, followed by the length.
pub const VECTOR_INDICATOR: &str = "Dv";

/// Vendor-qualified prefix of atomic types.
pub const ATOMIC_PREFIX: &str = "U7_Atomic";

/// Vendor-qualified prefix of block types, up to and including the `void`
/// return type.
pub const BLOCK_PREFIX: &str = "U13block_pointerFv";

/// Parameter list of a block without parameters.
pub const BLOCK_EMPTY_PARAMS: &str = "v";

/// Terminator of a block type.
pub const BLOCK_TERMINATOR: &str = "E";

const SEQ_ID_DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Raised when a node cannot be encoded in the active SPIR version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unsupported {
    /// Rendering of the node which could not be encoded.
    pub node: String,
}

/// Appends the sequence ID of a back-reference to the given buffer, without
/// the surrounding indicator and terminator.
///
/// The first substitution has no ID at all, so the complete back-references
/// read `S_`, `S0_`, `S1_`, ..., `SZ_`, `S10_` and so on.
pub fn push_sequence_id(out: &mut String, seq_id: usize) {
    if seq_id == 0 {
        return;
    }

    if seq_id == 1 {
        out.push('0');
        return;
    }

    let mut rem = seq_id - 1;
    let mut digits = Vec::with_capacity(4);

    while rem != 0 {
        digits.push(SEQ_ID_DIGITS[rem % 36]);
        rem /= 36;
    }

    out.extend(digits.iter().rev().map(|digit| char::from(*digit)));
}

/// Mangles type trees into the shared output buffer of a single function.
///
/// Each visitor owns the substitution table of a single function. Pointer and
/// vector types are registered in the table once mangled, so later
/// occurrences of the same type can be replaced with a back-reference.
pub(crate) struct MangleVisitor<'out> {
    version: SpirVersion,

    /// Holds the mangled prototype of the function, so far.
    out: &'out mut String,

    /// Sequence ID of the next registered substitution.
    seq_id: usize,

    /// Maps mangled type fragments to their sequence ID.
    substitutions: HashMap<String, usize>,
}

impl<'out> MangleVisitor<'out> {
    pub(crate) fn new(version: SpirVersion, out: &'out mut String) -> Self {
        Self {
            version,
            out,
            seq_id: 0,
            substitutions: HashMap::new(),
        }
    }

    fn ensure_supported(&self, since: SpirVersion, node: impl std::fmt::Display) -> Result<(), Unsupported> {
        if self.version.supports(since) {
            Ok(())
        } else {
            Err(Unsupported { node: node.to_string() })
        }
    }

    /// Registers the given fragment with the next sequence ID. Registering an
    /// existing fragment replaces its previous ID.
    fn register_substitution(&mut self, fragment: String) {
        tracing::trace!(target: "spir_mangle", seq_id = self.seq_id, %fragment, "register substitution");

        self.substitutions.insert(fragment, self.seq_id);
        self.seq_id += 1;
    }

    /// Attempts to replace the composite type, which mangles into `candidate`
    /// before its inner type, with a back-reference.
    ///
    /// The candidate must already occur somewhere in the output. When the inner
    /// type renders as a primitive, its mangled token is appended to the
    /// candidate before looking it up, since builtin types are otherwise never
    /// substituted.
    ///
    /// Returns `true` if the back-reference was written to the output.
    fn mangle_substitution(&mut self, inner: &ParamType, candidate: &str) -> bool {
        if !self.out.contains(candidate) {
            return false;
        }

        let mut key = String::from(candidate);
        if let Some(token) = Primitive::mangled_from_readable(&inner.to_string()) {
            key.push_str(token);
        }

        let Some(&seq_id) = self.substitutions.get(&key) else {
            return false;
        };

        tracing::trace!(target: "spir_mangle", seq_id, %key, "substitution hit");

        self.out.push(SUBSTITUTION_INDICATOR);
        push_sequence_id(self.out, seq_id);
        self.out.push(SUBSTITUTION_TERMINATOR);

        true
    }
}

impl TypeVisitor for MangleVisitor<'_> {
    type Error = Unsupported;

    fn visit_primitive(&mut self, prim: Primitive) -> Result<(), Unsupported> {
        self.ensure_supported(prim.since(), prim)?;

        self.out.push_str(prim.mangled());

        Ok(())
    }

    fn visit_pointer(&mut self, ptr: &PointerType) -> Result<(), Unsupported> {
        self.ensure_supported(ptr.address_space().since(), ptr)?;

        let start = self.out.len();

        let mut candidate = String::from(POINTER_INDICATOR);
        candidate.extend(ptr.qualifiers().mangled());
        candidate.push_str(ptr.address_space().mangled());

        if self.mangle_substitution(ptr.pointee(), &candidate) {
            return Ok(());
        }

        self.out.push_str(&candidate);

        let pointee_start = self.out.len();
        ptr.pointee().accept(self)?;

        let full = format!("{POINTER_INDICATOR}{}", &self.out[pointee_start..]);

        // Both the bare pointer and the pointer with all of its attributes are
        // registered, in that order, unless the pointee was itself substituted.
        if !full.contains(SUBSTITUTION_INDICATOR) {
            let suffix = self.out[start..].to_string();

            self.register_substitution(full);
            self.register_substitution(suffix);
        }

        Ok(())
    }

    fn visit_vector(&mut self, vec: &VectorType) -> Result<(), Unsupported> {
        let start = self.out.len();
        let candidate = format!("{VECTOR_INDICATOR}{}_", vec.len());

        if self.mangle_substitution(vec.scalar(), &candidate) {
            return Ok(());
        }

        self.out.push_str(&candidate);
        vec.scalar().accept(self)?;

        let fragment = self.out[start..].to_string();
        self.register_substitution(fragment);

        Ok(())
    }

    fn visit_atomic(&mut self, atomic: &AtomicType) -> Result<(), Unsupported> {
        self.ensure_supported(SpirVersion::Spir20, atomic)?;

        self.out.push_str(ATOMIC_PREFIX);

        atomic.base().accept(self)
    }

    fn visit_block(&mut self, block: &BlockType) -> Result<(), Unsupported> {
        self.ensure_supported(SpirVersion::Spir20, block)?;

        self.out.push_str(BLOCK_PREFIX);

        if block.params().is_empty() {
            self.out.push_str(BLOCK_EMPTY_PARAMS);
        } else {
            for param in block.params() {
                param.accept(self)?;
            }
        }

        self.out.push_str(BLOCK_TERMINATOR);

        Ok(())
    }

    fn visit_user_defined(&mut self, ty: &UserDefinedType) -> Result<(), Unsupported> {
        let name = ty.name();

        self.out.push_str(&name.len().to_string());
        self.out.push_str(name);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(seq_id: usize) -> String {
        let mut out = String::new();
        push_sequence_id(&mut out, seq_id);

        out
    }

    fn mangle_types(version: SpirVersion, types: &[ParamType]) -> Result<String, Unsupported> {
        let mut out = String::new();
        let mut visitor = MangleVisitor::new(version, &mut out);

        for ty in types {
            ty.accept(&mut visitor)?;
        }

        Ok(out)
    }

    fn global(pointee: ParamType) -> ParamType {
        PointerType::new(pointee)
            .with_address_space(AddressSpace::Global)
            .into()
    }

    #[test]
    fn test_sequence_ids() {
        assert_eq!(seq(0), "");
        assert_eq!(seq(1), "0");
        assert_eq!(seq(2), "1");
        assert_eq!(seq(10), "9");
        assert_eq!(seq(11), "A");
        assert_eq!(seq(36), "Z");
        assert_eq!(seq(37), "10");
        assert_eq!(seq(36 * 36 + 1), "100");
    }

    #[test]
    fn test_primitive() {
        let out = mangle_types(SpirVersion::Spir20, &[Primitive::Half.into(), Primitive::UInt.into()]);

        assert_eq!(out.as_deref(), Ok("Dhj"));
    }

    #[test]
    fn test_pointer_registers_bare_then_full() {
        let mut out = String::new();
        let mut visitor = MangleVisitor::new(SpirVersion::Spir20, &mut out);

        let ptr = PointerType::new(Primitive::Float.into())
            .with_qualifiers(Qualifiers::CONST)
            .with_address_space(AddressSpace::Global);

        ParamType::from(ptr).accept(&mut visitor).unwrap();

        assert_eq!(visitor.substitutions.get("Pf"), Some(&0));
        assert_eq!(visitor.substitutions.get("PKU3AS1f"), Some(&1));
        assert_eq!(visitor.seq_id, 2);
        assert_eq!(out, "PKU3AS1f");
    }

    #[test]
    fn test_private_pointer_reuses_fragment() {
        let mut out = String::new();
        let mut visitor = MangleVisitor::new(SpirVersion::Spir20, &mut out);

        ParamType::pointer_to(Primitive::Int.into())
            .accept(&mut visitor)
            .unwrap();

        // The bare and full fragments are equal for private pointers without
        // qualifiers, so the second registration replaces the first.
        assert_eq!(visitor.substitutions.len(), 1);
        assert_eq!(visitor.substitutions.get("Pi"), Some(&1));
        assert_eq!(visitor.seq_id, 2);
    }

    #[test]
    fn test_pointer_substitution_widens_primitive_pointee() {
        let int_ptr = global(Primitive::Int.into());
        let out = mangle_types(SpirVersion::Spir20, &[int_ptr.clone(), int_ptr]);

        assert_eq!(out.as_deref(), Ok("PU3AS1iS0_"));
    }

    #[test]
    fn test_pointer_substitution_requires_same_pointee() {
        let float_ptr = global(Primitive::Float.into());
        let int_ptr = global(Primitive::Int.into());

        let out = mangle_types(SpirVersion::Spir20, &[float_ptr.clone(), int_ptr, float_ptr]);

        assert_eq!(out.as_deref(), Ok("PU3AS1fPU3AS1iS0_"));
    }

    #[test]
    fn test_pointer_to_substituted_pointee_is_not_registered() {
        let ptr_ptr = ParamType::pointer_to(ParamType::pointer_to(Primitive::Int.into()));

        let mut out = String::new();
        let mut visitor = MangleVisitor::new(SpirVersion::Spir20, &mut out);

        ptr_ptr.accept(&mut visitor).unwrap();
        assert_eq!(visitor.seq_id, 4);

        ptr_ptr.accept(&mut visitor).unwrap();
        assert_eq!(visitor.seq_id, 4);

        assert_eq!(out, "PPiPS0_");
    }

    #[test]
    fn test_vector_substitution() {
        let float4 = ParamType::vector_of(Primitive::Float.into(), 4);
        let out = mangle_types(SpirVersion::Spir20, &[float4.clone(), float4.clone(), float4]);

        assert_eq!(out.as_deref(), Ok("Dv4_fS_S_"));
    }

    #[test]
    fn test_vector_substitution_requires_same_element() {
        let out = mangle_types(
            SpirVersion::Spir20,
            &[
                ParamType::vector_of(Primitive::Float.into(), 4),
                ParamType::vector_of(Primitive::Int.into(), 4),
            ],
        );

        assert_eq!(out.as_deref(), Ok("Dv4_fDv4_i"));
    }

    #[test]
    fn test_pointer_to_vector_is_substituted_by_vector() {
        let float4 = ParamType::vector_of(Primitive::Float.into(), 4);

        let out = mangle_types(SpirVersion::Spir20, &[global(float4.clone()), float4.clone()]);
        assert_eq!(out.as_deref(), Ok("PU3AS1Dv4_fS_"));

        let out = mangle_types(SpirVersion::Spir20, &[float4.clone(), global(float4)]);
        assert_eq!(out.as_deref(), Ok("Dv4_fPU3AS1S_"));
    }

    #[test]
    fn test_atomic_is_never_substituted() {
        let atomic = ParamType::atomic(Primitive::Int.into());
        let out = mangle_types(SpirVersion::Spir20, &[atomic.clone(), atomic]);

        assert_eq!(out.as_deref(), Ok("U7_AtomiciU7_Atomici"));
    }

    #[test]
    fn test_block() {
        let local_float = PointerType::new(Primitive::Float.into()).with_address_space(AddressSpace::Local);
        let block = ParamType::block([Primitive::Int.into(), local_float.into()]);

        let out = mangle_types(SpirVersion::Spir20, &[block]);
        assert_eq!(out.as_deref(), Ok("U13block_pointerFviPU3AS3fE"));

        let out = mangle_types(SpirVersion::Spir20, &[ParamType::block([]), ParamType::block([])]);
        assert_eq!(out.as_deref(), Ok("U13block_pointerFvvEU13block_pointerFvvE"));
    }

    #[test]
    fn test_user_defined_is_length_prefixed() {
        let ty = ParamType::user_defined("mytype");
        let out = mangle_types(SpirVersion::Spir20, &[ty.clone(), ty]);

        assert_eq!(out.as_deref(), Ok("6mytype6mytype"));
    }

    #[test]
    fn test_unsupported_nodes() {
        let atomic = ParamType::atomic(Primitive::Int.into());
        let err = mangle_types(SpirVersion::Spir12, &[global(atomic)]).unwrap_err();
        assert_eq!(err.node, "atomic_int");

        let generic = PointerType::new(Primitive::Int.into()).with_address_space(AddressSpace::Generic);
        let err = mangle_types(SpirVersion::Spir12, &[generic.into()]).unwrap_err();
        assert_eq!(err.node, "__generic int *");

        let err = mangle_types(SpirVersion::Spir12, &[Primitive::Queue.into()]).unwrap_err();
        assert_eq!(err.node, "queue_t");
    }

    #[test]
    fn test_block_propagates_first_failure() {
        let block = ParamType::block([Primitive::Int.into(), Primitive::ClkEvent.into()]);

        assert!(mangle_types(SpirVersion::Spir12, &[block]).is_err());
    }
}
