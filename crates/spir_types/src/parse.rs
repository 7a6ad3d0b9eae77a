//! Parser for readable function signatures, such as
//! `vload4(ulong, const __global float *)`.
//!
//! The accepted syntax is exactly what [`FunctionDescriptor`] and [`ParamType`]
//! render into, so any rendered descriptor can be parsed back into an equal
//! descriptor. Pointer attributes are written before the pointee, outermost
//! pointer first, and every pointer level is closed by its address space:
//!
//! ```text
//! const __private volatile __global int * *
//! ^^^^^^^^^^^^^^^ ^^^^^^^^^^^^^^^^^       ^ outer pointer
//!  outer pointer    inner pointer       ^ inner pointer
//! ```
//!
//! Pointer levels without any attributes default to `__private`.

use std::ops::Range;
use std::sync::Arc;

use error_snippet::Result;

use crate::errors::*;
use crate::source::SignatureSource;
use crate::*;

/// Parses a single signature from the given string.
///
/// An empty string, or the rendering of the null descriptor, parses into the
/// null descriptor.
pub fn parse_signature(input: &str) -> Result<FunctionDescriptor> {
    SignatureParser::new_with_str(input).parse_signature()
}

/// Parses a single parameter type from the given string.
pub fn parse_type(input: &str) -> Result<ParamType> {
    let mut parser = SignatureParser::new_with_str(input);

    let ty = parser.parse_type()?;
    parser.finish()?;

    Ok(ty)
}

pub struct SignatureParser {
    source: Arc<SignatureSource>,
    idx: usize,
}

impl SignatureParser {
    /// Creates a new [`SignatureParser`] over the given source.
    pub fn new(source: Arc<SignatureSource>) -> Self {
        Self { source, idx: 0 }
    }

    /// Creates a new [`SignatureParser`] over an internal source with the
    /// given content.
    pub fn new_with_str(input: &str) -> Self {
        Self::new(Arc::new(SignatureSource::internal(input)))
    }

    fn src(&self) -> &str {
        &self.source.content
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.src()[self.idx..];

        self.idx += rest.len() - rest.trim_start().len();
    }

    fn check_str(&mut self, exp: &str) -> bool {
        self.skip_whitespace();

        if self.src()[self.idx..].starts_with(exp) {
            self.idx += exp.len();

            true
        } else {
            false
        }
    }

    fn check(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];

        self.check_str(c.encode_utf8(&mut buf))
    }

    fn expect(&mut self, c: char, expected: &str) -> Result<()> {
        if self.check(c) { Ok(()) } else { Err(self.unexpected(expected)) }
    }

    /// Gets the range of the identifier at the current position, without
    /// consuming it.
    fn peek_identifier(&mut self) -> Option<Range<usize>> {
        self.skip_whitespace();

        let rest = &self.src()[self.idx..];
        if !rest.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
            return None;
        }

        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(rest.len());

        Some(self.idx..self.idx + len)
    }

    /// Ensures that the entire input has been consumed.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there is any non-whitespace input left.
    pub fn finish(&mut self) -> Result<()> {
        self.skip_whitespace();

        if self.idx < self.src().len() {
            return Err(TrailingInput {
                source: self.source.clone(),
                range: self.idx..self.src().len(),
            }
            .into());
        }

        Ok(())
    }

    /// Creates an error describing the input at the current position, which
    /// did not match what was `expected`.
    fn unexpected(&mut self, expected: &str) -> error_snippet::Error {
        self.skip_whitespace();

        let start = self.idx;

        if let Some(range) = self.peek_identifier() {
            return UnexpectedToken {
                source: self.source.clone(),
                actual: self.src()[range.clone()].to_string(),
                range,
                expected: expected.to_string(),
            }
            .into();
        }

        match self.src()[start..].chars().next() {
            None => UnexpectedEndOfInput {
                source: self.source.clone(),
                range: start.saturating_sub(1)..start,
                expected: expected.to_string(),
            }
            .into(),
            Some(c) if "(),*^.".contains(c) => UnexpectedToken {
                source: self.source.clone(),
                range: start..start + c.len_utf8(),
                expected: expected.to_string(),
                actual: c.to_string(),
            }
            .into(),
            Some(c) => UnexpectedCharacter {
                source: self.source.clone(),
                range: start..start + c.len_utf8(),
                char: c,
            }
            .into(),
        }
    }
}

impl SignatureParser {
    /// Parses a complete signature, consuming the entire input.
    #[tracing::instrument(level = "TRACE", skip(self), err)]
    pub fn parse_signature(&mut self) -> Result<FunctionDescriptor> {
        self.skip_whitespace();

        let rest = self.src()[self.idx..].trim_end();
        if rest.is_empty() || rest == FunctionDescriptor::NULL_STRING {
            self.idx = self.src().len();

            return Ok(FunctionDescriptor::null());
        }

        let Some(name) = self.peek_identifier() else {
            return Err(self.unexpected("function name"));
        };

        self.idx = name.end;
        let name = self.src()[name].to_string();

        self.expect('(', "`(`")?;
        let parameters = self.parse_parameter_list()?;
        self.finish()?;

        Ok(FunctionDescriptor { name, parameters })
    }

    /// Parses a comma-separated list of types, up to and including the closing
    /// parenthesis. The opening parenthesis must already have been consumed.
    fn parse_parameter_list(&mut self) -> Result<Vec<ParamType>> {
        let mut params = Vec::new();

        if self.check(')') {
            return Ok(params);
        }

        loop {
            params.push(self.parse_type()?);

            if self.check(',') {
                continue;
            }

            self.expect(')', "`,` or `)`")?;

            return Ok(params);
        }
    }

    /// Parses a single type, including all of its pointer levels.
    #[tracing::instrument(level = "TRACE", skip(self), err)]
    pub fn parse_type(&mut self) -> Result<ParamType> {
        self.skip_whitespace();

        let attrs_start = self.idx;
        let mut groups: Vec<(Qualifiers, AddressSpace)> = Vec::new();
        let mut pending = Qualifiers::empty();
        let mut pending_start = None;

        while let Some(range) = self.peek_identifier() {
            let word = &self.src()[range.clone()];

            if let Some(qualifier) = Qualifiers::from_readable(word) {
                pending |= qualifier;
                pending_start.get_or_insert(range.start);
            } else if let Some(space) = AddressSpace::from_readable(word) {
                groups.push((pending, space));
                pending = Qualifiers::empty();
                pending_start = None;
            } else {
                break;
            }

            self.idx = range.end;
        }

        if let Some(start) = pending_start {
            return Err(DanglingQualifier {
                source: self.source.clone(),
                range: start..self.idx,
            }
            .into());
        }

        let attrs_end = self.idx;
        let mut ty = self.parse_base()?;

        let mut pointers = 0;
        while self.check('*') {
            pointers += 1;
        }

        if groups.len() > pointers {
            return Err(AttributesWithoutPointer {
                source: self.source.clone(),
                range: attrs_start..attrs_end,
                groups: groups.len(),
                pointers,
            }
            .into());
        }

        // Wrap from the innermost pointer level outwards, since the first
        // attribute group belongs to the outermost pointer.
        for level in (0..pointers).rev() {
            let (qualifiers, space) = groups
                .get(level)
                .copied()
                .unwrap_or((Qualifiers::empty(), AddressSpace::Private));

            ty = PointerType::new(ty)
                .with_qualifiers(qualifiers)
                .with_address_space(space)
                .into();
        }

        Ok(ty)
    }

    /// Parses the base of a type, which is everything but the pointer levels.
    fn parse_base(&mut self) -> Result<ParamType> {
        if self.check_str("...") {
            return Ok(Primitive::VarArg.into());
        }

        let Some(range) = self.peek_identifier() else {
            return Err(self.unexpected("a type"));
        };

        self.idx = range.end;

        if &self.src()[range.clone()] == "void" && self.check('(') {
            self.expect('^', "`^`")?;
            self.expect(')', "`)`")?;
            self.expect('(', "`(`")?;

            let params = self.parse_parameter_list()?;

            return Ok(ParamType::block(params));
        }

        self.base_from_word(range)
    }

    /// Resolves a single word into a type, such as `int`, `float4`,
    /// `atomic_uint` or the name of an opaque type.
    fn base_from_word(&self, range: Range<usize>) -> Result<ParamType> {
        let word = &self.src()[range.clone()];

        if let Some(rest) = word.strip_prefix("atomic_")
            && !rest.is_empty()
        {
            let base = self.base_from_word(range.start + "atomic_".len()..range.end)?;

            return Ok(ParamType::atomic(base));
        }

        if let Some(prim) = Primitive::from_readable(word) {
            return Ok(prim.into());
        }

        let scalar_len = word.trim_end_matches(|c: char| c.is_ascii_digit()).len();

        if scalar_len < word.len()
            && let Some(prim) = Primitive::from_readable(&word[..scalar_len])
        {
            let Some(len) = word[scalar_len..].parse::<u32>().ok().filter(|len| *len > 0) else {
                return Err(InvalidVectorLength {
                    source: self.source.clone(),
                    range: range.start + scalar_len..range.end,
                }
                .into());
            };

            return Ok(ParamType::vector_of(prim.into(), len));
        }

        Ok(ParamType::user_defined(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(input: &str) -> Result<()> {
        let desc = parse_signature(input)?;
        assert_eq!(desc.to_string(), input);

        Ok(())
    }

    #[test]
    fn test_parse_primitives() -> Result<()> {
        let desc = parse_signature("foo(int, float, ...)")?;

        assert_eq!(desc.name, "foo");
        assert_eq!(
            desc.parameters,
            [
                ParamType::from(Primitive::Int),
                ParamType::from(Primitive::Float),
                ParamType::from(Primitive::VarArg),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_parse_empty_parameter_list() -> Result<()> {
        let desc = parse_signature("  barrier ( )  ")?;

        assert_eq!(desc, FunctionDescriptor::new("barrier", []));

        Ok(())
    }

    #[test]
    fn test_parse_null() -> Result<()> {
        assert!(parse_signature("")?.is_null());
        assert!(parse_signature("<invalid>")?.is_null());

        Ok(())
    }

    #[test]
    fn test_parse_vector() -> Result<()> {
        let ty = parse_type("uchar16")?;

        assert_eq!(ty, ParamType::vector_of(Primitive::UChar.into(), 16));

        Ok(())
    }

    #[test]
    fn test_parse_user_defined() -> Result<()> {
        assert_eq!(parse_type("foo2")?, ParamType::user_defined("foo2"));
        assert_eq!(parse_type("image2d_ro_t")?, Primitive::Image2dRo.into());

        Ok(())
    }

    #[test]
    fn test_parse_pointer_defaults_to_private() -> Result<()> {
        let ty = parse_type("int *")?;

        assert_eq!(ty, ParamType::pointer_to(Primitive::Int.into()));

        Ok(())
    }

    #[test]
    fn test_parse_nested_pointer_groups() -> Result<()> {
        let ty = parse_type("const __private volatile __global int * *")?;

        let inner = PointerType::new(Primitive::Int.into())
            .with_qualifiers(Qualifiers::VOLATILE)
            .with_address_space(AddressSpace::Global);

        let outer = PointerType::new(inner.into()).with_qualifiers(Qualifiers::CONST);

        assert_eq!(ty, outer.into());

        Ok(())
    }

    #[test]
    fn test_parse_atomic() -> Result<()> {
        assert_eq!(parse_type("atomic_uint")?, ParamType::atomic(Primitive::UInt.into()));

        Ok(())
    }

    #[test]
    fn test_parse_block() -> Result<()> {
        let ty = parse_type("void (^)(int, __local float *)")?;

        let expected = ParamType::block([
            Primitive::Int.into(),
            PointerType::new(Primitive::Float.into())
                .with_address_space(AddressSpace::Local)
                .into(),
        ]);

        assert_eq!(ty, expected);
        assert_eq!(parse_type("void")?, Primitive::Void.into());

        Ok(())
    }

    #[test]
    fn test_round_trip() -> Result<()> {
        assert_round_trip("read_imagef(image2d_ro_t, sampler_t, float2)")?;
        assert_round_trip("vload4(ulong, const __global float *)")?;
        assert_round_trip("atomic_add(volatile __global int *, int)")?;
        assert_round_trip("enqueue_kernel(queue_t, int, ndrange_t, void (^)())")?;
        assert_round_trip("foo(__private __local int * *, restrict const __generic half8 *)")?;
        assert_round_trip("foo(__global atomic_int *, mytype, void (^)(int, __local float *))")?;

        Ok(())
    }

    #[test]
    fn test_normalized_rendering() -> Result<()> {
        insta::assert_snapshot!(
            parse_signature("foo( const   __global float* ,int )")?,
            @"foo(const __global float *, int)"
        );

        insta::assert_snapshot!(
            parse_signature("bar(int**, volatile __local atomic_uint*, void(^)(float4))")?,
            @"bar(__private __private int * *, volatile __local atomic_uint *, void (^)(float4))"
        );

        insta::assert_snapshot!(parse_signature("  <invalid>  ")?, @"<invalid>");

        Ok(())
    }

    #[test]
    fn test_dangling_qualifier() {
        let err = parse_type("const int").unwrap_err();

        assert_eq!(err.message(), "qualifier without address space");
    }

    #[test]
    fn test_attributes_without_pointer() {
        let err = parse_type("__global int").unwrap_err();

        assert_eq!(err.message(), "pointer attributes without pointer");
    }

    #[test]
    fn test_zero_length_vector() {
        let err = parse_type("float0").unwrap_err();

        assert_eq!(err.message(), "invalid vector length");
    }

    #[test]
    fn test_trailing_input() {
        let err = parse_signature("foo(int) bar").unwrap_err();

        assert_eq!(err.message(), "trailing input after signature");
    }

    #[test]
    fn test_unexpected_end() {
        let err = parse_signature("foo(int, ").unwrap_err();

        assert_eq!(err.message(), "End of signature");
    }

    #[test]
    fn test_unexpected_character() {
        let err = parse_signature("foo(int; float)").unwrap_err();

        assert_eq!(err.message(), "Unexpected character");
    }

    #[test]
    fn test_missing_parenthesis() {
        let err = parse_signature("foo int").unwrap_err();

        assert_eq!(err.message(), "unexpected token");
    }
}
