use crate::SpirVersion;

macro_rules! primitives {
    (
        $(
            $variant:ident => $readable:literal, $mangled:literal, $since:ident;
        )*
    ) => {
        /// Defines all builtin scalar and opaque types, which are mangled into a
        /// fixed token.
        ///
        /// The declaration order is significant, since [`Primitive::ALL`] is
        /// iterated when resolving a type from its readable name.
        #[derive(Hash, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        pub enum Primitive {
            $( $variant, )*
        }

        impl Primitive {
            /// Contains all primitive types, in declaration order.
            pub const ALL: &'static [Primitive] = &[ $( Primitive::$variant, )* ];

            /// Gets the human-readable name of the primitive, as written in
            /// OpenCL C source.
            pub fn readable(self) -> &'static str {
                match self {
                    $( Primitive::$variant => $readable, )*
                }
            }

            /// Gets the mangled token of the primitive.
            pub fn mangled(self) -> &'static str {
                match self {
                    $( Primitive::$variant => $mangled, )*
                }
            }

            /// Gets the first SPIR version which is able to encode the primitive.
            pub fn since(self) -> SpirVersion {
                match self {
                    $( Primitive::$variant => SpirVersion::$since, )*
                }
            }
        }
    };
}

primitives! {
    Bool => "bool", "b", Spir12;
    UChar => "uchar", "h", Spir12;
    Char => "char", "c", Spir12;
    UShort => "ushort", "t", Spir12;
    Short => "short", "s", Spir12;
    UInt => "uint", "j", Spir12;
    Int => "int", "i", Spir12;
    ULong => "ulong", "m", Spir12;
    Long => "long", "l", Spir12;
    Half => "half", "Dh", Spir12;
    Float => "float", "f", Spir12;
    Double => "double", "d", Spir12;
    Void => "void", "v", Spir12;
    VarArg => "...", "z", Spir12;

    Image1dRo => "image1d_ro_t", "14ocl_image1d_ro", Spir12;
    Image1dArrayRo => "image1d_array_ro_t", "20ocl_image1d_array_ro", Spir12;
    Image1dBufferRo => "image1d_buffer_ro_t", "21ocl_image1d_buffer_ro", Spir12;
    Image2dRo => "image2d_ro_t", "14ocl_image2d_ro", Spir12;
    Image2dArrayRo => "image2d_array_ro_t", "20ocl_image2d_array_ro", Spir12;
    Image2dDepthRo => "image2d_depth_ro_t", "20ocl_image2d_depth_ro", Spir12;
    Image2dArrayDepthRo => "image2d_array_depth_ro_t", "26ocl_image2d_array_depth_ro", Spir12;
    Image2dMsaaRo => "image2d_msaa_ro_t", "19ocl_image2d_msaa_ro", Spir12;
    Image2dArrayMsaaRo => "image2d_array_msaa_ro_t", "25ocl_image2d_array_msaa_ro", Spir12;
    Image2dMsaaDepthRo => "image2d_msaa_depth_ro_t", "25ocl_image2d_msaa_depth_ro", Spir12;
    Image2dArrayMsaaDepthRo => "image2d_array_msaa_depth_ro_t", "31ocl_image2d_array_msaa_depth_ro", Spir12;
    Image3dRo => "image3d_ro_t", "14ocl_image3d_ro", Spir12;

    Image1dWo => "image1d_wo_t", "14ocl_image1d_wo", Spir12;
    Image1dArrayWo => "image1d_array_wo_t", "20ocl_image1d_array_wo", Spir12;
    Image1dBufferWo => "image1d_buffer_wo_t", "21ocl_image1d_buffer_wo", Spir12;
    Image2dWo => "image2d_wo_t", "14ocl_image2d_wo", Spir12;
    Image2dArrayWo => "image2d_array_wo_t", "20ocl_image2d_array_wo", Spir12;
    Image2dDepthWo => "image2d_depth_wo_t", "20ocl_image2d_depth_wo", Spir12;
    Image2dArrayDepthWo => "image2d_array_depth_wo_t", "26ocl_image2d_array_depth_wo", Spir12;
    Image2dMsaaWo => "image2d_msaa_wo_t", "19ocl_image2d_msaa_wo", Spir12;
    Image2dArrayMsaaWo => "image2d_array_msaa_wo_t", "25ocl_image2d_array_msaa_wo", Spir12;
    Image2dMsaaDepthWo => "image2d_msaa_depth_wo_t", "25ocl_image2d_msaa_depth_wo", Spir12;
    Image2dArrayMsaaDepthWo => "image2d_array_msaa_depth_wo_t", "31ocl_image2d_array_msaa_depth_wo", Spir12;
    Image3dWo => "image3d_wo_t", "14ocl_image3d_wo", Spir12;

    Image1dRw => "image1d_rw_t", "14ocl_image1d_rw", Spir20;
    Image1dArrayRw => "image1d_array_rw_t", "20ocl_image1d_array_rw", Spir20;
    Image1dBufferRw => "image1d_buffer_rw_t", "21ocl_image1d_buffer_rw", Spir20;
    Image2dRw => "image2d_rw_t", "14ocl_image2d_rw", Spir20;
    Image2dArrayRw => "image2d_array_rw_t", "20ocl_image2d_array_rw", Spir20;
    Image2dDepthRw => "image2d_depth_rw_t", "20ocl_image2d_depth_rw", Spir20;
    Image2dArrayDepthRw => "image2d_array_depth_rw_t", "26ocl_image2d_array_depth_rw", Spir20;
    Image2dMsaaRw => "image2d_msaa_rw_t", "19ocl_image2d_msaa_rw", Spir20;
    Image2dArrayMsaaRw => "image2d_array_msaa_rw_t", "25ocl_image2d_array_msaa_rw", Spir20;
    Image2dMsaaDepthRw => "image2d_msaa_depth_rw_t", "25ocl_image2d_msaa_depth_rw", Spir20;
    Image2dArrayMsaaDepthRw => "image2d_array_msaa_depth_rw_t", "31ocl_image2d_array_msaa_depth_rw", Spir20;
    Image3dRw => "image3d_rw_t", "14ocl_image3d_rw", Spir20;

    Event => "event_t", "9ocl_event", Spir12;
    PipeRo => "pipe_ro_t", "11ocl_pipe_ro", Spir20;
    PipeWo => "pipe_wo_t", "11ocl_pipe_wo", Spir20;
    ReserveId => "reserve_id_t", "13ocl_reserveid", Spir20;
    Queue => "queue_t", "9ocl_queue", Spir20;
    NdRange => "ndrange_t", "9ndrange_t", Spir20;
    ClkEvent => "clk_event_t", "12ocl_clkevent", Spir20;
    Sampler => "sampler_t", "11ocl_sampler", Spir12;

    KernelEnqueueFlags => "kernel_enqueue_flags_t", "i", Spir20;
    ClkProfilingInfo => "clk_profiling_info", "i", Spir20;
    MemoryOrder => "memory_order", "i", Spir20;
    MemoryScope => "memory_scope", "i", Spir20;
}

impl Primitive {
    /// Attempts to find the primitive with the given readable name.
    pub fn from_readable(name: &str) -> Option<Primitive> {
        Primitive::ALL.iter().copied().find(|prim| prim.readable() == name)
    }

    /// Gets the mangled token of the primitive with the given readable name,
    /// if any primitive has that name.
    pub fn mangled_from_readable(name: &str) -> Option<&'static str> {
        Primitive::from_readable(name).map(Primitive::mangled)
    }
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.readable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readable_names_are_unique() {
        for (idx, prim) in Primitive::ALL.iter().enumerate() {
            assert_eq!(Primitive::from_readable(prim.readable()), Some(*prim), "{prim:?}");
            assert!(!Primitive::ALL[idx + 1..].iter().any(|p| p.readable() == prim.readable()));
        }
    }

    #[test]
    fn test_opaque_tokens_are_length_prefixed() {
        for prim in Primitive::ALL {
            let token = prim.mangled();
            let digits = token.chars().take_while(char::is_ascii_digit).collect::<String>();

            if digits.is_empty() {
                continue;
            }

            let len = digits.parse::<usize>().unwrap();
            assert_eq!(token.len() - digits.len(), len, "{prim:?} has a bad length prefix");
        }
    }

    #[test]
    fn test_mangled_from_readable() {
        assert_eq!(Primitive::mangled_from_readable("int"), Some("i"));
        assert_eq!(Primitive::mangled_from_readable("half"), Some("Dh"));
        assert_eq!(Primitive::mangled_from_readable("sampler_t"), Some("11ocl_sampler"));
        assert_eq!(Primitive::mangled_from_readable("float4"), None);
        assert_eq!(Primitive::mangled_from_readable("__global int *"), None);
    }
}
