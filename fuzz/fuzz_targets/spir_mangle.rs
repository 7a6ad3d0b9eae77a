#![no_main]

use libfuzzer_sys::fuzz_target;
use spir_mangle::{MANGLED_PREFIX, NameMangler};
use spir_types::{FunctionDescriptor, SpirVersion};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(desc) = s.parse::<FunctionDescriptor>() else {
        return;
    };

    for version in SpirVersion::ALL {
        let mangler = NameMangler::new(version);

        let first = mangler.mangle(&desc);
        let second = mangler.mangle(&desc);
        assert_eq!(first, second);

        if let Ok(mangled) = first {
            assert!(mangled.starts_with(MANGLED_PREFIX));
        }
    }

    // Anything which can be mangled in SPIR 1.2 can be mangled in SPIR 2.0, and
    // into the same name.
    if let Ok(old) = NameMangler::new(SpirVersion::Spir12).mangle(&desc) {
        assert_eq!(NameMangler::new(SpirVersion::Spir20).mangle(&desc), Ok(old));
    }
});
