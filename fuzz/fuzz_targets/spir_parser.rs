#![no_main]

use libfuzzer_sys::fuzz_target;
use spir_types::FunctionDescriptor;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data)
        && let Ok(desc) = s.parse::<FunctionDescriptor>()
    {
        // Every parsed descriptor must survive being rendered and parsed again.
        let rendered = desc.to_string();
        let reparsed: FunctionDescriptor = rendered.parse().unwrap();

        assert_eq!(desc, reparsed, "{rendered}");
    }
});
