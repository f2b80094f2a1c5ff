#![no_main]

use harmonygen::prelude::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(module) = CilModule::from_mem(data.to_vec()) {
        let mut registry = TypeRegistry::new();
        let _ = generate(&module, &TypeFilter::default(), &mut registry, Markup::Html);
    }
});
