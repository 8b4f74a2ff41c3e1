#![no_main]

use libfuzzer_sys::fuzz_target;
use rsrcfork::ResourceFork;

fuzz_target!(|data: &[u8]| {
    if let Ok(fork) = ResourceFork::from_mem(data.to_vec()) {
        // Every decoded payload must lie inside the input
        for resource in &fork {
            assert!(resource.data_offset() + resource.data().len() <= data.len());
        }
    }
});
