#[cfg(not(target_arch = "wasm32"))]
mod property_tests;
