#[cfg(not(target_arch = "wasm32"))]
mod url_tests;
