//! Application constants

/// Element shown by `index.html` until the wasm module has loaded.
pub const LOADING_ELEMENT_ID: &str = "leptos-loading";

pub const HIDDEN_CLASS: &str = "hidden";

// Transaction hash display
pub const HASH_PREFIX_LEN: usize = 10;
pub const HASH_SUFFIX_LEN: usize = 8;

pub const CONNECTING_LABEL: &str = "Waiting for wallet…";
