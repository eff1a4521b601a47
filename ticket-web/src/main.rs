//! Ticket Booth browser front-end
//!
//! Connects an injected Ethereum wallet, shows the account's ticket balances
//! and submits purchase and withdraw transactions.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

mod app;
mod components;
mod pages;
mod services;
mod state;
mod utils;

use app::{App, ConfigError};
use utils::dom::hide_loading_screen;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("[VIEW] Ticket Booth starting...");

    hide_loading_screen();

    if let Err(message) = ticket_core::config::init_config() {
        log::error!("[CONFIG] {}", message);
        leptos::mount::mount_to_body(move || view! { <ConfigError message=message.clone()/> });
        return;
    }

    leptos::mount::mount_to_body(|| view! { <App/> });
}
