//! DOM helpers

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::constants::{HIDDEN_CLASS, LOADING_ELEMENT_ID};

/// Hide the static loading screen. Safe to call more than once.
pub fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        log::warn!("[VIEW] No document available, cannot hide loading screen");
        return;
    };

    let Some(loading_element) = document.get_element_by_id(LOADING_ELEMENT_ID) else {
        log::debug!("[VIEW] Loading element '{}' not found", LOADING_ELEMENT_ID);
        return;
    };

    if let Some(html_element) = loading_element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html_element.class_list().add_1(HIDDEN_CLASS) {
            log::warn!("[VIEW] Could not add '{}' class: {:?}", HIDDEN_CLASS, e);
        }
    }

    // Backup in case the stylesheet has no rule for the class
    if let Err(e) = loading_element.set_attribute("style", "display: none !important;") {
        log::warn!("[VIEW] Could not set loading screen style: {:?}", e);
    }

    log::info!("[VIEW] Loading screen hidden");
}
