//! Dashboard Page
//!
//! Single page of the app. Shows whatever the view controller says the
//! current lifecycle state affords: an install prompt, a connect button, or
//! the account panel.

use leptos::prelude::*;

use ticket_core::config::app_config;
use ticket_core::view::Affordances;

use crate::components::{ActionPanelView, NoticeBanner};
use crate::state::lifecycle::use_lifecycle_context;
use crate::utils::constants::CONNECTING_LABEL;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_lifecycle_context();
    let title = format!("Welcome to the {}!", app_config().display.title);

    let body = move || match ctx.affordances() {
        Affordances::InstallPrompt { message } => view! {
            <p class="install-prompt">{message}</p>
        }
        .into_any(),
        Affordances::ConnectPrompt { label, connecting } => {
            let label = if connecting { CONNECTING_LABEL.to_string() } else { label };
            view! {
                <button class="btn connect-button" disabled=connecting on:click=move |_| ctx.connect()>
                    {label}
                </button>
            }
            .into_any()
        }
        Affordances::ActionPanel(panel) => view! { <ActionPanelView panel=panel/> }.into_any(),
    };

    view! {
        <main class="container">
            <header>
                <h1>{title}</h1>
            </header>
            <NoticeBanner/>
            {body}
        </main>
    }
}
