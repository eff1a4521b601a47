//! Ticket Booth Web App - Leptos Frontend

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use crate::components::Navbar;
use crate::pages::DashboardPage;
use crate::state::lifecycle::provide_lifecycle_context;
use crate::utils::dom::hide_loading_screen;

#[component]
pub fn App() -> impl IntoView {
    provide_lifecycle_context();

    // Backup in case main() ran before the loading element was parsed
    Effect::new(move || hide_loading_screen());

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=DashboardPage/>
                </Routes>
            </div>
        </Router>
    }
}

/// Shown instead of the app when the build-time configuration is invalid.
#[component]
pub fn ConfigError(message: String) -> impl IntoView {
    view! {
        <div class="app-container">
            <div class="card notice notice-error">
                <h1>"Configuration error"</h1>
                <p>{message}</p>
            </div>
        </div>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="card not-found">
            <h1>"404 - Page Not Found"</h1>
            <p>"The page you're looking for doesn't exist."</p>
            <A href="/">
                <span class="btn">"Go to Home"</span>
            </A>
        </div>
    }
}
