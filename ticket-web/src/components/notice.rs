//! Notice banner for the latest success, info or error message

use leptos::prelude::*;

use ticket_core::session::{Notice, NoticeLevel};
use ticket_core::units::format_address;

use crate::state::lifecycle::use_lifecycle_context;
use crate::utils::constants::{HASH_PREFIX_LEN, HASH_SUFFIX_LEN};

fn notice_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Info => "notice notice-info",
        NoticeLevel::Success => "notice notice-success",
        NoticeLevel::Error => "notice notice-error",
    }
}

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_lifecycle_context();

    move || {
        ctx.snapshot.with(|snapshot| snapshot.notice.clone()).map(|notice: Notice| {
            let tx = notice.tx_hash.map(|hash| {
                let full = hash.to_string();
                let short = format_address(&full, HASH_PREFIX_LEN, HASH_SUFFIX_LEN);
                view! { <span class="notice-tx" title=full>{short}</span> }
            });

            let hint = notice
                .retryable
                .then(|| view! { <span class="notice-hint">" You can try again."</span> });

            view! {
                <div class=notice_class(notice.level) role="status">
                    <span class="notice-message">{notice.message}</span>
                    {hint}
                    {tx}
                </div>
            }
        })
    }
}
