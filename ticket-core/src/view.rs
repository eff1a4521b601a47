//! View controller: a pure function from the lifecycle snapshot to the
//! affordances the page should render.
//!
//! Rendering never triggers work. Refreshes are started by the lifecycle at
//! session establishment and after confirmed transactions.

use crate::config::DisplayOptions;
use crate::intent::TxKind;
use crate::session::{LifecycleSnapshot, SubmissionStage, ViewState};
use crate::units::{format_count, format_units, truncate_address};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Affordances {
    InstallPrompt { message: String },
    ConnectPrompt { label: String, connecting: bool },
    ActionPanel(ActionPanel),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPanel {
    pub account: String,
    pub account_short: String,
    pub spent_label: String,
    /// `None` while the first refresh of the session is outstanding.
    pub spent_total: Option<String>,
    pub owned_label: String,
    pub tickets_owned: Option<String>,
    pub purchase_button: String,
    pub withdraw_button: String,
    /// Both submit buttons are disabled while any submission is pending.
    pub controls_enabled: bool,
    pub refreshing: bool,
}

fn stage_label(stage: SubmissionStage) -> &'static str {
    match stage {
        SubmissionStage::AwaitingSignature => "Confirm in wallet…",
        SubmissionStage::AwaitingInclusion => "Waiting for inclusion…",
    }
}

pub fn render(snapshot: &LifecycleSnapshot, display: &DisplayOptions, value_decimals: u8) -> Affordances {
    match snapshot.view {
        ViewState::NoProvider => Affordances::InstallPrompt {
            message: display.install_prompt.clone(),
        },
        ViewState::Disconnected | ViewState::Connecting => Affordances::ConnectPrompt {
            label: display.connect_label.clone(),
            connecting: snapshot.view == ViewState::Connecting,
        },
        ViewState::Connected => {
            // Connected always carries an account; fall back to the connect
            // prompt rather than render a panel for nobody.
            let Some(account) = snapshot.account else {
                return Affordances::ConnectPrompt {
                    label: display.connect_label.clone(),
                    connecting: false,
                };
            };
            let account = account.to_string();

            let button = |kind: TxKind, idle: &str| match snapshot.pending {
                Some(pending) if pending.kind == kind => stage_label(pending.stage).to_string(),
                _ => idle.to_string(),
            };

            Affordances::ActionPanel(ActionPanel {
                account_short: truncate_address(&account),
                account,
                spent_label: display.spent_label.clone(),
                spent_total: snapshot.on_chain.map(|state| {
                    format!(
                        "{} {}",
                        format_units(state.spent_total, value_decimals),
                        display.currency_symbol
                    )
                }),
                owned_label: display.owned_label.clone(),
                tickets_owned: snapshot.on_chain.map(|state| format_count(state.tickets_owned)),
                purchase_button: button(TxKind::Purchase, &display.purchase_label),
                withdraw_button: button(TxKind::Withdraw, &display.withdraw_label),
                controls_enabled: snapshot.pending.is_none(),
                refreshing: snapshot.refreshing,
            })
        }
    }
}
