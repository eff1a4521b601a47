//! # Ticket Core
//!
//! Wallet-connection and contract-interaction lifecycle for the ticket
//! front-end. Everything here is independent of the DOM and compiles for both
//! the browser and the host, so the whole lifecycle is tested natively.
//!
//! ## Structure
//!
//! - **[`provider`]**: the wallet capability the host must supply
//! - **[`session`]**: provider, active account and derived binding; snapshot types
//! - **[`contract`]**: the fixed contract interface and the signer-bound handle
//! - **[`intent`]**: raw input and validated transaction intents
//! - **[`pricing`]**: tiered ticket pricing
//! - **[`lifecycle`]**: the controller that owns all state transitions
//! - **[`view`]**: pure mapping from snapshot to renderable affordances
//! - **[`config`]**, **[`error`]**, **[`units`]**: ambient support
//!
//! ## Data Flow
//!
//! ```text
//! provider detection → account session → contract binding
//!                                          ├─ refresh (reads)
//!                                          └─ purchase / withdraw (writes)
//!                                                      ↓
//!                                           snapshot → view::render
//! ```

pub mod config;
pub mod contract;
pub mod error;
pub mod intent;
pub mod lifecycle;
pub mod pricing;
pub mod provider;
pub mod session;
pub mod units;
pub mod view;

pub use config::{AppConfig, DisplayOptions};
pub use error::{ErrorKind, LifecycleError};
pub use intent::{PendingInput, TransactionIntent, TxKind};
pub use lifecycle::Lifecycle;
pub use provider::WalletProvider;
pub use session::{LifecycleSnapshot, Notice, NoticeLevel, OnChainState, ViewState};
pub use view::{ActionPanel, Affordances};
