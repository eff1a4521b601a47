//! UI Components

pub mod action_panel;
pub mod navbar;
pub mod notice;

pub use action_panel::ActionPanelView;
pub use navbar::Navbar;
pub use notice::NoticeBanner;
