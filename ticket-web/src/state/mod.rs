//! Reactive application state

pub mod lifecycle;
