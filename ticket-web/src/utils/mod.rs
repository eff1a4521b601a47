//! DOM helpers and constants

pub mod constants;
pub mod dom;
