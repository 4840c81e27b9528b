//! Text renderings of each view

pub mod dashboard;
pub mod inbox;
pub mod login;
