pub mod commands;
pub mod detect;
pub mod display;
pub mod session;
