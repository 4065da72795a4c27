pub mod application;
pub mod commands;
pub mod runtime;
