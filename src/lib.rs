pub mod commands;
pub mod github;
pub mod logger;
pub mod terminal;
pub mod tool;
pub mod topics;
