pub mod cli;
pub mod env;
