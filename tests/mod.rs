// Integration tests for devker

pub mod helpers;
