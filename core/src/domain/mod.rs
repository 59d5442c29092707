pub mod common;
pub mod content;
pub mod credential;
pub mod search;
