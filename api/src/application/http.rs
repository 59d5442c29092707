pub mod authentication;
pub mod file;
pub mod health;
pub mod metadata;
pub mod search;
pub mod search_params;
pub mod server;
