pub mod assertion_signer;
pub mod client;
pub mod errors;
pub mod oauth_client;
