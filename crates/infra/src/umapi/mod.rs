//! Adobe IMS and UMAPI adapters
//!
//! - [`auth`]: OAuth2 client-credentials token acquisition from IMS
//! - [`client`]: the UMAPI action endpoint transport
//! - [`management`]: the facade wiring both into a synchronizer

pub mod auth;
pub mod client;
pub mod management;

pub use auth::ClientCredentialsTokenProvider;
pub use client::UmapiClient;
pub use management::ImsUserManagement;
