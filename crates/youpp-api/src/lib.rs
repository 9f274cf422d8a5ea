// youpp-api: Async Rust client for the youpp site-builder backend.

pub mod auth;
pub mod client;
pub mod error;
pub mod public;
pub mod session;
pub mod sites;
pub mod transport;
pub mod types;

pub use auth::{
    ACCESS_TOKEN_KEY, MemoryTokenStore, NoopTokenStore, REFRESH_TOKEN_KEY, SessionHook,
    TokenPair, TokenStore,
};
pub use client::{API_BASE_URL_SETTING, ApiClient, RequestOptions};
pub use error::Error;
pub use public::{BACKEND_BASE_URL_SETTING, PublicClient};
pub use transport::TransportConfig;
pub use types::{PublicSiteResponse, SiteResponse};
