pub mod client;
pub mod oauth;

pub use client::TwitterClient;
pub use oauth::OAuthSigner;
