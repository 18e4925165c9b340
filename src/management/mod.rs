mod auth;

pub use auth::AppTokenManager;
pub use auth::TokenManager;
