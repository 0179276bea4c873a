pub mod tokens;

pub use tokens::TokenCache;
