pub mod directory;
pub mod factory;
pub mod filter;
pub mod fingerprint;
pub mod token_codec;

#[cfg(test)]
pub mod test_support;

pub use factory::build_authentication_filter;
pub use filter::{AuthOutcome, AuthenticationFilter};
