//! Authentication boundary
//!
//! Requests arrive with a JWT resolving to a principal of
//! `{business_id, actor_id, role}`:
//! - [`JwtService`]: token generation and validation
//! - [`CurrentUser`]: the authenticated principal, extracted per request

pub mod extractor;
pub mod jwt;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
