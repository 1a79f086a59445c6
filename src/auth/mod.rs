//! Session issuance and token resolution.

pub mod bearer;
pub mod token;

pub use bearer::bearer_token;
pub use token::{Claims, PrincipalKind, TokenSigner, TOKEN_TTL_SECS};
