pub mod claims;
pub mod error;
pub mod roles;

pub use claims::{decode_claims, decode_roles, TokenClaims, NAMESPACED_ROLE_KEY};
pub use error::{ClaimsError, ClaimsResult};
pub use roles::{ROLE_ADMIN, ROLE_USER};
