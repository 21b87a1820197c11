//! Authentication and authorization
//!
//! Bearer-token sessions and per-route resource checks.

mod session;

pub use session::{auth_middleware, bearer_token, fill_responsible_user, require};
