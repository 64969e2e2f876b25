//! Service layer for lockout logic
//!
//! Services encapsulate the lockout rules on top of an [`AttemptRepository`](crate::repositories::AttemptRepository).

pub mod guard;
pub mod login;

pub use guard::LoginAttemptGuard;
pub use login::{Authenticator, LoginFlow};
