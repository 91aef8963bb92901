// Registration, login sessions and the onboarding gate.

pub mod extractor;
pub mod handlers;
pub mod onboarding;
pub mod password;
pub mod session;
pub mod store;

pub use extractor::{AdminUser, AuthUser};
