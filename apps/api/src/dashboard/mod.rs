// Home summary and the onboarded student's RIASEC dashboard.

pub mod handlers;
pub mod stats;
