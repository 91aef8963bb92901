// RIASEC career-interest assessment: question bank, scoring and trait reference data.

pub mod handlers;
pub mod questions;
pub mod scoring;
pub mod store;
pub mod traits;

pub use traits::RiasecTrait;
