pub mod chat;
pub mod course;
pub mod mark;
pub mod user;
