// Student profiles: editable details, S3-backed images and the public view.

pub mod handlers;
pub mod images;
pub mod store;
