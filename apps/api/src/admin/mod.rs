// Admin accounts: startup bootstrap, site statistics and admin grants.

pub mod bootstrap;
pub mod handlers;
pub mod store;
