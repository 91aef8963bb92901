// Course graph access: keyword search, dependency trees and saved-course playlists.

pub mod handlers;
pub mod keywords;
pub mod playlist;
pub mod search;
pub mod store;
pub mod tree;
