pub mod directory;
pub mod listing;
pub mod search;
pub mod translation;
