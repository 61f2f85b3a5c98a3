pub mod cursor;
pub mod error;
pub mod service;

pub use cursor::{filter_by_display_name, ListingCursor};
pub use error::ListingError;
pub use service::{ListingService, ListingServiceApi, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
