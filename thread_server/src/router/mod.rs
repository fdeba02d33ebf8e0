pub mod cache;
pub mod page;
pub mod pdf;
