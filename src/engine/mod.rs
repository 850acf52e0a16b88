pub mod classify;
pub mod clock;
pub mod duration;
pub mod error;
pub mod report;
pub mod store;
