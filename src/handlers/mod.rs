pub mod dashboard;
pub mod fallback;
