pub mod collector;
pub mod history;
pub mod metric;
pub mod snapshot;
pub mod source;
