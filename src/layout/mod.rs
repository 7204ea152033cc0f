pub mod resolve;
pub mod spec;
