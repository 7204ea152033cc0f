pub mod batch;
pub mod encode;
