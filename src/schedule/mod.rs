pub mod collate;
pub mod date;
pub mod filter;
pub mod join;
pub mod record;
