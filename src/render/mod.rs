pub mod card;
pub mod text;
