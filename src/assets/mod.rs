pub mod decode;
pub mod fonts;
