pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, TokenKind};
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;
