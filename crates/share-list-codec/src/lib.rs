pub mod codec;
pub mod compress;
pub mod error;
pub mod link;
pub mod wire;

pub use codec::{decode, encode, try_decode, try_encode};
pub use error::DecodeError;
pub use link::{extract_token, share_link};
