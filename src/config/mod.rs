mod token;

pub use token::{AccessToken, TokenReadError};
