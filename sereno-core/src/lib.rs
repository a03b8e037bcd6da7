pub mod error;
pub mod models;
pub mod reference;
pub mod validate;

pub use error::Error;
