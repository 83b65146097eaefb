pub mod models;
mod transcript;

pub use models::*;
pub use transcript::*;
