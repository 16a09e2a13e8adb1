pub mod username;
pub mod validation;

pub use username::Username;
