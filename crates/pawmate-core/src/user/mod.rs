//! User domain module.

mod model;
mod repository;

pub use model::{Position, UserProfile};
pub use repository::UserRepository;
