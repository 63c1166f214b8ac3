//! Wire types exchanged with the backend.

pub mod ai;
pub mod resource;
pub mod taxonomy;
pub mod timestamp;
pub mod token;
pub mod user;

pub use ai::*;
pub use resource::*;
pub use taxonomy::*;
pub use token::*;
pub use user::*;
