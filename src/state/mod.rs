//! Application state module

mod app_state;
mod directory;
mod forms;
mod nullable;
mod schema;

pub use app_state::*;
pub use directory::*;
pub use forms::*;
pub use schema::*;
