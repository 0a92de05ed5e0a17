//! Column commands

mod create;
mod delete;
mod update;

pub use create::CreateColumn;
pub use delete::DeleteColumn;
pub use update::UpdateColumn;
