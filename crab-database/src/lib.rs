pub mod database;
pub mod impls;
pub mod model;
pub mod prompts;
pub mod store;

pub use database::Database;
pub use prompts::{ActivePrompt, PromptRegistry};
