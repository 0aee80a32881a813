pub mod error;
pub use error::Result;
pub use error::Error;

pub mod config;
pub use config::Config;

pub mod recipedb;
pub use recipedb::RecipeDB;

pub mod marks;
pub use marks::{OwnedMarks, DirectObtainMarks, LineageMarks, LineageTag};

pub mod breeding_tree;
pub use breeding_tree::DisplayTreeNode;

pub mod search;
pub mod progress;
pub use progress::ProgressRegistry;

pub mod build_session;
