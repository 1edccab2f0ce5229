pub mod cache;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod inference;
pub mod inspect;
pub mod logging;
pub mod schema;
pub mod source;
pub mod translation;
pub mod util;

pub use config::Settings;
pub use engine::SchemaEngine;
pub use error::{Result, VtscopeError};
pub use inference::TypeInference;
pub use schema::SchemaModel;
pub use translation::TranslationTable;
