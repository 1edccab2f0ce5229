pub mod enriched;
pub mod language;
pub mod resolution;
pub mod schema;
pub mod translation;

pub use enriched::*;
pub use language::*;
pub use resolution::*;
pub use schema::*;
pub use translation::*;
