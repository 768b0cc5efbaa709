// src/types/mod.rs
//! Domain types: identifiers, the verbose property model, records, and the
//! simplified projection output.

mod ids;
mod properties;
mod record;
mod simple;

pub use ids::*;
pub use properties::*;
pub use record::*;
pub use simple::*;
