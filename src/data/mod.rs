//! Data-access collaborator
//!
//! Handlers read business records through [`DataAccess`]. The factory holds
//! one shared instance and injects it into every handler it builds; handlers
//! never open their own connections.

mod error;
mod memory;
mod traits;
mod value;

pub use error::{DataError, DataResult};
pub use memory::MemoryDataAccess;
pub use traits::{DataAccess, QueryResult};
pub use value::{Row, Value};
