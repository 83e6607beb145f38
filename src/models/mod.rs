//! Request option and payload types.

mod framework;
mod options;
mod query;

pub use framework::*;
pub use options::*;
pub use query::*;
