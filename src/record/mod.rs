//! Schema and row data model shared by the decode and encode paths.

#[cfg(feature = "arrow")]
mod batch;
mod data_type;
mod row;
mod schema;
mod value;

#[cfg(feature = "arrow")]
pub use batch::*;
pub use data_type::*;
pub use row::*;
pub use schema::*;
pub use value::*;
