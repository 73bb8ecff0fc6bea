//! Shared request/response types.

mod pagination;
mod response;

pub use pagination::{ListParams, ListQueryParams, ListResponse};
pub use response::{Created, IdResponse, NoContent};
