//! Custom request extractors mapping rejections onto `AppError`.

mod id_path;
mod list_query;
mod validated_json;

pub use id_path::IdPath;
pub use list_query::ListQuery;
pub use validated_json::ValidatedJson;
