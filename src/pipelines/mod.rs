//! Entry pipelines: source in, canonical [`Recipe`](crate::model::Recipe) out.

pub mod text;
pub mod url;
