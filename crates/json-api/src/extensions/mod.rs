//! Extension traits

mod depot;
mod path;
mod query;

pub(crate) use depot::DepotExt as _;
pub(crate) use path::PathUuidExt as _;
pub(crate) use query::IntQueryExt as _;
