//! Multi-collection routing (mount specs, merged route table)

mod spec;
mod table;

pub use spec::CollectionSpecs;
pub use table::build_route_table;
