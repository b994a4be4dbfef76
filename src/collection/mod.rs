//! Collection flattening (nested folder tree -> flat route list)

mod parser;

pub use parser::flatten;
