mod builders;

pub use builders::{push_name, WireQueryBuilder};
