mod string;

pub use string::{collection_name, pluralize};
