/// docseed
///
/// Seeds a document store from YAML fixture files. Fixture entries may
/// reference entries of other collections by key and may carry embedded
/// documents; loading a class resolves its references, persists every entry
/// and reuses records the store already holds.
pub mod cli;
pub mod error;
pub mod fixtures;
pub mod instance;
pub mod loader;
pub mod logging;
pub mod output;
pub mod schema;
pub mod store;
pub mod utils;

pub use error::{Error, Result};
pub use fixtures::{FieldValue, FixtureRegistry, FixtureSource};
pub use instance::{DocumentId, Instance};
pub use loader::{FixtureLoader, InstanceRegistry};
pub use schema::{ModelSchema, Schema};
pub use store::{DocumentStore, MemoryStore};
