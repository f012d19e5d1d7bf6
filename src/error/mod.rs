mod io;
mod parser;
mod resolve;
mod schema;
mod store;

pub use io::IoError;
pub use parser::ParserError;
pub use resolve::ResolveError;
pub use schema::SchemaError;
pub use store::StoreError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, Error>;
