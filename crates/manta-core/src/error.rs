pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid JSON input: {message}")]
    InvalidJson { message: String },

    #[error("Invalid XML input: {message}")]
    InvalidXml { message: String },

    #[error("Duplicate node id `{id}` at `{path}`: sibling keys normalize to the same identifier")]
    DuplicateNodeId { id: String, path: String },
}
