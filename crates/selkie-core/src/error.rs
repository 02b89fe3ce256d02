pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid skeleton JSON: {message}")]
    InvalidSkeletonJson { message: String },

    #[error("Duplicate element id: {id}")]
    DuplicateId { id: String },

    #[error("Connector {id} references itself as both endpoints")]
    SelfReferentialBinding { id: String },
}
