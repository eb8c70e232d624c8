use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallMatrixError {
    #[error("Kit {name} is at position {position} but carries index {index}")]
    NonCanonicalKit {
        name: String,
        position: usize,
        index: usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
