use thiserror::Error;

/// Invalid input passed to a [`crate::Movie`] mutation.
///
/// Mutations are all-or-nothing: when one of these is returned the receiver is unchanged.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum MovieError {
    /// Two items in the resulting frame list share an id.
    #[error("duplicate item id at index {index} (first seen at index {first})")]
    DuplicateId { first: usize, index: usize },

    /// A height was negative, infinite or NaN.
    #[error("invalid height {height} for frame {index}")]
    InvalidHeight { index: usize, height: f64 },
}
