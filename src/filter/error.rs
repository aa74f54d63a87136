use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Page index must not be less than zero")]
    InvalidPage,

    #[error("Page size must not be less than one")]
    InvalidPageSize,

    #[error("Unknown product category: {0}")]
    UnknownCategory(String),
}

impl FilterError {
    /// Query parameter the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            FilterError::InvalidPage => "page",
            FilterError::InvalidPageSize => "size",
            FilterError::UnknownCategory(_) => "productCategory",
        }
    }
}
