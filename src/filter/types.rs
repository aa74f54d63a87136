use crate::database::models::ProductCategory;

/// One optional predicate of a product search. Clauses are always ANDed.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Case-insensitive substring match on the product name.
    NameContains(String),
    CategoryEquals(ProductCategory),
}

/// Ascending sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub column: &'static str,
}

/// Value bound to a numbered `$n` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Int(i64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}

/// Zero-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}
