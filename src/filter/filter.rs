use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FilterClause, FilterOrderInfo, PageRequest, SqlParam, SqlResult};
use crate::config::CatalogConfig;
use crate::database::models::{Product, ProductCategory};

/// Composable product search: optional clauses combined by AND.
///
/// Absent filters are simply not added, so an empty filter matches every
/// product and renders without a WHERE clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    clauses: Vec<FilterClause>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw query-string values.
    pub fn from_query(name: Option<&str>, category: Option<&str>) -> Result<Self, FilterError> {
        let category = category
            .filter(|c| !c.is_empty())
            .map(|c| c.parse::<ProductCategory>().map_err(|_| FilterError::UnknownCategory(c.to_string())))
            .transpose()?;
        Ok(Self::new().name_contains(name).category(category))
    }

    /// Blank names are treated as absent.
    pub fn name_contains(mut self, name: Option<&str>) -> Self {
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            self.clauses.push(FilterClause::NameContains(name.to_string()));
        }
        self
    }

    pub fn category(mut self, category: Option<ProductCategory>) -> Self {
        if let Some(category) = category {
            self.clauses.push(FilterClause::CategoryEquals(category));
        }
        self
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluate the same predicate the SQL rendering expresses.
    pub fn matches(&self, product: &Product) -> bool {
        self.clauses.iter().all(|clause| match clause {
            FilterClause::NameContains(name) => product.name.to_uppercase().contains(&name.to_uppercase()),
            FilterClause::CategoryEquals(category) => product.category == *category,
        })
    }

    /// Full paged SELECT for `table`, ordered by name.
    pub fn to_sql(&self, table: &str, columns: &[&str], page: PageRequest) -> SqlResult {
        let (where_clause, mut params) = FilterWhere::generate(&self.clauses, 0);
        let order: Vec<FilterOrderInfo> = FilterOrder::by_name();
        let order_clause = FilterOrder::generate(&order);

        let limit_index = params.len() + 1;
        let offset_index = params.len() + 2;
        params.push(SqlParam::Int(i64::from(page.size)));
        params.push(SqlParam::Int(i64::try_from(page.offset()).unwrap_or(i64::MAX)));

        let select_clause = columns.iter().map(|c| format!("\"{}\"", c)).collect::<Vec<_>>().join(", ");
        let query = [
            format!("SELECT {}", select_clause),
            format!("FROM \"{}\"", table),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            order_clause,
            format!("LIMIT ${} OFFSET ${}", limit_index, offset_index),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }
}

impl PageRequest {
    /// Resolve query-string paging against the catalogue limits.
    ///
    /// Sizes above the configured maximum are capped rather than rejected.
    pub fn resolve(page: Option<i64>, size: Option<i64>, catalog: &CatalogConfig) -> Result<Self, FilterError> {
        let page = page.unwrap_or(0);
        if page < 0 {
            return Err(FilterError::InvalidPage);
        }
        let size = size.unwrap_or_else(|| i64::from(catalog.default_page_size));
        if size < 1 {
            return Err(FilterError::InvalidPageSize);
        }

        let max_size = i64::from(catalog.max_page_size);
        let applied_size = if size > max_size {
            tracing::warn!("Page size {} exceeds max {}, capping to max", size, max_size);
            max_size
        } else {
            size
        };

        Ok(Self {
            page: u32::try_from(page).unwrap_or(u32::MAX),
            size: u32::try_from(applied_size).unwrap_or(catalog.max_page_size),
        })
    }
}
