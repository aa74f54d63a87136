use super::types::{FilterClause, SqlParam};

/// Renders filter clauses into a parameterised WHERE body.
pub struct FilterWhere {
    param_values: Vec<SqlParam>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Returns an empty string when there are no clauses, so callers can omit WHERE.
    pub fn generate(clauses: &[FilterClause], starting_param_index: usize) -> (String, Vec<SqlParam>) {
        let mut filter_where = Self::new(starting_param_index);
        let conditions: Vec<String> = clauses.iter().map(|c| filter_where.build_condition(c)).collect();
        (conditions.join(" AND "), filter_where.param_values)
    }

    fn build_condition(&mut self, clause: &FilterClause) -> String {
        match clause {
            FilterClause::NameContains(name) => {
                let placeholder = self.push(SqlParam::Text(format!("%{}%", escape_like(&name.to_uppercase()))));
                format!("UPPER(\"name\") LIKE {} ESCAPE '\\'", placeholder)
            }
            FilterClause::CategoryEquals(category) => {
                let placeholder = self.push(SqlParam::Text(category.as_str().to_string()));
                format!("\"category\" = {}", placeholder)
            }
        }
    }

    fn push(&mut self, value: SqlParam) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Escape LIKE wildcards so user input only ever matches literally.
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
