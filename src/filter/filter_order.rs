use super::types::FilterOrderInfo;

pub struct FilterOrder;

impl FilterOrder {
    /// Listing order: name ascending, id as a stable tie-breaker for paging.
    pub fn by_name() -> Vec<FilterOrderInfo> {
        vec![
            FilterOrderInfo { column: "name" },
            FilterOrderInfo { column: "id" },
        ]
    }

    pub fn generate(infos: &[FilterOrderInfo]) -> String {
        if infos.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = infos
            .iter()
            .map(|i| format!("\"{}\" ASC", i.column))
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_order_by_clause() {
        assert_eq!(FilterOrder::generate(&FilterOrder::by_name()), "ORDER BY \"name\" ASC, \"id\" ASC");
        assert_eq!(FilterOrder::generate(&[]), "");
    }
}
