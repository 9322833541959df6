use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use super::{Column, FieldType, Schema};

/// Header names stored as TEXT. Every other header is INTEGER.
static FIELD_TYPES: Lazy<HashMap<&'static str, FieldType>> = Lazy::new(|| {
    ["name", "last_name", "guild_name", "deity", "gender", "class", "race"]
        .into_iter()
        .map(|n| (n, FieldType::Text))
        .collect()
});

/// Classify a header name. Values are never inspected.
pub fn field_type_for(name: &str) -> FieldType {
    FIELD_TYPES.get(name).copied().unwrap_or(FieldType::Integer)
}

impl Schema {
    /// Build the descriptor from a header record, keeping header order.
    pub fn from_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<Column> = header
            .into_iter()
            .map(|raw| {
                let name = raw.as_ref().to_string();
                let ty = field_type_for(&name);
                Column { name, ty }
            })
            .collect();
        debug!(columns = columns.len(), "derived schema from header");
        Schema { columns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_allow_list_is_static() {
        for n in ["name", "last_name", "guild_name", "deity", "gender", "class", "race"] {
            assert_eq!(field_type_for(n), FieldType::Text, "{n}");
        }
        assert_eq!(field_type_for("hp_max_total"), FieldType::Integer);
        assert_eq!(field_type_for("Name"), FieldType::Integer);
        assert_eq!(field_type_for("anything_else"), FieldType::Integer);
    }

    #[test]
    fn header_order_is_preserved() {
        let schema = Schema::from_header(["race", "level", "name"]);
        assert_eq!(schema.names(), vec!["race", "level", "name"]);
        assert_eq!(
            schema.columns.iter().map(|c| c.ty).collect::<Vec<_>>(),
            vec![FieldType::Text, FieldType::Integer, FieldType::Text]
        );
        assert_eq!(schema.sorted_names(), vec!["level", "name", "race"]);
    }
}
