//! Filter compiler.
//!
//! Client filters are a map of wire field name to string. Every recognised,
//! non-empty pair becomes a clause "the stored value, read as text, contains
//! this string" (case-sensitive) and the clauses are ANDed.
//!
//! Numeric and timestamp columns are matched on their stored text form too;
//! there is no range or exact-value comparison.

use std::collections::BTreeMap;

use sea_orm::{ColumnTrait, Condition, IdenStatic, sea_query::Expr};

use crate::{
    sales,
    schema::{Field, FieldKind},
};

/// A conjunctive selection over sales records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Predicate {
    clauses: BTreeMap<Field, String>,
    id: Option<i32>,
}

impl Predicate {
    /// The predicate every record satisfies.
    pub fn all() -> Self {
        Self::default()
    }

    /// Select the record with the given identifier.
    pub fn by_id(id: i32) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Compile a client filter map.
    ///
    /// Keys outside the schema and empty values are skipped. Clauses are kept
    /// in schema order, so the resulting query does not depend on the order
    /// the client sent them in.
    pub fn compile<I, K, V>(filters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let clauses = filters
            .into_iter()
            .filter(|(_, value)| !value.as_ref().is_empty())
            .filter_map(|(key, value)| {
                Field::parse(key.as_ref()).map(|field| (field, value.as_ref().to_string()))
            })
            .collect();
        Self { clauses, id: None }
    }

    /// Lower the predicate to a sea-orm condition.
    ///
    /// `instr` is used instead of `LIKE`: SQLite's `LIKE` folds ASCII case
    /// and treats `%`/`_` in the needle as wildcards. Non-text columns are
    /// matched on SQLite's own text rendering, so `1e-7` reads `1.0e-07`.
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();
        if let Some(id) = self.id {
            condition = condition.add(sales::Column::Id.eq(id));
        }
        for (field, value) in &self.clauses {
            let column = field.column();
            let haystack = match field.descriptor().kind {
                FieldKind::Text => format!("\"{}\"", column.as_str()),
                _ => format!("CAST(\"{}\" AS TEXT)", column.as_str()),
            };
            condition = condition.add(Expr::cust_with_values(
                format!("instr({haystack}, ?) > 0"),
                [value.clone()],
            ));
        }
        condition
    }
}
