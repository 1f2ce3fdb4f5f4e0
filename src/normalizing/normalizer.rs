use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::fields::{standardize_amount, standardize_date, standardize_text};
use super::{FieldError, FieldMapping, NormalizeError};

/// One input record keyed by header name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> RawRow {
        RawRow::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Columns the row does not have read as the empty string.
    pub fn field(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> RawRow {
        RawRow {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Field order here is the column order of the written CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionBatch {
    transactions: Vec<CanonicalTransaction>,
}

impl TransactionBatch {
    pub fn transactions(&self) -> &[CanonicalTransaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

pub fn normalize_row(row: &RawRow, mapping: &FieldMapping) -> Result<CanonicalTransaction, FieldError> {
    Ok(CanonicalTransaction {
        date: standardize_date(row.field(mapping.date_field()))?,
        description: standardize_text(row.field(mapping.description_field())),
        amount: standardize_amount(row.field(mapping.amount_field()))?,
        category: standardize_text(row.field(mapping.category_field())),
    })
}

/// Normalizes every row in order. The first bad row fails the whole batch.
pub fn normalize<I>(rows: I, mapping: &FieldMapping) -> Result<TransactionBatch, NormalizeError>
where
    I: IntoIterator<Item = RawRow>,
{
    let transactions = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            normalize_row(&row, mapping).map_err(|kind| NormalizeError { record: index + 1, kind })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TransactionBatch { transactions })
}
