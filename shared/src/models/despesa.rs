//! Despesa Model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Despesa entity (recorded business expense)
///
/// `valor` is exact: persisted as integer cents, exposed as a JSON number
/// with at most two fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Despesa {
    pub id: i64,
    pub descricao: String,
    pub categoria: String,
    pub valor: Decimal,
    /// Date the expense applies to (YYYY-MM-DD)
    pub data: NaiveDate,
    pub criada_em: i64,
}

/// Create / replace despesa payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DespesaCreate {
    pub descricao: String,
    pub categoria: String,
    pub valor: Decimal,
    /// Defaults to today when omitted
    pub data: Option<NaiveDate>,
}
