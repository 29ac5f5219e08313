//! Alimento Model

use serde::{Deserialize, Serialize};

/// Alimento entity (food/ingredient inventory item)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Alimento {
    pub id: i64,
    /// Unique business name
    pub nome: String,
    /// Units in stock, never negative
    pub quantidade: i32,
}

/// Create alimento payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlimentoCreate {
    pub nome: String,
    pub quantidade: i32,
}

/// Full update payload (every mutable field is replaced)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlimentoUpdate {
    pub nome: String,
    pub quantidade: i32,
}

/// Stock-only update payload
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuantidadeUpdate {
    pub quantidade: i32,
}

impl From<AlimentoUpdate> for AlimentoCreate {
    fn from(update: AlimentoUpdate) -> Self {
        Self {
            nome: update.nome,
            quantidade: update.quantidade,
        }
    }
}
