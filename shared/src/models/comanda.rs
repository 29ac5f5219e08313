//! Comanda Model

use serde::{Deserialize, Serialize};

/// Comanda entity (customer order)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Comanda {
    pub id: i64,
    /// Table number, if the order is bound to one
    pub mesa: Option<i32>,
    pub observacao: Option<String>,
    pub criada_em: i64,
    pub atualizada_em: i64,

    // -- Relations (populated by application code, skipped by FromRow) --

    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub itens: Vec<ItemComanda>,
    /// Sum of item quantities
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub total_itens: i64,
}

impl Comanda {
    /// Attach line items and recompute the derived totals
    pub fn with_itens(mut self, itens: Vec<ItemComanda>) -> Self {
        self.total_itens = itens.iter().map(|i| i64::from(i.quantidade)).sum();
        self.itens = itens;
        self
    }
}

/// Order line (independent table, owned by the comanda)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ItemComanda {
    pub alimento_id: i64,
    /// Name of the referenced alimento at read time
    pub nome: String,
    pub quantidade: i32,
}

/// Create / replace comanda payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComandaCreate {
    pub mesa: Option<i32>,
    pub observacao: Option<String>,
    #[serde(default)]
    pub itens: Vec<ItemComandaInput>,
}

/// Order line input (for create/update)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemComandaInput {
    pub alimento_id: i64,
    pub quantidade: i32,
}
