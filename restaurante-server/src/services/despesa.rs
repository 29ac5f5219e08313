//! Despesa Service

use shared::models::{Despesa, DespesaCreate};
use sqlx::SqlitePool;

use super::{acquire, begin, commit};
use crate::db::repository::despesa as repo;
use crate::money;
use crate::utils::validation::{MAX_NAME_LEN, MAX_NOTE_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone, Debug)]
pub struct DespesaService {
    pool: SqlitePool,
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::DespesaNotFound, format!("Despesa {id} not found"))
        .with_detail("id", id)
}

/// Trim text fields and round `valor` to cents
fn validate(data: DespesaCreate) -> AppResult<DespesaCreate> {
    let descricao = data.descricao.trim().to_string();
    let categoria = data.categoria.trim().to_string();
    validate_required_text(&descricao, "descricao", MAX_NOTE_LEN)?;
    validate_required_text(&categoria, "categoria", MAX_NAME_LEN)?;
    let valor = money::validate_valor(data.valor)?;

    Ok(DespesaCreate {
        descricao,
        categoria,
        valor,
        data: data.data,
    })
}

impl DespesaService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_all_despesas(&self) -> AppResult<Vec<Despesa>> {
        let mut conn = acquire(&self.pool).await?;
        Ok(repo::find_all(&mut conn).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Despesa> {
        let mut conn = acquire(&self.pool).await?;
        repo::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create_despesa(&self, data: DespesaCreate) -> AppResult<Despesa> {
        let data = validate(data)?;
        let now = shared::util::now_millis();

        let mut tx = begin(&self.pool).await?;
        let despesa = repo::create(&mut tx, &data, now).await?;
        commit(tx).await?;

        tracing::info!(id = despesa.id, categoria = %despesa.categoria, valor = %despesa.valor, "Despesa created");
        Ok(despesa)
    }

    /// Replace every field. An omitted `data` keeps the stored date.
    pub async fn update(&self, id: i64, data: DespesaCreate) -> AppResult<Despesa> {
        let data = validate(data)?;

        let mut tx = begin(&self.pool).await?;
        if repo::find_by_id(&mut tx, id).await?.is_none() {
            return Err(not_found(id));
        }
        let despesa = repo::update(&mut tx, id, &data).await?;
        commit(tx).await?;

        tracing::info!(id, valor = %despesa.valor, "Despesa updated");
        Ok(despesa)
    }

    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut tx = begin(&self.pool).await?;
        if !repo::delete(&mut tx, id).await? {
            return Err(not_found(id));
        }
        commit(tx).await?;

        tracing::info!(id, "Despesa deleted");
        Ok(())
    }
}
