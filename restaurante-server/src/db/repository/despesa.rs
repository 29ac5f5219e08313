//! Despesa Repository

use super::{RepoError, RepoResult};
use crate::money;
use chrono::NaiveDate;
use shared::models::{Despesa, DespesaCreate};
use sqlx::SqliteConnection;

const SELECT_DESPESA: &str =
    "SELECT id, descricao, categoria, valor_centavos, data, criada_em FROM despesa";

/// Storage shape of a despesa, money kept as integer cents
#[derive(sqlx::FromRow)]
struct DespesaRow {
    id: i64,
    descricao: String,
    categoria: String,
    valor_centavos: i64,
    data: NaiveDate,
    criada_em: i64,
}

impl From<DespesaRow> for Despesa {
    fn from(row: DespesaRow) -> Self {
        Self {
            id: row.id,
            descricao: row.descricao,
            categoria: row.categoria,
            valor: money::from_cents(row.valor_centavos),
            data: row.data,
            criada_em: row.criada_em,
        }
    }
}

fn cents(data: &DespesaCreate) -> RepoResult<i64> {
    money::to_cents(data.valor)
        .ok_or_else(|| RepoError::Validation(format!("valor out of range: {}", data.valor)))
}

/// Most recent first
pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Despesa>> {
    let rows = sqlx::query_as::<_, DespesaRow>(&format!(
        "{SELECT_DESPESA} ORDER BY data DESC, id DESC"
    ))
    .fetch_all(&mut *conn)
    .await?;
    Ok(rows.into_iter().map(Despesa::from).collect())
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Despesa>> {
    let row = sqlx::query_as::<_, DespesaRow>(&format!("{SELECT_DESPESA} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row.map(Despesa::from))
}

/// Insert a despesa. A missing `data` means today (UTC).
pub async fn create(
    conn: &mut SqliteConnection,
    data: &DespesaCreate,
    now: i64,
) -> RepoResult<Despesa> {
    let valor_centavos = cents(data)?;
    let dia = data.data.unwrap_or_else(shared::util::today);

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO despesa (descricao, categoria, valor_centavos, data, criada_em) VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.descricao)
    .bind(&data.categoria)
    .bind(valor_centavos)
    .bind(dia)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create despesa".into()))
}

/// Replace every field. A missing `data` keeps the stored date.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: &DespesaCreate,
) -> RepoResult<Despesa> {
    let valor_centavos = cents(data)?;

    let rows = sqlx::query(
        "UPDATE despesa SET descricao = ?, categoria = ?, valor_centavos = ?, data = COALESCE(?, data) WHERE id = ?",
    )
    .bind(&data.descricao)
    .bind(&data.categoria)
    .bind(valor_centavos)
    .bind(data.data)
    .bind(id)
    .execute(&mut *conn)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("despesa {id}")));
    }

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("despesa {id}")))
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM despesa WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
