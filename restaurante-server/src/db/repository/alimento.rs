//! Alimento Repository

use super::{RepoError, RepoResult};
use shared::models::{Alimento, AlimentoCreate, AlimentoUpdate};
use sqlx::SqliteConnection;

const SELECT_ALIMENTO: &str = "SELECT id, nome, quantidade FROM alimento";

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Alimento>> {
    let rows = sqlx::query_as::<_, Alimento>(&format!("{SELECT_ALIMENTO} ORDER BY id"))
        .fetch_all(&mut *conn)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Alimento>> {
    let row = sqlx::query_as::<_, Alimento>(&format!("{SELECT_ALIMENTO} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn find_by_nome(conn: &mut SqliteConnection, nome: &str) -> RepoResult<Option<Alimento>> {
    let row = sqlx::query_as::<_, Alimento>(&format!("{SELECT_ALIMENTO} WHERE nome = ?"))
        .bind(nome)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(row)
}

pub async fn create(conn: &mut SqliteConnection, data: &AlimentoCreate) -> RepoResult<Alimento> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO alimento (nome, quantidade) VALUES (?, ?) RETURNING id",
    )
    .bind(&data.nome)
    .bind(data.quantidade)
    .fetch_one(&mut *conn)
    .await?;

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create alimento".into()))
}

pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    data: &AlimentoUpdate,
) -> RepoResult<Alimento> {
    let rows = sqlx::query("UPDATE alimento SET nome = ?, quantidade = ? WHERE id = ?")
        .bind(&data.nome)
        .bind(data.quantidade)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("alimento {id}")));
    }

    find_by_id(conn, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("alimento {id}")))
}

pub async fn set_quantidade(conn: &mut SqliteConnection, id: i64, quantidade: i32) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE alimento SET quantidade = ? WHERE id = ?")
        .bind(quantidade)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("alimento {id}")));
    }
    Ok(())
}

/// Add `delta` to the stock of an alimento.
///
/// Returns `false` without touching the row when the result would leave the
/// `0..=i32::MAX` range (or the row does not exist).
pub async fn adjust_quantidade(conn: &mut SqliteConnection, id: i64, delta: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE alimento SET quantidade = quantidade + ?1 WHERE id = ?2 AND quantidade + ?1 BETWEEN 0 AND ?3",
    )
    .bind(delta)
    .bind(id)
    .bind(i64::from(i32::MAX))
    .execute(&mut *conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Number of order lines pointing at this alimento
pub async fn count_references(conn: &mut SqliteConnection, id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM item_comanda WHERE alimento_id = ?")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM alimento WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}
