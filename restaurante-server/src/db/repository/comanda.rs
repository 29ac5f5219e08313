//! Comanda Repository
//!
//! A comanda is stored as one `comanda` row plus its ordered `item_comanda`
//! lines. Reads always return the aggregate with its lines attached.

use super::{RepoError, RepoResult};
use shared::models::{Comanda, ComandaCreate, ItemComanda, ItemComandaInput};
use sqlx::SqliteConnection;
use std::collections::HashMap;

const SELECT_COMANDA: &str = "SELECT id, mesa, observacao, criada_em, atualizada_em FROM comanda";

/// Line item joined with its owning comanda id, used when loading many orders at once
#[derive(sqlx::FromRow)]
struct ItemRow {
    comanda_id: i64,
    alimento_id: i64,
    nome: String,
    quantidade: i32,
}

pub async fn find_all(conn: &mut SqliteConnection) -> RepoResult<Vec<Comanda>> {
    let comandas = sqlx::query_as::<_, Comanda>(&format!("{SELECT_COMANDA} ORDER BY id"))
        .fetch_all(&mut *conn)
        .await?;

    let rows = sqlx::query_as::<_, ItemRow>(
        "SELECT i.comanda_id, i.alimento_id, a.nome, i.quantidade FROM item_comanda i JOIN alimento a ON a.id = i.alimento_id ORDER BY i.comanda_id, i.posicao",
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut itens: HashMap<i64, Vec<ItemComanda>> = HashMap::new();
    for row in rows {
        itens.entry(row.comanda_id).or_default().push(ItemComanda {
            alimento_id: row.alimento_id,
            nome: row.nome,
            quantidade: row.quantidade,
        });
    }

    Ok(comandas
        .into_iter()
        .map(|c| {
            let lines = itens.remove(&c.id).unwrap_or_default();
            c.with_itens(lines)
        })
        .collect())
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> RepoResult<Option<Comanda>> {
    let comanda = sqlx::query_as::<_, Comanda>(&format!("{SELECT_COMANDA} WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    match comanda {
        Some(comanda) => {
            let itens = find_itens(conn, id).await?;
            Ok(Some(comanda.with_itens(itens)))
        }
        None => Ok(None),
    }
}

pub async fn find_itens(conn: &mut SqliteConnection, comanda_id: i64) -> RepoResult<Vec<ItemComanda>> {
    let itens = sqlx::query_as::<_, ItemComanda>(
        "SELECT i.alimento_id, a.nome, i.quantidade FROM item_comanda i JOIN alimento a ON a.id = i.alimento_id WHERE i.comanda_id = ? ORDER BY i.posicao",
    )
    .bind(comanda_id)
    .fetch_all(&mut *conn)
    .await?;
    Ok(itens)
}

/// Insert the comanda header and return its id. Lines go through [`insert_itens`].
pub async fn insert(conn: &mut SqliteConnection, data: &ComandaCreate, now: i64) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO comanda (mesa, observacao, criada_em, atualizada_em) VALUES (?1, ?2, ?3, ?3) RETURNING id",
    )
    .bind(data.mesa)
    .bind(&data.observacao)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn update_header(
    conn: &mut SqliteConnection,
    id: i64,
    data: &ComandaCreate,
    now: i64,
) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE comanda SET mesa = ?, observacao = ?, atualizada_em = ? WHERE id = ?")
        .bind(data.mesa)
        .bind(&data.observacao)
        .bind(now)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("comanda {id}")));
    }
    Ok(())
}

pub async fn insert_itens(
    conn: &mut SqliteConnection,
    comanda_id: i64,
    itens: &[ItemComandaInput],
) -> RepoResult<()> {
    for (posicao, item) in itens.iter().enumerate() {
        sqlx::query(
            "INSERT INTO item_comanda (comanda_id, alimento_id, posicao, quantidade) VALUES (?, ?, ?, ?)",
        )
        .bind(comanda_id)
        .bind(item.alimento_id)
        .bind(posicao as i64)
        .bind(item.quantidade)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

pub async fn delete_itens(conn: &mut SqliteConnection, comanda_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM item_comanda WHERE comanda_id = ?")
        .bind(comanda_id)
        .execute(&mut *conn)
        .await?;
    Ok(rows.rows_affected())
}
