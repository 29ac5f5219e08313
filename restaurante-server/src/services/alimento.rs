//! Alimento Service
//!
//! Inventory items. `nome` is unique; the name-keyed operations resolve the
//! name to the immutable id first and then work by id.

use std::collections::HashSet;

use shared::models::{Alimento, AlimentoCreate, AlimentoUpdate};
use sqlx::{SqliteConnection, SqlitePool};

use super::{acquire, begin, commit};
use crate::db::repository::{RepoError, alimento as repo};
use crate::utils::validation::{MAX_NAME_LEN, validate_min, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone, Debug)]
pub struct AlimentoService {
    pool: SqlitePool,
}

fn not_found_by_nome(nome: &str) -> AppError {
    AppError::with_message(
        ErrorCode::AlimentoNotFound,
        format!("Alimento '{nome}' not found"),
    )
    .with_detail("nome", nome)
}

fn not_found_by_id(id: i64) -> AppError {
    AppError::with_message(ErrorCode::AlimentoNotFound, format!("Alimento {id} not found"))
        .with_detail("id", id)
}

fn nome_exists(nome: &str) -> AppError {
    AppError::with_message(
        ErrorCode::AlimentoNomeExists,
        format!("Alimento '{nome}' already exists"),
    )
    .with_detail("nome", nome)
}

/// Trim the name and check both fields
fn validate(nome: &str, quantidade: i32) -> AppResult<String> {
    let nome = nome.trim();
    validate_required_text(nome, "nome", MAX_NAME_LEN)?;
    validate_min(i64::from(quantidade), "quantidade", 0)?;
    Ok(nome.to_string())
}

impl AlimentoService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Alimento>> {
        let mut conn = acquire(&self.pool).await?;
        Ok(repo::find_all(&mut conn).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Alimento> {
        let mut conn = acquire(&self.pool).await?;
        repo::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| not_found_by_id(id))
    }

    pub async fn find_by_nome(&self, nome: &str) -> AppResult<Alimento> {
        let mut conn = acquire(&self.pool).await?;
        repo::find_by_nome(&mut conn, nome)
            .await?
            .ok_or_else(|| not_found_by_nome(nome))
    }

    pub async fn create(&self, data: AlimentoCreate) -> AppResult<Alimento> {
        let data = AlimentoCreate {
            nome: validate(&data.nome, data.quantidade)?,
            quantidade: data.quantidade,
        };

        let mut tx = begin(&self.pool).await?;
        let alimento = insert_unique(&mut tx, &data).await?;
        commit(tx).await?;

        tracing::info!(id = alimento.id, nome = %alimento.nome, "Alimento created");
        Ok(alimento)
    }

    /// Create a batch atomically: either every item is stored or none is.
    pub async fn create_multiple(&self, items: Vec<AlimentoCreate>) -> AppResult<Vec<Alimento>> {
        if items.is_empty() {
            return Err(AppError::validation("at least one alimento is required"));
        }

        let items = items
            .into_iter()
            .map(|item| {
                Ok(AlimentoCreate {
                    nome: validate(&item.nome, item.quantidade)?,
                    quantidade: item.quantidade,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let mut seen = HashSet::with_capacity(items.len());
        if let Some(dup) = items.iter().find(|item| !seen.insert(item.nome.as_str())) {
            return Err(nome_exists(&dup.nome).with_detail("reason", "duplicated in batch"));
        }

        let mut tx = begin(&self.pool).await?;
        let mut created = Vec::with_capacity(items.len());
        for item in &items {
            created.push(insert_unique(&mut tx, item).await?);
        }
        commit(tx).await?;

        tracing::info!(count = created.len(), "Alimentos created");
        Ok(created)
    }

    /// Full update of the alimento currently named `nome`
    pub async fn update(&self, nome: &str, data: AlimentoUpdate) -> AppResult<Alimento> {
        let data = AlimentoUpdate {
            nome: validate(&data.nome, data.quantidade)?,
            quantidade: data.quantidade,
        };

        let mut tx = begin(&self.pool).await?;
        let existing = repo::find_by_nome(&mut tx, nome)
            .await?
            .ok_or_else(|| not_found_by_nome(nome))?;
        let alimento = update_in(&mut tx, existing.id, &data).await?;
        commit(tx).await?;

        tracing::info!(id = alimento.id, from = %nome, to = %alimento.nome, "Alimento updated");
        Ok(alimento)
    }

    pub async fn update_by_id(&self, id: i64, data: AlimentoUpdate) -> AppResult<Alimento> {
        let data = AlimentoUpdate {
            nome: validate(&data.nome, data.quantidade)?,
            quantidade: data.quantidade,
        };

        let mut tx = begin(&self.pool).await?;
        if repo::find_by_id(&mut tx, id).await?.is_none() {
            return Err(not_found_by_id(id));
        }
        let alimento = update_in(&mut tx, id, &data).await?;
        commit(tx).await?;

        tracing::info!(id, nome = %alimento.nome, "Alimento updated");
        Ok(alimento)
    }

    /// Set the stock count only. Negative values leave the record untouched.
    pub async fn update_quantidade(&self, nome: &str, quantidade: i32) -> AppResult<Alimento> {
        validate_min(i64::from(quantidade), "quantidade", 0)?;

        let mut tx = begin(&self.pool).await?;
        let existing = repo::find_by_nome(&mut tx, nome)
            .await?
            .ok_or_else(|| not_found_by_nome(nome))?;
        repo::set_quantidade(&mut tx, existing.id, quantidade).await?;
        commit(tx).await?;

        tracing::info!(id = existing.id, nome, from = existing.quantidade, to = quantidade, "Alimento stock set");
        Ok(Alimento {
            quantidade,
            ..existing
        })
    }

    pub async fn delete(&self, nome: &str) -> AppResult<()> {
        let mut tx = begin(&self.pool).await?;
        let existing = repo::find_by_nome(&mut tx, nome)
            .await?
            .ok_or_else(|| not_found_by_nome(nome))?;
        delete_in(&mut tx, &existing).await?;
        commit(tx).await?;

        tracing::info!(id = existing.id, nome, "Alimento deleted");
        Ok(())
    }

    pub async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let mut tx = begin(&self.pool).await?;
        let existing = repo::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| not_found_by_id(id))?;
        delete_in(&mut tx, &existing).await?;
        commit(tx).await?;

        tracing::info!(id, nome = %existing.nome, "Alimento deleted");
        Ok(())
    }
}

/// Insert after checking the name is free. The unique index still guards
/// against a concurrent writer slipping in between.
async fn insert_unique(conn: &mut SqliteConnection, data: &AlimentoCreate) -> AppResult<Alimento> {
    if repo::find_by_nome(conn, &data.nome).await?.is_some() {
        return Err(nome_exists(&data.nome));
    }
    repo::create(conn, data).await.map_err(|e| match e {
        RepoError::Duplicate(_) => nome_exists(&data.nome),
        other => other.into(),
    })
}

async fn update_in(conn: &mut SqliteConnection, id: i64, data: &AlimentoUpdate) -> AppResult<Alimento> {
    if let Some(other) = repo::find_by_nome(conn, &data.nome).await?
        && other.id != id
    {
        return Err(nome_exists(&data.nome));
    }
    repo::update(conn, id, data).await.map_err(|e| match e {
        RepoError::Duplicate(_) => nome_exists(&data.nome),
        RepoError::NotFound(_) => not_found_by_id(id),
        other => other.into(),
    })
}

/// Refuse to delete stock that an order still points at
async fn delete_in(conn: &mut SqliteConnection, alimento: &Alimento) -> AppResult<()> {
    let references = repo::count_references(conn, alimento.id).await?;
    if references > 0 {
        return Err(AppError::with_message(
            ErrorCode::AlimentoInUse,
            format!("Alimento '{}' is used by {references} order line(s)", alimento.nome),
        )
        .with_detail("id", alimento.id)
        .with_detail("references", references));
    }
    if !repo::delete(conn, alimento.id).await? {
        return Err(not_found_by_id(alimento.id));
    }
    Ok(())
}
