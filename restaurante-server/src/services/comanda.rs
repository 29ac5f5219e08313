//! Comanda Service
//!
//! Orders consume stock. Creating an order decrements the stock of every
//! referenced alimento; replacing an order first gives the old lines back.
//! Both run in one transaction so a failed line leaves stock and orders as
//! they were.

use shared::models::{Comanda, ComandaCreate, ItemComandaInput};
use sqlx::{SqliteConnection, SqlitePool};

use super::{acquire, begin, commit};
use crate::db::repository::{alimento as alimento_repo, comanda as repo};
use crate::utils::validation::{
    MAX_NOTE_LEN, normalize_optional_text, validate_min, validate_optional_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Clone, Debug)]
pub struct ComandaService {
    pool: SqlitePool,
}

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::ComandaNotFound, format!("Comanda {id} not found"))
        .with_detail("id", id)
}

fn validate(data: ComandaCreate) -> AppResult<ComandaCreate> {
    if data.itens.is_empty() {
        return Err(AppError::new(ErrorCode::ComandaEmpty));
    }
    if let Some(mesa) = data.mesa {
        validate_min(i64::from(mesa), "mesa", 1)?;
    }
    validate_optional_text(&data.observacao, "observacao", MAX_NOTE_LEN)?;
    for item in &data.itens {
        validate_min(i64::from(item.quantidade), "quantidade", 1)?;
    }
    Ok(ComandaCreate {
        observacao: normalize_optional_text(data.observacao),
        ..data
    })
}

impl ComandaService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> AppResult<Vec<Comanda>> {
        let mut conn = acquire(&self.pool).await?;
        Ok(repo::find_all(&mut conn).await?)
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Comanda> {
        let mut conn = acquire(&self.pool).await?;
        repo::find_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create_comanda(&self, data: ComandaCreate) -> AppResult<Comanda> {
        let data = validate(data)?;
        let now = shared::util::now_millis();

        let mut tx = begin(&self.pool).await?;
        reserve_stock(&mut tx, &data.itens).await?;
        let id = repo::insert(&mut tx, &data, now).await?;
        repo::insert_itens(&mut tx, id, &data.itens).await?;
        let comanda = load(&mut tx, id).await?;
        commit(tx).await?;

        tracing::info!(id, mesa = ?comanda.mesa, total_itens = comanda.total_itens, "Comanda created");
        Ok(comanda)
    }

    /// Replace header and lines of an existing order
    pub async fn update(&self, id: i64, data: ComandaCreate) -> AppResult<Comanda> {
        let data = validate(data)?;
        let now = shared::util::now_millis();

        let mut tx = begin(&self.pool).await?;
        let existing = repo::find_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        restore_stock(&mut tx, &existing).await?;
        repo::delete_itens(&mut tx, id).await?;

        reserve_stock(&mut tx, &data.itens).await?;
        repo::update_header(&mut tx, id, &data, now).await?;
        repo::insert_itens(&mut tx, id, &data.itens).await?;
        let comanda = load(&mut tx, id).await?;
        commit(tx).await?;

        tracing::info!(id, total_itens = comanda.total_itens, "Comanda updated");
        Ok(comanda)
    }
}

/// Take every line's quantity out of stock, failing on the first line that
/// references a missing alimento or asks for more than is available.
async fn reserve_stock(conn: &mut SqliteConnection, itens: &[ItemComandaInput]) -> AppResult<()> {
    for item in itens {
        let alimento = alimento_repo::find_by_id(conn, item.alimento_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::AlimentoNotFound,
                    format!("Alimento {} not found", item.alimento_id),
                )
                .with_detail("alimento_id", item.alimento_id)
            })?;

        let reserved =
            alimento_repo::adjust_quantidade(conn, alimento.id, -i64::from(item.quantidade)).await?;
        if !reserved {
            return Err(AppError::with_message(
                ErrorCode::InsufficientStock,
                format!(
                    "Insufficient stock for '{}': requested {}, available {}",
                    alimento.nome, item.quantidade, alimento.quantidade
                ),
            )
            .with_detail("alimento_id", alimento.id)
            .with_detail("solicitado", item.quantidade)
            .with_detail("disponivel", alimento.quantidade));
        }
    }
    Ok(())
}

/// Give every line of an existing order back to stock
async fn restore_stock(conn: &mut SqliteConnection, comanda: &Comanda) -> AppResult<()> {
    for item in &comanda.itens {
        let restored =
            alimento_repo::adjust_quantidade(conn, item.alimento_id, i64::from(item.quantidade))
                .await?;
        if !restored {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!(
                    "Returning {} units of alimento {} to stock exceeds the maximum quantity",
                    item.quantidade, item.alimento_id
                ),
            )
            .with_detail("alimento_id", item.alimento_id)
            .with_detail("quantidade", item.quantidade)
            .with_detail("max", i32::MAX));
        }
    }
    Ok(())
}

async fn load(conn: &mut SqliteConnection, id: i64) -> AppResult<Comanda> {
    repo::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Comanda {id} vanished during write")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_file_pool, test_pool};
    use crate::services::AlimentoService;
    use shared::models::AlimentoCreate;

    struct Fixture {
        alimentos: AlimentoService,
        comandas: ComandaService,
    }

    async fn fixture() -> Fixture {
        fixture_with(test_pool().await)
    }

    fn fixture_with(pool: SqlitePool) -> Fixture {
        Fixture {
            alimentos: AlimentoService::new(pool.clone()),
            comandas: ComandaService::new(pool),
        }
    }

    impl Fixture {
        async fn estoque(&self, nome: &str, quantidade: i32) -> i64 {
            self.alimentos
                .create(AlimentoCreate {
                    nome: nome.to_string(),
                    quantidade,
                })
                .await
                .unwrap()
                .id
        }

        async fn quantidade(&self, id: i64) -> i32 {
            self.alimentos.find_by_id(id).await.unwrap().quantidade
        }
    }

    fn pedido(itens: &[(i64, i32)]) -> ComandaCreate {
        ComandaCreate {
            mesa: Some(3),
            observacao: Some("  sem cebola ".into()),
            itens: itens
                .iter()
                .map(|&(alimento_id, quantidade)| ItemComandaInput {
                    alimento_id,
                    quantidade,
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_create_decrements_stock() {
        let f = fixture().await;
        let arroz = f.estoque("Arroz", 10).await;
        let feijao = f.estoque("Feijao", 4).await;

        let comanda = f
            .comandas
            .create_comanda(pedido(&[(arroz, 3), (feijao, 4)]))
            .await
            .unwrap();

        assert_eq!(comanda.mesa, Some(3));
        assert_eq!(comanda.observacao.as_deref(), Some("sem cebola"));
        assert_eq!(comanda.total_itens, 7);
        assert_eq!(comanda.itens[0].nome, "Arroz");
        assert_eq!(f.quantidade(arroz).await, 7);
        assert_eq!(f.quantidade(feijao).await, 0);

        let found = f.comandas.find_by_id(comanda.id).await.unwrap();
        assert_eq!(found.itens, comanda.itens);
    }

    #[tokio::test]
    async fn test_insufficient_stock_rolls_back() {
        let f = fixture().await;
        let arroz = f.estoque("Arroz", 10).await;
        let feijao = f.estoque("Feijao", 1).await;

        let err = f
            .comandas
            .create_comanda(pedido(&[(arroz, 3), (feijao, 2)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(err.details.unwrap()["disponivel"], 1);

        assert_eq!(f.quantidade(arroz).await, 10);
        assert_eq!(f.quantidade(feijao).await, 1);
        assert!(f.comandas.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_repeated_lines_share_stock() {
        let f = fixture().await;
        let arroz = f.estoque("Arroz", 5).await;

        let err = f
            .comandas
            .create_comanda(pedido(&[(arroz, 3), (arroz, 3)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(f.quantidade(arroz).await, 5);
    }

    #[tokio::test]
    async fn test_unknown_alimento() {
        let f = fixture().await;

        let err = f.comandas.create_comanda(pedido(&[(99, 1)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AlimentoNotFound);
    }

    #[tokio::test]
    async fn test_validation() {
        let f = fixture().await;
        let arroz = f.estoque("Arroz", 5).await;

        let err = f.comandas.create_comanda(pedido(&[])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ComandaEmpty);

        let err = f.comandas.create_comanda(pedido(&[(arroz, 0)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        let mut bad_mesa = pedido(&[(arroz, 1)]);
        bad_mesa.mesa = Some(0);
        let err = f.comandas.create_comanda(bad_mesa).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        assert_eq!(f.quantidade(arroz).await, 5);
    }

    #[tokio::test]
    async fn test_update_restores_then_reserves() {
        let f = fixture().await;
        let arroz = f.estoque("Arroz", 10).await;
        let feijao = f.estoque("Feijao", 10).await;

        let comanda = f
            .comandas
            .create_comanda(pedido(&[(arroz, 8)]))
            .await
            .unwrap();
        assert_eq!(f.quantidade(arroz).await, 2);

        // 10 is only available once the 8 already taken are given back
        let updated = f
            .comandas
            .update(comanda.id, pedido(&[(arroz, 10), (feijao, 1)]))
            .await
            .unwrap();
        assert_eq!(updated.id, comanda.id);
        assert_eq!(updated.total_itens, 11);
        assert_eq!(updated.criada_em, comanda.criada_em);
        assert_eq!(f.quantidade(arroz).await, 0);
        assert_eq!(f.quantidade(feijao).await, 9);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_state() {
        let f = fixture().await;
        let arroz = f.estoque("Arroz", 10).await;

        let comanda = f
            .comandas
            .create_comanda(pedido(&[(arroz, 4)]))
            .await
            .unwrap();

        let err = f
            .comandas
            .update(comanda.id, pedido(&[(arroz, 11)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);

        assert_eq!(f.quantidade(arroz).await, 6);
        let stored = f.comandas.find_by_id(comanda.id).await.unwrap();
        assert_eq!(stored.total_itens, 4);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let f = fixture().await;
        let arroz = f.estoque("Arroz", 10).await;

        let err = f.comandas.update(42, pedido(&[(arroz, 1)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ComandaNotFound);
        assert_eq!(f.quantidade(arroz).await, 10);

        let err = f.comandas.find_by_id(42).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ComandaNotFound);
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_id() {
        let f = fixture().await;
        let arroz = f.estoque("Arroz", 10).await;

        let first = f.comandas.create_comanda(pedido(&[(arroz, 1)])).await.unwrap();
        let second = f.comandas.create_comanda(pedido(&[(arroz, 2)])).await.unwrap();

        let ids: Vec<_> = f
            .comandas
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, [first.id, second.id]);
    }

    #[tokio::test]
    async fn test_update_refuses_restore_past_max_quantity() {
        let f = fixture().await;
        let arroz = f.estoque("Arroz", 10).await;
        let comanda = f.comandas.create_comanda(pedido(&[(arroz, 5)])).await.unwrap();
        f.alimentos.update_quantidade("Arroz", i32::MAX).await.unwrap();

        let err = f
            .comandas
            .update(comanda.id, pedido(&[(arroz, 1)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        assert_eq!(err.details.unwrap()["alimento_id"], arroz);

        assert_eq!(f.quantidade(arroz).await, i32::MAX);
        let stored = f.comandas.find_by_id(comanda.id).await.unwrap();
        assert_eq!(stored.total_itens, 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_orders_never_oversell() {
        let (_dir, pool) = test_file_pool(8).await;
        let f = fixture_with(pool);
        let arroz = f.estoque("Arroz", 10).await;

        let tasks: Vec<_> = (0..15)
            .map(|_| {
                let comandas = f.comandas.clone();
                tokio::spawn(async move { comandas.create_comanda(pedido(&[(arroz, 1)])).await })
            })
            .collect();

        let mut accepted = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(err) => assert_eq!(err.code, ErrorCode::InsufficientStock),
            }
        }
        assert_eq!(accepted, 10);
        assert_eq!(f.quantidade(arroz).await, 0);
    }
}
