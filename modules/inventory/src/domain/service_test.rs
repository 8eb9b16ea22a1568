//! Service tests over an in-memory SQLite database with real migrations.

use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::domain::error::DomainError;
use crate::domain::model::{Availability, NewArticle, StockDelta};
use crate::domain::service::ArticlesService;
use crate::infra::storage::articles_sea_repo::SeaOrmArticlesRepository;
use crate::infra::storage::migrations::Migrator;

type ConcreteService = ArticlesService<SeaOrmArticlesRepository>;

async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

fn build_service(db: DatabaseConnection) -> ConcreteService {
    ArticlesService::new(Arc::new(db), Arc::new(SeaOrmArticlesRepository::new()))
}

fn article(libelle: &str, quantite: i64) -> NewArticle {
    NewArticle {
        libelle: libelle.to_owned(),
        quantite,
        prix: Decimal::new(1500, 2),
        reference: format!("REF-{libelle}"),
    }
}

async fn seed(svc: &ConcreteService, quantities: &[i64]) {
    let items = quantities
        .iter()
        .enumerate()
        .map(|(i, &q)| article(&format!("art-{i}"), q))
        .collect();
    let outcome = svc.bulk_create(items).await.unwrap();
    assert!(outcome.failures.is_empty());
}

// =========================================================================
// listing & availability filter
// =========================================================================

#[tokio::test]
async fn list_with_disponible_oui_returns_positive_quantities() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[0, 1, 0, 5]).await;

    let page = svc
        .list_articles(Some(Availability::Available), None, None)
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    let quantities: Vec<i64> = page.items.iter().map(|a| a.quantite).collect();
    assert_eq!(quantities, vec![1, 5]);
}

#[tokio::test]
async fn list_with_disponible_non_returns_zero_quantities() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[0, 1, 0, 5]).await;

    let page = svc
        .list_articles(Some(Availability::Unavailable), None, None)
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert!(page.items.iter().all(|a| a.quantite == 0));
}

#[tokio::test]
async fn list_without_filter_returns_everything() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[0, 1, 0, 5]).await;

    let page = svc.list_articles(None, None, None).await.unwrap();
    assert_eq!(page.total, 4);
}

#[tokio::test]
async fn pagination_defaults_to_ten_per_page() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &vec![1; 25]).await;

    let page = svc.list_articles(None, None, None).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 25);
    assert_eq!(page.page, 1);
    assert_eq!(page.per_page, 10);

    let last = svc.list_articles(None, Some(3), Some(10)).await.unwrap();
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.total, 25);
}

// =========================================================================
// lookups
// =========================================================================

#[tokio::test]
async fn get_article_unknown_id_is_not_found() {
    let svc = build_service(inmem_db().await);

    let err = svc.get_article(999).await.unwrap_err();
    assert!(matches!(err, DomainError::ArticleNotFound { id: 999 }));
}

#[tokio::test]
async fn find_by_libelle_round_trip() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[3]).await;

    let found = svc.find_by_libelle("art-0").await.unwrap();
    assert_eq!(found.quantite, 3);

    let err = svc.find_by_libelle("absent").await.unwrap_err();
    assert!(matches!(err, DomainError::LibelleNotFound { .. }));
}

#[tokio::test]
async fn find_by_libelle_rejects_blank_input() {
    let svc = build_service(inmem_db().await);

    let err = svc.find_by_libelle("  ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { field, .. } if field == "libelle"));
}

// =========================================================================
// bulk creation
// =========================================================================

#[tokio::test]
async fn bulk_create_reports_each_uniqueness_violation() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[1]).await; // creates "art-0"

    let outcome = svc
        .bulk_create(vec![
            article("art-0", 2),  // duplicate against the table
            article("savon", 4),
            article("savon", 9),  // duplicate within the batch
            article("sucre", 7),
        ])
        .await
        .unwrap();

    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.created.len(), 2);
    assert_eq!(outcome.failures[0].index, 0);
    assert_eq!(outcome.failures[1].index, 2);

    // survivors are persisted and retrievable
    assert_eq!(svc.find_by_libelle("savon").await.unwrap().quantite, 4);
    assert_eq!(svc.find_by_libelle("sucre").await.unwrap().quantite, 7);
}

#[tokio::test]
async fn bulk_create_rejects_negative_quantity_and_price_per_item() {
    let svc = build_service(inmem_db().await);

    let mut bad_price = article("huile", 1);
    bad_price.prix = Decimal::new(-100, 2);

    let outcome = svc
        .bulk_create(vec![article("riz", -1), bad_price, article("lait", 2)])
        .await
        .unwrap();

    assert_eq!(outcome.failures.len(), 2);
    assert_eq!(outcome.created.len(), 1);
    assert_eq!(outcome.created[0].libelle, "lait");
}

// =========================================================================
// best-effort stock deltas
// =========================================================================

#[tokio::test]
async fn stock_deltas_are_additive() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[10, 4]).await;
    let a = svc.find_by_libelle("art-0").await.unwrap();
    let b = svc.find_by_libelle("art-1").await.unwrap();

    let applied = svc
        .apply_stock_deltas(vec![
            StockDelta {
                id: a.id,
                libelle: "art-0".to_owned(),
                quantite: 5,
            },
            StockDelta {
                id: b.id,
                libelle: "art-1".to_owned(),
                quantite: -4,
            },
        ])
        .await
        .unwrap();

    assert_eq!(applied, 2);
    assert_eq!(svc.get_article(a.id).await.unwrap().quantite, 15);
    assert_eq!(svc.get_article(b.id).await.unwrap().quantite, 0);
}

#[tokio::test]
async fn stock_deltas_skip_mismatched_libelle_silently() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[10]).await;
    let a = svc.find_by_libelle("art-0").await.unwrap();

    let applied = svc
        .apply_stock_deltas(vec![StockDelta {
            id: a.id,
            libelle: "autre-libelle".to_owned(),
            quantite: 5,
        }])
        .await
        .unwrap();

    assert_eq!(applied, 0);
    assert_eq!(svc.get_article(a.id).await.unwrap().quantite, 10);
}

#[tokio::test]
async fn stock_deltas_skip_unknown_ids_silently() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[10]).await;

    let applied = svc
        .apply_stock_deltas(vec![StockDelta {
            id: 9999,
            libelle: "art-0".to_owned(),
            quantite: 5,
        }])
        .await
        .unwrap();

    assert_eq!(applied, 0);
}

#[tokio::test]
async fn stock_deltas_never_drive_a_quantity_negative() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[3]).await;
    let a = svc.find_by_libelle("art-0").await.unwrap();

    let applied = svc
        .apply_stock_deltas(vec![StockDelta {
            id: a.id,
            libelle: "art-0".to_owned(),
            quantite: -4,
        }])
        .await
        .unwrap();

    assert_eq!(applied, 0);
    assert_eq!(svc.get_article(a.id).await.unwrap().quantite, 3);
}

// =========================================================================
// single additive update
// =========================================================================

#[tokio::test]
async fn update_quantity_applies_signed_delta() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[7]).await;
    let a = svc.find_by_libelle("art-0").await.unwrap();

    let updated = svc.update_quantity(a.id, -2).await.unwrap();
    assert_eq!(updated.quantite, 5);

    let updated = svc.update_quantity(a.id, 10).await.unwrap();
    assert_eq!(updated.quantite, 15);
}

#[tokio::test]
async fn update_quantity_rejects_negative_result_before_mutation() {
    let svc = build_service(inmem_db().await);
    seed(&svc, &[7]).await;
    let a = svc.find_by_libelle("art-0").await.unwrap();

    let err = svc.update_quantity(a.id, -8).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation { field, .. } if field == "quantite"));

    // stored value untouched
    assert_eq!(svc.get_article(a.id).await.unwrap().quantite, 7);
}

#[tokio::test]
async fn update_quantity_unknown_id_is_not_found() {
    let svc = build_service(inmem_db().await);

    let err = svc.update_quantity(42, 1).await.unwrap_err();
    assert!(matches!(err, DomainError::ArticleNotFound { id: 42 }));
}
