use sea_orm::{Database, DatabaseConnection};

use engine::{AutoNew, AutoUpdate, Engine, EngineError, Page, VentaNew, repo::AutoRepository};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn auto(marca: &str, modelo: &str, chassis: &str) -> AutoNew {
    AutoNew {
        marca: marca.to_string(),
        modelo: modelo.to_string(),
        year: 2020,
        chassis_number: chassis.to_string(),
    }
}

#[tokio::test]
async fn new_auto_assigns_id_and_normalizes_chassis() {
    let (engine, _db) = engine_with_db().await;

    let created = engine
        .new_auto(auto("Toyota", "Corolla", "xyz-123"))
        .await
        .unwrap();

    assert_eq!(created.id, 1);
    assert_eq!(created.chassis_number, "XYZ-123");
    assert_eq!(engine.auto(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn chassis_lookup_ignores_case_and_separators() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .new_auto(auto("Ford", "Focus", "ab-123 cd"))
        .await
        .unwrap();

    for variant in ["AB123CD", "ab123cd", "A-B 1 2 3-C D"] {
        let found = engine.auto_by_chassis(variant).await.unwrap();
        assert_eq!(found, created);
    }

    assert_eq!(
        engine.auto_by_chassis("ZZZ999").await,
        Err(EngineError::KeyNotFound("ZZZ999".to_string()))
    );
}

#[tokio::test]
async fn duplicate_chassis_is_a_conflict() {
    let (engine, _db) = engine_with_db().await;
    engine
        .new_auto(auto("Toyota", "Corolla", "XYZ123"))
        .await
        .unwrap();

    let err = engine
        .new_auto(auto("Honda", "Civic", "xyz-123"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::ExistingKey(_)));

    let all = engine.autos(None, None, Page::default()).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn update_to_foreign_chassis_is_a_conflict() {
    let (engine, _db) = engine_with_db().await;
    let first = engine
        .new_auto(auto("Toyota", "Corolla", "AAA111"))
        .await
        .unwrap();
    let second = engine
        .new_auto(auto("Honda", "Civic", "BBB222"))
        .await
        .unwrap();

    let err = engine
        .update_auto(
            second.id,
            AutoUpdate {
                chassis_number: Some("aaa-111".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("AAA-111".to_string()));

    // keeping its own number is fine
    let same = engine
        .update_auto(
            first.id,
            AutoUpdate {
                chassis_number: Some("aaa111".to_string()),
                modelo: Some("Corolla Cross".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(same.chassis_number, "AAA111");
    assert_eq!(same.modelo, "Corolla Cross");
}

#[tokio::test]
async fn partial_update_keeps_omitted_fields() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .new_auto(auto("Toyota", "Corolla", "XYZ123"))
        .await
        .unwrap();

    let updated = engine
        .update_auto(
            created.id,
            AutoUpdate {
                year: Some(2015),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.year, 2015);
    assert_eq!(updated.marca, created.marca);
    assert_eq!(updated.modelo, created.modelo);
    assert_eq!(updated.chassis_number, created.chassis_number);

    let untouched = engine
        .update_auto(created.id, AutoUpdate::default())
        .await
        .unwrap();
    assert_eq!(untouched, updated);
}

#[tokio::test]
async fn invalid_update_changes_nothing() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .new_auto(auto("Toyota", "Corolla", "XYZ123"))
        .await
        .unwrap();

    let err = engine
        .update_auto(
            created.id,
            AutoUpdate {
                marca: Some("Lexus".to_string()),
                year: Some(1800),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
    assert_eq!(engine.auto(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn update_missing_auto_is_not_found() {
    let (engine, _db) = engine_with_db().await;
    let err = engine
        .update_auto(
            42,
            AutoUpdate {
                marca: Some("Fiat".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::KeyNotFound("auto 42".to_string()));
}

#[tokio::test]
async fn search_by_marca_and_modelo() {
    let (engine, _db) = engine_with_db().await;
    engine
        .new_auto(auto("Toyota", "Corolla", "C1"))
        .await
        .unwrap();
    engine
        .new_auto(auto("Toyota", "Yaris", "C2"))
        .await
        .unwrap();
    engine
        .new_auto(auto("Ford", "Focus", "C3"))
        .await
        .unwrap();

    let toyotas = engine
        .autos(Some("toy"), None, Page::default())
        .await
        .unwrap();
    assert_eq!(toyotas.len(), 2);

    let yaris = engine
        .autos(Some("TOYOTA"), Some("ari"), Page::default())
        .await
        .unwrap();
    assert_eq!(yaris.len(), 1);
    assert_eq!(yaris[0].modelo, "Yaris");

    let none = engine
        .autos(Some("ford"), Some("yaris"), Page::default())
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn list_is_paged_in_id_order() {
    let (engine, _db) = engine_with_db().await;
    for n in 0..5 {
        engine
            .new_auto(auto("Fiat", "Panda", &format!("P{n}")))
            .await
            .unwrap();
    }

    let page = engine
        .autos(None, None, Page::new(1, 2).unwrap())
        .await
        .unwrap();
    let ids: Vec<i32> = page.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![2, 3]);

    let tail = engine
        .autos(None, None, Page::new(4, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(tail.len(), 1);
}

#[tokio::test]
async fn delete_auto_removes_it_and_its_sales() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .new_auto(auto("Toyota", "Corolla", "XYZ123"))
        .await
        .unwrap();
    let venta = engine
        .new_venta(VentaNew {
            buyer_name: "Ana Pérez".to_string(),
            price: 15000.0,
            sale_date: None,
            auto_id: created.id,
        })
        .await
        .unwrap();

    engine.delete_auto(created.id).await.unwrap();

    assert!(matches!(
        engine.auto(created.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.venta(venta.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.delete_auto(created.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn auto_with_ventas_composes_both_sides() {
    let (engine, _db) = engine_with_db().await;
    let created = engine
        .new_auto(auto("Toyota", "Corolla", "XYZ123"))
        .await
        .unwrap();
    let other = engine
        .new_auto(auto("Ford", "Focus", "F1"))
        .await
        .unwrap();
    for (auto_id, buyer) in [(created.id, "Ana"), (other.id, "Luis"), (created.id, "Eva")] {
        engine
            .new_venta(VentaNew {
                buyer_name: buyer.to_string(),
                price: 1000.0,
                sale_date: None,
                auto_id,
            })
            .await
            .unwrap();
    }

    let composed = engine.auto_with_ventas(created.id).await.unwrap();
    assert_eq!(composed.auto, created);
    let buyers: Vec<&str> = composed
        .ventas
        .iter()
        .map(|v| v.buyer_name.as_str())
        .collect();
    assert_eq!(buyers, vec!["Ana", "Eva"]);

    assert!(matches!(
        engine.auto_with_ventas(99).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn search_folds_accented_uppercase() {
    let (engine, _db) = engine_with_db().await;
    let audi = engine
        .new_auto(auto("ÁUDI", "QUATTRO ÉLAN", "AU1"))
        .await
        .unwrap();
    engine
        .new_auto(auto("Audi", "A4", "AU2"))
        .await
        .unwrap();

    let found = engine
        .autos(Some("áudi"), Some("élan"), Page::default())
        .await
        .unwrap();
    assert_eq!(found, vec![audi.clone()]);

    let renamed = engine
        .update_auto(
            audi.id,
            AutoUpdate {
                marca: Some("ŠKODA".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        engine
            .autos(Some("škoda"), None, Page::default())
            .await
            .unwrap(),
        vec![renamed]
    );
    assert!(
        engine
            .autos(Some("áudi"), None, Page::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn repository_create_reports_unique_chassis_violation() {
    let (_engine, db) = engine_with_db().await;
    let autos = AutoRepository::new(&db);

    autos
        .create(auto("Toyota", "Corolla", "AB-1").validated().unwrap())
        .await
        .unwrap();
    let err = autos
        .create(auto("Honda", "Civic", "ab 1").validated().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::ExistingKey("AB 1".to_string()));
    assert_eq!(autos.list(Page::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn repository_update_reports_unique_chassis_violation() {
    let (_engine, db) = engine_with_db().await;
    let autos = AutoRepository::new(&db);
    autos
        .create(auto("Toyota", "Corolla", "AAA111").validated().unwrap())
        .await
        .unwrap();
    let second = autos
        .create(auto("Honda", "Civic", "BBB222").validated().unwrap())
        .await
        .unwrap();

    let update = AutoUpdate {
        chassis_number: Some("aaa-111".to_string()),
        ..Default::default()
    };
    let err = autos
        .update(second.id, update.validated().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, EngineError::ExistingKey("AAA-111".to_string()));
    assert_eq!(autos.get_by_id(second.id).await.unwrap(), Some(second));
}
