use crate::db::connect;
use crate::{booking, booking::BookingStatus, gallery_image, home_image, site_asset, admin_user};
use crate::errors::ModelError;
use sea_orm::{DatabaseConnection, EntityTrait};
use anyhow::Result;
use migration::MigratorTrait;
use uuid::Uuid;

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::test]
async fn test_booking_crud_and_status_lifecycle() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let created = booking::create(
        &db,
        "Jo",
        "919876543210",
        None,
        "Basic",
        "2025-01-01",
        "",
    )
    .await?;
    assert_eq!(created.phone, "919876543210");
    assert_eq!(created.status, BookingStatus::Pending);

    // Read back
    let found = booking::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref().map(|b| b.id), Some(created.id));

    // pending -> confirmed -> completed walks the table
    booking::set_status(&db, created.id, BookingStatus::Confirmed).await?;
    booking::set_status(&db, created.id, BookingStatus::Completed).await?;

    // completed is terminal
    let err = booking::set_status(&db, created.id, BookingStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Transition { .. }));

    // unknown id mutates nothing
    let err = booking::set_status(&db, i32::MAX, BookingStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_)));

    // Cleanup
    assert!(booking::delete(&db, created.id).await?);
    assert!(!booking::delete(&db, created.id).await?);
    Ok(())
}

#[tokio::test]
async fn test_booking_rejects_unnormalized_phone() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let err = booking::create(&db, "Jo", "+91 98765", None, "Basic", "2025-01-01", "")
        .await
        .unwrap_err();
    assert!(matches!(err, ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn test_gallery_reorder_keeps_every_row() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;

    let mut ids = vec![];
    for i in 0..4 {
        let pid = format!("test-gallery-{}", Uuid::new_v4());
        let img = gallery_image::create(&db, &format!("/static/uploads/{pid}.jpg"), &pid, &format!("cap {i}"), i).await?;
        ids.push(img.id);
    }

    // Reverse the order
    let mut target = ids.clone();
    target.reverse();
    gallery_image::reorder(&db, &target).await?;

    let listed = gallery_image::list_active(&db, 20).await?;
    let listed_ids: Vec<i32> = listed
        .iter()
        .filter(|m| ids.contains(&m.id))
        .map(|m| m.id)
        .collect();
    // Same rows, requested order, nothing lost
    assert_eq!(listed_ids, target);

    // Unknown id fails the whole permutation and keeps the previous order
    let mut bad = target.clone();
    bad.push(i32::MAX);
    let err = gallery_image::reorder(&db, &bad).await.unwrap_err();
    assert!(matches!(err, ModelError::NotFound(_)));
    let after = gallery_image::list_active(&db, 20).await?;
    let after_ids: Vec<i32> = after
        .iter()
        .filter(|m| ids.contains(&m.id))
        .map(|m| m.id)
        .collect();
    assert_eq!(after_ids, target);

    for id in ids {
        gallery_image::Entity::delete_by_id(id).exec(&db).await?;
    }
    Ok(())
}

#[tokio::test]
async fn test_gallery_soft_delete_hides_row() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let pid = format!("test-gallery-{}", Uuid::new_v4());
    let img = gallery_image::create(&db, &format!("/static/uploads/{pid}.jpg"), &pid, "", 0).await?;

    assert!(gallery_image::soft_delete_by_public_id(&db, &pid).await?);
    let listed = gallery_image::list_active(&db, 100).await?;
    assert!(listed.iter().all(|m| m.id != img.id));

    // Row still present for audit
    let row = gallery_image::Entity::find_by_id(img.id).one(&db).await?;
    assert_eq!(row.map(|m| m.is_active), Some(false));

    assert!(!gallery_image::soft_delete_by_public_id(&db, "no-such-public-id").await?);

    gallery_image::Entity::delete_by_id(img.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_home_image_order_and_soft_delete() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let pid = format!("test-home-{}", Uuid::new_v4());
    let img = home_image::create(&db, &format!("/static/uploads/{pid}.jpg"), &pid, "hero", 3).await?;
    assert_eq!(img.display_order, 3);

    assert!(home_image::set_order(&db, img.id, 7).await?);
    let listed = home_image::list_active(&db).await?;
    let row = listed.iter().find(|m| m.id == img.id).expect("listed");
    assert_eq!(row.display_order, 7);

    assert!(home_image::soft_delete(&db, img.id).await?);
    let listed = home_image::list_active(&db).await?;
    assert!(listed.iter().all(|m| m.id != img.id));

    home_image::Entity::delete_by_id(img.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_site_asset_upsert_by_type() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let asset_type = format!("logo-{}", Uuid::new_v4());

    let first = site_asset::upsert(&db, &asset_type, "/static/uploads/a.png", "a", "Logo").await?;
    let second = site_asset::upsert(&db, &asset_type, "/static/uploads/b.png", "b", "Logo v2").await?;

    // Same row updated in place
    assert_eq!(first.id, second.id);
    assert_eq!(second.image_url, "/static/uploads/b.png");
    assert!(second.updated_at >= first.updated_at);

    site_asset::Entity::delete_by_id(first.id).exec(&db).await?;
    Ok(())
}

#[tokio::test]
async fn test_admin_user_password_update_persists() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }

    let db = setup_test_db().await?;
    let username = format!("admin_{}", Uuid::new_v4());

    let created = admin_user::create(&db, &username, "hash-one").await?;
    admin_user::update_password(&db, created.id, "hash-two").await?;

    let found = admin_user::find_by_username(&db, &username).await?.expect("admin exists");
    assert_eq!(found.password_hash, "hash-two");
    assert!(found.updated_at >= created.created_at);

    admin_user::Entity::delete_by_id(created.id).exec(&db).await?;
    Ok(())
}
