// tests/food_catalog_tests.rs
mod common;

use amur_core::error::Error;
use amur_core::models::{CreateOrderRequest, FoodChanges, NewFood};
use common::*;
use serial_test::serial;

fn new_food(name: &str, category: &str, price_cents: i64) -> NewFood {
  NewFood {
    name: name.to_string(),
    category: category.to_string(),
    price_cents,
    image: None,
  }
}

#[tokio::test]
#[serial]
async fn create_trims_and_validates() {
  setup_tracing();
  let app = services().await;

  let food = app.foods.create(new_food("  Plov ", " Main ", 2_500)).await.unwrap();
  assert_eq!((food.name.as_str(), food.category.as_str()), ("Plov", "Main"));
  assert_eq!(food.image, None);

  for bad in [new_food("  ", "Main", 100), new_food("Tea", "", 100), new_food("Tea", "Drinks", 0)] {
    assert!(matches!(app.foods.create(bad).await, Err(Error::Validation(_))));
  }
  assert_eq!(app.foods.count().await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn get_missing_food_is_not_found() {
  setup_tracing();
  let app = services().await;
  assert!(matches!(app.foods.get(77).await, Err(Error::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn list_and_category_filter() {
  setup_tracing();
  let app = services().await;
  let plov = app.foods.create(new_food("Plov", "Main", 2_500)).await.unwrap();
  let tea = app.foods.create(new_food("Tea", "Drinks", 300)).await.unwrap();
  let ayran = app.foods.create(new_food("Ayran", "Drinks", 400)).await.unwrap();

  let all: Vec<i64> = app.foods.list().await.unwrap().iter().map(|f| f.id).collect();
  assert_eq!(all, vec![ayran.id, tea.id, plov.id]);

  let drinks: Vec<i64> = app.foods.list_by_category(" Drinks ").await.unwrap().iter().map(|f| f.id).collect();
  assert_eq!(drinks, vec![ayran.id, tea.id]);

  assert!(matches!(app.foods.list_by_category(" ").await, Err(Error::Validation(_))));
}

#[tokio::test]
#[serial]
async fn update_is_partial() {
  setup_tracing();
  let app = services().await;
  let food = app.foods.create(new_food("Plov", "Main", 2_500)).await.unwrap();

  let updated = app
    .foods
    .update(
      food.id,
      FoodChanges {
        name: Some("  ".to_string()),
        category: Some("Rice".to_string()),
        price_cents: Some(-5),
        image: None,
      },
    )
    .await
    .unwrap();

  assert_eq!(updated.name, "Plov");
  assert_eq!(updated.category, "Rice");
  assert_eq!(updated.price_cents, 2_500);

  let missing = app.foods.update(999, FoodChanges::default()).await;
  assert!(matches!(missing, Err(Error::NotFound(_))));
  let missing = app
    .foods
    .update(
      999,
      FoodChanges {
        price_cents: Some(100),
        ..Default::default()
      },
    )
    .await;
  assert!(matches!(missing, Err(Error::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn delete_removes_uploaded_image() {
  setup_tracing();
  let uploads = tempfile::tempdir().unwrap();
  let image_path = uploads.path().join("plov.jpg");
  std::fs::write(&image_path, b"jpeg").unwrap();
  let app = services_in(uploads.path()).await;

  let mut with_image = new_food("Plov", "Main", 2_500);
  with_image.image = Some("/uploads/plov.jpg".to_string());
  let food = app.foods.create(with_image).await.unwrap();

  app.foods.delete(food.id).await.unwrap();

  assert!(!image_path.exists());
  assert!(matches!(app.foods.get(food.id).await, Err(Error::NotFound(_))));
  assert!(matches!(app.foods.delete(food.id).await, Err(Error::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn delete_tolerates_missing_image_and_ignores_remote_ones() {
  setup_tracing();
  let uploads = tempfile::tempdir().unwrap();
  let outside = tempfile::NamedTempFile::new().unwrap();
  let app = services_in(uploads.path()).await;

  for image in [
    "/uploads/never-written.png".to_string(),
    "https://cdn.example.com/plov.png".to_string(),
    format!("/uploads/../{}", outside.path().display()),
  ] {
    let mut food = new_food("Plov", "Main", 2_500);
    food.image = Some(image);
    let food = app.foods.create(food).await.unwrap();
    app.foods.delete(food.id).await.unwrap();
  }

  assert!(outside.path().exists());
}

#[tokio::test]
#[serial]
async fn deleting_food_keeps_historical_orders() {
  setup_tracing();
  let app = services().await;
  let food = app.foods.create(new_food("Plov", "Main", 2_500)).await.unwrap();
  app.baskets.add_to_basket(1, food.id).await.unwrap();
  let request = CreateOrderRequest {
    delivery_type: "pickup".to_string(),
    ..Default::default()
  };
  let order_id = app.orders.create_order(1, request).await.unwrap().details.order.id;

  app.foods.delete(food.id).await.unwrap();

  let details = app.orders.get_order_details(order_id).await.unwrap();
  assert_eq!(details.items.len(), 1);
  assert_eq!(details.items[0].item_price_cents, 2_500);
}
