// tests/basket_tests.rs
mod common;

use amur_core::error::Error;
use amur_core::models::{CreateOrderRequest, MAX_LINE_QUANTITY};
use amur_core::store::BasketStore;
use amur_core::{BasketService, FoodService};
use common::*;
use serial_test::serial;
use std::sync::Arc;

const USER: i64 = 5_550_001;

#[tokio::test]
#[serial]
async fn adding_same_food_twice_increments_one_line() {
  setup_tracing();
  let app = services().await;
  let plov = seed_food(&app.foods, "Plov", 2_500).await;

  app.baskets.add_to_basket(USER, plov.id).await.unwrap();
  let line = app.baskets.add_to_basket(USER, plov.id).await.unwrap();

  assert_eq!(line.quantity, 2);
  let lines = app.baskets.list_basket(USER).await.unwrap();
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0].quantity, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[serial]
async fn concurrent_adds_do_not_lose_updates() {
  setup_tracing();
  let dir = tempfile::tempdir().unwrap();
  let stores = file_stores(dir.path(), 4).await;
  let foods = FoodService::new(stores.foods.clone(), dir.path());
  let baskets = BasketService::new(stores.baskets.clone(), stores.foods.clone());
  let samsa = seed_food(&foods, "Samsa", 800).await;
  let store: Arc<dyn BasketStore> = stores.baskets.clone();

  let adds = (0..16).map(|_| {
    let store = store.clone();
    let food_id = samsa.id;
    tokio::spawn(async move { store.add_or_increment(USER, food_id).await })
  });
  for handle in adds.collect::<Vec<_>>() {
    handle.await.unwrap().unwrap();
  }

  let lines = baskets.list_basket(USER).await.unwrap();
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0].quantity, 16);
  stores.pool.close().await;
}

#[tokio::test]
#[serial]
async fn baskets_are_per_user() {
  setup_tracing();
  let app = services().await;
  let lagman = seed_food(&app.foods, "Lagman", 1_800).await;

  app.baskets.add_to_basket(USER, lagman.id).await.unwrap();
  app.baskets.add_to_basket(USER + 1, lagman.id).await.unwrap();

  assert_eq!(app.baskets.list_basket(USER).await.unwrap().len(), 1);
  assert_eq!(app.baskets.list_basket(USER + 1).await.unwrap()[0].quantity, 1);
}

#[tokio::test]
#[serial]
async fn adding_unknown_food_is_food_not_found() {
  setup_tracing();
  let app = services().await;

  let err = app.baskets.add_to_basket(USER, 404).await.unwrap_err();
  assert!(matches!(err, Error::FoodNotFound(404)));
  assert!(app.baskets.list_basket(USER).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn list_is_newest_first() {
  setup_tracing();
  let app = services().await;
  let first = seed_food(&app.foods, "Shashlik", 3_000).await;
  let second = seed_food(&app.foods, "Manti", 2_200).await;

  app.baskets.add_to_basket(USER, first.id).await.unwrap();
  app.baskets.add_to_basket(USER, second.id).await.unwrap();

  let food_ids: Vec<i64> = app.baskets.list_basket(USER).await.unwrap().iter().map(|l| l.food_id).collect();
  assert_eq!(food_ids, vec![second.id, first.id]);
}

#[tokio::test]
#[serial]
async fn remove_missing_line_is_not_found() {
  setup_tracing();
  let app = services().await;
  let tea = seed_food(&app.foods, "Green tea", 500).await;

  assert!(matches!(app.baskets.remove(USER, tea.id).await, Err(Error::NotFound(_))));

  app.baskets.add_to_basket(USER, tea.id).await.unwrap();
  app.baskets.remove(USER, tea.id).await.unwrap();
  assert!(app.baskets.list_basket(USER).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn clear_is_idempotent() {
  setup_tracing();
  let app = services().await;
  let bread = seed_food(&app.foods, "Non", 300).await;
  app.baskets.add_to_basket(USER, bread.id).await.unwrap();

  assert_eq!(app.baskets.clear(USER).await.unwrap(), 1);
  assert_eq!(app.baskets.clear(USER).await.unwrap(), 0);
}

#[tokio::test]
#[serial]
async fn set_quantity_overwrites_and_zero_deletes() {
  setup_tracing();
  let app = services().await;
  let soup = seed_food(&app.foods, "Shurpa", 1_500).await;
  app.baskets.add_to_basket(USER, soup.id).await.unwrap();

  let line = app.baskets.set_quantity(USER, soup.id, 4).await.unwrap().unwrap();
  assert_eq!(line.quantity, 4);

  assert!(app.baskets.set_quantity(USER, soup.id, 0).await.unwrap().is_none());
  assert!(app.baskets.list_basket(USER).await.unwrap().is_empty());

  // No zero-quantity row can be left behind, and missing lines are reported.
  assert!(matches!(app.baskets.set_quantity(USER, soup.id, 0).await, Err(Error::NotFound(_))));
  assert!(matches!(app.baskets.set_quantity(USER, soup.id, 3).await, Err(Error::NotFound(_))));
}

#[tokio::test]
#[serial]
async fn detailed_basket_prices_lines_at_catalog_price() {
  setup_tracing();
  let app = services().await;
  let plov = seed_food(&app.foods, "Plov", 2_500).await;
  let salad = seed_food(&app.foods, "Achichuk", 700).await;

  app.baskets.add_to_basket(USER, plov.id).await.unwrap();
  app.baskets.add_to_basket(USER, plov.id).await.unwrap();
  app.baskets.add_to_basket(USER, salad.id).await.unwrap();

  let basket = app.baskets.detailed_basket(USER).await.unwrap();
  assert_eq!(basket.lines.len(), 2);
  assert_eq!(basket.total_price_cents, 2 * 2_500 + 700);
  let plov_line = basket.lines.iter().find(|l| l.food_id == plov.id).unwrap();
  assert_eq!(plov_line.name, "Plov");
  assert_eq!(plov_line.line_total_cents, 5_000);
}

#[tokio::test]
#[serial]
async fn deleting_a_food_drops_it_from_baskets() {
  setup_tracing();
  let app = services().await;
  let kept = seed_food(&app.foods, "Kept", 1_000).await;
  let gone = seed_food(&app.foods, "Gone", 2_000).await;
  app.baskets.add_to_basket(USER, kept.id).await.unwrap();
  app.baskets.add_to_basket(USER, gone.id).await.unwrap();

  app.foods.delete(gone.id).await.unwrap();

  let basket = app.baskets.detailed_basket(USER).await.unwrap();
  assert_eq!(basket.lines.len(), 1);
  assert_eq!(basket.total_price_cents, 1_000);
}

#[tokio::test]
#[serial]
async fn quantity_is_capped_and_the_basket_stays_readable() {
  setup_tracing();
  let app = services().await;
  let plov = seed_food(&app.foods, "Plov", 2_500).await;
  app.baskets.add_to_basket(USER, plov.id).await.unwrap();

  let err = app.baskets.set_quantity(USER, plov.id, i64::MAX).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  let err = app.baskets.set_quantity(USER, plov.id, MAX_LINE_QUANTITY + 1).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));
  assert_eq!(app.baskets.list_basket(USER).await.unwrap()[0].quantity, 1);

  let line = app.baskets.set_quantity(USER, plov.id, MAX_LINE_QUANTITY).await.unwrap().unwrap();
  assert_eq!(line.quantity, MAX_LINE_QUANTITY);

  // A line at the cap refuses another unit instead of overflowing.
  let err = app.baskets.add_to_basket(USER, plov.id).await.unwrap_err();
  assert!(matches!(err, Error::Validation(_)));

  let lines = app.baskets.list_basket(USER).await.unwrap();
  assert_eq!(lines[0].quantity, MAX_LINE_QUANTITY);
  let basket = app.baskets.detailed_basket(USER).await.unwrap();
  assert_eq!(basket.total_price_cents, MAX_LINE_QUANTITY * 2_500);
  let request = CreateOrderRequest {
    delivery_type: "pickup".to_string(),
    ..Default::default()
  };
  let created = app.orders.create_order(USER, request).await.unwrap();
  assert_eq!(created.details.order.total_price_cents, MAX_LINE_QUANTITY * 2_500);
}
