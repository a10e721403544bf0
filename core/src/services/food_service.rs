// src/services/food_service.rs

use crate::error::{Error, Result};
use crate::models::{Food, FoodChanges, NewFood};
use crate::store::FoodStore;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Image references with this prefix point into the uploads directory.
const UPLOADS_PREFIX: &str = "/uploads/";

#[derive(Clone)]
pub struct FoodService {
  store: Arc<dyn FoodStore>,
  uploads_dir: PathBuf,
}

impl FoodService {
  pub fn new(store: Arc<dyn FoodStore>, uploads_dir: impl Into<PathBuf>) -> Self {
    Self {
      store,
      uploads_dir: uploads_dir.into(),
    }
  }

  #[instrument(name = "food::create", skip(self, new_food), fields(name = %new_food.name))]
  pub async fn create(&self, new_food: NewFood) -> Result<Food> {
    let food = NewFood {
      name: new_food.name.trim().to_string(),
      category: new_food.category.trim().to_string(),
      price_cents: new_food.price_cents,
      image: new_food
        .image
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string),
    };

    if food.name.is_empty() {
      return Err(Error::validation("Food name is required"));
    }
    if food.category.is_empty() {
      return Err(Error::validation("Food category is required"));
    }
    if food.price_cents <= 0 {
      return Err(Error::validation("Food price must be positive"));
    }

    let created = self.store.insert(&food).await?;
    info!(food_id = created.id, "Food created.");
    Ok(created)
  }

  pub async fn list(&self) -> Result<Vec<Food>> {
    self.store.list().await
  }

  pub async fn get(&self, id: i64) -> Result<Food> {
    self
      .store
      .get(id)
      .await?
      .ok_or_else(|| Error::not_found(format!("food {}", id)))
  }

  pub async fn list_by_category(&self, category: &str) -> Result<Vec<Food>> {
    let category = category.trim();
    if category.is_empty() {
      return Err(Error::validation("Category is required"));
    }
    self.store.list_by_category(category).await
  }

  /// Partial update; blank strings and non-positive prices are ignored.
  #[instrument(name = "food::update", skip(self, changes))]
  pub async fn update(&self, id: i64, changes: FoodChanges) -> Result<Food> {
    let changes = changes.normalized();
    if changes.is_empty() {
      // Nothing would be overwritten; still report a missing food.
      return self.get(id).await;
    }
    let updated = self
      .store
      .update(id, &changes)
      .await?
      .ok_or_else(|| Error::not_found(format!("food {}", id)))?;
    info!(food_id = id, "Food updated.");
    Ok(updated)
  }

  /// Deletes the food and, for local uploads, its image file. Historical
  /// order items are untouched.
  #[instrument(name = "food::delete", skip(self))]
  pub async fn delete(&self, id: i64) -> Result<()> {
    let food = self.get(id).await?;
    if !self.store.delete(id).await? {
      return Err(Error::not_found(format!("food {}", id)));
    }
    info!(food_id = id, "Food deleted.");

    if let Some(image_path) = food.image.as_deref().and_then(|img| self.local_upload_path(img)) {
      match tokio::fs::remove_file(&image_path).await {
        Ok(()) => info!(path = %image_path.display(), "Removed food image."),
        Err(e) => warn!(path = %image_path.display(), error = %e, "Could not remove food image."),
      }
    }
    Ok(())
  }

  pub async fn count(&self) -> Result<i64> {
    self.store.count().await
  }

  /// Maps `/uploads/<file>` to a path inside the uploads directory. Only the
  /// final path component is used, so a reference can never escape the directory.
  fn local_upload_path(&self, image: &str) -> Option<PathBuf> {
    let rest = image.strip_prefix(UPLOADS_PREFIX)?;
    let file_name = Path::new(rest).file_name()?;
    Some(self.uploads_dir.join(file_name))
  }
}
