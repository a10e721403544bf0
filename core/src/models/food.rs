// src/models/food.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Food {
  pub id: i64,
  pub name: String,
  pub category: String,
  /// Current catalog price in minor units.
  pub price_cents: i64,
  /// Image reference; `/uploads/<file>` for locally stored images.
  pub image: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewFood {
  pub name: String,
  pub category: String,
  pub price_cents: i64,
  #[serde(default)]
  pub image: Option<String>,
}

/// Partial update. Blank strings and non-positive prices leave the stored value alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoodChanges {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub price_cents: Option<i64>,
  #[serde(default)]
  pub image: Option<String>,
}

impl FoodChanges {
  /// Drops every field that would not overwrite: blank after trimming, or a non-positive price.
  pub fn normalized(&self) -> FoodChanges {
    let keep = |s: &Option<String>| {
      s.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
    };
    FoodChanges {
      name: keep(&self.name),
      category: keep(&self.category),
      price_cents: self.price_cents.filter(|p| *p > 0),
      image: keep(&self.image),
    }
  }

  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.category.is_none() && self.price_cents.is_none() && self.image.is_none()
  }
}
