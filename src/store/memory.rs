//! In-process meal store

use async_trait::async_trait;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use super::{MealStore, StoreResult};
use crate::model::{Meal, MealId, NewMeal};

/// Meal store held in memory. Ids are assigned sequentially from 1.
#[derive(Default)]
pub struct MemoryMealStore {
    meals: RwLock<Vec<Meal>>,
    next_id: AtomicI64,
}

impl MemoryMealStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_meals(meals: Vec<Meal>) -> Self {
        let next_id = meals.iter().map(|m| m.id).max().unwrap_or(0);
        Self {
            meals: RwLock::new(meals),
            next_id: AtomicI64::new(next_id),
        }
    }

    pub async fn len(&self) -> usize {
        self.meals.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.meals.read().await.is_empty()
    }
}

#[async_trait]
impl MealStore for MemoryMealStore {
    async fn list(&self) -> StoreResult<Vec<Meal>> {
        Ok(self.meals.read().await.clone())
    }

    async fn insert(&self, meals: Vec<NewMeal>) -> StoreResult<Vec<Meal>> {
        let inserted: Vec<Meal> = meals
            .into_iter()
            .map(|m| m.with_id(self.next_id.fetch_add(1, Ordering::SeqCst) + 1))
            .collect();

        self.meals.write().await.extend(inserted.iter().cloned());
        Ok(inserted)
    }

    async fn delete(&self, id: MealId) -> StoreResult<()> {
        // A filter that matches nothing is not an error
        self.meals.write().await.retain(|m| m.id != id);
        Ok(())
    }
}
