//! Meal Store
//!
//! Collection-style access to the hosted `meals` table: read everything,
//! insert, and delete by id. The store is the source of truth; callers keep
//! only a cache that they reconcile from each response.
//!
//! - [`RestMealStore`]: PostgREST client for the hosted database
//! - [`MemoryMealStore`]: in-process store for local runs and tests

mod error;
mod memory;
mod rest;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryMealStore;
pub use rest::RestMealStore;

use async_trait::async_trait;

use crate::model::{Meal, MealId, NewMeal};

/// Remote meal collection
#[async_trait]
pub trait MealStore: Send + Sync {
    /// Fetch the full collection
    async fn list(&self) -> StoreResult<Vec<Meal>>;

    /// Insert records and return them as stored (with ids assigned)
    async fn insert(&self, meals: Vec<NewMeal>) -> StoreResult<Vec<Meal>>;

    /// Delete the record with the given id
    async fn delete(&self, id: MealId) -> StoreResult<()>;

    /// Act on behalf of a signed-in user, or anonymously with `None`.
    /// Stores without per-user access ignore this.
    async fn set_access_token(&self, _token: Option<String>) {}
}
