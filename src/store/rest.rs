//! PostgREST Meal Store
//!
//! HTTP client for the hosted database's table API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tokio::sync::RwLock;

use super::{MealStore, StoreError, StoreResult};
use crate::config::StoreConfig;
use crate::model::{Meal, MealId, NewMeal};

/// Meal store backed by a PostgREST endpoint (`{url}/rest/v1/{table}`)
pub struct RestMealStore {
    client: Client,
    config: StoreConfig,
    /// Bearer token of the signed-in user; the anon key is used when unset
    access_token: RwLock<Option<String>>,
}

impl RestMealStore {
    pub fn new(config: StoreConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: StoreConfig) -> Self {
        Self {
            client,
            config,
            access_token: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn collection_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.base_url(), self.config.table)
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self.access_token.read().await;
        let bearer = token.as_deref().unwrap_or(&self.config.anon_key);
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    async fn send(&self, request: RequestBuilder) -> StoreResult<Response> {
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(StoreError::from_transport)?;

        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(StoreError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[async_trait]
impl MealStore for RestMealStore {
    async fn list(&self) -> StoreResult<Vec<Meal>> {
        let request = self
            .client
            .get(self.collection_url())
            .query(&[("select", "*")]);

        let meals: Vec<Meal> = self.send(request).await?.json().await?;
        tracing::debug!(count = meals.len(), "Fetched meals");
        Ok(meals)
    }

    async fn insert(&self, meals: Vec<NewMeal>) -> StoreResult<Vec<Meal>> {
        let request = self
            .client
            .post(self.collection_url())
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .json(&meals);

        let inserted: Vec<Meal> = self.send(request).await?.json().await?;
        tracing::debug!(count = inserted.len(), "Inserted meals");
        Ok(inserted)
    }

    async fn delete(&self, id: MealId) -> StoreResult<()> {
        let request = self
            .client
            .delete(self.collection_url())
            .query(&[("id", format!("eq.{}", id))]);

        self.send(request).await?;
        tracing::debug!(meal_id = id, "Deleted meal");
        Ok(())
    }

    async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_url() {
        let store = RestMealStore::new(StoreConfig {
            url: "https://demo.supabase.co/".to_string(),
            anon_key: "anon".to_string(),
            table: "meals".to_string(),
        });
        assert_eq!(store.collection_url(), "https://demo.supabase.co/rest/v1/meals");
    }

    #[tokio::test]
    async fn test_unreachable_store() {
        let store = RestMealStore::new(StoreConfig {
            url: "http://127.0.0.1:1".to_string(),
            ..Default::default()
        });

        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable | StoreError::Request(_)));
    }
}
