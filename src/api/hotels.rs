//! Hotel endpoints: seeding, listing and creation.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

use crate::db::{
    self, create_document, get_documents, Document, Entity, Filter, Hotel, HotelSearch,
    SeedResponse,
};
use crate::AppState;

use super::error::ApiError;
use super::validation::ValidJson;

/// Insert the sample hotels that are not present yet
///
/// POST /hotels/seed
pub async fn seed_hotels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SeedResponse>, ApiError> {
    let store = state.store()?;
    db::seed_hotels(store).await?;

    Ok(Json(SeedResponse {
        status: "ok".to_string(),
    }))
}

/// List hotels, optionally restricted to one city (exact match)
///
/// GET /hotels?city=
pub async fn list_hotels(
    State(state): State<Arc<AppState>>,
    search: Result<Query<HotelSearch>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Query(search) = search?;
    let store = state.store()?;

    let filter = match search.city.as_deref().filter(|city| !city.is_empty()) {
        Some(city) => Filter::new().eq("city", city),
        None => Filter::new(),
    };

    let hotels = get_documents(store, Hotel::COLLECTION, &filter, None).await?;
    Ok(Json(hotels.into_iter().map(Document::into_json).collect()))
}

/// Add a hotel outside the sample set
///
/// POST /hotels
pub async fn create_hotel(
    State(state): State<Arc<AppState>>,
    ValidJson(hotel): ValidJson<Hotel>,
) -> Result<Json<Value>, ApiError> {
    let store = state.store()?;
    let id = create_document(store, &hotel).await?;
    info!(hotel_id = %id, name = %hotel.name, city = %hotel.city, "Hotel created");

    let created = store
        .find_one(Hotel::COLLECTION, &Filter::by_id(id.as_str()))
        .await?
        .ok_or_else(|| ApiError::internal("Hotel vanished after insert"))?;

    Ok(Json(created.into_json()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{detached_state, failing_state, memory_state};
    use axum::http::StatusCode;

    fn search(city: Option<&str>) -> Result<Query<HotelSearch>, QueryRejection> {
        Ok(Query(HotelSearch {
            city: city.map(str::to_string),
        }))
    }

    fn names(hotels: &[Value]) -> Vec<&str> {
        hotels.iter().filter_map(|h| h["name"].as_str()).collect()
    }

    #[tokio::test]
    async fn test_seed_twice_yields_three_hotels() {
        let state = memory_state().await;

        let Json(first) = seed_hotels(State(state.clone())).await.unwrap();
        assert_eq!(first.status, "ok");
        seed_hotels(State(state.clone())).await.unwrap();

        let Json(hotels) = list_hotels(State(state), search(None)).await.unwrap();
        assert_eq!(
            names(&hotels),
            vec!["Seaside Paradise Resort", "Urban Chic Hotel", "Mountain Escape Lodge"]
        );
    }

    #[tokio::test]
    async fn test_list_serializes_id_and_timestamps() {
        let state = memory_state().await;
        seed_hotels(State(state.clone())).await.unwrap();

        let Json(hotels) = list_hotels(State(state), search(Some("Denver"))).await.unwrap();
        assert_eq!(hotels.len(), 1);

        let hotel = &hotels[0];
        assert!(!hotel["id"].as_str().unwrap().is_empty());
        assert!(hotel.get("_id").is_none());
        assert_eq!(hotel["price_per_night"], 189.0);
        assert_eq!(hotel["rating"], 4.5);
        assert_eq!(hotel["images"].as_array().unwrap().len(), 2);
        assert!(chrono::DateTime::parse_from_rfc3339(hotel["created_at"].as_str().unwrap()).is_ok());
    }

    #[tokio::test]
    async fn test_city_filter_is_exact() {
        let state = memory_state().await;
        seed_hotels(State(state.clone())).await.unwrap();

        let Json(hotels) = list_hotels(State(state.clone()), search(Some("New York")))
            .await
            .unwrap();
        assert_eq!(names(&hotels), vec!["Urban Chic Hotel"]);
        assert!(hotels.iter().all(|h| h["city"] == "New York"));

        let Json(hotels) = list_hotels(State(state.clone()), search(Some("new york")))
            .await
            .unwrap();
        assert!(hotels.is_empty());

        let Json(hotels) = list_hotels(State(state), search(Some(""))).await.unwrap();
        assert_eq!(hotels.len(), 3);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let state = memory_state().await;
        let Json(hotels) = list_hotels(State(state), search(None)).await.unwrap();
        assert!(hotels.is_empty());
    }

    #[tokio::test]
    async fn test_seed_without_store_is_500() {
        let err = seed_hotels(State(detached_state())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "[internal_error] Database not configured");
    }

    #[tokio::test]
    async fn test_list_store_failure_is_500() {
        let err = list_hotels(State(failing_state()), search(None))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_create_hotel_applies_defaults() {
        let state = memory_state().await;
        let hotel: Hotel = serde_json::from_value(serde_json::json!({
            "name": "Harbor View Inn",
            "city": "Seattle",
            "description": "Waterfront rooms near the ferry terminal.",
            "price_per_night": 159.0
        }))
        .unwrap();

        let Json(created) = create_hotel(State(state.clone()), ValidJson(hotel)).await.unwrap();
        assert_eq!(created["rating"], 4.5);
        assert_eq!(created["images"], serde_json::json!([]));

        let Json(hotels) = list_hotels(State(state), search(Some("Seattle"))).await.unwrap();
        assert_eq!(hotels[0]["id"], created["id"]);
    }
}
