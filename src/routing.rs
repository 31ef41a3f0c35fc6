//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState, Error,
    category::get_categories_endpoint,
    endpoints,
    purchase::{
        create_purchase_endpoint, delete_purchase_endpoint, get_purchase_endpoint,
        list_purchases_endpoint, update_purchase_endpoint,
    },
    statistics::get_statistics_endpoint,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::PURCHASES,
            get(list_purchases_endpoint).post(create_purchase_endpoint),
        )
        .route(
            endpoints::PURCHASE,
            get(get_purchase_endpoint)
                .put(update_purchase_endpoint)
                .delete(delete_purchase_endpoint),
        )
        .route(endpoints::STATISTICS, get(get_statistics_endpoint))
        .route(endpoints::CATEGORIES, get(get_categories_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, category::Categories, endpoints, endpoints::format_endpoint};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().expect("Could not open in-memory SQLite database"),
            "Etc/UTC",
            Categories::default(),
        )
        .expect("Could not create app state");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/unknown").await;

        response.assert_status_not_found();
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn purchase_lifecycle() {
        let server = get_test_server();

        let created = server
            .post(endpoints::PURCHASES)
            .json(&json!({
                "name": "Milk",
                "amount": 3.5,
                "category": "Alimentos",
                "date": "2025-10-05",
            }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let id = created.json::<Value>()["id"]
            .as_str()
            .expect("created purchase should have an ID")
            .to_owned();
        let purchase_path = format_endpoint(endpoints::PURCHASE, &id);

        let listed = server.get(endpoints::PURCHASES).await.json::<Value>();
        assert_eq!(listed["total"], 1);
        assert_eq!(listed["purchases"][0]["name"], "Milk");
        assert_eq!(listed["purchases"][0]["date"], "2025-10-05");

        server
            .put(&purchase_path)
            .json(&json!({
                "name": "Bus",
                "amount": 2.0,
                "category": "Transporte",
                "date": "2025-10-06",
            }))
            .await
            .assert_status_ok();
        let fetched = server.get(&purchase_path).await.json::<Value>();
        assert_eq!(fetched["name"], "Bus");
        assert_eq!(fetched["id"], id.as_str());

        server
            .delete(&purchase_path)
            .await
            .assert_status(StatusCode::NO_CONTENT);
        server.get(&purchase_path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn serves_categories_and_statistics() {
        let server = get_test_server();

        let categories = server.get(endpoints::CATEGORIES).await.json::<Value>();
        assert_eq!(categories.as_array().map(Vec::len), Some(6));

        let statistics = server.get(endpoints::STATISTICS).await;
        statistics.assert_status_ok();
        assert_eq!(statistics.json::<Value>()["current_count"], 0);
    }
}
