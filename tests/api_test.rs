//! Integration tests for API endpoints

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use riskdesk::config::{Config, SeedConfig};
use riskdesk::{app, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    let config = Config::builtin().with_seed(SeedConfig {
        seed: 7,
        users: 23,
        customers: 12,
        products: 30,
        notifications: 8,
        stocks: 10,
        positions: 15,
    });
    app(AppState::seeded(Arc::new(config)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn assert_error_envelope(status: StatusCode, body: &Value) {
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], status.as_u16());
    assert!(body["data"].is_null());
    assert!(body["message"].is_string());
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let (status, body) = get(&app, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }
}

mod dashboard_tests {
    use super::*;

    #[tokio::test]
    async fn test_dashboard_stats() {
        let app = test_app();
        let (status, body) = get(&app, "/api/dashboard/stats").await;
        assert_eq!(status, StatusCode::OK);

        let stats = &body["data"];
        assert_eq!(stats["totalUsers"], 23);
        assert_eq!(stats["totalCustomers"], 12);
        assert_eq!(stats["totalProducts"], 30);
        assert_eq!(stats["totalNotifications"], 8);
        assert_eq!(stats["totalStocks"], 10);
        assert_eq!(stats["totalPositions"], 15);
        assert_eq!(stats["activeRiskSessions"], 0);

        let (_, overview) = get(&app, "/api/portfolio/overview").await;
        assert_eq!(stats["portfolioValue"], overview["data"]["totalValue"]);
    }

    #[tokio::test]
    async fn test_dashboard_stats_track_changes() {
        let app = test_app();
        send(&app, Method::DELETE, "/api/users/user_1", None).await;
        send(
            &app,
            Method::POST,
            "/api/risk/sessions",
            Some(json!({"symbol": "AAPL"})),
        )
        .await;

        let (_, body) = get(&app, "/api/dashboard/stats").await;
        assert_eq!(body["data"]["totalUsers"], 22);
        assert_eq!(body["data"]["activeRiskSessions"], 1);
    }
}

mod entity_tests {
    use super::*;

    #[tokio::test]
    async fn test_user_list_last_page() {
        let app = test_app();
        let (status, body) = get(&app, "/api/users?page=3&pageSize=10").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["code"], 200);
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 3);
        assert_eq!(body["data"]["total"], 23);
        assert_eq!(body["data"]["totalPages"], 3);
    }

    #[tokio::test]
    async fn test_keyword_without_match_is_empty_not_error() {
        let app = test_app();
        let (status, body) = get(&app, "/api/customers?page=1&pageSize=5&keyword=zz-no-match").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["items"], json!([]));
        assert_eq!(body["data"]["total"], 0);
        assert_eq!(body["data"]["totalPages"], 0);
    }

    #[tokio::test]
    async fn test_invalid_page() {
        let app = test_app();
        let (status, body) = get(&app, "/api/products?page=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["data"].is_null());

        let (status, _) = get(&app, "/api/products?pageSize=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_sorted_products() {
        let app = test_app();
        let (_, body) = get(&app, "/api/products?pageSize=30&sortBy=price&sortOrder=desc").await;

        let prices: Vec<f64> = body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["price"].as_f64().unwrap())
            .collect();
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_user_crud() {
        let app = test_app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/users",
            Some(json!({"username": "jdoe", "email": "jdoe@example.com", "name": "Jane Doe"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["code"], 201);
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (_, found) = get(&app, "/api/users?keyword=JDOE@").await;
        assert_eq!(found["data"]["total"], 1);

        let (status, updated) = send(
            &app,
            Method::PUT,
            &format!("/api/users/{}", id),
            Some(json!({"role": "admin"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["data"]["role"], "admin");
        assert_eq!(updated["data"]["name"], "Jane Doe");

        let (status, _) = send(&app, Method::DELETE, &format!("/api/users/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = get(&app, &format!("/api/users/{}", id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_customer_update_missing() {
        let app = test_app();
        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/customers/customer_999",
            Some(json!({"company": "Hooli"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mark_notification_read() {
        let app = test_app();
        let (status, body) =
            send(&app, Method::POST, "/api/notifications/notification_1/read", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["read"], true);

        let (_, list) = get(&app, "/api/notifications?keyword=ignored").await;
        assert_eq!(list["data"]["total"], 8);
    }
}

mod market_tests {
    use super::*;

    #[tokio::test]
    async fn test_stock_lookup() {
        let app = test_app();
        let (status, body) = get(&app, "/api/stocks/aapl").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["symbol"], "AAPL");

        let (status, _) = get(&app, "/api/stocks/ZZZZ").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_related_stocks() {
        let app = test_app();
        let (status, body) = get(&app, "/api/stocks/JPM/related").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["symbol"], "BRK.B");
        assert_eq!(body["data"][0]["relation"], "same_sector");

        let (_, body) = get(&app, "/api/stocks/AAPL/related?count=2").await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_related_count_not_a_number() {
        let app = test_app();
        let (status, body) = get(&app, "/api/stocks/AAPL/related?count=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error_envelope(status, &body);
    }

    #[tokio::test]
    async fn test_stock_metrics() {
        let app = test_app();
        let (status, body) = get(&app, "/api/stocks/msft/metrics").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["symbol"], "MSFT");

        let (_, stock) = get(&app, "/api/stocks/MSFT").await;
        assert_eq!(
            body["data"]["technicalIndicators"]["bollingerMiddle"],
            stock["data"]["currentPrice"]
        );
        assert!(body["data"]["analystRatings"]["buy"].as_u64().unwrap() >= 5);

        let (status, body) = get(&app, "/api/stocks/ZZZZ/metrics").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error_envelope(status, &body);
    }

    #[tokio::test]
    async fn test_stock_search_by_sector() {
        let app = test_app();
        let (_, body) = get(&app, "/api/stocks?keyword=financ").await;
        assert_eq!(body["data"]["total"], 2);
    }

    #[tokio::test]
    async fn test_portfolio_overview() {
        let app = test_app();
        let (status, body) = get(&app, "/api/portfolio/overview").await;
        assert_eq!(status, StatusCode::OK);

        let data = &body["data"];
        assert_eq!(data["positions"].as_array().unwrap().len(), 15);
        assert_eq!(data["topPerformers"].as_array().unwrap().len(), 3);

        let total: f64 = data["sectorAllocation"]
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["value"].as_f64().unwrap())
            .sum();
        assert!((total - data["totalValue"].as_f64().unwrap()).abs() < 1e-6);

        let (status, _) = get(&app, "/api/portfolio/overview?groupBy=color").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_positions_list() {
        let app = test_app();
        let (_, body) = get(&app, "/api/positions?pageSize=5&sortBy=marketValue&sortOrder=desc").await;
        assert_eq!(body["data"]["total"], 15);
        assert_eq!(body["data"]["items"].as_array().unwrap().len(), 5);
    }
}

mod risk_tests {
    use super::*;

    #[tokio::test]
    async fn test_single_analysis() {
        let app = test_app();
        let (status, body) = get(&app, "/api/risk/analyze?symbol=AAPL&name=Apple").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["riskLevel"], "VERY_HIGH");
        assert_eq!(body["data"]["recommendation"], "AVOID");
        let var = body["data"]["varValue"].as_f64().unwrap();
        assert!((var - 26_000.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_missing_subject() {
        let app = test_app();
        let (status, body) = get(&app, "/api/risk/analyze").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_strategy_from_assets_data() {
        let app = test_app();
        let assets = json!([
            {"symbol": "SPY", "name": "S&P 500 ETF", "position": 50, "type": "long"},
            {"symbol": "QQQ", "name": "Nasdaq ETF", "position": 50, "type": "short"}
        ]);
        let data = assets.to_string();
        let qs = serde_urlencoded::to_string([("strategy", "Balanced"), ("assetsData", data.as_str())])
            .unwrap();
        let (status, body) = get(&app, &format!("/api/risk/analyze?{}", qs)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["reports"].as_array().unwrap().len(), 2);
        let total = body["data"]["totalVar"].as_f64().unwrap();
        assert!((total - 28_600.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_malformed_assets_data() {
        let app = test_app();
        let qs = serde_urlencoded::to_string([("strategy", "x"), ("assetsData", "[{oops")]).unwrap();
        let (status, body) = get(&app, &format!("/api/risk/analyze?{}", qs)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["message"].as_str().unwrap().contains("Malformed"));
    }

    #[tokio::test]
    async fn test_strategy_body_with_bad_position() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/risk/strategy",
            Some(json!({"assets": [{"symbol": "SPY", "position": "x"}]})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error_envelope(status, &body);
        assert!(body["message"].as_str().unwrap().contains("Malformed"));
    }

    #[tokio::test]
    async fn test_session_body_with_bad_assets() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/risk/sessions",
            Some(json!({"strategyAssets": [{"symbol": "SPY"}]})),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_error_envelope(status, &body);
    }

    #[tokio::test]
    async fn test_weight_not_a_number() {
        let app = test_app();
        let (status, body) = get(&app, "/api/risk/analyze?symbol=AAPL&weight=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error_envelope(status, &body);
    }

    #[tokio::test]
    async fn test_params_body_with_wrong_type() {
        let app = test_app();
        let (_, created) = send(
            &app,
            Method::POST,
            "/api/risk/sessions",
            Some(json!({"symbol": "AAPL"})),
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/risk/sessions/{}/params", id),
            Some(json!({"volatility": "high"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_error_envelope(status, &body);
    }

    #[tokio::test]
    async fn test_close_session() {
        let app = test_app();
        let (_, created) = send(
            &app,
            Method::POST,
            "/api/risk/sessions",
            Some(json!({"symbol": "TSLA"})),
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/risk/sessions/{}", id);

        let (_, health) = get(&app, "/api/health").await;
        assert_eq!(health["riskSessions"], 1);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(body["data"].is_null());

        let (status, _) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_error_envelope(status, &body);

        let (_, health) = get(&app, "/api/health").await;
        assert_eq!(health["riskSessions"], 0);
    }

    #[tokio::test]
    async fn test_legacy_asset_list() {
        let app = test_app();
        let (status, body) = get(&app, "/api/risk/analyze?strategy=old&assets=AAPL,MSFT").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["reports"][0]["name"], "Strategy asset 1");
    }

    #[tokio::test]
    async fn test_post_strategy_with_params() {
        let app = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/risk/strategy",
            Some(json!({
                "assets": [{"symbol": "TLT", "name": "Treasury", "position": 100, "type": "long"}],
                "params": {"volatility": 0.1, "marketStress": 0, "liquidityRisk": 0, "concentrationRisk": 0}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let total = body["data"]["totalVar"].as_f64().unwrap();
        assert!((total - 10_000.0).abs() < 1e-6);
        // exactly 0.10 stays in the medium tier
        assert_eq!(body["data"]["reports"][0]["riskLevel"], "MEDIUM");
    }

    #[tokio::test]
    async fn test_session_flow() {
        let app = test_app();
        let (status, created) = send(
            &app,
            Method::POST,
            "/api/risk/sessions",
            Some(json!({"symbol": "NVDA", "name": "NVIDIA", "weight": 50})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["data"]["id"].as_str().unwrap().to_string();
        let first_var = created["data"]["reports"][0]["varValue"].as_f64().unwrap();
        assert!((first_var - 13_000.0).abs() < 1e-6);

        let (status, staged) = send(
            &app,
            Method::PUT,
            &format!("/api/risk/sessions/{}/params", id),
            Some(json!({"timeHorizonDays": 4})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(staged["data"]["hasPendingChanges"], true);
        assert_eq!(staged["data"]["reports"][0]["varValue"], created["data"]["reports"][0]["varValue"]);

        let (_, recomputed) = send(
            &app,
            Method::POST,
            &format!("/api/risk/sessions/{}/recompute", id),
            None,
        )
        .await;
        let var = recomputed["data"]["reports"][0]["varValue"].as_f64().unwrap();
        assert!((var - 52_000.0).abs() < 1e-6);

        let (_, reset) =
            send(&app, Method::POST, &format!("/api/risk/sessions/{}/reset", id), None).await;
        assert_eq!(reset["data"]["pending"]["timeHorizonDays"], 1);
        assert_eq!(reset["data"]["params"]["timeHorizonDays"], 4);

        let (status, _) = get(&app, "/api/risk/sessions/does-not-exist").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_recompute_rejects_bad_params() {
        let app = test_app();
        let (_, created) = send(
            &app,
            Method::POST,
            "/api/risk/sessions",
            Some(json!({"assets": "AAPL,MSFT"})),
        )
        .await;
        let id = created["data"]["id"].as_str().unwrap().to_string();

        send(
            &app,
            Method::PUT,
            &format!("/api/risk/sessions/{}/params", id),
            Some(json!({"volatility": 2.0})),
        )
        .await;
        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/risk/sessions/{}/recompute", id),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("volatility"));
    }
}
