//! Venue API integration tests
//!
//! Drives the real route table through `actix_web::test` against a
//! temporary SQLite database.

use std::sync::{Arc, Once};

use actix_web::{App, http::StatusCode, middleware::from_fn, test};
use serde_json::Value;
use tempfile::TempDir;

use venuetrack::api::middleware::request_id;
use venuetrack::config::init_config;
use venuetrack::runtime::lifetime::startup::StartupContext;
use venuetrack::runtime::modes::server::configure_app;
use venuetrack::services::ImportService;
use venuetrack::storage::{PoolSettings, SeaOrmStorage};
use venuetrack::utils::csv_handler::read_venue_rows;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

const SEED_CSV: &str = "\
entity_id,entity_type,chain_id,chain_name,store_id,name,state_code,state_name,city,sub_category,dma,date_opened,date_closed,foot_traffic,sales
E1,poi,C1,Acme,S1,Acme Austin,TX,Texas,Austin,Coffee,Austin TX,2019-03-01,,100,1500.50
E2,poi,C1,Acme,,Acme Popup,,,,,,,,50,
E3,poi,C2,Bolt,S2,Bolt Dallas,TX,Texas,Dallas,Gym,Dallas-Ft. Worth,2018-01-15,2022-06-30,300,2500.25
E4,poi,C2,Bolt,S3,Bolt LA,CA,California,Los Angeles,Gym,Los Angeles,2021-05-10,,200,
";

async fn create_context() -> (StartupContext, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!("sqlite://{}?mode=rwc", temp_dir.path().join("api.db").display());
    let storage = Arc::new(
        SeaOrmStorage::new(&db_url, &PoolSettings::default())
            .await
            .expect("Failed to create storage"),
    );

    let rows = read_venue_rows(SEED_CSV.as_bytes()).unwrap();
    ImportService::new(storage.clone())
        .import_rows(rows)
        .await
        .unwrap();

    (StartupContext::from_storage(storage), temp_dir)
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .wrap(from_fn(request_id))
                .configure(|cfg| configure_app(cfg, &$ctx, "/api")),
        )
        .await
    };
}

macro_rules! get_json {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn entity_ids(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["entityId"].as_str().unwrap().to_string())
        .collect()
}

#[actix_rt::test]
async fn test_city_filter_returns_flattened_item() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (status, body) = get_json!(app, "/api/venues?city=austin");
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["totalItems"], 1);
    let item = &body["items"][0];
    assert_eq!(item["entityId"], "E1");
    assert_eq!(item["open"], true);
    assert_eq!(item["footTraffic"], 100);
    assert_eq!(item["chainName"], "Acme");
    assert_eq!(item["city"], "Austin");
    assert_eq!(item["dateOpened"], "2019-03-01");
    assert_eq!(item["dateClosed"], Value::Null);

    assert_eq!(body["filters"], serde_json::json!({"city": "austin"}));
}

#[actix_rt::test]
async fn test_storeless_entity_is_open_and_has_no_city_option() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (_, body) = get_json!(app, "/api/venues?open=true");
    let ids = entity_ids(&body);
    assert!(ids.contains(&"E2".to_string()));
    assert!(!ids.contains(&"E3".to_string()));

    let (status, options) = get_json!(app, "/api/venues/filter-options");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(options["success"], true);
    assert_eq!(options["message"], "Filter options retrieved successfully");
    assert_eq!(
        options["data"]["cities"],
        serde_json::json!(["Austin", "Dallas", "Los Angeles"])
    );
}

#[actix_rt::test]
async fn test_state_code_is_case_insensitive() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (_, body) = get_json!(app, "/api/venues?stateCode=ca");
    assert_eq!(entity_ids(&body), vec!["E4"]);
}

#[actix_rt::test]
async fn test_default_page_shape() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (status, body) = get_json!(app, "/api/venues");
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("success").is_none());
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 20);
    assert_eq!(body["totalItems"], 4);
    assert_eq!(body["totalPages"], 1);
    assert_eq!(body["filters"], serde_json::json!({}));
    assert_eq!(
        body["sort"],
        serde_json::json!({"field": "footTraffic", "order": "asc"})
    );
    assert_eq!(entity_ids(&body), vec!["E2", "E1", "E4", "E3"]);
}

#[actix_rt::test]
async fn test_unknown_sort_falls_back_to_foot_traffic() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (status, body) = get_json!(app, "/api/venues?sortBy=dropTables&sortOrder=DESC");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sort"]["field"], "footTraffic");
    assert_eq!(body["sort"]["order"], "desc");
    assert_eq!(entity_ids(&body), vec!["E3", "E4", "E1", "E2"]);
}

#[actix_rt::test]
async fn test_sort_by_chain_name_desc() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (_, body) = get_json!(app, "/api/venues?sortBy=chainName&sortOrder=desc");
    // 同一 chain 内按 entity_id 升序
    assert_eq!(entity_ids(&body), vec!["E3", "E4", "E1", "E2"]);
}

#[actix_rt::test]
async fn test_pagination_clamping() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (_, body) = get_json!(app, "/api/venues?page=2&pageSize=3");
    assert_eq!(body["page"], 2);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(entity_ids(&body), vec!["E3"]);

    let (_, body) = get_json!(app, "/api/venues?page=-1&pageSize=999");
    assert_eq!(body["page"], 1);
    assert_eq!(body["pageSize"], 200);

    let (_, body) = get_json!(app, "/api/venues?page=9");
    assert_eq!(body["items"], serde_json::json!([]));
    assert_eq!(body["totalItems"], 4);
}

#[actix_rt::test]
async fn test_out_of_range_page_returns_empty_page() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    for uri in [
        "/api/venues?page=99999999999999999999",
        "/api/venues?page=100000000000000000&pageSize=200",
    ] {
        let (status, body) = get_json!(app, uri);
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body["items"], serde_json::json!([]));
        assert_eq!(body["totalItems"], 4);
    }
}

#[actix_rt::test]
async fn test_summary_agrees_with_list() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (status, body) = get_json!(app, "/api/venues/summary?stateName=texas");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Venue summary statistics retrieved successfully"
    );
    assert_eq!(body["filters"], serde_json::json!({"stateName": "texas"}));

    let data = &body["data"];
    assert_eq!(data["totalVenues"], 2);
    assert_eq!(data["totalFootTraffic"], 400);
    assert_eq!(data["openVenues"], 1);
    assert_eq!(data["closedVenues"], 1);
    assert_eq!(data["uniqueChains"], 2);
    assert_eq!(data["uniqueCities"], 2);
    assert_eq!(data["uniqueStates"], 1);

    let (_, list) = get_json!(app, "/api/venues?stateName=texas&pageSize=200");
    assert_eq!(list["totalItems"], data["totalVenues"]);
}

#[actix_rt::test]
async fn test_summary_without_filters_counts_storeless_as_open() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (_, body) = get_json!(app, "/api/venues/summary");
    let data = &body["data"];
    assert_eq!(data["totalVenues"], 4);
    assert_eq!(data["openVenues"], 3);
    assert_eq!(data["closedVenues"], 1);
    assert_eq!(data["averageFootTraffic"], 162.5);
}

#[actix_rt::test]
async fn test_malformed_date_is_400() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (status, body) = get_json!(app, "/api/venues?openedAfter=2020-13-45");
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Invalid date format for openedAfter: 2020-13-45"
    );

    let (status, _) = get_json!(app, "/api/venues/summary?closedBefore=yesterday");
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_date_range_filter() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (_, body) = get_json!(
        app,
        "/api/venues?openedAfter=2019-01-01&openedBefore=2021-12-31"
    );
    assert_eq!(entity_ids(&body), vec!["E1", "E4"]);
}

#[actix_rt::test]
async fn test_unknown_route_is_404_envelope() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let (status, body) = get_json!(app, "/api/nope");
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Route /api/nope not found");
}

#[actix_rt::test]
async fn test_health_and_stats() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["message"], "API is healthy and database is connected");

    let (status, body) = get_json!(app, "/api/stats");
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        serde_json::json!({"chains": 2, "stores": 3, "entities": 4})
    );
}

#[actix_rt::test]
async fn test_request_id_is_echoed() {
    let (ctx, _dir) = create_context().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");
}
