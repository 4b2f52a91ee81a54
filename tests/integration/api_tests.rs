use super::*;
use axum::http::{Method, StatusCode};
use price_catalog::view::LOAD_FAILED_MESSAGE;
use price_catalog::web::create_router;

#[tokio::test]
async fn test_health_check() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(sample_store(), false).await?);

    let response = make_request(&app, Method::GET, "/health").await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    assert_eq!(body["service"], "price-catalog");
    Ok(())
}

#[tokio::test]
async fn test_products_search_is_case_insensitive() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(sample_store(), true).await?);

    let response = make_request(&app, Method::GET, "/api/v1/products?search=PHONE").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["meta"]["count"], 2);
    assert_eq!(body["data"][0]["name"], "iphone-16");
    assert_eq!(body["data"][0]["lowest"]["website"], "B");
    assert_eq!(body["data"][1]["name"], "Smart-Phone-X");
    Ok(())
}

#[tokio::test]
async fn test_products_before_initialize() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(sample_store(), false).await?);

    let response = make_request(&app, Method::GET, "/api/v1/products").await?;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn test_products_after_failed_load() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(MemoryObjectStore::new(), true).await?);

    let response = make_request(&app, Method::GET, "/api/v1/products").await?;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = read_json(response).await?;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], LOAD_FAILED_MESSAGE);

    let response = make_request(&app, Method::GET, "/").await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_text(response).await?.contains(LOAD_FAILED_MESSAGE));
    Ok(())
}

#[tokio::test]
async fn test_product_detail_and_missing() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(sample_store(), true).await?);

    let response = make_request(&app, Method::GET, "/api/v1/products/galaxy-buds-3").await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await?;
    assert_eq!(body["data"]["lowest"]["website"], "A");
    assert_eq!(body["data"]["lowest"]["formatted_price"], "Unavailable");

    let response = make_request(&app, Method::GET, "/api/v1/products/walkman").await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn test_status_endpoint() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(sample_store(), true).await?);

    let response = make_request(&app, Method::GET, "/api/v1/status").await?;
    let body = read_json(response).await?;

    assert_eq!(body["data"]["status"], "ready");
    assert_eq!(body["data"]["offers"], 8);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_renders_cards() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(sample_store(), true).await?);

    let response = make_request(&app, Method::GET, "/?search=smart").await?;
    assert_eq!(response.status(), StatusCode::OK);

    let html = read_text(response).await?;
    assert!(html.contains("PRICE TRACKER"));
    assert!(html.contains("Smart Phone X"));
    assert!(html.contains("₹19999 on A"));
    assert!(html.contains("D: Unavailable"));
    assert!(!html.contains("iphone 16"));
    Ok(())
}

#[tokio::test]
async fn test_placeholder_image_served() -> anyhow::Result<()> {
    let app = create_router(create_test_app_state(sample_store(), false).await?);

    let response = make_request(&app, Method::GET, "/static/image-unavailable.svg").await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "image/svg+xml");
    Ok(())
}
