use super::*;
use price_catalog::{
    CatalogLoader, CatalogPipeline, CatalogSource, HttpObjectStore, ImageRef, Price, ResourceResolver, TokenUrlSigner,
    compare,
};
use price_catalog::utils::error::LoadError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_signer() -> Arc<TokenUrlSigner> {
    Arc::new(TokenUrlSigner::new("https://cdn.example.com", TEST_SECRET).unwrap())
}

#[tokio::test]
async fn test_sample_catalog_end_to_end() -> anyhow::Result<()> {
    let loader = CatalogLoader::new(Arc::new(sample_store()), TEST_BUCKET, "product_data.json");
    let resolver = ResourceResolver::new(token_signer(), TEST_BUCKET, Duration::from_secs(3600));
    let catalog = CatalogPipeline::new(loader, resolver).load().await?;

    let names: Vec<&str> = catalog.products().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["iphone-16", "galaxy-buds-3", "Smart-Phone-X"]);
    assert_eq!(catalog.unavailable_images(), 0);

    // Offer order survives concurrent resolution
    let iphone = catalog.get("iphone-16").unwrap();
    let sites: Vec<&str> = iphone.sites.iter().map(|o| o.website.as_str()).collect();
    assert_eq!(sites, vec!["A", "B", "C"]);
    for offer in &iphone.sites {
        match &offer.image {
            ImageRef::Signed { url, .. } => {
                let expected = format!("https://cdn.example.com/{}/iphone-16/{}.jpg?token=", TEST_BUCKET, offer.website.to_lowercase());
                assert!(url.starts_with(&expected), "{}", url);
            }
            other => panic!("unexpected image {:?}", other),
        }
    }

    // First of the tied minimum wins; others drop only B
    let comparison = compare(iphone)?;
    assert_eq!(comparison.lowest.website, "B");
    let others: Vec<&str> = comparison.others.iter().map(|o| o.website.as_str()).collect();
    assert_eq!(others, vec!["A", "C"]);

    // All unavailable: the first offer is reported
    let buds = compare(catalog.get("galaxy-buds-3").unwrap())?;
    assert_eq!(buds.lowest.website, "A");
    assert_eq!(buds.lowest.price, Price::Unavailable);
    assert_eq!(buds.others.len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_failed_image_keeps_offer_comparable() -> anyhow::Result<()> {
    let loader = CatalogLoader::new(Arc::new(sample_store()), TEST_BUCKET, "product_data.json");
    let resolver = ResourceResolver::new(
        Arc::new(FlakySigner { poison: "iphone-16/b" }),
        TEST_BUCKET,
        Duration::from_secs(60),
    );
    let catalog = CatalogPipeline::new(loader, resolver).load().await?;

    assert_eq!(catalog.unavailable_images(), 1);

    let iphone = catalog.get("iphone-16").unwrap();
    let b = &iphone.sites[1];
    assert_eq!(b.website, "B");
    assert_eq!(b.image, ImageRef::Unavailable);
    assert_eq!(b.url, "https://b.in/iphone-16");

    let comparison = compare(iphone)?;
    assert_eq!(comparison.lowest.website, "B");

    Ok(())
}

#[tokio::test]
async fn test_bounded_concurrency_preserves_order() -> anyhow::Result<()> {
    let loader = CatalogLoader::new(Arc::new(sample_store()), TEST_BUCKET, "product_data.json");
    let resolver = ResourceResolver::new(Arc::new(FlakySigner { poison: "none-match" }), TEST_BUCKET, Duration::from_secs(60))
        .with_max_concurrent(2);
    let catalog = CatalogPipeline::new(loader, resolver).load().await?;

    let urls: Vec<&str> = catalog
        .products()
        .iter()
        .flat_map(|p| p.sites.iter())
        .map(|o| o.image.href("missing"))
        .collect();
    assert_eq!(urls.len(), 8);
    assert_eq!(urls[0], "https://signed.example.com/product-data/iphone-16/a.jpg");
    assert_eq!(urls[7], "https://signed.example.com/product-data/spx/d.jpg");

    Ok(())
}

#[tokio::test]
async fn test_http_store_feeds_pipeline() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/{}/product_data.json", TEST_BUCKET)))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_CATALOG))
        .mount(&server)
        .await;

    let config = get_test_config(&server.uri());
    let store = Arc::new(HttpObjectStore::from_config(&config.storage)?);
    let pipeline = CatalogPipeline::from_config(&config, store, token_signer());

    let catalog = pipeline.load().await?;
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.offer_count(), 8);

    Ok(())
}

#[tokio::test]
async fn test_http_store_errors_are_unreachable() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = get_test_config(&server.uri());
    let store = Arc::new(HttpObjectStore::from_config(&config.storage)?);
    let pipeline = CatalogPipeline::from_config(&config, store, token_signer());

    let err = pipeline.load().await.unwrap_err();
    assert!(matches!(err, LoadError::Unreachable(_)), "{:?}", err);

    Ok(())
}

#[tokio::test]
async fn test_negative_infinity_is_malformed() -> anyhow::Result<()> {
    let store = MemoryObjectStore::new().with_object(
        TEST_BUCKET,
        "product_data.json",
        r#"{"products":[{"product_name":"x","sites":[{"website":"a","price":-Infinity,"url":"u","image":"i"}]}]}"#,
    );
    let loader = CatalogLoader::new(Arc::new(store), TEST_BUCKET, "product_data.json");

    let err = loader.load().await.unwrap_err();
    assert!(matches!(err, LoadError::Malformed { .. }), "{:?}", err);

    Ok(())
}
