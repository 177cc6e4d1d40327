mod common;

use shorty::domain::entities::CacheOutcome;
use shorty::domain::keys::CacheKey;
use shorty::infrastructure::cache::CacheStore;

#[tokio::test]
async fn test_create_resolve_and_count() {
    let ctx = common::create_test_state(common::default_policy());
    let service = ctx.state.link_service.clone();

    let created = service.create("https://example.com/a").await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.short_code, "1");
    assert_eq!(created.short_url, "https://s.test/1");

    let cached = ctx.cache.get(&CacheKey::url("1")).await.unwrap();
    assert_eq!(cached.as_deref(), Some("https://example.com/a"));

    let first = service.resolve("1").await.unwrap();
    assert_eq!(first.long_url, "https://example.com/a");
    assert_eq!(first.cache, CacheOutcome::Hit);
    assert_eq!(service.clicks("1").await.unwrap(), 1);

    service.resolve("1").await.unwrap();
    assert_eq!(service.clicks("1").await.unwrap(), 2);

    let missing = service.resolve("zzzz").await;
    assert!(matches!(
        missing,
        Err(shorty::error::AppError::NotFound { .. })
    ));
    assert_eq!(service.clicks("zzzz").await.unwrap(), 0);
}

#[tokio::test]
async fn test_codes_roll_over_after_single_symbol() {
    let ctx = common::create_test_state(common::default_policy());
    let service = ctx.state.link_service.clone();

    let mut last = None;
    for i in 1..=62 {
        last = Some(
            service
                .create(&format!("https://example.com/{i}"))
                .await
                .unwrap(),
        );
        if i == 61 {
            assert_eq!(last.as_ref().unwrap().short_code, "Z");
        }
    }

    assert_eq!(last.unwrap().short_code, "10");
    assert_eq!(service.total_links().await.unwrap(), 62);
}

#[tokio::test]
async fn test_cache_loss_falls_back_to_registry() {
    let ctx = common::create_test_state(common::default_policy());
    let service = ctx.state.link_service.clone();
    let created = service.create("https://example.com/lost").await.unwrap();

    // A fresh service over an empty cache still resolves from the registry.
    let empty_cache = std::sync::Arc::new(shorty::infrastructure::cache::MemoryStore::new());
    let cold = shorty::application::services::LinkService::new(
        ctx.repository.clone(),
        empty_cache.clone(),
        common::BASE_URL,
    );

    let resolution = cold.resolve(&created.short_code).await.unwrap();
    assert_eq!(resolution.cache, CacheOutcome::Miss);
    assert_eq!(resolution.long_url, "https://example.com/lost");
    assert!(
        empty_cache
            .get(&CacheKey::url(&created.short_code))
            .await
            .unwrap()
            .is_some()
    );
}
