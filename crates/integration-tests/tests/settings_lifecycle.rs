//! End-to-end settings lifecycle over the in-memory store.
//!
//! These drive the real `SettingsService` the builder serves, so the flows
//! match what the editor UI sees: first-contact provisioning, merged reads,
//! forward-compatible extras, and atomic rejection.

use serde_json::json;

use vitrine_builder::store::SettingsStore;
use vitrine_core::TenantId;
use vitrine_integration_tests::{payload, test_service};

#[tokio::test]
async fn test_fresh_tenant_gets_usable_defaults() {
    let (service, store) = test_service();
    let tenant = TenantId::new(501);

    let settings = service.get_effective_settings(tenant).await.expect("read");

    assert_eq!(settings.get("template"), Some(&json!("pro")));
    let slug = settings
        .get("slug")
        .and_then(serde_json::Value::as_str)
        .expect("slug");
    assert!(slug.starts_with("store-501-"));

    // The layout was provisioned alongside the row
    let doc = service.get_layout(tenant).await.expect("layout");
    assert!(doc.pointer("/layout/hero").is_some());

    // Exactly one row exists, and a second read reuses it
    assert_eq!(store.len(), 1);
    let again = service.get_effective_settings(tenant).await.expect("read");
    assert_eq!(again.get("slug"), settings.get("slug"));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_update_flows_into_effective_settings() {
    let (service, _store) = test_service();
    let tenant = TenantId::new(502);

    let settings = service
        .apply_settings_update(
            tenant,
            payload(json!({
                "hero_heading": "  Summer Sale  ",
                "accent_color": "#ff6600",
                "gallery_images": ["a.jpg", " b.jpg", "a.jpg"],
            })),
        )
        .await
        .expect("update");

    assert_eq!(settings.get("hero_heading"), Some(&json!("Summer Sale")));
    assert_eq!(settings.get("accent_color"), Some(&json!("#ff6600")));
    // Stored comma-joined, exposed as a de-duplicated array
    assert_eq!(
        settings.get("gallery_images"),
        Some(&json!(["a.jpg", "b.jpg"]))
    );

    // The cache was invalidated before the response; a fresh read agrees
    let reread = service.get_effective_settings(tenant).await.expect("read");
    assert_eq!(reread.get("hero_heading"), Some(&json!("Summer Sale")));
}

#[tokio::test]
async fn test_unknown_key_survives_round_trip() {
    let (service, store) = test_service();
    let tenant = TenantId::new(503);

    let settings = service
        .apply_settings_update(tenant, payload(json!({ "promo_banner_speed": 3 })))
        .await
        .expect("update");
    assert_eq!(settings.get("promo_banner_speed"), Some(&json!(3)));

    // It landed in the template blob, not in a scalar column
    let row = store.get(tenant).await.expect("get").expect("row");
    assert_eq!(
        row.template_settings.get("promo_banner_speed"),
        Some(&json!(3))
    );
}

#[tokio::test]
async fn test_rejected_payload_changes_nothing() {
    let (service, _store) = test_service();
    let tenant = TenantId::new(504);

    service
        .apply_settings_update(tenant, payload(json!({ "hero_heading": "Keep me" })))
        .await
        .expect("update");

    // Second payload mixes a good field with a bad one; all of it rejects
    let err = service
        .apply_settings_update(
            tenant,
            payload(json!({ "hero_heading": "Drop me", "currency": "dollars" })),
        )
        .await
        .expect_err("must reject");
    assert_eq!(err.code(), "validation_failed");

    let settings = service.get_effective_settings(tenant).await.expect("read");
    assert_eq!(settings.get("hero_heading"), Some(&json!("Keep me")));
    assert!(settings.get("currency").is_none());
}

#[tokio::test]
async fn test_clearing_a_field_removes_it() {
    let (service, _store) = test_service();
    let tenant = TenantId::new(505);

    service
        .apply_settings_update(tenant, payload(json!({ "hero_subtitle": "Everything off" })))
        .await
        .expect("update");

    let settings = service
        .apply_settings_update(tenant, payload(json!({ "hero_subtitle": null })))
        .await
        .expect("clear");
    assert!(settings.get("hero_subtitle").is_none());
}
