#![allow(clippy::unwrap_used)]
// End-to-end tests for the resource hooks against a wiremock backend.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::{broadcast, mpsc};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chrono::{TimeZone, Utc};
use indexa_core::resources::{DomainServices, ReindexJobs};
use indexa_core::{
    CacheEvent, ChannelNotifier, CreateDomainService, CreateReindexJob, ListParams,
    Notification, NotificationLevel, Portal, PortalConfig, QueryKey, QueryOptions,
    UpdateDomainService,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct Harness {
    server: MockServer,
    portal: Portal,
    notifications: mpsc::UnboundedReceiver<Notification>,
}

async fn harness(token: Option<&str>) -> Harness {
    let server = MockServer::start().await;
    let mut config = PortalConfig::new(server.uri().parse().unwrap());
    if let Some(token) = token {
        config = config.with_token(token);
    }
    let (notifier, notifications) = ChannelNotifier::new();
    let portal = Portal::with_notifier(config, Arc::new(notifier)).unwrap();
    Harness {
        server,
        portal,
        notifications,
    }
}

fn page(items: serde_json::Value, page: u32) -> serde_json::Value {
    let total = items.as_array().map_or(0, Vec::len);
    json!({ "items": items, "page": page, "pages": 1, "size": 25, "total": total })
}

fn service(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": "orders",
        "domains": ["a.com"],
        "base_url": "https://orders.internal",
        "indexes_path_prefix": "orders_",
        "excluded_entities": [],
        "enabled": true
    })
}

fn create_payload() -> CreateDomainService {
    CreateDomainService {
        name: "orders".into(),
        domains: vec!["a.com".into()],
        base_url: "https://orders.internal".into(),
        indexes_path_prefix: "orders_".into(),
        excluded_entities: Vec::new(),
        enabled: true,
    }
}

/// Invalidation prefixes published since the receiver was created.
fn drain_invalidations(rx: &mut broadcast::Receiver<CacheEvent>) -> Vec<QueryKey> {
    let mut prefixes = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let CacheEvent::Invalidated { prefix, .. } = event {
            prefixes.push(prefix);
        }
    }
    prefixes
}

// ── Queries ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_independent_queries_run_concurrently() {
    let h = harness(Some("t")).await;

    Mock::given(method("GET"))
        .and(path("/domain-services"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(json!([service("ds-1")]), 1))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/providers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "items": [{ "name": "github", "enabled": true, "healty": true }] }))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let services = h.portal.domain_services();
    let providers = h.portal.providers();
    let params = ListParams::default();
    let (services, providers) = futures::future::join(
        services.list(&params, QueryOptions::default()),
        providers.list(QueryOptions::default()),
    )
    .await;

    assert_eq!(services.unwrap().unwrap().items.len(), 1);
    assert!(providers.unwrap().unwrap().items[0].healthy);
    assert_eq!(h.portal.cache().len(), 2);
}

#[tokio::test]
async fn test_concurrent_lists_of_one_page_share_a_request() {
    let h = harness(Some("t")).await;

    Mock::given(method("GET"))
        .and(path("/domain-services"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(json!([service("ds-1")]), 1))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let hooks = h.portal.domain_services();
    let params = ListParams::default();
    let (first, second) = futures::future::join(
        hooks.list(&params, QueryOptions::default()),
        hooks.list(&params, QueryOptions::default()),
    )
    .await;

    assert_eq!(first.unwrap().unwrap().items[0].id, "ds-1");
    assert_eq!(second.unwrap().unwrap().items[0].id, "ds-1");
}

#[tokio::test]
async fn test_list_in_flight_during_update_is_refetched() {
    let h = harness(Some("t")).await;

    let named = |name: &str| {
        let mut body = service("ds-1");
        body["name"] = json!(name);
        body
    };
    Mock::given(method("GET"))
        .and(path("/domain-services"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(json!([named("OLD")]), 1))
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domain-services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([named("NEW")]), 1)))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/domain-services/ds-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(named("NEW")))
        .expect(1)
        .mount(&h.server)
        .await;

    let hooks = h.portal.domain_services();
    let params = ListParams::default();
    let update = UpdateDomainService {
        name: Some("NEW".into()),
        ..UpdateDomainService::default()
    };
    let (stale, updated) = futures::future::join(
        hooks.list(&params, QueryOptions::default()),
        async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            hooks.update("ds-1", &update).await
        },
    )
    .await;
    assert_eq!(stale.unwrap().unwrap().items[0].name.as_deref(), Some("OLD"));
    assert_eq!(updated.unwrap().name.as_deref(), Some("NEW"));

    let fresh = hooks.list(&params, QueryOptions::default()).await.unwrap().unwrap();
    assert_eq!(fresh.items[0].name.as_deref(), Some("NEW"));
}

#[tokio::test]
async fn test_pages_are_cached_independently() {
    let h = harness(Some("t")).await;

    for (n, id) in [(1, "ds-1"), (2, "ds-2")] {
        Mock::given(method("GET"))
            .and(path("/domain-services"))
            .and(query_param("page", n.to_string()))
            .and(query_param("size", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([service(id)]), n)))
            .expect(1)
            .mount(&h.server)
            .await;
    }

    let hooks = h.portal.domain_services();
    let first = ListParams::new(1, 25);
    let second = ListParams::new(2, 25);

    let p1 = hooks.list(&first, QueryOptions::default()).await.unwrap().unwrap();
    let p2 = hooks.list(&second, QueryOptions::default()).await.unwrap().unwrap();
    assert_eq!(p1.items[0].id, "ds-1");
    assert_eq!(p2.items[0].id, "ds-2");

    // Served from cache.
    let again = hooks.list(&first, QueryOptions::default()).await.unwrap().unwrap();
    assert!(Arc::ptr_eq(&p1, &again));
    hooks.list(&second, QueryOptions::default()).await.unwrap();
    assert_eq!(h.portal.cache().len(), 2);
}

#[tokio::test]
async fn test_zero_stale_time_refetches() {
    let h = harness(Some("t")).await;

    Mock::given(method("GET"))
        .and(path("/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "name": "keycloak", "enabled": true, "healty": true }]
        })))
        .expect(2)
        .mount(&h.server)
        .await;

    let opts = QueryOptions::default().with_stale_time(Duration::ZERO);
    let providers = h.portal.providers().list(opts).await.unwrap().unwrap();
    assert!(providers.items[0].healthy);
    h.portal.providers().list(opts).await.unwrap();
}

#[tokio::test]
async fn test_list_without_token_fails_before_request() {
    let h = harness(None).await;

    let err = h
        .portal
        .reindex_jobs()
        .list(&ListParams::default(), QueryOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_token_required());
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_disabled_queries_resolve_to_none() {
    let h = harness(None).await;

    let list = h
        .portal
        .events()
        .list(&ListParams::default(), QueryOptions::disabled())
        .await
        .unwrap();
    assert!(list.is_none());

    // Empty id disables the detail query, token or not.
    let detail = h
        .portal
        .domain_services()
        .detail("", QueryOptions::default())
        .await
        .unwrap();
    assert!(detail.is_none());
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_detail_not_found_is_server_error() {
    let h = harness(Some("t")).await;

    Mock::given(method("GET"))
        .and(path("/reindex-jobs/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Reindex job not found" })),
        )
        .mount(&h.server)
        .await;

    let err = h
        .portal
        .reindex_jobs()
        .detail("missing", QueryOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.message(), "Reindex job not found");
    // Failed fetches are not cached.
    assert!(h.portal.cache().is_empty());
}

// ── Mutations ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_handle_requires_token() {
    let mut h = harness(None).await;

    let err = h.portal.domain_services().create().err().unwrap();
    assert!(err.is_token_required());
    assert!(h.portal.reindex_jobs().create().is_err());

    assert!(h.notifications.try_recv().is_err());
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_created_service_shows_up_in_next_list() {
    let mut h = harness(Some("t")).await;

    Mock::given(method("GET"))
        .and(path("/domain-services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]), 1)))
        .up_to_n_times(1)
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/domain-services"))
        .and(body_json(json!({
            "name": "orders",
            "domains": ["a.com"],
            "base_url": "https://orders.internal",
            "indexes_path_prefix": "orders_",
            "excluded_entities": [],
            "enabled": true
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(service("ds-new")))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/domain-services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([service("ds-new")]), 1)))
        .expect(1)
        .mount(&h.server)
        .await;

    let hooks = h.portal.domain_services();
    let params = ListParams::default();
    let before = hooks.list(&params, QueryOptions::default()).await.unwrap().unwrap();
    assert!(before.is_empty());

    let mut events = h.portal.cache().subscribe();
    let created = hooks.create().unwrap().mutate(&create_payload()).await.unwrap();
    assert_eq!(created.id, "ds-new");

    // Create touches lists only.
    assert_eq!(drain_invalidations(&mut events), vec![DomainServices::keys().lists()]);

    let after = hooks.list(&params, QueryOptions::default()).await.unwrap().unwrap();
    assert!(after.items.iter().any(|s| s.id == created.id));

    let note = h.notifications.try_recv().unwrap();
    assert_eq!(note.level, NotificationLevel::Success);
    assert_eq!(note.title, "Domain service created successfully!");
    assert_eq!(note.duration, Some(Duration::from_secs(3)));
}

#[tokio::test]
async fn test_update_invalidates_lists_and_details_once() {
    let mut h = harness(Some("t")).await;

    Mock::given(method("PUT"))
        .and(path("/domain-services/ds-1"))
        .and(body_json(json!({ "enabled": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(service("ds-1")))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut events = h.portal.cache().subscribe();
    let update = UpdateDomainService {
        enabled: Some(false),
        ..UpdateDomainService::default()
    };
    h.portal.domain_services().update("ds-1", &update).await.unwrap();

    let keys = DomainServices::keys();
    assert_eq!(drain_invalidations(&mut events), vec![keys.lists(), keys.details()]);
    assert_eq!(
        h.notifications.try_recv().unwrap().title,
        "Domain service updated successfully!"
    );
}

#[tokio::test]
async fn test_update_without_token_notifies_failure() {
    let mut h = harness(None).await;

    let err = h
        .portal
        .domain_services()
        .update("ds-1", &UpdateDomainService::default())
        .await
        .unwrap_err();
    assert!(err.is_token_required());

    let note = h.notifications.try_recv().unwrap();
    assert_eq!(note.title, "Failed to update domain service");
    assert_eq!(note.description.as_deref(), Some("Token is required"));
    assert!(h.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_invalidates_lists_and_details_once() {
    let mut h = harness(Some("t")).await;

    Mock::given(method("DELETE"))
        .and(path("/domain-services/ds-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut events = h.portal.cache().subscribe();
    let deleted = h.portal.domain_services().delete("ds-1").await.unwrap();
    assert!(deleted.is_none());

    let keys = DomainServices::keys();
    assert_eq!(drain_invalidations(&mut events), vec![keys.lists(), keys.details()]);
    assert_eq!(
        h.notifications.try_recv().unwrap().title,
        "Domain service deleted successfully!"
    );
}

#[tokio::test]
async fn test_delete_failure_uses_server_message() {
    let mut h = harness(Some("t")).await;

    Mock::given(method("DELETE"))
        .and(path("/domain-services/ds-1"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "Service has running jobs" })),
        )
        .mount(&h.server)
        .await;

    let mut events = h.portal.cache().subscribe();
    let err = h.portal.domain_services().delete("ds-1").await.unwrap_err();
    assert_eq!(err.status(), Some(409));
    assert!(drain_invalidations(&mut events).is_empty());

    let note = h.notifications.try_recv().unwrap();
    assert!(note.is_error());
    assert_eq!(note.title, "Failed to delete domain service");
    assert_eq!(note.description.as_deref(), Some("Service has running jobs"));
}

#[tokio::test]
async fn test_failure_without_message_falls_back() {
    let mut h = harness(Some("t")).await;

    Mock::given(method("POST"))
        .and(path("/reindex-jobs/job-1/run"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "" })))
        .mount(&h.server)
        .await;

    h.portal.reindex_jobs().run("job-1").await.unwrap_err();
    let note = h.notifications.try_recv().unwrap();
    assert_eq!(note.title, "Failed to run reindex job.");
    assert_eq!(note.description.as_deref(), Some("Please try again."));
}

#[tokio::test]
async fn test_cancel_refetches_cached_detail() {
    let mut h = harness(Some("t")).await;

    Mock::given(method("GET"))
        .and(path("/reindex-jobs/job-1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "job-1", "status": "running" })),
        )
        .expect(2)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/reindex-jobs/job-1/cancel"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": "job-1", "status": "cancelled" })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let jobs = h.portal.reindex_jobs();
    jobs.detail("job-1", QueryOptions::default()).await.unwrap();
    let mut events = h.portal.cache().subscribe();
    let cancelled = jobs.cancel("job-1").await.unwrap();
    assert_eq!(cancelled.status, Some(indexa_core::JobStatus::Cancelled));

    let keys = ReindexJobs::keys();
    assert_eq!(drain_invalidations(&mut events), vec![keys.lists(), keys.details()]);

    // Detail was invalidated, so this goes to the backend again.
    jobs.detail("job-1", QueryOptions::default()).await.unwrap();
    assert_eq!(
        h.notifications.try_recv().unwrap().title,
        "Reindex job cancelled successfully!"
    );
}

#[tokio::test]
async fn test_run_invalidates_lists_and_details_once() {
    let mut h = harness(Some("t")).await;

    Mock::given(method("POST"))
        .and(path("/reindex-jobs/job-1/run"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "job-1", "status": "running" })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let mut events = h.portal.cache().subscribe();
    let running = h.portal.reindex_jobs().run("job-1").await.unwrap();
    assert_eq!(running.status, Some(indexa_core::JobStatus::Running));

    let keys = ReindexJobs::keys();
    assert_eq!(drain_invalidations(&mut events), vec![keys.lists(), keys.details()]);
    assert_eq!(
        h.notifications.try_recv().unwrap().title,
        "Job is running successfully!"
    );
}

#[tokio::test]
async fn test_reindex_job_create_invalidates_lists_only() {
    let mut h = harness(Some("t")).await;

    Mock::given(method("POST"))
        .and(path("/reindex-jobs"))
        .and(body_json(json!({
            "domains": ["a.com"],
            "entity_types": ["order"],
            "updated_after": "2024-01-01T00:00:00Z",
            "updated_before": "2024-02-01T00:00:00Z"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "id": "job-9", "status": "pending" })),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    let data = CreateReindexJob {
        domains: vec!["a.com".into()],
        entity_types: vec!["order".into()],
        updated_after: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_before: Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
    };
    let mut events = h.portal.cache().subscribe();
    let created = h.portal.reindex_jobs().create().unwrap().mutate(&data).await.unwrap();
    assert_eq!(created.id, "job-9");

    assert_eq!(drain_invalidations(&mut events), vec![ReindexJobs::keys().lists()]);
    assert_eq!(
        h.notifications.try_recv().unwrap().title,
        "Reindex job created successfully!"
    );
}

#[tokio::test]
async fn test_index_event_invalidates_event_lists() {
    let mut h = harness(Some("t")).await;

    Mock::given(method("POST"))
        .and(path("/events/ev-1/index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "queued" })))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut events = h.portal.cache().subscribe();
    let body = h.portal.events().index("ev-1").await.unwrap();
    assert_eq!(body, json!({ "status": "queued" }));
    assert_eq!(
        drain_invalidations(&mut events),
        vec![indexa_core::resources::Events::keys().lists()]
    );
    assert_eq!(
        h.notifications.try_recv().unwrap().title,
        "Event indexed successfully!"
    );
}
