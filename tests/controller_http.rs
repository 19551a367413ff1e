//! End-to-end controller tests against the in-process mock backend.

mod support;

use std::sync::Arc;
use std::time::Duration;

use support::server::MockBackend;

use teller::resources::{Investors, Referrals, Resource, Transactions};
use teller::{FilterPatch, Filters, HttpSource, ListController, ListState, Phase};

async fn settled<R: Resource>(controller: &ListController<R>) -> ListState<R::Item> {
    let mut states = controller.watch_state();
    loop {
        let snapshot = states.borrow().clone();
        if !snapshot.loading && snapshot.phase != Phase::Idle {
            return snapshot;
        }
        states.changed().await.unwrap();
    }
}

fn source_for(backend: &MockBackend) -> Arc<HttpSource> {
    Arc::new(HttpSource::new(&backend.url(), Duration::from_secs(2)).unwrap())
}

#[tokio::test]
async fn lists_investors_over_http() {
    let backend = MockBackend::start().await;
    let controller: ListController<Investors> = ListController::with_filters(
        source_for(&backend),
        Filters::new(5),
        Duration::from_millis(20),
    );

    let state = settled(&controller).await;

    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.error, None);
    assert_eq!(state.items.len(), 5);
    assert_eq!(state.pagination.total_results, 12);
    assert_eq!(state.pagination.total_pages, 3);
    assert!(state.pagination.has_next);
    assert!(!state.pagination.has_prev);
    assert!(state.items.iter().all(|i| i.id.starts_with("srv-")));
}

#[tokio::test]
async fn debounced_search_is_applied_server_side() {
    let backend = MockBackend::start().await;
    let controller: ListController<Investors> = ListController::with_filters(
        source_for(&backend),
        Filters::new(10),
        Duration::from_millis(20),
    );
    settled(&controller).await;

    controller.set_search("patel");
    tokio::time::sleep(Duration::from_millis(150)).await;
    let state = settled(&controller).await;

    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.items.len(), 3);
    assert!(state
        .items
        .iter()
        .all(|i| i.name.to_lowercase().contains("patel")));
    // Search reset the cursor to page 1 of the narrowed set.
    assert_eq!(state.pagination.current_page, 1);
    assert_eq!(state.pagination.total_results, 3);
}

#[tokio::test]
async fn pagination_walks_the_server_dataset() {
    let backend = MockBackend::start().await;
    let controller: ListController<Investors> = ListController::with_filters(
        source_for(&backend),
        Filters::new(5),
        Duration::from_millis(20),
    );
    settled(&controller).await;

    controller.set_filters(FilterPatch::page(3));
    tokio::time::sleep(Duration::from_millis(150)).await;
    let state = settled(&controller).await;

    assert_eq!(state.pagination.current_page, 3);
    assert_eq!(state.items.len(), 2); // 12 rows, 5 per page
    assert!(!state.pagination.has_next);
    assert!(state.pagination.has_prev);
}

#[tokio::test]
async fn data_wrapped_envelope_normalizes() {
    let backend = MockBackend::start().await;
    let controller: ListController<Transactions> = ListController::with_filters(
        source_for(&backend),
        Filters::new(10),
        Duration::from_millis(20),
    );

    let state = settled(&controller).await;

    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.items.len(), 8);
    assert_eq!(state.pagination.total_results, 8);
    assert!(state.items.iter().all(|t| t.id.starts_with("srv-txn-")));
}

#[tokio::test]
async fn data_array_envelope_normalizes() {
    let backend = MockBackend::start().await;
    let controller: ListController<Referrals> = ListController::with_filters(
        source_for(&backend),
        Filters::new(10),
        Duration::from_millis(20),
    );

    let state = settled(&controller).await;

    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.items.len(), 4);
    assert!(state.items.iter().all(|r| r.id.starts_with("srv-ref-")));
}

#[tokio::test]
async fn server_error_degrades_to_seed_rows() {
    let backend = MockBackend::start().await;
    backend.behavior.fail_with(500);

    let controller: ListController<Investors> = ListController::with_filters(
        source_for(&backend),
        Filters::new(10),
        Duration::from_millis(20),
    );
    let state = settled(&controller).await;

    assert_eq!(state.phase, Phase::Degraded);
    assert!(state.error.as_deref().unwrap().contains("500"));
    assert!(!state.items.is_empty());
    // Fallback rows, not server rows.
    assert!(state.items.iter().all(|i| i.id.starts_with("inv-")));
    assert_eq!(state.pagination.total_results, state.items.len() as u64);
}

#[tokio::test]
async fn refetch_recovers_after_outage() {
    let backend = MockBackend::start().await;
    backend.behavior.fail_with(503);

    let controller: ListController<Investors> = ListController::with_filters(
        source_for(&backend),
        Filters::new(5),
        Duration::from_millis(20),
    );
    let degraded = settled(&controller).await;
    assert_eq!(degraded.phase, Phase::Degraded);

    backend.behavior.recover();
    controller.refetch().await;
    let state = controller.state();

    assert_eq!(state.phase, Phase::Success);
    assert_eq!(state.error, None);
    assert!(state.items.iter().all(|i| i.id.starts_with("srv-")));
}

#[tokio::test]
async fn slow_backend_times_out_and_degrades() {
    let backend = MockBackend::start().await;
    backend.behavior.delay(Duration::from_millis(600));

    let source = Arc::new(
        HttpSource::new(&backend.url(), Duration::from_millis(150)).unwrap(),
    );
    let controller: ListController<Investors> =
        ListController::with_filters(source, Filters::new(10), Duration::from_millis(20));

    let state = settled(&controller).await;

    assert_eq!(state.phase, Phase::Degraded);
    assert!(state.error.as_deref().unwrap().contains("timed out"));
    assert!(!state.items.is_empty());
}

#[tokio::test]
async fn ping_reports_backend_health() {
    use teller::Source;

    let backend = MockBackend::start().await;
    let source = source_for(&backend);
    assert!(source.ping().await.is_ok());

    backend.behavior.fail_with(500);
    assert!(source.ping().await.is_err());
}
