//! Tests for the store-backed resolution service.

use std::sync::Arc;

use chrono::Utc;
use rstest::rstest;

use super::*;
use crate::domain::ports::{
    DomainMappingRepositoryError, FixtureDomainMappingRepository, FixtureServiceAreaRepository,
    MockDomainMappingRepository, MockServiceAreaRepository, ServiceAreaRepositoryError,
};
use crate::domain::{
    DomainMapping, DomainMappingId, DomainName, RedirectPath, ServiceArea, ServiceAreaId,
    TargetKind,
};

fn mapping(domain: &str, redirect_to: &str) -> DomainMapping {
    let now = Utc::now();
    DomainMapping {
        id: DomainMappingId::random(),
        domain: DomainName::new(domain).expect("valid domain"),
        redirect_to: RedirectPath::new(redirect_to).expect("valid path"),
        service_area_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn area(name: &str) -> ServiceArea {
    ServiceArea {
        id: ServiceAreaId::random(),
        name: name.to_owned(),
        is_main_address: false,
        address: None,
    }
}

fn make_service(
    mappings: MockDomainMappingRepository,
    areas: MockServiceAreaRepository,
) -> DomainResolutionService<MockDomainMappingRepository, MockServiceAreaRepository> {
    DomainResolutionService::new(Arc::new(mappings), Arc::new(areas), BypassPolicy::default())
}

#[rstest]
#[case("localhost")]
#[case("feature-branch.lovable.app")]
#[tokio::test]
async fn bypassed_hosts_issue_no_queries(#[case] hostname: &str) {
    let mut mappings = MockDomainMappingRepository::new();
    mappings.expect_find_by_domain().times(0);
    let mut areas = MockServiceAreaRepository::new();
    areas.expect_search_by_name_substring().times(0);
    let service = make_service(mappings, areas);

    let target = service.resolve(hostname, &ResolutionGuard::new()).await;

    assert!(target.is_none());
}

#[rstest]
#[tokio::test]
async fn explicit_hit_skips_area_search() {
    let mut mappings = MockDomainMappingRepository::new();
    mappings
        .expect_find_by_domain()
        .withf(|domain| domain == "collingwoodplumbing.com")
        .times(1)
        .return_once(|domain| Ok(Some(mapping(domain, "/promo/spring"))));
    let mut areas = MockServiceAreaRepository::new();
    areas.expect_search_by_name_substring().times(0);
    let service = make_service(mappings, areas);

    let target = service
        .resolve("collingwoodplumbing.com", &ResolutionGuard::new())
        .await
        .expect("explicit target");

    assert_eq!(target.kind, TargetKind::Explicit);
    assert_eq!(target.path, "/promo/spring");
}

#[rstest]
#[tokio::test]
async fn miss_falls_back_to_area_search_excluding_main_address() {
    let mut mappings = MockDomainMappingRepository::new();
    mappings
        .expect_find_by_domain()
        .times(1)
        .return_once(|_| Ok(None));
    let mut areas = MockServiceAreaRepository::new();
    areas
        .expect_search_by_name_substring()
        .withf(|candidate, exclude_main_address| candidate == "collingwood" && *exclude_main_address)
        .times(1)
        .return_once(|_, _| Ok(Some(area("Collingwood"))));
    let service = make_service(mappings, areas);

    let target = service
        .resolve("collingwoodplumbing.com", &ResolutionGuard::new())
        .await
        .expect("heuristic target");

    assert_eq!(target.kind, TargetKind::Heuristic);
    assert_eq!(target.path, "/service-area/collingwood");
}

#[rstest]
#[tokio::test]
async fn empty_candidate_skips_area_search() {
    let mut mappings = MockDomainMappingRepository::new();
    mappings
        .expect_find_by_domain()
        .times(1)
        .return_once(|_| Ok(None));
    let mut areas = MockServiceAreaRepository::new();
    areas.expect_search_by_name_substring().times(0);
    let service = make_service(mappings, areas);

    let target = service
        .resolve("www.plumbing.com", &ResolutionGuard::new())
        .await;

    assert!(target.is_none());
}

#[rstest]
#[tokio::test]
async fn no_match_leaves_guard_unspent() {
    let service = DomainResolutionService::new(
        Arc::new(FixtureDomainMappingRepository),
        Arc::new(FixtureServiceAreaRepository),
        BypassPolicy::default(),
    );
    let guard = ResolutionGuard::new();

    let target = service.resolve("www.owensoundplumber.ca", &guard).await;

    assert!(target.is_none());
    assert!(!guard.is_spent());
}

#[rstest]
#[tokio::test]
async fn mapping_store_failure_still_tries_areas() {
    let mut mappings = MockDomainMappingRepository::new();
    mappings
        .expect_find_by_domain()
        .times(1)
        .return_once(|_| Err(DomainMappingRepositoryError::connection("database offline")));
    let mut areas = MockServiceAreaRepository::new();
    areas
        .expect_search_by_name_substring()
        .times(1)
        .return_once(|_, _| Ok(Some(area("Collingwood"))));
    let service = make_service(mappings, areas);

    let target = service
        .resolve("collingwoodplumbing.com", &ResolutionGuard::new())
        .await;

    assert_eq!(target.map(|t| t.kind), Some(TargetKind::Heuristic));
}

#[rstest]
#[tokio::test]
async fn failures_in_both_phases_fail_open() {
    let mut mappings = MockDomainMappingRepository::new();
    mappings
        .expect_find_by_domain()
        .times(1)
        .return_once(|_| Err(DomainMappingRepositoryError::query("relation missing")));
    let mut areas = MockServiceAreaRepository::new();
    areas
        .expect_search_by_name_substring()
        .times(1)
        .return_once(|_, _| Err(ServiceAreaRepositoryError::connection("pool exhausted")));
    let service = make_service(mappings, areas);
    let guard = ResolutionGuard::new();

    let target = service.resolve("collingwoodplumbing.com", &guard).await;

    assert!(target.is_none());
    assert!(!guard.is_spent());
}

#[rstest]
#[tokio::test]
async fn spent_guard_short_circuits_before_queries() {
    let mut mappings = MockDomainMappingRepository::new();
    mappings.expect_find_by_domain().times(0);
    let mut areas = MockServiceAreaRepository::new();
    areas.expect_search_by_name_substring().times(0);
    let service = make_service(mappings, areas);
    let guard = ResolutionGuard::new();
    assert!(guard.claim());

    let target = service.resolve("collingwoodplumbing.com", &guard).await;

    assert!(target.is_none());
}

#[rstest]
#[tokio::test]
async fn second_resolution_for_same_load_returns_none() {
    let mut mappings = MockDomainMappingRepository::new();
    mappings
        .expect_find_by_domain()
        .times(1)
        .return_once(|domain| Ok(Some(mapping(domain, "/service-area/test"))));
    let service = make_service(mappings, MockServiceAreaRepository::new());
    let guard = ResolutionGuard::new();

    let first = service.resolve("test.com", &guard).await;
    let second = service.resolve("test.com", &guard).await;

    assert!(first.is_some());
    assert!(second.is_none());
}
