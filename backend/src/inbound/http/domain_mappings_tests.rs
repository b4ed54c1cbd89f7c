//! Tests for the Admin Editor HTTP handlers.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::MockDomainMappingsQuery;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::test_utils::{area, memory_state};
use crate::outbound::memory::InMemorySiteStore;

#[fixture]
fn store() -> Arc<InMemorySiteStore> {
    Arc::new(InMemorySiteStore::with_service_areas([
        area("Owen Sound", false),
        area("Collingwood", false),
    ]))
}

async fn admin_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new().app_data(web::Data::new(state)).service(
            web::scope("/api/v1")
                .service(list_domain_mappings)
                .service(create_domain_mapping)
                .service(update_domain_mapping)
                .service(delete_domain_mapping)
                .service(list_service_areas),
        ),
    )
    .await
}

fn body(domain: &str, redirect_to: &str) -> Value {
    json!({ "domain": domain, "redirectTo": redirect_to })
}

#[rstest]
fn missing_domain_is_a_field_error() {
    let payload = DomainMappingRequest {
        redirect_to: Some("/x".to_owned()),
        ..DomainMappingRequest::default()
    };

    let err = dto::parse_mapping_request(payload).expect_err("missing domain");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details().map(|d| d["field"].clone()), Some(json!("domain")));
    assert_eq!(
        err.details().map(|d| d["code"].clone()),
        Some(json!("missing_field"))
    );
}

#[rstest]
fn blank_service_area_id_clears_the_link() {
    let payload = DomainMappingRequest {
        domain: Some("test.com".to_owned()),
        redirect_to: Some("/service-area/test".to_owned()),
        service_area_id: Some(String::new()),
    };

    let draft = dto::parse_mapping_request(payload).expect("valid draft");

    assert!(draft.service_area_id.is_none());
}

#[rstest]
#[actix_web::test]
async fn create_list_delete_round_trip(store: Arc<InMemorySiteStore>) {
    let app = admin_app(memory_state(store)).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/domain-mappings")
            .set_json(body("test.com", "/service-area/test"))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: DomainMappingResponse = actix_test::read_body_json(created).await;
    assert_eq!(created.domain, "test.com");
    assert_eq!(created.redirect_to, "/service-area/test");

    let listed: Vec<DomainMappingResponse> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/admin/domain-mappings")
            .to_request(),
    )
    .await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/domain-mappings/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let listed: Vec<DomainMappingResponse> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/admin/domain-mappings")
            .to_request(),
    )
    .await;
    assert!(listed.is_empty());

    let again = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/admin/domain-mappings/{}", created.id))
            .to_request(),
    )
    .await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn duplicate_domain_is_conflict(store: Arc<InMemorySiteStore>) {
    let app = admin_app(memory_state(store)).await;
    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/admin/domain-mappings")
                .set_json(body("test.com", "/a"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), expected);
        if expected == StatusCode::CONFLICT {
            let error: Value = actix_test::read_body_json(res).await;
            assert_eq!(error["code"], "conflict");
            assert_eq!(error["details"]["code"], "duplicate_domain");
        }
    }
}

#[rstest]
#[case(body("", "/a"), "domain", "missing_field")]
#[case(body("https://test.com", "/a"), "domain", "invalid_domain")]
#[case(body("test.com", "service-area/test"), "redirectTo", "relative_path")]
#[case(json!({"domain": "test.com"}), "redirectTo", "missing_field")]
#[case(
    json!({"domain": "test.com", "redirectTo": "/a", "serviceAreaId": "nope"}),
    "serviceAreaId",
    "invalid_uuid"
)]
#[actix_web::test]
async fn invalid_payloads_are_rejected(
    store: Arc<InMemorySiteStore>,
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = admin_app(memory_state(store)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/domain-mappings")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error: Value = actix_test::read_body_json(res).await;
    assert_eq!(error["details"]["field"], field);
    assert_eq!(error["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn update_replaces_fields(store: Arc<InMemorySiteStore>) {
    let app = admin_app(memory_state(store)).await;
    let created: DomainMappingResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/admin/domain-mappings")
            .set_json(body("test.com", "/a"))
            .to_request(),
    )
    .await;

    let updated: DomainMappingResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/admin/domain-mappings/{}", created.id))
            .set_json(body("test.ca", "/b"))
            .to_request(),
    )
    .await;

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.domain, "test.ca");
    assert_eq!(updated.redirect_to, "/b");
    assert_eq!(updated.created_at, created.created_at);
}

#[rstest]
#[case("3fa85f64-5717-4562-b3fc-2c963f66afa6", StatusCode::NOT_FOUND)]
#[case("not-a-uuid", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn update_reports_bad_ids(
    store: Arc<InMemorySiteStore>,
    #[case] id: &str,
    #[case] expected: StatusCode,
) {
    let app = admin_app(memory_state(store)).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/admin/domain-mappings/{id}"))
            .set_json(body("test.com", "/a"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), expected);
}

#[rstest]
#[actix_web::test]
async fn service_areas_carry_landing_paths(store: Arc<InMemorySiteStore>) {
    let app = admin_app(memory_state(store)).await;

    let areas: Vec<ServiceAreaResponse> = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/admin/service-areas")
            .to_request(),
    )
    .await;

    let paths: Vec<&str> = areas.iter().map(|a| a.landing_path.as_str()).collect();
    assert_eq!(
        paths,
        ["/service-area/collingwood", "/service-area/owen-sound"]
    );
}

#[rstest]
#[actix_web::test]
async fn unavailable_store_is_service_unavailable(store: Arc<InMemorySiteStore>) {
    let mut query = MockDomainMappingsQuery::new();
    query
        .expect_list_mappings()
        .times(1)
        .returning(|| Err(Error::service_unavailable("database unreachable")));
    let mut state = memory_state(store);
    state.mappings_query = Arc::new(query);
    let app = admin_app(state).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/admin/domain-mappings")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
