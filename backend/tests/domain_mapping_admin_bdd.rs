//! Behavioural tests for the domain mapping admin API.
//!
//! Each step drives the real handlers over an in-memory store, so a mapping
//! created through the admin endpoints is visible to the resolution endpoint.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::test as actix_test;
use actix_web::{App, web};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};
use site_backend::domain::{BypassPolicy, DomainMappingAdminService, DomainResolutionService};
use site_backend::inbound::http::domain_mappings::{
    create_domain_mapping, delete_domain_mapping, list_domain_mappings, list_service_areas,
    update_domain_mapping,
};
use site_backend::inbound::http::domain_resolution::resolve_domain;
use site_backend::inbound::http::state::HttpState;
use site_backend::outbound::memory::InMemorySiteStore;

struct AdminWorld {
    system: actix_rt::SystemRunner,
    state: Option<web::Data<HttpState>>,
    last_status: Option<u16>,
    last_body: Value,
    created_id: Option<String>,
}

type SharedContext = Rc<RefCell<AdminWorld>>;

enum Call {
    Get(String),
    Post(String, Value),
    Delete(String),
}

impl AdminWorld {
    fn call(&mut self, call: Call) -> (u16, Value) {
        let state = self.state.clone().expect("admin API initialised");
        self.system.block_on(async move {
            let app = actix_test::init_service(
                App::new().app_data(state).service(
                    web::scope("/api/v1")
                        .service(list_domain_mappings)
                        .service(create_domain_mapping)
                        .service(update_domain_mapping)
                        .service(delete_domain_mapping)
                        .service(list_service_areas)
                        .service(resolve_domain),
                ),
            )
            .await;
            let request = match call {
                Call::Get(uri) => actix_test::TestRequest::get().uri(&uri),
                Call::Post(uri, body) => actix_test::TestRequest::post().uri(&uri).set_json(body),
                Call::Delete(uri) => actix_test::TestRequest::delete().uri(&uri),
            };
            let response = actix_test::call_service(&app, request.to_request()).await;
            let status = response.status().as_u16();
            let bytes = actix_test::read_body(response).await;
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("JSON body")
            };
            (status, body)
        })
    }

    fn record(&mut self, call: Call) {
        let (status, body) = self.call(call);
        self.last_status = Some(status);
        self.last_body = body;
    }

    fn listed_domains(&mut self) -> Vec<String> {
        let (status, body) = self.call(Call::Get("/api/v1/admin/domain-mappings".to_owned()));
        assert_eq!(status, 200, "listing failed: {body}");
        body.as_array()
            .expect("mapping array")
            .iter()
            .filter_map(|mapping| mapping.get("domain").and_then(Value::as_str))
            .map(str::to_owned)
            .collect()
    }
}

fn unquote(value: &str) -> &str {
    value.trim().trim_matches('"')
}

#[fixture]
fn world() -> SharedContext {
    Rc::new(RefCell::new(AdminWorld {
        system: actix_rt::System::new(),
        state: None,
        last_status: None,
        last_body: Value::Null,
        created_id: None,
    }))
}

#[given("an admin API over an empty store")]
fn an_admin_api_over_an_empty_store(world: &SharedContext) {
    let store = Arc::new(InMemorySiteStore::new());
    let admin = Arc::new(DomainMappingAdminService::new(store.clone(), store.clone()));
    let resolution = Arc::new(DomainResolutionService::new(
        store.clone(),
        store,
        BypassPolicy::default(),
    ));
    world.borrow_mut().state = Some(web::Data::new(HttpState::new(
        resolution,
        admin.clone(),
        admin,
    )));
}

#[when("the operator creates a mapping from {domain} to {path}")]
fn the_operator_creates_a_mapping(world: &SharedContext, domain: String, path: String) {
    let mut ctx = world.borrow_mut();
    let payload = json!({
        "domain": unquote(&domain),
        "redirectTo": unquote(&path),
    });
    ctx.record(Call::Post(
        "/api/v1/admin/domain-mappings".to_owned(),
        payload,
    ));
    if ctx.last_status == Some(201) {
        ctx.created_id = ctx
            .last_body
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_owned);
    }
}

#[when("the operator deletes the created mapping")]
fn the_operator_deletes_the_created_mapping(world: &SharedContext) {
    let mut ctx = world.borrow_mut();
    let id = ctx.created_id.clone().expect("a mapping was created");
    ctx.record(Call::Delete(format!("/api/v1/admin/domain-mappings/{id}")));
}

#[when("the site is resolved for {hostname}")]
fn the_site_is_resolved_for(world: &SharedContext, hostname: String) {
    let mut ctx = world.borrow_mut();
    ctx.record(Call::Get(format!(
        "/api/v1/domain-resolution?hostname={}",
        unquote(&hostname)
    )));
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &SharedContext, status: u16) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_status, Some(status), "body: {}", ctx.last_body);
}

#[then("the mapping list contains {domain}")]
fn the_mapping_list_contains(world: &SharedContext, domain: String) {
    let domains = world.borrow_mut().listed_domains();
    assert!(
        domains.iter().any(|listed| listed == unquote(&domain)),
        "{domains:?}"
    );
}

#[then("the mapping list is empty")]
fn the_mapping_list_is_empty(world: &SharedContext) {
    assert!(world.borrow_mut().listed_domains().is_empty());
}

#[then("the error reports {code} on {field}")]
fn the_error_reports_code_on_field(world: &SharedContext, code: String, field: String) {
    let ctx = world.borrow();
    let details = ctx.last_body.get("details").expect("error details");
    assert_eq!(details.get("code"), Some(&json!(unquote(&code))));
    assert_eq!(details.get("field"), Some(&json!(unquote(&field))));
}

#[then("the resolved path is {path}")]
fn the_resolved_path_is(world: &SharedContext, path: String) {
    let ctx = world.borrow();
    assert_eq!(ctx.last_body.get("path"), Some(&json!(unquote(&path))));
    assert_eq!(ctx.last_body.get("kind"), Some(&json!("explicit")));
}

#[scenario(
    path = "tests/features/domain_mapping_admin.feature",
    name = "A mapping can be created, listed and deleted"
)]
fn mapping_lifecycle(world: SharedContext) {
    drop(world);
}

#[scenario(
    path = "tests/features/domain_mapping_admin.feature",
    name = "A domain can only be mapped once"
)]
fn domain_mapped_once(world: SharedContext) {
    drop(world);
}

#[scenario(
    path = "tests/features/domain_mapping_admin.feature",
    name = "Redirect targets must be absolute paths"
)]
fn redirect_targets_are_absolute(world: SharedContext) {
    drop(world);
}

#[scenario(
    path = "tests/features/domain_mapping_admin.feature",
    name = "A new mapping takes effect on the next page load"
)]
fn new_mapping_takes_effect(world: SharedContext) {
    drop(world);
}
