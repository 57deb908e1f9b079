//! Service requests (chef d'entreprise).

use std::collections::BTreeMap;

use actix_web::test;
use crda_workflow::models::Role;
use sea_orm::Value;
use serde_json::Value as Json;

use super::helpers::*;

fn service_row(id: i32, sujet: &str, status: &str) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("id", Value::from(id)),
        ("sujet", Value::from(sujet)),
        ("prenom", Value::from("Amina")),
        ("nom", Value::from("Ben Salah")),
        ("cin", Value::from("08123456")),
        ("numero_transaction", Value::from("T-42")),
        ("certificat_propriete_terre", Value::from(true)),
        ("copie_piece_identite_fermier", Value::from(false)),
        ("copie_piece_identite_nationale", Value::from(true)),
        ("demande_but", Value::from(false)),
        ("copie_contrat_location_terrain", Value::from(false)),
        ("autres_documents", Value::from(false)),
        ("status", Value::from(status)),
    ])
}

fn chef_get(uri: &str) -> actix_http::Request {
    test::TestRequest::get()
        .uri(uri)
        .cookie(session_cookie(Role::ChefDentreprise))
        .to_request()
}

fn service_form(uri: &str, extra: &[(&'static str, &'static str)]) -> actix_http::Request {
    let mut fields = vec![
        ("sujet", "Permis de construire"),
        ("prenom", "Amina"),
        ("nom", "Ben Salah"),
        ("cin", "08123456"),
        ("numero_transaction", "T-42"),
    ];
    fields.extend_from_slice(extra);

    test::TestRequest::post()
        .uri(uri)
        .cookie(session_cookie(Role::ChefDentreprise))
        .set_form(fields)
        .to_request()
}

#[actix_rt::test]
async fn test_list_shows_label_derived_from_report() {
    let pool = pool_from(logged_in_db().append_query_results([vec![
        service_row(2, "Forage", "قيد الانتظار"),
        service_row(1, "Permis de construire", "تم"),
    ]]));
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, chef_get("/getservices")).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("<td>Forage</td>"));
    assert!(body.contains("<td>قيد الانتظار</td>"));
    assert!(body.contains("<td>تم</td>"));
    assert!(statement_log(&pool).contains(
        "LEFT JOIN rapport r ON s.cin = r.cin AND s.sujet = r.sujet"
    ));
}

#[actix_rt::test]
async fn test_list_failure_renders_empty_page_with_error() {
    let pool = pool_from(logged_in_db());
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, chef_get("/getservices")).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("data-error=\"database_error\""));
}

#[actix_rt::test]
async fn test_add_service_starts_pending() {
    let pool = pool_from(logged_in_db().append_exec_results([exec_ok(1)]));
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, service_form("/addservice", &[("demande_but", "true")])).await;

    assert_eq!(location(&resp), "/getservices");
    let log = statement_log(&pool);
    assert!(log.contains("INSERT INTO `services_utilisateur`"));
    assert!(log.contains("قيد الانتظار"));
}

#[actix_rt::test]
async fn test_add_service_failure_returns_to_form() {
    let pool = pool_from(logged_in_db());
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, service_form("/addservice", &[])).await;

    assert_eq!(location(&resp), "/services?error=database_error");
}

#[actix_rt::test]
async fn test_update_unticks_missing_checkboxes() {
    let pool = pool_from(logged_in_db().append_exec_results([exec_ok(1)]));
    let app = create_test_app(&pool).await;

    let resp = test::call_service(
        &app,
        service_form("/updateservice/4", &[("demande_but", "on")]),
    )
    .await;

    assert_eq!(location(&resp), "/getservices");
    let log = statement_log(&pool);
    assert!(log.contains("UPDATE `services_utilisateur`"));
    // Only the flags are booleans: one ticked box, five unticked.
    assert_eq!(log.matches("true").count(), 1);
    assert_eq!(log.matches("false").count(), 5);
    assert!(!log.contains("`status`"));
}

#[actix_rt::test]
async fn test_update_failure_returns_to_edit_page() {
    let pool = pool_from(logged_in_db());
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, service_form("/updateservice/4", &[])).await;

    assert_eq!(location(&resp), "/editservice/4?error=update_failed");
}

fn delete_request() -> actix_http::Request {
    test::TestRequest::delete()
        .uri("/api/services/4")
        .cookie(session_cookie(Role::ChefDentreprise))
        .to_request()
}

#[actix_rt::test]
async fn test_delete_service_answers_success() {
    let pool = pool_from(logged_in_db().append_exec_results([exec_ok(1)]));
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, delete_request()).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Json = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(statement_log(&pool).contains("DELETE FROM `services_utilisateur`"));
}

#[actix_rt::test]
async fn test_delete_service_failure_is_json_500() {
    let pool = pool_from(logged_in_db());
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, delete_request()).await;

    assert_eq!(resp.status().as_u16(), 500);
    let body: Json = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DATABASE_ERROR");
}
