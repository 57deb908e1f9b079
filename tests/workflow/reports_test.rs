//! Report filing and cascading deletion.

use std::collections::BTreeMap;

use actix_web::test;
use crda_workflow::models::Role;
use sea_orm::Value;
use serde_json::Value as Json;

use super::helpers::*;

fn report_key_row() -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("cin", Value::from("08123456")),
        ("sujet", Value::from("Permis de construire")),
    ])
}

fn delete_request(id: i32) -> actix_http::Request {
    test::TestRequest::delete()
        .uri(&format!("/api/reports/{}", id))
        .cookie(session_cookie(Role::Gerant))
        .to_request()
}

#[actix_rt::test]
async fn test_delete_report_removes_decision_first() {
    let pool = pool_from(
        logged_in_db()
            .append_query_results([vec![report_key_row()]])
            .append_exec_results([exec_ok(1), exec_ok(1)]),
    );
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, delete_request(3)).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Json = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);

    assert_in_order(
        &statement_log(&pool),
        &[
            "BEGIN",
            "SELECT cin, sujet FROM rapport WHERE id = ?",
            "DELETE FROM results WHERE cin = ? AND sujet = ?",
            "DELETE FROM rapport WHERE id = ?",
            "COMMIT",
        ],
    );
}

#[actix_rt::test]
async fn test_delete_unknown_report_rolls_back() {
    let pool = pool_from(
        logged_in_db().append_query_results([Vec::<BTreeMap<&str, Value>>::new()]),
    );
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, delete_request(99)).await;

    assert_eq!(resp.status().as_u16(), 404);
    let body: Json = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NOT_FOUND");

    let log = statement_log(&pool);
    assert_in_order(&log, &["BEGIN", "SELECT cin, sujet FROM rapport", "ROLLBACK"]);
    assert!(!log.contains("DELETE FROM"));
    assert!(!log.contains("COMMIT"));
}

#[actix_rt::test]
async fn test_delete_failure_keeps_decision() {
    // The results delete succeeds, the report delete fails: nothing commits.
    let pool = pool_from(
        logged_in_db()
            .append_query_results([vec![report_key_row()]])
            .append_exec_results([exec_ok(1)]),
    );
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, delete_request(3)).await;

    assert_eq!(resp.status().as_u16(), 500);
    let log = statement_log(&pool);
    assert_in_order(&log, &["DELETE FROM results", "ROLLBACK"]);
    assert!(!log.contains("COMMIT"));
}

fn add_report_request() -> actix_http::Request {
    test::TestRequest::post()
        .uri("/addreport")
        .cookie(session_cookie(Role::Gerant))
        .set_form([
            ("cin", "08123456"),
            ("sujet", "Permis de construire"),
            ("nom", "Ben Salah"),
            ("prenom", "Amina"),
            ("surface", "120"),
            ("observations", ""),
        ])
        .to_request()
}

#[actix_rt::test]
async fn test_add_report_marks_service_reported() {
    let pool = pool_from(logged_in_db().append_exec_results([exec_ok(1), exec_ok(1)]));
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, add_report_request()).await;

    assert_eq!(location(&resp), "/getreports");
    assert_in_order(
        &statement_log(&pool),
        &[
            "BEGIN",
            "INSERT INTO rapport",
            "UPDATE services_utilisateur SET status",
            "COMMIT",
        ],
    );
}

#[actix_rt::test]
async fn test_add_report_rolls_back_when_status_update_fails() {
    let pool = pool_from(logged_in_db().append_exec_results([exec_ok(1)]));
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, add_report_request()).await;

    assert_eq!(
        location(&resp),
        "/report?cin=08123456&sujet=Permis%20de%20construire&error=database_error"
    );
    let log = statement_log(&pool);
    assert_in_order(&log, &["INSERT INTO rapport", "UPDATE services_utilisateur", "ROLLBACK"]);
    assert!(!log.contains("COMMIT"));
}

#[actix_rt::test]
async fn test_add_report_without_subject_writes_nothing() {
    let pool = pool_from(logged_in_db());
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/addreport")
        .cookie(session_cookie(Role::Gerant))
        .set_form([("cin", "08123456"), ("sujet", " ")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/getreports?error=missing_required_fields");
    assert!(!statement_log(&pool).contains("rapport"));
}
