//! Final decisions.

use std::collections::BTreeMap;

use actix_web::test;
use crda_workflow::models::Role;
use sea_orm::Value;
use serde_json::Value as Json;

use super::helpers::*;

fn update_request(statut: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/updateresult")
        .cookie(session_cookie(Role::Directeur))
        .set_form([
            ("id", "12"),
            ("sujet", "Permis de construire"),
            ("nom", "Ben Salah"),
            ("prenom", "Amina"),
            ("cin", "08123456"),
            ("numero_transaction", "T-42"),
            ("statut", statut),
        ])
        .to_request()
}

#[actix_rt::test]
async fn test_unknown_status_is_rejected_before_writing() {
    let pool = pool_from(logged_in_db());
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, update_request("pending")).await;

    assert_eq!(resp.status().as_u16(), 400);
    let body: Json = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_STATUS");
    assert!(!statement_log(&pool).contains("INSERT INTO results"));
}

#[actix_rt::test]
async fn test_decision_is_upserted() {
    let pool = pool_from(logged_in_db().append_exec_results([exec_ok(1)]));
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, update_request("مقبول")).await;

    assert_eq!(location(&resp), "/results");
    assert!(statement_log(&pool).contains("ON DUPLICATE KEY UPDATE statut = ?"));
}

#[actix_rt::test]
async fn test_failed_upsert_returns_to_edit_page() {
    let pool = pool_from(logged_in_db());
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, update_request("مرفوض")).await;

    assert_eq!(location(&resp), "/editresult/12?error=update_failed");
}

#[actix_rt::test]
async fn test_delete_decision_accepts_json_body() {
    let pool = pool_from(logged_in_db().append_exec_results([exec_ok(1)]));
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::delete()
        .uri("/api/results")
        .cookie(session_cookie(Role::Directeur))
        .set_json(serde_json::json!({ "cin": "08123456", "sujet": "Permis de construire" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Json = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(statement_log(&pool).contains("DELETE FROM `results`"));
}

#[actix_rt::test]
async fn test_gerant_cannot_decide() {
    let pool = pool_from(logged_in_db());
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/updateresult")
        .cookie(session_cookie(Role::Gerant))
        .set_form([("cin", "08123456"), ("sujet", "x"), ("statut", "مقبول")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/login?error=unauthorized");
}

fn result_row(id: i32, sujet: &str, statut: Option<&str>) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("id", Value::from(id)),
        ("sujet", Value::from(sujet)),
        ("prenom", Value::from("Amina")),
        ("nom", Value::from("Ben Salah")),
        ("cin", Value::from("08123456")),
        ("numero_transaction", Value::from("T-42")),
        ("statut", statut.map(Value::from).unwrap_or(Value::String(None))),
        ("report_id", Value::from(id + 100)),
    ])
}

#[actix_rt::test]
async fn test_results_list_only_reported_services() {
    let pool = pool_from(logged_in_db().append_query_results([vec![
        result_row(5, "Forage", None),
        result_row(3, "Permis de construire", Some("مرفوض")),
    ]]));
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get()
        .uri("/results")
        .cookie(session_cookie(Role::Directeur))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("<td>Forage</td>"));
    assert!(body.contains(">مرفوض</span>"));
    assert!(body.contains(">قيد الدراسة</span>"));
    assert_in_order(
        &statement_log(&pool),
        &[
            "INNER JOIN rapport rap ON s.cin = rap.cin AND s.sujet = rap.sujet",
            "LEFT JOIN results res ON s.cin = res.cin AND s.sujet = res.sujet",
            "ORDER BY s.id DESC",
        ],
    );
}
