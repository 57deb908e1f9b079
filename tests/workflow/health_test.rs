//! Health probe and public status lookup.

use std::collections::BTreeMap;

use actix_web::test;
use sea_orm::{ConnAcquireErr, DbErr, Value};

use super::helpers::*;

#[actix_rt::test]
async fn test_health_ok_when_query_succeeds() {
    let pool = pool_from(
        mock_db().append_query_results([vec![BTreeMap::from([("1", Value::from(1i32))])]]),
    );
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"OK");
    assert!(statement_log(&pool).contains("SELECT 1"));
}

#[actix_rt::test]
async fn test_health_reports_failed_query() {
    let pool = pool_from(mock_db());
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 500);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"DB query failed");
}

#[actix_rt::test]
async fn test_health_unavailable_without_connection() {
    let pool = pool_from(
        mock_db().append_query_errors([DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)]),
    );
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 503);
    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"DB not connected yet");
}

fn status_row(report_id: Option<i32>, statut: Option<&str>) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([
        ("id", Value::from(12i32)),
        ("sujet", Value::from("Permis de construire")),
        ("prenom", Value::from("Amina")),
        ("nom", Value::from("Ben Salah")),
        ("cin", Value::from("08123456")),
        ("numero_transaction", Value::from("T-42")),
        ("statut", statut.map(Value::from).unwrap_or(Value::String(None))),
        ("report_id", Value::Int(report_id)),
    ])
}

#[actix_rt::test]
async fn test_status_lookup_shows_matching_request() {
    let pool = pool_from(
        mock_db().append_query_results([vec![status_row(Some(3), Some("مقبول"))]]),
    );
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/check-status")
        .set_form([("cin", "08123456"), ("transaction_number", "T-42")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("Permis de construire"));
    assert!(body.contains("T-42"));
    assert!(statement_log(&pool).contains("numero_transaction = ?"));
}

#[actix_rt::test]
async fn test_status_lookup_with_blank_field_skips_database() {
    let pool = pool_from(mock_db());
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/check-status")
        .set_form([("cin", "08123456"), ("transaction_number", "  ")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("الرجاء إدخال جميع الحقول المطلوبة"));
    assert_eq!(statement_log(&pool), "[]");
}
