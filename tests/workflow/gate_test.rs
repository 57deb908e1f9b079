//! Session and role gates.

use actix_web::cookie::Cookie;
use actix_web::test;
use crda_workflow::auth::SESSION_COOKIE;
use crda_workflow::models::Role;

use super::helpers::*;

#[actix_rt::test]
async fn test_no_cookie_redirects_without_touching_database() {
    let pool = pool_from(mock_db());
    let app = create_test_app(&pool).await;

    for uri in ["/getservices", "/getreports", "/results", "/admin/pending-accounts"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status().as_u16(), 302, "{}", uri);
        assert_eq!(location(&resp), "/login?error=not_logged_in", "{}", uri);
    }
    assert_eq!(statement_log(&pool), "[]");
}

#[actix_rt::test]
async fn test_tampered_cookie_is_not_logged_in() {
    let pool = pool_from(mock_db());
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get()
        .uri("/getreports")
        .cookie(Cookie::new(SESSION_COOKIE, "not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/login?error=not_logged_in");
    assert_eq!(statement_log(&pool), "[]");
}

#[actix_rt::test]
async fn test_revoked_session_is_not_logged_in() {
    let pool = pool_from(mock_db().append_query_results([Vec::<
        crda_workflow::entity::session::Model,
    >::new()]));
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get()
        .uri("/getreports")
        .cookie(session_cookie(Role::Gerant))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/login?error=not_logged_in");
}

#[actix_rt::test]
async fn test_wrong_role_is_unauthorized() {
    let pool = pool_from(logged_in_db());
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::delete()
        .uri("/api/reports/3")
        .cookie(session_cookie(Role::ChefDentreprise))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 302);
    assert_eq!(location(&resp), "/login?error=unauthorized");
    assert!(!statement_log(&pool).contains("rapport"));
}

#[actix_rt::test]
async fn test_only_directeur_reaches_pending_accounts() {
    for role in [Role::ChefDentreprise, Role::Gerant] {
        let pool = pool_from(logged_in_db());
        let app = create_test_app(&pool).await;

        let req = test::TestRequest::get()
            .uri("/admin/pending-accounts")
            .cookie(session_cookie(role))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(location(&resp), "/login?error=unauthorized", "{}", role);
    }
}

#[actix_rt::test]
async fn test_public_pages_need_no_session() {
    let pool = pool_from(mock_db());
    let app = create_test_app(&pool).await;

    for uri in ["/", "/about", "/login", "/register", "/check-status"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200, "{}", uri);
    }
    assert_eq!(statement_log(&pool), "[]");
}

#[actix_rt::test]
async fn test_unknown_path_renders_not_found() {
    let pool = pool_from(mock_db());
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
}
