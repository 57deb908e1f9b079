//! Login and logout flows.

use actix_web::test;
use crda_workflow::auth::SESSION_COOKIE;
use crda_workflow::entity::account;
use crda_workflow::models::Role;

use super::helpers::*;

fn login_request(email: &str, password: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/login")
        .set_form([("email_user", email), ("password_user", password)])
        .to_request()
}

#[actix_rt::test]
async fn test_missing_password_never_queries() {
    let pool = pool_from(mock_db());
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, login_request("staff@crda.com", "")).await;

    assert_eq!(resp.status().as_u16(), 302);
    assert_eq!(location(&resp), "/login?error=invalid_credentials");
    assert_eq!(statement_log(&pool), "[]");
}

#[actix_rt::test]
async fn test_unknown_email_is_invalid_credentials() {
    let pool = pool_from(mock_db().append_query_results([Vec::<account::Model>::new()]));
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, login_request("ghost@crda.com", TEST_PASSWORD)).await;

    assert_eq!(location(&resp), "/login?error=invalid_credentials");
}

#[actix_rt::test]
async fn test_wrong_password_is_invalid_credentials() {
    let pool = pool_from(
        mock_db().append_query_results([vec![account_row("gerant", "approved")]]),
    );
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, login_request("staff@crda.com", "nope")).await;

    assert_eq!(location(&resp), "/login?error=invalid_credentials");
    assert!(resp.headers().get("set-cookie").is_none());
}

#[actix_rt::test]
async fn test_pending_account_goes_to_unapproved_page() {
    let pool = pool_from(
        mock_db().append_query_results([vec![account_row("gerant", "pending")]]),
    );
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, login_request("staff@crda.com", TEST_PASSWORD)).await;

    assert_eq!(location(&resp), "/unapproved_login");
    assert!(!statement_log(&pool).contains("INSERT INTO `sessions`"));
}

#[actix_rt::test]
async fn test_unknown_role_is_rejected() {
    let pool = pool_from(
        mock_db().append_query_results([vec![account_row("admin", "approved")]]),
    );
    let app = create_test_app(&pool).await;

    let resp = test::call_service(&app, login_request("staff@crda.com", TEST_PASSWORD)).await;

    assert_eq!(location(&resp), "/login?error=invalid_role");
}

#[actix_rt::test]
async fn test_each_role_lands_on_its_own_page() {
    for role in Role::ALL {
        let pool = pool_from(
            mock_db()
                .append_query_results([vec![account_row(role.as_str(), "approved")]])
                .append_exec_results([exec_ok(1)]),
        );
        let app = create_test_app(&pool).await;

        let resp =
            test::call_service(&app, login_request("staff@crda.com", TEST_PASSWORD)).await;

        assert_eq!(resp.status().as_u16(), 302);
        assert_eq!(location(&resp), role.landing_path());
        let cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == SESSION_COOKIE)
            .expect("login should set the session cookie");
        assert!(cookie.http_only().unwrap_or(false));
        assert!(test_keys().verify(cookie.value()).is_ok());
        assert!(statement_log(&pool).contains("INSERT INTO `sessions`"));
    }
}

#[actix_rt::test]
async fn test_logout_deletes_session_and_clears_cookie() {
    let pool = pool_from(logged_in_db().append_exec_results([exec_ok(1)]));
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get()
        .uri("/logout")
        .cookie(session_cookie(Role::Gerant))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/login");
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("logout should reset the session cookie");
    assert_eq!(cookie.value(), "");
    assert_in_order(
        &statement_log(&pool),
        &["FROM `sessions`", "DELETE FROM `sessions`"],
    );
}

#[actix_rt::test]
async fn test_logout_without_session_still_redirects() {
    let pool = pool_from(mock_db());
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::get().uri("/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/login");
    assert_eq!(statement_log(&pool), "[]");
}

#[actix_rt::test]
async fn test_register_outside_domain_is_rejected() {
    let pool = pool_from(mock_db());
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("email_user", "amina@gmail.com"),
            ("password_user", "x"),
            ("role_user", "gerant"),
            ("nom_user", "Ben Salah"),
            ("prenom_user", "Amina"),
            ("sex_user", "F"),
            ("cin_user", "08123456"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/register?error=invalid_domain");
    assert_eq!(statement_log(&pool), "[]");
}

#[actix_rt::test]
async fn test_register_creates_pending_account() {
    let pool = pool_from(
        mock_db()
            .append_query_results([Vec::<account::Model>::new()])
            .append_exec_results([exec_ok(1)]),
    );
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("email_user", "amina@crda.com"),
            ("password_user", "x"),
            ("role_user", "gerant"),
            ("nom_user", "Ben Salah"),
            ("prenom_user", "Amina"),
            ("sex_user", "F"),
            ("cin_user", "08123456"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/pending_approval");
    let log = statement_log(&pool);
    assert!(log.contains("INSERT INTO `utilisateur`"));
    assert!(log.contains("plain:x"));
}

#[actix_rt::test]
async fn test_register_duplicate_account_is_rejected() {
    let pool = pool_from(
        mock_db().append_query_results([vec![account_row("gerant", "approved")]]),
    );
    let app = create_test_app(&pool).await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_form([
            ("email_user", "staff@crda.com"),
            ("password_user", "x"),
            ("role_user", "gerant"),
            ("nom_user", "Trabelsi"),
            ("prenom_user", "Sami"),
            ("sex_user", "M"),
            ("cin_user", "08123456"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/register?error=exists");
    assert!(!statement_log(&pool).contains("INSERT INTO `utilisateur`"));
}
