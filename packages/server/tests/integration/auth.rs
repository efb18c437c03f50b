use serde_json::json;

use crate::common::{ADMIN_EMAIL, PASSWORD, TestApp, routes};

fn sign_up_body(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "full_name": "Ana Torres",
        "phone": "555-0101",
        "password": PASSWORD,
        "password_confirmation": PASSWORD,
    })
}

mod sign_up {
    use super::*;

    #[tokio::test]
    async fn new_account_is_staff_and_hides_the_hash() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGN_UP, &sign_up_body("Ana@Example.com"))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["email"], "ana@example.com");
        assert_eq!(res.body["role"], "staff");
        assert!(res.body.get("password_hash").is_none());
        assert!(!res.text.contains("argon2"));
    }

    #[tokio::test]
    async fn listed_admin_email_gets_the_admin_role() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::SIGN_UP, &sign_up_body(ADMIN_EMAIL))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["role"], "admin");
    }

    #[tokio::test]
    async fn email_is_unique_regardless_of_case() {
        let app = TestApp::spawn().await;

        let first = app
            .post_without_token(routes::SIGN_UP, &sign_up_body("ana@example.com"))
            .await;
        assert_eq!(first.status, 201);

        let res = app
            .post_without_token(routes::SIGN_UP, &sign_up_body("ANA@example.com"))
            .await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn mismatched_confirmation_is_reported_on_its_field() {
        let app = TestApp::spawn().await;
        let mut body = sign_up_body("ana@example.com");
        body["password_confirmation"] = json!("something else");

        let res = app.post_without_token(routes::SIGN_UP, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["errors"][0]["field"], "password_confirmation");
        assert_eq!(app.db.writes(), 0);
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;
        let mut body = sign_up_body("ana@example.com");
        body["password"] = json!("short");
        body["password_confirmation"] = json!("short");

        let res = app.post_without_token(routes::SIGN_UP, &body).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["errors"][0]["field"], "password");
    }

    #[tokio::test]
    async fn malformed_json_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::SIGN_UP))
            .header("Content-Type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

mod sign_in {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_sign_in_then_me() {
        let app = TestApp::spawn().await;
        app.post_without_token(routes::SIGN_UP, &sign_up_body("ana@example.com"))
            .await;

        let session = app
            .post_without_token(
                routes::SIGN_IN,
                &json!({"email": " ANA@example.com ", "password": PASSWORD}),
            )
            .await;
        assert_eq!(session.status, 200, "{}", session.text);
        assert_eq!(session.body["user"]["email"], "ana@example.com");
        let token = session.body["token"].as_str().unwrap();

        let me = app.get_with_token(routes::ME, token).await;
        assert_eq!(me.status, 200);
        assert_eq!(me.body["full_name"], "Ana Torres");
        assert_eq!(me.body["id"], session.body["user"]["id"]);
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_look_the_same() {
        let app = TestApp::spawn().await;
        app.post_without_token(routes::SIGN_UP, &sign_up_body("ana@example.com"))
            .await;

        let wrong = app
            .post_without_token(
                routes::SIGN_IN,
                &json!({"email": "ana@example.com", "password": "wrong password"}),
            )
            .await;
        let unknown = app
            .post_without_token(
                routes::SIGN_IN,
                &json!({"email": "nobody@example.com", "password": PASSWORD}),
            )
            .await;

        assert_eq!(wrong.status, 401);
        assert_eq!(wrong.body["code"], "INVALID_CREDENTIALS");
        assert_eq!(unknown.status, 401);
        assert_eq!(unknown.body, wrong.body);
    }

    #[tokio::test]
    async fn me_rejects_missing_and_forged_tokens() {
        let app = TestApp::spawn().await;

        let missing = app.get_without_token(routes::ME).await;
        assert_eq!(missing.status, 401);
        assert_eq!(missing.body["code"], "TOKEN_MISSING");

        let forged = app.get_with_token(routes::ME, "not.a.jwt").await;
        assert_eq!(forged.status, 401);
        assert_eq!(forged.body["code"], "TOKEN_INVALID");
    }
}
