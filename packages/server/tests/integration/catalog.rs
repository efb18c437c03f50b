use serde_json::json;

use crate::common::{TestApp, multipart, routes};

mod categories {
    use super::*;

    #[tokio::test]
    async fn category_can_be_created_renamed_and_listed() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;

        let created = app
            .post_with_token(routes::CATEGORIES, &json!({"name": "  Plumbing "}), &token)
            .await;
        assert_eq!(created.status, 201, "{}", created.text);
        assert_eq!(created.body["name"], "Plumbing");
        let id = created.body["id"].as_i64().unwrap();

        let renamed = app
            .put_with_token(&routes::category(id), &json!({"name": "Pipes"}), &token)
            .await;
        assert_eq!(renamed.status, 200, "{}", renamed.text);
        assert_eq!(renamed.body["name"], "Pipes");

        let list = app.get_with_token(routes::CATEGORIES, &token).await;
        assert_eq!(list.body["pagination"]["total"], 1);
        assert_eq!(list.body["data"][0]["name"], "Pipes");
    }

    #[tokio::test]
    async fn duplicate_category_name_is_a_conflict() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;
        let body = json!({"name": "Plumbing"});

        let first = app.post_with_token(routes::CATEGORIES, &body, &token).await;
        assert_eq!(first.status, 201);

        let res = app.post_with_token(routes::CATEGORIES, &body, &token).await;
        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
        assert_eq!(res.body["message"], "Category \"Plumbing\" already exists");
        assert!(!res.text.contains("constraint"), "{}", res.text);
    }

    #[tokio::test]
    async fn blank_category_name_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;

        let res = app
            .post_with_token(routes::CATEGORIES, &json!({"name": "   "}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["errors"][0]["field"], "name");
    }

    #[tokio::test]
    async fn deleted_category_leaves_tools_with_a_null_name() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let form = multipart(
            &[
                ("name", "Pipe wrench"),
                ("status", "available"),
                ("category_id", "3"),
                ("provider_id", "7"),
            ],
            None,
        );
        let tool = app.post_multipart(routes::TOOLS, form, &token).await;
        let tool_id = tool.body["id"].as_i64().unwrap();

        let res = app
            .delete_with_token(&format!("{}?redirect=/categories", routes::category(3)), &token)
            .await;
        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/categories?deleteSuccess=true"));

        let tool = app.get_with_token(&routes::tool(tool_id), &token).await;
        assert_eq!(tool.status, 200);
        assert_eq!(tool.body["category_id"], 3);
        assert!(tool.body["category"].is_null());
        assert_eq!(tool.body["provider"], "Acme Supply");
    }

    #[tokio::test]
    async fn missing_category_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;

        let res = app.get_with_token(&routes::category(999), &token).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Category 999 not found");

        let res = app.delete_with_token(&routes::category(999), &token).await;
        assert_eq!(res.status, 404);
    }
}

mod providers {
    use super::*;

    #[tokio::test]
    async fn provider_email_is_normalized() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;

        let res = app
            .post_with_token(
                routes::PROVIDERS,
                &json!({
                    "name": "Acme Supply",
                    "contact_name": "Rosa",
                    "email": " Sales@Acme.Example ",
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["email"], "sales@acme.example");
        assert!(res.body["phone"].is_null());
    }

    #[tokio::test]
    async fn malformed_provider_email_is_rejected() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;
        let writes = app.db.writes();

        let res = app
            .post_with_token(
                routes::PROVIDERS,
                &json!({"name": "Acme Supply", "email": "not-an-email"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["errors"][0]["field"], "email");
        assert_eq!(app.db.writes(), writes);
    }

    #[tokio::test]
    async fn provider_update_uses_the_path_id() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;
        let created = app
            .post_with_token(routes::PROVIDERS, &json!({"name": "Acme"}), &token)
            .await;
        let id = created.body["id"].as_i64().unwrap();

        let res = app
            .put_with_token(
                &format!("{}?redirect=/providers%23list", routes::provider(id)),
                &json!({"name": "Acme Supply", "phone": "555-0100"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(
            res.location.as_deref(),
            Some("/providers?updateSuccess=true#list")
        );
        let fetched = app.get_with_token(&routes::provider(id), &token).await;
        assert_eq!(fetched.body["name"], "Acme Supply");
        assert_eq!(fetched.body["phone"], "555-0100");
    }
}
