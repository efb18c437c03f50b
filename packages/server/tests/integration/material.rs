use serde_json::json;

use crate::common::{TestApp, routes};

fn cable() -> serde_json::Value {
    json!({
        "name": "Cable 10AWG",
        "status": true,
        "category_id": 3,
        "provider_id": 7,
        "expiration": "2099-12-31",
        "stock": 100,
        "cost": 12.5,
    })
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn created_material_comes_back_with_catalog_names() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let res = app.post_with_token(routes::MATERIALS, &cable(), &token).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["name"], "Cable 10AWG");
        assert_eq!(res.body["category_id"], 3);
        assert_eq!(res.body["category"], "Electrical");
        assert_eq!(res.body["provider_id"], 7);
        assert_eq!(res.body["provider"], "Acme Supply");
        assert_eq!(res.body["stock"], 100);
        assert_eq!(res.body["cost"], 12.5);
        assert_eq!(res.body["expiration"], "2099-12-31");
    }

    #[tokio::test]
    async fn created_material_reads_back_unchanged() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let created = app.post_with_token(routes::MATERIALS, &cable(), &token).await;
        assert_eq!(created.status, 201, "{}", created.text);
        let id = created.body["id"].as_i64().unwrap();

        let fetched = app.get_with_token(&routes::material(id), &token).await;

        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body, created.body);
        assert_eq!(fetched.body["name"], "Cable 10AWG");
        assert_eq!(fetched.body["status"], true);
        assert_eq!(fetched.body["stock"], 100);
        assert_eq!(fetched.body["cost"], 12.5);
        assert_eq!(fetched.body["category"], "Electrical");
        assert_eq!(fetched.body["provider"], "Acme Supply");
    }

    #[tokio::test]
    async fn negative_stock_is_rejected_without_writing() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let writes = app.db.writes();

        let mut body = cable();
        body["stock"] = json!(-1);
        let res = app.post_with_token(routes::MATERIALS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["errors"][0]["field"], "stock");
        assert_eq!(app.db.writes(), writes);
    }

    #[tokio::test]
    async fn negative_cost_is_rejected_without_writing() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let writes = app.db.writes();

        let mut body = cable();
        body["cost"] = json!(-1);
        let res = app.post_with_token(routes::MATERIALS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["errors"][0]["field"], "cost");
        assert_eq!(app.db.writes(), writes);
    }

    #[tokio::test]
    async fn past_expiration_is_rejected() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let mut body = cable();
        body["expiration"] = json!("2000-01-01");
        let res = app.post_with_token(routes::MATERIALS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["errors"][0]["field"], "expiration");
    }

    #[tokio::test]
    async fn every_missing_field_is_reported() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;

        let res = app.post_with_token(routes::MATERIALS, &json!({}), &token).await;

        assert_eq!(res.status, 400);
        let fields: Vec<&str> = res.body["errors"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["field"].as_str().unwrap())
            .collect();
        for field in ["category_id", "cost", "name", "provider_id", "status", "stock"] {
            assert!(fields.contains(&field), "missing error for {field}: {fields:?}");
        }
    }

    #[tokio::test]
    async fn unknown_category_is_not_found_before_any_write() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let writes = app.db.writes();

        let mut body = cable();
        body["category_id"] = json!(999);
        let res = app.post_with_token(routes::MATERIALS, &body, &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "Category 999 not found");
        assert_eq!(app.db.writes(), writes);
    }

    #[tokio::test]
    async fn an_id_in_a_create_payload_is_rejected() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let mut body = cable();
        body["id"] = json!(5);
        let res = app.post_with_token(routes::MATERIALS, &body, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["errors"][0]["field"], "id");
    }

    #[tokio::test]
    async fn requires_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::MATERIALS).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }
}

mod redirects {
    use super::*;

    #[tokio::test]
    async fn create_with_redirect_sets_success_flag() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let res = app
            .post_with_token(
                &format!("{}?redirect=/materials", routes::MATERIALS),
                &cable(),
                &token,
            )
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/materials?createSuccess=true"));
    }

    #[tokio::test]
    async fn absolute_redirect_target_is_refused_before_writing() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let writes = app.db.writes();

        let res = app
            .post_with_token(
                &format!("{}?redirect=https://evil.example", routes::MATERIALS),
                &cable(),
                &token,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.db.writes(), writes);
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn update_keeps_past_expiration_and_replaces_fields() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let created = app.post_with_token(routes::MATERIALS, &cable(), &token).await;
        let id = created.body["id"].as_i64().unwrap();

        let mut body = cable();
        body["stock"] = json!(40);
        body["expiration"] = json!("2001-05-05");
        let res = app
            .put_with_token(
                &format!("{}?redirect=/materials/{id}", routes::material(id)),
                &body,
                &token,
            )
            .await;

        assert_eq!(res.status, 303, "{}", res.text);
        assert_eq!(
            res.location.as_deref(),
            Some(format!("/materials/{id}?updateSuccess=true").as_str())
        );

        let fetched = app.get_with_token(&routes::material(id), &token).await;
        assert_eq!(fetched.body["stock"], 40);
        assert_eq!(fetched.body["expiration"], "2001-05-05");
    }

    #[tokio::test]
    async fn list_filters_by_status_and_paginates() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        for (name, active) in [("Anchor", true), ("Bolt", false), ("Conduit", true)] {
            let mut body = cable();
            body["name"] = json!(name);
            body["status"] = json!(active);
            let res = app.post_with_token(routes::MATERIALS, &body, &token).await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let res = app
            .get_with_token(
                &format!("{}?status=active&per_page=1&page=2", routes::MATERIALS),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 1);
        assert_eq!(res.body["data"][0]["name"], "Conduit");
        assert_eq!(res.body["pagination"]["total"], 2);
        assert_eq!(res.body["pagination"]["total_pages"], 2);
    }

    #[tokio::test]
    async fn deleting_a_missing_material_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;

        let res = app.delete_with_token(&routes::material(4242), &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_with_redirect_sets_delete_flag() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let created = app.post_with_token(routes::MATERIALS, &cable(), &token).await;
        let id = created.body["id"].as_i64().unwrap();

        let res = app
            .delete_with_token(
                &format!("{}?redirect=/materials", routes::material(id)),
                &token,
            )
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/materials?deleteSuccess=true"));
        let gone = app.get_with_token(&routes::material(id), &token).await;
        assert_eq!(gone.status, 404);
    }
}
