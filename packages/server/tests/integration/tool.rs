use std::sync::Arc;

use serde_json::json;

use crate::common::{RejectingStore, TestApp, multipart, png_bytes, routes};

fn drill_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Cordless drill"),
        ("status", "available"),
        ("category_id", "3"),
        ("provider_id", "7"),
    ]
}

async fn create_drill(app: &TestApp, token: &str) -> i64 {
    let res = app
        .post_multipart(routes::TOOLS, multipart(&drill_fields(), None), token)
        .await;
    assert_eq!(res.status, 201, "Tool creation failed: {}", res.text);
    res.body["id"].as_i64().unwrap()
}

mod creation {
    use super::*;

    #[tokio::test]
    async fn tool_with_image_is_stored_and_enriched() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let form = multipart(
            &drill_fields(),
            Some(("image", "drill.png", "image/png", png_bytes())),
        );
        let res = app.post_multipart(routes::TOOLS, form, &token).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "Cordless drill");
        assert_eq!(res.body["status"], "available");
        assert_eq!(res.body["category"], "Electrical");
        assert_eq!(res.body["provider"], "Acme Supply");
        assert_eq!(res.body["maintenance_notes"], 0);
        let url = res.body["image_url"].as_str().unwrap();
        assert!(url.starts_with("/media/tools/"), "{url}");
        assert!(url.ends_with(".png"), "{url}");
        assert_eq!(app.stored_files("tools"), 1);
    }

    #[tokio::test]
    async fn stored_image_is_served_from_the_media_prefix() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let form = multipart(
            &drill_fields(),
            Some(("image", "drill.png", "image/png", png_bytes())),
        );
        let created = app.post_multipart(routes::TOOLS, form, &token).await;
        let url = created.body["image_url"].as_str().unwrap().to_string();

        let res = app.get_without_token(&url).await;
        assert_eq!(res.status, 200);
    }

    #[tokio::test]
    async fn tool_without_image_has_null_image_url() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let id = create_drill(&app, &token).await;
        let res = app.get_with_token(&routes::tool(id), &token).await;

        assert_eq!(res.status, 200);
        assert!(res.body["image_url"].is_null());
    }

    #[tokio::test]
    async fn unknown_category_is_not_found_before_storing_or_writing() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let writes = app.db.writes();

        let form = multipart(
            &[
                ("name", "Cordless drill"),
                ("status", "available"),
                ("category_id", "999"),
                ("provider_id", "7"),
            ],
            Some(("image", "drill.png", "image/png", png_bytes())),
        );
        let res = app.post_multipart(routes::TOOLS, form, &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Category 999 not found");
        assert_eq!(app.db.writes(), writes);
        assert_eq!(app.stored_files("tools"), 0);
    }

    #[tokio::test]
    async fn unknown_status_is_a_validation_error() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let form = multipart(
            &[
                ("name", "Cordless drill"),
                ("status", "lost"),
                ("category_id", "3"),
                ("provider_id", "7"),
            ],
            None,
        );
        let res = app.post_multipart(routes::TOOLS, form, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["errors"][0]["field"], "status");
    }

    #[tokio::test]
    async fn non_image_upload_is_rejected_without_writing() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let writes = app.db.writes();

        let form = multipart(
            &drill_fields(),
            Some(("image", "notes.txt", "text/plain", b"hello".to_vec())),
        );
        let res = app.post_multipart(routes::TOOLS, form, &token).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(app.db.writes(), writes);
        assert_eq!(app.db.tool_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_aborts_the_create() {
        let app = TestApp::spawn_with_store(Some(Arc::new(RejectingStore))).await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let writes = app.db.writes();

        let form = multipart(
            &drill_fields(),
            Some(("image", "drill.png", "image/png", png_bytes())),
        );
        let res = app.post_multipart(routes::TOOLS, form, &token).await;

        assert_eq!(res.status, 502);
        assert_eq!(res.body["code"], "UPLOAD_FAILED");
        assert_eq!(app.db.writes(), writes);
        assert_eq!(app.db.tool_count(), 0);
    }
}

mod updates {
    use super::*;

    #[tokio::test]
    async fn update_without_image_keeps_the_current_one() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let form = multipart(
            &drill_fields(),
            Some(("image", "drill.png", "image/png", png_bytes())),
        );
        let created = app.post_multipart(routes::TOOLS, form, &token).await;
        let id = created.body["id"].as_i64().unwrap();
        let url = created.body["image_url"].clone();

        let form = multipart(
            &[
                ("name", "Cordless drill"),
                ("status", "maintenance"),
                ("category_id", "3"),
                ("provider_id", "7"),
            ],
            None,
        );
        let res = app.put_multipart(&routes::tool(id), form, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["status"], "maintenance");
        assert_eq!(res.body["image_url"], url);
    }

    #[tokio::test]
    async fn new_image_replaces_and_removes_the_old_one() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let form = multipart(
            &drill_fields(),
            Some(("image", "drill.png", "image/png", png_bytes())),
        );
        let created = app.post_multipart(routes::TOOLS, form, &token).await;
        let id = created.body["id"].as_i64().unwrap();
        let old_url = created.body["image_url"].as_str().unwrap().to_string();

        let form = multipart(
            &drill_fields(),
            Some(("image", "drill-2.png", "image/png", png_bytes())),
        );
        let res = app.put_multipart(&routes::tool(id), form, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_ne!(res.body["image_url"].as_str().unwrap(), old_url);
        assert_eq!(app.stored_files("tools"), 1);
    }

    #[tokio::test]
    async fn updating_a_missing_tool_is_not_found() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;

        let res = app
            .put_multipart(&routes::tool(4242), multipart(&drill_fields(), None), &token)
            .await;

        assert_eq!(res.status, 404);
    }
}

mod notes {
    use super::*;

    #[tokio::test]
    async fn notes_are_counted_on_the_tool() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let id = create_drill(&app, &token).await;

        for note in ["Replaced chuck", "Battery swollen"] {
            let res = app
                .post_with_token(&routes::tool_notes(id), &json!({"note": note}), &token)
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
            assert_eq!(res.body["tool_id"], id);
        }

        let notes = app.get_with_token(&routes::tool_notes(id), &token).await;
        assert_eq!(notes.status, 200);
        assert_eq!(notes.body.as_array().unwrap().len(), 2);

        let tool = app.get_with_token(&routes::tool(id), &token).await;
        assert_eq!(tool.body["maintenance_notes"], 2);
    }

    #[tokio::test]
    async fn blank_note_is_rejected() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let id = create_drill(&app, &token).await;

        let res = app
            .post_with_token(&routes::tool_notes(id), &json!({"note": "   "}), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.db.note_count(), 0);
    }

    #[tokio::test]
    async fn note_on_a_missing_tool_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;

        let res = app
            .post_with_token(&routes::tool_notes(4242), &json!({"note": "Oiled"}), &token)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(app.db.note_count(), 0);
    }

    #[tokio::test]
    async fn note_cannot_be_deleted_through_another_tool() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let first = create_drill(&app, &token).await;
        let second = create_drill(&app, &token).await;
        let note = app
            .post_with_token(&routes::tool_notes(first), &json!({"note": "Oiled"}), &token)
            .await;
        let note_id = note.body["id"].as_i64().unwrap();

        let res = app
            .delete_with_token(&routes::tool_note(second, note_id), &token)
            .await;
        assert_eq!(res.status, 404);

        let res = app
            .delete_with_token(&routes::tool_note(first, note_id), &token)
            .await;
        assert_eq!(res.status, 204);
        assert_eq!(app.db.note_count(), 0);
    }
}

mod deletion {
    use super::*;

    #[tokio::test]
    async fn deleting_a_tool_removes_its_notes_and_image() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let form = multipart(
            &drill_fields(),
            Some(("image", "drill.png", "image/png", png_bytes())),
        );
        let created = app.post_multipart(routes::TOOLS, form, &token).await;
        let id = created.body["id"].as_i64().unwrap();
        app.post_with_token(&routes::tool_notes(id), &json!({"note": "Oiled"}), &token)
            .await;

        let res = app
            .delete_with_token(&format!("{}?redirect=/tools", routes::tool(id)), &token)
            .await;

        assert_eq!(res.status, 303);
        assert_eq!(res.location.as_deref(), Some("/tools?deleteSuccess=true"));
        assert_eq!(app.db.tool_count(), 0);
        assert_eq!(app.db.note_count(), 0);
        assert_eq!(app.stored_files("tools"), 0);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_tool_and_its_notes() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        let id = create_drill(&app, &token).await;
        for note in ["Oiled", "Replaced chuck"] {
            let res = app
                .post_with_token(&routes::tool_notes(id), &json!({"note": note}), &token)
                .await;
            assert_eq!(res.status, 201, "{}", res.text);
        }
        app.db.fail_deletes();

        let res = app.delete_with_token(&routes::tool(id), &token).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "INTERNAL_ERROR");
        assert_eq!(app.db.tool_count(), 1);
        assert_eq!(app.db.note_count(), 2);
        let tool = app.get_with_token(&routes::tool(id), &token).await;
        assert_eq!(tool.body["maintenance_notes"], 2);
    }

    #[tokio::test]
    async fn deleting_a_missing_tool_is_not_found() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;

        let res = app.delete_with_token(&routes::tool(4242), &token).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn list_filters_by_search_and_status() {
        let app = TestApp::spawn().await;
        app.seed_catalog();
        let token = app.staff_token().await;
        for (name, status) in [
            ("Cordless drill", "available"),
            ("Hammer drill", "retired"),
            ("Multimeter", "available"),
        ] {
            let form = multipart(
                &[
                    ("name", name),
                    ("status", status),
                    ("category_id", "3"),
                    ("provider_id", "7"),
                ],
                None,
            );
            let res = app.post_multipart(routes::TOOLS, form, &token).await;
            assert_eq!(res.status, 201, "{}", res.text);
        }

        let res = app
            .get_with_token(
                &format!("{}?search=DRILL&status=available", routes::TOOLS),
                &token,
            )
            .await;

        assert_eq!(res.status, 200);
        let names: Vec<&str> = res.body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Cordless drill"]);
        assert_eq!(res.body["pagination"]["total"], 1);
    }

    #[tokio::test]
    async fn unreachable_page_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let token = app.staff_token().await;

        let res = app
            .get_with_token(&format!("{}?page={}", routes::TOOLS, u64::MAX), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
