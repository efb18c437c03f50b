use std::sync::Arc;

use serde_json::json;

use crate::common::{RejectingStore, TestApp, multipart, png_bytes, routes};

async fn create_project(app: &TestApp, token: &str) -> i64 {
    let res = app
        .post_with_token(
            routes::PROJECTS,
            &json!({
                "name": "Warehouse rewiring",
                "client": "Northwind",
                "location": "Dock 4",
            }),
            token,
        )
        .await;
    assert_eq!(res.status, 201, "Project creation failed: {}", res.text);
    res.body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn project_gallery_round_trip() {
    let app = TestApp::spawn().await;
    let token = app.staff_token().await;
    let id = create_project(&app, &token).await;

    let form = multipart(
        &[("caption", "Panel before")],
        Some(("image", "panel.jpg", "image/jpeg", png_bytes())),
    );
    let added = app
        .post_multipart(&routes::project_images(id), form, &token)
        .await;
    assert_eq!(added.status, 201, "{}", added.text);
    assert_eq!(added.body["caption"], "Panel before");
    let image_id = added.body["id"].as_i64().unwrap();

    let project = app.get_with_token(&routes::project(id), &token).await;
    assert_eq!(project.body["images"].as_array().unwrap().len(), 1);
    assert_eq!(app.stored_files("projects"), 1);

    let removed = app
        .delete_with_token(&routes::project_image(id, image_id), &token)
        .await;
    assert_eq!(removed.status, 204);
    assert_eq!(app.stored_files("projects"), 0);
}

#[tokio::test]
async fn gallery_upload_requires_a_file() {
    let app = TestApp::spawn().await;
    let token = app.staff_token().await;
    let id = create_project(&app, &token).await;
    let writes = app.db.writes();

    let res = app
        .post_multipart(
            &routes::project_images(id),
            multipart(&[("caption", "nothing")], None),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(app.db.writes(), writes);
}

#[tokio::test]
async fn gallery_upload_to_a_missing_project_stores_nothing() {
    let app = TestApp::spawn().await;
    let token = app.staff_token().await;

    let form = multipart(&[], Some(("image", "panel.png", "image/png", png_bytes())));
    let res = app
        .post_multipart(&routes::project_images(4242), form, &token)
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(app.stored_files("projects"), 0);
}

#[tokio::test]
async fn failed_gallery_upload_adds_no_row() {
    let app = TestApp::spawn_with_store(Some(Arc::new(RejectingStore))).await;
    let token = app.staff_token().await;
    let id = create_project(&app, &token).await;
    let writes = app.db.writes();

    let form = multipart(&[], Some(("image", "panel.png", "image/png", png_bytes())));
    let res = app
        .post_multipart(&routes::project_images(id), form, &token)
        .await;

    assert_eq!(res.status, 502);
    assert_eq!(app.db.writes(), writes);
}

#[tokio::test]
async fn deleting_a_project_removes_its_images() {
    let app = TestApp::spawn().await;
    let token = app.staff_token().await;
    let id = create_project(&app, &token).await;
    for name in ["a.png", "b.png"] {
        let form = multipart(&[], Some(("image", name, "image/png", png_bytes())));
        let res = app
            .post_multipart(&routes::project_images(id), form, &token)
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    let res = app
        .delete_with_token(&format!("{}?redirect=/projects", routes::project(id)), &token)
        .await;

    assert_eq!(res.status, 303);
    assert_eq!(res.location.as_deref(), Some("/projects?deleteSuccess=true"));
    assert_eq!(app.stored_files("projects"), 0);
    let gone = app.get_with_token(&routes::project(id), &token).await;
    assert_eq!(gone.status, 404);
}

#[tokio::test]
async fn failed_project_delete_keeps_the_gallery() {
    let app = TestApp::spawn().await;
    let token = app.staff_token().await;
    let id = create_project(&app, &token).await;
    let form = multipart(&[], Some(("image", "a.png", "image/png", png_bytes())));
    let res = app
        .post_multipart(&routes::project_images(id), form, &token)
        .await;
    assert_eq!(res.status, 201, "{}", res.text);
    app.db.fail_deletes();

    let res = app.delete_with_token(&routes::project(id), &token).await;

    assert_eq!(res.status, 500);
    assert_eq!(app.db.image_count(), 1);
    assert_eq!(app.stored_files("projects"), 1);
    let project = app.get_with_token(&routes::project(id), &token).await;
    assert_eq!(project.status, 200);
    assert_eq!(project.body["images"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn image_of_another_project_cannot_be_removed() {
    let app = TestApp::spawn().await;
    let token = app.staff_token().await;
    let first = create_project(&app, &token).await;
    let second = create_project(&app, &token).await;
    let form = multipart(&[], Some(("image", "a.png", "image/png", png_bytes())));
    let added = app
        .post_multipart(&routes::project_images(first), form, &token)
        .await;
    let image_id = added.body["id"].as_i64().unwrap();

    let res = app
        .delete_with_token(&routes::project_image(second, image_id), &token)
        .await;

    assert_eq!(res.status, 404);
    assert_eq!(app.stored_files("projects"), 1);
}
