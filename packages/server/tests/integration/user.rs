use crate::common::{ADMIN_EMAIL, TestApp, multipart, png_bytes, routes};

mod administration {
    use super::*;

    #[tokio::test]
    async fn only_admins_can_list_users() {
        let app = TestApp::spawn().await;
        let (_, staff) = app.create_authenticated_user("staff@example.com").await;
        let (_, admin) = app.create_authenticated_user(ADMIN_EMAIL).await;

        let denied = app.get_with_token(routes::USERS, &staff).await;
        assert_eq!(denied.status, 403);
        assert_eq!(denied.body["code"], "PERMISSION_DENIED");

        let res = app
            .get_with_token(&format!("{}?search=STAFF@", routes::USERS), &admin)
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["pagination"]["total"], 1);
        assert_eq!(res.body["data"][0]["email"], "staff@example.com");
    }

    #[tokio::test]
    async fn staff_cannot_read_another_account() {
        let app = TestApp::spawn().await;
        let (staff_id, staff) = app.create_authenticated_user("staff@example.com").await;
        let (other_id, _) = app.create_authenticated_user("other@example.com").await;

        let own = app.get_with_token(&routes::user(staff_id), &staff).await;
        assert_eq!(own.status, 200);

        let other = app.get_with_token(&routes::user(other_id), &staff).await;
        assert_eq!(other.status, 403);
    }

    #[tokio::test]
    async fn admin_deletes_others_but_not_themselves() {
        let app = TestApp::spawn().await;
        let (staff_id, _) = app.create_authenticated_user("staff@example.com").await;
        let (admin_id, admin) = app.create_authenticated_user(ADMIN_EMAIL).await;

        let own = app.delete_with_token(&routes::user(admin_id), &admin).await;
        assert_eq!(own.status, 400);

        let res = app.delete_with_token(&routes::user(staff_id), &admin).await;
        assert_eq!(res.status, 204);

        let missing = app.delete_with_token(&routes::user(staff_id), &admin).await;
        assert_eq!(missing.status, 404);
    }
}

mod profile {
    use super::*;

    #[tokio::test]
    async fn profile_update_stores_the_avatar() {
        let app = TestApp::spawn().await;
        let (id, token) = app.create_authenticated_user("staff@example.com").await;

        let form = multipart(
            &[("full_name", "Ana Torres"), ("phone", "555-0199")],
            Some(("avatar", "me.png", "image/png", png_bytes())),
        );
        let res = app.put_multipart(&routes::user(id), form, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["full_name"], "Ana Torres");
        assert_eq!(res.body["phone"], "555-0199");
        assert!(res.body["avatar_url"].as_str().unwrap().starts_with("/media/avatars/"));
        assert_eq!(app.stored_files("avatars"), 1);

        let form = multipart(&[("full_name", "Ana T.")], None);
        let res = app.put_multipart(&routes::user(id), form, &token).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["avatar_url"].is_string());
        assert_eq!(app.stored_files("avatars"), 1);
    }

    #[tokio::test]
    async fn staff_cannot_edit_another_profile() {
        let app = TestApp::spawn().await;
        let (_, staff) = app.create_authenticated_user("staff@example.com").await;
        let (other_id, _) = app.create_authenticated_user("other@example.com").await;
        let writes = app.db.writes();

        let form = multipart(&[("full_name", "Mallory")], None);
        let res = app.put_multipart(&routes::user(other_id), form, &staff).await;

        assert_eq!(res.status, 403);
        assert_eq!(app.db.writes(), writes);
    }
}
