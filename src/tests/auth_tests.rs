#[cfg(test)]
mod tests {
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, web, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::models::{Role, Session};
    use crate::routes::{auth_routes, dashboard_routes, directory_routes};
    use crate::services::directory::UserDirectory;
    use crate::utils::registry;
    use crate::utils::session::SessionController;
    use crate::utils::session_store::{KeyValueStore, MemoryStore};
    use crate::utils::SessionGuard;

    fn controller_on(store: Arc<MemoryStore>) -> web::Data<SessionController> {
        web::Data::new(SessionController::new(Box::new(store)))
    }

    #[actix_rt::test]
    async fn test_login_validation() {
        let controller = controller_on(Arc::new(MemoryStore::new()));
        let app = test::init_service(
            App::new()
                .app_data(controller.clone())
                .configure(auth_routes::init_routes),
        )
        .await;

        // Malformed email is rejected with a field-level message
        let request = test::TestRequest::post()
            .uri("/login")
            .set_json(&json!({ "role": "student", "email": "bad", "password": "secret1" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert!(body["errors"]["email"].is_string(), "Should flag the email field");

        // Five characters is one too short
        let request = test::TestRequest::post()
            .uri("/login")
            .set_json(&json!({ "role": "student", "email": "a@b.co", "password": "abcde" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert!(body["errors"]["password"].is_string(), "Should flag the password field");

        // Missing role selection is a field error, not a type error
        let request = test::TestRequest::post()
            .uri("/login")
            .set_json(&json!({ "email": "a@b.co", "password": "secret" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(response).await;
        assert!(body["errors"]["role"].is_string(), "Should flag the role field");

        // Minimal valid credentials open a session
        let request = test::TestRequest::post()
            .uri("/login")
            .set_json(&json!({ "role": "student", "email": "a@b.co", "password": "secret" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["session"]["role"], "student");
        assert_eq!(body["redirect"], "/dashboard");
    }

    #[actix_rt::test]
    async fn test_login_survives_reload() {
        let store = Arc::new(MemoryStore::new());

        let controller = SessionController::new(Box::new(store.clone()));
        let session = controller.login(Role::Teacher).unwrap();

        // A fresh controller on the same store stands in for a reload
        let reloaded = SessionController::new(Box::new(store.clone()));
        let restored = reloaded.restore().unwrap();
        assert_eq!(restored, Some(session));
    }

    #[actix_rt::test]
    async fn test_logout_clears_persisted_session() {
        let store = Arc::new(MemoryStore::new());

        let controller = SessionController::new(Box::new(store.clone()));
        controller.login(Role::Student).unwrap();
        controller.request_logout().unwrap();
        controller.confirm_logout().unwrap();

        let reloaded = SessionController::new(Box::new(store.clone()));
        assert_eq!(reloaded.restore().unwrap(), None);
    }

    #[actix_rt::test]
    async fn test_logout_cancel_keeps_session() {
        let controller = SessionController::new(Box::new(MemoryStore::new()));
        let session = controller.login(Role::Admin).unwrap();

        controller.request_logout().unwrap();
        controller.cancel_logout().unwrap();

        assert_eq!(controller.current().unwrap(), Some(session));
        // The dialog is back in editing, so a new request succeeds
        controller.request_logout().unwrap();
    }

    #[actix_rt::test]
    async fn test_logout_requires_session() {
        let controller = SessionController::new(Box::new(MemoryStore::new()));
        assert!(controller.request_logout().is_err());
    }

    #[actix_rt::test]
    async fn test_menus_are_stable_and_nonempty() {
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            let first = registry::menu_for(role);
            assert!(!first.is_empty(), "Menu for {} should not be empty", role);
            assert_eq!(first, registry::menu_for(role), "Menu for {} should be stable", role);
        }
    }

    #[actix_rt::test]
    async fn test_dashboard_redirects_without_session() {
        let controller = controller_on(Arc::new(MemoryStore::new()));
        let app = test::init_service(
            App::new().app_data(controller.clone()).service(
                web::scope("/dashboard")
                    .wrap(SessionGuard)
                    .configure(dashboard_routes::init_routes),
            ),
        )
        .await;

        let request = test::TestRequest::get().uri("/dashboard").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login",
            "Unauthenticated dashboard access should bounce to login"
        );
    }

    #[actix_rt::test]
    async fn test_login_page_redirects_with_session() {
        let controller = controller_on(Arc::new(MemoryStore::new()));
        controller.login(Role::Student).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(controller.clone())
                .configure(auth_routes::init_routes),
        )
        .await;

        let request = test::TestRequest::get().uri("/login").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/dashboard");
    }

    #[actix_rt::test]
    async fn test_guard_inserts_session_for_handlers() {
        let controller = controller_on(Arc::new(MemoryStore::new()));
        controller.login(Role::Teacher).unwrap();

        let app = test::init_service(
            App::new().app_data(controller.clone()).service(
                web::scope("/dashboard")
                    .wrap(SessionGuard)
                    .configure(dashboard_routes::init_routes),
            ),
        )
        .await;

        let request = test::TestRequest::get().uri("/dashboard").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["role"], "teacher");
        assert_eq!(
            body["welcome"],
            format!("Welcome, {}", Session::for_role(Role::Teacher).name)
        );
    }

    #[actix_rt::test]
    async fn test_menu_is_served_for_every_role() {
        let controller = controller_on(Arc::new(MemoryStore::new()));
        let app = test::init_service(
            App::new().app_data(controller.clone()).service(
                web::scope("/dashboard")
                    .wrap(SessionGuard)
                    .configure(dashboard_routes::init_routes),
            ),
        )
        .await;

        // The sidebar endpoint belongs to the shell, not to any one
        // role's navigation, so the guard must let every role through
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            controller.login(role).unwrap();

            let request = test::TestRequest::get().uri("/dashboard/menu").to_request();
            let response = test::call_service(&app, request).await;
            assert_eq!(
                response.status(),
                StatusCode::OK,
                "Menu should be served for {}, not redirected",
                role
            );

            let body: Value = test::read_body_json(response).await;
            let items = body["items"].as_array().unwrap();
            let expected = registry::menu_for(role);
            assert_eq!(items.len(), expected.len());
            for (item, entry) in items.iter().zip(&expected) {
                assert_eq!(item["label"], entry.label);
                assert_eq!(item["route_segment"], entry.route_segment);
            }

            controller.logout().unwrap();
        }
    }

    #[actix_rt::test]
    async fn test_admin_user_management_end_to_end() {
        let controller = controller_on(Arc::new(MemoryStore::new()));
        let directory = web::Data::new(UserDirectory::with_seed_users());
        let app = test::init_service(
            App::new()
                .app_data(controller.clone())
                .app_data(directory.clone())
                .service(
                    web::scope("/dashboard")
                        .wrap(SessionGuard)
                        .configure(dashboard_routes::init_routes)
                        .configure(directory_routes::init_routes),
                ),
        )
        .await;

        controller.login(Role::Admin).unwrap();

        let request = test::TestRequest::get().uri("/dashboard/users").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        let before = body["users"].as_array().unwrap().len();

        let request = test::TestRequest::delete()
            .uri("/dashboard/users/usr-003?confirm=true")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["deleted"], "usr-003");
        assert_eq!(body["remaining"].as_u64().unwrap() as usize, before - 1);

        // A student is bounced back to the dashboard root instead
        controller.logout().unwrap();
        controller.login(Role::Student).unwrap();

        let request = test::TestRequest::get().uri("/dashboard/users").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/dashboard");
    }

    #[actix_rt::test]
    async fn test_forgot_password_acknowledges() {
        let controller = controller_on(Arc::new(MemoryStore::new()));
        let app = test::init_service(
            App::new()
                .app_data(controller.clone())
                .configure(auth_routes::init_routes),
        )
        .await;

        let request = test::TestRequest::post()
            .uri("/forgot-password")
            .set_json(&json!({ "email": "someone@example.com" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert!(body["message"].as_str().unwrap().contains("reset link"));

        let request = test::TestRequest::post()
            .uri("/forgot-password")
            .set_json(&json!({ "email": "not-an-address" }))
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_corrupt_stored_session_is_discarded() {
        let store = Arc::new(MemoryStore::new());
        store.set(crate::utils::SESSION_KEY, "{not json").unwrap();

        let controller = SessionController::new(Box::new(store.clone()));
        assert_eq!(controller.restore().unwrap(), None);
        assert_eq!(store.get(crate::utils::SESSION_KEY).unwrap(), None);
    }
}
