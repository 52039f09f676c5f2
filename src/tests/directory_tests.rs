#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App};
    use serde_json::{json, Value};

    use crate::models::{Permissions, Role};
    use crate::routes::directory_routes;
    use crate::services::directory::{DirectoryFilter, UserDirectory};
    use crate::utils::registry;

    fn all_denied() -> Permissions {
        Permissions {
            can_manage_users: false,
            can_edit_courses: false,
            can_view_revenue: false,
            can_manage_schedule: false,
            can_access_settings: false,
            can_message_all: false,
        }
    }

    #[actix_rt::test]
    async fn test_search_is_case_insensitive_substring() {
        let directory = UserDirectory::with_seed_users();

        let filter = DirectoryFilter {
            search_term: Some("zaid".to_string()),
            role: None,
        };
        let matches = directory.list(&filter).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Zaid Al-Harbi");

        // Email is searched too
        let filter = DirectoryFilter {
            search_term: Some("DARULQURAN".to_string()),
            role: None,
        };
        let matches = directory.list(&filter).unwrap();
        assert!(matches.iter().all(|user| user.email.contains("darulquran")));
        assert!(!matches.is_empty());
    }

    #[actix_rt::test]
    async fn test_role_filter_and_insertion_order() {
        let directory = UserDirectory::with_seed_users();

        let filter = DirectoryFilter {
            search_term: None,
            role: Some(Role::Teacher),
        };
        let teachers = directory.list(&filter).unwrap();
        assert_eq!(teachers.len(), 3);
        assert!(teachers.iter().all(|user| user.role == Role::Teacher));

        // Unfiltered listing keeps insertion order
        let everyone = directory.list(&DirectoryFilter::default()).unwrap();
        assert_eq!(everyone.first().unwrap().id, "usr-001");
        assert_eq!(everyone.last().unwrap().id, "usr-007");
    }

    #[actix_rt::test]
    async fn test_update_permissions_touches_one_record() {
        let directory = UserDirectory::with_seed_users();
        let revoked = all_denied();

        let updated = directory.update_permissions("usr-004", revoked).unwrap();
        assert_eq!(updated.permissions, revoked);

        // The edited record reads back exactly as written
        let reread = directory.get("usr-004").unwrap().unwrap();
        assert_eq!(reread.permissions, revoked);

        // Every other record keeps its role default
        for user in directory.list(&DirectoryFilter::default()).unwrap() {
            if user.id != "usr-004" {
                assert_eq!(
                    user.permissions,
                    registry::default_permissions(user.role),
                    "Permissions of {} should be untouched",
                    user.id
                );
            }
        }
    }

    #[actix_rt::test]
    async fn test_update_permissions_unknown_user() {
        let directory = UserDirectory::with_seed_users();
        assert!(directory.update_permissions("usr-404", all_denied()).is_err());
    }

    #[actix_rt::test]
    async fn test_delete_requires_confirmation() {
        let directory = web::Data::new(UserDirectory::with_seed_users());
        let app = test::init_service(
            App::new()
                .app_data(directory.clone())
                .configure(directory_routes::init_routes),
        )
        .await;

        // Without the confirm flag nothing is removed
        let request = test::TestRequest::delete().uri("/users/usr-002").to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(directory.count().unwrap(), 7);

        let request = test::TestRequest::delete()
            .uri("/users/usr-002?confirm=true")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["remaining"], 6);

        // Deleted users no longer show up in listings
        let request = test::TestRequest::get().uri("/users?search_term=layla").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert!(body["users"].as_array().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_update_permissions_over_http() {
        let directory = web::Data::new(UserDirectory::with_seed_users());
        let app = test::init_service(
            App::new()
                .app_data(directory.clone())
                .configure(directory_routes::init_routes),
        )
        .await;

        let request = test::TestRequest::put()
            .uri("/users/usr-001/permissions")
            .set_json(&json!({
                "can_manage_users": false,
                "can_edit_courses": true,
                "can_view_revenue": false,
                "can_manage_schedule": true,
                "can_access_settings": false,
                "can_message_all": false
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["id"], "usr-001");
        assert_eq!(body["permissions"]["can_edit_courses"], true);

        let request = test::TestRequest::get().uri("/users?search_term=zaid").to_request();
        let body: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(body["users"][0]["permissions"]["can_manage_schedule"], true);
    }
}
