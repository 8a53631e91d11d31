//! Integration tests for the user directory.

use keyed_store::{
    ApiResponse, DirectoryError, Permission, Role, StoreError, User, UserDirectory,
};

#[tokio::test]
async fn fetch_seeded_admin() {
    let directory = UserDirectory::seeded().unwrap();
    let response = directory.fetch_user_detail(1).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.message, "success");
    assert!(response.success);

    let detail = response.data.unwrap();
    assert_eq!(detail.user.username, "admin");
    assert_eq!(detail.roles.len(), 2);
    assert_eq!(detail.permissions.len(), 4);
    assert!(detail.has_permission("user:delete"));
}

#[tokio::test]
async fn fetch_missing_user_is_404() {
    let directory = UserDirectory::seeded().unwrap();
    let response = directory.fetch_user_detail(404).await;

    assert_eq!(response.status, 404);
    assert!(!response.success);
    assert!(response.data.is_none());
    assert_eq!(response.error.as_deref(), Some("user 404 not found"));
}

#[tokio::test]
async fn member_only_sees_read_permission() {
    let mut directory = UserDirectory::seeded().unwrap();
    directory
        .add_user(User::new(2, "grace", "grace@example.com"))
        .unwrap();
    directory.assign_role(2, 2).unwrap();

    let detail = directory.fetch_user_detail(2).await.into_result().unwrap();
    assert_eq!(detail.roles, vec![Role::new(2, "member")]);
    assert!(detail.has_permission("user:read"));
    assert!(!detail.has_permission("user:update"));
}

#[test]
fn response_json_matches_api_shape() {
    let directory = UserDirectory::seeded().unwrap();
    let json = serde_json::to_value(directory.list_users()).unwrap();

    assert_eq!(json["status"], 200);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"][0]["username"], "admin");
    assert_eq!(json["data"][0]["isActive"], true);
    assert!(json.get("error").is_none());
}

#[test]
fn duplicate_permission_surfaces_store_error() {
    let mut directory = UserDirectory::seeded().unwrap();
    let err = directory
        .add_permission(Permission::new(3, "user:export"))
        .unwrap_err();

    assert_eq!(err, DirectoryError::Store(StoreError::DuplicateKey { id: 3 }));
    assert_eq!(directory.permissions().len(), 4);
}

#[test]
fn error_response_into_result() {
    let response: ApiResponse<()> = ApiResponse::error(500, "boom");
    assert_eq!(response.into_result(), Err("boom".to_string()));
}
