mod common;

use axum::http::StatusCode;
use common::{ADMIN_PASSWORD, ADMIN_USERNAME, spawn_app};

#[tokio::test]
async fn test_index_lists_movies_for_anyone() {
    let mut client = spawn_app().await;
    client.state.store().add_movie("Leon", "1994").await.unwrap();
    client.state.store().add_movie("WALL-E", "2008").await.unwrap();

    let response = client.get("/").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Admin's Watchlist"));
    assert!(response.body.contains("2 Titles"));
    let leon = response.body.find("Leon - 1994").unwrap();
    let walle = response.body.find("WALL-E - 2008").unwrap();
    assert!(leon < walle);
    assert!(!response.body.contains("name=\"title\""));
}

#[tokio::test]
async fn test_anonymous_create_is_silently_dropped() {
    let mut client = spawn_app().await;

    for (title, year) in [("Leon", "1994"), ("", ""), ("x", "12345")] {
        let response = client.post_form("/", &[("title", title), ("year", year)]).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location.as_deref(), Some("/"));
    }

    assert_eq!(client.movie_count().await, 0);

    let page = client.get("/").await;
    assert!(!page.body.contains("class=\"alert\""));
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let mut client = spawn_app().await;

    let wrong_password = client.login(ADMIN_USERNAME, "nope").await;
    assert_eq!(wrong_password.status, StatusCode::SEE_OTHER);
    assert_eq!(wrong_password.location.as_deref(), Some("/login"));
    let after_wrong_password = client.get("/login").await.body;

    let wrong_username = client.login("root", ADMIN_PASSWORD).await;
    assert_eq!(wrong_username.location.as_deref(), Some("/login"));
    let after_wrong_username = client.get("/login").await.body;

    assert!(after_wrong_password.contains("Invalid username or password."));
    assert_eq!(after_wrong_password, after_wrong_username);

    assert_eq!(client.get("/settings").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_empty_fields() {
    let mut client = spawn_app().await;

    let response = client.login(ADMIN_USERNAME, "").await;
    assert_eq!(response.location.as_deref(), Some("/login"));
    assert!(client.get("/login").await.body.contains("Invalid input."));
}

#[tokio::test]
async fn test_login_unlocks_protected_routes() {
    let mut client = spawn_app().await;

    assert_eq!(client.get("/settings").await.status, StatusCode::UNAUTHORIZED);

    client.login_as_admin().await;

    let home = client.get("/").await;
    assert!(home.body.contains("Login success."));
    assert!(home.body.contains("name=\"title\""));
    assert!(home.body.contains("href=\"/logout\""));

    assert_eq!(client.get("/settings").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_movie_when_authenticated() {
    let mut client = spawn_app().await;
    client.login_as_admin().await;

    let title = "a".repeat(60);
    let response = client
        .post_form("/", &[("title", title.as_str()), ("year", "1994")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));
    assert_eq!(client.movie_count().await, 1);

    let movies = client.state.store().list_movies().await.unwrap();
    assert_eq!(movies[0].title, title);
    assert_eq!(movies[0].year, "1994");

    // Duplicates are allowed
    client
        .post_form("/", &[("title", title.as_str()), ("year", "1994")])
        .await;
    assert_eq!(client.movie_count().await, 2);

    assert!(client.get("/").await.body.contains("Item created."));
}

#[tokio::test]
async fn test_invalid_create_changes_nothing() {
    let mut client = spawn_app().await;
    client.login_as_admin().await;

    let long_title = "a".repeat(61);
    let cases: [&[(&str, &str)]; 5] = [
        &[("title", ""), ("year", "1994")],
        &[("title", "Leon"), ("year", "")],
        &[("title", long_title.as_str()), ("year", "1994")],
        &[("title", "Leon"), ("year", "19945")],
        &[("title", "Leon")],
    ];

    for fields in cases {
        let response = client.post_form("/", fields).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location.as_deref(), Some("/"));
        assert!(client.get("/").await.body.contains("Invalid input."));
    }

    assert_eq!(client.movie_count().await, 0);
}

#[tokio::test]
async fn test_edit_movie_changes_only_that_row() {
    let mut client = spawn_app().await;
    let store = client.state.store().clone();
    let first = store.add_movie("Leon", "1994").await.unwrap();
    let second = store.add_movie("Mahjong", "1996").await.unwrap();
    client.login_as_admin().await;

    let form = client.get(&format!("/movie/edit/{first}")).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("value=\"Leon\""));

    let response = client
        .post_form(
            &format!("/movie/edit/{first}"),
            &[("title", "Leon: The Professional"), ("year", "1994")],
        )
        .await;
    assert_eq!(response.location.as_deref(), Some("/"));
    assert!(client.get("/").await.body.contains("Item updated."));

    assert_eq!(client.movie_count().await, 2);
    let edited = store.get_movie(first).await.unwrap().unwrap();
    assert_eq!(edited.title, "Leon: The Professional");
    let other = store.get_movie(second).await.unwrap().unwrap();
    assert_eq!(other.title, "Mahjong");
    assert_eq!(other.year, "1996");
}

#[tokio::test]
async fn test_invalid_edit_returns_to_edit_page() {
    let mut client = spawn_app().await;
    let store = client.state.store().clone();
    let id = store.add_movie("Leon", "1994").await.unwrap();
    client.login_as_admin().await;

    let edit_path = format!("/movie/edit/{id}");
    let response = client
        .post_form(&edit_path, &[("title", ""), ("year", "1994")])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some(edit_path.as_str()));

    let page = client.get(&edit_path).await;
    assert!(page.body.contains("Invalid input."));
    assert_eq!(store.get_movie(id).await.unwrap().unwrap().title, "Leon");
}

#[tokio::test]
async fn test_edit_missing_movie_is_not_found() {
    let mut client = spawn_app().await;
    client.login_as_admin().await;

    let response = client.get("/movie/edit/42").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Page Not Found"));

    let response = client
        .post_form("/movie/edit/42", &[("title", "Leon"), ("year", "1994")])
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = client.get("/movie/edit/not-a-number").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(client.movie_count().await, 0);
}

#[tokio::test]
async fn test_delete_movie() {
    let mut client = spawn_app().await;
    let store = client.state.store().clone();
    let leon = store.add_movie("Leon", "1994").await.unwrap();
    store.add_movie("WALL-E", "2008").await.unwrap();
    client.login_as_admin().await;

    assert!(client.get("/").await.body.contains("Leon - 1994"));

    let response = client
        .post_form(&format!("/movie/delete/{leon}"), &[])
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));

    let page = client.get("/").await;
    assert!(page.body.contains("Item deleted."));
    assert!(!page.body.contains("Leon - 1994"));
    assert!(page.body.contains("WALL-E - 2008"));
    assert_eq!(client.movie_count().await, 1);

    let response = client.post_form("/movie/delete/999", &[]).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(client.movie_count().await, 1);
}

#[tokio::test]
async fn test_protected_routes_reject_anonymous_before_lookup() {
    let mut client = spawn_app().await;
    let id = client
        .state
        .store()
        .add_movie("Leon", "1994")
        .await
        .unwrap();

    let edit = client.get(&format!("/movie/edit/{id}")).await;
    assert_eq!(edit.status, StatusCode::UNAUTHORIZED);
    assert!(edit.body.contains("href=\"/login\""));

    // Unauthorized wins over not-found
    assert_eq!(
        client.get("/movie/edit/999").await.status,
        StatusCode::UNAUTHORIZED
    );

    let update = client
        .post_form(
            &format!("/movie/edit/{id}"),
            &[("title", "Hacked"), ("year", "2000")],
        )
        .await;
    assert_eq!(update.status, StatusCode::UNAUTHORIZED);

    let delete = client.post_form(&format!("/movie/delete/{id}"), &[]).await;
    assert_eq!(delete.status, StatusCode::UNAUTHORIZED);

    assert_eq!(client.get("/logout").await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        client.post_form("/settings", &[("name", "Eve")]).await.status,
        StatusCode::UNAUTHORIZED
    );

    let movie = client.state.store().get_movie(id).await.unwrap().unwrap();
    assert_eq!(movie.title, "Leon");
    assert_eq!(client.state.store().get_admin().await.unwrap().unwrap().name, "Admin");
}

#[tokio::test]
async fn test_settings_updates_display_name() {
    let mut client = spawn_app().await;
    client.login_as_admin().await;

    let page = client.get("/settings").await;
    assert!(page.body.contains("value=\"Admin\""));

    let response = client.post_form("/settings", &[("name", "Jimmy Ma")]).await;
    assert_eq!(response.location.as_deref(), Some("/"));

    let home = client.get("/").await;
    assert!(home.body.contains("Settings updated."));
    assert!(home.body.contains("Jimmy Ma's Watchlist"));

    let long_name = "a".repeat(21);
    for name in ["", long_name.as_str()] {
        let response = client.post_form("/settings", &[("name", name)]).await;
        assert_eq!(response.location.as_deref(), Some("/settings"));
        assert!(client.get("/settings").await.body.contains("Invalid input."));
    }

    let admin = client.state.store().get_admin().await.unwrap().unwrap();
    assert_eq!(admin.name, "Jimmy Ma");
}

#[tokio::test]
async fn test_logout_ends_session() {
    let mut client = spawn_app().await;
    client.login_as_admin().await;

    let response = client.get("/logout").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));

    let home = client.get("/").await;
    assert!(home.body.contains("Goodbye."));
    assert!(home.body.contains("href=\"/login\""));

    assert_eq!(client.get("/settings").await.status, StatusCode::UNAUTHORIZED);
    client.post_form("/", &[("title", "Leon"), ("year", "1994")]).await;
    assert_eq!(client.movie_count().await, 0);
}

#[tokio::test]
async fn test_unknown_path_renders_not_found_page() {
    let mut client = spawn_app().await;

    let response = client.get("/does/not/exist").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("Page Not Found - 404"));
    // Admin context is injected into error pages too
    assert!(response.body.contains("Admin's Watchlist"));
}

#[tokio::test]
async fn test_stylesheet_is_served() {
    let mut client = spawn_app().await;

    let response = client.get("/static/style.css").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("text/css"));
    assert!(response.body.contains(".movie-list"));

    let missing = client.get("/static/missing.css").await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stale_session_is_anonymous() {
    let mut client = spawn_app().await;
    client.login_as_admin().await;

    client.execute("DELETE FROM \"user\"").await;

    let home = client.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("href=\"/login\""));
    assert!(!home.body.contains("name=\"title\""));

    assert_eq!(client.get("/settings").await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_identity_failure_renders_error_page() {
    let mut client = spawn_app().await;
    client.login_as_admin().await;

    client.execute("DROP TABLE \"user\"").await;

    let response = client.get("/").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body.contains("Internal Server Error - 500"));
    assert!(!response.body.contains("no such table"));
}

#[tokio::test]
async fn test_anonymous_create_ignores_body_format() {
    let mut client = spawn_app().await;

    for content_type in [None, Some("text/plain"), Some("application/json")] {
        let response = client
            .post_raw("/", content_type, r#"{"title":"Leon","year":"1994"}"#)
            .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location.as_deref(), Some("/"));
    }

    assert_eq!(client.movie_count().await, 0);
}

#[tokio::test]
async fn test_unreadable_create_body_is_invalid_input() {
    let mut client = spawn_app().await;
    client.login_as_admin().await;

    let response = client.post_raw("/", None, "title=Leon&year=1994").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.location.as_deref(), Some("/"));

    assert!(client.get("/").await.body.contains("Invalid input."));
    assert_eq!(client.movie_count().await, 0);
}
