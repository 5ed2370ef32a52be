//! Content catalog integration tests: public reads vs admin CRUD.
//!
//! Run with: `cargo test -p makeuslive-api --test content_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::auth::{bearer, login_admin};
use helpers::fixtures::post_input;
use helpers::{api_path, setup_test_app};

#[tokio::test]
async fn test_public_list_hides_unpublished_posts() {
    let app = setup_test_app().await;
    let client = app.client();
    let token = login_admin(client).await;

    for (slug, published) in [("published-post", true), ("draft-post", false)] {
        let response = client
            .post(&api_path("/admin/posts"))
            .add_header("Authorization", bearer(&token))
            .json(&post_input(slug, published))
            .await;
        assert_eq!(response.status_code(), 201);
    }

    let response = client.get(&api_path("/posts")).await;
    assert_eq!(response.status_code(), 200);
    let posts = response.json::<serde_json::Value>();
    let slugs: Vec<&str> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["published-post"]);

    // Admin list sees both
    let response = client
        .get(&api_path("/admin/posts"))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.json::<serde_json::Value>().as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_get_post_by_slug() {
    let app = setup_test_app().await;
    let client = app.client();
    let token = login_admin(client).await;

    client
        .post(&api_path("/admin/posts"))
        .add_header("Authorization", bearer(&token))
        .json(&post_input("hello-world", true))
        .await;

    let response = client.get(&api_path("/posts/hello-world")).await;
    assert_eq!(response.status_code(), 200);
    let post = response.json::<serde_json::Value>();
    assert_eq!(post["title"], "Designing for motion");
    assert!(post["published_at"].is_string(), "publishing stamps published_at");

    let response = client.get(&api_path("/posts/no-such-post")).await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_duplicate_slug_conflicts() {
    let app = setup_test_app().await;
    let client = app.client();
    let token = login_admin(client).await;

    let first = client
        .post(&api_path("/admin/posts"))
        .add_header("Authorization", bearer(&token))
        .json(&post_input("same-slug", true))
        .await;
    assert_eq!(first.status_code(), 201);

    let second = client
        .post(&api_path("/admin/posts"))
        .add_header("Authorization", bearer(&token))
        .json(&post_input("same-slug", false))
        .await;
    assert_eq!(second.status_code(), 409);
}

#[tokio::test]
async fn test_invalid_slug_rejected() {
    let app = setup_test_app().await;
    let client = app.client();
    let token = login_admin(client).await;

    let response = client
        .post(&api_path("/admin/posts"))
        .add_header("Authorization", bearer(&token))
        .json(&post_input("Not A Slug", true))
        .await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_update_is_full_replacement_and_delete_works() {
    let app = setup_test_app().await;
    let client = app.client();
    let token = login_admin(client).await;

    let created = client
        .post(&api_path("/admin/posts"))
        .add_header("Authorization", bearer(&token))
        .json(&post_input("replace-me", false))
        .await
        .json::<serde_json::Value>();
    let id = created["id"].as_str().unwrap().to_string();

    let mut replacement = post_input("replaced", true);
    replacement["title"] = serde_json::json!("New title");
    let response = client
        .put(&api_path(&format!("/admin/posts/{}", id)))
        .add_header("Authorization", bearer(&token))
        .json(&replacement)
        .await;
    assert_eq!(response.status_code(), 200);
    let updated = response.json::<serde_json::Value>();
    assert_eq!(updated["slug"], "replaced");
    assert_eq!(updated["title"], "New title");
    assert_eq!(updated["published"], true);

    let response = client
        .delete(&api_path(&format!("/admin/posts/{}", id)))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), 204);

    let response = client
        .delete(&api_path(&format!("/admin/posts/{}", id)))
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_tag_filter_on_public_list() {
    let app = setup_test_app().await;
    let client = app.client();
    let token = login_admin(client).await;

    let mut tagged = post_input("tagged-post", true);
    tagged["tags"] = serde_json::json!(["webgl"]);
    client
        .post(&api_path("/admin/posts"))
        .add_header("Authorization", bearer(&token))
        .json(&tagged)
        .await;
    client
        .post(&api_path("/admin/posts"))
        .add_header("Authorization", bearer(&token))
        .json(&post_input("untagged-post", true))
        .await;

    let response = client.get(&format!("{}?tag=webgl", api_path("/posts"))).await;
    let posts = response.json::<serde_json::Value>();
    let slugs: Vec<&str> = posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["tagged-post"]);
}
