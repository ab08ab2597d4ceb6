use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use super::{MAX_BODY_BYTES, configure_routes};
use crate::state::AppState;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {
        test::call_service($app, $req.to_request()).await
    };
}

macro_rules! create {
    ($app:expr, $author:expr, $title:expr) => {{
        let resp = send!(
            $app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({ "author_id": $author, "title": $title, "body": "text" }))
        );
        assert_eq!(resp.status(), StatusCode::CREATED);
        let post: Value = test::read_body_json(resp).await;
        post["id"].as_i64().unwrap()
    }};
}

fn ids(posts: &Value) -> Vec<i64> {
    posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect()
}

#[actix_web::test]
async fn test_create_returns_trimmed_post() {
    let app = app!();

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({ "author_id": 7, "title": "  Hello  ", "body": " world \n" }))
    );
    assert_eq!(resp.status(), StatusCode::CREATED);

    let post: Value = test::read_body_json(resp).await;
    assert_eq!(
        post,
        json!({ "id": 1, "author_id": 7, "title": "Hello", "body": "world" })
    );
}

#[actix_web::test]
async fn test_created_ids_keep_growing() {
    let app = app!();
    let first = create!(&app, 1, "a");
    let second = create!(&app, 2, "b");
    assert!(second > first);

    let resp = send!(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/posts/{second}"))
            .set_json(json!({ "author_id": 2 }))
    );
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let third = create!(&app, 3, "c");
    assert!(third > second);
}

#[actix_web::test]
async fn test_create_accepts_string_author_id_without_json_content_type() {
    let app = app!();

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_payload(r#"{"author_id": " 12 ", "title": "t", "body": ""}"#)
    );
    assert_eq!(resp.status(), StatusCode::CREATED);

    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["author_id"], 12);
    assert_eq!(post["body"], "");
}

#[actix_web::test]
async fn test_create_lists_every_missing_field() {
    let app = app!();

    for (payload, message) in [
        (json!({}), "Missing fields: author_id, title, body"),
        (json!({ "title": "x" }), "Missing fields: author_id, body"),
        (json!({ "author_id": 1, "title": "x" }), "Missing fields: body"),
        (json!([1, 2, 3]), "Missing fields: author_id, title, body"),
    ] {
        let resp = send!(
            &app,
            test::TestRequest::post().uri("/posts").set_json(&payload)
        );
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "error": "MissingFields", "message": message }));
    }
}

#[actix_web::test]
async fn test_blank_title_is_rejected_and_nothing_is_stored() {
    let app = app!();

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({ "author_id": 7, "title": "  ", "body": "text" }))
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "EmptyTitle");

    let resp = send!(&app, test::TestRequest::get().uri("/posts"));
    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(posts, json!([]));
}

#[actix_web::test]
async fn test_create_rejects_bad_author_id_and_malformed_json() {
    let app = app!();

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({ "author_id": "seven", "title": "t", "body": "b" }))
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "InvalidAuthorId");

    let resp = send!(
        &app,
        test::TestRequest::post().uri("/posts").set_payload("{oops")
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "MalformedBody");
}

#[actix_web::test]
async fn test_owner_can_edit() {
    let app = app!();
    let id = create!(&app, 7, "Before");

    let resp = send!(
        &app,
        test::TestRequest::put()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({ "author_id": "7", "title": " After ", "body": " new " }))
    );
    assert_eq!(resp.status(), StatusCode::OK);

    let post: Value = test::read_body_json(resp).await;
    assert_eq!(
        post,
        json!({ "id": id, "author_id": 7, "title": "After", "body": "new" })
    );
}

#[actix_web::test]
async fn test_edit_by_other_author_is_forbidden_and_leaves_post_alone() {
    let app = app!();
    let id = create!(&app, 7, "Mine");

    let resp = send!(
        &app,
        test::TestRequest::put()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({ "author_id": 8, "title": "Stolen", "body": "x" }))
    );
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "error": "Forbidden", "message": "You can only edit your own posts." })
    );

    let resp = send!(&app, test::TestRequest::get().uri("/posts"));
    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(posts[0]["title"], "Mine");
    assert_eq!(posts[0]["body"], "text");
}

#[actix_web::test]
async fn test_edit_of_missing_post_is_not_found_for_any_author() {
    let app = app!();
    create!(&app, 7, "Exists");

    for payload in [
        json!({ "author_id": 7, "title": "t", "body": "b" }),
        json!({ "author_id": 99, "title": "t", "body": "b" }),
        json!({}),
    ] {
        let resp = send!(
            &app,
            test::TestRequest::put().uri("/posts/404").set_json(&payload)
        );
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "error": "NotFound", "message": "Post not found." })
        );
    }
}

#[actix_web::test]
async fn test_edit_validates_fields_and_title() {
    let app = app!();
    let id = create!(&app, 7, "Keep");

    let resp = send!(
        &app,
        test::TestRequest::put()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({ "author_id": 7 }))
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Missing fields: title, body");

    let resp = send!(
        &app,
        test::TestRequest::put()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({ "author_id": 7, "title": "\t", "body": "changed" }))
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "EmptyTitle");

    let resp = send!(&app, test::TestRequest::get().uri("/posts/mine/7"));
    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(posts[0]["title"], "Keep");
    assert_eq!(posts[0]["body"], "text");
}

#[actix_web::test]
async fn test_ownership_is_checked_before_title() {
    let app = app!();
    let id = create!(&app, 7, "Mine");

    let resp = send!(
        &app,
        test::TestRequest::put()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({ "author_id": 8, "title": " ", "body": "" }))
    );
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_delete_removes_post_once() {
    let app = app!();
    let keep = create!(&app, 7, "keep");
    let gone = create!(&app, 7, "gone");

    let delete = || {
        test::TestRequest::delete()
            .uri(&format!("/posts/{gone}"))
            .set_json(json!({ "author_id": 7 }))
    };

    let resp = send!(&app, delete());
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(resp).await.is_empty());

    let resp = send!(&app, test::TestRequest::get().uri("/posts"));
    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(ids(&posts), vec![keep]);

    let resp = send!(&app, delete());
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NotFound");
}

#[actix_web::test]
async fn test_delete_checks_author_id_then_existence_then_owner() {
    let app = app!();
    let id = create!(&app, 7, "mine");

    // No body at all: author_id is missing even though the post does not exist
    let resp = send!(&app, test::TestRequest::delete().uri("/posts/999"));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "error": "MissingFields", "message": "Missing fields: author_id" })
    );

    let resp = send!(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({ "author_id": [7] }))
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "InvalidAuthorId");

    let resp = send!(
        &app,
        test::TestRequest::delete()
            .uri("/posts/999")
            .set_json(json!({ "author_id": 8 }))
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send!(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({ "author_id": 8 }))
    );
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "You can only delete your own posts.");

    let resp = send!(&app, test::TestRequest::get().uri("/posts"));
    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(ids(&posts), vec![id]);
}

#[actix_web::test]
async fn test_list_mine_is_newest_first() {
    let app = app!();
    for title in ["one", "two", "three"] {
        create!(&app, 7, title);
    }
    create!(&app, 8, "someone else");

    let resp = send!(&app, test::TestRequest::get().uri("/posts/mine/7"));
    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(ids(&posts), vec![3, 2, 1]);
    assert_eq!(posts[0]["title"], "three");

    let resp = send!(&app, test::TestRequest::get().uri("/posts/mine/42"));
    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(posts, json!([]));
}

#[actix_web::test]
async fn test_list_all_is_newest_first() {
    let app = app!();
    create!(&app, 1, "a");
    create!(&app, 2, "b");
    create!(&app, 1, "c");

    let resp = send!(&app, test::TestRequest::get().uri("/posts"));
    assert_eq!(resp.status(), StatusCode::OK);
    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(ids(&posts), vec![3, 2, 1]);
}

#[actix_web::test]
async fn test_routing_failures_are_json() {
    let app = app!();

    let resp = send!(
        &app,
        test::TestRequest::put()
            .uri("/posts/abc")
            .set_json(json!({ "author_id": 1, "title": "t", "body": "b" }))
    );
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NotFound");

    for (method, uri) in [
        ("GET", "/posts/abc"),
        ("POST", "/posts/abc"),
        ("GET", "/posts/mine/abc"),
        ("GET", "/posts/mine"),
        ("PUT", "/posts/99999999999999999999"),
    ] {
        let req = test::TestRequest::default()
            .method(method.parse().unwrap())
            .uri(uri)
            .set_json(json!({ "author_id": 1, "title": "t", "body": "b" }));
        let resp = send!(&app, req);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{method} {uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "NotFound", "{method} {uri}");
    }

    let resp = send!(&app, test::TestRequest::get().uri("/nowhere"));
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "NotFound");

    let resp = send!(&app, test::TestRequest::patch().uri("/posts/1"));
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "MethodNotAllowed");
}

#[actix_web::test]
async fn test_health_check() {
    let app = app!();

    let resp = send!(&app, test::TestRequest::get().uri("/health"));
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_long_body_within_limit_is_accepted() {
    let app = app!();
    let text = "x".repeat(300 * 1024);

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({ "author_id": 7, "title": "Long", "body": text }))
    );
    assert_eq!(resp.status(), StatusCode::CREATED);
    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["body"].as_str().unwrap().len(), 300 * 1024);
}

#[actix_web::test]
async fn test_oversized_body_is_rejected_as_json() {
    let app = app!();
    let text = "x".repeat(MAX_BODY_BYTES + 1);

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({ "author_id": 7, "title": "Huge", "body": text }))
    );
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "PayloadTooLarge");
    assert!(body["message"].is_string());

    let resp = send!(&app, test::TestRequest::get().uri("/posts"));
    let posts: Value = test::read_body_json(resp).await;
    assert_eq!(posts, json!([]));
}

#[actix_web::test]
async fn test_oversized_delete_body_counts_as_empty() {
    let app = app!();
    let id = create!(&app, 7, "mine");
    let padding = "x".repeat(MAX_BODY_BYTES + 1);

    let resp = send!(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/posts/{id}"))
            .set_json(json!({ "author_id": 7, "padding": padding }))
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "error": "MissingFields", "message": "Missing fields: author_id" })
    );
}
