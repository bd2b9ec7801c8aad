mod helpers;
use helpers::{envelope, page, post_json, TestApp};
use inkpost_client::paging::{Mode, PagedList};
use inkpost_common::api::{Post, UserAdmin};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_feed_page(app: &TestApp, index: u32, titles: &[&str], total_pages: u32) {
    let content = titles.iter().map(|t| post_json(t)).collect();
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .and(query_param("page", index.to_string().as_str()))
        .and(query_param("size", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(page(content, total_pages, 5, index))),
        )
        .expect(1)
        .mount(&app.server)
        .await;
}

fn titles(posts: &[Post]) -> Vec<String> {
    posts.iter().map(|p| p.title.clone()).collect()
}

#[tokio::test]
async fn feed_appends_pages_in_order() {
    let app = TestApp::spawn().await;
    mount_feed_page(&app, 0, &["a", "b"], 2).await;
    mount_feed_page(&app, 1, &["c", "d", "e"], 2).await;

    let feed: PagedList<Post> = PagedList::new(Mode::Append, 3);
    let posts = &app.resources.posts;

    assert!(feed.load_more(|q| posts.list(q)).await.unwrap());
    assert!(feed.has_more());
    assert!(feed.load_more(|q| posts.list(q)).await.unwrap());

    assert_eq!(titles(&feed.items()), ["a", "b", "c", "d", "e"]);
    assert!(!feed.has_more());
    // Past the last page nothing is requested.
    assert!(!feed.load_more(|q| posts.list(q)).await.unwrap());
}

#[tokio::test]
async fn empty_feed_stops_after_first_page() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(page(vec![], 0, 0, 0))))
        .expect(1)
        .mount(&app.server)
        .await;

    let feed: PagedList<Post> = PagedList::new(Mode::Append, 10);
    let posts = &app.resources.posts;

    assert!(feed.load_more(|q| posts.list(q)).await.unwrap());
    assert!(!feed.has_more());
    assert!(!feed.load_more(|q| posts.list(q)).await.unwrap());
    assert!(!feed.load_more(|q| posts.list(q)).await.unwrap());
    assert!(feed.items().is_empty());
    assert_eq!(feed.with(|f| f.page()), 1);
}

#[tokio::test]
async fn concurrent_load_more_sends_one_request() {
    let app = TestApp::spawn().await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(page(vec![post_json("only")], 1, 1, 0)))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    let feed: PagedList<Post> = PagedList::new(Mode::Append, 10);
    let posts = &app.resources.posts;
    let (first, second) = tokio::join!(
        feed.load_more(|q| posts.list(q)),
        feed.load_more(|q| posts.list(q)),
    );

    assert!(first.unwrap());
    assert!(!second.unwrap());
    assert_eq!(feed.items().len(), 1);
}

#[tokio::test]
async fn failed_page_keeps_loaded_items() {
    let app = TestApp::spawn().await;
    mount_feed_page(&app, 0, &["a", "b", "c"], 2).await;
    Mock::given(method("GET"))
        .and(path("/api/posts"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let feed: PagedList<Post> = PagedList::new(Mode::Append, 3);
    let posts = &app.resources.posts;
    feed.load_more(|q| posts.list(q)).await.unwrap();

    let err = feed.load_more(|q| posts.list(q)).await.unwrap_err();
    assert!(err.status().is_some_and(|s| s.is_server_error()));
    assert_eq!(titles(&feed.items()), ["a", "b", "c"]);
    assert!(!feed.is_loading());
}

fn admin_user(name: &str) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "username": name,
        "email": format!("{name}@example.com"),
        "role": "USER",
        "status": "ACTIVE",
        "postCount": 1
    })
}

#[tokio::test]
async fn admin_table_replaces_pages() {
    let app = TestApp::spawn_logged_in().await.0;
    for (index, names) in [(0u32, ["ann", "bob"]), (1, ["cid", "dee"])] {
        let content = names.iter().map(|n| admin_user(n)).collect();
        Mock::given(method("GET"))
            .and(path("/api/admin/users"))
            .and(query_param("page", index.to_string().as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(envelope(page(content, 2, 4, index))),
            )
            .mount(&app.server)
            .await;
    }

    let table: PagedList<UserAdmin> = PagedList::new(Mode::Replace, 2);
    let admin = &app.resources.admin;

    table.fetch_page(0, |q| admin.users(q)).await.unwrap();
    table.load_more(|q| admin.users(q)).await.unwrap();

    let names: Vec<_> = table.items().into_iter().map(|u| u.username).collect();
    assert_eq!(names, ["cid", "dee"]);
    assert!(table.with(|t| t.has_previous() && !t.has_next()));

    table.fetch_page(0, |q| admin.users(q)).await.unwrap();
    let names: Vec<_> = table.items().into_iter().map(|u| u.username).collect();
    assert_eq!(names, ["ann", "bob"]);
}
