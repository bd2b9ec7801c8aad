mod helpers;
use helpers::TestApp;
use inkpost_client::toggle::{LikeMap, SubscriptionMap};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn like_toggle_follows_backend_counts() {
    let (app, _) = TestApp::spawn_logged_in().await;
    let post_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/posts/{post_id}/likes/status")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "liked": false,
            "likeCount": 5
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/posts/{post_id}/likes")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "liked": true,
            "likeCount": 6
        })))
        .up_to_n_times(1)
        .mount(&app.server)
        .await;

    let social = &app.resources.social;
    let likes: LikeMap<Uuid> = LikeMap::new();

    likes.check_status(post_id, |id| social.like_status(id)).await;
    assert_eq!(likes.status(&post_id).map(|s| s.like_count), Some(5));
    assert!(!likes.is_active(&post_id));

    let after = likes
        .toggle(post_id, |id| social.toggle_like(id))
        .await
        .unwrap()
        .unwrap();
    assert!(after.liked);
    assert_eq!(after.like_count, 6);

    Mock::given(method("POST"))
        .and(path(format!("/api/posts/{post_id}/likes")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "liked": false,
            "likeCount": 5
        })))
        .mount(&app.server)
        .await;

    likes
        .toggle(post_id, |id| social.toggle_like(id))
        .await
        .unwrap();
    assert!(!likes.is_active(&post_id));
    assert_eq!(likes.status(&post_id).map(|s| s.like_count), Some(5));
}

#[tokio::test]
async fn failed_status_check_renders_inactive() {
    let (app, _) = TestApp::spawn_logged_in().await;
    let post_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path(format!("/api/posts/{post_id}/likes/status")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let social = &app.resources.social;
    let likes: LikeMap<Uuid> = LikeMap::new();
    likes.check_status(post_id, |id| social.like_status(id)).await;

    assert!(likes.status(&post_id).is_none());
    assert!(!likes.is_active(&post_id));
    assert!(app.session.is_logged_in());
}

#[tokio::test]
async fn subscribe_toggle_stores_counts() {
    let (app, _) = TestApp::spawn_logged_in().await;
    let author = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/api/subscriptions/{author}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subscribed": true,
            "subscriberCount": 11,
            "subscriptionCount": 3
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let subscriptions = &app.resources.subscriptions;
    let follows: SubscriptionMap<Uuid> = SubscriptionMap::new();
    let status = follows
        .toggle(author, |id| subscriptions.toggle(id))
        .await
        .unwrap()
        .unwrap();

    assert!(status.subscribed);
    assert_eq!(status.subscriber_count, 11);
    assert!(follows.is_active(&author));
}

#[tokio::test]
async fn failed_toggle_keeps_prior_status() {
    let (app, _) = TestApp::spawn_logged_in().await;
    let author = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/api/subscriptions/{author}")))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Cannot subscribe to yourself" })),
        )
        .mount(&app.server)
        .await;

    let subscriptions = &app.resources.subscriptions;
    let follows: SubscriptionMap<Uuid> = SubscriptionMap::new();
    let err = follows
        .toggle(author, |id| subscriptions.toggle(id))
        .await
        .unwrap_err();

    assert_eq!(err.notice(), "Cannot subscribe to yourself");
    assert!(follows.status(&author).is_none());
    assert!(!follows.is_pending(&author));
}
