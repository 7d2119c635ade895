use axum::http::StatusCode;
use fitlink::api;
use fitlink::config::Config;
use fitlink::db::init_db;
use fitlink::providers::{NoGeocoder, NoRatings};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use uuid::Uuid;

struct TestApp {
    app: axum::Router,
    _temp: TempDir,
}

async fn setup_test_app(week_streak_target: i64) -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir
        .path()
        .join("test.db")
        .to_string_lossy()
        .to_string();
    let pool = init_db(&db_path).await.expect("init_db failed");
    let repo = Arc::new(fitlink::Repository::new(pool));

    let config = Config {
        port: 0,
        database_path: db_path,
        ratings_api_url: None,
        discovery_limit: 20,
        conditioning_window_days: 90,
        week_streak_target,
    };

    let state = api::AppState::new(repo, &config, Arc::new(NoRatings), Arc::new(NoGeocoder));
    let app = api::create_router(state);

    TestApp {
        app,
        _temp: temp_dir,
    }
}

async fn post_workout(app: axum::Router, user_id: Uuid) -> StatusCode {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/v1/workouts")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({"user": user_id.to_string()}).to_string(),
        ))
        .unwrap();

    app.oneshot(req).await.unwrap().status()
}

async fn get_achievements(app: axum::Router, user_id: Uuid) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(format!("/v1/achievements?user={}", user_id))
        .body(axum::body::Body::empty())
        .unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn kinds(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|a| a["kind"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_first_workout_unlocks_once() {
    let test_app = setup_test_app(5).await;
    let user_id = Uuid::new_v4();

    assert_eq!(
        post_workout(test_app.app.clone(), user_id).await,
        StatusCode::CREATED
    );

    let (status, body) = get_achievements(test_app.app.clone(), user_id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kinds(&body), vec!["FIRST_WORKOUT".to_string()]);

    // More workouts below the streak target never duplicate the unlock.
    assert_eq!(
        post_workout(test_app.app.clone(), user_id).await,
        StatusCode::CREATED
    );
    let (_status, body) = get_achievements(test_app.app, user_id).await;
    assert_eq!(
        kinds(&body)
            .iter()
            .filter(|k| *k == "FIRST_WORKOUT")
            .count(),
        1
    );
}

#[tokio::test]
async fn test_week_streak_unlocks_at_target() {
    let test_app = setup_test_app(3).await;
    let user_id = Uuid::new_v4();

    for _ in 0..2 {
        post_workout(test_app.app.clone(), user_id).await;
    }
    let (_status, body) = get_achievements(test_app.app.clone(), user_id).await;
    assert!(!kinds(&body).contains(&"WEEK_STREAK".to_string()));

    post_workout(test_app.app.clone(), user_id).await;
    let (_status, body) = get_achievements(test_app.app, user_id).await;

    let listed = kinds(&body);
    assert!(listed.contains(&"WEEK_STREAK".to_string()));
    assert!(listed.contains(&"FIRST_WORKOUT".to_string()));

    let streak = body
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["kind"] == "WEEK_STREAK")
        .unwrap();
    assert_eq!(streak["metadata"]["target"], 3);
}

#[tokio::test]
async fn test_week_streak_not_duplicated_past_target() {
    let test_app = setup_test_app(2).await;
    let user_id = Uuid::new_v4();

    for _ in 0..4 {
        post_workout(test_app.app.clone(), user_id).await;
    }

    let (_status, body) = get_achievements(test_app.app, user_id).await;
    assert_eq!(
        kinds(&body)
            .iter()
            .filter(|k| *k == "WEEK_STREAK")
            .count(),
        1
    );
}

#[tokio::test]
async fn test_achievements_are_per_user() {
    let test_app = setup_test_app(5).await;
    let athlete = Uuid::new_v4();
    let bystander = Uuid::new_v4();

    post_workout(test_app.app.clone(), athlete).await;

    let (_status, body) = get_achievements(test_app.app, bystander).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_completing_workout_triggers_evaluation() {
    let test_app = setup_test_app(5).await;
    let user_id = Uuid::new_v4();

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/v1/workouts")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({"user": user_id.to_string()}).to_string(),
        ))
        .unwrap();
    let resp = test_app.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let created: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let workout_id = created["id"].as_str().unwrap();

    let req = axum::http::Request::builder()
        .method("POST")
        .uri(format!("/v1/workouts/{}/complete", workout_id))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({"user": user_id.to_string()}).to_string(),
        ))
        .unwrap();
    let resp = test_app.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let (_status, body) = get_achievements(test_app.app, user_id).await;
    assert!(kinds(&body).contains(&"FIRST_WORKOUT".to_string()));
}

#[tokio::test]
async fn test_completing_unknown_workout_is_not_found() {
    let test_app = setup_test_app(5).await;

    let req = axum::http::Request::builder()
        .method("POST")
        .uri(format!("/v1/workouts/{}/complete", Uuid::new_v4()))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({"user": Uuid::new_v4().to_string()}).to_string(),
        ))
        .unwrap();
    let resp = test_app.app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
