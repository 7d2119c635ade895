use axum::http::StatusCode;
use chrono::{Datelike, NaiveDate, Utc};
use fitlink::api;
use fitlink::config::Config;
use fitlink::db::init_db;
use fitlink::domain::{GeoPoint, SwipeAction, Trainer, TrainerService, TrainerSwipe};
use fitlink::providers::{Geocoder, MockGeocoder, MockRatingsProvider, RatingsProvider};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use uuid::Uuid;

struct TestApp {
    app: axum::Router,
    repo: Arc<fitlink::Repository>,
    _temp: TempDir,
}

async fn setup_test_app(
    ratings: Arc<dyn RatingsProvider>,
    geocoder: Arc<dyn Geocoder>,
    discovery_limit: usize,
) -> TestApp {
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
        discovery_limit,
        conditioning_window_days: 90,
        week_streak_target: 5,
    };

    let state = api::AppState::new(repo.clone(), &config, ratings, geocoder);
    let app = api::create_router(state);

    TestApp {
        app,
        repo,
        _temp: temp_dir,
    }
}

async fn seed_trainer(
    repo: &fitlink::Repository,
    name: &str,
    gender: &str,
    birth_date: NaiveDate,
    services: &[&str],
) -> Trainer {
    let trainer = Trainer {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        name: name.to_string(),
        cref: "098765-G/MG".to_string(),
        gender: gender.to_string(),
        birth_date,
    };
    repo.insert_trainer(&trainer).await.unwrap();

    for service_name in services {
        let service = TrainerService {
            id: Uuid::new_v4(),
            trainer_id: trainer.id,
            name: service_name.to_string(),
            price: Decimal::from_str("200.00").unwrap(),
            duration_weeks: 8,
        };
        repo.insert_service(&service).await.unwrap();
    }

    trainer
}

// January 1st keeps the birthday behind today, so the age is exact.
fn born(age: i32) -> NaiveDate {
    let today = Utc::now().date_naive();
    NaiveDate::from_ymd_opt(today.year() - age, 1, 1).unwrap()
}

async fn discover(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("GET")
        .uri(uri)
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

fn names(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_swiped_trainers_are_excluded() {
    let test_app = setup_test_app(
        Arc::new(MockRatingsProvider::new()),
        Arc::new(MockGeocoder::new()),
        20,
    )
    .await;
    let user_id = Uuid::new_v4();

    let kept = seed_trainer(&test_app.repo, "Helena", "female", born(30), &["pilates"]).await;
    let liked = seed_trainer(&test_app.repo, "Igor", "male", born(35), &["crossfit"]).await;
    let skipped = seed_trainer(&test_app.repo, "Julia", "female", born(28), &["yoga"]).await;

    for (trainer, action) in [(&liked, SwipeAction::Like), (&skipped, SwipeAction::Skip)] {
        let swipe = TrainerSwipe::new(user_id, trainer.id, action, Utc::now());
        test_app.repo.insert_swipe(&swipe).await.unwrap();
    }

    let (status, body) = discover(
        test_app.app,
        &format!("/v1/trainers/discover?user={}", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec![kept.name]);
}

#[tokio::test]
async fn test_gender_and_age_filters() {
    let test_app = setup_test_app(
        Arc::new(MockRatingsProvider::new()),
        Arc::new(MockGeocoder::new()),
        20,
    )
    .await;
    let user_id = Uuid::new_v4();

    seed_trainer(&test_app.repo, "Karen", "female", born(30), &["pilates"]).await;
    seed_trainer(&test_app.repo, "Lucas", "male", born(30), &["pilates"]).await;
    seed_trainer(&test_app.repo, "Marta", "female", born(55), &["pilates"]).await;

    let (status, body) = discover(
        test_app.app,
        &format!(
            "/v1/trainers/discover?user={}&gender=female&minAge=25&maxAge=40",
            user_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Karen".to_string()]);
}

#[tokio::test]
async fn test_workout_type_filter_is_case_insensitive() {
    let test_app = setup_test_app(
        Arc::new(MockRatingsProvider::new()),
        Arc::new(MockGeocoder::new()),
        20,
    )
    .await;
    let user_id = Uuid::new_v4();

    seed_trainer(&test_app.repo, "Nina", "female", born(30), &["CrossFit"]).await;
    seed_trainer(&test_app.repo, "Otavio", "male", born(30), &["yoga"]).await;

    let (status, body) = discover(
        test_app.app,
        &format!(
            "/v1/trainers/discover?user={}&workoutTypes=crossfit,swimming",
            user_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Nina".to_string()]);
}

#[tokio::test]
async fn test_distance_ordering_and_radius() {
    let near_id;
    let far_id;
    let test_app = {
        let near = Uuid::new_v4();
        let far = Uuid::new_v4();
        near_id = near;
        far_id = far;
        // Sao Paulo and Rio, roughly 360 km apart.
        let geocoder = MockGeocoder::new()
            .with_location(near, GeoPoint::new(-23.56, -46.64))
            .with_location(far, GeoPoint::new(-22.9068, -43.1729));
        setup_test_app(
            Arc::new(MockRatingsProvider::new()),
            Arc::new(geocoder),
            20,
        )
        .await
    };
    let user_id = Uuid::new_v4();

    for (id, name) in [(far_id, "Paula"), (near_id, "Rafael")] {
        let trainer = Trainer {
            id,
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            cref: "011111-G/SP".to_string(),
            gender: "male".to_string(),
            birth_date: born(30),
        };
        test_app.repo.insert_trainer(&trainer).await.unwrap();
    }
    // No coordinates on file for this one; it ranks after known distances.
    seed_trainer(&test_app.repo, "Sandra", "female", born(30), &[]).await;

    let (status, body) = discover(
        test_app.app.clone(),
        &format!(
            "/v1/trainers/discover?user={}&lat=-23.5505&lon=-46.6333",
            user_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        names(&body),
        vec![
            "Rafael".to_string(),
            "Paula".to_string(),
            "Sandra".to_string()
        ]
    );
    assert!(body[0]["distanceKm"].as_f64().unwrap() < 5.0);
    assert!(body[2].get("distanceKm").is_none());

    // Radius drops known-far trainers but keeps unknown distances.
    let (status, body) = discover(
        test_app.app,
        &format!(
            "/v1/trainers/discover?user={}&lat=-23.5505&lon=-46.6333&radiusKm=50",
            user_id
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["Rafael".to_string(), "Sandra".to_string()]);
}

#[tokio::test]
async fn test_ratings_decorate_cards() {
    let rated = Uuid::new_v4();
    let ratings = MockRatingsProvider::new().with_rating(rated, 4.7);
    let test_app = setup_test_app(Arc::new(ratings), Arc::new(MockGeocoder::new()), 20).await;
    let user_id = Uuid::new_v4();

    let trainer = Trainer {
        id: rated,
        user_id: Uuid::new_v4(),
        name: "Tania".to_string(),
        cref: "022222-G/SP".to_string(),
        gender: "female".to_string(),
        birth_date: born(30),
    };
    test_app.repo.insert_trainer(&trainer).await.unwrap();
    seed_trainer(&test_app.repo, "Ulisses", "male", born(30), &[]).await;

    let (status, body) = discover(
        test_app.app,
        &format!("/v1/trainers/discover?user={}", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let cards = body.as_array().unwrap();
    let tania = cards.iter().find(|c| c["name"] == "Tania").unwrap();
    assert_eq!(tania["averageRating"], 4.7);
    let ulisses = cards.iter().find(|c| c["name"] == "Ulisses").unwrap();
    assert!(ulisses.get("averageRating").is_none());
}

#[tokio::test]
async fn test_result_capped_at_configured_limit() {
    let test_app = setup_test_app(
        Arc::new(MockRatingsProvider::new()),
        Arc::new(MockGeocoder::new()),
        2,
    )
    .await;
    let user_id = Uuid::new_v4();

    for name in ["Vera", "Wagner", "Ximena", "Yuri"] {
        seed_trainer(&test_app.repo, name, "female", born(30), &[]).await;
    }

    let (status, body) = discover(
        test_app.app,
        &format!("/v1/trainers/discover?user={}", user_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_lone_latitude_is_rejected() {
    let test_app = setup_test_app(
        Arc::new(MockRatingsProvider::new()),
        Arc::new(MockGeocoder::new()),
        20,
    )
    .await;

    let (status, _body) = discover(
        test_app.app,
        &format!("/v1/trainers/discover?user={}&lat=-23.55", Uuid::new_v4()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
