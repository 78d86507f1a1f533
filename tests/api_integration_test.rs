use forms_gateway::adapters::mailer::NoopMailer;
use forms_gateway::adapters::store::MemoryStore;
use forms_gateway::config::AppConfig;
use forms_gateway::http::AppState;
use std::sync::Arc;

async fn spawn_app(config: AppConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store, Arc::new(NoopMailer), &config);
    let app = forms_gateway::router(state, &config).unwrap();
    tokio::spawn(forms_gateway::serve(listener, app));

    format!("http://{}", addr)
}

fn roi_payload() -> serde_json::Value {
    serde_json::json!({
        "email": "cfo@example.com",
        "phoneNumber": "+4512345678",
        "numEmployees": 100,
        "avgAnnualSalary": 600000,
        "annualRevenue": 50000000,
        "employeesWhoLeft": 10,
        "avgExtraAbsenteeismDaysPerEmployee": 5,
        "engagementScore": 6
    })
}

#[tokio::test]
async fn test_health_endpoint() {
    let base_url = spawn_app(AppConfig::default()).await;

    let response = reqwest::get(format!("{}/health", base_url)).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_contact_submission_end_to_end() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/contact", base_url))
        .json(&serde_json::json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "company": "Acme",
            "message": "Tell me more about the product"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert!(body.get("result").is_none());

    // The submission is listed afterwards, newest first
    let listing: serde_json::Value = client
        .get(format!("{}/api/submissions/contact", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["success"], true);
    assert_eq!(listing["result"]["total"], 1);
    assert_eq!(
        listing["result"]["items"][0]["payload"]["email"],
        "jane@example.com"
    );
}

#[tokio::test]
async fn test_roi_submission_returns_computed_result() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/roi", base_url))
        .json(&roi_payload())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let result = &body["result"];
    assert!((result["totalTurnoverCost"].as_f64().unwrap() - 7_500_000.0).abs() < 1e-3);
    assert!((result["totalDisengagementCost"].as_f64().unwrap() - 8_640_000.0).abs() < 1e-3);
    assert!((result["totalAbsenteeismCost"].as_f64().unwrap() - 480_000.0).abs() < 1e-3);
    assert!((result["totalHiddenLoss"].as_f64().unwrap() - 16_140_000.0).abs() < 1e-3);
    assert!((result["potentialSavingsMin"].as_f64().unwrap() - 2_160_000.0).abs() < 1e-3);
    assert!((result["potentialSavingsMax"].as_f64().unwrap() - 4_320_000.0).abs() < 1e-3);
    assert!((result["potentialRevenueIncreaseMin"].as_f64().unwrap() - 700_000.0).abs() < 1e-3);
    assert!(
        (result["potentialRevenueIncreaseMax"].as_f64().unwrap() - 2_000_000.0).abs() < 1e-3
    );

    // Stored document carries both the payload and the computed result
    let listing: serde_json::Value = client
        .get(format!("{}/api/submissions/roi", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let document = &listing["result"]["items"][0];
    assert_eq!(document["payload"]["numEmployees"], 100);
    assert!(
        (document["result"]["totalHiddenLoss"].as_f64().unwrap() - 16_140_000.0).abs() < 1e-3
    );
}

#[tokio::test]
async fn test_roi_validation_rejects_before_computing() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    // engagementScore outside 1..=10
    let mut payload = roi_payload();
    payload["engagementScore"] = serde_json::json!(12);
    let response = client
        .post(format!("{}/api/roi", base_url))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("engagementScore"));

    // employeesWhoLeft exceeding numEmployees
    let mut payload = roi_payload();
    payload["employeesWhoLeft"] = serde_json::json!(101);
    let response = client
        .post(format!("{}/api/roi", base_url))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);

    // Nothing was persisted
    let listing: serde_json::Value = client
        .get(format!("{}/api/submissions/roi", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["result"]["total"], 0);
}

#[tokio::test]
async fn test_missing_fields_are_rejected() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/contact", base_url))
        .json(&serde_json::json!({ "email": "jane@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/contact", base_url))
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_culture_quiz_submission() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/culture-quiz", base_url))
        .json(&serde_json::json!({
            "email": "hr@example.com",
            "company": "Acme",
            "answers": [
                { "question": "We celebrate wins", "score": 5 },
                { "question": "Feedback flows freely", "score": 4 },
                { "question": "Leadership is transparent", "score": 5 }
            ]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    let average = body["result"]["averageScore"].as_f64().unwrap();
    assert!((average - 14.0 / 3.0).abs() < 1e-9);
    assert_eq!(body["result"]["profile"], "thriving");
}

#[tokio::test]
async fn test_culture_quiz_rejects_out_of_scale_scores() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/culture-quiz", base_url))
        .json(&serde_json::json!({
            "email": "hr@example.com",
            "answers": [{ "question": "We celebrate wins", "score": 9 }]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 422);
}

#[tokio::test]
async fn test_quiz_email_capture() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/quiz-email", base_url))
        .json(&serde_json::json!({
            "email": "curious@example.com",
            "quiz": "culture-quiz",
            "score": 3.8
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);

    let listing: serde_json::Value = client
        .get(format!("{}/api/submissions/quiz-email", base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listing["result"]["total"], 1);
}

#[tokio::test]
async fn test_listing_pagination() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    for i in 0..5 {
        let response = client
            .post(format!("{}/api/quiz-email", base_url))
            .json(&serde_json::json!({ "email": format!("visitor{}@example.com", i) }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let listing: serde_json::Value = client
        .get(format!(
            "{}/api/submissions/quiz-email?limit=2&offset=1",
            base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(listing["result"]["total"], 5);
    let items = listing["result"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Newest first, offset skips the most recent
    assert_eq!(items[0]["payload"]["email"], "visitor3@example.com");
    assert_eq!(items[1]["payload"]["email"], "visitor2@example.com");
}

#[tokio::test]
async fn test_listing_unknown_kind_is_not_found() {
    let base_url = spawn_app(AppConfig::default()).await;

    let response = reqwest::get(format!("{}/api/submissions/newsletter", base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_rate_limit_on_submission_endpoints() {
    let config = AppConfig {
        rate_limit_max_requests: 2,
        ..AppConfig::default()
    };
    let base_url = spawn_app(config).await;
    let client = reqwest::Client::new();

    let payload = serde_json::json!({ "email": "visitor@example.com" });
    for _ in 0..2 {
        let response = client
            .post(format!("{}/api/quiz-email", base_url))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
    }

    let response = client
        .post(format!("{}/api/quiz-email", base_url))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 429);

    // Listing and health are exempt from the limiter
    let response = reqwest::get(format!("{}/health", base_url)).await.unwrap();
    assert_eq!(response.status(), 200);
    let response = reqwest::get(format!("{}/api/submissions/quiz-email", base_url))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin_by_default() {
    let base_url = spawn_app(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/contact", base_url),
        )
        .header("Origin", "https://www.example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_respects_configured_origin() {
    let config = AppConfig {
        allowed_origin: Some("https://www.example.com".to_string()),
        ..AppConfig::default()
    };
    let base_url = spawn_app(config).await;
    let client = reqwest::Client::new();

    let response = client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/contact", base_url),
        )
        .header("Origin", "https://www.example.com")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .unwrap(),
        "https://www.example.com"
    );
}
