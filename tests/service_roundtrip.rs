//! End-to-end tests against a stub dashboard service on a local port

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use dashboard_agent::charts::classify;
use dashboard_agent::config::ChartSource;
use dashboard_agent::{
    ClientConfig, ClientError, Config, DashboardAgent, HttpDashboardClient, Role, Screen,
    SendOutcome, VizType, ERROR_REPLY,
};

#[derive(Clone, Copy)]
enum ChatMode {
    Dashboard,
    ServerError,
    NotJson,
    MissingResponse,
    PartialDashboard,
}

struct Stub {
    mode: Mutex<ChatMode>,
    chat_requests: Mutex<Vec<Value>>,
}

impl Stub {
    fn set_mode(&self, mode: ChatMode) {
        *self.mode.lock().unwrap() = mode;
    }

    fn chat_requests(&self) -> Vec<Value> {
        self.chat_requests.lock().unwrap().clone()
    }
}

async fn chat(State(stub): State<Arc<Stub>>, Json(body): Json<Value>) -> Response {
    stub.chat_requests.lock().unwrap().push(body);
    let mode = *stub.mode.lock().unwrap();

    match mode {
        ChatMode::Dashboard => Json(json!({
            "response": "I've created an attrition dashboard for this year.",
            "dashboard": {
                "title": "Attrition Overview",
                "subtitle": "Current year",
                "key_insights": ["Band I has the highest attrition"],
                "metrics": [{"label": "Attrition Rate", "value": "11.8%"}],
                "visualizations": [
                    {"type": "bar", "title": "Attrition by Band", "description": "Share of leavers per band"},
                    {"type": "line", "title": "Monthly Attrition Trend", "description": ""}
                ]
            },
            "analysis_type": "attrition",
            "timestamp": "2024-05-01T10:00:00"
        }))
        .into_response(),
        ChatMode::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "model unavailable").into_response()
        }
        ChatMode::NotJson => (StatusCode::OK, "<html>oops</html>").into_response(),
        ChatMode::MissingResponse => Json(json!({"dashboard": null})).into_response(),
        ChatMode::PartialDashboard => Json(json!({
            "response": "Here is your dashboard",
            "dashboard": {
                "key_insights": ["Band I leaves most", {"text": "Overtime is up"}],
                "visualizations": [{"type": "bar", "title": "Attrition by Band"}, {"type": "pie"}]
            }
        }))
        .into_response(),
    }
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "model": "gemini-2.0-flash",
        "location": "us-central1"
    }))
}

async fn search_trends(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "trends": "Attrition is trending down across the industry.",
        "topic": body["topic"],
        "industry": body["industry"],
        "timestamp": "2024-05-01T10:00:00"
    }))
}

async fn chart_data(Json(body): Json<Value>) -> Response {
    if body["chart_config"]["type"] == "line" {
        return (StatusCode::BAD_REQUEST, "unsupported").into_response();
    }
    Json(json!({
        "labels": ["Week 1", "Week 2", "Week 3"],
        "datasets": [{"label": "Hours", "data": [40.0, 42.5, 39.0]}]
    }))
    .into_response()
}

/// Start the stub and return its base URL
async fn spawn_stub() -> (String, Arc<Stub>) {
    let stub = Arc::new(Stub {
        mode: Mutex::new(ChatMode::Dashboard),
        chat_requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/api/chat", post(chat))
        .route("/health", get(health))
        .route("/api/search-trends", post(search_trends))
        .route("/api/generate-chart-data", post(chart_data))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), stub)
}

fn agent_for(base_url: &str, source: ChartSource) -> DashboardAgent {
    let mut config = Config::default();
    config.service.base_url = base_url.to_string();
    config.charts.source = source;
    DashboardAgent::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_suggestion_to_dashboard() {
    let (url, stub) = spawn_stub().await;
    let agent = agent_for(&url, ChartSource::Mock);

    let (id, outcome) = agent.pick_suggestion(0).await.unwrap();
    assert_eq!(outcome, SendOutcome::Answered);

    let requests = stub.chat_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0],
        json!({"message": "Create an attrition dashboard for this year", "history": []})
    );

    let state = agent.snapshot();
    assert_eq!(state.screen(), Screen::Conversation);
    assert!(!state.awaiting_response());

    let session = state.session(id).unwrap();
    assert_eq!(session.title, "Create an attrition dashboard ");
    assert_eq!(session.messages.len(), 2);
    assert_eq!(session.messages[0].role, Role::User);
    assert_eq!(session.messages[1].role, Role::Assistant);
    assert!(session.messages[1].dashboard.is_some());
    assert_eq!(session.dashboard.as_ref().unwrap().title, "Attrition Overview");

    let series = agent.active_charts().await;
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].points, classify(VizType::Bar, "Attrition by Band"));
    assert_eq!(series[1].points.len(), 12);
}

#[tokio::test]
async fn test_follow_up_sends_history() {
    let (url, stub) = spawn_stub().await;
    let agent = agent_for(&url, ChartSource::Mock);

    agent.create_session("Attrition this year").await.unwrap();
    assert_eq!(agent.submit_input("Only Band III please").await, SendOutcome::Answered);

    let requests = stub.chat_requests();
    assert_eq!(requests.len(), 2);
    let history = requests[1]["history"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0], json!({"role": "user", "content": "Attrition this year"}));
    assert_eq!(history[1]["role"], "assistant");
}

#[tokio::test]
async fn test_server_error_keeps_dashboard() {
    let (url, stub) = spawn_stub().await;
    let agent = agent_for(&url, ChartSource::Mock);

    let (id, _) = agent.create_session("Attrition this year").await.unwrap();
    stub.set_mode(ChatMode::ServerError);

    assert_eq!(agent.submit_input("Break it down by site").await, SendOutcome::Failed);

    let session = agent.store().session(id).unwrap();
    assert_eq!(session.messages.len(), 4);
    assert_eq!(session.messages[3].content, ERROR_REPLY);
    assert!(session.messages[3].dashboard.is_none());
    assert_eq!(session.dashboard.unwrap().title, "Attrition Overview");
    assert!(!agent.store().is_awaiting_response());
    assert!(agent.store().input().is_empty());
}

#[tokio::test]
async fn test_unparseable_replies_fail() {
    let (url, stub) = spawn_stub().await;
    let agent = agent_for(&url, ChartSource::Mock);

    stub.set_mode(ChatMode::NotJson);
    let (first, outcome) = agent.create_session("Headcount by site").await.unwrap();
    assert_eq!(outcome, SendOutcome::Failed);

    stub.set_mode(ChatMode::MissingResponse);
    let (second, outcome) = agent.create_session("Tenure mix").await.unwrap();
    assert_eq!(outcome, SendOutcome::Failed);

    for id in [first, second] {
        let session = agent.store().session(id).unwrap();
        assert_eq!(session.messages[1].content, ERROR_REPLY);
        assert!(session.dashboard.is_none());
    }
}

#[tokio::test]
async fn test_partial_dashboard_is_answered() {
    let (url, stub) = spawn_stub().await;
    let agent = agent_for(&url, ChartSource::Mock);
    stub.set_mode(ChatMode::PartialDashboard);

    let (id, outcome) = agent.create_session("Attrition this year").await.unwrap();
    assert_eq!(outcome, SendOutcome::Answered);

    let session = agent.store().session(id).unwrap();
    assert_eq!(session.messages[1].content, "Here is your dashboard");
    let dashboard = session.dashboard.unwrap();
    assert_eq!(dashboard.title, "");
    assert_eq!(
        dashboard.key_insights.unwrap(),
        vec!["Band I leaves most", "Overtime is up"]
    );

    let series = agent.active_charts().await;
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].points, classify(VizType::Bar, "Attrition by Band"));
    assert_eq!(series[1].visualization.kind, VizType::Pie);
}

#[tokio::test]
async fn test_unreachable_service() {
    let agent = agent_for("http://127.0.0.1:9", ChartSource::Mock);

    let (id, outcome) = agent.create_session("Gender split").await.unwrap();
    assert_eq!(outcome, SendOutcome::Failed);
    assert_eq!(agent.store().session(id).unwrap().messages[1].content, ERROR_REPLY);
}

#[tokio::test]
async fn test_service_chart_data() {
    let (url, _stub) = spawn_stub().await;
    let agent = agent_for(&url, ChartSource::Service);

    agent.create_session("Attrition this year").await.unwrap();
    let series = agent.active_charts().await;

    assert_eq!(series[0].points.len(), 3);
    assert_eq!(series[0].points[1].name, "Week 2");
    assert_eq!(series[0].points[1].value, 42.5);
    // Line charts are refused by the stub and fall back to canned data
    assert_eq!(series[1].points, classify(VizType::Line, "Monthly Attrition Trend"));
}

#[tokio::test]
async fn test_health_and_trends() {
    let (url, _stub) = spawn_stub().await;
    let client = HttpDashboardClient::new(ClientConfig {
        base_url: format!("{}/", url),
        request_timeout: None,
    })
    .unwrap();

    let health = client.health_check().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.model.as_deref(), Some("gemini-2.0-flash"));

    let trends = client.search_trends("attrition", "retail").await.unwrap();
    assert_eq!(trends.industry.as_deref(), Some("retail"));
    assert!(trends.trends.contains("trending down"));
}

#[tokio::test]
async fn test_api_error_carries_status() {
    let (url, stub) = spawn_stub().await;
    stub.set_mode(ChatMode::ServerError);

    let client = HttpDashboardClient::new(ClientConfig {
        base_url: url,
        request_timeout: None,
    })
    .unwrap();

    let request = dashboard_agent::client::ChatRequest {
        message: "hello".to_string(),
        history: Vec::new(),
    };
    let err = dashboard_agent::DashboardApi::chat(&client, &request)
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "model unavailable");
        }
        other => panic!("unexpected error: {other}"),
    }
}
