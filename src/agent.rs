//! Application façade
//!
//! Wires the session store, the conversation controller and a chart data
//! provider into the actions a front-end calls. State changes are observed
//! through [`DashboardAgent::subscribe`].

use std::sync::Arc;

use crate::charts::{resolve_series, ChartDataProvider, ChartSeries, MockChartData, ServiceChartData};
use crate::client::{ClientError, DashboardApi, HttpDashboardClient};
use crate::config::{ChartSource, Config};
use crate::conversation::{ConversationController, SendOutcome};
use crate::models::{ChatSession, SessionId};
use crate::store::{AppState, SessionStore, StoreResult};
use crate::view::suggestion;

/// The dashboard assistant as seen by a front-end
#[derive(Clone)]
pub struct DashboardAgent {
    store: SessionStore,
    controller: ConversationController,
    charts: Arc<dyn ChartDataProvider>,
}

impl DashboardAgent {
    pub fn new(
        store: SessionStore,
        api: Arc<dyn DashboardApi>,
        charts: Arc<dyn ChartDataProvider>,
    ) -> Self {
        let controller = ConversationController::new(store.clone(), api);
        Self {
            store,
            controller,
            charts,
        }
    }

    /// Build an agent talking to the configured service
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let client = Arc::new(HttpDashboardClient::new(config.client_config())?);

        let charts: Arc<dyn ChartDataProvider> = match config.charts.source {
            ChartSource::Mock => Arc::new(MockChartData),
            ChartSource::Service => Arc::new(ServiceChartData::new(client.clone())),
        };

        tracing::info!(
            base_url = %config.service.base_url,
            chart_source = %config.charts.source,
            max_sessions = config.sessions.max_sessions,
            "Dashboard agent ready"
        );

        Ok(Self::new(
            SessionStore::new(config.store_config()),
            client,
            charts,
        ))
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn snapshot(&self) -> AppState {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> tokio::sync::watch::Receiver<AppState> {
        self.store.subscribe()
    }

    /// Start a session for `prompt` and send it as the first message.
    ///
    /// An empty prompt only switches to the suggestion view and returns
    /// `None`.
    pub async fn create_session(&self, prompt: &str) -> Option<(SessionId, SendOutcome)> {
        let id = self.store.create_session(prompt)?;
        let outcome = self.controller.send_message(prompt, id).await;
        Some((id, outcome))
    }

    /// Leave the current session for the suggestion view
    pub fn new_dashboard(&self) {
        self.store.create_session("");
    }

    /// Start a session from one of the fixed suggestions
    pub async fn pick_suggestion(&self, index: usize) -> Option<(SessionId, SendOutcome)> {
        let suggestion = suggestion(index)?;
        self.create_session(suggestion.prompt).await
    }

    /// Send what the user typed in the input bar.
    ///
    /// Goes to the active session, or starts a new one when none is shown.
    /// Refused while a reply is pending.
    pub async fn submit_input(&self, text: &str) -> SendOutcome {
        self.controller.submit_input(text).await
    }

    pub fn select_session(&self, id: SessionId) -> StoreResult<()> {
        self.store.select_session(id)
    }

    pub fn delete_session(&self, id: SessionId) -> Option<ChatSession> {
        self.store.delete_session(id)
    }

    /// Data for every chart on the active session's dashboard
    pub async fn active_charts(&self) -> Vec<ChartSeries> {
        let dashboard = self.store.active_session().and_then(|s| s.dashboard);
        match dashboard {
            Some(dashboard) => resolve_series(self.charts.as_ref(), &dashboard).await,
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{classify, ChartPoint};
    use crate::conversation::tests::{reply, ScriptedApi};
    use crate::models::{Dashboard, Role, Visualization, VizType};
    use crate::store::Screen;
    use tokio::sync::Notify;

    fn attrition() -> Dashboard {
        Dashboard::new("Attrition Overview")
            .visualization(Visualization::new(VizType::Bar, "Attrition by Band"))
            .visualization(Visualization::new(VizType::Line, "Monthly Attrition Trend"))
    }

    fn agent(api: ScriptedApi) -> (DashboardAgent, Arc<ScriptedApi>) {
        let api = Arc::new(api);
        let agent = DashboardAgent::new(SessionStore::default(), api.clone(), Arc::new(MockChartData));
        (agent, api)
    }

    #[tokio::test]
    async fn test_pick_suggestion_starts_session() {
        let (agent, api) = agent(ScriptedApi::answering(vec![reply(
            "Here is your dashboard",
            Some(attrition()),
        )]));

        let (id, outcome) = agent.pick_suggestion(0).await.unwrap();
        assert_eq!(outcome, SendOutcome::Answered);

        let requests = api.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].message, "Create an attrition dashboard for this year");
        assert!(requests[0].history.is_empty());

        let session = agent.store().session(id).unwrap();
        assert_eq!(session.title, "Create an attrition dashboard ");
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[1].role, Role::Assistant);
        assert_eq!(session.dashboard.unwrap().title, "Attrition Overview");
        assert_eq!(agent.store().screen(), Screen::Conversation);
    }

    #[tokio::test]
    async fn test_pick_unknown_suggestion() {
        let (agent, api) = agent(ScriptedApi::default());
        assert!(agent.pick_suggestion(7).await.is_none());
        assert_eq!(api.request_count(), 0);
        assert!(agent.snapshot().sessions.is_empty());
    }

    #[tokio::test]
    async fn test_new_dashboard_shows_suggestions() {
        let (agent, _api) = agent(ScriptedApi::answering(vec![reply("ok", None)]));
        agent.create_session("Headcount by site").await.unwrap();

        agent.new_dashboard();

        let state = agent.snapshot();
        assert_eq!(state.active, None);
        assert_eq!(state.screen(), Screen::Suggestions);
        assert_eq!(state.sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_active_session_creates_one() {
        let (agent, api) = agent(ScriptedApi::answering(vec![reply("ok", None)]));

        assert_eq!(agent.submit_input("Gender split by band").await, SendOutcome::Answered);

        let state = agent.snapshot();
        assert_eq!(state.sessions.len(), 1);
        assert_eq!(state.active, Some(state.sessions[0].id));
        assert_eq!(state.sessions[0].title, "Gender split by band");
        assert!(state.input.is_empty());
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_submit_follow_up_carries_history() {
        let (agent, api) = agent(ScriptedApi::answering(vec![
            reply("first", Some(attrition())),
            reply("second", None),
        ]));

        let (id, _) = agent.create_session("Attrition this year").await.unwrap();
        assert_eq!(agent.submit_input("Only Band III").await, SendOutcome::Answered);

        let requests = api.requests.lock().unwrap().clone();
        assert_eq!(requests[1].history.len(), 2);
        assert_eq!(requests[1].history[0].content, "Attrition this year");
        assert_eq!(requests[1].history[1].role, Role::Assistant);

        let session = agent.store().session(id).unwrap();
        assert_eq!(session.messages.len(), 4);
        assert!(session.dashboard.is_none());
        assert_eq!(agent.snapshot().sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_blank_is_ignored() {
        let (agent, api) = agent(ScriptedApi::default());
        assert_eq!(agent.submit_input(" \t ").await, SendOutcome::Ignored);
        assert_eq!(api.request_count(), 0);
        assert!(agent.snapshot().sessions.is_empty());
    }

    #[tokio::test]
    async fn test_submit_refused_while_waiting() {
        let gate = Arc::new(Notify::new());
        let (agent, api) = agent(ScriptedApi::answering(vec![reply("ok", None)]).gated(gate.clone()));

        let background = agent.clone();
        let task = tokio::spawn(async move { background.submit_input("Hours by location").await });
        while api.request_count() == 0 {
            tokio::task::yield_now().await;
        }

        assert!(agent.store().is_awaiting_response());
        assert_eq!(agent.submit_input("Another one").await, SendOutcome::Busy);
        assert_eq!(agent.snapshot().sessions.len(), 1);

        gate.notify_one();
        assert_eq!(task.await.unwrap(), SendOutcome::Answered);
        assert!(!agent.store().is_awaiting_response());
    }

    #[tokio::test]
    async fn test_concurrent_submits_start_one_session() {
        let gate = Arc::new(Notify::new());
        let (agent, api) = agent(ScriptedApi::answering(vec![reply("ok", None)]).gated(gate.clone()));

        let tasks: Vec<_> = ["Hours by location", "Tenure mix"]
            .into_iter()
            .map(|text| {
                let agent = agent.clone();
                tokio::spawn(async move { agent.submit_input(text).await })
            })
            .collect();
        while api.request_count() == 0 {
            tokio::task::yield_now().await;
        }
        gate.notify_one();

        let mut outcomes = Vec::new();
        for task in tasks {
            outcomes.push(task.await.unwrap());
        }
        outcomes.sort_by_key(|o| *o == SendOutcome::Busy);
        assert_eq!(outcomes, vec![SendOutcome::Answered, SendOutcome::Busy]);
        assert_eq!(agent.snapshot().sessions.len(), 1);
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_busy_submit_leaves_input_alone() {
        let gate = Arc::new(Notify::new());
        let (agent, api) = agent(ScriptedApi::answering(vec![reply("ok", None)]).gated(gate.clone()));

        let background = agent.clone();
        let task = tokio::spawn(async move { background.submit_input("Hours by location").await });
        while api.request_count() == 0 {
            tokio::task::yield_now().await;
        }

        assert_eq!(agent.submit_input("Another one").await, SendOutcome::Busy);
        assert_eq!(agent.store().input(), "Hours by location");

        gate.notify_one();
        task.await.unwrap();
        assert!(agent.store().input().is_empty());
    }

    #[tokio::test]
    async fn test_delete_active_returns_to_landing() {
        let (agent, _api) = agent(ScriptedApi::answering(vec![reply("ok", None)]));
        let (id, _) = agent.create_session("Tenure mix").await.unwrap();

        assert!(agent.delete_session(id).is_some());
        assert_eq!(agent.snapshot().screen(), Screen::Landing);
        assert!(agent.select_session(id).is_err());
    }

    #[tokio::test]
    async fn test_active_charts_use_provider() {
        let (agent, _api) = agent(ScriptedApi::answering(vec![reply("ok", Some(attrition()))]));
        assert!(agent.active_charts().await.is_empty());

        agent.create_session("Attrition this year").await.unwrap();
        let series = agent.active_charts().await;

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].points, classify(VizType::Bar, "Attrition by Band"));
        assert_eq!(series[0].points[0], ChartPoint::new("Band I", 28.0));
        assert_eq!(series[1].points.len(), 12);
    }
}
