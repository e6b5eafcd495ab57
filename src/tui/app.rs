//! Main TUI application state machine.
//!
//! Handles:
//! - Route navigation (mount on enter, unmount on leave)
//! - Input event handling
//! - Polling background fetches and risk submissions

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::HttpAnalysisApi;
use crate::application::{RiskField, RiskFormState};
use crate::config::DashboardConfig;
use crate::domain::{
    ClusterResult, HypothesisOneResult, HypothesisThreeResult, HypothesisTwoResult,
    RiskScoreResult,
};
use crate::ports::{AnalysisApi, ApiError};

use super::nav::{render_nav, Route};
use super::pages::PageController;
use super::ui::{
    clustering::render_clustering, home::render_home, hypothesis_one::render_hypothesis_one,
    hypothesis_three::render_hypothesis_three, hypothesis_two::render_hypothesis_two,
    render_footer, risk_score::render_risk_score,
};
use super::worker::{FetchHandle, FetchWorker};

/// Main application state
pub struct App {
    /// Current page
    route: Route,

    /// Whether the app should quit
    should_quit: bool,

    /// Backend shared with every worker thread
    api: Arc<dyn AnalysisApi>,

    hypothesis_one: PageController<HypothesisOneResult>,
    hypothesis_two: PageController<HypothesisTwoResult>,
    hypothesis_three: PageController<HypothesisThreeResult>,
    clustering: PageController<ClusterResult>,

    /// Risk calculator form
    risk_form: RiskFormState,

    /// In-flight risk submission (if any)
    risk_worker: Option<FetchHandle<RiskScoreResult>>,
}

impl App {
    /// Create the application against the configured HTTP backend.
    ///
    /// # Errors
    /// Returns `CardioError::Api` if the HTTP client cannot be built.
    pub fn new(config: &DashboardConfig) -> crate::Result<Self> {
        let api = HttpAnalysisApi::new(config.api_base.clone())?;
        tracing::info!(api_base = %api.base(), "Using statistics backend");
        Ok(Self::with_api(Arc::new(api), config.start_route))
    }

    /// Create application with an injected backend (Composition Root pattern).
    ///
    /// The start page is mounted immediately.
    #[must_use]
    pub fn with_api(api: Arc<dyn AnalysisApi>, start_route: Route) -> Self {
        let hypothesis_one = page("hypothesis-1", &api, |api| api.fetch_hypothesis_one());
        let hypothesis_two = page("hypothesis-2", &api, |api| api.fetch_hypothesis_two());
        let hypothesis_three = page("hypothesis-3", &api, |api| api.fetch_hypothesis_three());
        let clustering = page("k-means-clustering", &api, |api| api.fetch_clustering());

        let mut app = Self {
            route: start_route,
            should_quit: false,
            api,
            hypothesis_one,
            hypothesis_two,
            hypothesis_three,
            clustering,
            risk_form: RiskFormState::default(),
            risk_worker: None,
        };
        app.mount(start_route);
        app
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Main loop
        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            self.poll_workers();

            terminal.draw(|f| self.draw(f))?;

            // Short poll to stay responsive while fetches run
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn route(&self) -> Route {
        self.route
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the whole screen: nav bar, current page, key hints.
    pub fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Nav
                Constraint::Min(0),    // Page
                Constraint::Length(2), // Footer
            ])
            .split(f.area());

        render_nav(f, chunks[0], self.route);

        let content = chunks[1];
        match self.route {
            Route::Home => render_home(f, content),
            Route::HypothesisOne => {
                render_hypothesis_one(f, content, self.hypothesis_one.resource());
            }
            Route::HypothesisTwo => {
                render_hypothesis_two(f, content, self.hypothesis_two.resource());
            }
            Route::HypothesisThree => {
                render_hypothesis_three(f, content, self.hypothesis_three.resource());
            }
            Route::Clustering => render_clustering(f, content, self.clustering.resource()),
            Route::RiskScore => render_risk_score(f, content, &self.risk_form),
        }

        let page_hints: &[(&str, &str)] = match self.route {
            Route::Home => &[],
            Route::RiskScore => &[("↑↓", "Field"), ("Enter", "Calculate"), ("Esc", "Home")],
            _ => &[("R", "Reload")],
        };
        render_footer(f, chunks[2], page_hints);
    }

    /// Apply any finished fetch or submission.
    pub fn poll_workers(&mut self) {
        self.hypothesis_one.poll();
        self.hypothesis_two.poll();
        self.hypothesis_three.poll();
        self.clustering.poll();

        let finished = self
            .risk_worker
            .as_ref()
            .and_then(|handle| handle.try_recv().map(|result| (handle.ticket(), result)));
        if let Some((ticket, result)) = finished {
            self.risk_worker = None;
            self.risk_form.finish_submit(ticket, result);
            match self.risk_form.band() {
                Some(band) => tracing::info!(band = %band, "Risk score calculated"),
                None => tracing::warn!("Risk score not available"),
            }
        }
    }

    /// Leave the current page and enter `route`.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        tracing::info!(from = %self.route, to = %route, "Navigating");
        self.unmount(self.route);
        self.route = route;
        self.mount(route);
    }

    /// Re-enter the current page, refetching its data.
    fn reload(&mut self) {
        let route = self.route;
        self.unmount(route);
        self.mount(route);
    }

    fn mount(&mut self, route: Route) {
        match route {
            Route::Home | Route::RiskScore => {}
            Route::HypothesisOne => self.hypothesis_one.mount(),
            Route::HypothesisTwo => self.hypothesis_two.mount(),
            Route::HypothesisThree => self.hypothesis_three.mount(),
            Route::Clustering => self.clustering.mount(),
        }
    }

    fn unmount(&mut self, route: Route) {
        match route {
            Route::Home => {}
            Route::HypothesisOne => self.hypothesis_one.unmount(),
            Route::HypothesisTwo => self.hypothesis_two.unmount(),
            Route::HypothesisThree => self.hypothesis_three.unmount(),
            Route::Clustering => self.clustering.unmount(),
            Route::RiskScore => {
                self.risk_worker = None;
                self.risk_form = RiskFormState::default();
            }
        }
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match key {
            KeyCode::Tab => {
                self.navigate(self.route.next());
                return;
            }
            KeyCode::BackTab => {
                self.navigate(self.route.prev());
                return;
            }
            _ => {}
        }

        match self.route {
            Route::RiskScore => self.handle_risk_form_key(key),
            _ => self.handle_page_key(key),
        }
    }

    fn handle_page_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Right => self.navigate(self.route.next()),
            KeyCode::Left => self.navigate(self.route.prev()),
            KeyCode::Char('r') | KeyCode::Char('R') if self.route != Route::Home => self.reload(),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char(c) => {
                if let Some(route) = Route::from_digit(c) {
                    self.navigate(route);
                }
            }
            _ => {}
        }
    }

    fn handle_risk_form_key(&mut self, key: KeyCode) {
        let on_cholesterol = self.risk_form.selected_field() == RiskField::Cholesterol;
        match key {
            KeyCode::Esc => self.navigate(Route::Home),
            KeyCode::Up => self.risk_form.prev_field(),
            KeyCode::Down => self.risk_form.next_field(),
            KeyCode::Right if on_cholesterol => self.risk_form.next_cholesterol(),
            KeyCode::Left if on_cholesterol => self.risk_form.prev_cholesterol(),
            KeyCode::Right => self.navigate(self.route.next()),
            KeyCode::Left => self.navigate(self.route.prev()),
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char(c) => self.risk_form.input_char(c),
            KeyCode::Backspace => self.risk_form.delete_char(),
            KeyCode::Delete => self.risk_form.clear_field(),
            KeyCode::Enter => self.submit_risk_form(),
            _ => {}
        }
    }

    fn submit_risk_form(&mut self) {
        // Ignored while a submission is in flight or the inputs are invalid
        let Some((ticket, input)) = self.risk_form.begin_submit() else {
            return;
        };

        let api = Arc::clone(&self.api);
        self.risk_worker = Some(FetchWorker::spawn(ticket, move || {
            api.submit_risk_calculation(&input)
        }));
    }
}

/// Controller whose fetch calls `fetch` on the shared backend.
fn page<T: Send + 'static>(
    name: &'static str,
    api: &Arc<dyn AnalysisApi>,
    fetch: fn(&dyn AnalysisApi) -> Result<T, ApiError>,
) -> PageController<T> {
    let api = Arc::clone(api);
    PageController::new(name, Arc::new(move || fetch(api.as_ref())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ResourceState;
    use crate::domain::{RiskBand, RiskFormInput};
    use crate::tui::ui::render_to_string;
    use crate::tui::ui::widgets::FAILURE_MESSAGE;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread;
    use std::time::Instant;

    /// In-memory backend with canned payloads.
    #[derive(Default)]
    struct FakeApi {
        fail_hypothesis_one: bool,
        risk_calls: AtomicUsize,
        last_risk_input: Mutex<Option<RiskFormInput>>,
    }

    impl AnalysisApi for FakeApi {
        fn fetch_hypothesis_one(&self) -> Result<HypothesisOneResult, ApiError> {
            if self.fail_hypothesis_one {
                return Err(ApiError::Status(500));
            }
            serde_json::from_value(serde_json::json!({
                "group_with_disease_avg_bp": 133.9,
                "group_without_disease_avg_bp": 119.6,
                "p_value": 0.0,
                "conclusion": "Reject H0"
            }))
            .map_err(|e| ApiError::Decode(e.to_string()))
        }

        fn fetch_hypothesis_two(&self) -> Result<HypothesisTwoResult, ApiError> {
            Err(ApiError::Transport("not used".into()))
        }

        fn fetch_hypothesis_three(&self) -> Result<HypothesisThreeResult, ApiError> {
            Err(ApiError::Transport("not used".into()))
        }

        fn fetch_clustering(&self) -> Result<ClusterResult, ApiError> {
            serde_json::from_value(serde_json::json!({
                "finding": "Two profiles",
                "analysis_by_cluster": [
                    {"cluster": 0, "age_years": 48.0, "weight": 68.0, "height": 164.0,
                     "ap_hi": 118.0, "ap_lo": 78.0, "bmi": 25.3, "disease_percentage": 31.0},
                    {"cluster": 1, "age_years": 57.0, "weight": 86.0, "height": 166.0,
                     "ap_hi": 142.0, "ap_lo": 90.0, "bmi": 31.2, "disease_percentage": 82.5}
                ]
            }))
            .map_err(|e| ApiError::Decode(e.to_string()))
        }

        fn submit_risk_calculation(
            &self,
            input: &RiskFormInput,
        ) -> Result<RiskScoreResult, ApiError> {
            self.risk_calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut last) = self.last_risk_input.lock() {
                *last = Some(*input);
            }
            Ok(RiskScoreResult { risk_score: 3.0 })
        }
    }

    fn busy(app: &App) -> bool {
        app.hypothesis_one.is_fetching()
            || app.hypothesis_two.is_fetching()
            || app.hypothesis_three.is_fetching()
            || app.clustering.is_fetching()
            || app.risk_worker.is_some()
    }

    fn settle(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while busy(app) {
            app.poll_workers();
            assert!(Instant::now() < deadline, "workers did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn press(app: &mut App, key: KeyCode) {
        app.handle_key(key, KeyModifiers::NONE);
    }

    #[test]
    fn test_new_uses_configured_backend() {
        let config = DashboardConfig::default();
        let app = App::new(&config).expect("Should build app from default config");
        assert_eq!(app.route(), config.start_route);
    }

    #[test]
    fn test_start_route_is_mounted() {
        let mut app = App::with_api(Arc::new(FakeApi::default()), Route::Clustering);
        assert!(app.clustering.resource().is_loading());

        settle(&mut app);
        assert!(app.clustering.resource().data().is_some());

        let text = render_to_string(140, 40, |f| app.draw(f));
        assert!(text.contains("Cluster 1 (82.5%)"));
    }

    #[test]
    fn test_navigation_unmounts_previous_page() {
        let mut app = App::with_api(Arc::new(FakeApi::default()), Route::HypothesisOne);
        settle(&mut app);
        assert!(app.hypothesis_one.resource().data().is_some());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.route(), Route::HypothesisTwo);
        assert_eq!(app.hypothesis_one.resource().state(), &ResourceState::Idle);
        assert!(app.hypothesis_two.resource().is_loading());
    }

    #[test]
    fn test_failed_fetch_shows_failure_message() {
        let api = FakeApi {
            fail_hypothesis_one: true,
            ..FakeApi::default()
        };
        let mut app = App::with_api(Arc::new(api), Route::Clustering);
        settle(&mut app);

        press(&mut app, KeyCode::Char('1'));
        settle(&mut app);
        assert!(app.hypothesis_one.resource().is_failed());

        let text = render_to_string(120, 30, |f| app.draw(f));
        assert!(text.contains(FAILURE_MESSAGE));
        assert!(!text.contains("82.5%"));
    }

    #[test]
    fn test_keys_navigate_and_quit() {
        let mut app = App::with_api(Arc::new(FakeApi::default()), Route::Home);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.route(), Route::RiskScore);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.route(), Route::Clustering);
        press(&mut app, KeyCode::Char('0'));
        assert_eq!(app.route(), Route::Home);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_digits_type_into_risk_form() {
        let mut app = App::with_api(Arc::new(FakeApi::default()), Route::RiskScore);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Char('6'));
        press(&mut app, KeyCode::Char('1'));

        assert_eq!(app.route(), Route::RiskScore);
        assert_eq!(app.risk_form.age, "61");

        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit());
    }

    #[test]
    fn test_risk_submission_round_trip() {
        let api = Arc::new(FakeApi::default());
        let mut app = App::with_api(api.clone(), Route::RiskScore);

        press(&mut app, KeyCode::Enter);
        // Second Enter while submitting is ignored
        press(&mut app, KeyCode::Enter);
        settle(&mut app);

        assert_eq!(api.risk_calls.load(Ordering::SeqCst), 1);
        let sent = api
            .last_risk_input
            .lock()
            .expect("Should lock")
            .expect("Should record input");
        assert_eq!(sent, RiskFormInput::default());
        assert_eq!(app.risk_form.band(), Some(RiskBand::Moderate));

        let text = render_to_string(120, 30, |f| app.draw(f));
        assert!(text.contains("Moderate Risk"));
    }

    #[test]
    fn test_leaving_risk_page_resets_form() {
        let mut app = App::with_api(Arc::new(FakeApi::default()), Route::RiskScore);
        press(&mut app, KeyCode::Enter);
        settle(&mut app);
        assert!(app.risk_form.score().is_some());

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route(), Route::Home);
        press(&mut app, KeyCode::Char('5'));
        assert!(app.risk_form.score().is_none());
    }

    #[test]
    fn test_reload_refetches() {
        let mut app = App::with_api(Arc::new(FakeApi::default()), Route::Clustering);
        settle(&mut app);
        press(&mut app, KeyCode::Char('r'));
        assert!(app.clustering.resource().is_loading());
        settle(&mut app);
        assert!(app.clustering.resource().data().is_some());
    }
}
