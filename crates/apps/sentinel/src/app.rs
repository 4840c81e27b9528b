//! Root application state for Sentinel
//!
//! Ties the session, the inbox and the dashboard together and routes
//! commands to them. Every command that touches a protected view goes
//! through the route guard first.

use log::{debug, warn};
use moderation::{
    AnalysisCompletion, AnalysisCoordinator, CompletionEffect, DashboardFilter, EmailId,
    Navigation, Route, SessionManager, can_enter, navigate,
};

use crate::input::{Command, help_text};
use crate::views;

/// What a handled command produced
#[derive(Debug, Default)]
pub struct Output {
    pub lines: Vec<String>,
    pub quit: bool,
}

impl Output {
    fn say(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }
}

/// Root application state
pub struct SentinelApp {
    sessions: SessionManager,
    inbox: AnalysisCoordinator,
    dashboard: DashboardFilter,
    route: Route,
}

impl SentinelApp {
    pub fn new(
        sessions: SessionManager,
        inbox: AnalysisCoordinator,
        dashboard: DashboardFilter,
    ) -> Self {
        Self {
            sessions,
            inbox,
            dashboard,
            route: Route::Login,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn inbox_mut(&mut self) -> &mut AnalysisCoordinator {
        &mut self.inbox
    }

    /// Initial screen: the login entry point, or the inbox if a session
    /// was restored
    pub fn start(&mut self) -> Output {
        self.go(Route::Login, Output::default())
    }

    fn go(&mut self, target: Route, out: Output) -> Output {
        let navigation = navigate(self.sessions.session(), target);
        if let Navigation::Redirect(to) = navigation {
            debug!("Redirecting {} -> {}", target.path(), to.path());
        }
        self.route = navigation.destination();
        let screen = self.render();
        out.say(screen)
    }

    /// Render the current view
    pub fn render(&self) -> String {
        match self.route {
            Route::Login => views::login::render(self.sessions.session(), self.sessions.form()),
            Route::Emails => views::inbox::render(&self.inbox),
            Route::Dashboard => views::dashboard::render(&self.dashboard),
        }
    }

    /// Re-check the guard for a protected view. Redirects to login when the
    /// session is gone.
    fn require_session(&mut self, out: Output) -> Result<Output, Output> {
        if can_enter(self.sessions.session()) {
            Ok(out)
        } else {
            Err(self.go(Route::Login, out.say("Please sign in first.")))
        }
    }

    pub fn handle(&mut self, command: Command) -> Output {
        let out = Output::default();
        match command {
            Command::Help => out.say(help_text()),
            Command::Quit => Output {
                quit: true,
                ..out
            },
            Command::Go(route) => self.go(route, out),
            Command::Login { email, password } => {
                let out = match self.sessions.login(&email, &password) {
                    Ok(_) => out,
                    Err(e) => out.say(e.to_string()),
                };
                self.go(Route::Login, out)
            }
            Command::Submit => {
                let out = match self.sessions.submit() {
                    Ok(_) => out,
                    Err(e) => out.say(e.to_string()),
                };
                self.go(Route::Login, out)
            }
            Command::Remember(on) => {
                self.sessions.set_remember_me(on);
                out.say(format!("Remember me: {}", if on { "on" } else { "off" }))
            }
            Command::Logout => {
                let out = match self.sessions.logout() {
                    Ok(()) => out.say("Logged out."),
                    Err(e) => {
                        warn!("Logout could not update the session store: {:#}", e);
                        out.say(format!("Logged out, but the session store was not updated: {}", e))
                    }
                };
                // The session is gone either way; nothing from it carries over
                self.inbox.reset();
                self.go(Route::Login, out)
            }
            Command::Open(id) => self.item_command(id, out, |inbox, id| {
                inbox.open(id).map_err(|e| e.to_string())
            }),
            Command::Close(id) => self.item_command(id, out, |inbox, id| {
                inbox.close(id).map_err(|e| e.to_string())
            }),
            Command::Toggle(id) => self.item_command(id, out, |inbox, id| {
                inbox.toggle(id).map(|_| ()).map_err(|e| e.to_string())
            }),
            Command::Analyze(id) => self.item_command(id, out, |inbox, id| {
                inbox.request_analysis(id).map_err(|e| e.to_string())
            }),
            Command::Report(id) => self.item_command(id, out, |inbox, id| {
                match inbox.toggle_report(id).map_err(|e| e.to_string())? {
                    Some(_) => Ok(()),
                    None => Err("analyze the email first".to_string()),
                }
            }),
            Command::Filter(query) => match self.require_session(out) {
                Ok(out) => {
                    self.dashboard.set_query(query);
                    self.route = Route::Dashboard;
                    out.say(self.render())
                }
                Err(out) => out,
            },
        }
    }

    /// Run an inbox command behind the guard, then show the item
    fn item_command<F>(&mut self, id: EmailId, out: Output, f: F) -> Output
    where
        F: FnOnce(&mut AnalysisCoordinator, EmailId) -> Result<(), String>,
    {
        let out = match self.require_session(out) {
            Ok(out) => out,
            Err(out) => return out,
        };
        self.route = Route::Emails;

        match f(&mut self.inbox, id) {
            Ok(()) => {
                let item = self.render_item(id);
                out.say(item)
            }
            Err(e) => out.say(e),
        }
    }

    fn render_item(&self, id: EmailId) -> String {
        match (self.inbox.email(id), self.inbox.state(id)) {
            (Some(email), Some(state)) => views::inbox::render_item(email, state),
            _ => String::new(),
        }
    }

    /// Apply a finished analysis and report what changed
    pub fn on_completion(&mut self, completion: AnalysisCompletion) -> Output {
        let id = completion.item_id;
        let effect = self.inbox.apply(completion);
        let mut out = Output::default();
        if !can_enter(self.sessions.session()) {
            self.inbox.take_notices();
            return out;
        }

        for notice in self.inbox.take_notices() {
            out = out.say(format!("! {} (email {})", notice.message, notice.item_id));
        }
        if effect == CompletionEffect::Analyzed {
            out = out.say(format!(
                "Analysis ready for email {}. Type 'report {}' to view it.",
                id, id
            ));
        }
        if effect != CompletionEffect::Stale && self.route == Route::Emails {
            let item = self.render_item(id);
            out = out.say(item);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moderation::{
        AnalysisClient, AnalysisRequestError, AnalysisResult, InMemoryCredentialStore, Settings,
        datasets,
    };
    use std::collections::BTreeMap;
    use std::sync::Arc;

    struct FixedClient;

    impl AnalysisClient for FixedClient {
        fn analyze(&self, _text: &str) -> Result<AnalysisResult, AnalysisRequestError> {
            Ok(AnalysisResult {
                toxic_score: 0.82,
                negative_score: None,
                reason: "high".to_string(),
                is_microaggression: true,
                categories: BTreeMap::new(),
            })
        }
    }

    fn app() -> SentinelApp {
        let store = Arc::new(InMemoryCredentialStore::new());
        let users = Arc::new(Settings::default().credential_repository());
        let sessions = SessionManager::new(store, users);
        let inbox = AnalysisCoordinator::new(Arc::new(FixedClient), datasets::sample_emails());
        let dashboard = DashboardFilter::new(datasets::sample_dashboard_rows());
        SentinelApp::new(sessions, inbox, dashboard)
    }

    fn login(app: &mut SentinelApp) {
        app.handle(Command::Login {
            email: "user@example.com".to_string(),
            password: "password123".to_string(),
        });
    }

    #[test]
    fn test_protected_views_redirect_to_login() {
        let mut app = app();
        app.start();
        let out = app.handle(Command::Go(Route::Dashboard));
        assert_eq!(app.route(), Route::Login);
        assert!(out.lines[0].contains("Welcome Back"));

        let out = app.handle(Command::Open(7));
        assert_eq!(out.lines[0], "Please sign in first.");
        assert_eq!(app.route(), Route::Login);
    }

    #[test]
    fn test_login_lands_on_inbox() {
        let mut app = app();
        login(&mut app);
        assert_eq!(app.route(), Route::Emails);
        assert!(app.render().contains("Get Your Act Together"));
    }

    #[test]
    fn test_bad_login_stays_on_login() {
        let mut app = app();
        let out = app.handle(Command::Login {
            email: "user@example.com".to_string(),
            password: "nope".to_string(),
        });
        assert_eq!(out.lines[0], "Invalid email or password");
        assert_eq!(app.route(), Route::Login);
    }

    #[test]
    fn test_filter_switches_to_dashboard() {
        let mut app = app();
        login(&mut app);
        let out = app.handle(Command::Filter("USER1".to_string()));
        assert_eq!(app.route(), Route::Dashboard);
        assert!(out.lines[0].contains("user10@example.com"));
        assert!(!out.lines[0].contains("user2@example.com"));
    }

    #[test]
    fn test_logout_blocks_dashboard() {
        let mut app = app();
        login(&mut app);
        app.handle(Command::Logout);
        app.handle(Command::Go(Route::Dashboard));
        assert_eq!(app.route(), Route::Login);
    }

    #[tokio::test]
    async fn test_analyze_and_show_report() {
        let mut app = app();
        login(&mut app);
        app.handle(Command::Open(7));
        let out = app.handle(Command::Analyze(7));
        assert!(out.lines[0].contains("Analyzing..."));

        let completion = app.inbox_mut().next_completion().await.unwrap();
        let out = app.on_completion(completion);
        assert!(out.lines[0].contains("Analysis ready for email 7"));

        let out = app.handle(Command::Report(7));
        assert!(out.lines[0].contains("Toxicity Score: 0.820"));
    }

    #[tokio::test]
    async fn test_logout_clears_analysis_for_next_user() {
        let mut app = app();
        login(&mut app);
        app.handle(Command::Open(7));
        app.handle(Command::Analyze(7));
        let completion = app.inbox_mut().next_completion().await.unwrap();
        app.on_completion(completion);
        app.handle(Command::Report(7));

        app.handle(Command::Logout);
        app.handle(Command::Login {
            email: "test@test.com".to_string(),
            password: "test123".to_string(),
        });

        let state = app.inbox_mut().state(7).unwrap();
        assert!(!state.is_expanded());
        assert!(state.result().is_none());
        let out = app.handle(Command::Report(7));
        assert_eq!(out.lines, vec!["analyze the email first".to_string()]);
    }

    #[tokio::test]
    async fn test_completion_after_logout_is_silent() {
        let mut app = app();
        login(&mut app);
        app.handle(Command::Open(7));
        app.handle(Command::Analyze(7));
        app.handle(Command::Logout);

        let completion = app.inbox_mut().next_completion().await.unwrap();
        let out = app.on_completion(completion);
        assert!(out.lines.is_empty());
        assert_eq!(app.route(), Route::Login);
        assert_eq!(app.inbox_mut().in_flight_count(), 0);
        assert!(app.inbox_mut().state(7).unwrap().result().is_none());
    }

    #[test]
    fn test_report_before_analysis() {
        let mut app = app();
        login(&mut app);
        app.handle(Command::Open(7));
        let out = app.handle(Command::Report(7));
        assert_eq!(out.lines[0], "analyze the email first");
    }
}
