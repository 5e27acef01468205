//! Top-level view/auth state machine.
//!
//! `transition` is pure: it returns the next state plus the side effects the
//! platform layer must carry out (currently only url edits).

use crate::diagnosis::model::DiagnosisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppView {
    Home,
    Diagnosis,
    Architecture,
    About,
    PublicReport,
}

impl AppView {
    /// Views reachable from the navbar, in display order.
    pub const NAV: [AppView; 4] = [
        AppView::Home,
        AppView::Diagnosis,
        AppView::Architecture,
        AppView::About,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    LoggedIn,
    Navigate(AppView),
    Logout,
    OpenReport(DiagnosisResult),
    LeaveReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEffect {
    /// Remove `reportId` from the current url.
    ClearReportParam,
}

/// What the shell renders for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    PublicReport,
    Page(AppView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub view: AppView,
    pub authenticated: bool,
    pub public_report: Option<DiagnosisResult>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::boot(None)
    }
}

impl AppState {
    /// Initial state: a decoded shared report opens straight into the public
    /// report view, otherwise Home behind the login gate.
    pub fn boot(report: Option<DiagnosisResult>) -> Self {
        let view = if report.is_some() {
            AppView::PublicReport
        } else {
            AppView::Home
        };
        Self {
            view,
            authenticated: false,
            public_report: report,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.view == AppView::PublicReport && self.public_report.is_some() {
            return Screen::PublicReport;
        }
        if !self.authenticated {
            return Screen::Login;
        }
        match self.view {
            AppView::PublicReport => Screen::Page(AppView::Home),
            view => Screen::Page(view),
        }
    }

    pub fn shows_navbar(&self) -> bool {
        matches!(self.screen(), Screen::Page(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: AppState,
    pub effects: Vec<ShellEffect>,
}

impl Transition {
    fn quiet(state: AppState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

pub fn transition(state: &AppState, event: AppEvent) -> Transition {
    let mut next = state.clone();

    match event {
        AppEvent::LoggedIn => {
            next.authenticated = true;
            if next.view != AppView::PublicReport {
                next.view = AppView::Home;
            }
            Transition::quiet(next)
        }
        AppEvent::Navigate(view) => {
            if next.authenticated && view != AppView::PublicReport {
                next.view = view;
            }
            Transition::quiet(next)
        }
        AppEvent::Logout => Transition {
            state: AppState {
                view: AppView::Home,
                authenticated: false,
                public_report: None,
            },
            effects: vec![ShellEffect::ClearReportParam],
        },
        AppEvent::OpenReport(report) => {
            next.public_report = Some(report);
            next.view = AppView::PublicReport;
            Transition::quiet(next)
        }
        AppEvent::LeaveReport => {
            next.public_report = None;
            next.view = AppView::Home;
            Transition {
                state: next,
                effects: vec![ShellEffect::ClearReportParam],
            }
        }
    }
}
