//! `qafeteria login`: run submissions against a fresh controller.

use serde::Serialize;
use tabled::Tabled;

use qafeteria_core::elements::id;
use qafeteria_core::{
    Credentials, LoginController, LoginError, LoginState, NavigationRequest, NotificationLevel,
    NotificationPresenter, Session, SessionConfig, SessionPhase, SubmitOutcome,
};

use crate::cli::LoginArgs;
use crate::commands::{Context, util};
use crate::error::{CliError, prompt_err};
use crate::output;

// ── Fixture ─────────────────────────────────────────────────────────

/// A session plus a login controller attached to a headless login view.
pub(crate) struct Fixture {
    pub session: Session,
    pub controller: LoginController,
}

impl Fixture {
    pub fn new(settings: &SessionConfig, instant: bool) -> Self {
        let mut settings = settings.clone();
        if instant {
            settings.timing = settings.timing.instant();
        }
        let session = Session::new(settings.timing, settings.user.clone());
        let presenter = NotificationPresenter::new(id::LOGIN_TOAST, settings.timing.toast_duration);
        let controller = LoginController::new(&settings, session.clone(), presenter);
        Self {
            session,
            controller,
        }
    }
}

// ── Report types ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AttemptRecord {
    pub attempt: u32,
    pub outcome: &'static str,
    pub level: Option<NotificationLevel>,
    pub notification: Option<String>,
    pub phase: SessionPhase,
    pub count: u32,
    pub locked: bool,
}

#[derive(Debug, Serialize)]
pub struct LoginReport {
    pub attempts: Vec<AttemptRecord>,
    pub navigation: Vec<NavigationRequest>,
    pub state: LoginState,
    pub phase: SessionPhase,
}

#[derive(Tabled)]
struct AttemptRow {
    #[tabled(rename = "#")]
    attempt: u32,
    #[tabled(rename = "Outcome")]
    outcome: &'static str,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Notification")]
    notification: String,
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Attempts")]
    attempts: String,
}

impl AttemptRecord {
    fn row(&self, max: u32, color: bool) -> AttemptRow {
        AttemptRow {
            attempt: self.attempt,
            outcome: self.outcome,
            level: self
                .level
                .map_or_else(|| "-".into(), |l| output::level_tag(l, color)),
            notification: self.notification.clone().unwrap_or_else(|| "-".into()),
            phase: self.phase.to_string(),
            attempts: format!(
                "{}/{max}{}",
                self.count,
                if self.locked { " (locked)" } else { "" }
            ),
        }
    }
}

/// Snapshot the controller right after a submission returned.
fn record(attempt: u32, outcome: &SubmitOutcome, fixture: &Fixture) -> AttemptRecord {
    let toast = fixture.controller.presenter().current();
    let state = fixture.controller.state();
    let emitted = !matches!(outcome, SubmitOutcome::Ignored | SubmitOutcome::Abandoned);
    AttemptRecord {
        attempt,
        outcome: outcome.kind(),
        level: emitted.then_some(toast.level),
        notification: emitted.then_some(toast.message),
        phase: fixture.session.phase(),
        count: state.attempts.count,
        locked: state.attempts.locked,
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: LoginArgs, ctx: &Context) -> Result<(), CliError> {
    let credentials = resolve_credentials(&args)?;
    let fixture = Fixture::new(&ctx.settings, args.instant);
    let mut navigation = fixture.session.navigation();

    let mut attempts = Vec::new();
    let mut last = SubmitOutcome::Ignored;
    for attempt in 1..=args.repeat {
        let spinner = util::spinner(
            &format!("Entrando... (tentativa {attempt})"),
            ctx.format,
            ctx.quiet,
        );
        last = fixture.controller.submit(credentials.clone()).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }
        tracing::debug!(attempt, outcome = last.kind(), "submission finished");
        attempts.push(record(attempt, &last, &fixture));
        if last == SubmitOutcome::Authenticated {
            break;
        }
    }

    let report = LoginReport {
        attempts,
        navigation: util::drain_navigation(&mut navigation),
        state: fixture.controller.state(),
        phase: fixture.session.phase(),
    };
    print_report(&report, ctx);
    verdict(&last, &report)
}

fn resolve_credentials(args: &LoginArgs) -> Result<Credentials, CliError> {
    let email = match &args.email {
        Some(email) => email.clone(),
        None if util::stdin_is_interactive() => dialoguer::Input::<String>::new()
            .with_prompt("Email")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)?,
        None => {
            return Err(CliError::MissingInput {
                field: "email".into(),
            });
        }
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None if util::stdin_is_interactive() => {
            rpassword::prompt_password("Senha: ").map_err(prompt_err)?
        }
        None => {
            return Err(CliError::MissingInput {
                field: "password".into(),
            });
        }
    };
    Ok(Credentials::new(email, password))
}

fn print_report(report: &LoginReport, ctx: &Context) {
    let max = report.state.max_attempts;
    let out = output::render_single(
        ctx.format,
        report,
        |r| {
            let rows: Vec<AttemptRow> = r.attempts.iter().map(|a| a.row(max, ctx.color)).collect();
            format!(
                "{}\nPhase:      {}\nNavigation: {}",
                output::render_table(&rows),
                r.phase,
                util::describe_navigation(&r.navigation),
            )
        },
        |r| {
            r.attempts
                .iter()
                .map(|a| {
                    format!(
                        "{}\t{}",
                        a.outcome,
                        a.notification.as_deref().unwrap_or_default()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, ctx.quiet);
}

/// Map the final outcome to the process result.
fn verdict(last: &SubmitOutcome, report: &LoginReport) -> Result<(), CliError> {
    let attempts = report.state.attempts;
    match last {
        SubmitOutcome::Authenticated => Ok(()),
        SubmitOutcome::Rejected(LoginError::MaxAttemptsExceeded) => Err(CliError::Locked {
            attempts: attempts.count,
        }),
        SubmitOutcome::Rejected(err) => Err(CliError::LoginRejected {
            kind: err.kind().into(),
            message: report
                .attempts
                .last()
                .and_then(|a| a.notification.clone())
                .unwrap_or_else(|| err.to_string()),
            remaining: report.state.max_attempts.saturating_sub(attempts.count),
        }),
        SubmitOutcome::Ignored | SubmitOutcome::Abandoned => Err(CliError::NoVerdict {
            outcome: last.kind().into(),
        }),
    }
}
