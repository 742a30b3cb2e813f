//! `qafeteria logout`: log in with the configured pair, then log out.

use secrecy::ExposeSecret;
use serde::Serialize;
use tabled::Tabled;

use qafeteria_core::elements::id;
use qafeteria_core::{
    Credentials, LogoutOutcome, NavigationRequest, NotificationLevel, NotificationPresenter,
    NotificationState, SessionPhase, SubmitOutcome, messages,
};

use crate::cli::LogoutArgs;
use crate::commands::login::Fixture;
use crate::commands::{Context, util};
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
pub struct StepRecord {
    pub step: &'static str,
    pub outcome: String,
    pub level: Option<NotificationLevel>,
    pub notification: Option<String>,
    pub phase: SessionPhase,
}

#[derive(Debug, Serialize)]
pub struct LogoutReport {
    pub steps: Vec<StepRecord>,
    pub navigation: Vec<NavigationRequest>,
    pub phase: SessionPhase,
    /// Result of trying to navigate back once the flow finished.
    pub back_navigation: String,
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "Step")]
    step: &'static str,
    #[tabled(rename = "Outcome")]
    outcome: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Notification")]
    notification: String,
    #[tabled(rename = "Phase")]
    phase: String,
}

impl StepRecord {
    fn new(
        step: &'static str,
        outcome: impl Into<String>,
        toast: Option<NotificationState>,
        phase: SessionPhase,
    ) -> Self {
        Self {
            step,
            outcome: outcome.into(),
            level: toast.as_ref().map(|t| t.level),
            notification: toast.map(|t| t.message),
            phase,
        }
    }

    fn row(&self, color: bool) -> StepRow {
        StepRow {
            step: self.step,
            outcome: self.outcome.clone(),
            level: self
                .level
                .map_or_else(|| "-".into(), |l| output::level_tag(l, color)),
            notification: self.notification.clone().unwrap_or_else(|| "-".into()),
            phase: self.phase.to_string(),
        }
    }
}

pub async fn handle(args: LogoutArgs, ctx: &Context) -> Result<(), CliError> {
    let fixture = Fixture::new(&ctx.settings, args.instant);
    let session = fixture.session.clone();
    let mut navigation = session.navigation();
    let mut steps = Vec::new();

    // ── Login with the configured pair ──
    let auth = &ctx.settings.auth;
    let credentials = Credentials::new(auth.email.clone(), auth.password.expose_secret());
    let spinner = util::spinner("Entrando...", ctx.format, ctx.quiet);
    let outcome = fixture.controller.submit(credentials).await;
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    steps.push(StepRecord::new(
        "login",
        outcome.kind(),
        Some(fixture.controller.presenter().current()),
        session.phase(),
    ));
    if outcome != SubmitOutcome::Authenticated {
        return Err(CliError::NoVerdict {
            outcome: outcome.kind().into(),
        });
    }

    // The login view is replaced by home.
    fixture.controller.detach();
    let home = NotificationPresenter::new(id::HOME_TOAST, ctx.settings.timing.toast_duration);

    // ── Confirm, then log out ──
    let confirmed = util::confirm(messages::LOGOUT_CONFIRM_BODY, "logout", ctx.yes)?;
    if confirmed {
        let spinner = util::spinner("Saindo...", ctx.format, ctx.quiet);
        let result = session.logout(&home).await;
        if let Some(bar) = spinner {
            bar.finish_and_clear();
        }
        let outcome = match result {
            Ok(LogoutOutcome::LoggedOut) => "logged_out",
            Ok(LogoutOutcome::Abandoned) => "abandoned",
            Err(e) => {
                tracing::warn!(error = %e, "logout failed");
                home.show(messages::LOGOUT_FAILED, NotificationLevel::Error);
                "failed"
            }
        };
        steps.push(StepRecord::new(
            "logout",
            outcome,
            Some(home.current()),
            session.phase(),
        ));
    } else {
        steps.push(StepRecord::new("logout", "cancelled", None, session.phase()));
    }

    let back_navigation = format!("refused: {}", session.go_back());

    let report = LogoutReport {
        steps,
        navigation: util::drain_navigation(&mut navigation),
        phase: session.phase(),
        back_navigation,
    };
    print_report(&report, ctx);
    home.teardown();
    Ok(())
}

fn print_report(report: &LogoutReport, ctx: &Context) {
    let out = output::render_single(
        ctx.format,
        report,
        |r| {
            let rows: Vec<StepRow> = r.steps.iter().map(|s| s.row(ctx.color)).collect();
            format!(
                "{}\nPhase:      {}\nNavigation: {}\nBack:       {}",
                output::render_table(&rows),
                r.phase,
                util::describe_navigation(&r.navigation),
                r.back_navigation,
            )
        },
        |r| {
            r.steps
                .iter()
                .map(|s| format!("{}\t{}", s.step, s.outcome))
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
    output::print_output(&out, ctx.quiet);
}
