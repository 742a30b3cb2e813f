//! Login-flow state machine behind the QAfeteria UI-automation fixture.
//!
//! This crate owns every piece of behavior the front ends render:
//!
//! - **[`LoginController`]**: Validates submissions through a [`Verifier`],
//!   counts failures, and locks permanently after `max_attempts`. Publishes
//!   [`LoginState`] on a `watch` channel; every rejection is surfaced as a
//!   notification and returned as a [`SubmitOutcome`] value.
//!
//! - **[`NotificationPresenter`]**: One transient toast per view with a
//!   cancellable auto-dismiss timer. Tearing it down detaches the view and
//!   abandons any flow suspended on its behalf.
//!
//! - **[`Session`]**: Session phase, navigation history and the simulated
//!   logout sequence. Handoffs replace history and are announced as
//!   [`NavigationRequest`]s on a `broadcast` channel.
//!
//! - **Supporting pieces**: [`form`] field rules, the [`elements`]
//!   identifier catalogue, the mock [`User`] profile, and the pt-BR
//!   [`messages`] copy.

pub mod config;
pub mod elements;
pub mod error;
pub mod form;
pub mod login;
pub mod messages;
pub mod model;
pub mod navigation;
pub mod notification;
pub mod session;
pub mod validator;

mod sync;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{AuthExpectation, SessionConfig, Timing};
pub use error::{CoreError, LoginError, NavigationError};
pub use form::{Field, FieldError, LoginForm};
pub use login::{AttemptState, LoginController, LoginPhase, LoginState, SubmitOutcome};
pub use model::{Credentials, Role, User};
pub use navigation::{NavigationRequest, Navigator, Route};
pub use notification::{NotificationLevel, NotificationPresenter, NotificationState};
pub use session::{LogoutOutcome, Session, SessionPhase};
pub use validator::{ExpectationVerifier, Verifier, validate};
