// ── Domain model ──
//
// Plain data carried between the controller, the session and the front
// ends. Nothing here owns a channel or a timer.

pub mod credentials;
pub mod user;

pub use credentials::Credentials;
pub use user::{Role, User, format_timestamp, greeting_for_hour};
