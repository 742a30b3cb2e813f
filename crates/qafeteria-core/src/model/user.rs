// ── User profile ──
//
// The mock profile shown on the home screen. There is no account store:
// one profile is configured per process and stamped with a last-login
// time when the handoff completes.

use chrono::{DateTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Account role. Only changes the labels and the admin badge.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Label shown in the account section.
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "Usuário",
            Self::Admin => "Administrador",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: "1".into(),
            email: "vitor@app.com".into(),
            name: Some("Vitor".into()),
            role: Role::User,
            // 2024-01-01T00:00:00Z
            created_at: DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default(),
            last_login_at: None,
        }
    }
}

impl User {
    /// The configured name, or the local part of the email.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => self.email.split('@').next().unwrap_or(&self.email),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// "{greeting}, {name}!" for the given local time.
    pub fn welcome_line<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> String {
        format!("{}, {}!", greeting_for_hour(now.hour()), self.display_name())
    }

    /// Accessibility label of the welcome block.
    pub fn welcome_label(&self) -> String {
        format!("Mensagem de boas-vindas para {}", self.display_name())
    }
}

/// Time-of-day greeting: morning before noon, afternoon before 18h.
pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..12 => "Bom dia",
        12..18 => "Boa tarde",
        _ => "Boa noite",
    }
}

/// `dd/mm/yyyy hh:mm` in the timestamp's own zone.
pub fn format_timestamp<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%d/%m/%Y %H:%M").to_string()
}
