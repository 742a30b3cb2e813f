// ── Element identifiers ──
//
// Stable test identifiers and accessibility labels exposed by the two
// screens. UI automation matches on these strings, so they are part of the
// public surface. Child identifiers are `{parent}-{suffix}`.

use serde::Serialize;
use strum::Display;

use crate::navigation::Route;

pub mod id {
    pub const LOGIN_SCREEN: &str = "login-screen";
    pub const LOGIN_TITLE: &str = "login-title";
    pub const LOGIN_SUBTITLE: &str = "login-subtitle";
    pub const LOGIN_FORM: &str = "login-form";
    pub const EMAIL_INPUT: &str = "login-form-email-input";
    pub const PASSWORD_INPUT: &str = "login-form-password-input";
    pub const SUBMIT_BUTTON: &str = "login-form-submit-button";
    pub const LOGIN_BLOCKED_MESSAGE: &str = "login-blocked-message";
    pub const LOGIN_CREDENTIALS_HINT: &str = "login-credentials-hint";
    pub const LOGIN_TOAST: &str = "login-toast";

    pub const HOME_SCREEN: &str = "home-screen";
    pub const WELCOME_MESSAGE: &str = "welcome-message";
    pub const QUICK_ACTIONS_TITLE: &str = "quick-actions-title";
    pub const PROFILE_BUTTON: &str = "profile-button";
    pub const SETTINGS_BUTTON: &str = "settings-button";
    pub const ACCOUNT_SECTION_TITLE: &str = "account-section-title";
    pub const USER_EMAIL: &str = "user-email";
    pub const USER_ROLE: &str = "user-role";
    pub const LOGOUT_BUTTON: &str = "logout-button";
    pub const HOME_TOAST: &str = "home-toast";
}

/// Suffix of a derived child identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Suffix {
    Label,
    Error,
    Text,
    Loader,
    Greeting,
    Subtitle,
    LastLogin,
    AdminBadge,
}

/// `{parent}-{suffix}`.
pub fn derived(parent: &str, suffix: Suffix) -> String {
    format!("{parent}-{suffix}")
}

/// Accessibility role reported for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementRole {
    Screen,
    Header,
    Text,
    Input,
    Button,
    Progress,
    Alert,
    Group,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Element {
    pub id: &'static str,
    pub route: Route,
    pub role: ElementRole,
    /// Fixed accessibility label. `None` when the label is the visible
    /// text or depends on runtime data.
    pub label: Option<&'static str>,
    pub description: &'static str,
}

const fn element(
    id: &'static str,
    route: Route,
    role: ElementRole,
    label: Option<&'static str>,
    description: &'static str,
) -> Element {
    Element {
        id,
        route,
        role,
        label,
        description,
    }
}

static CATALOGUE: &[Element] = &[
    // ── Login ────────────────────────────────────────────────────────
    element(id::LOGIN_SCREEN, Route::Login, ElementRole::Screen, None, "login screen root"),
    element(id::LOGIN_TITLE, Route::Login, ElementRole::Header, None, "app title"),
    element(id::LOGIN_SUBTITLE, Route::Login, ElementRole::Text, None, "sign-in prompt"),
    element(id::LOGIN_FORM, Route::Login, ElementRole::Group, None, "login form"),
    element(id::EMAIL_INPUT, Route::Login, ElementRole::Input, Some("Campo de email"), "email field"),
    element("login-form-email-input-label", Route::Login, ElementRole::Text, None, "email field label"),
    element("login-form-email-input-error", Route::Login, ElementRole::Alert, None, "email field error"),
    element(id::PASSWORD_INPUT, Route::Login, ElementRole::Input, Some("Campo de senha"), "password field"),
    element("login-form-password-input-label", Route::Login, ElementRole::Text, None, "password field label"),
    element("login-form-password-input-error", Route::Login, ElementRole::Alert, None, "password field error"),
    element(id::SUBMIT_BUTTON, Route::Login, ElementRole::Button, Some("Botão de login"), "submit button"),
    element("login-form-submit-button-loader", Route::Login, ElementRole::Progress, None, "submit spinner"),
    element(id::LOGIN_BLOCKED_MESSAGE, Route::Login, ElementRole::Alert, None, "lockout notice"),
    element(id::LOGIN_CREDENTIALS_HINT, Route::Login, ElementRole::Text, None, "demo credentials hint"),
    element(id::LOGIN_TOAST, Route::Login, ElementRole::Alert, None, "login notification"),
    element("login-toast-text", Route::Login, ElementRole::Text, None, "login notification text"),
    // ── Home ─────────────────────────────────────────────────────────
    element(id::HOME_SCREEN, Route::Home, ElementRole::Screen, None, "home screen root"),
    element(id::WELCOME_MESSAGE, Route::Home, ElementRole::Text, None, "welcome block"),
    element("welcome-message-greeting", Route::Home, ElementRole::Header, None, "time-of-day greeting"),
    element("welcome-message-subtitle", Route::Home, ElementRole::Text, None, "welcome subtitle"),
    element("welcome-message-last-login", Route::Home, ElementRole::Text, None, "last login time"),
    element("welcome-message-admin-badge", Route::Home, ElementRole::Text, Some("Usuário administrador"), "admin badge"),
    element(id::QUICK_ACTIONS_TITLE, Route::Home, ElementRole::Header, None, "quick actions heading"),
    element(id::PROFILE_BUTTON, Route::Home, ElementRole::Button, Some("Botão para ver perfil"), "profile quick action"),
    element(id::SETTINGS_BUTTON, Route::Home, ElementRole::Button, Some("Botão para acessar configurações"), "settings quick action"),
    element(id::ACCOUNT_SECTION_TITLE, Route::Home, ElementRole::Header, None, "account heading"),
    element(id::USER_EMAIL, Route::Home, ElementRole::Text, None, "signed-in email"),
    element(id::USER_ROLE, Route::Home, ElementRole::Text, None, "signed-in role"),
    element(id::LOGOUT_BUTTON, Route::Home, ElementRole::Button, Some("Botão de logout"), "logout button"),
    element("logout-button-loader", Route::Home, ElementRole::Progress, None, "logout spinner"),
    element(id::HOME_TOAST, Route::Home, ElementRole::Alert, None, "home notification"),
    element("home-toast-text", Route::Home, ElementRole::Text, None, "home notification text"),
];

/// Every identifier, in screen order.
pub fn catalogue() -> &'static [Element] {
    CATALOGUE
}

pub fn for_route(route: Route) -> impl Iterator<Item = &'static Element> {
    CATALOGUE.iter().filter(move |e| e.route == route)
}

pub fn find(id: &str) -> Option<&'static Element> {
    CATALOGUE.iter().find(|e| e.id == id)
}

/// Label for the error line of an input: "Erro: {message}".
pub fn error_label(message: &str) -> String {
    format!("Erro: {message}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn identifiers_are_unique() {
        let mut seen = HashSet::new();
        for element in catalogue() {
            assert!(seen.insert(element.id), "duplicate id {}", element.id);
        }
    }

    #[test]
    fn derived_identifiers_are_catalogued() {
        let derived_ids = [
            derived(id::EMAIL_INPUT, Suffix::Error),
            derived(id::PASSWORD_INPUT, Suffix::Label),
            derived(id::SUBMIT_BUTTON, Suffix::Loader),
            derived(id::LOGIN_TOAST, Suffix::Text),
            derived(id::HOME_TOAST, Suffix::Text),
            derived(id::WELCOME_MESSAGE, Suffix::LastLogin),
            derived(id::WELCOME_MESSAGE, Suffix::AdminBadge),
            derived(id::LOGOUT_BUTTON, Suffix::Loader),
        ];
        for derived_id in &derived_ids {
            assert!(find(derived_id).is_some(), "{derived_id} missing from catalogue");
        }
    }

    #[test]
    fn routes_partition_catalogue() {
        let login = for_route(Route::Login).count();
        let home = for_route(Route::Home).count();
        assert_eq!(login + home, catalogue().len());
        assert_eq!(find(id::SUBMIT_BUTTON).and_then(|e| e.label), Some("Botão de login"));
    }
}
