//! User-facing copy emitted by the core flows.
//!
//! The fixture ships a single pt-BR locale; UI tests match on these exact
//! strings.

pub const FILL_ALL_FIELDS: &str = "Por favor, preencha todos os campos";
pub const TOO_MANY_ATTEMPTS: &str = "Muitas tentativas de login. Tente novamente mais tarde.";
pub const ACCOUNT_LOCKED: &str = "Muitas tentativas incorretas. Conta bloqueada temporariamente.";
pub const LOGIN_SUCCESS: &str = "Login realizado com sucesso!";
pub const INTERNAL_ERROR: &str = "Erro interno. Tente novamente.";
pub const LOCKED_NOTICE: &str =
    "Conta temporariamente bloqueada por excesso de tentativas incorretas.";

pub const LOGOUT_SUCCESS: &str = "Logout realizado com sucesso!";
pub const LOGOUT_FAILED: &str = "Erro ao fazer logout. Tente novamente.";
pub const LOGOUT_CONFIRM_TITLE: &str = "Confirmar Logout";
pub const LOGOUT_CONFIRM_BODY: &str = "Tem certeza que deseja sair?";
pub const LOGOUT_CONFIRM_CANCEL: &str = "Cancelar";
pub const LOGOUT_CONFIRM_ACCEPT: &str = "Sair";

pub const QUICK_ACTION_PROFILE: &str = "Ver Perfil";
pub const QUICK_ACTION_SETTINGS: &str = "Configurações";

pub fn invalid_credentials(attempt: u32, max: u32) -> String {
    format!("Credenciais incorretas. Tentativa {attempt} de {max}")
}

pub fn action_coming_soon(action: &str) -> String {
    format!("Ação \"{action}\" será implementada em breve!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_messages() {
        assert_eq!(
            invalid_credentials(2, 3),
            "Credenciais incorretas. Tentativa 2 de 3"
        );
        assert_eq!(
            action_coming_soon(QUICK_ACTION_PROFILE),
            "Ação \"Ver Perfil\" será implementada em breve!"
        );
    }
}
