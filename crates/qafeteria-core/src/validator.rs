// ── Credential validation ──
//
// `validate` is the pure comparison. `Verifier` is the seam the controller
// calls through, so tests can inject a verifier that fails or counts calls.

use secrecy::ExposeSecret;

use crate::config::AuthExpectation;
use crate::error::CoreError;
use crate::model::Credentials;

/// True iff both fields match the expectation exactly.
///
/// Case-sensitive, no trimming. Plain string equality.
pub fn validate(submitted: &Credentials, expected: &AuthExpectation) -> bool {
    submitted.email == expected.email
        && submitted.password.expose_secret() == expected.password.expose_secret()
}

/// The simulated credential check behind a submission.
pub trait Verifier: Send + Sync + 'static {
    /// `Ok(false)` is a mismatch; `Err` is an unexpected failure of the
    /// simulated call itself.
    fn verify(&self, credentials: &Credentials) -> Result<bool, CoreError>;
}

/// Verifier backed by the configured expectation.
#[derive(Debug, Clone)]
pub struct ExpectationVerifier {
    expected: AuthExpectation,
}

impl ExpectationVerifier {
    pub fn new(expected: AuthExpectation) -> Self {
        Self { expected }
    }
}

impl Verifier for ExpectationVerifier {
    fn verify(&self, credentials: &Credentials) -> Result<bool, CoreError> {
        Ok(validate(credentials, &self.expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected() -> AuthExpectation {
        AuthExpectation::default()
    }

    #[test]
    fn exact_pair_matches() {
        assert!(validate(
            &Credentials::new("vitor@app.com", "vitor123"),
            &expected()
        ));
    }

    #[test]
    fn near_misses_are_rejected() {
        let cases = [
            ("Vitor@app.com", "vitor123"),
            ("VITOR@APP.COM", "vitor123"),
            (" vitor@app.com", "vitor123"),
            ("vitor@app.com ", "vitor123"),
            ("vitor@app.com", "Vitor123"),
            ("vitor@app.com", "vitor123 "),
            ("vitor@app.com", "vitor12"),
            ("", "vitor123"),
            ("vitor@app.com", ""),
            ("x@x.com", "bad"),
        ];
        for (email, password) in cases {
            assert!(
                !validate(&Credentials::new(email, password), &expected()),
                "{email:?}/{password:?} should not validate"
            );
        }
    }

    #[test]
    fn expectation_verifier_delegates() {
        let verifier = ExpectationVerifier::new(expected());
        assert!(matches!(
            verifier.verify(&Credentials::new("vitor@app.com", "vitor123")),
            Ok(true)
        ));
        assert!(matches!(
            verifier.verify(&Credentials::new("vitor@app.com", "nope")),
            Ok(false)
        ));
    }
}
