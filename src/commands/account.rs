use super::{user_message, ActionOutcome};
use crate::auth::validation::{validate_credentials, validate_registration};
use crate::core_state::CoreState;
use crate::db::KeyValueStore;
use crate::diagnosis::DiagnosisGenerator;
use crate::error::AppError;
use crate::models::SessionUser;

/// Create an account from the registration form. Does not log in.
pub fn register<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ActionOutcome {
    if let Err(e) = validate_registration(email, password, confirm_password) {
        return ActionOutcome::failed(e.to_string());
    }
    match state.register(email, password) {
        Ok(_) => ActionOutcome::ok_with("You can now log in with your new account."),
        Err(e) => ActionOutcome::failed(user_message(&e, "Registration failed. Please try again.")),
    }
}

pub fn login<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
    email: &str,
    password: &str,
) -> ActionOutcome {
    if let Err(e) = validate_credentials(email, password) {
        return ActionOutcome::failed(e.to_string());
    }
    match state.login(email, password) {
        Ok(_) => ActionOutcome::ok_with("Welcome back!"),
        Err(e) => ActionOutcome::failed(user_message(&e, "Login failed. Please try again.")),
    }
}

/// Always reports success; a failure to clear state is only logged.
pub fn logout<S: KeyValueStore, G: DiagnosisGenerator>(state: &CoreState<S, G>) -> ActionOutcome {
    if let Err(e) = state.logout() {
        tracing::warn!(error = %e, "Logout did not complete cleanly");
    }
    ActionOutcome::ok()
}

pub fn delete_account<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
) -> ActionOutcome {
    match state.delete_account() {
        Ok(()) => ActionOutcome::ok_with("Account deleted successfully."),
        Err(AppError::NoActiveSession) => ActionOutcome::failed("No user logged in to delete."),
        Err(e) => ActionOutcome::failed(user_message(
            &e,
            "Account deletion failed. Please try again.",
        )),
    }
}

pub fn current_user<S: KeyValueStore, G: DiagnosisGenerator>(
    state: &CoreState<S, G>,
) -> Result<Option<SessionUser>, String> {
    state.current_user().map_err(|e| e.to_string())
}
