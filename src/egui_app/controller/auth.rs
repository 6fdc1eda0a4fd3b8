use super::jobs::{LoginResult, RegisterResult};
use super::*;
use crate::api::Operation;
use crate::model::Credentials;
use crate::validation::{self, ValidationError};

impl AppController {
    pub fn submit_login(&mut self) {
        if self.ui.login.submitting {
            return;
        }
        let form = &self.ui.login;
        if let Err(err) = validation::check_credentials(&form.username, &form.password) {
            self.notify(NotificationTone::Error, "Login Failed", err.to_string());
            return;
        }
        let credentials = Credentials {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
        };
        self.ui.login.submitting = true;
        tracing::info!("Signing in as {}", credentials.username);
        self.jobs.login(credentials);
    }

    pub fn submit_register(&mut self) {
        if self.ui.register.submitting {
            return;
        }
        let form = &self.ui.register;
        match validation::check_registration(&form.username, &form.password, &form.confirm) {
            Ok(()) => {}
            Err(ValidationError::PasswordMismatch) => {
                self.notify(
                    NotificationTone::Error,
                    "Passwords don't match",
                    "Please make sure your passwords match",
                );
                return;
            }
            Err(err) => {
                self.notify(NotificationTone::Error, "Registration Failed", err.to_string());
                return;
            }
        }
        let credentials = Credentials {
            username: form.username.trim().to_string(),
            password: form.password.clone(),
        };
        self.ui.register.submitting = true;
        tracing::info!("Registering {}", credentials.username);
        self.jobs.register(credentials);
    }

    /// Drop the session and everything fetched under it.
    pub fn logout(&mut self) {
        let cleared = self.session.sign_out();
        self.reset_history();
        self.upload.reset();
        self.ui.login = Default::default();
        self.ui.register = Default::default();
        self.ui.screen = Screen::Login;
        match cleared {
            Ok(()) => tracing::info!("Signed out"),
            Err(err) => {
                tracing::warn!("Signed out, but the saved token remains: {err}");
                self.notify(
                    NotificationTone::Error,
                    "Logout incomplete",
                    format!(
                        "The saved session could not be removed and may sign you in again on next launch: {err}"
                    ),
                );
            }
        }
    }

    pub(super) fn handle_login_finished(&mut self, message: LoginResult) {
        if !self.ui.login.submitting {
            return;
        }
        self.ui.login.submitting = false;
        match message.result {
            Ok(token) => {
                if let Err(err) = self.session.sign_in(&token) {
                    tracing::warn!("Session token not persisted: {err}");
                    self.notify(
                        NotificationTone::Error,
                        "Session not saved",
                        format!("You are signed in, but will need to sign in again next launch: {err}"),
                    );
                }
                self.ui.login.password.clear();
                self.history.needs_load = true;
                tracing::info!("Signed in as {}", message.username);
                self.ui.screen = Screen::Analyze;
            }
            Err(err) => {
                let description = err.user_message(Operation::Login);
                tracing::warn!("Login failed: {err}");
                self.notify(NotificationTone::Error, "Login Failed", description);
            }
        }
    }

    pub(super) fn handle_register_finished(&mut self, message: RegisterResult) {
        if !self.ui.register.submitting {
            return;
        }
        self.ui.register.submitting = false;
        match message.result {
            Ok(()) => {
                tracing::info!("Registered {}", message.username);
                self.ui.register = Default::default();
                self.ui.login.username = message.username;
                self.notify(
                    NotificationTone::Success,
                    "Registration successful",
                    "Your account has been created. Please sign in.",
                );
                self.navigate(Screen::Login);
            }
            Err(err) => {
                let description = err.user_message(Operation::Register);
                tracing::warn!("Registration failed: {err}");
                self.notify(NotificationTone::Error, "Registration Failed", description);
            }
        }
    }
}
