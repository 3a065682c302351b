use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use roadmap_core::model::Credentials;
use services::AuthError;

use crate::context::AppContext;
use crate::routes::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    SignUp,
}

/// User-facing message for an authentication failure.
pub(crate) fn auth_error_message(error: &AuthError) -> &'static str {
    match error {
        AuthError::InvalidCredentials => {
            "Invalid email or password. Please check your credentials and try again."
        }
        AuthError::AlreadyRegistered => {
            "This email is already registered. Please try logging in instead."
        }
        AuthError::Malformed => "Please check your email and password.",
        _ => "An unexpected error occurred. Please try again.",
    }
}

#[component]
pub fn LoginView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let auth = ctx.auth();

    let mut mode = use_signal(|| AuthMode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);
    let mut session = use_signal({
        let auth = auth.clone();
        move || auth.current_session()
    });

    let auth_for_submit = auth.clone();
    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        error.set(None);
        let credentials = match Credentials::new(&email(), &password()) {
            Ok(credentials) => credentials,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        let auth = Arc::clone(&auth_for_submit);
        spawn(async move {
            busy.set(true);
            let result = match mode() {
                AuthMode::SignIn => auth.sign_in(&credentials).await,
                AuthMode::SignUp => auth.sign_up(&credentials).await,
            };
            busy.set(false);
            match result {
                Ok(new_session) => {
                    session.set(Some(new_session));
                    let _ = navigator.push(Route::Home {});
                }
                Err(err) => {
                    if matches!(err, AuthError::AlreadyRegistered) {
                        mode.set(AuthMode::SignIn);
                    }
                    error.set(Some(auth_error_message(&err).to_string()));
                }
            }
        });
    };

    let auth_for_sign_out = auth.clone();
    let sign_out = move |_| {
        auth_for_sign_out.sign_out();
        session.set(None);
    };

    let submit_label = match (mode(), busy()) {
        (AuthMode::SignIn, false) => "Log in",
        (AuthMode::SignIn, true) => "Logging in...",
        (AuthMode::SignUp, false) => "Create account",
        (AuthMode::SignUp, true) => "Creating account...",
    };

    rsx! {
        div { class: "page login-page",
            div { class: "auth-card",
                h2 { class: "view-title", "Welcome to Pathway" }
                if let Some(current) = session() {
                    p { class: "auth-signed-in", "Signed in as {current.email}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: sign_out,
                        "Sign out"
                    }
                } else {
                    div { class: "auth-tabs",
                        button {
                            class: if mode() == AuthMode::SignIn { "auth-tab auth-tab--active" } else { "auth-tab" },
                            r#type: "button",
                            onclick: move |_| {
                                mode.set(AuthMode::SignIn);
                                error.set(None);
                            },
                            "Log in"
                        }
                        button {
                            class: if mode() == AuthMode::SignUp { "auth-tab auth-tab--active" } else { "auth-tab" },
                            r#type: "button",
                            onclick: move |_| {
                                mode.set(AuthMode::SignUp);
                                error.set(None);
                            },
                            "Sign up"
                        }
                    }
                    if let Some(message) = error() {
                        p { class: "auth-error", "{message}" }
                    }
                    form { class: "auth-form", onsubmit: submit,
                        label { class: "auth-label", "Email"
                            input {
                                class: "auth-input",
                                r#type: "email",
                                placeholder: "you@example.com",
                                value: "{email}",
                                oninput: move |evt| email.set(evt.value()),
                            }
                        }
                        label { class: "auth-label", "Password"
                            input {
                                class: "auth-input",
                                r#type: "password",
                                placeholder: "At least 6 characters",
                                value: "{password}",
                                oninput: move |evt| password.set(evt.value()),
                            }
                        }
                        button {
                            class: "btn btn-primary auth-submit",
                            r#type: "submit",
                            disabled: busy(),
                            "{submit_label}"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::auth_error_message;
    use services::AuthError;

    #[test]
    fn maps_auth_failures_to_friendly_copy() {
        assert!(auth_error_message(&AuthError::InvalidCredentials).contains("Invalid email"));
        assert!(auth_error_message(&AuthError::AlreadyRegistered).contains("already registered"));
        assert!(auth_error_message(&AuthError::Malformed).contains("check your email"));
        assert!(
            auth_error_message(&AuthError::Unexpected("boom".into()))
                .contains("unexpected error")
        );
    }
}
