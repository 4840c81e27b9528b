//! Login view

use moderation::{LoginForm, Session};

pub fn render(session: &Session, form: &LoginForm) -> String {
    if let Session::LoggedIn(email) = session {
        return format!("Welcome, {}!\nYou are successfully logged in.", email);
    }

    let mut out = String::from("Welcome Back\nPlease sign in to your account");
    if let Some(error) = &form.error {
        out.push_str(&format!("\n! {}", error));
    }
    if !form.email.is_empty() {
        out.push_str(&format!("\nEmail: {} (type 'submit' to sign in)", form.email));
    }
    out.push_str(&format!(
        "\nRemember me: {}",
        if form.remember_me { "on" } else { "off" }
    ));
    out
}
