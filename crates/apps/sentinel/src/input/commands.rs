//! Command parsing and help text

use moderation::{EmailId, Route};

/// Something the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// Navigate to a view
    Go(Route),
    Login { email: String, password: String },
    /// Submit the (possibly pre-filled) login form as is
    Submit,
    Remember(bool),
    Logout,
    Open(EmailId),
    Close(EmailId),
    Toggle(EmailId),
    Analyze(EmailId),
    Report(EmailId),
    /// Set the dashboard filter; empty clears it
    Filter(String),
}

/// Help text listing every command
pub fn help_text() -> &'static str {
    "Commands:\n\
     \x20 go <login|email|dashboard>   switch view\n\
     \x20 login <email> <password>     sign in (password is the rest of the line)\n\
     \x20 submit                       sign in with the pre-filled form\n\
     \x20 remember <on|off>            remember credentials on this machine\n\
     \x20 logout                       sign out\n\
     \x20 open|close|toggle <id>       expand or collapse an email\n\
     \x20 analyze <id>                 send an open email for analysis\n\
     \x20 report <id>                  show or hide the analysis report\n\
     \x20 filter [text]                filter the dashboard by email\n\
     \x20 help                         show this help\n\
     \x20 quit                         exit"
}

/// Parse one input line
pub fn parse(line: &str) -> Result<Command, String> {
    let line = line.trim_start();
    // `raw` keeps its spacing for arguments where spaces matter
    let (word, raw) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = raw.trim();

    match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "go" => parse_route(rest).map(Command::Go),
        "login" => match raw.trim_start().split_once(char::is_whitespace) {
            // Password is the rest of the line, spaces included
            Some((email, password)) if !password.is_empty() => Ok(Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            }),
            _ => Err("usage: login <email> <password>".to_string()),
        },
        "submit" => Ok(Command::Submit),
        "remember" => match rest {
            "on" | "yes" | "true" => Ok(Command::Remember(true)),
            "off" | "no" | "false" => Ok(Command::Remember(false)),
            _ => Err("usage: remember <on|off>".to_string()),
        },
        "logout" => Ok(Command::Logout),
        "open" => parse_id(rest).map(Command::Open),
        "close" => parse_id(rest).map(Command::Close),
        "toggle" => parse_id(rest).map(Command::Toggle),
        "analyze" => parse_id(rest).map(Command::Analyze),
        "report" => parse_id(rest).map(Command::Report),
        "filter" => Ok(Command::Filter(raw.to_string())),
        "" => Err(String::new()),
        other => Err(format!("unknown command '{}' (try 'help')", other)),
    }
}

fn parse_id(arg: &str) -> Result<EmailId, String> {
    arg.parse()
        .map_err(|_| format!("expected an email id, got '{}'", arg))
}

fn parse_route(arg: &str) -> Result<Route, String> {
    match arg {
        "login" => Ok(Route::Login),
        "email" | "emails" | "inbox" => Ok(Route::Emails),
        "dashboard" => Ok(Route::Dashboard),
        path => Route::from_path(path).ok_or_else(|| format!("unknown view '{}'", path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_login() {
        assert_eq!(
            parse("login user@example.com password123"),
            Ok(Command::Login {
                email: "user@example.com".to_string(),
                password: "password123".to_string(),
            })
        );
        assert!(parse("login user@example.com").is_err());
        assert!(parse("login user@example.com ").is_err());
    }

    #[test]
    fn test_parse_login_password_with_spaces() {
        assert_eq!(
            parse("login ops@example.com correct horse battery "),
            Ok(Command::Login {
                email: "ops@example.com".to_string(),
                password: "correct horse battery ".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_item_commands() {
        assert_eq!(parse("open 7"), Ok(Command::Open(7)));
        assert_eq!(parse("  ANALYZE 7 "), Ok(Command::Analyze(7)));
        assert_eq!(parse("report 7"), Ok(Command::Report(7)));
        assert!(parse("open seven").is_err());
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(parse("go dashboard"), Ok(Command::Go(Route::Dashboard)));
        assert_eq!(parse("go /email"), Ok(Command::Go(Route::Emails)));
        assert!(parse("go nowhere").is_err());
    }

    #[test]
    fn test_parse_filter_keeps_text() {
        assert_eq!(parse("filter USER1"), Ok(Command::Filter("USER1".to_string())));
        assert_eq!(parse("filter"), Ok(Command::Filter(String::new())));
        assert_eq!(parse("filter  user1 "), Ok(Command::Filter(" user1 ".to_string())));
    }

    #[test]
    fn test_parse_remember() {
        assert_eq!(parse("remember on"), Ok(Command::Remember(true)));
        assert_eq!(parse("remember off"), Ok(Command::Remember(false)));
        assert!(parse("remember maybe").is_err());
    }

    #[test]
    fn test_unknown_and_empty() {
        assert!(parse("frobnicate").unwrap_err().contains("unknown command"));
        assert_eq!(parse("   "), Err(String::new()));
    }
}
