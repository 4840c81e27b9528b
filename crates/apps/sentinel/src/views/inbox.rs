//! Email list view with inline analysis state

use moderation::{AnalysisCoordinator, AnalysisPhase, AnalysisReport, EmailItem, ItemAnalysisState};

/// Render the whole inbox
pub fn render(inbox: &AnalysisCoordinator) -> String {
    let mut out = String::from("Inbox");
    if inbox.emails().is_empty() {
        out.push_str("\n  (empty)");
    }
    for email in inbox.emails() {
        if let Some(state) = inbox.state(email.id) {
            out.push('\n');
            out.push_str(&render_item(email, state));
        }
    }
    out
}

/// Render one item: a summary line, plus body and analysis when expanded
pub fn render_item(email: &EmailItem, state: &ItemAnalysisState) -> String {
    let marker = if state.is_expanded() { "v" } else { ">" };
    let mut out = format!("{} [{}] {}", marker, email.id, email.subject);
    if let Some(sender) = &email.sender {
        out.push_str(&format!("  <{}>", sender));
    }
    if !state.is_expanded() {
        return out;
    }

    out.push_str(&format!("\n    {}", email.content));
    let status = match state.phase() {
        AnalysisPhase::Idle => "[Analyze]".to_string(),
        AnalysisPhase::Loading => "[Analyzing...]".to_string(),
        AnalysisPhase::Analyzed { report_visible, .. } => {
            let label = if *report_visible { "Hide Report" } else { "Show Report" };
            format!("[Analyze] [{}]", label)
        }
        AnalysisPhase::Failed { .. } => "[Analyze] (last attempt failed)".to_string(),
    };
    out.push_str(&format!("\n    {}", status));

    if state.report_visible() {
        if let Some(result) = state.result() {
            for line in AnalysisReport(result).to_string().lines() {
                out.push_str(&format!("\n    | {}", line));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapsed_item_is_one_line() {
        let email = EmailItem::new(7, "Get Your Act Together", "body").with_sender("g@example.com");
        let out = render_item(&email, &ItemAnalysisState::new());
        assert_eq!(out, "> [7] Get Your Act Together  <g@example.com>");
    }

    #[test]
    fn test_expanded_idle_item_shows_body() {
        let email = EmailItem::new(1, "Hi", "Hello there");
        let mut state = ItemAnalysisState::new();
        state.open();
        let out = render_item(&email, &state);
        assert!(out.contains("Hello there"));
        assert!(out.contains("[Analyze]"));
    }
}
