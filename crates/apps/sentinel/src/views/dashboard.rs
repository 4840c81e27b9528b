//! Dashboard table view

use moderation::DashboardFilter;

pub fn render(dashboard: &DashboardFilter) -> String {
    let mut out = String::from("User Message Dashboard");
    if !dashboard.query().is_empty() {
        out.push_str(&format!("\nFilter: {}", dashboard.query()));
    }
    out.push_str(&format!(
        "\n{:>7}  {:<24} {:>6} {:>9} {:>5}",
        "User ID", "Email", "Non", "Moderate", "High"
    ));

    let rows = dashboard.visible();
    if rows.is_empty() {
        out.push_str("\nNo results found.");
    }
    for row in rows {
        out.push_str(&format!(
            "\n{:>7}  {:<24} {:>6} {:>9} {:>5}",
            row.user_id, row.email, row.non_count, row.moderate_count, row.high_count
        ));
    }
    out
}
