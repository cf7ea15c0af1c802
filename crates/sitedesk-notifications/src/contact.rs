//! Contact submission notification rendering.

use sitedesk_storage::ContactRequest;
use time::format_description::well_known::Rfc3339;

/// Subject line for a new-submission notification.
#[must_use]
pub fn notification_subject(request: &ContactRequest) -> String {
    format!("New contact request from {}", request.name)
}

/// HTML body for a new-submission notification.
///
/// All submitter-controlled values are HTML-escaped before interpolation.
#[must_use]
pub fn notification_body(request: &ContactRequest) -> String {
    let mut rows = vec![
        format!("<p><strong>Name:</strong> {}</p>", escape(&request.name)),
        format!("<p><strong>Email:</strong> {}</p>", escape(&request.email)),
    ];

    if let Some(phone) = &request.phone {
        rows.push(format!("<p><strong>Phone:</strong> {}</p>", escape(phone)));
    }

    rows.push(format!(
        "<p><strong>Message:</strong><br>{}</p>",
        escape(&request.message).replace('\n', "<br>")
    ));

    let received = request
        .created_at
        .format(&Rfc3339)
        .unwrap_or_else(|_| request.created_at.to_string());
    let mut footer = format!("Received {received}");
    if let Some(ip) = &request.ip_address {
        footer.push_str(&format!(" from {}", escape(ip)));
    }
    if let Some(agent) = &request.user_agent {
        footer.push_str(&format!(" ({})", escape(agent)));
    }
    rows.push(format!("<p><em>{footer}</em></p>"));

    format!("<h2>New contact request</h2>\n{}", rows.join("\n"))
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
