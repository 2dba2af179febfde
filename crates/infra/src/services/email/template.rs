use subtrack_domain::{date::format_date, Subscription};

pub fn reminder_subject(subscription: &Subscription) -> String {
    format!("Reminder: {} renews soon", subscription.name)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn reminder_html(subscription: &Subscription) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; padding: 20px; background-color: #f4f4f9;">
  <div style="max-width: 600px; margin: 0 auto; background: white; padding: 20px; border-radius: 10px;">
    <h2 style="color: #4f46e5;">Subscription Renewal Reminder</h2>
    <p>Hi there,</p>
    <p>Your subscription for <strong>{name}</strong> is set to renew on <strong>{date}</strong>.</p>
    <p>Amount: <strong>{amount:.2} {currency}</strong></p>
    <hr style="border: 0; border-top: 1px solid #eee; margin: 20px 0;" />
    <p style="font-size: 12px; color: #666;">This is an automated message from your Smart Subscription Tracker.</p>
  </div>
</div>"#,
        name = escape_html(&subscription.name),
        date = format_date(&subscription.renewal_date),
        amount = subscription.price,
        currency = escape_html(&subscription.currency),
    )
}
