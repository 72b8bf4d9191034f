use ammonia::clean_text;

use super::OutgoingEmail;
use crate::entities::contact_message::ContactMessage;

pub const REPLY_SUBJECT: &str = "Re: your message";

/// Escapes each line and joins them with `<br>`.
fn html_paragraph(text: &str) -> String {
    text.lines().map(clean_text).collect::<Vec<_>>().join("<br>")
}

/// Tells the site owner that someone used the contact form.
pub fn new_message_notification(message: &ContactMessage, recipient: &str) -> OutgoingEmail {
    let name = clean_text(&message.name);
    let email = clean_text(&message.email);

    let html_body = format!(
        r#"<h2>New Contact Form Submission</h2>
<p><strong>Name:</strong> {name}</p>
<p><strong>Email:</strong> {email}</p>
<p><strong>Message:</strong></p>
<p>{body}</p>
<p style="color:#666;font-size:12px">Reference ID: {id}</p>"#,
        body = html_paragraph(&message.message),
        id = message.id,
    );

    let text_body = format!(
        "New Contact Form Submission\n\nName: {}\nEmail: {}\n\n{}\n\nReference ID: {}",
        message.name, message.email, message.message, message.id
    );

    OutgoingEmail {
        to: recipient.to_string(),
        to_name: None,
        from_name: None,
        subject: format!("New Contact Form Submission from {}", message.name),
        text_body,
        html_body,
    }
}

/// Admin reply back to whoever wrote the original message.
pub fn reply_to_sender(message: &ContactMessage, reply_text: &str, sender_name: &str) -> OutgoingEmail {
    let admin = clean_text(sender_name);

    let html_body = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); padding: 20px; border-radius: 10px 10px 0 0;">
    <h2 style="color: white; margin: 0;">Reply from {admin}</h2>
  </div>
  <div style="background: #f8f9fa; padding: 20px; border-left: 4px solid #667eea;">
    <div style="background: white; padding: 15px; border-radius: 8px; border: 1px solid #e9ecef;">{reply}</div>
  </div>
  <div style="background: white; padding: 20px; border-radius: 0 0 10px 10px; border-top: 1px solid #e9ecef;">
    <p style="color: #666; margin: 0; font-size: 14px;">
      This is a reply to your message sent through the contact form on my website.<br>
      <strong>Reference ID:</strong> {id}
    </p>
  </div>
</div>"#,
        reply = html_paragraph(reply_text),
        id = message.id,
    );

    let text_body = format!(
        "Reply from {}\n\n{}\n\n---\nThis is a reply to your message sent through the contact form.\nReference ID: {}",
        sender_name, reply_text, message.id
    );

    OutgoingEmail {
        to: message.email.clone(),
        to_name: Some(message.name.clone()),
        from_name: Some(sender_name.to_string()),
        subject: REPLY_SUBJECT.to_string(),
        text_body,
        html_body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::contact_message::MessageStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn message() -> ContactMessage {
        ContactMessage {
            id: Uuid::new_v4(),
            name: "Mallory <script>".into(),
            email: "mallory@example.com".into(),
            message: "line one\n<img src=x onerror=alert(1)>".into(),
            status: MessageStatus::New,
            created_at: Utc::now(),
            reply_text: None,
            replied_at: None,
            email_sent: None,
            email_message_id: None,
        }
    }

    #[test]
    fn notification_escapes_user_input() {
        let email = new_message_notification(&message(), "owner@example.com");
        assert_eq!(email.to, "owner@example.com");
        assert!(!email.html_body.contains("<script>"));
        assert!(!email.html_body.contains("<img"));
        assert!(email.html_body.contains("<br>"));
        assert!(email.text_body.contains("line one"));
    }

    #[test]
    fn reply_goes_to_original_sender_with_reference() {
        let original = message();
        let email = reply_to_sender(&original, "Thanks <b>!</b>", "Admin of portfolio");
        assert_eq!(email.to, "mallory@example.com");
        assert_eq!(email.subject, REPLY_SUBJECT);
        assert_eq!(email.from_name.as_deref(), Some("Admin of portfolio"));
        assert!(!email.html_body.contains("<b>!</b>"));
        assert!(email.text_body.contains(&original.id.to_string()));
    }
}
