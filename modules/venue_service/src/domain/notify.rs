//! Booking notifications
//!
//! After a booking is persisted two e-mails go out: a confirmation to the
//! requester and an alert to the operator. Delivery is best-effort; failures
//! are logged with the booking id and never reach the HTTP caller.
//!
//! Two dispatch strategies implement [`BookingNotifier`]:
//! - [`QueuedNotifier`]: bounded queue drained by a background worker
//! - [`InlineNotifier`]: sends inside the request, both e-mails concurrently

use crate::contract::Booking;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Outgoing e-mail message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub to_name: Option<String>,
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// E-mail delivery failures; logged, never surfaced to clients
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("mail provider is not configured: {0}")]
    NotConfigured(String),

    #[error("mail transport failed: {0}")]
    Transport(String),

    #[error("mail provider rejected the message (status={status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Transactional e-mail sender
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), NotificationError>;
}

/// Everything needed to notify about one booking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingNotice {
    pub booking: Booking,
    pub site_name: String,
    /// Alert recipient; the alert is skipped when absent
    pub operator_email: Option<String>,
}

impl BookingNotice {
    /// Confirmation sent to the requester
    pub fn confirmation(&self) -> Email {
        let b = &self.booking;
        let text = format!(
            "Hello {name},\n\n\
             We received your booking request for a {kind} event on {date}.\n\
             We will contact you at {phone} to confirm the details.\n\n\
             {site}",
            name = b.name,
            kind = b.event_type,
            date = b.event_date,
            phone = b.phone,
            site = self.site_name,
        );
        let html = format!(
            "<p>Hello {name},</p>\
             <p>We received your booking request for a <strong>{kind}</strong> event on \
             <strong>{date}</strong>.</p>\
             <p>We will contact you at {phone} to confirm the details.</p>\
             <p>{site}</p>",
            name = escape_html(&b.name),
            kind = b.event_type,
            date = b.event_date,
            phone = escape_html(&b.phone),
            site = escape_html(&self.site_name),
        );
        Email {
            to: b.email.clone(),
            to_name: Some(b.name.clone()),
            reply_to: self.operator_email.clone(),
            subject: format!("{} - booking request received", self.site_name),
            text,
            html: Some(html),
        }
    }

    /// Alert sent to the operator, if one is configured
    pub fn operator_alert(&self) -> Option<Email> {
        let to = self.operator_email.clone()?;
        let b = &self.booking;
        let guests = b
            .guest_count
            .map(|g| g.to_string())
            .unwrap_or_else(|| "-".to_string());
        let message = b.message.as_deref().unwrap_or("-");
        let text = format!(
            "New booking request {id}\n\n\
             Name: {name}\nEmail: {email}\nPhone: {phone}\n\
             Event date: {date}\nEvent type: {kind}\nGuests: {guests}\n\
             Message: {message}\n",
            id = b.id,
            name = b.name,
            email = b.email,
            phone = b.phone,
            date = b.event_date,
            kind = b.event_type,
        );
        let html = format!(
            "<h2>New booking request</h2><table>\
             <tr><td>Name</td><td>{name}</td></tr>\
             <tr><td>Email</td><td>{email}</td></tr>\
             <tr><td>Phone</td><td>{phone}</td></tr>\
             <tr><td>Event date</td><td>{date}</td></tr>\
             <tr><td>Event type</td><td>{kind}</td></tr>\
             <tr><td>Guests</td><td>{guests}</td></tr>\
             <tr><td>Message</td><td>{message}</td></tr>\
             </table><p>Booking id: {id}</p>",
            name = escape_html(&b.name),
            email = escape_html(&b.email),
            phone = escape_html(&b.phone),
            date = b.event_date,
            kind = b.event_type,
            message = escape_html(message),
            id = b.id,
        );
        Some(Email {
            to,
            to_name: None,
            reply_to: Some(b.email.clone()),
            subject: format!("New booking: {} ({}, {})", b.name, b.event_type, b.event_date),
            text,
            html: Some(html),
        })
    }
}

/// Outcome of one notification round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryReport {
    pub confirmation_sent: bool,
    pub operator_alert_sent: bool,
}

/// Send both e-mails concurrently and log whatever fails
pub async fn deliver(mailer: &dyn Mailer, notice: &BookingNotice) -> DeliveryReport {
    let booking_id = notice.booking.id;
    let confirmation = notice.confirmation();
    let alert = notice.operator_alert();

    let (confirmation_result, alert_result) = futures::join!(mailer.send(&confirmation), async {
        match &alert {
            Some(email) => Some(mailer.send(email).await),
            None => None,
        }
    });

    let mut report = DeliveryReport::default();

    match confirmation_result {
        Ok(()) => report.confirmation_sent = true,
        Err(e) => error!(%booking_id, error = %e, "Failed to send booking confirmation"),
    }

    match alert_result {
        Some(Ok(())) => report.operator_alert_sent = true,
        Some(Err(e)) => error!(%booking_id, error = %e, "Failed to send operator booking alert"),
        None => warn!(%booking_id, "No operator address configured, booking alert skipped"),
    }

    debug!(%booking_id, ?report, "Booking notification round finished");
    report
}

/// Second phase of the booking workflow; must not fail the caller
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn booking_created(&self, notice: BookingNotice);
}

/// Sends inside the request; used when no background worker is wanted
pub struct InlineNotifier {
    mailer: Arc<dyn Mailer>,
}

impl InlineNotifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }
}

#[async_trait]
impl BookingNotifier for InlineNotifier {
    async fn booking_created(&self, notice: BookingNotice) {
        deliver(self.mailer.as_ref(), &notice).await;
    }
}

/// Hands notices to a background worker through a bounded queue
pub struct QueuedNotifier {
    tx: mpsc::Sender<BookingNotice>,
}

impl QueuedNotifier {
    /// Start the worker. It stops once `cancel` fires and the queue is drained.
    pub fn spawn(
        mailer: Arc<dyn Mailer>,
        capacity: usize,
        cancel: CancellationToken,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let handle = tokio::spawn(run_worker(mailer, rx, cancel));
        (Self { tx }, handle)
    }
}

#[async_trait]
impl BookingNotifier for QueuedNotifier {
    async fn booking_created(&self, notice: BookingNotice) {
        let booking_id = notice.booking.id;
        match self.tx.try_send(notice) {
            Ok(()) => debug!(%booking_id, "Booking notification queued"),
            Err(mpsc::error::TrySendError::Full(_)) => {
                error!(%booking_id, "Notification queue full, booking e-mails dropped")
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                error!(%booking_id, "Notification worker stopped, booking e-mails dropped")
            }
        }
    }
}

async fn run_worker(
    mailer: Arc<dyn Mailer>,
    mut rx: mpsc::Receiver<BookingNotice>,
    cancel: CancellationToken,
) {
    info!("Booking notification worker started");
    loop {
        tokio::select! {
            notice = rx.recv() => match notice {
                Some(notice) => {
                    deliver(mailer.as_ref(), &notice).await;
                }
                None => break,
            },
            _ = cancel.cancelled() => {
                rx.close();
                while let Some(notice) = rx.recv().await {
                    deliver(mailer.as_ref(), &notice).await;
                }
                break;
            }
        }
    }
    info!("Booking notification worker stopped");
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{BookingStatus, EventType};
    use chrono::{NaiveDate, Utc};
    use std::sync::Mutex;
    use uuid::Uuid;

    struct RecordingMailer {
        sent: Mutex<Vec<Email>>,
        fail_for: Option<String>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: &Email) -> Result<(), NotificationError> {
            if self.fail_for.as_deref() == Some(email.to.as_str()) {
                return Err(NotificationError::Transport("connection reset".to_string()));
            }
            self.sent.lock().unwrap().push(email.clone());
            Ok(())
        }
    }

    fn notice(operator: Option<&str>) -> BookingNotice {
        BookingNotice {
            booking: Booking {
                id: Uuid::new_v4(),
                name: "Ion <Popescu>".to_string(),
                email: "ion@test.ro".to_string(),
                phone: "0712345678".to_string(),
                event_date: NaiveDate::from_ymd_opt(2025, 12, 20).unwrap(),
                event_type: EventType::Party,
                guest_count: Some(50),
                message: None,
                status: BookingStatus::New,
                idempotency_key: None,
                created_at: Utc::now(),
            },
            site_name: "Venue".to_string(),
            operator_email: operator.map(str::to_string),
        }
    }

    #[test]
    fn html_bodies_escape_user_input() {
        let email = notice(Some("ops@venue.ro")).confirmation();
        let html = email.html.unwrap();
        assert!(html.contains("Ion &lt;Popescu&gt;"));
        assert!(!html.contains("<Popescu>"));
    }

    #[test]
    fn alert_requires_operator_address() {
        assert!(notice(None).operator_alert().is_none());
        let alert = notice(Some("ops@venue.ro")).operator_alert().unwrap();
        assert_eq!(alert.to, "ops@venue.ro");
        assert_eq!(alert.reply_to.as_deref(), Some("ion@test.ro"));
    }

    #[tokio::test]
    async fn deliver_sends_both_messages() {
        let mailer = RecordingMailer {
            sent: Mutex::new(Vec::new()),
            fail_for: None,
        };
        let report = deliver(&mailer, &notice(Some("ops@venue.ro"))).await;
        assert!(report.confirmation_sent && report.operator_alert_sent);
        assert_eq!(mailer.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn one_failure_does_not_block_the_other() {
        let mailer = RecordingMailer {
            sent: Mutex::new(Vec::new()),
            fail_for: Some("ion@test.ro".to_string()),
        };
        let report = deliver(&mailer, &notice(Some("ops@venue.ro"))).await;
        assert!(!report.confirmation_sent);
        assert!(report.operator_alert_sent);
    }

    #[tokio::test]
    async fn queued_worker_drains_on_cancel() {
        let mailer = Arc::new(RecordingMailer {
            sent: Mutex::new(Vec::new()),
            fail_for: None,
        });
        let cancel = CancellationToken::new();
        let (notifier, handle) = QueuedNotifier::spawn(mailer.clone(), 8, cancel.clone());

        notifier.booking_created(notice(Some("ops@venue.ro"))).await;
        notifier.booking_created(notice(None)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(mailer.sent.lock().unwrap().len(), 3);
    }
}
