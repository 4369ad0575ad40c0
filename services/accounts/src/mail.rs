use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use url::Url;

use crate::domain::repository::{MailSender, SignedLinkCache};
use crate::domain::types::{LinkPurpose, OutboundMail};
use crate::usecase::link::SignedLinks;

pub fn welcome_mail(app_name: &str, name: &str, email: &str, link: &Url) -> OutboundMail {
    OutboundMail {
        to: email.to_owned(),
        subject: format!("Welcome to {app_name}"),
        html_body: format!(
            "<h3>Hello {name},</h3>\
             <p>Welcome to {app_name}! Please confirm your email address by clicking \
             <a href='{link}'>{link}</a></p>\
             <p>Or copy the link into your browser: {link}</p>\
             <p>The link is valid for 30 minutes.</p>"
        ),
    }
}

pub fn verify_mail(app_name: &str, email: &str, link: &Url) -> OutboundMail {
    OutboundMail {
        to: email.to_owned(),
        subject: format!("{app_name}: verify your email"),
        html_body: format!(
            "<h3>Hello,</h3>\
             <p>You asked to verify your email address. Please click \
             <a href='{link}'>{link}</a> to confirm it.</p>\
             <p>Or copy the link into your browser: {link}</p>\
             <p>The link is valid for 30 minutes.</p>"
        ),
    }
}

pub fn reset_mail(app_name: &str, name: &str, email: &str, link: &Url) -> OutboundMail {
    OutboundMail {
        to: email.to_owned(),
        subject: format!("{app_name}: reset your password"),
        html_body: format!(
            "<h3>Hello {name},</h3>\
             <p>You asked to reset your password. Please click \
             <a href='{link}'>{link}</a> to choose a new one.</p>\
             <p>Or copy the link into your browser: {link}</p>\
             <p>The link is valid for 30 minutes.</p>"
        ),
    }
}

/// A job for the background mail worker. Only registration mail goes through
/// the queue; reset and verify mail are sent synchronously by their use cases
/// so dispatch failures reach the caller.
#[derive(Debug, Clone)]
pub enum MailJob {
    Welcome { name: String, email: String },
}

/// Bounded handle to the mail worker. Enqueueing never blocks; when the queue
/// is full the job is dropped and logged, and the caller proceeds as if it
/// succeeded — registration must not stall on the email provider.
#[derive(Clone)]
pub struct MailQueue {
    tx: mpsc::Sender<MailJob>,
}

impl MailQueue {
    pub fn enqueue(&self, job: MailJob) {
        match self.tx.try_send(job) {
            Ok(()) => {}
            Err(TrySendError::Full(job)) => {
                tracing::error!(?job, "mail queue full, dropping job");
            }
            Err(TrySendError::Closed(job)) => {
                tracing::error!(?job, "mail worker gone, dropping job");
            }
        }
    }
}

/// Spawn the background mail worker and return its queue handle.
///
/// The welcome link is issued inside the worker: a cache or SMTP failure here
/// is logged and dropped, never surfaced to the registration caller.
pub fn spawn_mail_worker<C, M>(
    links: SignedLinks<C>,
    mailer: M,
    app_name: String,
    depth: usize,
) -> MailQueue
where
    C: SignedLinkCache + 'static,
    M: MailSender + 'static,
{
    let (tx, mut rx) = mpsc::channel(depth);
    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            let MailJob::Welcome { name, email } = job;
            let link = match links.issue(LinkPurpose::Verify, &email).await {
                Ok(link) => link,
                Err(e) => {
                    tracing::error!(error = %e, email = %email, "issue welcome link failed");
                    continue;
                }
            };
            let mail = welcome_mail(&app_name, &name, &email, &link);
            if let Err(e) = mailer.send(&mail).await {
                tracing::error!(error = %e, email = %email, "send welcome mail failed");
            }
        }
    });
    MailQueue { tx }
}
