//! Confirmation email delivery.
//!
//! SMTP via lettre when `SMTP_HOST` is configured; otherwise the rendered
//! message is written to the log so local signups can still be confirmed.

use anyhow::Context as _;
use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart, SinglePart, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use wayfinder_domain::email::Email;

use crate::config::ApiConfig;
use crate::domain::repository::Mailer;
use crate::domain::types::CONFIRMATION_TOKEN_TTL_MINS;
use crate::error::ApiError;

const CONFIRMATION_SUBJECT: &str = "Confirm your Wayfinder account";

#[derive(Template)]
#[template(path = "email/confirmation.html")]
struct ConfirmationEmailHtml<'a> {
    confirm_url: &'a str,
    ttl_mins: i64,
}

#[derive(Template)]
#[template(path = "email/confirmation.txt")]
struct ConfirmationEmailText<'a> {
    confirm_url: &'a str,
    ttl_mins: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum MailerSetupError {
    #[error("invalid sender address: {0}")]
    InvalidFrom(String),
    #[error("SMTP setup failed: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

// ── SMTP ─────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer for SmtpMailer {
    async fn send_confirmation(&self, to: &Email, confirm_url: &str) -> Result<(), ApiError> {
        let html = ConfirmationEmailHtml {
            confirm_url,
            ttl_mins: CONFIRMATION_TOKEN_TTL_MINS,
        }
        .render()
        .context("render confirmation html")?;
        let text = ConfirmationEmailText {
            confirm_url,
            ttl_mins: CONFIRMATION_TOKEN_TTL_MINS,
        }
        .render()
        .context("render confirmation text")?;

        let recipient: Mailbox = to.as_str().parse().context("parse recipient address")?;
        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(CONFIRMATION_SUBJECT)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )
            .context("build confirmation email")?;

        self.transport
            .send(message)
            .await
            .context("send confirmation email")?;
        tracing::info!(to = %to, "confirmation email sent");
        Ok(())
    }
}

// ── Log only ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send_confirmation(&self, to: &Email, confirm_url: &str) -> Result<(), ApiError> {
        let body = ConfirmationEmailText {
            confirm_url,
            ttl_mins: CONFIRMATION_TOKEN_TTL_MINS,
        }
        .render()
        .context("render confirmation text")?;
        tracing::info!(to = %to, subject = CONFIRMATION_SUBJECT, %body, "smtp disabled, email not sent");
        Ok(())
    }
}

// ── Selection ────────────────────────────────────────────────────────────────

/// Mailer chosen at startup from configuration.
#[derive(Clone)]
pub enum AppMailer {
    Smtp(SmtpMailer),
    Log(LogMailer),
}

impl AppMailer {
    pub fn from_config(config: &ApiConfig) -> Result<Self, MailerSetupError> {
        let Some(host) = config.smtp_host.as_deref() else {
            return Ok(Self::Log(LogMailer));
        };
        let from = config
            .mail_from
            .parse::<Mailbox>()
            .map_err(|_| MailerSetupError::InvalidFrom(config.mail_from.clone()))?;

        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(config.smtp_port);
        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }
        Ok(Self::Smtp(SmtpMailer {
            transport: builder.build(),
            from,
        }))
    }
}

impl Mailer for AppMailer {
    async fn send_confirmation(&self, to: &Email, confirm_url: &str) -> Result<(), ApiError> {
        match self {
            Self::Smtp(mailer) => mailer.send_confirmation(to, confirm_url).await,
            Self::Log(mailer) => mailer.send_confirmation(to, confirm_url).await,
        }
    }
}
