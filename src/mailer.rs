//! Outbound SMTP email: digest deliveries and quote-request inquiries.

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use tracing::info;

use crate::digest::format_currency;
use crate::types::{Plan, QuoteBreakdown, Result};

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Sender identity on every outbound message.
    pub from_address: String,
    /// The studio inbox that receives quote requests.
    pub studio_address: String,
}

pub struct Mailer {
    transport: SmtpTransport,
    from: Mailbox,
    studio: Mailbox,
}

impl Mailer {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let transport = SmtpTransport::relay(&config.smtp_host)?
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: config.from_address.parse()?,
            studio: config.studio_address.parse()?,
        })
    }

    pub fn send_digest(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to.parse()?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(&message)?;
        info!(to, "digest sent");
        Ok(())
    }

    /// Forward a visitor's quote request to the studio, with the visitor on
    /// reply-to so the conversation continues off-platform.
    pub fn send_quote_request(&self, visitor: &str, subject: &str, body: &str) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .reply_to(visitor.parse()?)
            .to(self.studio.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())?;

        self.transport.send(&message)?;
        info!(visitor, "quote request forwarded");
        Ok(())
    }
}

/// The structured inquiry body a visitor sends after picking a plan.
pub fn quote_request_body(
    title: &str,
    fee: i64,
    plan: Plan,
    breakdown: &QuoteBreakdown,
) -> String {
    let price = breakdown.plans.price(plan);
    format!(
        "안녕하세요, 위너스케치 견적 시스템을 통해 문의드립니다.\n\
         \n\
         1. 프로젝트명: {}\n\
         2. 공고 설계비: {}원\n\
         3. 선택 플랜: {}\n\
         4. 예상 견적가: {}원 (적용 요율 {}%)\n\
         5. 비고: {}\n\
         \n\
         --------------------------------------------------\n\
         [추가 요청 사항]\n\
         (이곳에 원하시는 작업 범위나 일정을 적어주세요.)\n\
         --------------------------------------------------\n",
        title,
        format_currency(fee),
        plan.label(),
        format_currency(price),
        breakdown.rate_display(),
        breakdown.note
    )
}
