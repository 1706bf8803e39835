#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Send a single email from the command line

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::Parser;
use email_sender::{
    domain::communication::{
        config::{self, ConfigProvider},
        email_sender::{EmailSenderService, EmailSenderServiceImpl, SendEmailRequest},
    },
    infrastructure::{
        config::{env::SmtpArgs, file::FileConfig},
        email::smtp::SmtpMailer,
    },
};
use tracing::{error, info};

const CONFIG_TEMPLATE: &str = r#"
[email]
smtp_server = "smtp.example.com"
smtp_port = 587
smtp_username = "your-email@example.com"
smtp_password = "your-password-or-app-password"
use_tls = true
"#;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
#[command(about = "Send an email over SMTP")]
pub struct Args {
    /// TOML configuration file with an `[email]` section
    #[clap(long, env = "EMAIL_CONFIG")]
    pub config: Option<PathBuf>,

    /// SMTP settings, used when no configuration file is given
    #[clap(flatten)]
    pub smtp: SmtpArgs,

    /// Email address of the recipient
    #[clap(long)]
    pub to: String,

    /// Subject line of the email
    #[clap(long, default_value = "Test Email")]
    pub subject: String,

    /// Content of the email
    #[clap(
        long,
        default_value = "This is a test email sent from the email_sender tool."
    )]
    pub body: String,

    /// CC recipient, may be repeated
    #[clap(long)]
    pub cc: Vec<String>,

    /// BCC recipient, may be repeated
    #[clap(long)]
    pub bcc: Vec<String>,

    /// Treat the body as HTML
    #[clap(long)]
    pub html: bool,

    /// Print the result as JSON
    #[clap(long)]
    pub json: bool,
}

impl Args {
    fn request(&self) -> SendEmailRequest {
        SendEmailRequest::new(&self.to, &self.subject, &self.body)
            .with_cc(self.cc.clone())
            .with_bcc(self.bcc.clone())
            .html(self.html)
    }
}

async fn run<C: ConfigProvider>(provider: C, args: &Args) -> Result<ExitCode> {
    if config::resolve(&provider).is_err() {
        error!("Email configuration is missing or incomplete");
        info!(
            "Pass --config with a TOML file like the following, or set the SMTP_* variables:{}",
            CONFIG_TEMPLATE
        );

        return Ok(ExitCode::FAILURE);
    }

    let service = EmailSenderServiceImpl::new(Arc::new(provider), Arc::new(SmtpMailer::new()));

    info!("Sending email to {}...", args.to);

    let result = service.execute(&args.request()).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result);
    }

    if result.message_sent() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    match &args.config {
        Some(path) => run(FileConfig::load(path)?, &args).await,
        None => run(args.smtp.clone(), &args).await,
    }
}
