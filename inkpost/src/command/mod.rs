use clap::Subcommand;
use eyre::{eyre, Report, Result};
use inkpost_client::settings::Settings;
use inkpost_client::{ApiError, AuthEvent};
use tokio::sync::broadcast;
use tracing_subscriber::{self, fmt, prelude::*, EnvFilter};

mod account;
mod admin;
mod comment;
mod context;
mod feed;
mod info;
mod notifications;
mod post;
mod report;
mod user;

pub use context::Context;

#[derive(Subcommand, Debug)]
pub enum InkpostCmd {
    /// Show config paths and the current session
    Info,
    /// Log in, register, log out
    #[command(subcommand)]
    Account(account::Cmd),
    /// Browse the latest posts
    Feed(feed::Cmd),
    /// Read, write, like and attach media to posts
    #[command(subcommand)]
    Post(post::Cmd),
    #[command(subcommand)]
    Comment(comment::Cmd),
    /// Profiles and subscriptions
    #[command(subcommand)]
    User(user::Cmd),
    #[command(subcommand)]
    Notifications(notifications::Cmd),
    /// Report a user to the moderators
    Report(report::Cmd),
    /// Moderation, admins only
    #[command(subcommand)]
    Admin(admin::Cmd),
}

impl InkpostCmd {
    #[tokio::main]
    pub async fn run(self) -> Result<()> {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(EnvFilter::from_default_env())
            .init();

        let settings = Settings::new()?;
        let ctx = Context::new(settings)?;
        self.execute(&ctx).await
    }

    /// Runs the command against an already built context.
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        let mut events = ctx.session.events();

        let result = match self {
            Self::Info => {
                info::run(ctx);
                Ok(())
            }
            Self::Account(cmd) => cmd.run(ctx).await,
            Self::Feed(cmd) => cmd.run(ctx).await,
            Self::Post(cmd) => cmd.run(ctx).await,
            Self::Comment(cmd) => cmd.run(ctx).await,
            Self::User(cmd) => cmd.run(ctx).await,
            Self::Notifications(cmd) => cmd.run(ctx).await,
            Self::Report(cmd) => cmd.run(ctx).await,
            Self::Admin(cmd) => cmd.run(ctx).await,
        };

        show_redirects(&mut events);
        result.map_err(as_notice)
    }
}

/// The pipeline may have ended the session while the command ran.
fn show_redirects(events: &mut broadcast::Receiver<AuthEvent>) {
    while let Ok(event) = events.try_recv() {
        if let AuthEvent::RedirectToLogin {
            notice: Some(notice),
        } = event
        {
            eprintln!("{notice}");
            eprintln!("Run `inkpost account login` to sign in.");
        }
    }
}

/// Backend failures are shown as their short notice, not a report chain.
fn as_notice(err: Report) -> Report {
    match err.downcast_ref::<ApiError>() {
        Some(api) => eyre!(api.notice()),
        None => err,
    }
}
