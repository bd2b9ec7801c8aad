#![allow(dead_code)]

use clap::Parser;
use fake::faker::internet::en::{FreeEmail, Username};
use fake::Fake;
use inkpost::command::{Context, InkpostCmd};
use inkpost_client::settings::Settings;
use inkpost_client::storage::MemoryStore;
use inkpost_client::Session;
use inkpost_common::domain::Role;
use uuid::Uuid;
use wiremock::MockServer;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    cmd: InkpostCmd,
}

pub fn parse(args: &[&str]) -> InkpostCmd {
    Cli::try_parse_from(std::iter::once("inkpost").chain(args.iter().copied()))
        .unwrap()
        .cmd
}

pub struct TestCli {
    pub server: MockServer,
    pub ctx: Context,
    _data_dir: tempfile::TempDir,
}

impl TestCli {
    pub async fn build() -> Self {
        let server = MockServer::start().await;
        let data_dir = tempfile::TempDir::new().unwrap();

        let settings: Settings = Settings::builder()
            .unwrap()
            .set_override("api_url", format!("{}/api", server.uri()))
            .unwrap()
            .set_override("data_dir", data_dir.path().to_str())
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let ctx = Context::with_store(settings, Box::new(MemoryStore::new())).unwrap();
        Self {
            server,
            ctx,
            _data_dir: data_dir,
        }
    }

    pub async fn logged_in(role: Role) -> (Self, Session) {
        let cli = Self::build().await;
        let session = Session {
            id: Uuid::new_v4(),
            token: format!("tok-{}", Uuid::new_v4()),
            username: Username().fake(),
            email: FreeEmail().fake(),
            role,
        };
        cli.ctx.session.establish(session.clone()).unwrap();
        (cli, session)
    }

    pub async fn run(&self, args: &[&str]) -> eyre::Result<()> {
        parse(args).execute(&self.ctx).await
    }
}
