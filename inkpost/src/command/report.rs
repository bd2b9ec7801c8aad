use super::Context;
use crate::utils::read_input;
use clap::Parser;
use eyre::Result;
use inkpost_common::api::CreateReportRequest;
use uuid::Uuid;

#[derive(Parser, Debug)]
pub struct Cmd {
    user_id: Uuid,
    /// Why this user should be looked at, up to 500 characters
    #[arg(long, short)]
    reason: Option<String>,
}

impl Cmd {
    pub(crate) async fn run(self, ctx: &Context) -> Result<()> {
        let me = ctx.require_login()?;
        if me.id == self.user_id {
            eyre::bail!("You cannot report yourself.");
        }

        let req = CreateReportRequest {
            reported_user_id: self.user_id,
            reason: self.reason.map_or_else(|| read_input("reason"), Ok)?,
        };
        let message = ctx.api.reports.create(&req).await?;
        println!(
            "{}",
            message.unwrap_or_else(|| "Report submitted successfully".into())
        );
        Ok(())
    }
}
