use super::Context;
use clap::Parser;
use eyre::Result;

mod login;
mod logout;
mod register;

#[derive(Parser, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    Login(login::Cmd),
    Register(register::Cmd),
    Logout,
    /// Fetch the logged in account from the server
    Whoami,
}

impl Cmd {
    pub(crate) async fn run(self, ctx: &Context) -> Result<()> {
        match self {
            Self::Login(cmd) => cmd.run(ctx).await,
            Self::Register(cmd) => cmd.run(ctx).await,
            Self::Logout => logout::run(ctx),
            Self::Whoami => whoami(ctx).await,
        }
    }
}

async fn whoami(ctx: &Context) -> Result<()> {
    ctx.require_login()?;
    let me = ctx.api.users.me().await?;

    println!("{} <{}>", me.username, me.email);
    println!("id:     {}", me.id);
    println!("role:   {}", me.role);
    println!("status: {:?}", me.status);
    Ok(())
}
