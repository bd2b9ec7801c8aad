use crate::command::Context;
use crate::utils::{read_input, read_input_hidden};
use clap::Parser;
use eyre::Result;
use inkpost_common::api::LoginRequest;

#[derive(Parser, Debug)]
pub struct Cmd {
    #[arg(long, short)]
    pub username: Option<String>,
    /// Read from the terminal when omitted
    #[arg(long, short)]
    pub password: Option<String>,
}

impl Cmd {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        if let Some(session) = ctx.session.current() {
            println!("You are already logged in as {}.", session.username);
            return Ok(());
        }

        let username = match self.username {
            Some(username) => username,
            None => read_input("username")?,
        };
        let password = match self.password {
            Some(password) => password,
            None => read_input_hidden("password")?,
        };

        let session = ctx
            .api
            .auth
            .login(&LoginRequest { username, password })
            .await?;

        println!("Logged in as {}.", session.username);
        Ok(())
    }
}
