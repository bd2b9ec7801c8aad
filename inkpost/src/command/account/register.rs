use crate::command::Context;
use crate::utils::{read_input, read_input_hidden};
use clap::Parser;
use eyre::Result;
use inkpost_common::api::RegisterRequest;

#[derive(Parser, Debug)]
pub struct Cmd {
    #[arg(short, long)]
    username: Option<String>,
    #[arg(short, long)]
    email: Option<String>,
    #[arg(short, long)]
    password: Option<String>,
}

impl Cmd {
    pub async fn run(self, ctx: &Context) -> Result<()> {
        let username = match self.username {
            Some(username) => username,
            None => read_input("username")?,
        };
        let email = match self.email {
            Some(email) => email,
            None => read_input("email")?,
        };
        let password = match self.password {
            Some(password) => password,
            None => read_input_hidden("password")?,
        };

        let session = ctx
            .api
            .auth
            .register(&RegisterRequest {
                username,
                email,
                password,
            })
            .await?;

        println!("Welcome, {}! You are logged in.", session.username);
        Ok(())
    }
}
