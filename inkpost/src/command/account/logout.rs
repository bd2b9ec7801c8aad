use crate::command::Context;
use eyre::Result;

pub fn run(ctx: &Context) -> Result<()> {
    if ctx.api.auth.logout(None) {
        println!("You are logged out!");
    } else {
        println!("You are not logged in.");
    }
    Ok(())
}
