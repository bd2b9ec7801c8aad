use clap::Parser;
use eyre::Result;
use inkpost::command::InkpostCmd;
use inkpost::VERSION;

#[derive(Parser)]
#[command(
    author = "Sam Uherek",
    version = VERSION,
    about = "Command line client for the inkpost blogging backend",
    infer_subcommands = true,
)]
struct Inkpost {
    #[command(subcommand)]
    inkpost: InkpostCmd,
}

impl Inkpost {
    fn run(self) -> Result<()> {
        self.inkpost.run()
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    Inkpost::parse().run()
}
