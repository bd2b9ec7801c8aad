use super::Context;
use crate::display;
use crate::utils::read_input;
use clap::Parser;
use eyre::Result;
use inkpost_client::paging::{Accumulator, Mode, PagedList};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    /// Totals for users, posts and reports
    Stats,
    Users {
        #[arg(long, short, default_value_t = 0)]
        page: u32,
    },
    Ban {
        id: Uuid,
        #[arg(long, short)]
        yes: bool,
    },
    Unban { id: Uuid },
    DeleteUser {
        id: Uuid,
        #[arg(long, short)]
        yes: bool,
    },
    Posts {
        #[arg(long, short, default_value_t = 0)]
        page: u32,
    },
    Hide {
        id: Uuid,
        #[arg(long, short)]
        yes: bool,
    },
    Unhide { id: Uuid },
    DeletePost {
        id: Uuid,
        #[arg(long, short)]
        yes: bool,
    },
    /// Pending reports, or every report with `--all`
    Reports {
        #[arg(long, short)]
        all: bool,
    },
    Resolve {
        id: Uuid,
        #[arg(long, short)]
        note: Option<String>,
    },
    Dismiss {
        id: Uuid,
        #[arg(long, short)]
        note: Option<String>,
        #[arg(long, short)]
        yes: bool,
    },
}

impl Cmd {
    pub(crate) async fn run(self, ctx: &Context) -> Result<()> {
        ctx.require_admin()?;
        let admin = &ctx.api.admin;
        let size = ctx.settings.table_page_size;

        let message = match self {
            Self::Stats => {
                let stats = admin.analytics().await?;
                println!("users:           {}", stats.total_users);
                println!("posts:           {}", stats.total_posts);
                println!("reports:         {}", stats.total_reports);
                println!("pending reports: {}", stats.pending_reports);
                return Ok(());
            }
            Self::Users { page } => {
                let table = PagedList::new(Mode::Replace, size);
                table.fetch_page(page, |q| admin.users(q)).await?;
                table.with(|t| print_table(t, display::admin_user_line));
                return Ok(());
            }
            Self::Posts { page } => {
                let table = PagedList::new(Mode::Replace, size);
                table.fetch_page(page, |q| admin.posts(q)).await?;
                table.with(|t| print_table(t, display::admin_post_line));
                return Ok(());
            }
            Self::Reports { all } => {
                let reports = if all {
                    admin.all_reports().await?
                } else {
                    admin.pending_reports().await?
                };
                if reports.is_empty() {
                    println!("No reports.");
                }
                for report in &reports {
                    println!("{}", display::report_line(report));
                }
                return Ok(());
            }
            Self::Ban { id, yes } => {
                if !ctx.confirm(yes, "Ban this user?")? {
                    return Ok(());
                }
                admin.ban_user(id).await?
            }
            Self::Unban { id } => admin.unban_user(id).await?,
            Self::DeleteUser { id, yes } => {
                if !ctx.confirm(yes, "Delete this user and everything they posted?")? {
                    return Ok(());
                }
                admin.delete_user(id).await?
            }
            Self::Hide { id, yes } => {
                if !ctx.confirm(yes, "Hide this post?")? {
                    return Ok(());
                }
                admin.hide_post(id).await?
            }
            Self::Unhide { id } => admin.unhide_post(id).await?,
            Self::DeletePost { id, yes } => {
                if !ctx.confirm(yes, "Delete this post?")? {
                    return Ok(());
                }
                admin.delete_post(id).await?
            }
            Self::Resolve { id, note } => {
                let note = note.map_or_else(|| read_input("note"), Ok)?;
                admin.resolve_report(id, &note).await?
            }
            Self::Dismiss { id, note, yes } => {
                if !ctx.confirm(yes, "Dismiss this report?")? {
                    return Ok(());
                }
                let note = note.map_or_else(|| read_input("note"), Ok)?;
                admin.dismiss_report(id, &note).await?
            }
        };

        println!("{}", message.unwrap_or_else(|| "Done.".into()));
        Ok(())
    }
}

fn print_table<T>(table: &Accumulator<T>, line: fn(&T) -> String) {
    if table.items().is_empty() {
        println!("Nothing here.");
        return;
    }
    for item in table.items() {
        println!("{}", line(item));
    }
    println!("\n{}", display::page_footer(table));
}
