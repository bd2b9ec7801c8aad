use super::Context;
use crate::display;
use clap::Parser;
use eyre::Result;
use inkpost_client::paging::{Mode, PagedList};
use inkpost_common::api::Notification;
use tracing::warn;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    List {
        /// How many pages to load
        #[arg(long, short, default_value_t = 1)]
        pages: u32,
    },
    /// Number of unread notifications
    Unread,
    Read { id: Uuid },
    ReadAll,
}

impl Cmd {
    pub(crate) async fn run(self, ctx: &Context) -> Result<()> {
        ctx.require_login()?;
        let notifications = &ctx.api.notifications;

        match self {
            Self::List { pages } => {
                let list: PagedList<Notification> =
                    PagedList::new(Mode::Append, ctx.settings.notification_page_size);
                for _ in 0..pages.max(1) {
                    if !list.load_more(|q| notifications.list(q)).await? {
                        break;
                    }
                }

                // The badge is supplementary; the list still renders without it.
                match notifications.unread_count().await {
                    Ok(unread) => println!("{unread} unread\n"),
                    Err(err) => warn!("failed to load unread count: {err}"),
                }
                for notification in list.items() {
                    println!("{}", display::notification_line(&notification));
                }
                if list.has_more() {
                    println!("\nMore: --pages {}", pages.max(1) + 1);
                }
            }
            Self::Unread => {
                println!("{}", notifications.unread_count().await?);
            }
            Self::Read { id } => {
                notifications.mark_as_read(id).await?;
                println!("Marked as read. {} unread.", notifications.unread());
            }
            Self::ReadAll => {
                notifications.mark_all_as_read().await?;
                println!("All caught up.");
            }
        }
        Ok(())
    }
}
