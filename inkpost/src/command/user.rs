use super::Context;
use crate::display;
use clap::Parser;
use eyre::Result;
use inkpost_client::api_client::PageQuery;
use inkpost_client::paging::{Mode, PagedList};
use inkpost_client::toggle::SubscriptionMap;
use inkpost_common::api::Subscription;
use tracing::warn;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    List,
    /// Profile with recent posts and comments
    Show { id: Uuid },
    /// Subscribe to or unsubscribe from a user
    Follow { id: Uuid },
    /// Users someone follows, yourself by default
    Following {
        id: Option<Uuid>,
        #[arg(long, short, default_value_t = 0)]
        page: u32,
    },
    /// Users following someone, yourself by default
    Followers {
        id: Option<Uuid>,
        #[arg(long, short, default_value_t = 0)]
        page: u32,
    },
}

impl Cmd {
    pub(crate) async fn run(self, ctx: &Context) -> Result<()> {
        let me = ctx.require_login()?;
        let subscriptions = &ctx.api.subscriptions;

        match self {
            Self::List => {
                for user in ctx.api.users.list().await? {
                    println!("{}  {} ({})", user.id, user.username, user.role);
                }
            }
            Self::Show { id } => show(ctx, id, id == me.id).await?,
            Self::Follow { id } => {
                let follows = SubscriptionMap::new();
                if let Some(status) = follows.toggle(id, |id| subscriptions.toggle(id)).await? {
                    let verb = if status.subscribed {
                        "Subscribed"
                    } else {
                        "Unsubscribed"
                    };
                    println!("{verb}. {} subscribers.", status.subscriber_count);
                }
            }
            Self::Following { id, page } => {
                let table = PagedList::new(Mode::Replace, ctx.settings.table_page_size);
                let id = id.unwrap_or(me.id);
                table
                    .fetch_page(page, |q| subscriptions.subscriptions(id, q))
                    .await?;
                print_subscriptions(&table, |s| (s.subscribed_to_id, &s.subscribed_to_username));
            }
            Self::Followers { id, page } => {
                let table = PagedList::new(Mode::Replace, ctx.settings.table_page_size);
                let id = id.unwrap_or(me.id);
                table
                    .fetch_page(page, |q| subscriptions.subscribers(id, q))
                    .await?;
                print_subscriptions(&table, |s| (s.subscriber_id, &s.subscriber_username));
            }
        }
        Ok(())
    }
}

async fn show(ctx: &Context, id: Uuid, is_me: bool) -> Result<()> {
    let user = ctx.api.users.by_id(id).await?;
    println!("{} <{}>  {}", user.username, user.email, user.role);

    if !is_me {
        let follows = SubscriptionMap::new();
        follows
            .check_status(id, |id| ctx.api.subscriptions.status(id))
            .await;
        if let Some(status) = follows.status(&id) {
            let state = if status.subscribed {
                "subscribed"
            } else {
                "not subscribed"
            };
            println!(
                "{} subscribers · {} subscriptions · {state}",
                status.subscriber_count, status.subscription_count
            );
        }
    }

    // Posts and comments are supplementary; failures only cost a section.
    match ctx
        .api
        .posts
        .by_user(id, PageQuery::new(0, ctx.settings.feed_page_size))
        .await
    {
        Ok(page) => {
            println!("\nPosts ({}):", page.total_elements);
            for post in &page.content {
                println!("{}", display::post_line(post, None));
            }
        }
        Err(err) => warn!(%id, "failed to load posts: {err}"),
    }

    match ctx
        .api
        .social
        .user_comments(id, PageQuery::new(0, ctx.settings.feed_page_size))
        .await
    {
        Ok(page) => {
            println!("\nComments ({}):", page.total_elements);
            for comment in &page.content {
                println!("{}", display::comment_line(comment));
            }
        }
        Err(err) => warn!(%id, "failed to load comments: {err}"),
    }
    Ok(())
}

fn print_subscriptions(
    table: &PagedList<Subscription>,
    other: impl Fn(&Subscription) -> (Uuid, &String),
) {
    table.with(|t| {
        if t.items().is_empty() {
            println!("Nobody yet.");
            return;
        }
        for subscription in t.items() {
            let (id, username) = other(subscription);
            println!("{id}  {username}");
        }
        println!("\n{}", display::page_footer(t));
    });
}
