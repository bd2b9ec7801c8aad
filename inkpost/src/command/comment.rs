use super::Context;
use crate::display;
use crate::utils::read_input;
use clap::Parser;
use eyre::Result;
use inkpost_client::paging::{Mode, PagedList};
use inkpost_common::api::{Comment, CommentRequest};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    /// Comments on a post, one page at a time
    List {
        post_id: Uuid,
        #[arg(long, short, default_value_t = 0)]
        page: u32,
    },
    /// Everything a user has commented
    ByUser {
        user_id: Uuid,
        #[arg(long, short, default_value_t = 0)]
        page: u32,
    },
    Add {
        post_id: Uuid,
        content: Option<String>,
    },
    Edit {
        post_id: Uuid,
        comment_id: Uuid,
        content: Option<String>,
    },
    Delete {
        post_id: Uuid,
        comment_id: Uuid,
        #[arg(long, short)]
        yes: bool,
    },
}

impl Cmd {
    pub(crate) async fn run(self, ctx: &Context) -> Result<()> {
        ctx.require_login()?;
        let social = &ctx.api.social;
        let table: PagedList<Comment> = PagedList::new(Mode::Replace, ctx.settings.table_page_size);

        match self {
            Self::List { post_id, page } => {
                table
                    .fetch_page(page, |q| social.comments(post_id, q))
                    .await?;
                print_table(&table);
            }
            Self::ByUser { user_id, page } => {
                table
                    .fetch_page(page, |q| social.user_comments(user_id, q))
                    .await?;
                print_table(&table);
            }
            Self::Add { post_id, content } => {
                let req = CommentRequest {
                    content: content.map_or_else(|| read_input("comment"), Ok)?,
                };
                let comment = social.create_comment(post_id, &req).await?;
                println!("{}", display::comment_line(&comment));
            }
            Self::Edit {
                post_id,
                comment_id,
                content,
            } => {
                let req = CommentRequest {
                    content: content.map_or_else(|| read_input("comment"), Ok)?,
                };
                let comment = social.update_comment(post_id, comment_id, &req).await?;
                println!("{}", display::comment_line(&comment));
            }
            Self::Delete {
                post_id,
                comment_id,
                yes,
            } => {
                if ctx.confirm(yes, "Delete this comment?")? {
                    social.delete_comment(post_id, comment_id).await?;
                    println!("Comment deleted.");
                }
            }
        }
        Ok(())
    }
}

fn print_table(table: &PagedList<Comment>) {
    table.with(|t| {
        if t.items().is_empty() {
            println!("No comments.");
            return;
        }
        for comment in t.items() {
            println!("{}", display::comment_line(comment));
        }
        println!("\n{}", display::page_footer(t));
    });
}
