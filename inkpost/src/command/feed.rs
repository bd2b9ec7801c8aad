use super::Context;
use crate::display;
use clap::Parser;
use eyre::Result;
use inkpost_client::paging::{Mode, PagedList};
use inkpost_client::toggle::LikeMap;
use inkpost_common::api::Post;
use uuid::Uuid;

#[derive(Parser, Debug)]
pub struct Cmd {
    /// Only posts written by this user
    #[arg(long, short)]
    user: Option<Uuid>,
    /// How many pages to load
    #[arg(long, short, default_value_t = 1)]
    pages: u32,
    /// Posts per page, defaults to `feed_page_size`
    #[arg(long)]
    size: Option<u32>,
}

impl Cmd {
    pub(crate) async fn run(self, ctx: &Context) -> Result<()> {
        ctx.require_login()?;
        let size = self.size.unwrap_or(ctx.settings.feed_page_size);
        let feed: PagedList<Post> = PagedList::new(Mode::Append, size);
        let posts = &ctx.api.posts;

        for _ in 0..self.pages.max(1) {
            let loaded = match self.user {
                Some(user_id) => feed.load_more(|q| posts.by_user(user_id, q)).await?,
                None => feed.load_more(|q| posts.list(q)).await?,
            };
            if !loaded {
                break;
            }
        }

        let items = feed.items();
        if items.is_empty() {
            println!("No posts yet.");
            return Ok(());
        }

        let likes = LikeMap::new();
        for post in &items {
            likes
                .check_status(post.id, |id| ctx.api.social.like_status(id))
                .await;
        }

        for post in &items {
            println!("{}", display::post_line(post, Some(likes.is_active(&post.id))));
        }
        if feed.has_more() {
            println!("\nMore posts: --pages {}", self.pages.max(1) + 1);
        }
        Ok(())
    }
}
