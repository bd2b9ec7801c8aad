use super::Context;
use crate::display;
use crate::utils::read_input;
use clap::Parser;
use eyre::{eyre, Context as _, Result};
use inkpost_client::api_client::PageQuery;
use inkpost_client::toggle::LikeMap;
use inkpost_client::validation::content_type_for;
use inkpost_common::api::PostRequest;
use std::path::{Path, PathBuf};
use tracing::warn;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[clap(infer_subcommands = true)]
pub enum Cmd {
    /// Show a post with its first page of comments
    Show { id: Uuid },
    Create {
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        content: Option<String>,
        /// Files to attach once the post exists
        #[arg(long = "media", short)]
        media: Vec<PathBuf>,
    },
    Edit {
        id: Uuid,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        content: Option<String>,
    },
    Delete {
        id: Uuid,
        #[arg(long, short)]
        yes: bool,
    },
    /// Like or unlike a post
    Like { id: Uuid },
    /// Attach images or videos to a post
    Attach {
        id: Uuid,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Remove one attachment
    Detach {
        media_id: Uuid,
        #[arg(long, short)]
        yes: bool,
    },
}

impl Cmd {
    pub(crate) async fn run(self, ctx: &Context) -> Result<()> {
        ctx.require_login()?;

        match self {
            Self::Show { id } => show(ctx, id).await,
            Self::Create {
                title,
                content,
                media,
            } => {
                let req = PostRequest {
                    title: title.map_or_else(|| read_input("title"), Ok)?,
                    content: content.map_or_else(|| read_input("content"), Ok)?,
                    status: None,
                };
                let post = ctx.api.posts.create(&req).await?;
                println!("Created post {}.", post.id);
                upload_all(ctx, post.id, &media).await
            }
            Self::Edit { id, title, content } => {
                let current = ctx.api.posts.get(id).await?;
                let req = PostRequest {
                    title: title.unwrap_or(current.title),
                    content: content.unwrap_or(current.content),
                    status: current.status,
                };
                ctx.api.posts.update(id, &req).await?;
                println!("Post updated.");
                Ok(())
            }
            Self::Delete { id, yes } => {
                if !ctx.confirm(yes, "Delete this post?")? {
                    return Ok(());
                }
                ctx.api.posts.delete(id).await?;
                println!("Post deleted.");
                Ok(())
            }
            Self::Like { id } => {
                let likes = LikeMap::new();
                let social = &ctx.api.social;
                if let Some(status) = likes.toggle(id, |id| social.toggle_like(id)).await? {
                    let verb = if status.liked { "Liked" } else { "Unliked" };
                    println!("{verb}. {} likes.", status.like_count);
                }
                Ok(())
            }
            Self::Attach { id, files } => upload_all(ctx, id, &files).await,
            Self::Detach { media_id, yes } => {
                if !ctx.confirm(yes, "Remove this attachment?")? {
                    return Ok(());
                }
                ctx.api.media.delete(media_id).await?;
                println!("Attachment removed.");
                Ok(())
            }
        }
    }
}

async fn show(ctx: &Context, id: Uuid) -> Result<()> {
    let post = ctx.api.posts.get(id).await?;

    let likes = LikeMap::new();
    likes
        .check_status(id, |id| ctx.api.social.like_status(id))
        .await;
    let (liked, like_count) = likes
        .status(&id)
        .map_or((false, post.like_count), |s| (s.liked, s.like_count));

    println!("{}", display::post_detail(&post));
    let heart = if liked { "♥" } else { "♡" };
    println!("{heart} {like_count}\n");

    // Comments are supplementary; the post still renders without them.
    match ctx.api.social.comments(id, PageQuery::new(0, 20)).await {
        Ok(page) if page.content.is_empty() => println!("No comments yet."),
        Ok(page) => {
            println!("Comments ({}):", page.total_elements);
            for comment in &page.content {
                println!("{}", display::comment_line(comment));
            }
        }
        Err(err) => warn!(%id, "failed to load comments: {err}"),
    }
    Ok(())
}

async fn upload_all(ctx: &Context, post_id: Uuid, files: &[PathBuf]) -> Result<()> {
    for file in files {
        let (name, content_type) = describe(file)?;
        let bytes = fs_err::read(file)?;
        ctx.api
            .media
            .upload(post_id, &name, content_type, bytes)
            .await
            .wrap_err_with(|| format!("Failed to upload {name}"))?;
        println!("Attached {name}.");
    }
    Ok(())
}

fn describe(file: &Path) -> Result<(String, &'static str)> {
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| eyre!("Not a file: {file:?}"))?
        .to_string();
    let content_type = content_type_for(&name)
        .ok_or_else(|| eyre!("{name}: only images and videos can be attached"))?;
    Ok((name, content_type))
}
