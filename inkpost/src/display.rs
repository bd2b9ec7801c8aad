//! Plain text rendering shared by the commands.

use inkpost_client::paging::Accumulator;
use inkpost_common::api::{Comment, Notification, Post, PostAdmin, Report, UserAdmin};
use time::format_description::well_known::Iso8601;
use time::{Duration, OffsetDateTime, PrimitiveDateTime};

/// Backend timestamps come without an offset; they are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(value, &Iso8601::DEFAULT)
        .or_else(|_| PrimitiveDateTime::parse(value, &Iso8601::DEFAULT).map(|t| t.assume_utc()))
        .ok()
}

pub fn time_ago(value: Option<&str>, now: OffsetDateTime) -> String {
    let Some(timestamp) = value.and_then(parse_timestamp) else {
        return "-".to_string();
    };

    let elapsed = now - timestamp;
    if elapsed < Duration::minutes(1) {
        "Just now".to_string()
    } else if elapsed < Duration::hours(1) {
        format!("{}m ago", elapsed.whole_minutes())
    } else if elapsed < Duration::days(1) {
        format!("{}h ago", elapsed.whole_hours())
    } else if elapsed < Duration::weeks(1) {
        format!("{}d ago", elapsed.whole_days())
    } else {
        timestamp.date().to_string()
    }
}

fn ago(value: &Option<String>) -> String {
    time_ago(value.as_deref(), OffsetDateTime::now_utc())
}

pub fn excerpt(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

pub fn post_line(post: &Post, liked: Option<bool>) -> String {
    let heart = match liked {
        Some(true) => "♥",
        _ => "♡",
    };
    format!(
        "{}  {}\n    by {} · {} · {heart} {} · {} comments",
        post.id,
        post.title,
        post.owner.username,
        ago(&post.created_at),
        post.like_count,
        post.comment_count,
    )
}

pub fn post_detail(post: &Post) -> String {
    let mut out = format!(
        "{}\nby {} · {}\n\n{}\n",
        post.title,
        post.owner.username,
        ago(&post.created_at),
        post.content
    );
    for url in &post.media_urls {
        out.push_str(&format!("\n[media] {url}"));
    }
    out
}

pub fn comment_line(comment: &Comment) -> String {
    format!(
        "{}  {} · {}\n    {}",
        comment.id,
        comment.username,
        ago(&comment.created_at),
        comment.content
    )
}

pub fn notification_line(notification: &Notification) -> String {
    let marker = if notification.is_read { " " } else { "•" };
    format!(
        "{marker} {}  [{}] {} · {}",
        notification.id,
        notification.kind,
        notification.message,
        ago(&notification.created_at)
    )
}

pub fn admin_user_line(user: &UserAdmin) -> String {
    format!(
        "{}  {:<20} {:<28} {:<6} {:<7} posts {}",
        user.id,
        user.username,
        user.email,
        user.role.to_string(),
        format!("{:?}", user.status).to_lowercase(),
        user.post_count
    )
}

pub fn admin_post_line(post: &PostAdmin) -> String {
    let mut flags = vec![];
    if post.hidden {
        flags.push("hidden".to_string());
    }
    if post.reported {
        flags.push(format!("{} reports", post.report_count));
    }
    format!(
        "{}  {} by {} {}",
        post.id,
        excerpt(&post.title, 40),
        post.owner.username,
        if flags.is_empty() {
            String::new()
        } else {
            format!("[{}]", flags.join(", "))
        }
    )
    .trim_end()
    .to_string()
}

pub fn report_line(report: &Report) -> String {
    let mut line = format!(
        "{}  {:?}  {} reported {} · {}\n    {}",
        report.id,
        report.status,
        report.reporter.username,
        report.reported_user.username,
        ago(&report.created_at),
        report.reason
    );
    if let Some(note) = &report.admin_note {
        line.push_str(&format!("\n    note: {note}"));
    }
    line
}

/// Footer for a replace mode table.
pub fn page_footer<T>(table: &Accumulator<T>) -> String {
    let mut footer = format!(
        "page {}/{} · {} total",
        table.page() + 1,
        table.total_pages().max(1),
        table.total_elements()
    );
    if table.has_next() {
        footer.push_str(&format!(" · next: --page {}", table.page() + 1));
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn time_ago_buckets() {
        let now = datetime!(2024-05-10 12:00:00 UTC);

        assert_eq!(time_ago(Some("2024-05-10T11:59:30"), now), "Just now");
        assert_eq!(time_ago(Some("2024-05-10T11:15:00"), now), "45m ago");
        assert_eq!(time_ago(Some("2024-05-10T01:30:00.250"), now), "10h ago");
        assert_eq!(time_ago(Some("2024-05-07T12:00:00Z"), now), "3d ago");
        assert_eq!(time_ago(Some("2024-04-01T08:00:00"), now), "2024-04-01");
    }

    #[test]
    fn unparseable_time_is_a_dash() {
        let now = OffsetDateTime::now_utc();
        assert_eq!(time_ago(None, now), "-");
        assert_eq!(time_ago(Some("yesterday"), now), "-");
    }

    #[test]
    fn excerpt_flattens_and_cuts() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("a\n  b   c", 10), "a b c");
        assert_eq!(excerpt("hello wonderful world", 8), "hello w…");
    }
}
