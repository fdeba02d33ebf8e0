// HTML pages.

use axum::http::StatusCode;
use itertools::Itertools;
use maud::{html, Markup, PreEscaped, DOCTYPE};

use thread_resolver::{render_status_html, ChainKind, RenderedThread};
use twitter_client::{Status, User};

const STYLE: &str = r#"
body { font-family: -apple-system, "Helvetica Neue", Arial, sans-serif; max-width: 640px; margin: 2em auto; padding: 0 1em; color: #14171a; }
a { color: #1b95e0; text-decoration: none; }
a:hover { text-decoration: underline; }
nav { margin-bottom: 2em; }
nav a { margin-right: 1em; }
article { padding: 0.75em 0; }
article.continued { padding-top: 0; }
.author { display: flex; align-items: center; margin-bottom: 0.5em; }
.author img { width: 48px; height: 48px; border-radius: 50%; margin-right: 0.75em; }
.screen-name, .meta, .meta a { color: #657786; font-size: 0.9em; }
.text { white-space: pre-wrap; font-size: 1.1em; line-height: 1.4; }
.text img, .text video { display: block; max-width: 100%; margin-top: 0.5em; border-radius: 12px; }
form input[type=text] { width: 70%; padding: 0.4em; }
"#;

fn layout(title: &str, pdf: bool, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body {
                @if !pdf {
                    nav {
                        a href="/" { "Home" }
                        a href="/about" { "About" }
                    }
                }
                (body)
            }
        }
    }
}

fn user_link(user: &User) -> Markup {
    html! {
        a href=(user.link()) target="_blank" { "@" (user.screen_name) }
    }
}

pub fn homepage() -> Markup {
    layout(
        "Thread Reader",
        false,
        html! {
            h1 { "Thread Reader" }
            p { "Paste a link to a status, or its id, to read the conversation leading up to it." }
            form action="/action" method="post" {
                input type="text" name="status" placeholder="https://twitter.com/jack/status/20" autofocus;
                " "
                select name="type" {
                    option value="thread" selected { "Thread" }
                    option value="retweet" { "Quote chain" }
                }
                " "
                button type="submit" { "Read" }
            }
        },
    )
}

pub fn about() -> Markup {
    layout(
        "About",
        false,
        html! {
            h1 { "About" }
            p {
                "A thread is a status together with every status it replies to, shown oldest first. "
                "A quote chain follows quoted statuses instead of replies. "
                "When a chain runs into the other kind of link, reading continues along it for a few steps."
            }
            p {
                "Every status and author is fetched once and kept in a local cache. "
                "Any page can also be downloaded as a PDF."
            }
        },
    )
}

/// A resolved chain, one article per status, with the author header only where the author changes.
pub fn status_page(thread: &RenderedThread, status_id: u64, pdf: bool) -> Markup {
    let users = thread.unique_users();
    let heading = match thread.kind {
        ChainKind::Thread => "Thread",
        ChainKind::Quote => "Quote chain",
    };
    let title = format!("{} by {}", heading, users.iter().map(|u| format!("@{}", u.screen_name)).join(", "));
    let pdf_link = format!("/pdf/{}/{}", thread.kind, status_id);

    // Suppressed headers still belong to the last shown author.
    let mut author: Option<&User> = None;
    let entries: Vec<(&Status, Option<&User>, Option<&User>)> = thread
        .iter()
        .map(|(status, shown)| {
            author = shown.or(author);
            (status, shown, author)
        })
        .collect();

    layout(
        &title,
        pdf,
        html! {
            header {
                h1 { (heading) }
                p {
                    "by "
                    @for (i, user) in users.iter().enumerate() {
                        @if i > 0 { ", " }
                        (user_link(user))
                    }
                }
                @if !pdf {
                    p {
                        a href=(pdf_link) { "Download as PDF" }
                    }
                }
            }
            main {
                @for (status, shown, author) in &entries {
                    (status_article(status, *shown, *author))
                }
            }
        },
    )
}

fn status_article(status: &Status, shown: Option<&User>, author: Option<&User>) -> Markup {
    let timestamp = status.created_at.format("%-I:%M %p · %b %-d, %Y").to_string();
    html! {
        article.continued[shown.is_none()] {
            @if let Some(user) = shown {
                div.author {
                    @if let Some(avatar) = &user.profile_image_url_https {
                        img src=(avatar) alt="";
                    }
                    div {
                        strong { (user.name) }
                        br;
                        span.screen-name { (user_link(user)) }
                    }
                }
            }
            div.text { (PreEscaped(render_status_html(status))) }
            div.meta {
                @match author {
                    Some(user) => {
                        a href=(status.link(&user.screen_name)) target="_blank" { (timestamp) }
                    }
                    None => {
                        (timestamp)
                    }
                }
            }
        }
    }
}

pub fn error_page(status: StatusCode, detail: &str) -> Markup {
    let reason = status.canonical_reason().unwrap_or("Error");
    let message = match status {
        StatusCode::BAD_REQUEST => "That doesn't look like a status link or id.",
        StatusCode::NOT_FOUND => "The status could not be found. It may have been deleted or made private.",
        StatusCode::TOO_MANY_REQUESTS => "Too many requests were made recently. Try again in a few minutes.",
        StatusCode::BAD_GATEWAY => "Twitter could not be reached. Try again later.",
        _ => "Something went wrong while building this page.",
    };
    layout(
        &format!("{} {}", status.as_u16(), reason),
        false,
        html! {
            h1 { (status.as_u16()) " " (reason) }
            p { (message) }
            @if status.is_client_error() {
                p.meta { (detail) }
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    use thread_resolver::ResolvedThread;

    fn user(id: u64, screen_name: &str) -> User {
        User {
            id,
            name: screen_name.to_uppercase(),
            screen_name: screen_name.to_string(),
            description: None,
            profile_image_url_https: Some(format!("https://pbs.twimg.com/profile_images/{}.jpg", id)),
        }
    }

    fn status(id: u64, user_id: u64, text: &str) -> Status {
        let json = format!(
            r#"{{"id":{},"created_at":"Wed Oct 10 20:19:24 +0000 2018","user_id":{},"full_text":"{}",
               "in_reply_to_status_id":null,"quoted_status_id":null,
               "urls":[],"user_mentions":[],"media":[]}}"#,
            id, user_id, text
        );
        serde_json::from_str(&json).unwrap()
    }

    fn thread() -> RenderedThread {
        let alice = user(1, "alice");
        let bob = user(2, "bob");
        ResolvedThread {
            kind: ChainKind::Thread,
            items: vec![
                (status(10, 1, "first"), alice.clone()),
                (status(11, 1, "second <b>"), alice),
                (status(12, 2, "reply"), bob),
            ],
        }
        .into()
    }

    #[test]
    fn test_status_page() {
        let page = status_page(&thread(), 12, false).into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Thread by @alice, @bob</title>"));
        assert!(page.contains("href=\"/pdf/thread/12\""));
        assert!(page.contains("second &lt;b&gt;"));
        // Author header for alice once, bob once.
        assert_eq!(page.matches("<strong>ALICE</strong>").count(), 1);
        assert_eq!(page.matches("<strong>BOB</strong>").count(), 1);
        // Continued status still links to its author.
        assert!(page.contains("href=\"https://twitter.com/alice/status/11\""));
        assert!(page.contains("8:19 PM · Oct 10, 2018"));
    }

    #[test]
    fn test_pdf_page_has_no_navigation() {
        let page = status_page(&thread(), 12, true).into_string();
        assert!(!page.contains("Download as PDF"));
        assert!(!page.contains("<nav>"));
    }

    #[test]
    fn test_error_page_hides_server_details() {
        let page = error_page(StatusCode::NOT_FOUND, "Object `status 5` not found").into_string();
        assert!(page.contains("404 Not Found"));
        assert!(page.contains("status 5"));

        let page = error_page(StatusCode::INTERNAL_SERVER_ERROR, "database is locked").into_string();
        assert!(page.contains("500 Internal Server Error"));
        assert!(!page.contains("database is locked"));
    }

    #[test]
    fn test_homepage_posts_to_action() {
        let page = homepage().into_string();
        assert!(page.contains("action=\"/action\""));
        assert!(page.contains("name=\"status\""));
        assert!(page.contains("value=\"retweet\""));
    }
}
