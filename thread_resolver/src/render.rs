// Status text to HTML.
//
// The body is escaped first, so every later substitution works on escaped text and only
// inserts markup built by `maud`. Order of the steps:
// escape, hashtags, links, leading reply mentions, media.

use lazy_static::lazy_static;
use maud::{html, Markup};
use regex::{Captures, Regex};

use thread_util::{display_url, last_path_segment};
use twitter_client::{Media, MediaKind, MentionEntity, Status, UrlEntity};

lazy_static! {
    static ref HASHTAG: Regex = Regex::new(r"#([A-Za-z0-9_]+)").unwrap();
}

const LINE_BREAK: &str = "<br />";

pub fn render_status_html(status: &Status) -> String {
    let mut text = escape(&decode_entities(&status.full_text));
    text = link_hashtags(&text);

    for url in &status.urls {
        let replacement = if links_to_quoted_status(status, url) {
            String::new()
        } else {
            link(&url.expanded_url).into_string()
        };
        text = text.replacen(&escape(&url.url), &replacement, 1);
    }

    let mut text = strip_reply_mentions(text.trim(), &status.user_mentions).to_string();

    if !status.media.is_empty() {
        for media in &status.media {
            text = text.replacen(&escape(&media.url.url), "", 1);
        }
        text = text.trim_end().to_string();
        if !text.is_empty() && !text.ends_with(LINE_BREAK) {
            text.push_str(LINE_BREAK);
        }
        for media in &status.media {
            text.push_str(&media_html(media).into_string());
        }
    }

    text.trim().to_string()
}

fn escape(text: &str) -> String {
    html! { (text) }.into_string()
}

/// The API sends `<`, `>` and `&` already encoded.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
}

fn link_hashtags(text: &str) -> String {
    HASHTAG
        .replace_all(text, |caps: &Captures| {
            let tag = &caps[1];
            let href = format!("https://twitter.com/hashtag/{}?src=hashtag_click", tag);
            html! {
                a href=(href) target="_blank" { "#" (tag) }
            }
            .into_string()
        })
        .into_owned()
}

fn link(url: &str) -> Markup {
    html! {
        a href=(url) target="_blank" { (display_url(url)) }
    }
}

/// A link to the quoted status is redundant with the embedded quote.
fn links_to_quoted_status(status: &Status, url: &UrlEntity) -> bool {
    match status.quoted_status_id {
        Some(quoted) => last_path_segment(&url.expanded_url) == quoted.to_string(),
        None => false,
    }
}

/// Remove the `@name` prefixes that address a reply, as long as they belong to mentioned users.
fn strip_reply_mentions<'a>(mut text: &'a str, mentions: &[MentionEntity]) -> &'a str {
    while let Some(rest) = text.strip_prefix('@') {
        let stripped = mentions.iter().find_map(|m| {
            let len = m.screen_name.len();
            let name = rest.get(..len)?;
            let after = &rest[len..];
            let at_boundary = after
                .chars()
                .next()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
            (at_boundary && name.eq_ignore_ascii_case(&m.screen_name)).then_some(after)
        });
        match stripped {
            Some(after) => text = after.trim_start(),
            None => break,
        }
    }
    text
}

fn media_html(media: &Media) -> Markup {
    match media.kind {
        MediaKind::Photo => html! {
            img src=(media.media_url_https);
        },
        MediaKind::Video | MediaKind::AnimatedGif => html! {
            video autoplay loop controls[media.is_video()] {
                @for variant in media.variants() {
                    source src=(variant.url) type=(variant.content_type);
                }
                a href=(media.url.expanded_url) { (display_url(&media.url.display_url)) }
            }
        },
    }
}
