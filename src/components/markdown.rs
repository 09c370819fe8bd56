use leptos::prelude::*;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use std::fmt::Write;

/// Renders model output (chat replies, search summaries) as styled HTML.
#[component]
pub fn Markdown(
    #[prop(into)] content: String,
    #[prop(optional)] class: &'static str,
) -> impl IntoView {
    let rendered_html = markdown_to_html(&content);

    view! {
        <div
            class=format!("markdown-content text-left min-w-0 max-w-full {class}")
            inner_html=rendered_html
        ></div>
    }
}

pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut html = String::with_capacity(markdown.len() * 2);
    let mut in_code_block = false;

    for event in Parser::new_ext(markdown, options) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => html_escape(&lang),
                    CodeBlockKind::Indented => String::new(),
                };
                let _ = write!(
                    html,
                    r#"<pre class="bg-gray-100 dark:bg-teal-900 rounded-lg p-4 my-3 overflow-x-auto"><code class="language-{lang} text-sm font-mono whitespace-pre">"#
                );
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                html.push_str("</code></pre>");
            }
            Event::Start(tag) => html.push_str(&open_tag(&tag)),
            Event::End(tag) => html.push_str(close_tag(&tag)),
            Event::Text(text) => html.push_str(&html_escape(&text)),
            Event::Code(text) => {
                let _ = write!(
                    html,
                    r#"<code class="bg-gray-200 dark:bg-teal-700 px-1 rounded font-mono text-sm">{}</code>"#,
                    html_escape(&text)
                );
            }
            // the backend is not trusted to inject markup
            Event::Html(raw) | Event::InlineHtml(raw) => html.push_str(&html_escape(&raw)),
            Event::SoftBreak if in_code_block => html.push('\n'),
            Event::SoftBreak => html.push(' '),
            Event::HardBreak if in_code_block => html.push('\n'),
            Event::HardBreak => html.push_str("<br>"),
            Event::Rule => html.push_str(r#"<hr class="my-4 border-gray-300 dark:border-teal-700">"#),
            Event::TaskListMarker(done) => {
                html.push_str(if done { "☑ " } else { "☐ " });
            }
            _ => {}
        }
    }

    html
}

fn open_tag(tag: &Tag) -> String {
    match tag {
        Tag::Paragraph => r#"<p class="mb-3 leading-relaxed">"#.to_string(),
        Tag::Heading { level, .. } => {
            let class = match level {
                HeadingLevel::H1 => "text-2xl font-bold mt-5 mb-3",
                HeadingLevel::H2 => "text-xl font-semibold mt-4 mb-2",
                HeadingLevel::H3 => "text-lg font-medium mt-3 mb-2",
                _ => "text-base font-medium mt-2 mb-1",
            };
            format!(r#"<h{} class="{class}">"#, *level as u8)
        }
        Tag::Strong => r#"<strong class="font-semibold">"#.to_string(),
        Tag::Emphasis => "<em>".to_string(),
        Tag::Strikethrough => r#"<del class="line-through">"#.to_string(),
        Tag::BlockQuote(_) => {
            r#"<blockquote class="border-l-4 border-gray-300 dark:border-teal-600 pl-4 my-3 italic">"#
                .to_string()
        }
        Tag::List(None) => r#"<ul class="list-disc ml-6 mb-3 space-y-1">"#.to_string(),
        Tag::List(Some(start)) => {
            format!(r#"<ol start="{start}" class="list-decimal ml-6 mb-3 space-y-1">"#)
        }
        Tag::Item => "<li>".to_string(),
        Tag::Link { dest_url, title, .. } => {
            let href = safe_href(dest_url)
                .map(|url| format!(r#" href="{}""#, html_escape(url)))
                .unwrap_or_default();
            format!(
                r#"<a{href} title="{}" class="text-seafoam-600 dark:text-aqua-400 underline" target="_blank" rel="noopener noreferrer">"#,
                html_escape(title)
            )
        }
        Tag::Table(_) => {
            r#"<div class="overflow-x-auto my-3"><table class="min-w-full border border-gray-300 dark:border-teal-600">"#
                .to_string()
        }
        Tag::TableHead => r#"<thead class="bg-gray-100 dark:bg-teal-700"><tr>"#.to_string(),
        Tag::TableRow => "<tr>".to_string(),
        Tag::TableCell => r#"<td class="border border-gray-300 dark:border-teal-600 px-3 py-1">"#.to_string(),
        _ => String::new(),
    }
}

fn close_tag(tag: &TagEnd) -> &'static str {
    match tag {
        TagEnd::Paragraph => "</p>",
        TagEnd::Heading(HeadingLevel::H1) => "</h1>",
        TagEnd::Heading(HeadingLevel::H2) => "</h2>",
        TagEnd::Heading(HeadingLevel::H3) => "</h3>",
        TagEnd::Heading(HeadingLevel::H4) => "</h4>",
        TagEnd::Heading(HeadingLevel::H5) => "</h5>",
        TagEnd::Heading(HeadingLevel::H6) => "</h6>",
        TagEnd::Strong => "</strong>",
        TagEnd::Emphasis => "</em>",
        TagEnd::Strikethrough => "</del>",
        TagEnd::BlockQuote(_) => "</blockquote>",
        TagEnd::List(false) => "</ul>",
        TagEnd::List(true) => "</ol>",
        TagEnd::Item => "</li>",
        TagEnd::Link => "</a>",
        TagEnd::Table => "</table></div>",
        TagEnd::TableHead => "</tr></thead>",
        TagEnd::TableRow => "</tr>",
        TagEnd::TableCell => "</td>",
        _ => "",
    }
}

/// Keeps relative links and `http`, `https` or `mailto` URLs; any other
/// scheme (`javascript:`, `data:`, ...) gets no `href` at all.
fn safe_href(dest: &str) -> Option<&str> {
    let dest = dest.trim();
    let Some(end) = dest.find([':', '/', '?', '#']) else {
        return Some(dest);
    };
    if !dest[end..].starts_with(':') {
        return Some(dest);
    }
    // browsers skip whitespace and control characters inside a scheme
    let scheme: String = dest[..end]
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    matches!(scheme.as_str(), "http" | "https" | "mailto").then_some(dest)
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
