use leptos::prelude::*;

/// Splits `text` into `(segment, is_match)` pairs for a case-insensitive
/// search. Matching segments keep the original casing.
pub fn highlighted_segments(text: &str, search_term: &str) -> Vec<(String, bool)> {
    let needle = search_term.trim().to_lowercase();
    if needle.is_empty() {
        return vec![(text.to_string(), false)];
    }

    let haystack = text.to_lowercase();
    // lowercasing can change byte lengths outside ASCII; offsets would not
    // line up with `text`, so fall back to no highlighting
    if haystack.len() != text.len() {
        return vec![(text.to_string(), false)];
    }

    let mut segments = Vec::new();
    let mut last = 0;
    while let Some(found) = haystack[last..].find(&needle) {
        let start = last + found;
        let end = start + needle.len();
        if start > last {
            segments.push((text[last..start].to_string(), false));
        }
        segments.push((text[start..end].to_string(), true));
        last = end;
    }
    if last < text.len() {
        segments.push((text[last..].to_string(), false));
    }
    segments
}

#[component]
pub fn HighlightedText(
    #[prop(into)] text: String,
    #[prop(into)] search_term: String,
    #[prop(optional)] class: &'static str,
) -> impl IntoView {
    let segments = highlighted_segments(&text, &search_term);

    view! {
        <span class=class>
            {segments
                .into_iter()
                .map(|(segment, is_match)| {
                    if is_match {
                        view! {
                            <mark class="bg-mint-400 dark:bg-teal-700 rounded px-0.5">{segment}</mark>
                        }
                            .into_any()
                    } else {
                        view! { <span>{segment}</span> }.into_any()
                    }
                })
                .collect_view()}
        </span>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn marks_every_case_insensitive_match() {
        assert_eq!(
            highlighted_segments("State and state", "STATE"),
            vec![
                ("State".to_string(), true),
                (" and ".to_string(), false),
                ("state".to_string(), true),
            ]
        );
    }

    #[test]
    fn empty_term_returns_whole_text() {
        assert_eq!(
            highlighted_segments("hello", "  "),
            vec![("hello".to_string(), false)]
        );
    }

    #[test]
    fn non_ascii_case_folding_does_not_panic() {
        let segments = highlighted_segments("İstanbul state", "state");
        let joined: String = segments.iter().map(|(s, _)| s.as_str()).collect();
        assert_eq!(joined, "İstanbul state");
    }
}
