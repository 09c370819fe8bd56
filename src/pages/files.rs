use leptos::prelude::*;
use std::time::Duration;

use crate::api::{FileListPolicy, SeedPolicy};
use crate::components::fetch_status::FetchStatus;
use crate::components::toast::{Toast, ToastState};
use crate::components::ui::{Button, ButtonVariant};
use crate::fetch::hook::use_fetch;

const TOAST_DURATION: Duration = Duration::from_secs(5);

/// Prompt template for authoring new seed files.
pub const SEED_TEXT_TEMPLATE: &str = "\
Please generate seed text in the following structure:
Topic: [Describe what Storms, tornado and hurricanes are]
Style: The seed text should consist of eight or more paragraphs,
each containing 40-60 words. The paragraphs should not have titles,
and should be single-spaced.
You are speaking to an isolated group that have never experienced
life outside a cave.
Structure:
Practical role: Describe the topic's direct, practical function in
the world of the story.
Symbolic importance: Explain what the topic represents or symbolizes
within the context of the community or culture.
Sensory experience: Capture the sensory details associated with the
topic, invoking sight, sound, smell, touch, or taste.
Emotional impact: Focus on the emotional effect the topic has on the
community, specifically on key characters like Saltman, and describe
how it shapes their experiences or worldview.
The text should maintain a descriptive and evocative tone, focusing on
both the objective and emotional significance of the topic.
Do not include titles or bullet points, just the paragraphs as detailed above.";

/// Seed input for the current selection; empty when nothing is selected.
pub fn seed_selection(selected: &str) -> Vec<String> {
    let selected = selected.trim();
    if selected.is_empty() {
        Vec::new()
    } else {
        vec![selected.to_string()]
    }
}

/// Lists the backend's text files and seeds the selected one into the
/// vector store.
#[component]
pub fn FilesPage() -> impl IntoView {
    let files = use_fetch(FileListPolicy);
    let seed = use_fetch(SeedPolicy);

    let (selected, set_selected) = signal(String::new());
    let toast = ToastState::new(TOAST_DURATION);

    Effect::new(move |_| files.trigger(()));

    Effect::new(move |_| {
        if let Some(report) = seed.data() {
            toast.show(report.message);
        }
    });

    let busy = Signal::derive({
        let listing = files.loading_signal();
        let seeding = seed.loading_signal();
        move || listing.get() || seeding.get()
    });

    view! {
        <section class="max-w-3xl mx-auto p-4 space-y-4">
            <h2 class="text-2xl font-semibold text-seafoam-700 dark:text-mint-400">"NOTES"</h2>
            <p class="text-gray-700 dark:text-gray-300">
                "Select a text file to add to the database."
            </p>
            <FetchStatus loading=files.loading_signal() error=files.error_signal() />
            <FetchStatus
                loading=seed.loading_signal()
                error=seed.error_signal()
                loading_text="Seeding Data..."
            />
            <div class="flex flex-wrap items-center gap-2">
                <h3 class="font-semibold w-full">"Available Files:"</h3>
                {move || {
                    let available = files.data().unwrap_or_default();
                    if available.is_empty() {
                        view! { <p class="text-gray-600 dark:text-gray-400">"No files available."</p> }
                            .into_any()
                    } else {
                        view! {
                            <select
                                class="p-2 rounded border border-gray-300 dark:border-teal-600 bg-white dark:bg-teal-800"
                                prop:value=selected
                                on:change=move |ev| set_selected.set(event_target_value(&ev))
                            >
                                <option value="">"Select a file"</option>
                                {available
                                    .into_iter()
                                    .map(|file| {
                                        let value = file.filename.clone();
                                        view! { <option value=value>{file.filename}</option> }
                                    })
                                    .collect_view()}
                            </select>
                        }
                            .into_any()
                    }
                }}
                <Button
                    disabled=busy
                    on_click=Callback::new(move |_| seed.trigger(seed_selection(&selected.get_untracked())))
                >
                    {move || {
                        if seed.is_loading() { "Seeding Data..." } else { "Add Selected File to Database" }
                    }}
                </Button>
                <Button
                    variant=ButtonVariant::Secondary
                    disabled=busy
                    on_click=Callback::new(move |_| files.trigger(()))
                >
                    "Refresh"
                </Button>
            </div>
            <details class="rounded border border-gray-200 dark:border-teal-700 p-3">
                <summary class="cursor-pointer font-semibold">"Seed text template"</summary>
                <pre class="whitespace-pre-wrap text-left text-sm mt-2">{SEED_TEXT_TEMPLATE}</pre>
            </details>
            <Toast message=toast.message visible=toast.visible on_close=move |_| toast.hide() />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_selection_seeds_nothing() {
        assert!(seed_selection("").is_empty());
        assert!(seed_selection("   ").is_empty());
    }

    #[test]
    fn selection_is_sent_as_single_filename() {
        assert_eq!(seed_selection("storms.txt"), vec!["storms.txt".to_string()]);
    }
}
