use leptos::prelude::*;

use crate::api::{newest_first, HistoryEntry, HistoryPolicy};
use crate::components::fetch_status::FetchStatus;
use crate::components::markdown::Markdown;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::fetch::hook::use_fetch;

#[component]
pub fn HistoryPage() -> impl IntoView {
    let history = use_fetch(HistoryPolicy);

    Effect::new(move |_| history.trigger(()));

    view! {
        <section class="max-w-3xl mx-auto p-4 space-y-4">
            <div class="flex items-center justify-between">
                <h2 class="text-2xl font-semibold text-seafoam-700 dark:text-mint-400">"History"</h2>
                <Button
                    variant=ButtonVariant::Secondary
                    size=ButtonSize::Small
                    disabled=history.loading_signal()
                    on_click=Callback::new(move |_| history.trigger(()))
                >
                    "Refresh"
                </Button>
            </div>
            <FetchStatus
                loading=history.loading_signal()
                error=history.error_signal()
                loading_text="Loading history..."
            />
            {move || {
                history
                    .data()
                    .map(|entries| {
                        if entries.is_empty() {
                            view! { <p class="text-gray-600 dark:text-gray-400">"No history yet."</p> }
                                .into_any()
                        } else {
                            view! {
                                <ul class="space-y-3">
                                    {newest_first(entries)
                                        .into_iter()
                                        .map(|entry| view! { <HistoryItem entry /> })
                                        .collect_view()}
                                </ul>
                            }
                                .into_any()
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn HistoryItem(entry: HistoryEntry) -> impl IntoView {
    let when = entry.recorded_at_text();

    view! {
        <li class="rounded border border-gray-200 dark:border-teal-700 p-3 space-y-2">
            <div class="flex justify-between gap-2">
                <p class="font-semibold">{entry.prompt}</p>
                <span class="text-xs text-gray-500 dark:text-gray-400 whitespace-nowrap">{when}</span>
            </div>
            <Markdown content=entry.response class="text-sm" />
        </li>
    }
}
