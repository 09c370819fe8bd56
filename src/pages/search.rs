use leptos::prelude::*;

use crate::api::{EnhancedSearch, SearchPolicy};
use crate::components::fetch_status::FetchStatus;
use crate::components::highlight::HighlightedText;
use crate::components::markdown::Markdown;
use crate::components::ui::Button;
use crate::fetch::hook::use_fetch;

#[component]
pub fn SearchPage() -> impl IntoView {
    let (query, set_query) = signal(String::new());
    // the term shown in results is the one that was submitted, not the
    // one currently being typed
    let (searched, set_searched) = signal(String::new());
    let search = use_fetch(SearchPolicy::default());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = query.get_untracked();
        set_searched.set(current.trim().to_string());
        search.trigger(current);
    };

    view! {
        <section class="max-w-3xl mx-auto p-4 space-y-4">
            <h2 class="text-2xl font-semibold text-seafoam-700 dark:text-mint-400">"Search Interface"</h2>
            <form class="flex gap-2" on:submit=on_submit>
                <input
                    type="text"
                    class="flex-1 p-2 rounded border border-gray-300 dark:border-teal-600 bg-white dark:bg-teal-800 text-gray-900 dark:text-gray-100"
                    placeholder="Enter your search query"
                    prop:value=query
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                />
                <Button submit=true disabled=search.loading_signal()>
                    {move || if search.is_loading() { "Searching..." } else { "Search" }}
                </Button>
            </form>
            <FetchStatus
                loading=search.loading_signal()
                error=search.error_signal()
                loading_text="Searching..."
            />
            {move || {
                search.data().map(|found| view! { <SearchResults found term=searched.get() /> })
            }}
        </section>
    }
}

#[component]
fn SearchResults(found: EnhancedSearch, term: String) -> impl IntoView {
    let summary = found.summary().map(str::to_string);
    let results = found.results;

    view! {
        <div class="space-y-4">
            {summary
                .map(|summary| {
                    view! {
                        <div class="rounded border border-mint-400 dark:border-teal-600 p-4 bg-mint-100 dark:bg-teal-900">
                            <h3 class="font-semibold mb-2">"Enhanced Summary"</h3>
                            <Markdown content=summary />
                        </div>
                    }
                })}
            <h3 class="font-semibold">"Search Results"</h3>
            {if results.is_empty() {
                view! { <p class="text-gray-600 dark:text-gray-400">"No results found."</p> }
                    .into_any()
            } else {
                view! {
                    <ul class="space-y-3">
                        {results
                            .into_iter()
                            .map(|result| {
                                view! {
                                    <li class="rounded border border-gray-200 dark:border-teal-700 p-3">
                                        <HighlightedText text=result.text search_term=term.clone() />
                                        {result
                                            .source
                                            .map(|source| {
                                                view! {
                                                    <p class="text-xs text-gray-500 dark:text-gray-400 mt-1">
                                                        {format!("(Source: {source})")}
                                                    </p>
                                                }
                                            })}
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                }
                    .into_any()
            }}
        </div>
    }
}
