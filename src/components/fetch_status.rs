use leptos::prelude::*;

/// Loading line and error banner shared by every page. Renders nothing
/// while the request is idle or has succeeded.
#[component]
pub fn FetchStatus(
    #[prop(into)] loading: Signal<bool>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(optional, into)] loading_text: Signal<String>,
) -> impl IntoView {
    let loading_text = move || {
        let text = loading_text.get();
        if text.is_empty() {
            "Loading...".to_string()
        } else {
            text
        }
    };

    view! {
        <Show when=move || loading.get()>
            <p class="text-gray-500 dark:text-gray-400 italic my-2" role="status">
                {loading_text}
            </p>
        </Show>
        {move || {
            error
                .get()
                .map(|message| {
                    view! {
                        <p
                            class="text-salmon-600 dark:text-salmon-400 bg-salmon-50 dark:bg-teal-900 border border-salmon-300 dark:border-salmon-700 rounded px-3 py-2 my-2"
                            role="alert"
                        >
                            {message}
                        </p>
                    }
                })
        }}
    }
}
