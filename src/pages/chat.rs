use leptos::prelude::*;

use crate::api::ChatPolicy;
use crate::components::fetch_status::FetchStatus;
use crate::components::markdown::Markdown;
use crate::components::ui::Button;
use crate::fetch::hook::use_fetch;

/// Ask the model a free-form question.
#[component]
pub fn ChatPage() -> impl IntoView {
    let (prompt, set_prompt) = signal(String::new());
    let chat = use_fetch(ChatPolicy);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        chat.trigger(prompt.get_untracked());
    };

    view! {
        <section class="max-w-3xl mx-auto p-4 space-y-4">
            <h2 class="text-2xl font-semibold text-seafoam-700 dark:text-mint-400">"Chat Interface"</h2>
            <form class="space-y-2" on:submit=on_submit>
                <textarea
                    class="w-full min-h-32 p-2 rounded border border-gray-300 dark:border-teal-600 bg-white dark:bg-teal-800 text-gray-900 dark:text-gray-100"
                    placeholder="Ask a question..."
                    prop:value=prompt
                    on:input=move |ev| set_prompt.set(event_target_value(&ev))
                ></textarea>
                <Button submit=true disabled=chat.loading_signal()>
                    {move || if chat.is_loading() { "Sending..." } else { "Send" }}
                </Button>
            </form>
            <FetchStatus
                loading=chat.loading_signal()
                error=chat.error_signal()
                loading_text="Waiting for the model..."
            />
            {move || {
                chat.data()
                    .map(|reply| {
                        view! {
                            <div class="rounded border border-gray-200 dark:border-teal-700 p-4 bg-gray-50 dark:bg-teal-900">
                                <h3 class="font-semibold mb-2">"Response:"</h3>
                                <Markdown content=reply.response />
                            </div>
                        }
                    })
            }}
        </section>
    }
}
