use js_sys::{Function, Promise, Reflect};
use leptos::prelude::*;
use std::time::Duration;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::api::ConversationPolicy;
use crate::components::fetch_status::FetchStatus;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::fetch::hook::use_fetch;

const COPY_RESET_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyStatus {
    #[default]
    Ready,
    Copied,
    Failed,
}

impl CopyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CopyStatus::Ready => "Copy Text",
            CopyStatus::Copied => "Copied!",
            CopyStatus::Failed => "Copy Failed",
        }
    }
}

/// The generate button stays disabled while a request is running or the
/// prompt is blank.
pub fn can_generate(prompt: &str, loading: bool) -> bool {
    !loading && !prompt.trim().is_empty()
}

async fn copy_to_clipboard(text: String) -> Result<(), String> {
    let describe = |err: JsValue| format!("{err:?}");
    let navigator = window().navigator();
    let clipboard = Reflect::get(&navigator, &"clipboard".into()).map_err(describe)?;
    // insecure contexts expose no clipboard at all
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err("Clipboard API not available".to_string());
    }

    let write_text: Function = Reflect::get(&clipboard, &"writeText".into())
        .map_err(describe)?
        .dyn_into()
        .map_err(describe)?;
    let promise: Promise = write_text
        .call1(&clipboard, &JsValue::from_str(&text))
        .map_err(describe)?
        .dyn_into()
        .map_err(describe)?;
    JsFuture::from(promise).await.map(|_| ()).map_err(describe)
}

/// Asks the backend to write a short dialogue from a starting prompt.
#[component]
pub fn ConversationPage() -> impl IntoView {
    let (prompt, set_prompt) = signal(String::new());
    let (copy_status, set_copy_status) = signal(CopyStatus::default());
    let conversation = use_fetch(ConversationPolicy);

    let generate_disabled = Signal::derive({
        let loading = conversation.loading_signal();
        move || !can_generate(&prompt.get(), loading.get())
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        set_copy_status.set(CopyStatus::Ready);
        conversation.trigger(prompt.get_untracked());
    };

    let on_copy = move |_: web_sys::MouseEvent| {
        let Some(generated) = conversation.data() else {
            return;
        };
        leptos::task::spawn_local(async move {
            match copy_to_clipboard(generated.conversation).await {
                Ok(()) => {
                    set_copy_status.set(CopyStatus::Copied);
                    set_timeout(move || set_copy_status.set(CopyStatus::Ready), COPY_RESET_DELAY);
                }
                Err(err) => {
                    log::error!("Failed to copy text: {err}");
                    set_copy_status.set(CopyStatus::Failed);
                }
            }
        });
    };

    view! {
        <section class="max-w-3xl mx-auto p-4 space-y-4">
            <h2 class="text-2xl font-semibold text-seafoam-700 dark:text-mint-400">"Generate Conversation"</h2>
            <form class="space-y-2" on:submit=on_submit>
                <textarea
                    class="w-full min-h-24 p-2 rounded border border-gray-300 dark:border-teal-600 bg-white dark:bg-teal-800 text-gray-900 dark:text-gray-100"
                    placeholder="Enter a starting prompt for the conversation"
                    prop:value=prompt
                    on:input=move |ev| set_prompt.set(event_target_value(&ev))
                ></textarea>
                <Button submit=true disabled=generate_disabled>
                    {move || {
                        if conversation.is_loading() { "Generating..." } else { "Generate Conversation" }
                    }}
                </Button>
            </form>
            <FetchStatus
                loading=conversation.loading_signal()
                error=conversation.error_signal()
                loading_text="Generating conversation..."
            />
            {move || {
                conversation
                    .data()
                    .map(|generated| {
                        view! {
                            <div class="rounded border border-gray-200 dark:border-teal-700 p-4 bg-gray-50 dark:bg-teal-900 space-y-2">
                                <div class="flex items-center justify-between">
                                    <h3 class="font-semibold">"Generated Conversation:"</h3>
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::Small
                                        title="Copy conversation text to clipboard"
                                        on_click=Callback::new(on_copy)
                                    >
                                        {move || copy_status.get().label()}
                                    </Button>
                                </div>
                                <pre class="whitespace-pre-wrap text-left text-sm">{generated.conversation}</pre>
                            </div>
                        }
                    })
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_requires_prompt_and_idle_request() {
        assert!(can_generate("Two students discuss tides", false));
        assert!(!can_generate("Two students discuss tides", true));
        assert!(!can_generate("   ", false));
    }

    #[test]
    fn copy_labels() {
        assert_eq!(CopyStatus::default().label(), "Copy Text");
        assert_eq!(CopyStatus::Copied.label(), "Copied!");
        assert_eq!(CopyStatus::Failed.label(), "Copy Failed");
    }
}
