use leptos::prelude::*;

use crate::api::stocks::TRACKED_TICKERS;

pub const APP_TITLE: &str = "Gemini 1.5 Educational Assistant";

pub const APP_INTRO: &str = "This application uses a combination of ChromaDB, FastAPI, 2 Sqlite3 Databases, \
     Gemini 1.5 flash, pydantic and sentence_transformers to create an outstanding educational platform.";

const NAV_LINKS: [(&str, &str); 6] = [
    ("/", "Home"),
    ("/chat", "Chat"),
    ("/search", "Search"),
    ("/textfiles", "Text Files"),
    ("/generate-conversation", "Generate Conversation"),
    ("/history", "History"),
];

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="w-full bg-gray-100 dark:bg-teal-900 border-b border-gray-300 dark:border-teal-700">
            <div class="flex flex-col md:flex-row md:justify-between md:items-center px-4 py-3 gap-2">
                <a
                    href="/"
                    class="text-2xl text-seafoam-600 dark:text-mint-400 font-bold"
                >
                    {APP_TITLE}
                </a>
                <nav class="flex flex-wrap gap-3 text-sm">
                    {NAV_LINKS
                        .iter()
                        .map(|(href, label)| {
                            view! {
                                <a
                                    href=*href
                                    class="text-teal-700 dark:text-aqua-300 hover:text-seafoam-600 dark:hover:text-mint-400"
                                >
                                    {*label}
                                </a>
                            }
                        })
                        .collect_view()}
                </nav>
            </div>
            <p class="px-4 pb-2 text-sm text-gray-700 dark:text-gray-300">{APP_INTRO}</p>
            <div class="flex flex-wrap items-center gap-2 px-4 pb-3 text-sm">
                <span class="text-gray-600 dark:text-gray-400">
                    "30 Day Indexes: Apple, Microsoft and Google"
                </span>
                {TRACKED_TICKERS
                    .iter()
                    .map(|ticker| {
                        view! {
                            <a
                                href=format!("/stocks/{ticker}")
                                class="px-2 py-0.5 rounded bg-mint-100 dark:bg-teal-800 text-teal-700 dark:text-mint-300 hover:bg-mint-200 dark:hover:bg-teal-700"
                            >
                                {*ticker}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
        </header>
    }
}
