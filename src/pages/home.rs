use leptos::prelude::*;

use crate::components::header::APP_INTRO;
use crate::components::ui::{ButtonVariant, LinkButton};

const SECTIONS: [(&str, &str, &str); 5] = [
    ("/chat", "Chat", "Ask the model a question and read its answer."),
    ("/search", "Search", "Search the seeded notes and get an enhanced summary."),
    ("/textfiles", "Text Files", "Add text files from the backend to the database."),
    (
        "/generate-conversation",
        "Generate Conversation",
        "Turn a starting prompt into a short dialogue.",
    ),
    ("/history", "History", "Review earlier questions and answers."),
];

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <section class="max-w-3xl mx-auto p-4 space-y-6">
            <p class="text-gray-700 dark:text-gray-300">{APP_INTRO}</p>
            <ul class="grid gap-4 sm:grid-cols-2">
                {SECTIONS
                    .iter()
                    .map(|(href, title, blurb)| {
                        view! {
                            <li class="rounded border border-gray-200 dark:border-teal-700 p-4 space-y-2">
                                <LinkButton href=*href variant=ButtonVariant::Primary>
                                    {*title}
                                </LinkButton>
                                <p class="text-sm text-gray-600 dark:text-gray-400">{*blurb}</p>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </section>
    }
}
