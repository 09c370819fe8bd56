use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="flex flex-row left-0 pl-4 p-4 space-x-2 text-teal-400 dark:text-teal-600">
            <span>"learning"</span>
            <span>"•"</span>
            <span>"assistant"</span>
            <span>"•"</span>
            <a href="/history" class="font-bold">
                "history"
            </a>
        </footer>
    }
}
