use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path, StaticSegment,
};

use crate::components::footer::Footer;
use crate::components::header::{Header, APP_TITLE};
use crate::config::{ApiConfig, META_BACKEND_URL, META_CLIENT_LOG_LEVEL, META_TIMEOUT_SECS};
use crate::pages::{
    ChatPage, ConversationPage, FilesPage, HistoryPage, HomePage, SearchPage, StocksPage,
};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    // the hydrating client reads these back in `ApiConfig::from_document`
    let config = use_context::<ApiConfig>().unwrap_or_default();

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name=META_BACKEND_URL content=config.base_url />
                <meta name=META_TIMEOUT_SECS content=config.timeout_secs.to_string() />
                <meta name=META_CLIENT_LOG_LEVEL content=config.client_log_level />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body class="bg-white dark:bg-teal-950 text-gray-900 dark:text-gray-100">
                <App />
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/learning-assistant.css" />
        <Title text=APP_TITLE />
        <Router>
            <Header />
            <main class="min-h-[60vh]">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage />
                    <Route path=path!("chat") view=ChatPage />
                    <Route path=path!("search") view=SearchPage />
                    <Route path=path!("textfiles") view=FilesPage />
                    <Route path=path!("stocks/:ticker") view=StocksPage />
                    <Route path=path!("generate-conversation") view=ConversationPage />
                    <Route path=path!("history") view=HistoryPage />
                </Routes>
            </main>
            <Footer />
        </Router>
    }
}
