use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use axum::extract::FromRef;
        use leptos::prelude::LeptosOptions;

        use crate::config::ApiConfig;

        #[derive(FromRef, Clone, Debug)]
        pub struct AppState {
            pub leptos_options: LeptosOptions,
            pub config: ApiConfig,
        }

        impl AppState {
            pub fn new(leptos_options: LeptosOptions, config: ApiConfig) -> Self {
                Self {
                    leptos_options,
                    config,
                }
            }
        }
    }
}
