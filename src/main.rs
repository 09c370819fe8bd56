use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "ssr")] {
        use anyhow::Context;
        use axum::{
            body::Body as AxumBody,
            extract::State,
            http::Request,
            middleware,
            response::IntoResponse,
            routing::get,
            Router,
        };
        use dotenv::dotenv;
        use leptos::prelude::*;
        use leptos_axum::{generate_route_list, LeptosRoutes};
        use learning_assistant::app::*;
        use learning_assistant::config::ApiConfig;
        use learning_assistant::middleware::tracing::trace_requests;
        use learning_assistant::services::backend_probe;
        use learning_assistant::state::AppState;
        use learning_assistant::telemetry;
        use std::net::SocketAddr;

        #[tokio::main]
        async fn main() -> anyhow::Result<()> {
            dotenv().ok();
            telemetry::init_server();

            let config = ApiConfig::from_env().context("invalid backend configuration")?;
            log::info!(
                "backend {} (timeout {}s, client log level {})",
                config.base_url,
                config.timeout_secs,
                config.client_log_level
            );
            backend_probe::probe(&config).await;

            let conf = get_configuration(None).context("failed to read leptos configuration")?;
            let addr = conf.leptos_options.site_addr;
            let leptos_options = conf.leptos_options;

            let routes = generate_route_list(App);

            let app_state = AppState::new(leptos_options, config);

            let app = Router::new()
                .leptos_routes_with_handler(routes, get(|State(app_state): State<AppState>, request: Request<AxumBody>| async move {
                    let options = app_state.leptos_options.clone();
                    let handler = leptos_axum::render_app_to_stream_with_context(
                        move || {
                            provide_context(app_state.config.clone());
                        },
                        move || shell(options.clone())
                    );
                    handler(request).await.into_response()
                }))
                .fallback(leptos_axum::file_and_error_handler::<AppState, _>(shell))
                .layer(middleware::from_fn(trace_requests))
                .with_state(app_state);

            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {addr}"))?;
            log::info!("listening on http://{}", &addr);
            axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
                .await
                .context("server error")?;
            Ok(())
        }
    } else {
        pub fn main() {
            // no client-side main function
            // see lib.rs for hydration function instead
        }
    }
}
