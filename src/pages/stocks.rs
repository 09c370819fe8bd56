use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::api::{normalize_ticker, StockBar, StockPolicy};
use crate::components::fetch_status::FetchStatus;
use crate::fetch::hook::use_fetch;

/// Thirty days of bars for the ticker in the route. Navigating between
/// tickers re-fetches; a late reply for the previous ticker is discarded.
#[component]
pub fn StocksPage() -> impl IntoView {
    let params = use_params_map();
    let ticker = Memo::new(move |_| {
        normalize_ticker(&params.with(|p| p.get("ticker").unwrap_or_default()))
    });
    let stocks = use_fetch(StockPolicy);

    Effect::new(move |_| stocks.trigger(ticker.get()));

    view! {
        <section class="max-w-4xl mx-auto p-4 space-y-4">
            <FetchStatus
                loading=stocks.loading_signal()
                error=stocks.error_signal()
                loading_text=Signal::derive(move || {
                    format!("Loading stock data for {} ...", ticker.get())
                })
            />
            {move || {
                stocks
                    .data()
                    .map(|bars| {
                        let ticker = ticker.get_untracked();
                        if bars.is_empty() {
                            view! {
                                <p class="text-gray-600 dark:text-gray-400">
                                    {format!("No stock data available for {ticker}.")}
                                </p>
                            }
                                .into_any()
                        } else {
                            view! { <StockTable ticker bars /> }.into_any()
                        }
                    })
            }}
        </section>
    }
}

#[component]
fn StockTable(ticker: String, bars: Vec<StockBar>) -> impl IntoView {
    let cell = "border border-gray-300 dark:border-teal-600 px-3 py-1 text-right";

    view! {
        <h2 class="text-2xl font-semibold text-seafoam-700 dark:text-mint-400">
            {format!("30 Day Stock Data for {ticker}")}
        </h2>
        <div class="overflow-x-auto">
            <table class="min-w-full border border-gray-300 dark:border-teal-600 text-sm">
                <thead class="bg-gray-100 dark:bg-teal-700">
                    <tr>
                        <th class=cell>"Date"</th>
                        <th class=cell>"Open"</th>
                        <th class=cell>"High"</th>
                        <th class=cell>"Low"</th>
                        <th class=cell>"Close"</th>
                        <th class=cell>"Volume"</th>
                    </tr>
                </thead>
                <tbody>
                    {bars
                        .into_iter()
                        .map(|bar| {
                            view! {
                                <tr>
                                    <td class=cell>{bar.date.clone()}</td>
                                    <td class=cell>{bar.open_text()}</td>
                                    <td class=cell>{bar.high_text()}</td>
                                    <td class=cell>{bar.low_text()}</td>
                                    <td class=cell>{bar.close_text()}</td>
                                    <td class=cell>{bar.volume_text()}</td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
        </div>
    }
}
