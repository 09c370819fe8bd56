use leptos::leptos_dom::helpers::TimeoutHandle;
use leptos::prelude::*;

/// Transient notice pinned to the bottom-right corner.
#[component]
pub fn Toast(
    #[prop(into)] message: Signal<String>,
    #[prop(into)] visible: Signal<bool>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let opacity_class = move || {
        if visible.get() {
            "opacity-100"
        } else {
            "opacity-0 pointer-events-none"
        }
    };

    view! {
        <div
            class=move || {
                format!(
                    "{} fixed bottom-4 right-4 bg-gray-100 dark:bg-teal-800 text-teal-600 dark:text-mint-300 px-4 py-2 rounded shadow-lg transition-opacity duration-300",
                    opacity_class(),
                )
            }
            role="status"
        >
            {message}
            <button
                class="ml-2 text-salmon-600 hover:text-salmon-700 dark:text-salmon-400"
                aria-label="Dismiss"
                on:click=move |_| on_close.run(())
            >
                "×"
            </button>
        </div>
    }
}

/// Stores `next` as the pending hide timer, clearing the one it replaces so
/// an older timer cannot hide a newer message early.
pub fn replace_timer<H>(slot: &mut Option<H>, next: H, clear: impl FnOnce(H)) {
    if let Some(previous) = slot.replace(next) {
        clear(previous);
    }
}

/// Signals and timer for one [`Toast`]. `show` restarts the hide timer.
#[derive(Clone, Copy)]
pub struct ToastState {
    pub message: ReadSignal<String>,
    pub visible: ReadSignal<bool>,
    set_message: WriteSignal<String>,
    set_visible: WriteSignal<bool>,
    timer: StoredValue<Option<TimeoutHandle>>,
    duration: std::time::Duration,
}

impl ToastState {
    pub fn new(duration: std::time::Duration) -> Self {
        let (message, set_message) = signal(String::new());
        let (visible, set_visible) = signal(false);
        Self {
            message,
            visible,
            set_message,
            set_visible,
            timer: StoredValue::new(None),
            duration,
        }
    }

    pub fn show(&self, message: String) {
        self.set_message.set(message);
        self.set_visible.set(true);

        let set_visible = self.set_visible;
        match set_timeout_with_handle(move || set_visible.set(false), self.duration) {
            Ok(handle) => self
                .timer
                .update_value(|slot| replace_timer(slot, handle, |previous| previous.clear())),
            Err(e) => log::warn!("could not schedule toast timeout: {e:?}"),
        }
    }

    pub fn hide(&self) {
        if let Some(handle) = self.timer.try_update_value(Option::take).flatten() {
            handle.clear();
        }
        self.set_visible.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::replace_timer;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    #[test]
    fn replacing_a_timer_clears_the_previous_one() {
        let cleared = RefCell::new(Vec::new());
        let mut slot = None;

        replace_timer(&mut slot, 1, |h| cleared.borrow_mut().push(h));
        assert!(cleared.borrow().is_empty());

        replace_timer(&mut slot, 2, |h| cleared.borrow_mut().push(h));
        replace_timer(&mut slot, 3, |h| cleared.borrow_mut().push(h));

        assert_eq!(*cleared.borrow(), vec![1, 2]);
        assert_eq!(slot, Some(3));
    }
}
