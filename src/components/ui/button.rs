use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Ghost,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ButtonSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ButtonVariant {
    fn classes(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => {
                "bg-seafoam-600 dark:bg-teal-600 text-white \
                 hover:bg-seafoam-700 dark:hover:bg-teal-500 \
                 border border-seafoam-600 dark:border-teal-700"
            }
            ButtonVariant::Secondary => {
                "bg-gray-500 dark:bg-gray-600 text-white \
                 hover:bg-gray-600 dark:hover:bg-gray-500 \
                 border border-gray-500 dark:border-gray-600"
            }
            ButtonVariant::Ghost => {
                "bg-transparent text-gray-700 dark:text-gray-300 \
                 hover:bg-gray-100 dark:hover:bg-teal-800"
            }
        }
    }
}

impl ButtonSize {
    fn classes(&self) -> &'static str {
        match self {
            ButtonSize::Small => "px-2 py-1 text-xs",
            ButtonSize::Medium => "px-4 py-2 text-sm",
            ButtonSize::Large => "px-5 py-2.5 text-base",
        }
    }
}

const BASE_CLASSES: &str =
    "inline-flex items-center justify-center font-medium rounded transition-colors duration-200 focus:outline-none";

fn combined_classes(variant: ButtonVariant, size: ButtonSize, disabled: bool, extra: &str) -> String {
    let state = if disabled {
        "opacity-50 cursor-not-allowed"
    } else {
        "cursor-pointer"
    };
    format!(
        "{BASE_CLASSES} {} {} {state} {extra}",
        variant.classes(),
        size.classes()
    )
}

#[component]
pub fn Button(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional, into)] disabled: Signal<bool>,
    /// `"submit"` inside a form; plain `"button"` otherwise.
    #[prop(optional)] submit: bool,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] title: Option<String>,
    #[prop(optional)] on_click: Option<Callback<web_sys::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type=if submit { "submit" } else { "button" }
            class=move || combined_classes(variant, size, disabled.get(), &class)
            title=title
            disabled=move || disabled.get()
            on:click=move |ev| {
                if !disabled.get_untracked() {
                    if let Some(handler) = on_click {
                        handler.run(ev);
                    }
                }
            }
        >
            {children()}
        </button>
    }
}

#[component]
pub fn LinkButton(
    #[prop(optional)] variant: ButtonVariant,
    #[prop(optional)] size: ButtonSize,
    #[prop(optional, into)] class: String,
    #[prop(into)] href: String,
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "{} no-underline",
        combined_classes(variant, size, false, &class)
    );

    view! {
        <a class=classes href=href>
            {children()}
        </a>
    }
}
