use dioxus::prelude::*;
use survey_core::Transcript;

/// Decorative backdrop. Holds no survey state.
#[component]
pub fn Background() -> Element {
    rsx! {
        div { class: "background", "aria-hidden": "true",
            div { class: "orb orb-indigo" }
            div { class: "orb orb-purple" }
            div { class: "orb orb-cyan" }
            div { class: "grain" }
        }
    }
}

#[component]
pub fn LoadingDots() -> Element {
    rsx! {
        main { class: "loading",
            div { class: "loading-dots",
                span { class: "dot dot-0", "●" }
                span { class: "dot dot-1", "●" }
                span { class: "dot dot-2", "●" }
            }
        }
    }
}

#[component]
pub fn ProgressBar(percent: u8) -> Element {
    rsx! {
        div { class: "progress",
            div { class: "progress-header",
                span { "Прогресс" }
                span { class: "progress-value", "{percent}%" }
            }
            div { class: "progress-track",
                div { class: "progress-fill", style: "width: {percent}%;" }
                div { class: "progress-glow", style: "left: {percent}%;" }
            }
        }
    }
}

/// One answer button. `index` staggers the entrance animation.
#[component]
pub fn OptionButton(
    label: String,
    index: usize,
    selected: bool,
    disabled: bool,
    on_select: EventHandler<String>,
) -> Element {
    let class = if selected {
        "option option-selected"
    } else {
        "option"
    };
    let check_class = if selected {
        "option-check option-check-on"
    } else {
        "option-check"
    };
    let delay_ms = index * 100;
    let value = label.clone();

    rsx! {
        button {
            class: "{class}",
            style: "animation-delay: {delay_ms}ms;",
            disabled,
            onclick: move |_| on_select.call(value.clone()),
            span { class: "option-fill" }
            span { class: "option-content",
                span { class: "option-label", "{label}" }
                span { class: "{check_class}",
                    if selected {
                        "✓"
                    }
                }
            }
        }
    }
}

/// Text entry for open questions. Blank input is never submitted.
#[component]
pub fn FreeTextAnswer(disabled: bool, on_submit: EventHandler<String>) -> Element {
    let mut draft = use_signal(String::new);
    let blank = draft.read().trim().is_empty();

    rsx! {
        form {
            class: "free-text",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                let text = draft.read().trim().to_string();
                if !text.is_empty() {
                    on_submit.call(text);
                }
            },
            input {
                class: "free-text-input",
                r#type: "text",
                placeholder: "Ваш ответ",
                value: "{draft}",
                disabled,
                oninput: move |evt: FormEvent| draft.set(evt.value()),
            }
            button {
                class: "free-text-submit",
                r#type: "submit",
                disabled: disabled || blank,
                "Отправить"
            }
        }
    }
}

/// Final screen. Shown when the host keeps the view open, and always when
/// running standalone.
#[component]
pub fn CompletionView(transcript: Transcript, delivered: bool) -> Element {
    let note = if delivered {
        "Ответы отправлены."
    } else {
        "Ответы сохранены."
    };

    rsx! {
        section { class: "completion",
            h1 { class: "question-title", "Спасибо!" }
            p { class: "completion-note", "{note}" }
            ul { class: "completion-list",
                for (index, record) in transcript.records().iter().enumerate() {
                    li { key: "{index}", class: "completion-item",
                        span { class: "completion-question", "{record.question}" }
                        span { class: "completion-answer", "{record.answer}" }
                    }
                }
            }
        }
    }
}
