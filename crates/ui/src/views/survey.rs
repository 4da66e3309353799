use std::sync::Arc;

use dioxus::prelude::*;
use survey_core::{HostBridge, LogBridge, Transcript};

use crate::bridge::{ScriptBridge, detect_host, location_fragment};
use crate::context::{AppContext, FragmentSource, HostMode};
use crate::views::components::{
    Background, CompletionView, FreeTextAnswer, LoadingDots, OptionButton, ProgressBar,
};
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{OptionVm, SurveyPhase, SurveyVm, start_survey};

/// What the survey screen shows for one render.
#[derive(Clone, Debug, PartialEq)]
enum Screen {
    Question {
        step: usize,
        text: String,
        options: Vec<OptionVm>,
        free_text: bool,
        locked: bool,
        percent: u8,
    },
    Completed {
        transcript: Transcript,
        delivered: bool,
    },
}

impl Screen {
    fn of(vm: &SurveyVm) -> Option<Self> {
        if vm.phase() == SurveyPhase::Completed {
            return Some(Self::Completed {
                transcript: vm.transcript()?,
                delivered: vm.is_embedded(),
            });
        }
        Some(Self::Question {
            step: vm.step()?,
            text: vm.question_text()?.to_string(),
            options: vm.options(),
            free_text: vm.accepts_free_text(),
            locked: vm.phase() == SurveyPhase::Confirming,
            percent: vm.progress_percent(),
        })
    }
}

async fn resolve_bridge(ctx: &AppContext) -> Arc<dyn HostBridge> {
    if let Some(bridge) = ctx.bridge() {
        return bridge;
    }
    match ctx.host_mode() {
        HostMode::Standalone => Arc::new(LogBridge),
        HostMode::Detect if detect_host().await => Arc::new(ScriptBridge),
        HostMode::Detect => Arc::new(LogBridge),
    }
}

#[component]
pub fn SurveyView() -> Element {
    let ctx = use_context::<AppContext>();
    let error = use_signal(|| None::<ViewError>);
    let vm = use_signal(|| None::<SurveyVm>);

    let resource = use_resource(move || {
        let ctx = ctx.clone();
        let mut vm = vm;
        async move {
            let fragment = match ctx.fragment_source() {
                FragmentSource::Fixed(fragment) => fragment,
                FragmentSource::Location => location_fragment().await,
            };
            let bridge = resolve_bridge(&ctx).await;
            vm.set(Some(start_survey(&fragment, bridge, ctx.settings())));
            Ok::<_, ViewError>(())
        }
    });

    let on_select = use_callback(move |option: String| {
        let mut vm = vm;
        let mut error = error;
        let delay = vm.write().as_mut().and_then(|current| current.select(option));
        let Some(delay) = delay else {
            return;
        };

        spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let result = vm.write().as_mut().map(SurveyVm::advance);
            match result {
                Some(Ok(outcome)) => {
                    tracing::debug!(?outcome, "survey step committed");
                    error.set(None);
                }
                Some(Err(err)) => error.set(Some(err)),
                None => {}
            }
        });
    });

    let state = view_state_from_resource(resource);
    let screen = vm.read().as_ref().and_then(Screen::of);
    let error_message = error().map(ViewError::message);

    rsx! {
        Background {}
        match (state, screen) {
            (ViewState::Error(err), _) => rsx! {
                main { class: "survey",
                    p { class: "error", "{err.message()}" }
                }
            },
            (ViewState::Ready(()), Some(Screen::Completed { transcript, delivered })) => rsx! {
                main { class: "survey",
                    div { class: "survey-body",
                        CompletionView { transcript, delivered }
                    }
                    if let Some(message) = error_message {
                        p { class: "error", "{message}" }
                    }
                }
            },
            (ViewState::Ready(()), Some(Screen::Question { step, text, options, free_text, locked, percent })) => rsx! {
                main { class: "survey",
                    div { class: "survey-header",
                        ProgressBar { percent }
                    }
                    div { class: "survey-body",
                        div { class: "question",
                            h1 { class: "question-title", "{text}" }
                            div { class: "options",
                                for (index, option) in options.into_iter().enumerate() {
                                    OptionButton {
                                        key: "{step}-{index}",
                                        label: option.label,
                                        index,
                                        selected: option.selected,
                                        disabled: option.disabled,
                                        on_select,
                                    }
                                }
                            }
                            if free_text {
                                FreeTextAnswer { key: "{step}", disabled: locked, on_submit: on_select }
                            }
                        }
                    }
                    if let Some(message) = error_message {
                        p { class: "error", "{message}" }
                    }
                    div { class: "survey-footer" }
                }
            },
            _ => rsx! { LoadingDots {} },
        }
    }
}
