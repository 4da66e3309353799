use dioxus::prelude::*;

use crate::bridge::HOST_SCRIPT_URL;
use crate::context::{AppContext, HostMode};
use crate::views::SurveyView;

/// Page and window title.
pub const WINDOW_TITLE: &str = "AI Insight Questionnaire";

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let load_host_script = ctx.host_mode() == HostMode::Detect;

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "{WINDOW_TITLE}" }
        if load_host_script {
            document::Script { src: HOST_SCRIPT_URL }
        }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Что-то пошло не так" }
                        pre { "{errors:?}" }
                    }
                },
                SurveyView {}
            }
        }
    }
}
