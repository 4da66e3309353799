use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use survey_core::{HostBridge, RecordingBridge, SurveySettings};

use crate::context::{FragmentSource, HostMode, UiApp, build_app_context};
use crate::views::SurveyView;

struct TestApp {
    fragment: String,
    bridge: Arc<RecordingBridge>,
}

impl UiApp for TestApp {
    fn fragment_source(&self) -> FragmentSource {
        FragmentSource::Fixed(self.fragment.clone())
    }

    fn host_mode(&self) -> HostMode {
        HostMode::Standalone
    }

    fn settings(&self) -> SurveySettings {
        SurveySettings::default().with_advance_delay(Duration::ZERO)
    }

    fn bridge(&self) -> Option<Arc<dyn HostBridge>> {
        let bridge: Arc<dyn HostBridge> = self.bridge.clone();
        Some(bridge)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn SurveyHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { SurveyView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub bridge: Arc<RecordingBridge>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Mounts `SurveyView` over `fragment` with a recording host bridge.
pub fn setup_view_harness(fragment: &str) -> ViewHarness {
    let bridge = Arc::new(RecordingBridge::embedded());
    let app = Arc::new(TestApp {
        fragment: fragment.to_string(),
        bridge: Arc::clone(&bridge),
    });
    let dom = VirtualDom::new_with_props(SurveyHarness, ViewHarnessProps { app });
    ViewHarness { dom, bridge }
}

/// Renders the view after its startup resource has resolved.
pub async fn render_started(fragment: &str) -> (ViewHarness, String) {
    let mut harness = setup_view_harness(fragment);
    harness.rebuild();
    for _ in 0..3 {
        harness.drive_async().await;
    }
    let html = harness.render();
    (harness, html)
}
