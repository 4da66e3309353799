use dioxus::prelude::*;
use survey_core::{AnswerRecord, BridgeCall, Transcript};

use super::test_harness::{drive_dom, render_started};
use crate::views::{CompletionView, OptionButton, ProgressBar};

const PERCENT_FRAGMENT: &str = "%5B%7B%22question_text%22%3A%22Q1%22%2C%22type%22%3A%22multiple_choice%22%2C%22variants%22%3A%5B%22A%22%2C%22B%22%5D%7D%5D";

#[tokio::test(flavor = "current_thread")]
async fn survey_view_renders_payload_question() {
    let (_harness, html) = render_started(PERCENT_FRAGMENT).await;
    assert!(html.contains("Q1"), "missing question in {html}");
    assert!(html.contains(">A<"), "missing option A in {html}");
    assert!(html.contains(">B<"), "missing option B in {html}");
    assert!(html.contains("100%"), "missing progress in {html}");
    assert!(!html.contains("free-text"), "unexpected text input in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_renders_demo_without_fragment() {
    let (_harness, html) = render_started("").await;
    assert!(
        html.contains("Какой стиль интерфейса вам нравится?"),
        "missing demo question in {html}"
    );
    assert!(html.contains("Киберпанк"), "missing demo option in {html}");
    assert!(html.contains("50%"), "missing progress in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_falls_back_on_broken_payload() {
    let (_harness, html) = render_started("d=%%%").await;
    assert!(
        html.contains("Ошибка загрузки данных"),
        "missing error question in {html}"
    );
    assert!(html.contains("Перезагрузить"), "missing reload option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_shows_free_text_for_open_questions() {
    let fragment = "%5B%7B%22question_text%22%3A%22Why%3F%22%2C%22type%22%3A%22open_text%22%7D%5D";
    let (_harness, html) = render_started(fragment).await;
    assert!(html.contains("free-text"), "missing text input in {html}");
    assert!(html.contains(">Yes<"), "missing fallback option in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn survey_view_prepares_host_on_start() {
    let (harness, _html) = render_started(PERCENT_FRAGMENT).await;
    let calls = harness.bridge.calls();
    assert_eq!(calls.len(), 3, "unexpected calls {calls:?}");
    assert_eq!(calls[0], BridgeCall::Expand);
    assert_eq!(calls[1], BridgeCall::Ready);
    assert!(matches!(calls[2], BridgeCall::SetColors { .. }));
    assert!(harness.bridge.sent().is_empty());
}

fn render_static(app: fn() -> Element) -> String {
    let mut dom = VirtualDom::new(app);
    dom.rebuild_in_place();
    drive_dom(&mut dom);
    dioxus_ssr::render(&dom)
}

#[test]
fn progress_bar_renders_width() {
    let html = render_static(|| rsx! { ProgressBar { percent: 67 } });
    assert!(html.contains("Прогресс"), "missing label in {html}");
    assert!(html.contains("67%"), "missing value in {html}");
    assert!(html.contains("width: 67%;"), "missing width in {html}");
}

#[test]
fn option_button_marks_selection() {
    let html = render_static(|| {
        rsx! {
            OptionButton {
                label: "Минимализм".to_string(),
                index: 1,
                selected: true,
                disabled: true,
                on_select: move |_: String| {},
            }
        }
    });
    assert!(html.contains("option-selected"), "missing selected class in {html}");
    assert!(html.contains("Минимализм"), "missing label in {html}");
    assert!(html.contains("disabled"), "missing disabled in {html}");
    assert!(html.contains("animation-delay: 100ms;"), "missing delay in {html}");
}

#[test]
fn completion_view_lists_answers() {
    let html = render_static(|| {
        let transcript = Transcript::from(vec![AnswerRecord {
            question: "Q1".to_string(),
            answer: "B".to_string(),
        }]);
        rsx! {
            CompletionView { transcript, delivered: false }
        }
    });
    assert!(html.contains("Спасибо!"), "missing heading in {html}");
    assert!(html.contains("Ответы сохранены."), "missing note in {html}");
    assert!(html.contains("Q1"), "missing question in {html}");
    assert!(html.contains(">B<"), "missing answer in {html}");
}
