//! Host bridge backed by the messaging app's `WebApp` object in the web view.

use dioxus::document::eval;
use survey_core::{BridgeError, HostBridge, HostTheme, Transcript};

/// Script that exposes `window.Telegram.WebApp` to the page.
pub const HOST_SCRIPT_URL: &str = "https://telegram.org/js/telegram-web-app.js";

const WEB_APP: &str = "window.Telegram && window.Telegram.WebApp";
const DETECT_ATTEMPTS: u32 = 20;
const DETECT_INTERVAL_MS: u32 = 50;

/// Forwards bridge calls to the page's `WebApp` object through `eval`.
///
/// Calls are fire-and-forget and silently skipped when the object is gone.
/// Must be used from inside the Dioxus runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptBridge;

impl ScriptBridge {
    fn call(body: &str) {
        let js = format!("(function() {{ const tg = {WEB_APP}; if (tg) {{ {body} }} }})();");
        let _ = eval(&js);
    }
}

impl HostBridge for ScriptBridge {
    fn is_embedded(&self) -> bool {
        true
    }

    fn expand(&self) {
        Self::call("tg.expand();");
    }

    fn ready(&self) {
        Self::call("tg.ready();");
    }

    fn set_colors(&self, theme: &HostTheme) {
        Self::call(&format!(
            "tg.setHeaderColor({}); tg.setBackgroundColor({});",
            js_string(&theme.header_color),
            js_string(&theme.background_color),
        ));
    }

    fn send_result(&self, transcript: &Transcript) -> Result<(), BridgeError> {
        let payload = transcript.to_json()?;
        Self::call(&format!("tg.sendData({});", js_string(&payload)));
        Ok(())
    }

    fn close(&self) {
        Self::call("tg.close();");
    }
}

fn detect_script() -> String {
    let launched = format!("(function() {{ const tg = {WEB_APP}; return !!(tg && tg.initData); }})()");
    format!(
        "for (let i = 0; i < {DETECT_ATTEMPTS}; i++) {{ \
            if ({launched}) {{ return true; }} \
            await new Promise((resolve) => setTimeout(resolve, {DETECT_INTERVAL_MS})); \
        }} \
        return {launched};"
    )
}

/// Quotes `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// True when the page runs inside the messaging app. The host script defines
/// `WebApp` in any browser, so launch data (`initData`) must be present too.
/// Waits up to `DETECT_ATTEMPTS * DETECT_INTERVAL_MS` for the script to load.
pub async fn detect_host() -> bool {
    let js = detect_script();
    match eval(&js).join::<bool>().await {
        Ok(present) => present,
        Err(error) => {
            tracing::debug!(?error, "host detection failed; assuming standalone");
            false
        }
    }
}

/// Reads the fragment of the page URL, without the leading `#`.
pub async fn location_fragment() -> String {
    match eval("return window.location.hash;").join::<String>().await {
        Ok(hash) => hash.strip_prefix('#').unwrap_or(&hash).to_string(),
        Err(error) => {
            tracing::warn!(?error, "could not read location hash");
            String::new()
        }
    }
}
