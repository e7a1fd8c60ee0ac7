//! Best-effort level-up reports to a hosting Telegram WebApp client
//!
//! Absence of the host object, or any failure while calling into it, is
//! logged and swallowed. The session-end flow never waits on this.

use serde::Serialize;

/// Payload handed to the host's messaging channel on level-up
#[derive(Debug, Clone, Serialize)]
pub struct LevelUpNotice {
    pub event: &'static str,
    pub level: u32,
    pub score: u32,
    /// Unix timestamp (ms)
    pub timestamp: f64,
}

impl LevelUpNotice {
    pub fn new(level: u32, score: u32, timestamp: f64) -> Self {
        Self {
            event: "level_up",
            level,
            score,
            timestamp,
        }
    }
}

/// Report a level-up to the host, if one is present
#[cfg(target_arch = "wasm32")]
pub fn notify_level_up(level: u32, score: u32) {
    let notice = LevelUpNotice::new(level, score, js_sys::Date::now());
    let json = match serde_json::to_string(&notice) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("level-up payload serialization failed: {e}");
            return;
        }
    };
    if let Err(e) = call_host("sendData", Some(&json)) {
        log::warn!("host sendData failed: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn notify_level_up(level: u32, score: u32) {
    log::debug!("level-up notice suppressed off-web (level {level}, score {score})");
}

/// Tell a present host the app is ready to display
#[cfg(target_arch = "wasm32")]
pub fn host_ready() {
    if let Err(e) = call_host("ready", None) {
        log::info!("no Telegram WebApp host detected: {e:?}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn host_ready() {}

/// Look up `window.Telegram.WebApp` and invoke `method` with an optional
/// string argument. Err covers both "host absent" and "call threw";
/// callers treat them the same.
#[cfg(target_arch = "wasm32")]
fn call_host(method: &str, arg: Option<&str>) -> Result<(), wasm_bindgen::JsValue> {
    use js_sys::{Function, Reflect};
    use wasm_bindgen::{JsCast, JsValue};

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let telegram = Reflect::get(window.as_ref(), &"Telegram".into())?;
    if telegram.is_undefined() || telegram.is_null() {
        return Err(JsValue::from_str("Telegram object missing"));
    }
    let webapp = Reflect::get(&telegram, &"WebApp".into())?;
    if webapp.is_undefined() || webapp.is_null() {
        return Err(JsValue::from_str("WebApp object missing"));
    }
    let function: Function = Reflect::get(&webapp, &method.into())?.dyn_into()?;
    match arg {
        Some(arg) => function.call1(&webapp, &arg.into())?,
        None => function.call0(&webapp)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_serializes_to_the_wire_shape() {
        let notice = LevelUpNotice::new(4, 37, 1_700_000_000_000.0);
        let value = serde_json::to_value(&notice).unwrap();
        assert_eq!(value["event"], "level_up");
        assert_eq!(value["level"], 4);
        assert_eq!(value["score"], 37);
        assert_eq!(value["timestamp"], 1_700_000_000_000.0);
        assert_eq!(value.as_object().unwrap().len(), 4);
    }
}
