use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[async_trait(?Send)]
pub trait Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), String>;
}

/// `navigator.clipboard.writeText` vía js_sys::Reflect
pub struct BrowserClipboard;

#[async_trait(?Send)]
impl Clipboard for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<(), String> {
        let window = web_sys::window().ok_or("No window")?;

        let navigator = js_sys::Reflect::get(&window, &JsValue::from_str("navigator"))
            .map_err(js_error)?;
        let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map_err(js_error)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err("Clipboard API no disponible".to_string());
        }

        let write_text = js_sys::Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(js_error)?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| "clipboard.writeText no es una función".to_string())?;

        let promise = write_text
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(js_error)?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| "clipboard.writeText no devolvió una Promise".to_string())?;

        JsFuture::from(promise).await.map_err(js_error)?;
        Ok(())
    }
}

fn js_error(value: JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}
