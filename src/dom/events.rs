// ============================================================================
// EVENT HANDLING - Helpers de listeners
// ============================================================================
// Los listeners viven en elementos que se destruyen en cada re-render completo
// (set_inner_html("")); el navegador los limpia, así que closure.forget() es
// seguro aquí. Listeners globales (window/document) no se registran desde views.
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, Element, Event, HtmlInputElement, MouseEvent};

fn listen<E, F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    element.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    // Necesario para mantener el closure vivo en Rust WASM
    closure.forget();
    Ok(())
}

/// Click simple
pub fn on_click<F>(element: &Element, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    listen(element, "click", handler)
}

/// Input de texto: entrega el valor actual del <input>
pub fn on_input<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(String) + 'static,
{
    listen(element, "input", move |e: Event| {
        if let Some(input) = e.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
            handler(input.value());
        }
    })
}

/// Submit de formulario (sin recargar la página)
pub fn on_submit<F>(element: &Element, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut() + 'static,
{
    listen(element, "submit", move |e: Event| {
        e.prevent_default();
        handler();
    })
}

/// Eventos de drag & drop (dragover, dragleave, drop)
pub fn on_drag<F>(element: &Element, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(DragEvent) + 'static,
{
    listen(element, event_type, handler)
}
