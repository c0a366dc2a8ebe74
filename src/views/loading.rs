use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::ElementBuilder;

/// Pantalla de carga mientras el proveedor de identidad resuelve la sesión
pub fn render_loading() -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("loading-screen")
        .child(ElementBuilder::new("div")?.class("spinner").build())?
        .child(ElementBuilder::new("p")?.text("Loading...").build())?
        .build())
}
