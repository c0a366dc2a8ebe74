// ============================================================================
// HEADER - Barra superior compartida (app y admin)
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::{append_child, on_click, ElementBuilder};

/// Botón de navegación: etiqueta + acción
pub type NavAction<'a> = (&'a str, Box<dyn Fn()>);

pub fn render_header(
    ctx: &AppContext,
    brand: Element,
    nav: NavAction<'_>,
    initials: Option<&str>,
) -> Result<Element, JsValue> {
    let header = ElementBuilder::new("header")?
        .class("app-header")
        .child(brand)?
        .build();

    let actions = ElementBuilder::new("div")?
        .class("header-actions")
        .build();

    let (label, action) = nav;
    let nav_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-nav")
        .text(label)
        .build();
    on_click(&nav_btn, move |_| action())?;
    append_child(&actions, &nav_btn)?;

    let logout_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-logout")
        .text("Logout")
        .build();
    {
        let vm = ctx.session_vm.clone();
        on_click(&logout_btn, move |_| {
            log::info!("🚪 [HEADER] Logout solicitado");
            let vm = vm.clone();
            spawn_local(async move {
                vm.logout().await;
            });
        })?;
    }
    append_child(&actions, &logout_btn)?;

    if let Some(initials) = initials {
        let avatar = ElementBuilder::new("div")?
            .class("avatar")
            .text(initials)
            .build();
        append_child(&actions, &avatar)?;
    }

    append_child(&header, &actions)?;
    Ok(header)
}
