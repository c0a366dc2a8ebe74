// ============================================================================
// APP VIEW - Selección de pantalla según la fase de sesión
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::app::AppContext;
use crate::state::Screen;
use crate::views::{render_admin_panel, render_loading, render_login, render_main_app};

/// Renderizar la pantalla que corresponde al estado actual
pub fn render_app(ctx: &AppContext) -> Result<Element, JsValue> {
    let screen = ctx.state.session.screen();
    log::debug!("🎬 [APP] render_app() -> {:?}", screen);

    match screen {
        Screen::Loading => render_loading(),
        Screen::Login => render_login(ctx),
        Screen::MainApp => render_main_app(ctx),
        Screen::Admin => render_admin_panel(ctx),
    }
}
