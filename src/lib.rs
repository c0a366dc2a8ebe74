// ============================================================================
// CLARIFY - FRONTEND MVVM (RUST PURO)
// ============================================================================
// Arquitectura MVVM:
// - Views: Funciones que renderizan DOM (sin lógica)
// - ViewModels: Estado + Lógica UI
// - Services: Identidad, servicio de respuestas, portapapeles
// - State: State Management con Rc<RefCell>
// - Models: Estructuras compartidas con backend
// ============================================================================

pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod viewmodels;
mod dom;
mod views;
mod utils;
mod app;

#[cfg(test)]
mod test_support;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_logger::Config;
use crate::app::App;
use crate::config::CONFIG;

// Instancia global de App
thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Panic hook para mejor debugging
    console_error_panic_hook::set_once();

    // Con logging deshabilitado solo pasan warnings y errores
    wasm_logger::init(Config::new(CONFIG.log_level()));
    log::info!("🚀 Clarify - Rust Puro + MVVM ({})", CONFIG.environment);
    if !CONFIG.is_production() {
        log::info!("🔧 [CONFIG] Answer service: {}", CONFIG.answer_service_url);
    }

    let mut app = App::new()?;
    app.render()?;

    APP.with(|app_cell| {
        *app_cell.borrow_mut() = Some(app);
    });

    Ok(())
}

/// Re-render completo de la app
pub fn rerender_app() {
    APP.with(|app_cell| {
        // Un re-render pedido mientras otro está en curso se descarta
        let Ok(mut slot) = app_cell.try_borrow_mut() else {
            log::warn!("⚠️ [RERENDER] Render en curso, se omite");
            return;
        };
        match slot.as_mut() {
            Some(app) => {
                log::debug!("🔄 [RERENDER] Re-render completo ({:?})", app.state().session.screen());
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] Error re-renderizando: {:?}", e);
                }
            }
            None => log::warn!("⚠️ [RERENDER] App no está inicializada"),
        }
    });
}

/// Re-render llamable desde JavaScript
#[wasm_bindgen]
pub fn rerender_app_wasm() {
    rerender_app();
}

/// Desmontar la app: suelta la instancia y con ella sus suscripciones
#[wasm_bindgen]
pub fn shutdown_app() {
    let app = APP.with(|app_cell| app_cell.borrow_mut().take());
    if app.is_some() {
        log::info!("👋 [APP] App desmontada");
    }
}
