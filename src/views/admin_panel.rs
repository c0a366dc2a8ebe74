// ============================================================================
// ADMIN PANEL VIEW - Gestión de la base de conocimiento
// ============================================================================
// La subida de documentos no está conectada a ningún backend: el área de
// drag & drop solo refleja el estado visual y registra los archivos soltados.
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Element};
use crate::app::AppContext;
use crate::dom::{append_child, on_drag, set_class_name, ElementBuilder};
use crate::views::header::render_header;

const DROP_ZONE_CLASS: &str = "drop-zone";
const DROP_ZONE_ACTIVE_CLASS: &str = "drop-zone dragging";

/// Subidas recientes (lista estática)
const RECENT_UPLOADS: [(&str, &str); 2] = [
    ("CryoCord_SOP_v2.pdf", "Processed"),
    ("Sales_Script_2025.docx", "Processed"),
];

pub fn render_admin_panel(ctx: &AppContext) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .class("admin-panel")
        .build();

    let header = {
        let to_app = ctx.session_vm.clone();
        render_header(
            ctx,
            ElementBuilder::new("span")?
                .class("admin-title")
                .text("Admin Panel")
                .build(),
            ("Back to App", Box::new(move || to_app.switch_to_app())),
            None,
        )?
    };
    append_child(&container, &header)?;

    let main = ElementBuilder::new("main")?
        .class("admin-content")
        .child(ElementBuilder::new("h1")?.text("Knowledge Base Management").build())?
        .child(
            ElementBuilder::new("p")?
                .class("admin-subtitle")
                .text("Upload documents to keep answers accurate and compliant.")
                .build(),
        )?
        .build();

    append_child(&main, &render_drop_zone(ctx)?)?;
    append_child(&main, &render_recent_uploads()?)?;

    let info = ElementBuilder::new("div")?
        .class("info-notice")
        .child(ElementBuilder::new("h4")?.text("Document Upload Feature").build())?
        .child(
            ElementBuilder::new("p")?
                .text("Uploaded documents are not yet processed. This area is a preview of the upcoming knowledge base workflow.")
                .build(),
        )?
        .build();
    append_child(&main, &info)?;

    append_child(&container, &main)?;
    Ok(container)
}

fn render_drop_zone(ctx: &AppContext) -> Result<Element, JsValue> {
    let dragging = *ctx.state.admin_dragging.borrow();
    let zone = ElementBuilder::new("div")?
        .class(if dragging { DROP_ZONE_ACTIVE_CLASS } else { DROP_ZONE_CLASS })
        .child(ElementBuilder::new("h3")?.text("Upload Documents").build())?
        .child(
            ElementBuilder::new("p")?
                .text("Drag and drop PDF, DOCX, or TXT files here")
                .build(),
        )?
        .child(
            ElementBuilder::new("button")?
                .attr("type", "button")?
                .class("btn-select-files")
                .text("Select Files")
                .build(),
        )?
        .build();

    // Solo se cambia la clase del área; no hace falta re-render completo
    {
        let state = ctx.state.clone();
        let target = zone.clone();
        on_drag(&zone, "dragover", move |e: DragEvent| {
            e.prevent_default();
            if state.set_admin_dragging(true) {
                set_class_name(&target, DROP_ZONE_ACTIVE_CLASS);
            }
        })?;
    }
    {
        let state = ctx.state.clone();
        let target = zone.clone();
        on_drag(&zone, "dragleave", move |_e: DragEvent| {
            if state.set_admin_dragging(false) {
                set_class_name(&target, DROP_ZONE_CLASS);
            }
        })?;
    }
    {
        let state = ctx.state.clone();
        let target = zone.clone();
        on_drag(&zone, "drop", move |e: DragEvent| {
            e.prevent_default();
            if state.set_admin_dragging(false) {
                set_class_name(&target, DROP_ZONE_CLASS);
            }
            log_dropped_files(&e);
        })?;
    }

    Ok(zone)
}

fn log_dropped_files(event: &DragEvent) {
    let Some(files) = event.data_transfer().and_then(|dt| dt.files()) else {
        return;
    };
    for i in 0..files.length() {
        if let Some(file) = files.get(i) {
            log::info!("📄 [ADMIN] Archivo soltado: {} ({} bytes)", file.name(), file.size());
        }
    }
}

fn render_recent_uploads() -> Result<Element, JsValue> {
    let list = ElementBuilder::new("ul")?
        .class("upload-list")
        .build();

    for (name, status) in RECENT_UPLOADS {
        let item = ElementBuilder::new("li")?
            .class("upload-item")
            .child(ElementBuilder::new("span")?.class("upload-name").text(name).build())?
            .child(ElementBuilder::new("span")?.class("upload-status").text(status).build())?
            .build();
        append_child(&list, &item)?;
    }

    Ok(ElementBuilder::new("section")?
        .class("recent-uploads")
        .child(ElementBuilder::new("h3")?.text("Recent Uploads").build())?
        .child(list)?
        .build())
}
