// ============================================================================
// MAIN APP VIEW - Caja de preguntas + resultados
// ============================================================================

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::{append_child, create_element, on_click, on_input, on_submit, set_class_name, toggle_attribute, ElementBuilder};
use crate::models::QueryResult;
use crate::state::ResultArea;
use crate::utils::NOTICE_TIMEOUT_MS;
use crate::views::header::render_header;

pub fn render_main_app(ctx: &AppContext) -> Result<Element, JsValue> {
    let query = ctx.state.query.snapshot();
    let initials = ctx
        .state
        .session
        .get_session()
        .map(|s| s.initials())
        .unwrap_or_else(|| "U".to_string());

    let container = ElementBuilder::new("div")?
        .class("main-app")
        .build();

    // Header: Admin Panel | Logout | avatar
    let header = {
        let to_admin = ctx.session_vm.clone();
        render_header(
            ctx,
            ElementBuilder::new("img")?
                .class("header-logo")
                .attr("src", "/clarify-logo-v3.png")?
                .attr("alt", "Clarify")?
                .build(),
            ("Admin Panel", Box::new(move || to_admin.switch_to_admin())),
            Some(&initials),
        )?
    };
    append_child(&container, &header)?;

    let main = ElementBuilder::new("main")?
        .class("main-content")
        .build();

    // Búsqueda
    let search = ElementBuilder::new("div")?
        .class("search")
        .child(ElementBuilder::new("h1")?.text("Scientific Answers, Simplified.").build())?
        .build();

    let form = create_element("form")?;
    set_class_name(&form, "search-form");

    let input = ElementBuilder::new("input")?
        .attr("type", "text")?
        .attr("placeholder", "Ask a question about our protocols...")?
        .attr("value", &query.input_text)?
        .flag("disabled", query.busy)?
        .build();

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class(if query.busy { "btn-search busy" } else { "btn-search" })
        .attr("aria-label", "Search")?
        .flag("disabled", !query.can_submit())?
        .build();
    if query.busy {
        append_child(&submit_btn, &ElementBuilder::new("span")?.class("spinner").build())?;
    } else {
        append_child(&submit_btn, &ElementBuilder::new("span")?.class("icon-search").build())?;
    }

    {
        // Sin re-render al teclear: solo se actualiza el estado y el botón
        let vm = ctx.query_vm.clone();
        let button = submit_btn.clone();
        on_input(&input, move |value| {
            let blank = value.trim().is_empty();
            vm.set_input(value);
            if let Err(e) = toggle_attribute(&button, "disabled", blank) {
                log::warn!("⚠️ [QUERY] No se pudo actualizar el botón de envío: {:?}", e);
            }
        })?;
    }
    {
        let vm = ctx.query_vm.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            spawn_local(async move {
                vm.submit_current().await;
            });
        })?;
    }

    append_child(&form, &input)?;
    append_child(&form, &submit_btn)?;
    append_child(&search, &form)?;

    if let Some(error) = &query.last_error {
        let error_box = ElementBuilder::new("div")?
            .class("error-box")
            .attr("role", "alert")?
            .text(error)
            .build();
        append_child(&search, &error_box)?;
    }
    append_child(&main, &search)?;

    match query.result_area() {
        ResultArea::Answer(result) => append_child(&main, &render_results(ctx, result)?)?,
        ResultArea::EmptyPrompt => {
            let empty = ElementBuilder::new("div")?
                .class("empty-state")
                .child(ElementBuilder::new("p")?.text("Ask a question to get started").build())?
                .build();
            append_child(&main, &empty)?;
        }
        ResultArea::Pending => {}
    }

    if let Some(notice) = &query.notice {
        let toast = ElementBuilder::new("div")?
            .class("toast")
            .attr("role", "status")?
            .text(notice)
            .build();
        append_child(&main, &toast)?;
    }

    append_child(&container, &main)?;
    Ok(container)
}

/// Resumen de cumplimiento y respuesta al cliente, lado a lado
fn render_results(ctx: &AppContext, result: &QueryResult) -> Result<Element, JsValue> {
    let grid = ElementBuilder::new("div")?
        .class("results-grid")
        .build();

    let summary = ElementBuilder::new("section")?
        .class("result-card compliance")
        .child(ElementBuilder::new("h3")?.text("Compliance Summary").build())?
        .child(
            ElementBuilder::new("div")?
                .class("result-body")
                .text(&result.compliance_summary)
                .build(),
        )?
        .build();

    let copy_btn = ElementBuilder::new("button")?
        .attr("type", "button")?
        .class("btn-copy")
        .text("Copy to Clipboard")
        .build();
    {
        let vm = ctx.query_vm.clone();
        on_click(&copy_btn, move |_| {
            let vm = vm.clone();
            spawn_local(async move {
                vm.copy_answer_to_clipboard().await;
                TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
                vm.clear_notice();
            });
        })?;
    }

    let answer = ElementBuilder::new("section")?
        .class("result-card customer")
        .child(ElementBuilder::new("h3")?.text("Customer Script").build())?
        .child(
            ElementBuilder::new("div")?
                .class("result-body")
                .text(&result.customer_answer)
                .build(),
        )?
        .child(copy_btn)?
        .build();

    append_child(&grid, &summary)?;
    append_child(&grid, &answer)?;
    Ok(grid)
}
