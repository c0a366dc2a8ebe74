// ============================================================================
// LOGIN VIEW
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use crate::app::AppContext;
use crate::dom::{append_child, create_element, on_input, on_submit, set_class_name, ElementBuilder};

/// Renderizar vista de login
pub fn render_login(ctx: &AppContext) -> Result<Element, JsValue> {
    log::debug!("🎬 [LOGIN] render_login()");

    let auth = &ctx.state.auth;
    let busy = auth.is_busy();

    let login_screen = ElementBuilder::new("div")?
        .class("login-screen")
        .build();

    // Lado izquierdo: marca
    let brand = ElementBuilder::new("div")?
        .class("login-brand")
        .child(
            ElementBuilder::new("img")?
                .class("login-logo")
                .attr("src", "/clarify-logo-v3.png")?
                .attr("alt", "Clarify by CryoCord")?
                .build(),
        )?
        .child(
            ElementBuilder::new("h1")?
                .text("Clear answers, clarity, for every customer.")
                .build(),
        )?
        .build();

    // Lado derecho: formulario
    let panel = ElementBuilder::new("div")?
        .class("login-panel")
        .child(ElementBuilder::new("h2")?.text("Sign in to your account").build())?
        .child(
            ElementBuilder::new("p")?
                .class("login-subtitle")
                .text("Enter your credentials to access the secure portal")
                .build(),
        )?
        .build();

    if let Some(error) = auth.get_error() {
        let error_box = ElementBuilder::new("div")?
            .class("error-box")
            .attr("role", "alert")?
            .text(&error)
            .build();
        append_child(&panel, &error_box)?;
    }

    let form = create_element("form")?;
    set_class_name(&form, "login-form");

    // Email
    let email_input = ElementBuilder::new("input")?
        .id("email")?
        .attr("type", "email")?
        .attr("placeholder", "name@cryocord.com")?
        .attr("value", &auth.get_email())?
        .flag("required", true)?
        .flag("disabled", busy)?
        .build();
    {
        let auth = auth.clone();
        on_input(&email_input, move |value| auth.set_email(value))?;
    }
    append_child(&form, &form_group("email", "Email Address", email_input)?)?;

    // Password
    let password_input = ElementBuilder::new("input")?
        .id("password")?
        .attr("type", "password")?
        .flag("required", true)?
        .flag("disabled", busy)?
        .build();
    {
        let auth = auth.clone();
        on_input(&password_input, move |value| auth.set_password(value))?;
    }
    append_child(&form, &form_group("password", "Password", password_input)?)?;

    let submit_btn = ElementBuilder::new("button")?
        .attr("type", "submit")?
        .class("btn-login")
        .text(if busy { "Signing in..." } else { "Secure Login" })
        .flag("disabled", busy)?
        .build();
    append_child(&form, &submit_btn)?;

    {
        let vm = ctx.session_vm.clone();
        on_submit(&form, move || {
            let vm = vm.clone();
            spawn_local(async move {
                vm.submit_login().await;
            });
        })?;
    }

    append_child(&panel, &form)?;
    append_child(&login_screen, &brand)?;
    append_child(&login_screen, &panel)?;

    Ok(login_screen)
}

fn form_group(id: &str, label: &str, input: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("div")?
        .class("form-group")
        .child(
            ElementBuilder::new("label")?
                .attr("for", id)?
                .text(label)
                .build(),
        )?
        .child(input)?
        .build())
}
