pub mod app;
pub mod header;
pub mod loading;
pub mod login;
pub mod main_app;
pub mod admin_panel;

pub use app::render_app;
pub use loading::render_loading;
pub use login::render_login;
pub use main_app::render_main_app;
pub use admin_panel::render_admin_panel;
