// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod reactivity;
pub mod session_state;
pub mod auth_state;
pub mod query_state;
pub mod app_state;

pub use reactivity::*;
pub use session_state::*;
pub use auth_state::*;
pub use query_state::*;
pub use app_state::*;
