pub mod session_viewmodel;
pub mod query_viewmodel;

pub use session_viewmodel::SessionViewModel;
pub use query_viewmodel::QueryViewModel;
