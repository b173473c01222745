//! Per-visitor dashboard: state machine, sessions, the page controller and
//! its HTTP routes.

pub mod controller;
pub mod routes;
pub mod session;
pub mod state;

pub use controller::{BROWSE_CAP, BROWSE_FALLBACK, ChatStrategy, PageController, browse_limit};
pub use routes::router;
pub use session::{DEFAULT_SESSION_TIMEOUT, DashboardSession, SessionStore};
pub use state::{DashboardState, INTERRUPTED_ERROR, SEARCH_ERROR, Status};
