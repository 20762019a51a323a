//! # HTTP
//!
//! Request and controller-result types exchanged with the host kernel,
//! plus the listeners that turn view pages into responses.

mod page;
mod renderer;
mod request;
mod status;

pub use page::{ControllerResult, ControllerResultEvent, HtmlPage, Response};
pub use renderer::HtmlPageRenderer;
pub use request::Request;
pub use status::ResponseStatusAdapter;
