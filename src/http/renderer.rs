//! # Page Renderer
//!
//! Turns an [`HtmlPage`](super::HtmlPage) result into a [`Response`] at the
//! default priority, after higher-priority listeners adjusted the page.

use super::page::{ControllerResult, ControllerResultEvent, Response};
use crate::events::{EventName, EventSubscriber, Subscription};

/// Renders page results into responses
#[derive(Debug, Clone, Default)]
pub struct HtmlPageRenderer;

impl HtmlPageRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl EventSubscriber for HtmlPageRenderer {
    fn name(&self) -> &str {
        "html_page_renderer"
    }

    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![Subscription::default_priority(EventName::ControllerResult)]
    }

    fn on_controller_result(&mut self, event: &mut ControllerResultEvent) {
        if event.has_response() {
            return;
        }
        let response = match event.result() {
            ControllerResult::Page(page) => Response {
                status_code: page.status_code(),
                body: page.content.clone(),
            },
            ControllerResult::Data(_) => return,
        };
        event.set_response(response);
    }
}
