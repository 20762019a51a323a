//! # Response Status Adapter
//!
//! View areas may ask for a specific HTTP status (403, 404, ...) by setting
//! a request attribute while the view runs. This listener copies it onto
//! the page before the page is rendered into a response.

use super::page::ControllerResultEvent;
use crate::config::RoutingConfig;
use crate::events::{EventName, EventSubscriber, Subscription};
use crate::observability::{trace_event, Event};

/// Copies the requested status code onto view pages
#[derive(Debug, Clone)]
pub struct ResponseStatusAdapter {
    view_id_attribute: String,
    status_code_attribute: String,
    default_status_code: u16,
    priority: i32,
}

impl ResponseStatusAdapter {
    pub fn new(config: &RoutingConfig) -> Self {
        Self {
            view_id_attribute: config.view_id_attribute.clone(),
            status_code_attribute: config.status_code_attribute.clone(),
            default_status_code: config.default_status_code,
            priority: config.status_listener_priority,
        }
    }

    /// Apply the status code if the result is a view page
    pub fn apply(&self, event: &mut ControllerResultEvent) {
        let (request, result) = event.parts_mut();
        let Some(page) = result.as_page_mut() else {
            return;
        };
        if !request.has_attribute(&self.view_id_attribute) {
            return;
        }

        let status = request
            .attribute(&self.status_code_attribute)
            .and_then(|value| value.as_u64())
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(self.default_status_code);
        page.set_status_code(status);

        let status = status.to_string();
        trace_event(
            Event::StatusApplied,
            &[("path", request.path.as_str()), ("status", status.as_str())],
        );
    }
}

impl Default for ResponseStatusAdapter {
    fn default() -> Self {
        Self::new(&RoutingConfig::default())
    }
}

impl EventSubscriber for ResponseStatusAdapter {
    fn name(&self) -> &str {
        "response_status_adapter"
    }

    fn subscribed_events(&self) -> Vec<Subscription> {
        vec![Subscription::new(EventName::ControllerResult, self.priority)]
    }

    fn on_controller_result(&mut self, event: &mut ControllerResultEvent) {
        self.apply(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{ControllerResult, HtmlPage, Request};
    use serde_json::json;

    fn page_event(request: Request) -> ControllerResultEvent {
        ControllerResultEvent::new(request, ControllerResult::Page(HtmlPage::new("body")))
    }

    fn status_of(event: &ControllerResultEvent) -> u16 {
        match event.result() {
            ControllerResult::Page(page) => page.status_code(),
            ControllerResult::Data(_) => panic!("expected a page"),
        }
    }

    #[test]
    fn test_applies_status_for_view_page() {
        let request = Request::new("/frontpage")
            .with_attribute("view_id", "frontpage")
            .with_attribute("_http_statuscode", 403);
        let mut event = page_event(request);

        ResponseStatusAdapter::default().apply(&mut event);
        assert_eq!(status_of(&event), 403);
    }

    #[test]
    fn test_defaults_to_ok_without_status_attribute() {
        let request = Request::new("/frontpage").with_attribute("view_id", "frontpage");
        let mut event = ControllerResultEvent::new(request, ControllerResult::Page({
            let mut page = HtmlPage::new("body");
            page.set_status_code(500);
            page
        }));

        ResponseStatusAdapter::default().apply(&mut event);
        assert_eq!(status_of(&event), 200);
    }

    #[test]
    fn test_untouched_without_view_id() {
        let request = Request::new("/user").with_attribute("_http_statuscode", 403);
        let mut event = page_event(request);

        ResponseStatusAdapter::default().apply(&mut event);
        assert_eq!(status_of(&event), 200);
    }

    #[test]
    fn test_ignores_non_page_results() {
        let request = Request::new("/api")
            .with_attribute("view_id", "frontpage")
            .with_attribute("_http_statuscode", 403);
        let mut event = ControllerResultEvent::new(request, ControllerResult::Data(json!([])));

        ResponseStatusAdapter::default().apply(&mut event);
        assert_eq!(event.result(), &ControllerResult::Data(json!([])));
    }

    #[test]
    fn test_subscribes_at_configured_priority() {
        let adapter = ResponseStatusAdapter::default();
        assert_eq!(
            adapter.subscribed_events(),
            vec![Subscription::new(EventName::ControllerResult, 75)]
        );
    }
}
