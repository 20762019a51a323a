//! # Controller Results and Responses

use super::request::Request;

/// A page a controller returned, not yet rendered
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlPage {
    pub title: String,
    pub content: String,
    status_code: u16,
}

impl HtmlPage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            content: content.into(),
            status_code: 200,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn set_status_code(&mut self, status_code: u16) {
        self.status_code = status_code;
    }
}

/// Whatever a controller produced
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerResult {
    Page(HtmlPage),
    Data(serde_json::Value),
}

impl ControllerResult {
    pub fn as_page_mut(&mut self) -> Option<&mut HtmlPage> {
        match self {
            ControllerResult::Page(page) => Some(page),
            ControllerResult::Data(_) => None,
        }
    }
}

/// A response ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

/// Raised after a controller returned something other than a response
#[derive(Debug)]
pub struct ControllerResultEvent {
    request: Request,
    result: ControllerResult,
    response: Option<Response>,
}

impl ControllerResultEvent {
    pub fn new(request: Request, result: ControllerResult) -> Self {
        Self {
            request,
            result,
            response: None,
        }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn result(&self) -> &ControllerResult {
        &self.result
    }

    /// Request and mutable result together
    pub fn parts_mut(&mut self) -> (&Request, &mut ControllerResult) {
        (&self.request, &mut self.result)
    }

    pub fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    pub fn set_response(&mut self, response: Response) {
        self.response = Some(response);
    }

    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }
}
