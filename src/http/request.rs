//! # Requests

use std::collections::BTreeMap;

use serde_json::Value;

/// An incoming request with routing attributes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub path: String,
    attributes: BTreeMap<String, Value>,
}

impl Request {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_attribute(key, value);
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes() {
        let mut request = Request::new("/frontpage").with_attribute("view_id", "frontpage");
        request.set_attribute("_http_statuscode", 403);

        assert!(request.has_attribute("view_id"));
        assert!(!request.has_attribute("display_id"));
        assert_eq!(request.attribute("_http_statuscode"), Some(&Value::from(403)));
    }
}
