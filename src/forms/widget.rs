use std::collections::BTreeMap;

pub const JSON_WIDGET_TEMPLATE: &str = "admin/jsonwidget.html";

/// Text-area widget that renders JSON and carries a schema for client-side hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonWidget {
    attrs: BTreeMap<String, String>,
}

impl JsonWidget {
    /// Creates the widget with `cols="40"` and `rows="20"`; caller attrs win.
    pub fn new(attrs: Option<BTreeMap<String, String>>) -> Self {
        let mut defaults = BTreeMap::from([
            ("cols".to_string(), "40".to_string()),
            ("rows".to_string(), "20".to_string()),
        ]);
        if let Some(attrs) = attrs {
            defaults.extend(attrs);
        }
        Self { attrs: defaults }
    }

    pub fn template_name(&self) -> &'static str {
        JSON_WIDGET_TEMPLATE
    }

    pub fn is_hidden(&self) -> bool {
        false
    }

    pub fn attrs(&self) -> &BTreeMap<String, String> {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Attributes for one render: the widget's own, overridden by `extra`.
    pub fn build_attrs(&self, extra: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        let mut attrs = self.attrs.clone();
        attrs.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        attrs
    }

    /// The schema carried in the `schema` attribute, if it parses.
    pub fn schema(&self) -> Option<serde_json::Value> {
        self.attr("schema")
            .and_then(|text| serde_json::from_str(text).ok())
    }
}

impl Default for JsonWidget {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sizing() {
        let widget = JsonWidget::default();
        assert_eq!(widget.attr("cols"), Some("40"));
        assert_eq!(widget.attr("rows"), Some("20"));
        assert_eq!(widget.template_name(), "admin/jsonwidget.html");
        assert!(!widget.is_hidden());
    }

    #[test]
    fn caller_attrs_override_defaults() {
        let widget = JsonWidget::new(Some(BTreeMap::from([
            ("rows".to_string(), "5".to_string()),
            ("class".to_string(), "code".to_string()),
        ])));
        assert_eq!(widget.attr("rows"), Some("5"));
        assert_eq!(widget.attr("cols"), Some("40"));
        assert_eq!(widget.attr("class"), Some("code"));
    }

    #[test]
    fn build_attrs_merges_render_time_attrs() {
        let widget = JsonWidget::default();
        let attrs = widget.build_attrs(&BTreeMap::from([("id".to_string(), "id_car".to_string())]));
        assert_eq!(attrs.get("id").map(String::as_str), Some("id_car"));
        assert_eq!(attrs.get("cols").map(String::as_str), Some("40"));
        assert!(widget.attr("id").is_none());
    }
}
