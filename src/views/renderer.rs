// Template rendering

use std::collections::HashMap;

use tera::{Context, Tera, Value};

use crate::validation::sanitize;
use crate::views::model::ViewModel;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
}

/// Turns a view name and its model into HTML
pub trait Renderer: Send + Sync {
    fn render(&self, view: &str, model: &ViewModel) -> Result<String, RenderError>;
}

/// Tera-backed renderer; views map to `<dir>/<view>.html`
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Load and parse every template under `dir` once
    pub fn from_dir(dir: &str) -> Result<Self, RenderError> {
        let tera = Tera::new(&format!("{}/**/*.html", dir.trim_end_matches('/')))?;
        tracing::info!("Loaded {} templates from {}", tera.get_template_names().count(), dir);
        Ok(Self::from_tera(tera))
    }

    pub fn from_tera(mut tera: Tera) -> Self {
        tera.register_filter("sanitized", sanitized_filter);
        Self { tera }
    }
}

/// `{{ value | sanitized | safe }}`: prints stored or submitted user text.
///
/// Values were entity-escaped when sanitized, so Tera's autoescape would
/// escape them a second time; this filter only neutralizes raw markup.
fn sanitized_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    match value {
        Value::String(text) => Ok(Value::String(sanitize::escape_markup(text))),
        Value::Null => Ok(Value::String(String::new())),
        other => Ok(Value::String(sanitize::escape_markup(&other.to_string()))),
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, view: &str, model: &ViewModel) -> Result<String, RenderError> {
        let context = Context::from_serialize(model)?;
        Ok(self.tera.render(&format!("{}.html", view), &context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::model::NavLink;

    #[test]
    fn test_renders_title_and_nav() {
        let mut tera = Tera::default();
        tera.add_raw_template(
            "account/login.html",
            "<h1>{{ title }}</h1>{% for link in nav %}<a href=\"{{ link.href }}\">{{ link.label }}</a>{% endfor %}",
        )
        .unwrap();
        let renderer = TeraRenderer::from_tera(tera);
        let model = ViewModel::new(
            "Login",
            vec![NavLink {
                href: "/".to_string(),
                label: "Home".to_string(),
                title: "Home page".to_string(),
            }],
        );
        let html = renderer.render("account/login", &model).unwrap();
        assert_eq!(html, "<h1>Login</h1><a href=\"/\">Home</a>");
    }

    #[test]
    fn test_sanitized_filter_prints_entities_once() {
        let mut tera = Tera::default();
        tera.add_raw_template(
            "account/login.html",
            "<h1>{{ title | sanitized | safe }}</h1><input value=\"{{ values.account_id | sanitized | safe }}\">",
        )
        .unwrap();
        let renderer = TeraRenderer::from_tera(tera);
        let model = ViewModel::new("O&#x27;Brien", Vec::new())
            .with_value("account_id", "\"><script>alert(1)</script>");
        let html = renderer.render("account/login", &model).unwrap();
        assert!(html.contains("<h1>O&#x27;Brien</h1>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_view_is_error() {
        let renderer = TeraRenderer::from_tera(Tera::default());
        let model = ViewModel::new("Missing", Vec::new());
        assert!(renderer.render("nope", &model).is_err());
    }

    #[test]
    fn test_shipped_templates_render() {
        let renderer = TeraRenderer::from_dir("templates").unwrap();
        let vehicle = serde_json::json!({
            "heading": "2019 Jeep Wrangler",
            "image": "/images/vehicles/no-image.png",
            "price": "$28,045.00",
            "miles": "41,205",
            "description": "Fun",
            "color": "Yellow"
        });
        let model = ViewModel::new("Page", NavLink::from_classifications(&[]))
            .with_notice("Saved")
            .with_value("inv_make", "Jeep")
            .with_data("message", "Oops")
            .with_data("vehicle", vehicle)
            .with_data("vehicles", Vec::<String>::new())
            .with_data("employees", Vec::<String>::new())
            .with_data(
                "classifications",
                serde_json::json!([{"classification_id": 1, "classification_name": "SUV"}]),
            );

        for view in [
            "index",
            "errors/error",
            "account/login",
            "account/register",
            "account/account-management",
            "account/update-account",
            "account/employee-management",
            "account/delete-account",
            "inventory/classification",
            "inventory/vehicle",
            "inventory/management",
            "inventory/add-classification",
            "inventory/add-inventory",
            "inventory/edit-inventory",
            "inventory/delete-confirm",
        ] {
            let html = renderer
                .render(view, &model)
                .unwrap_or_else(|e| panic!("{} failed: {:?}", view, e));
            assert!(html.contains("Saved"), "{}", view);
        }
    }
}
