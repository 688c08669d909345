use std::fmt::Write;

use crate::html::{escape, page};

/// Two-column "what / value" table
#[derive(Debug, Clone)]
pub struct DetailTable {
    pub title: String,
    pub headers: (String, String),
    pub rows: Vec<(String, String)>,
}

impl DetailTable {
    pub fn new(title: impl Into<String>, rows: Vec<(String, String)>) -> Self {
        Self {
            title: title.into(),
            headers: ("Information Types".to_string(), "Information".to_string()),
            rows,
        }
    }

    pub fn to_html(&self) -> String {
        let mut body = String::from(
            r#"<table style="border-collapse: collapse; font-size: 12px; min-width: 480px;">"#,
        );

        let _ = write!(
            body,
            r#"<thead><tr style="background: royalblue; color: white; height: 40px;"><th style="border: 1px solid darkslategray; width: 80px; text-align: left; padding: 0 8px;">{}</th><th style="border: 1px solid darkslategray; text-align: center; padding: 0 8px;">{}</th></tr></thead><tbody>"#,
            escape(&self.headers.0),
            escape(&self.headers.1)
        );

        for (label, value) in &self.rows {
            let _ = write!(
                body,
                r#"<tr style="height: 30px;"><td style="border: 1px solid darkslategray; background: paleturquoise; padding: 0 8px;">{}</td><td style="border: 1px solid darkslategray; background: white; text-align: center; padding: 0 8px;">{}</td></tr>"#,
                escape(label),
                escape(value)
            );
        }

        body.push_str("</tbody></table>");
        page(&self.title, &body)
    }
}
