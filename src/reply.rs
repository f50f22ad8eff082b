/// A single labelled field of a rich reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyField {
    pub label: String,
    pub value: String,
    /// Render next to the previous field when the platform supports it
    pub inline: bool,
}

/// A rich (embed) reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyPayload {
    pub title: String,
    /// Accent colour as 0xRRGGBB
    pub color: u32,
    pub fields: Vec<ReplyField>,
    pub footer: Option<String>,
}

impl ReplyPayload {
    /// Create an empty payload with the given title and colour
    pub fn new<S: Into<String>>(title: S, color: u32) -> Self {
        ReplyPayload {
            title: title.into(),
            color,
            fields: Vec::new(),
            footer: None,
        }
    }

    /// Append a field, keeping insertion order
    pub fn field<L: Into<String>, V: Into<String>>(mut self, label: L, value: V, inline: bool) -> Self {
        self.fields.push(ReplyField {
            label: label.into(),
            value: value.into(),
            inline,
        });
        self
    }

    pub fn footer<S: Into<String>>(mut self, footer: S) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Look up a field value by its label
    pub fn field_value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }
}

/// What gets sent back for one command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Rich(ReplyPayload),
}

impl Reply {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Reply::Text(text.into())
    }

    /// The plain text of this reply, if it is a text reply
    #[allow(dead_code)]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Reply::Text(text) => Some(text),
            Reply::Rich(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_order() {
        let payload = ReplyPayload::new("Title", 0xFFFFFF)
            .field("a", "1", true)
            .field("b", "2", false)
            .footer("footer");

        let labels: Vec<&str> = payload.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
        assert_eq!(payload.field_value("b"), Some("2"));
        assert_eq!(payload.field_value("c"), None);
        assert_eq!(payload.footer.as_deref(), Some("footer"));
    }
}
