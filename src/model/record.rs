//! Audit records sent to the staff log channel.

use chrono::{DateTime, Utc};

/// A structured notice for the log channel, rendered as a Discord embed.
///
/// Records are built per event, sent once and dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRecord {
    /// Text of the embed author line.
    pub author: String,
    /// Icon shown next to the author line.
    pub author_icon: Option<String>,
    pub description: Option<String>,
    pub color: u32,
    pub fields: Vec<RecordField>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl AuditRecord {
    pub fn new(author: impl Into<String>, color: u32) -> Self {
        Self {
            author: author.into(),
            author_icon: None,
            description: None,
            color,
            fields: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn icon(mut self, url: impl Into<String>) -> Self {
        self.author_icon = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        inline: bool,
    ) -> Self {
        self.fields.push(RecordField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    /// Looks up a field value by name.
    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}
