//! Article-generation prompt rendering.
//!
//! A prompt is a fixed instruction template with five named slots (`title`,
//! `keyword`, `category`, `slug`, `search_volume`) filled from one topic. The
//! rendered text is handed to an external generation agent; nothing here
//! talks to that agent.

use crate::catalog::Topic;
use anyhow::Context as _;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};
use thiserror::Error;

/// Blog page whose structure generated articles should follow.
pub const TEMPLATE_REFERENCE: &str = "app/blog/dividend-stocks-vs-etfs-complete-guide/page.tsx";

const DEFAULT_ARTICLE_TEMPLATE: &str = r#"
Create a comprehensive, SEO-optimized blog article for a dividend investing calculator website.

ARTICLE DETAILS:
- Title: {{ title }}
- Target Keyword: {{ keyword }}
- Category: {{ category }}
- Search Volume: {{ search_volume }}/month
- URL Slug: {{ slug }}

REQUIREMENTS:
1. **Length**: 2,500-4,000 words (comprehensive, helpful)
2. **Structure**: Next.js TypeScript React component (see template below)
3. **SEO**: Optimize for target keyword naturally (2-3% density)
4. **User Value**: Answer all common questions, provide actionable advice
5. **Conversions**: Include calculator CTAs, broker recommendations
6. **E-A-T**: Demonstrate expertise, cite sources, show authority

MUST INCLUDE:
- Hero section with value proposition
- Table of contents (8-12 sections)
- Quick answer/TL;DR box
- Pros/cons lists where relevant
- Data tables/comparisons
- Real examples with numbers
- FAQ section (5-8 questions)
- Calculator integration CTAs
- Broker comparison table
- Related articles links
- Proper metadata (title, description, keywords, OpenGraph)

TONE:
- Helpful, expert, trustworthy
- Conversational but professional
- Data-driven, not promotional
- Focus on user value, not affiliate pushing

TEMPLATE:
Follow the structure from: {{ template_reference }}

OUTPUT:
Return ONLY the complete Next.js page.tsx file content.
No explanations, no markdown wrappers, just the TypeScript code.
"#;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("topic is missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("topic field '{field}' is invalid: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("prompt template rendering failed: {0}")]
    Render(#[from] tera::Error),
}

/// Values interpolated into a prompt template.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PromptSlots {
    pub title: String,
    pub keyword: String,
    pub category: String,
    pub slug: String,
    pub search_volume: u64,
}

impl PromptSlots {
    /// Slots from a typed topic. Blank strings count as missing.
    pub fn from_topic(topic: &Topic) -> Result<Self, PromptError> {
        Ok(Self {
            title: required_text("title", &topic.title)?,
            keyword: required_text("keyword", &topic.keyword)?,
            category: required_text("category", topic.category.as_str())?,
            slug: required_text("slug", topic.slug.as_str())?,
            search_volume: topic.search_volume,
        })
    }

    /// Slots from an untyped topic record, as an agent might hand over.
    pub fn from_record(record: &Value) -> Result<Self, PromptError> {
        let text = |field: &'static str| -> Result<String, PromptError> {
            match record.get(field) {
                None | Some(Value::Null) => Err(PromptError::MissingField { field }),
                Some(Value::String(value)) => required_text(field, value),
                Some(other) => Err(PromptError::InvalidField {
                    field,
                    reason: format!("expected a string, got {other}"),
                }),
            }
        };

        let title = text("title")?;
        let keyword = text("keyword")?;
        let category = text("category")?;
        let slug = text("slug")?;
        let search_volume = match record.get("search_volume") {
            None | Some(Value::Null) => {
                return Err(PromptError::MissingField {
                    field: "search_volume",
                });
            }
            Some(value) => value.as_u64().ok_or_else(|| PromptError::InvalidField {
                field: "search_volume",
                reason: format!("expected a non-negative integer, got {value}"),
            })?,
        };

        Ok(Self {
            title,
            keyword,
            category,
            slug,
            search_volume,
        })
    }

    fn to_context(&self) -> Context {
        let mut context = Context::new();
        context.insert("title", &self.title);
        context.insert("keyword", &self.keyword);
        context.insert("category", &self.category);
        context.insert("slug", &self.slug);
        context.insert("search_volume", &format_thousands(self.search_volume.into()));
        context.insert("template_reference", TEMPLATE_REFERENCE);
        context
    }
}

fn required_text(field: &'static str, value: &str) -> Result<String, PromptError> {
    if value.trim().is_empty() {
        return Err(PromptError::MissingField { field });
    }
    Ok(value.to_string())
}

/// Prompt text with named `{{ slot }}` placeholders, rendered with Tera.
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    source: String,
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_ARTICLE_TEMPLATE)
    }
}

impl PromptTemplate {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Read a replacement template from disk.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("reading prompt template {}", path.display()))?;
        Ok(Self::new(source))
    }

    pub fn render(&self, slots: &PromptSlots) -> Result<String, PromptError> {
        Ok(Tera::one_off(&self.source, &slots.to_context(), false)?)
    }

    pub fn render_topic(&self, topic: &Topic) -> Result<String, PromptError> {
        self.render(&PromptSlots::from_topic(topic)?)
    }
}

/// Render the default article prompt for one topic.
pub fn build_article_prompt(topic: &Topic) -> Result<String, PromptError> {
    PromptTemplate::default().render_topic(topic)
}

/// Format an integer with comma thousands separators (49500 -> "49,500").
pub fn format_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
