use crate::domain::models::{AVAILABLE_MODELS, Transcript};

use super::script::CHAT_SCRIPT;
use super::styles::PAGE_STYLES;

const PAGE_TITLE: &str = "Groq Web Chat";

/// Tab shown when the page loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Chat,
    ImageAnalysis,
}

impl Tab {
    fn element_id(&self) -> &'static str {
        match self {
            Tab::Chat => "chatTab",
            Tab::ImageAnalysis => "imageTab",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Tab::Chat => "Chatbot",
            Tab::ImageAnalysis => "Image Analysis",
        }
    }
}

/// Everything the page needs for one render
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub transcript: &'a Transcript,
    pub image_analysis: Option<&'a str>,
    pub active_tab: Tab,
}

impl<'a> PageView<'a> {
    pub fn chat(transcript: &'a Transcript) -> Self {
        Self {
            transcript,
            image_analysis: None,
            active_tab: Tab::Chat,
        }
    }

    pub fn with_analysis(transcript: &'a Transcript, analysis: &'a str) -> Self {
        Self {
            transcript,
            image_analysis: Some(analysis),
            active_tab: Tab::ImageAnalysis,
        }
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", PAGE_TITLE));
    html.push_str(&format!("<style>{}</style>\n", PAGE_STYLES));
    html.push_str("</head>\n<body>\n<div class=\"container\">\n");
    html.push_str(&format!("<h1>{}</h1>\n", PAGE_TITLE));

    html.push_str("<div class=\"tabs\">\n");
    for tab in [Tab::Chat, Tab::ImageAnalysis] {
        html.push_str(&format!(
            "<button class=\"tab{}\" onclick=\"openTab(event, '{}')\">{}</button>\n",
            active_class(view.active_tab == tab),
            tab.element_id(),
            tab.label()
        ));
    }
    html.push_str("</div>\n");

    render_chat_tab(&mut html, view);
    render_image_tab(&mut html, view);

    html.push_str("</div>\n");
    html.push_str(&format!("<script>{}</script>\n", CHAT_SCRIPT));
    html.push_str("</body>\n</html>\n");
    html
}

fn active_class(active: bool) -> &'static str {
    if active { " active" } else { "" }
}

fn render_chat_tab(html: &mut String, view: &PageView<'_>) {
    html.push_str(&format!(
        "<div id=\"{}\" class=\"tab-content{}\">\n",
        Tab::Chat.element_id(),
        active_class(view.active_tab == Tab::Chat)
    ));

    html.push_str("<div id=\"chat-container\">\n");
    for turn in view.transcript {
        html.push_str(&format!(
            "<div class=\"{}\"><strong>{}:</strong><span class=\"content\"> {}</span></div>\n",
            turn.role.css_class(),
            turn.role.display_name(),
            escape_html(&turn.content)
        ));
    }
    html.push_str("</div>\n");

    html.push_str("<form id=\"chat-form\" onsubmit=\"sendMessage(event)\">\n");
    html.push_str("<select id=\"model-select\" name=\"model\">\n");
    for model in AVAILABLE_MODELS {
        html.push_str(&format!(
            "<option value=\"{}\">{}</option>\n",
            escape_html(model.id),
            escape_html(model.display_name)
        ));
    }
    html.push_str("</select>\n");
    html.push_str(
        "<input type=\"text\" id=\"user-input\" name=\"message\" placeholder=\"Type your message here...\" required>\n",
    );
    html.push_str("<input type=\"submit\" id=\"send-button\" value=\"Send\">\n");
    html.push_str("</form>\n</div>\n");
}

fn render_image_tab(html: &mut String, view: &PageView<'_>) {
    html.push_str(&format!(
        "<div id=\"{}\" class=\"tab-content{}\">\n",
        Tab::ImageAnalysis.element_id(),
        active_class(view.active_tab == Tab::ImageAnalysis)
    ));
    html.push_str("<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n");
    html.push_str("<input type=\"file\" name=\"image\" accept=\"image/*\" required>\n");
    html.push_str(
        "<input type=\"text\" name=\"image_prompt\" placeholder=\"Enter prompt for image analysis\" required>\n",
    );
    html.push_str("<input type=\"submit\" value=\"Analyze Image\">\n");
    html.push_str("</form>\n");

    if let Some(analysis) = view.image_analysis.filter(|a| !a.is_empty()) {
        html.push_str("<div class=\"image-analysis\">\n<h3>Image Analysis Result:</h3>\n");
        html.push_str(&format!("<p>{}</p>\n</div>\n", escape_html(analysis)));
    }
    html.push_str("</div>\n");
}
