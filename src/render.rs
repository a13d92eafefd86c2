//! # Message renderer
//!
//! Turns a transcript into display blocks: user messages right-aligned, assistant
//! messages left-aligned, one entry per line of content. This is a pure function of
//! the transcript; the terminal printer ([`crate::pretty`]) and the HTML export
//! ([`render_html`]) both consume its output.

use crate::dialogue::{ChatMessage, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// One rendered message.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBlock {
    pub role: Role,
    pub align: Align,
    /// Content split on newlines; each entry is a line break in the output.
    pub lines: Vec<String>,
}

impl DisplayBlock {
    fn from_message(message: &ChatMessage) -> Self {
        let align = match message.role {
            Role::User => Align::Right,
            Role::Assistant => Align::Left,
        };
        Self {
            role: message.role,
            align,
            lines: message.content.split('\n').map(str::to_string).collect(),
        }
    }

    /// `<div class="…-wrapper"><div class="message …">line<br>line</div></div>`
    pub fn to_html(&self) -> String {
        let (wrapper, class) = match self.role {
            Role::User => ("user-message-wrapper", "user-message"),
            Role::Assistant => ("bot-message-wrapper", "bot-message"),
        };
        let body: Vec<String> = self.lines.iter().map(|line| escape_html(line)).collect();
        format!(
            r#"<div class="{wrapper}"><div class="message {class}">{}</div></div>"#,
            body.join("<br>")
        )
    }
}

/// Transcript → display blocks, in order.
pub fn render(transcript: &[ChatMessage]) -> Vec<DisplayBlock> {
    transcript.iter().map(DisplayBlock::from_message).collect()
}

/// The message list as one HTML fragment.
pub fn render_html(transcript: &[ChatMessage]) -> String {
    let mut html = String::from(r#"<div class="message-container-div">"#);
    for block in render(transcript) {
        html.push_str(&block.to_html());
    }
    html.push_str("</div>");
    html
}

/// A standalone page around [`render_html`], used by `recipes chat --html`.
pub fn render_page(title: &str, transcript: &[ChatMessage]) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
  .user-message-wrapper {{ text-align: right; }}
  .bot-message-wrapper {{ text-align: left; }}
  .message {{ display: inline-block; max-width: 80%; margin-bottom: 1rem; padding: 0.8rem 1rem; border-radius: 16px; text-align: left; }}
  .user-message {{ background-color: #dcf8c6; }}
  .bot-message {{ background-color: #ffffff; border: 1px solid #d0d0d0; }}
</style>
</head>
<body>
{}
</body>
</html>
"#,
        render_html(transcript),
        title = escape_html(title),
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alignment_follows_role() {
        let blocks = render(&[
            ChatMessage::assistant("Hello!"),
            ChatMessage::user("Check Ingredients"),
        ]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].align, Align::Left);
        assert_eq!(blocks[1].align, Align::Right);
        assert_eq!(blocks[1].lines, vec!["Check Ingredients"]);
    }

    #[test]
    fn test_newlines_become_breaks() {
        let html = render_html(&[ChatMessage::assistant("Here:\n\n- Salt\n- Pepper")]);
        assert_eq!(
            html,
            r#"<div class="message-container-div"><div class="bot-message-wrapper"><div class="message bot-message">Here:<br><br>- Salt<br>- Pepper</div></div></div>"#
        );
    }

    #[test]
    fn test_user_block_html() {
        let block = DisplayBlock::from_message(&ChatMessage::user("fish & <chips>"));
        assert_eq!(
            block.to_html(),
            r#"<div class="user-message-wrapper"><div class="message user-message">fish &amp; &lt;chips&gt;</div></div>"#
        );
    }

    #[test]
    fn test_empty_transcript() {
        assert!(render(&[]).is_empty());
        assert_eq!(
            render_html(&[]),
            r#"<div class="message-container-div"></div>"#
        );
    }

    #[test]
    fn test_page_wraps_fragment() {
        let page = render_page("Recipe Chatbot", &[ChatMessage::assistant("Hi")]);
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Recipe Chatbot</title>"));
        assert!(page.contains(r#"<div class="message bot-message">Hi</div>"#));
    }
}
