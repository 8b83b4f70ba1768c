//! Small templating layer for speech markup so handlers never splice
//! raw strings. Text content is escaped; element structure is produced
//! only by these helpers.

use crate::speech::SpeechOutput;

#[derive(Debug, Default)]
pub struct Ssml {
    buf: String,
}

impl Ssml {
    pub fn new() -> Self {
        Ssml::default()
    }

    /// Escaped text content.
    pub fn text(mut self, text: &str) -> Self {
        self.buf.push_str(&escape(text));
        self
    }

    /// A paragraph wrapping the given builder's content.
    pub fn paragraph(mut self, inner: Ssml) -> Self {
        self.buf.push_str("<p>");
        self.buf.push_str(&inner.buf);
        self.buf.push_str("</p>");
        self
    }

    /// A timed pause, e.g. `pause_secs(0.5)` for half a second.
    pub fn pause_secs(mut self, seconds: f32) -> Self {
        self.buf
            .push_str(&format!("<break time='{}s'/>", seconds));
        self
    }

    /// A strength-based pause (`medium`, `strong`, ...).
    pub fn pause_strength(mut self, strength: &str) -> Self {
        self.buf
            .push_str(&format!("<break strength='{}'/>", strength));
        self
    }

    /// Read the value out digit by digit.
    pub fn digits(mut self, value: &str) -> Self {
        self.buf.push_str("<say-as interpret-as='digits'>");
        self.buf.push_str(&escape(value));
        self.buf.push_str("</say-as>");
        self
    }

    pub fn into_output(self) -> SpeechOutput {
        SpeechOutput::Ssml(self.buf)
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_paragraphs_with_pauses_and_digits() {
        let output = Ssml::new()
            .paragraph(Ssml::new().text("Ticket ").digits("42"))
            .paragraph(Ssml::new().text("Priority:").pause_secs(0.5).text("Major"))
            .into_output();
        assert_eq!(
            output,
            SpeechOutput::Ssml(
                "<p>Ticket <say-as interpret-as='digits'>42</say-as></p>\
                 <p>Priority:<break time='0.5s'/>Major</p>"
                    .to_string()
            )
        );
    }

    #[test]
    fn escapes_text_content() {
        let output = Ssml::new().text("R&D <issues>").into_output();
        assert_eq!(
            output,
            SpeechOutput::Ssml("R&amp;D &lt;issues&gt;".to_string())
        );
    }
}
