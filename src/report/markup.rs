use std::borrow::Cow;

/// How names are escaped for the report they end up in.
///
/// The normalizer and the stub synthesizer run every name through [`Markup::escape`] at a
/// fixed point of their algorithms; the variant only decides what the step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Markup {
    /// Escape `<` and `>` as HTML entities
    #[default]
    Html,
    /// Leave text as it is
    Plain,
}

impl Markup {
    /// Escapes `text` for this markup, borrowing when nothing needs to change.
    #[must_use]
    pub fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Markup::Html if text.contains(['<', '>']) => {
                Cow::Owned(text.replace('<', "&lt;").replace('>', "&gt;"))
            }
            Markup::Html | Markup::Plain => Cow::Borrowed(text),
        }
    }
}
