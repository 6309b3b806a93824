use std::borrow::Cow;

use colored::Colorize;
use color::Color;
use serde::{Deserialize, Serialize};
use style::Style;

pub mod color;
pub mod legacy;
pub mod markup;
pub mod style;

/// Represents a Text component
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TextComponent(pub TextComponentBase);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct TextComponentBase {
    /// The actual text
    pub text: Cow<'static, str>,
    /// Style of the text. Bold, Italic, underline, Color...
    #[serde(flatten)]
    pub style: Style,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Extra text components
    pub extra: Vec<TextComponentBase>,
}

impl TextComponentBase {
    fn collect_runs<'a>(&'a self, parent: &Style, runs: &mut Vec<(&'a str, Style)>) {
        let style = self.style.inherit(parent);
        if !self.text.is_empty() {
            runs.push((&*self.text, style.clone()));
        }
        for child in &self.extra {
            child.collect_runs(&style, runs);
        }
    }

    fn collect_plain(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.extra {
            child.collect_plain(out);
        }
    }
}

impl TextComponent {
    pub fn text<P>(plain: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self(TextComponentBase {
            text: plain.into(),
            style: Style::default(),
            extra: vec![],
        })
    }

    /// An empty root that only groups its children.
    pub fn empty() -> Self {
        Self::text("")
    }

    pub fn styled<P>(plain: P, style: Style) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self(TextComponentBase {
            text: plain.into(),
            style,
            extra: vec![],
        })
    }

    pub fn add_child(mut self, child: TextComponent) -> Self {
        self.0.extra.push(child.0);
        self
    }

    pub fn add_text<P>(mut self, text: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        self.0.extra.push(TextComponentBase {
            text: text.into(),
            style: Style::default(),
            extra: vec![],
        });
        self
    }

    /// The text of the whole tree without any styling.
    pub fn get_text(&self) -> String {
        let mut out = String::new();
        self.0.collect_plain(&mut out);
        out
    }

    /// Flattens the tree into non-empty text runs with their effective style.
    pub fn runs(&self) -> Vec<(&str, Style)> {
        let mut runs = Vec::new();
        self.0.collect_runs(&Style::default(), &mut runs);
        runs
    }

    pub fn to_pretty_console(&self) -> String {
        let mut out = String::new();
        for (run, style) in self.runs() {
            let mut text = run.to_string();
            if let Some(color) = style.color {
                text = color.console_color(&text).to_string();
            }
            if style.bold == Some(true) {
                text = text.bold().to_string();
            }
            if style.italic == Some(true) {
                text = text.italic().to_string();
            }
            if style.underlined == Some(true) {
                text = text.underline().to_string();
            }
            if style.strikethrough == Some(true) {
                text = text.strikethrough().to_string();
            }
            out.push_str(&text);
        }
        out
    }

    pub fn color_named(mut self, color: color::NamedColor) -> Self {
        self.0.style.color = Some(Color::Named(color));
        self
    }

    pub fn color_rgb(mut self, color: color::RGBColor) -> Self {
        self.0.style.color = Some(Color::Rgb(color));
        self
    }

    /// Makes the text bold
    pub fn bold(mut self) -> Self {
        self.0.style.bold = Some(true);
        self
    }

    /// Makes the text italic
    pub fn italic(mut self) -> Self {
        self.0.style.italic = Some(true);
        self
    }

    /// Makes the text underlined
    pub fn underlined(mut self) -> Self {
        self.0.style.underlined = Some(true);
        self
    }

    /// Makes the text strikethrough
    pub fn strikethrough(mut self) -> Self {
        self.0.style.strikethrough = Some(true);
        self
    }

    /// Makes the text obfuscated
    pub fn obfuscated(mut self) -> Self {
        self.0.style.obfuscated = Some(true);
        self
    }
}

#[cfg(test)]
mod test {
    use crate::text::{color::NamedColor, TextComponent};

    #[test]
    fn test_serialize_text_component() {
        let msg_comp = TextComponent::text("Plot ")
            .color_named(NamedColor::Yellow)
            .add_child(TextComponent::text("menu").bold());

        let json = serde_json::to_string(&msg_comp.0).unwrap();
        assert_eq!(
            json,
            r#"{"text":"Plot ","color":"yellow","extra":[{"text":"menu","bold":true}]}"#
        );
    }

    #[test]
    fn runs_inherit_parent_style() {
        let component = TextComponent::text("a")
            .color_named(NamedColor::Red)
            .add_child(TextComponent::text("b").italic())
            .add_text("");

        let runs = component.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].0, "b");
        assert_eq!(runs[1].1.italic, Some(true));
        assert_eq!(
            runs[1].1.color,
            Some(crate::text::color::Color::Named(NamedColor::Red))
        );
        assert_eq!(component.get_text(), "ab");
    }
}
