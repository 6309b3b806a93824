//! Parser for the tag based markup used in plot menus, e.g.
//! `<red>Plot <bold>#12</bold></red>`.
//!
//! Tags that cannot be resolved are kept as literal text, so a stray `<` or an
//! unknown tag never makes parsing fail.

use super::{
    color::Color,
    style::{Decoration, Style},
    TextComponent,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum TagKind {
    Color(Color),
    Decoration(Decoration, bool),
}

impl TagKind {
    fn closes(&self, name: &str) -> bool {
        match self {
            Self::Color(_) => {
                matches!(name, "color" | "colour" | "c")
                    || name.starts_with('#')
                    || Color::parse(name).is_some()
            }
            Self::Decoration(decoration, _) => Decoration::from_tag(name) == Some(*decoration),
        }
    }

    fn apply(&self, style: &mut Style) {
        match self {
            Self::Color(color) => style.color = Some(*color),
            Self::Decoration(decoration, state) => style.set_decoration(*decoration, Some(*state)),
        }
    }
}

enum Tag {
    Open(TagKind),
    Close(Option<String>),
    Reset,
    Newline,
}

fn parse_tag(content: &str) -> Option<Tag> {
    if let Some(name) = content.strip_prefix('/') {
        let name = name.trim().to_ascii_lowercase();
        return Some(Tag::Close((!name.is_empty()).then_some(name)));
    }
    if let Some(name) = content.strip_prefix('!') {
        let decoration = Decoration::from_tag(&name.to_ascii_lowercase())?;
        return Some(Tag::Open(TagKind::Decoration(decoration, false)));
    }

    let (name, argument) = match content.split_once(':') {
        Some((name, argument)) => (name.to_ascii_lowercase(), Some(argument)),
        None => (content.to_ascii_lowercase(), None),
    };

    match (name.as_str(), argument) {
        ("reset", None) => Some(Tag::Reset),
        ("newline" | "br", None) => Some(Tag::Newline),
        ("color" | "colour" | "c", Some(argument)) => {
            Color::parse(argument).map(|color| Tag::Open(TagKind::Color(color)))
        }
        (name, argument) => {
            if let Some(decoration) = Decoration::from_tag(name) {
                let state = match argument {
                    None => true,
                    Some(argument) => argument.parse().ok()?,
                };
                return Some(Tag::Open(TagKind::Decoration(decoration, state)));
            }
            if argument.is_some() {
                return None;
            }
            Color::parse(name).map(|color| Tag::Open(TagKind::Color(color)))
        }
    }
}

struct Parser {
    root: TextComponent,
    stack: Vec<TagKind>,
    buffer: String,
}

impl Parser {
    fn current_style(&self) -> Style {
        let mut style = Style::default();
        for tag in &self.stack {
            tag.apply(&mut style);
        }
        style
    }

    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        let child = TextComponent::styled(text, self.current_style());
        let root = std::mem::replace(&mut self.root, TextComponent::empty());
        self.root = root.add_child(child);
    }

    fn handle(&mut self, tag: Tag) {
        match tag {
            Tag::Newline => self.buffer.push('\n'),
            Tag::Reset => {
                self.flush();
                self.stack.clear();
            }
            Tag::Open(kind) => {
                self.flush();
                self.stack.push(kind);
            }
            Tag::Close(name) => {
                self.flush();
                let position = match name {
                    Some(name) => self.stack.iter().rposition(|tag| tag.closes(&name)),
                    None => self.stack.len().checked_sub(1),
                };
                // Closing a tag also closes everything opened inside it.
                if let Some(position) = position {
                    self.stack.truncate(position);
                }
            }
        }
    }
}

/// Parses markup into a component whose children carry the resolved style of
/// each text run.
pub fn parse(input: &str) -> TextComponent {
    let mut parser = Parser {
        root: TextComponent::empty(),
        stack: Vec::new(),
        buffer: String::new(),
    };

    let mut rest = input;
    while let Some(c) = rest.chars().next() {
        match c {
            '\\' => {
                let mut chars = rest[1..].chars();
                match chars.next() {
                    Some(escaped @ ('<' | '\\')) => {
                        parser.buffer.push(escaped);
                        rest = &rest[2..];
                    }
                    _ => {
                        parser.buffer.push('\\');
                        rest = &rest[1..];
                    }
                }
            }
            '<' => {
                let tag = rest[1..]
                    .find(['<', '>'])
                    .filter(|end| rest[1 + end..].starts_with('>'))
                    .and_then(|end| {
                        let content = &rest[1..=end];
                        parse_tag(content).map(|tag| (tag, end + 2))
                    });
                match tag {
                    Some((tag, consumed)) => {
                        parser.handle(tag);
                        rest = &rest[consumed..];
                    }
                    None => {
                        parser.buffer.push('<');
                        rest = &rest[1..];
                    }
                }
            }
            c => {
                parser.buffer.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    parser.flush();
    parser.root
}

#[cfg(test)]
mod test {
    use super::parse;
    use crate::text::color::{Color, NamedColor, RGBColor};

    #[test]
    fn plain_text_passes_through() {
        let component = parse("Plot menu");
        assert_eq!(component.get_text(), "Plot menu");
        assert!(component.runs()[0].1.is_empty());
    }

    #[test]
    fn nested_tags_resolve_style() {
        let component = parse("<red>Plot <bold>#12</bold> info</red>");
        let runs = component.runs();
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[0].0, "Plot ");
        assert_eq!(runs[0].1.color, Some(Color::Named(NamedColor::Red)));
        assert_eq!(runs[1].0, "#12");
        assert_eq!(runs[1].1.bold, Some(true));
        assert_eq!(runs[2].0, " info");
        assert_eq!(runs[2].1.bold, None);
        assert_eq!(runs[2].1.color, Some(Color::Named(NamedColor::Red)));
    }

    #[test]
    fn color_arguments_and_hex() {
        let runs = parse("<color:gold>a<#00ff00>b</#00ff00><c:dark_grey>c")
            .runs()
            .into_iter()
            .map(|(text, style)| (text.to_string(), style.color))
            .collect::<Vec<_>>();
        assert_eq!(
            runs,
            vec![
                ("a".to_string(), Some(Color::Named(NamedColor::Gold))),
                ("b".to_string(), Some(Color::Rgb(RGBColor::new(0, 0xFF, 0)))),
                ("c".to_string(), Some(Color::Named(NamedColor::DarkGray))),
            ]
        );
    }

    #[test]
    fn negation_and_reset() {
        let component = parse("<b>x<!b>y<reset>z");
        let runs = component.runs();
        assert_eq!(runs[0].1.bold, Some(true));
        assert_eq!(runs[1].1.bold, Some(false));
        assert!(runs[2].1.is_empty());
    }

    #[test]
    fn unknown_and_malformed_tags_are_literal() {
        assert_eq!(parse("<rainbow>hi").get_text(), "<rainbow>hi");
        assert_eq!(parse("a < b").get_text(), "a < b");
        assert_eq!(parse("<<red>x").get_text(), "<x");
        assert_eq!(parse("\\<red>x").get_text(), "<red>x");
        assert_eq!(parse("line<br>next").get_text(), "line\nnext");
    }

    #[test]
    fn closing_unopened_tag_is_ignored() {
        let component = parse("<italic>a</bold>b");
        let runs = component.runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[1].1.italic, Some(true));
    }
}
