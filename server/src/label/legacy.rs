use nametag_shared::{Decorations, LabelText, NamedColor, TextSpan};

// Format
/// One legacy formatting code, as written after `&` or `§`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Color(NamedColor),
    Obfuscated,
    Bold,
    Strikethrough,
    Underlined,
    Italic,
    Reset,
}

impl Format {
    fn from_code(code: char) -> Option<Self> {
        if let Some(color) = NamedColor::from_code(code) {
            return Some(Format::Color(color));
        }
        let format = match code.to_ascii_lowercase() {
            'k' => Format::Obfuscated,
            'l' => Format::Bold,
            'm' => Format::Strikethrough,
            'n' => Format::Underlined,
            'o' => Format::Italic,
            'r' => Format::Reset,
            _ => return None,
        };
        Some(format)
    }
}

fn is_marker(c: char) -> bool {
    c == '&' || c == '§'
}

// Token
enum Token {
    Text(String),
    Format(Format),
}

/// Splits `input` into runs of literal text and recognised formatting codes
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if is_marker(c) {
            if let Some(format) = chars.peek().copied().and_then(Format::from_code) {
                chars.next();
                if !run.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut run)));
                }
                tokens.push(Token::Format(format));
                continue;
            }
        }
        run.push(c);
    }
    if !run.is_empty() {
        tokens.push(Token::Text(run));
    }

    tokens
}

/// Parses a string carrying legacy color codes (`&c`, `§l`, ...) into styled
/// spans. A color code clears any active decorations, `r` clears everything.
pub fn parse_legacy(input: &str) -> LabelText {
    let mut text = LabelText::new();
    let mut color = None;
    let mut decorations = Decorations::default();

    for token in tokenize(input) {
        match token {
            Token::Text(run) => {
                text.push(TextSpan {
                    text: run,
                    color,
                    decorations,
                });
            }
            Token::Format(Format::Color(next)) => {
                color = Some(next);
                decorations = Decorations::default();
            }
            Token::Format(Format::Obfuscated) => decorations.obfuscated = true,
            Token::Format(Format::Bold) => decorations.bold = true,
            Token::Format(Format::Strikethrough) => decorations.strikethrough = true,
            Token::Format(Format::Underlined) => decorations.underlined = true,
            Token::Format(Format::Italic) => decorations.italic = true,
            Token::Format(Format::Reset) => {
                color = None;
                decorations = Decorations::default();
            }
        }
    }

    text
}

/// The color selected by the last formatting code in `input`. `None` when
/// there is no code at all or the last one is a decoration or a reset.
pub fn last_color(input: &str) -> Option<NamedColor> {
    let last = tokenize(input).into_iter().rev().find_map(|token| match token {
        Token::Format(format) => Some(format),
        Token::Text(_) => None,
    });
    match last {
        Some(Format::Color(color)) => Some(color),
        _ => None,
    }
}
