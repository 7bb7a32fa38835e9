// NamedColor
/// The sixteen legacy chat colors
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    /// Maps a legacy color code character (`0-9`, `a-f`, any case)
    pub fn from_code(code: char) -> Option<Self> {
        let color = match code.to_ascii_lowercase() {
            '0' => NamedColor::Black,
            '1' => NamedColor::DarkBlue,
            '2' => NamedColor::DarkGreen,
            '3' => NamedColor::DarkAqua,
            '4' => NamedColor::DarkRed,
            '5' => NamedColor::DarkPurple,
            '6' => NamedColor::Gold,
            '7' => NamedColor::Gray,
            '8' => NamedColor::DarkGray,
            '9' => NamedColor::Blue,
            'a' => NamedColor::Green,
            'b' => NamedColor::Aqua,
            'c' => NamedColor::Red,
            'd' => NamedColor::LightPurple,
            'e' => NamedColor::Yellow,
            'f' => NamedColor::White,
            _ => return None,
        };
        Some(color)
    }

    pub fn code(&self) -> char {
        match self {
            NamedColor::Black => '0',
            NamedColor::DarkBlue => '1',
            NamedColor::DarkGreen => '2',
            NamedColor::DarkAqua => '3',
            NamedColor::DarkRed => '4',
            NamedColor::DarkPurple => '5',
            NamedColor::Gold => '6',
            NamedColor::Gray => '7',
            NamedColor::DarkGray => '8',
            NamedColor::Blue => '9',
            NamedColor::Green => 'a',
            NamedColor::Aqua => 'b',
            NamedColor::Red => 'c',
            NamedColor::LightPurple => 'd',
            NamedColor::Yellow => 'e',
            NamedColor::White => 'f',
        }
    }
}

// Decorations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Decorations {
    pub obfuscated: bool,
    pub bold: bool,
    pub strikethrough: bool,
    pub underlined: bool,
    pub italic: bool,
}

// TextSpan
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextSpan {
    pub text: String,
    pub color: Option<NamedColor>,
    pub decorations: Decorations,
}

impl TextSpan {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            color: None,
            decorations: Decorations::default(),
        }
    }

    pub fn colored(text: &str, color: NamedColor) -> Self {
        Self {
            text: text.to_string(),
            color: Some(color),
            decorations: Decorations::default(),
        }
    }
}

// LabelText
/// Rendered label content: an ordered list of styled spans, lines separated
/// by spans containing a single `\n`
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LabelText {
    spans: Vec<TextSpan>,
}

impl LabelText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, span: TextSpan) -> &mut Self {
        if !span.text.is_empty() {
            self.spans.push(span);
        }

        self
    }

    pub fn push_text(&mut self, text: &str) -> &mut Self {
        self.push(TextSpan::plain(text))
    }

    pub fn push_colored(&mut self, text: &str, color: NamedColor) -> &mut Self {
        self.push(TextSpan::colored(text, color))
    }

    pub fn newline(&mut self) -> &mut Self {
        self.push_text("\n")
    }

    pub fn append(&mut self, other: LabelText) -> &mut Self {
        self.spans.extend(other.spans);

        self
    }

    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// The text with all styling stripped
    pub fn plain(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn line_count(&self) -> usize {
        if self.spans.is_empty() {
            return 0;
        }
        self.plain().lines().count()
    }
}
