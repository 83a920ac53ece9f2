//! Theming and color definitions.
//!
//! The editor draws a blue window with grey text. Terminals with a 256-color
//! palette get the exact indexed colors; everything else falls back to the
//! basic ANSI colors that every terminal understands.

use ratatui::style::{Color, Modifier, Style};

use crate::document::StyleTag;

/// Which color table the terminal supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    Indexed256,
    Ansi16,
}

impl Palette {
    /// Guess the palette from the environment.
    pub fn detect() -> Self {
        detect_from_env(
            std::env::var("COLORTERM").ok().as_deref(),
            std::env::var("TERM").ok().as_deref(),
        )
    }
}

fn detect_from_env(colorterm: Option<&str>, term: Option<&str>) -> Palette {
    if colorterm.is_some_and(|ct| !ct.is_empty()) {
        return Palette::Indexed256;
    }
    match term.map(str::to_ascii_lowercase) {
        Some(t) if t.contains("256") || t.contains("direct") || t.contains("truecolor") => {
            Palette::Indexed256
        }
        _ => Palette::Ansi16,
    }
}

// xterm 256-color indices
const BLACK: Color = Color::Indexed(16);
const BLUE: Color = Color::Indexed(19);
const CYAN: Color = Color::Indexed(37);
const RED: Color = Color::Indexed(124);
const LIGHT_GREY: Color = Color::Indexed(248);
const DARK_GREY: Color = Color::Indexed(240);
const BRIGHT_WHITE: Color = Color::Indexed(231);

/// Styles for every element the editor draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Window frame and title
    pub border: Style,
    /// Ordinary text and empty text-area cells
    pub text: Style,
    /// Whitespace and tab cells
    pub whitespace: Style,
    /// Orphaned wide-glyph marker
    pub continuation: Style,
    /// Filler rows past the end of the document
    pub dragons: Style,
    /// Scrollbar track and thumb
    pub scrollbar: Style,
    /// Status bar
    pub status: Style,
    /// Key names in the status bar
    pub status_key: Style,
    /// Transient messages in the status bar
    pub toast: Style,
    /// Foreground colors cycled through for highlighter classes
    pub syntax: [Color; 6],
}

impl Default for Theme {
    fn default() -> Self {
        Self::indexed256()
    }
}

impl Theme {
    pub fn for_palette(palette: Palette) -> Self {
        match palette {
            Palette::Indexed256 => Self::indexed256(),
            Palette::Ansi16 => Self::ansi16(),
        }
    }

    /// The original 256-color scheme.
    pub fn indexed256() -> Self {
        let text = Style::default().fg(LIGHT_GREY).bg(BLUE);
        Self {
            border: Style::default().fg(BRIGHT_WHITE).bg(BLUE),
            text,
            whitespace: Style::default().fg(CYAN).bg(BLUE),
            continuation: Style::default().fg(CYAN).bg(BLUE),
            dragons: Style::default().fg(DARK_GREY).bg(BLUE),
            scrollbar: Style::default().fg(BLUE).bg(CYAN),
            status: Style::default().fg(BLACK).bg(LIGHT_GREY),
            status_key: Style::default().fg(RED).bg(LIGHT_GREY),
            toast: Style::default()
                .fg(BLACK)
                .bg(LIGHT_GREY)
                .add_modifier(Modifier::BOLD),
            syntax: [
                Color::Indexed(227), // bright yellow
                Color::Indexed(83),  // bright green
                Color::Indexed(207), // bright magenta
                Color::Indexed(87),  // bright cyan
                Color::Indexed(203), // bright red
                BRIGHT_WHITE,
            ],
        }
    }

    /// Basic ANSI fallback.
    pub fn ansi16() -> Self {
        let text = Style::default().fg(Color::Gray).bg(Color::Blue);
        Self {
            border: Style::default().fg(Color::White).bg(Color::Blue),
            text,
            whitespace: Style::default().fg(Color::Cyan).bg(Color::Blue),
            continuation: Style::default().fg(Color::Cyan).bg(Color::Blue),
            dragons: Style::default().fg(Color::DarkGray).bg(Color::Blue),
            scrollbar: Style::default().fg(Color::Blue).bg(Color::Cyan),
            status: Style::default().fg(Color::Black).bg(Color::Gray),
            status_key: Style::default().fg(Color::Red).bg(Color::Gray),
            toast: Style::default()
                .fg(Color::Black)
                .bg(Color::Gray)
                .add_modifier(Modifier::BOLD),
            syntax: [
                Color::Yellow,
                Color::Green,
                Color::Magenta,
                Color::LightCyan,
                Color::LightRed,
                Color::White,
            ],
        }
    }

    /// Style for a text-area cell tag.
    pub fn style_for_tag(&self, tag: StyleTag) -> Style {
        match tag {
            StyleTag::Normal => self.text,
            StyleTag::Whitespace | StyleTag::Tab => self.whitespace,
            StyleTag::Continuation => self.continuation,
            StyleTag::Dragons => self.dragons,
            StyleTag::Syntax(class) => {
                let color = self.syntax[usize::from(class) % self.syntax.len()];
                self.text.fg(color)
            }
        }
    }
}
