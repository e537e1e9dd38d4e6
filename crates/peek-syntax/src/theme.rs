//! Code color themes.
//!
//! A [`Theme`] picks a [`Palette`]: the colors for each token kind, the
//! bracket cycle, and the page, gutter and match colors a front end puts
//! in its stylesheet. `Classic` is the default and is the palette every
//! other part of the crate documents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SyntaxError;
use crate::highlighter::{PALETTE_LEN, TokenKind};

/// Colors for one theme. Values are CSS colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub foreground: &'static str,
    pub keyword: &'static str,
    pub string: &'static str,
    pub number: &'static str,
    pub boolean: &'static str,
    pub comment: &'static str,
    pub brackets: [&'static str; PALETTE_LEN],
    /// Background of every search match
    pub search_match: &'static str,
    /// Background of the match the user navigated to
    pub search_current: &'static str,
}

/// Bracket colors of the classic theme, indexed by `max(0, depth) % 5`.
const BRACKET_PALETTE: [&str; PALETTE_LEN] =
    ["#98c379", "#e06c75", "#61afef", "#e5c07b", "#56b6c2"];

/// A selectable code theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Classic,
    OneDarkPro,
    Dracula,
    MaterialTheme,
    MonokaiPro,
    NightOwl,
    Ayu,
    Cobalt2,
    Palenight,
    ShadesOfPurple,
    Noctis,
}

impl Theme {
    /// Returns every theme, in display order.
    pub fn all() -> &'static [Theme] {
        &[
            Theme::Classic,
            Theme::OneDarkPro,
            Theme::Dracula,
            Theme::MaterialTheme,
            Theme::MonokaiPro,
            Theme::NightOwl,
            Theme::Ayu,
            Theme::Cobalt2,
            Theme::Palenight,
            Theme::ShadesOfPurple,
            Theme::Noctis,
        ]
    }

    /// Short name, as persisted and accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::OneDarkPro => "one-dark-pro",
            Theme::Dracula => "dracula",
            Theme::MaterialTheme => "material-theme",
            Theme::MonokaiPro => "monokai-pro",
            Theme::NightOwl => "night-owl",
            Theme::Ayu => "ayu",
            Theme::Cobalt2 => "cobalt2",
            Theme::Palenight => "palenight",
            Theme::ShadesOfPurple => "shades-of-purple",
            Theme::Noctis => "noctis",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::OneDarkPro => "One Dark Pro",
            Theme::Dracula => "Dracula",
            Theme::MaterialTheme => "Material Theme",
            Theme::MonokaiPro => "Monokai Pro",
            Theme::NightOwl => "Night Owl",
            Theme::Ayu => "Ayu",
            Theme::Cobalt2 => "Cobalt2",
            Theme::Palenight => "Palenight",
            Theme::ShadesOfPurple => "Shades of Purple",
            Theme::Noctis => "Noctis",
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Classic => &CLASSIC,
            Theme::OneDarkPro => &ONE_DARK_PRO,
            Theme::Dracula => &DRACULA,
            Theme::MaterialTheme => &MATERIAL,
            Theme::MonokaiPro => &MONOKAI_PRO,
            Theme::NightOwl => &NIGHT_OWL,
            Theme::Ayu => &AYU,
            Theme::Cobalt2 => &COBALT2,
            Theme::Palenight => &PALENIGHT,
            Theme::ShadesOfPurple => &SHADES_OF_PURPLE,
            Theme::Noctis => &NOCTIS,
        }
    }

    /// Returns the color for a token kind, or `None` for plain text.
    pub fn color(&self, kind: TokenKind) -> Option<&'static str> {
        let p = self.palette();
        match kind {
            TokenKind::Plain => None,
            TokenKind::Keyword => Some(p.keyword),
            TokenKind::String => Some(p.string),
            TokenKind::Comment => Some(p.comment),
            TokenKind::Number => Some(p.number),
            TokenKind::Boolean => Some(p.boolean),
            TokenKind::Bracket { palette_index } => Some(p.brackets[palette_index % PALETTE_LEN]),
        }
    }

    /// CSS for the page, the gutter and search marks.
    pub fn stylesheet(&self) -> String {
        let p = self.palette();
        format!(
            "pre {{ background: {bg}; color: {fg}; }}\n\
             .gutter {{ color: {comment}; display: inline-block; min-width: 4ch; margin-right: 1ch; text-align: right; }}\n\
             mark.match {{ background: {m}; color: inherit; }}\n\
             mark.match.current {{ background: {cur}; }}\n",
            bg = p.background,
            fg = p.foreground,
            comment = p.comment,
            m = p.search_match,
            cur = p.search_current,
        )
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = SyntaxError;

    /// Accepts the short name or the display name, ignoring case, spaces
    /// and dashes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = squash(s);
        Theme::all()
            .iter()
            .copied()
            .find(|t| squash(t.as_str()) == wanted)
            .ok_or_else(|| SyntaxError::UnknownTheme(s.to_string()))
    }
}

fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

// ============================================================================
// Palettes
// ============================================================================

const CLASSIC: Palette = Palette {
    background: "#282c34",
    foreground: "#abb2bf",
    keyword: "#61afef",
    string: "#98c379",
    number: "#d19a66",
    boolean: "#c678dd",
    comment: "gray",
    brackets: BRACKET_PALETTE,
    search_match: "rgba(255, 255, 0, 0.25)",
    search_current: "rgba(224, 108, 117, 0.38)",
};

const ONE_DARK_PRO: Palette = Palette {
    background: "#282c34",
    foreground: "#abb2bf",
    keyword: "#c678dd",
    string: "#98c379",
    number: "#d19a66",
    boolean: "#d19a66",
    comment: "#5c6370",
    brackets: ["#98c379", "#e06c75", "#61afef", "#e5c07b", "#56b6c2"],
    search_match: "rgba(255, 255, 0, 0.25)",
    search_current: "rgba(224, 108, 117, 0.38)",
};

const DRACULA: Palette = Palette {
    background: "#282a36",
    foreground: "#f8f8f2",
    keyword: "#ff79c6",
    string: "#f1fa8c",
    number: "#bd93f9",
    boolean: "#bd93f9",
    comment: "#6272a4",
    brackets: ["#50fa7b", "#ff5555", "#8be9fd", "#ffb86c", "#bd93f9"],
    search_match: "rgba(255, 184, 108, 0.25)",
    search_current: "rgba(255, 85, 85, 0.38)",
};

const MATERIAL: Palette = Palette {
    background: "#212121",
    foreground: "#eeff41",
    keyword: "#c792ea",
    string: "#c3e88d",
    number: "#ffd54f",
    boolean: "#ffd54f",
    comment: "#75715e",
    brackets: ["#c3e88d", "#ff5370", "#82aaff", "#ffd54f", "#c792ea"],
    search_match: "rgba(255, 213, 79, 0.25)",
    search_current: "rgba(255, 83, 112, 0.38)",
};

const MONOKAI_PRO: Palette = Palette {
    background: "#272822",
    foreground: "#f8f8f2",
    keyword: "#f92672",
    string: "#e6db74",
    number: "#ae81ff",
    boolean: "#ae81ff",
    comment: "#75715e",
    brackets: ["#a6e22e", "#f92672", "#66d9ef", "#e6db74", "#ae81ff"],
    search_match: "rgba(230, 219, 116, 0.25)",
    search_current: "rgba(249, 38, 114, 0.38)",
};

const NIGHT_OWL: Palette = Palette {
    background: "#011627",
    foreground: "#839496",
    keyword: "#c3e88d",
    string: "#addb67",
    number: "#ffcb6b",
    boolean: "#ffcb6b",
    comment: "#637777",
    brackets: ["#addb67", "#ff6363", "#82aaff", "#ffcb6b", "#c792ea"],
    search_match: "rgba(255, 203, 107, 0.25)",
    search_current: "rgba(255, 99, 99, 0.38)",
};

const AYU: Palette = Palette {
    background: "#0f1419",
    foreground: "#cbccc6",
    keyword: "#ffcc66",
    string: "#c9d0ff",
    number: "#ffcc66",
    boolean: "#ffcc66",
    comment: "#5c6370",
    brackets: ["#c9d0ff", "#ffcc66", "#ffffff", "#ffcc66", "#c9d0ff"],
    search_match: "rgba(255, 204, 102, 0.25)",
    search_current: "rgba(255, 204, 102, 0.38)",
};

const COBALT2: Palette = Palette {
    background: "#0d0d0d",
    foreground: "#ffffff",
    keyword: "#ffa821",
    string: "#ffffff",
    number: "#ffa821",
    boolean: "#ffa821",
    comment: "#00ffff",
    brackets: ["#00ff00", "#ff0000", "#0000ff", "#ffff00", "#00ffff"],
    search_match: "rgba(255, 255, 0, 0.25)",
    search_current: "rgba(255, 0, 0, 0.38)",
};

const PALENIGHT: Palette = Palette {
    background: "#292d3e",
    foreground: "#a9b7c6",
    keyword: "#c3e88d",
    string: "#c3e88d",
    number: "#ffcb6b",
    boolean: "#ffcb6b",
    comment: "#637777",
    brackets: ["#c3e88d", "#ff6363", "#82aaff", "#ffcb6b", "#c792ea"],
    search_match: "rgba(255, 203, 107, 0.25)",
    search_current: "rgba(255, 99, 99, 0.38)",
};

const SHADES_OF_PURPLE: Palette = Palette {
    background: "#2d2a55",
    foreground: "#ffffff",
    keyword: "#ff79c6",
    string: "#ffffff",
    number: "#ff79c6",
    boolean: "#ff79c6",
    comment: "#ff79c6",
    brackets: ["#ffffff", "#ff79c6", "#ffffff", "#ff79c6", "#ffffff"],
    search_match: "rgba(255, 121, 198, 0.25)",
    search_current: "rgba(255, 121, 198, 0.38)",
};

const NOCTIS: Palette = Palette {
    background: "#191919",
    foreground: "#ffffff",
    keyword: "#ffcc66",
    string: "#ffffff",
    number: "#ffcc66",
    boolean: "#ffcc66",
    comment: "#5c6370",
    brackets: ["#ffffff", "#ffcc66", "#ffffff", "#ffcc66", "#ffffff"],
    search_match: "rgba(255, 204, 102, 0.25)",
    search_current: "rgba(255, 204, 102, 0.38)",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_is_default() {
        assert_eq!(Theme::default(), Theme::Classic);
        assert_eq!(Theme::Classic.color(TokenKind::Keyword), Some("#61afef"));
        assert_eq!(Theme::Classic.color(TokenKind::Comment), Some("gray"));
        assert_eq!(Theme::Classic.color(TokenKind::Plain), None);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("one-dark-pro".parse::<Theme>().unwrap(), Theme::OneDarkPro);
        assert_eq!("Shades of Purple".parse::<Theme>().unwrap(), Theme::ShadesOfPurple);
        assert_eq!("COBALT2".parse::<Theme>().unwrap(), Theme::Cobalt2);
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn test_short_names_match_serde() {
        for theme in Theme::all() {
            let json = serde_json::to_value(theme).unwrap();
            assert_eq!(json, serde_json::json!(theme.as_str()));
            assert_eq!(theme.as_str().parse::<Theme>().unwrap(), *theme);
        }
    }

    #[test]
    fn test_stylesheet_uses_palette() {
        let css = Theme::Dracula.stylesheet();
        assert!(css.contains("pre { background: #282a36; color: #f8f8f2; }"));
        assert!(css.contains("mark.match.current { background: rgba(255, 85, 85, 0.38); }"));
    }
}
