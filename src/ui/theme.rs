use ratatui::style::{Color, Modifier, Style};
use supports_color::Stream;

use crate::controller::theme_store::ThemeId;

// ═══════════════════════════════════════════════════════════════════════════════
// Base palette
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bg: Color,        // page background
    pub bg_alt: Color,    // header, footer, overlays
    pub fg: Color,        // body text
    pub fg_dim: Color,    // secondary text, faded elements
    pub fg_strong: Color, // headings
    pub accent: Color,    // links, keys, active markers
    pub highlight: Color, // '@' symbol, warnings, preview marker
    pub border: Color,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component colors
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct HeaderColors {
    pub bg: Color,
    pub user: Color,
    pub at_symbol: Color,
    pub link: Color,
    pub link_active: Color,
    pub control: Color,
    pub control_focused_bg: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct DropdownColors {
    pub bg: Color,
    pub border: Color,
    pub option: Color,
    pub active_marker: Color,
    pub preview_fg: Color,
    pub preview_bg: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct ModalColors {
    pub bg: Color,
    pub border: Color,
    pub title: Color,
    pub key: Color,
    pub description: Color,
    pub faded: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct BootColors {
    pub bg: Color,
    pub system: Color,
    pub ok: Color,
    pub faded: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct PageColors {
    pub heading: Color,
    pub section_title: Color,
    pub text: Color,
    pub text_dim: Color,
    pub bar_fill: Color,
    pub bar_empty: Color,
    pub timeline_line: Color,
    pub timeline_progress: Color,
    pub timeline_active: Color,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub id: ThemeId,
    pub palette: Palette,
    pub header: HeaderColors,
    pub dropdown: DropdownColors,
    pub modal: ModalColors,
    pub boot: BootColors,
    pub page: PageColors,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette(ThemeId::default(), Self::palette_256(ThemeId::default()))
    }
}

impl Theme {
    /// Built-in theme for `id`, with any user palette override applied.
    pub fn load(id: ThemeId) -> Self {
        let base = if Self::supports_true_color() {
            Self::palette_rgb(id)
        } else {
            Self::palette_256(id)
        };
        let palette = super::theme_loader::load_palette_override(id, base).unwrap_or(base);
        Self::from_palette(id, palette)
    }

    /// Check if terminal supports true color (24-bit RGB)
    fn supports_true_color() -> bool {
        if let Some(support) = supports_color::on(Stream::Stdout) {
            support.has_16m
        } else {
            false
        }
    }

    pub fn from_palette(id: ThemeId, p: Palette) -> Self {
        Self {
            id,
            palette: p,
            header: HeaderColors {
                bg: p.bg_alt,
                user: p.fg_strong,
                at_symbol: p.highlight,
                link: p.fg_dim,
                link_active: p.accent,
                control: p.fg,
                control_focused_bg: p.border,
            },
            dropdown: DropdownColors {
                bg: p.bg_alt,
                border: p.border,
                option: p.fg,
                active_marker: p.accent,
                preview_fg: p.bg,
                preview_bg: p.highlight,
            },
            modal: ModalColors {
                bg: p.bg_alt,
                border: p.accent,
                title: p.fg_strong,
                key: p.accent,
                description: p.fg,
                faded: p.fg_dim,
            },
            boot: BootColors {
                bg: p.bg,
                system: p.fg,
                ok: p.accent,
                faded: p.fg_dim,
            },
            page: PageColors {
                heading: p.fg_strong,
                section_title: p.accent,
                text: p.fg,
                text_dim: p.fg_dim,
                bar_fill: p.accent,
                bar_empty: p.border,
                timeline_line: p.border,
                timeline_progress: p.accent,
                timeline_active: p.highlight,
            },
        }
    }

    pub fn palette_rgb(id: ThemeId) -> Palette {
        match id {
            ThemeId::Homebrew => Palette {
                bg: Color::Rgb(0x0c, 0x0c, 0x0c),
                bg_alt: Color::Rgb(0x14, 0x1f, 0x14),
                fg: Color::Rgb(0x33, 0xff, 0x33),
                fg_dim: Color::Rgb(0x1f, 0x99, 0x1f),
                fg_strong: Color::Rgb(0x99, 0xff, 0x99),
                accent: Color::Rgb(0x66, 0xff, 0x66),
                highlight: Color::Rgb(0xff, 0xcc, 0x00),
                border: Color::Rgb(0x1a, 0x5c, 0x1a),
            },
            ThemeId::Ocean => Palette {
                bg: Color::Rgb(0x0b, 0x1d, 0x33),
                bg_alt: Color::Rgb(0x12, 0x2b, 0x4a),
                fg: Color::Rgb(0x8e, 0xca, 0xe6),
                fg_dim: Color::Rgb(0x4f, 0x7c, 0x99),
                fg_strong: Color::Rgb(0xd6, 0xf1, 0xff),
                accent: Color::Rgb(0x00, 0xd4, 0xff),
                highlight: Color::Rgb(0xff, 0xb7, 0x03),
                border: Color::Rgb(0x21, 0x4d, 0x72),
            },
            ThemeId::RedSands => Palette {
                bg: Color::Rgb(0x2b, 0x0f, 0x0a),
                bg_alt: Color::Rgb(0x3d, 0x17, 0x10),
                fg: Color::Rgb(0xf4, 0xa2, 0x61),
                fg_dim: Color::Rgb(0xa0, 0x5a, 0x38),
                fg_strong: Color::Rgb(0xff, 0xdd, 0xb5),
                accent: Color::Rgb(0xe7, 0x6f, 0x51),
                highlight: Color::Rgb(0xe9, 0xc4, 0x6a),
                border: Color::Rgb(0x6b, 0x2a, 0x1a),
            },
            ThemeId::SilverAerogel => Palette {
                bg: Color::Rgb(0xe6, 0xe8, 0xeb),
                bg_alt: Color::Rgb(0xd3, 0xd7, 0xdc),
                fg: Color::Rgb(0x3a, 0x3f, 0x47),
                fg_dim: Color::Rgb(0x80, 0x88, 0x93),
                fg_strong: Color::Rgb(0x1b, 0x1f, 0x24),
                accent: Color::Rgb(0x5a, 0x6f, 0x8a),
                highlight: Color::Rgb(0x9b, 0x4d, 0xca),
                border: Color::Rgb(0xa9, 0xb0, 0xb9),
            },
            ThemeId::Basic => Palette {
                bg: Color::Rgb(0x1e, 0x1e, 0x1e),
                bg_alt: Color::Rgb(0x2a, 0x2a, 0x2a),
                fg: Color::Rgb(0xd4, 0xd4, 0xd4),
                fg_dim: Color::Rgb(0x80, 0x80, 0x80),
                fg_strong: Color::Rgb(0xff, 0xff, 0xff),
                accent: Color::Rgb(0xe0, 0xe0, 0xe0),
                highlight: Color::Rgb(0xff, 0xff, 0xff),
                border: Color::Rgb(0x50, 0x50, 0x50),
            },
        }
    }

    pub fn palette_256(id: ThemeId) -> Palette {
        let idx = Color::Indexed;
        match id {
            ThemeId::Homebrew => Palette {
                bg: idx(232),
                bg_alt: idx(233),
                fg: idx(46),
                fg_dim: idx(28),
                fg_strong: idx(120),
                accent: idx(83),
                highlight: idx(220),
                border: idx(22),
            },
            ThemeId::Ocean => Palette {
                bg: idx(17),
                bg_alt: idx(18),
                fg: idx(117),
                fg_dim: idx(67),
                fg_strong: idx(195),
                accent: idx(45),
                highlight: idx(214),
                border: idx(24),
            },
            ThemeId::RedSands => Palette {
                bg: idx(52),
                bg_alt: idx(88),
                fg: idx(215),
                fg_dim: idx(131),
                fg_strong: idx(223),
                accent: idx(167),
                highlight: idx(186),
                border: idx(94),
            },
            ThemeId::SilverAerogel => Palette {
                bg: idx(254),
                bg_alt: idx(252),
                fg: idx(238),
                fg_dim: idx(244),
                fg_strong: idx(235),
                accent: idx(60),
                highlight: idx(134),
                border: idx(248),
            },
            ThemeId::Basic => Palette {
                bg: idx(234),
                bg_alt: idx(236),
                fg: idx(252),
                fg_dim: idx(244),
                fg_strong: idx(231),
                accent: idx(254),
                highlight: idx(231),
                border: idx(239),
            },
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Style helpers
    // ═══════════════════════════════════════════════════════════════════════════

    pub fn base_style(&self) -> Style {
        Style::default().fg(self.palette.fg).bg(self.palette.bg)
    }

    pub fn dim_style(&self) -> Style {
        Style::default().fg(self.palette.fg_dim)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.page.heading)
            .add_modifier(Modifier::BOLD)
    }

    pub fn section_title_style(&self) -> Style {
        Style::default()
            .fg(self.page.section_title)
            .add_modifier(Modifier::BOLD)
    }

    pub fn focused_control_style(&self) -> Style {
        Style::default()
            .fg(self.header.control)
            .bg(self.header.control_focused_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn preview_style(&self) -> Style {
        Style::default()
            .fg(self.dropdown.preview_fg)
            .bg(self.dropdown.preview_bg)
            .add_modifier(Modifier::BOLD)
    }
}
