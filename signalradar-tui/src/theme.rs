//! Parrot/neon theme tokens for the SignalRadar TUI
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, selection, headings)
//! - **Positive**: Neon green (gains, bullish tags)
//! - **Negative**: Hot pink (losses, failures)
//! - **Warning**: Neon orange (overbought, pending input)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (hints, disabled)

use ratatui::style::{Color, Modifier, Style};

use signalradar_core::domain::tags;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub const fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            neutral: Color::Rgb(147, 112, 219),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Color for a return or price change: green at or above zero, pink below.
    pub fn change_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    /// Composite score gradient.
    pub fn score_color(&self, score: f64) -> Color {
        match score {
            s if s >= 70.0 => self.positive,
            s if s >= 50.0 => self.accent,
            s if s >= 30.0 => self.neutral,
            s if s >= 0.0 => self.muted,
            _ => self.negative,
        }
    }

    /// RSI bands: overbought above 70, oversold below 30.
    pub fn rsi_color(&self, rsi: f64) -> Color {
        match rsi {
            r if r > 70.0 => self.warning,
            r if r < 30.0 => self.accent,
            _ => self.text_primary,
        }
    }

    pub fn tag_color(&self, tag: &str) -> Color {
        match tag {
            tags::BULLISH_MOMENTUM | tags::STRONG_UPTREND | tags::ABOVE_MA50 | tags::ABOVE_MA200 => {
                self.positive
            }
            tags::OVERBOUGHT | tags::VERY_VOLATILE => self.warning,
            tags::OVERSOLD => self.accent,
            tags::HIGH_VOLUME | tags::BUILDING_MOMENTUM => self.neutral,
            _ => self.text_secondary,
        }
    }
}

pub const PALETTE: Theme = Theme::parrot_neon();

pub fn text() -> Style {
    Style::default().fg(PALETTE.text_primary)
}

pub fn accent() -> Style {
    Style::default().fg(PALETTE.accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(PALETTE.muted)
}

pub fn neutral() -> Style {
    Style::default().fg(PALETTE.neutral)
}

pub fn warning() -> Style {
    Style::default().fg(PALETTE.warning)
}

pub fn negative() -> Style {
    Style::default().fg(PALETTE.negative)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Base layer painted under everything else.
pub fn background() -> Style {
    Style::default().bg(PALETTE.background)
}

/// Highlighted table row.
pub fn selected_row() -> Style {
    Style::default()
        .bg(Color::Rgb(40, 44, 52))
        .add_modifier(Modifier::BOLD)
}
