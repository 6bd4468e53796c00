/// Paint commands and the card's display list

use crate::card::ChipKind;
use crate::rendering::layout::{ElementType, Layout, Rect, BODY_LINE, GLYPH, TITLE_LINE};

pub type Rgba = (u8, u8, u8, u8);

pub const WHITE: Rgba = (255, 255, 255, 255);
pub const BORDER: Rgba = (229, 231, 235, 255);
pub const SHADOW: Rgba = (0, 0, 0, 18);
pub const LINK_BLUE: Rgba = (37, 99, 235, 255);
pub const ICON_BLUE: Rgba = (59, 130, 246, 255);
pub const DESCRIPTION: Rgba = (55, 65, 81, 255);
pub const MUTED: Rgba = (75, 85, 99, 255);

pub const CARD_RADIUS: u32 = 12;
pub const BUTTON_RADIUS: u32 = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: Rgba,
    },
    RoundedRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        radius: u32,
        rgba: Rgba,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        scale: u32,
        rgba: Rgba,
    },
}

pub fn chip_accent(kind: ChipKind) -> Rgba {
    match kind {
        ChipKind::Stars => (234, 179, 8, 255),
        ChipKind::Forks => (16, 185, 129, 255),
        ChipKind::Language => (139, 92, 246, 255),
        ChipKind::Updated => ICON_BLUE,
    }
}

fn rounded(rect: Rect, radius: u32, rgba: Rgba) -> PaintCommand {
    PaintCommand::RoundedRect {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        radius,
        rgba,
    }
}

fn text_lines(
    out: &mut Vec<PaintCommand>,
    rect: Rect,
    lines: &[String],
    scale: u32,
    line_h: u32,
    rgba: Rgba,
) {
    for (i, line) in lines.iter().enumerate() {
        out.push(PaintCommand::Text {
            x: rect.x,
            y: rect.y + (i as u32 * line_h) as i32,
            text: line.clone(),
            scale,
            rgba,
        });
    }
}

/// Translate a layout into paint commands, back to front.
///
/// The canvas background is not part of the list; the rasterizer clears to
/// white before painting.
pub fn paint_layout(layout: &Layout) -> Vec<PaintCommand> {
    let mut out = Vec::new();

    for node in &layout.nodes {
        let r = node.rect;
        match &node.elem_type {
            ElementType::Card => {
                // soft drop shadow, then a 1px border around the white surface
                for spread in [6u32, 3] {
                    let offset = spread as i32;
                    out.push(rounded(
                        Rect::new(r.x - offset / 2, r.y + offset, r.width + spread, r.height),
                        CARD_RADIUS + spread,
                        SHADOW,
                    ));
                }
                out.push(rounded(r, CARD_RADIUS, BORDER));
                let surface = Rect::new(
                    r.x + 1,
                    r.y + 1,
                    r.width.saturating_sub(2),
                    r.height.saturating_sub(2),
                );
                out.push(rounded(
                    surface,
                    CARD_RADIUS - 1,
                    WHITE,
                ));
            }
            ElementType::TitleIcon => {
                // two interlocking links
                let half = r.width / 2;
                out.push(rounded(
                    Rect::new(r.x, r.y + half as i32 / 2, half + 2, half),
                    3,
                    ICON_BLUE,
                ));
                out.push(rounded(
                    Rect::new(r.x + half as i32 - 2, r.y + half as i32 / 2 + 2, half + 2, half),
                    3,
                    ICON_BLUE,
                ));
            }
            ElementType::Title => {
                text_lines(&mut out, r, &node.lines, node.scale, TITLE_LINE, LINK_BLUE);
            }
            ElementType::Description => {
                text_lines(&mut out, r, &node.lines, node.scale, BODY_LINE, DESCRIPTION);
            }
            ElementType::ChipIcon(kind) => {
                out.push(rounded(r, 2, chip_accent(*kind)));
            }
            ElementType::ChipLabel(_) => {
                text_lines(&mut out, r, &node.lines, node.scale, BODY_LINE, MUTED);
            }
            ElementType::Button => {
                out.push(rounded(r, BUTTON_RADIUS, LINK_BLUE));
            }
            ElementType::ButtonLabel => {
                let max_chars = (r.width / (GLYPH * node.scale)).max(1) as usize;
                let lines: Vec<String> = node
                    .lines
                    .iter()
                    .map(|l| l.chars().take(max_chars).collect())
                    .collect();
                text_lines(&mut out, r, &lines, node.scale, BODY_LINE, WHITE);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Card, Locale, StatChip};
    use crate::rendering::layout::{layout_card, LayoutOptions};

    fn layout() -> Layout {
        let card = Card {
            title: "demo".into(),
            url: "https://github.com/a/demo".into(),
            description: "A demo".into(),
            has_description: true,
            chips: vec![StatChip {
                kind: ChipKind::Language,
                label: "Rust".into(),
            }],
            cta_label: "View on GitHub".into(),
            cta_url: "https://github.com/a/demo".into(),
            locale: Locale::En,
        };
        layout_card(
            &card,
            LayoutOptions {
                card_width: 400,
                outer_padding: 40,
                updated_on_own_row: true,
                clamp_description: false,
            },
        )
    }

    #[test]
    fn card_surface_is_painted_before_text() {
        let cmds = paint_layout(&layout());
        let first_text = cmds
            .iter()
            .position(|c| matches!(c, PaintCommand::Text { .. }))
            .unwrap();
        let last_surface = cmds
            .iter()
            .rposition(|c| matches!(c, PaintCommand::RoundedRect { rgba, .. } if *rgba == WHITE))
            .unwrap();
        assert!(last_surface < first_text);
    }

    #[test]
    fn texts_use_element_colors() {
        let cmds = paint_layout(&layout());
        let colors: Vec<(String, Rgba)> = cmds
            .iter()
            .filter_map(|c| match c {
                PaintCommand::Text { text, rgba, .. } => Some((text.clone(), *rgba)),
                _ => None,
            })
            .collect();
        assert!(colors.contains(&("demo".to_string(), LINK_BLUE)));
        assert!(colors.contains(&("A demo".to_string(), DESCRIPTION)));
        assert!(colors.contains(&("Rust".to_string(), MUTED)));
        assert!(colors.contains(&("View on GitHub".to_string(), WHITE)));
    }

    #[test]
    fn chip_icons_use_accent_colors() {
        let cmds = paint_layout(&layout());
        assert!(cmds.iter().any(|c| matches!(
            c,
            PaintCommand::RoundedRect { rgba, .. } if *rgba == chip_accent(ChipKind::Language)
        )));
    }
}
