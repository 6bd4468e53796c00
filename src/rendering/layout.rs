/// Block layout for a card, in device-independent pixels.

use crate::card::{Card, ChipKind};

/// Width and height of one glyph cell at text scale 1.
pub const GLYPH: u32 = 8;

pub const CARD_PADDING: u32 = 24;
pub const TITLE_SCALE: u32 = 2;
pub const BODY_SCALE: u32 = 1;
pub const TITLE_LINE: u32 = 20;
pub const BODY_LINE: u32 = 12;
pub const ICON: u32 = 8;
pub const TITLE_ICON: u32 = 16;
pub const CHIP_GAP: u32 = 16;
pub const DESCRIPTION_MAX_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }
}

/// What a layout node draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementType {
    /// The card surface with its border.
    Card,
    TitleIcon,
    Title,
    Description,
    ChipIcon(ChipKind),
    ChipLabel(ChipKind),
    Button,
    ButtonLabel,
}

#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub rect: Rect,
    /// One entry per rendered line; empty for non-text nodes.
    pub lines: Vec<String>,
    pub elem_type: ElementType,
    pub scale: u32,
}

impl LayoutNode {
    fn boxed(rect: Rect, elem_type: ElementType) -> Self {
        Self {
            rect,
            lines: Vec::new(),
            elem_type,
            scale: 1,
        }
    }

    fn text(rect: Rect, lines: Vec<String>, elem_type: ElementType, scale: u32) -> Self {
        Self {
            rect,
            lines,
            elem_type,
            scale,
        }
    }
}

/// Geometry knobs for one layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub card_width: u32,
    /// Blank margin around the card on every side of the canvas.
    pub outer_padding: u32,
    /// Put the updated-date chip on its own row below the other chips.
    pub updated_on_own_row: bool,
    /// Clamp the description to `DESCRIPTION_MAX_LINES`; otherwise it is
    /// wrapped in full.
    pub clamp_description: bool,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub nodes: Vec<LayoutNode>,
}

impl Layout {
    pub fn find(&self, elem_type: &ElementType) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| &n.elem_type == elem_type)
    }
}

fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH * scale
}

/// Cut `text` to at most `max_chars`, ending in "..." when shortened.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return ".".repeat(max_chars);
    }
    let mut out: String = text.chars().take(max_chars - 3).collect();
    out.truncate(out.trim_end().len());
    out.push_str("...");
    out
}

/// Greedy word wrap, hard-breaking words longer than a line, clamped to `max_lines`.
pub fn wrap(text: &str, chars_per_line: usize, max_lines: usize) -> Vec<String> {
    let chars_per_line = chars_per_line.max(1);
    let mut lines = Vec::new();
    let mut cur = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > chars_per_line {
            if !cur.is_empty() {
                lines.push(std::mem::take(&mut cur));
            }
            let rest = word.split_off(chars_per_line);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let len = cur.chars().count();
        if !cur.is_empty() && len + 1 + word.chars().count() > chars_per_line {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(&word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let clipped = truncate(last, chars_per_line.saturating_sub(3));
            *last = if clipped.ends_with("...") {
                clipped
            } else {
                format!("{}...", clipped)
            };
        }
    }
    lines
}

/// Lay the card out top to bottom:
/// - title row (icon + single truncated line)
/// - description, wrapped and optionally clamped to three lines
/// - chip rows, wrapping when a chip would overflow
/// - right-aligned call-to-action button
pub fn layout_card(card: &Card, opts: LayoutOptions) -> Layout {
    let pad = opts.outer_padding as i32;
    let inner = CARD_PADDING as i32;
    let content_w = opts.card_width.saturating_sub(CARD_PADDING * 2);
    let left = pad + inner;
    let mut y = pad + inner;
    let mut nodes = Vec::new();

    // Title
    let title_x = left + (TITLE_ICON + 8) as i32;
    let title_room = content_w.saturating_sub(TITLE_ICON + 8);
    let title = truncate(&card.title, (title_room / (GLYPH * TITLE_SCALE)) as usize);
    nodes.push(LayoutNode::boxed(
        Rect::new(left, y + 2, TITLE_ICON, TITLE_ICON),
        ElementType::TitleIcon,
    ));
    nodes.push(LayoutNode::text(
        Rect::new(title_x, y + 2, text_width(&title, TITLE_SCALE), GLYPH * TITLE_SCALE),
        vec![title],
        ElementType::Title,
        TITLE_SCALE,
    ));
    y += TITLE_LINE as i32 + 8;

    // Description
    let per_line = (content_w / (GLYPH * BODY_SCALE)) as usize;
    let max_lines = if opts.clamp_description {
        DESCRIPTION_MAX_LINES
    } else {
        usize::MAX
    };
    let lines = wrap(&card.description, per_line, max_lines);
    let desc_h = lines.len().max(1) as u32 * BODY_LINE;
    nodes.push(LayoutNode::text(
        Rect::new(left, y, content_w, desc_h),
        lines,
        ElementType::Description,
        BODY_SCALE,
    ));
    y += desc_h as i32 + 16;

    // Chips
    let (own_row, flowing): (Vec<_>, Vec<_>) = card
        .chips
        .iter()
        .partition(|c| opts.updated_on_own_row && c.kind == ChipKind::Updated);

    for group in [flowing, own_row] {
        if group.is_empty() {
            continue;
        }
        let mut x = left;
        for chip in group {
            let label_room = content_w.saturating_sub(ICON + 4);
            let label = truncate(&chip.label, (label_room / GLYPH) as usize);
            let chip_w = ICON + 4 + text_width(&label, BODY_SCALE);
            if x > left && x + chip_w as i32 > left + content_w as i32 {
                x = left;
                y += BODY_LINE as i32 + 8;
            }
            nodes.push(LayoutNode::boxed(
                Rect::new(x, y + 2, ICON, ICON),
                ElementType::ChipIcon(chip.kind),
            ));
            nodes.push(LayoutNode::text(
                Rect::new(x + (ICON + 4) as i32, y + 2, text_width(&label, BODY_SCALE), GLYPH),
                vec![label],
                ElementType::ChipLabel(chip.kind),
                BODY_SCALE,
            ));
            x += (chip_w + CHIP_GAP) as i32;
        }
        y += BODY_LINE as i32 + 16;
    }

    // Call to action
    let label_w = text_width(&card.cta_label, BODY_SCALE);
    let button_w = (label_w + 32).min(content_w);
    let button_h = BODY_LINE + 16;
    let button_x = left + content_w as i32 - button_w as i32;
    nodes.push(LayoutNode::boxed(
        Rect::new(button_x, y, button_w, button_h),
        ElementType::Button,
    ));
    nodes.push(LayoutNode::text(
        Rect::new(button_x + 16, y + 10, label_w.min(button_w.saturating_sub(32)), GLYPH),
        vec![card.cta_label.clone()],
        ElementType::ButtonLabel,
        BODY_SCALE,
    ));
    y += button_h as i32 + inner;

    let card_h = (y - pad) as u32;
    nodes.insert(
        0,
        LayoutNode::boxed(Rect::new(pad, pad, opts.card_width, card_h), ElementType::Card),
    );

    Layout {
        width: opts.card_width + opts.outer_padding * 2,
        height: card_h + opts.outer_padding * 2,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Locale, StatChip};

    fn card(chips: &[ChipKind]) -> Card {
        Card {
            title: "Hello-World".into(),
            url: "https://github.com/octocat/Hello-World".into(),
            description: "My first repository on GitHub!".into(),
            has_description: true,
            chips: chips
                .iter()
                .map(|k| StatChip {
                    kind: *k,
                    label: format!("{:?}", k),
                })
                .collect(),
            cta_label: "View on GitHub".into(),
            cta_url: "https://github.com/octocat/Hello-World".into(),
            locale: Locale::En,
        }
    }

    const ALL: [ChipKind; 4] = [
        ChipKind::Stars,
        ChipKind::Forks,
        ChipKind::Language,
        ChipKind::Updated,
    ];

    fn standard() -> LayoutOptions {
        LayoutOptions {
            card_width: 400,
            outer_padding: 40,
            updated_on_own_row: true,
            clamp_description: false,
        }
    }

    #[test]
    fn canvas_is_card_plus_padding() {
        let layout = layout_card(&card(&ALL), standard());
        assert_eq!(layout.width, 480);
        let surface = layout.find(&ElementType::Card).unwrap();
        assert_eq!(surface.rect.x, 40);
        assert_eq!(surface.rect.width, 400);
        assert_eq!(layout.height, surface.rect.height + 80);
    }

    #[test]
    fn chips_follow_card_order() {
        let layout = layout_card(&card(&ALL), standard());
        let order: Vec<ChipKind> = layout
            .nodes
            .iter()
            .filter_map(|n| match n.elem_type {
                ElementType::ChipLabel(k) => Some(k),
                _ => None,
            })
            .collect();
        assert_eq!(order, ALL.to_vec());
    }

    #[test]
    fn updated_chip_gets_its_own_row_in_standard_mode() {
        let layout = layout_card(&card(&ALL), standard());
        let stars = layout.find(&ElementType::ChipLabel(ChipKind::Stars)).unwrap();
        let updated = layout.find(&ElementType::ChipLabel(ChipKind::Updated)).unwrap();
        assert!(updated.rect.y > stars.rect.y);

        let flowing = layout_card(
            &card(&ALL),
            LayoutOptions {
                card_width: 448,
                outer_padding: 0,
                updated_on_own_row: false,
                clamp_description: true,
            },
        );
        let stars = flowing.find(&ElementType::ChipLabel(ChipKind::Stars)).unwrap();
        let updated = flowing.find(&ElementType::ChipLabel(ChipKind::Updated)).unwrap();
        assert_eq!(updated.rect.y, stars.rect.y);
    }

    #[test]
    fn only_the_displayed_card_clamps_the_description() {
        let mut c = card(&ALL);
        c.description = "lorem ipsum dolor sit amet ".repeat(20);

        let full = layout_card(&c, standard());
        let desc = full.find(&ElementType::Description).unwrap();
        assert!(desc.lines.len() > DESCRIPTION_MAX_LINES);
        assert!(!desc.lines.last().unwrap().ends_with("..."));
        assert_eq!(desc.rect.height, desc.lines.len() as u32 * BODY_LINE);

        let clamped = layout_card(
            &c,
            LayoutOptions {
                clamp_description: true,
                ..standard()
            },
        );
        let desc = clamped.find(&ElementType::Description).unwrap();
        assert_eq!(desc.lines.len(), DESCRIPTION_MAX_LINES);
        assert!(desc.lines[2].ends_with("..."));
        assert!(clamped.height < full.height);
    }

    #[test]
    fn button_is_right_aligned_inside_card() {
        let layout = layout_card(&card(&ALL), standard());
        let button = layout.find(&ElementType::Button).unwrap();
        assert_eq!(button.rect.right(), 40 + 400 - CARD_PADDING as i32);
        let surface = layout.find(&ElementType::Card).unwrap();
        assert!(button.rect.bottom() < surface.rect.bottom());
    }

    #[test]
    fn wrap_clamps_to_max_lines() {
        let text = "one two three four five six seven eight nine ten eleven twelve";
        let lines = wrap(text, 10, 3);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].ends_with("..."));
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn wrap_hard_breaks_long_words() {
        let lines = wrap("abcdefghijklmnop", 5, 10);
        assert_eq!(lines, vec!["abcde", "fghij", "klmno", "p"]);
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a-very-long-repository-name", 10), "a-very-...");
    }

    #[test]
    fn long_title_stays_inside_card() {
        let mut c = card(&ALL);
        c.title = "x".repeat(200);
        let layout = layout_card(&c, standard());
        let title = layout.find(&ElementType::Title).unwrap();
        assert!(title.rect.right() <= 40 + 400 - CARD_PADDING as i32);
        assert!(title.lines[0].ends_with("..."));
    }
}
