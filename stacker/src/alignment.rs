//! Placement windows for a dropped block.
//!
//! Each table entry is keyed by the current stack width and the extent of
//! the previous layer, and lists its windows in priority order. The first
//! window containing the dropped block decides the new layer; a drop that
//! fits no window of a matching entry misses.

/// Inclusive horizontal pixel extent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u8,
    pub end: u8,
}

impl Span {
    pub const fn new(start: u8, end: u8) -> Self {
        Span { start, end }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Window {
    /// The whole block lies within `min..=max`.
    Within(u8, u8),
    /// The block's left edge lies within the range.
    Start(u8, u8),
    /// The block's right edge lies within the range.
    End(u8, u8),
}

impl Window {
    fn accepts(self, block: Span) -> bool {
        match self {
            Window::Within(min, max) => block.start >= min && block.end <= max,
            Window::Start(min, max) => (min..=max).contains(&block.start),
            Window::End(min, max) => (min..=max).contains(&block.end),
        }
    }
}

/// Result of a successful drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Extent of the layer drawn at the drop row.
    pub layer: Span,
    /// Stack width after the drop.
    pub width: u8,
    /// Amount the moving block's left edge moves right to match the new width.
    pub shift: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Placed(Placement),
    Missed,
    /// No table entry for this width and previous layer.
    Unknown,
}

struct Rule {
    window: Window,
    placement: Placement,
}

struct Entry {
    width: u8,
    /// `None` matches any previous layer.
    prev: Option<Span>,
    rules: &'static [Rule],
}

const fn rule(window: Window, start: u8, end: u8, width: u8, shift: u8) -> Rule {
    Rule {
        window,
        placement: Placement {
            layer: Span::new(start, end),
            width,
            shift,
        },
    }
}

static TABLE: [Entry; 6] = [
    Entry {
        width: 3,
        prev: None,
        rules: &[
            rule(Window::Within(45, 86), 48, 83, 3, 0),
            rule(Window::Start(34, 44), 48, 71, 2, 12),
            rule(Window::End(87, 98), 60, 83, 2, 12),
            rule(Window::Start(20, 33), 48, 59, 1, 24),
            rule(Window::End(99, 109), 72, 83, 1, 24),
        ],
    },
    Entry {
        width: 2,
        prev: Some(Span::new(48, 71)),
        rules: &[
            rule(Window::Within(43, 75), 48, 71, 2, 0),
            rule(Window::Start(34, 42), 48, 59, 1, 12),
            rule(Window::End(72, 85), 60, 71, 1, 12),
        ],
    },
    Entry {
        width: 2,
        prev: Some(Span::new(60, 83)),
        rules: &[
            rule(Window::Within(56, 87), 60, 83, 2, 0),
            rule(Window::End(86, 98), 72, 83, 1, 12),
            rule(Window::Start(46, 59), 60, 71, 1, 12),
        ],
    },
    Entry {
        width: 1,
        prev: Some(Span::new(60, 71)),
        rules: &[rule(Window::Within(56, 74), 60, 71, 1, 0)],
    },
    Entry {
        width: 1,
        prev: Some(Span::new(72, 83)),
        rules: &[rule(Window::Within(68, 86), 72, 83, 1, 0)],
    },
    Entry {
        width: 1,
        prev: Some(Span::new(48, 59)),
        rules: &[rule(Window::Within(43, 63), 48, 59, 1, 0)],
    },
];

/// Decides where a block dropped at `block` lands on a stack of `width`
/// sub-blocks whose top layer is `prev`.
pub fn resolve(width: u8, prev: Span, block: Span) -> Outcome {
    let entry = TABLE
        .iter()
        .find(|entry| entry.width == width && entry.prev.map_or(true, |p| p == prev));
    match entry {
        Some(entry) => entry
            .rules
            .iter()
            .find(|rule| rule.window.accepts(block))
            .map_or(Outcome::Missed, |rule| Outcome::Placed(rule.placement)),
        None => Outcome::Unknown,
    }
}
