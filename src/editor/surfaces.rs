//! Editor surfaces the integration can read from and write to.
//!
//! Exactly one surface is expected to be active; when both report
//! availability the block editor wins.

/// Inline style that sets inserted suggestions apart from the original text.
pub const IMPROVED_STYLE: &str =
    "color: #008080; font-style: italic; border-top: 2px solid #ddd; padding-top: 10px;";

pub const IMPROVED_LABEL: &str = "<strong>Improved Content:</strong><br>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Block,
    Classic,
}

/// Probe order used by [`select_surface`].
pub const SURFACE_PREFERENCE: [SurfaceKind; 2] = [SurfaceKind::Block, SurfaceKind::Classic];

pub trait EditorSurface: Send {
    fn kind(&self) -> SurfaceKind;

    fn name(&self) -> &'static str {
        match self.kind() {
            SurfaceKind::Block => "block",
            SurfaceKind::Classic => "classic",
        }
    }

    fn is_available(&self) -> bool;

    /// Current document body, or `None` when there is nothing to send.
    fn content(&self) -> Option<String>;

    fn insert_improvement(&mut self, improved_text: &str);
}

/// Wraps a suggestion in `tag` with the distinguishing style and label.
#[must_use]
pub fn improvement_markup(tag: &str, improved_text: &str) -> String {
    format!("<{tag} style=\"{IMPROVED_STYLE}\">{IMPROVED_LABEL}{improved_text}</{tag}>")
}

/// Index of the first available surface in preference order.
#[must_use]
pub fn select_surface(surfaces: &[&mut dyn EditorSurface]) -> Option<usize> {
    SURFACE_PREFERENCE.iter().find_map(|kind| {
        surfaces
            .iter()
            .position(|s| s.kind() == *kind && s.is_available())
    })
}

// ============================================================================
// Block editor
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub name: String,
    pub content: String,
}

impl Block {
    #[must_use]
    pub fn paragraph(content: impl Into<String>) -> Self {
        Self {
            name: "core/paragraph".to_string(),
            content: content.into(),
        }
    }

    fn serialize(&self) -> String {
        let short = self.name.strip_prefix("core/").unwrap_or(&self.name);
        format!("<!-- wp:{short} -->\n{}\n<!-- /wp:{short} -->", self.content)
    }
}

/// Block-based document; the richer of the two surfaces.
#[derive(Debug, Default)]
pub struct BlockEditor {
    loaded: bool,
    blocks: Vec<Block>,
}

impl BlockEditor {
    #[must_use]
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            loaded: true,
            blocks,
        }
    }

    /// A block editor whose data store never loaded on this screen.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }
}

impl EditorSurface for BlockEditor {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Block
    }

    fn is_available(&self) -> bool {
        self.loaded
    }

    fn content(&self) -> Option<String> {
        let serialized = self
            .blocks
            .iter()
            .filter(|b| !b.content.trim().is_empty())
            .map(Block::serialize)
            .collect::<Vec<_>>()
            .join("\n\n");
        (!serialized.is_empty()).then_some(serialized)
    }

    fn insert_improvement(&mut self, improved_text: &str) {
        self.blocks
            .push(Block::paragraph(improvement_markup("p", improved_text)));
    }
}

// ============================================================================
// Classic editor
// ============================================================================

/// Single HTML body; suggestions are appended after the original.
#[derive(Debug, Default)]
pub struct ClassicEditor {
    active: bool,
    body: String,
}

impl ClassicEditor {
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            active: true,
            body: body.into(),
        }
    }

    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}

impl EditorSurface for ClassicEditor {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Classic
    }

    fn is_available(&self) -> bool {
        self.active
    }

    fn content(&self) -> Option<String> {
        (!self.body.is_empty()).then(|| self.body.clone())
    }

    fn insert_improvement(&mut self, improved_text: &str) {
        let markup = improvement_markup("div", improved_text);
        self.body = format!("{}<br>{markup}", self.body);
    }
}
