use crate::template::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDirection {
    Backward,
    Forward,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorEvent {
    Focus,
    /// Pointer click on chip `n`; the input moves right after it.
    FocusChip(usize),
    Input(String),
    Arrow(ArrowDirection),
    Enter,
    /// Pointer click on dropdown row `n`.
    Commit(usize),
    Delete(DeleteDirection),
    Blur,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorOutcome {
    Ignored,
    /// The selection is at `max_data`; the host must drop the typed text.
    Rejected,
    Redraw,
    Committed {
        value: String,
    },
    Deleted {
        value: String,
    },
}

impl SelectorOutcome {
    pub fn needs_redraw(&self) -> bool {
        !matches!(self, Self::Ignored)
    }

    pub fn changed_value(&self) -> Option<&str> {
        match self {
            Self::Committed { value } | Self::Deleted { value } => Some(value),
            Self::Ignored | Self::Rejected | Self::Redraw => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Focused,
    Typing,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Focused => "focused",
            Self::Typing => "typing",
        }
    }

    pub fn has_focus(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipView {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateView {
    pub segments: Vec<Segment>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownView {
    Hidden,
    /// Input matched nothing; a single non-selectable placeholder row.
    Empty,
    Items {
        items: Vec<CandidateView>,
        active: usize,
        scroll_offset: usize,
        scrollable: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorView {
    pub field_name: String,
    pub chips: Vec<ChipView>,
    pub cursor: usize,
    pub input: String,
    pub input_width: usize,
    pub phase: Phase,
    pub dropdown: DropdownView,
    pub value: String,
}
