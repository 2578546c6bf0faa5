mod core;
mod input_ops;
mod nav;
mod selection;
mod types;
mod value_ops;
mod view_ops;

pub use self::core::{Selector, SelectorKeys};
pub use selection::{InsertRejection, SelectedSet, VALUE_SEPARATOR, split_value};
pub use types::{
    ArrowDirection, CandidateView, ChipView, DeleteDirection, DropdownView, HiddenField, Phase,
    SelectorEvent, SelectorOutcome, SelectorView,
};
pub use nav::SCROLL_WINDOW_ROWS;
pub use view_ops::COLLAPSED_INPUT_WIDTH;
