pub mod modify;
pub mod view;

pub use modify::{collect_edits, confirm_save};
pub use view::print_metadata;
