//! Theme - variant and size modifiers shared by the widgets.

mod variant;

pub use variant::{Size, Variant};
