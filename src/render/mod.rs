pub mod colors;
pub mod compose;
pub mod output;

pub use compose::render_item;
pub use output::{collage_file_name, save_canvas};
