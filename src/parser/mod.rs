mod line;
pub use line::{Line, LineReader, unfold};

mod content_line;
pub use content_line::ContentLine;
