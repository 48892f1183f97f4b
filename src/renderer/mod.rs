mod markdown;
mod syntax;
mod table;
mod texts;

pub use markdown::MarkdownRenderer;
pub use syntax::Highlighter;
pub use table::Table;
pub use texts::{model_table, CHECKLIST, FOOTER, NO_SOLUTION, SOLUTION_BANNER};
