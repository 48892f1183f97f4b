use crate::catalog::ModelSelector;
use crate::renderer::Table;

pub const SOLUTION_BANNER: &str = "## Recommended Solutions";

pub const CHECKLIST: &str = "\
**Verification Checklist:**\n\n\
1. Test in development system first\n\
2. Check SAP Notes\n\
3. Consult system logs";

pub const NO_SOLUTION: &str = "\
No solutions generated. Possible fixes:\n\n\
* Check API key validity\n\
* Simplify error message\n\
* Try different AI model";

pub const FOOTER: &str = "⚠️  Always validate solutions with SAP documentation before implementation";

/// Sidebar listing of the supported models, the current one marked.
pub fn model_table(current: ModelSelector, width: usize) -> String {
    let mut table = Table::new(["#", "Model", "Notes"]);
    for (i, model) in ModelSelector::ALL.iter().enumerate() {
        let mut name = model.display_name().to_string();
        if model.is_recommended() {
            name.push_str(" (Recommended)");
        }
        if *model == current {
            name.insert_str(0, "> ");
        }
        table.add_row([(i + 1).to_string(), name, model.highlights().join("; ")]);
    }
    table.render(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_table_lists_every_model_and_marks_current() {
        let out = model_table(ModelSelector::Llama3_8b, 100);
        assert!(out.contains("Llama 3 70B (Recommended)"));
        assert!(out.contains("> Llama 3 8B"));
        assert!(out.contains("Mixtral 8x7B"));
        assert!(out.contains("Faster response times"));
    }
}
