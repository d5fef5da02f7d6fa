//! Placeholder substitution for prompt templates.

/// Longest ideas excerpt folded into an image or video prompt.
const IDEAS_LIMIT: usize = 320;

/// Values substituted into a template.
#[derive(Debug, Default)]
pub struct TemplateVars<'a> {
    pub dominant: &'a str,
    pub accent: &'a str,
    pub palette: &'a str,
    /// Already-joined `key: value` pairs; empty when nothing is set.
    pub context: &'a str,
    pub ideas: Option<&'a str>,
}

/// Replace `{dominant}`, `{accent}`, `{palette}`, `{context}` and `{ideas}`.
///
/// `{context}` and `{ideas}` expand to whole sentences (with a leading space)
/// or to nothing, so templates can end with `{context}{ideas}`.
pub fn render(template: &str, vars: &TemplateVars<'_>) -> String {
    let context = if vars.context.is_empty() {
        String::new()
    } else {
        format!(" Preferences: {}.", vars.context)
    };

    let ideas = match vars.ideas.map(excerpt) {
        Some(text) if !text.is_empty() => format!(" Concept: {}", text),
        _ => String::new(),
    };

    template
        .replace("{dominant}", vars.dominant)
        .replace("{accent}", vars.accent)
        .replace("{palette}", vars.palette)
        .replace("{context}", &context)
        .replace("{ideas}", &ideas)
}

/// Collapse whitespace and cut long ideas text at a word boundary.
pub fn excerpt(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= IDEAS_LIMIT {
        return collapsed;
    }

    let mut cut = String::new();
    for word in collapsed.split(' ') {
        if cut.chars().count() + word.chars().count() + 1 > IDEAS_LIMIT {
            break;
        }
        if !cut.is_empty() {
            cut.push(' ');
        }
        cut.push_str(word);
    }
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_all_placeholders() {
        let vars = TemplateVars {
            dominant: "Red (#FF0000)",
            accent: "Gold (#FFD700)",
            palette: "Red, Gold",
            context: "cuisine: Thai",
            ideas: Some("Chilli mango salad"),
        };
        let out = render("{dominant} and {accent} from {palette}.{context}{ideas}", &vars);
        assert_eq!(
            out,
            "Red (#FF0000) and Gold (#FFD700) from Red, Gold. Preferences: cuisine: Thai. Concept: Chilli mango salad"
        );
    }

    #[test]
    fn test_render_empty_optionals() {
        let vars = TemplateVars {
            dominant: "A",
            accent: "B",
            palette: "A, B",
            ..Default::default()
        };
        assert_eq!(render("{dominant}/{accent}.{context}{ideas}", &vars), "A/B.");
    }

    #[test]
    fn test_excerpt_collapses_and_cuts() {
        assert_eq!(excerpt("  one\n\ntwo   three "), "one two three");

        let long = "word ".repeat(200);
        let cut = excerpt(&long);
        assert!(cut.ends_with("..."));
        assert!(cut.chars().count() <= IDEAS_LIMIT + 3);
    }
}
