use crate::CommandMeta;

pub fn unknown_category_message(wanted_category: &str, valid_categories: &[&str]) -> String {
    let valid = valid_categories
        .iter()
        .map(|category| display_category(category))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Unknown category: {}\nValid categories: {}",
        display_category(wanted_category),
        valid
    )
}

/// Commands grouped under bold category headings, one `usage: description`
/// line each. Expects `commands` sorted by category.
pub fn grouped_help_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category: Option<&str> = None;

    for command in commands {
        if current_category != Some(command.category) {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", display_category(command.category)));
            current_category = Some(command.category);
        }

        out.push_str(&format!("`{}`: {}\n", command.usage, command.desc));
    }

    if out.is_empty() {
        out.push_str("No commands available.");
    }

    out.trim_end().to_owned()
}

pub fn display_category(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => format!("{}{}", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{display_category, grouped_help_description, unknown_category_message};
    use crate::CommandMeta;

    const A: CommandMeta = CommandMeta {
        name: "a",
        desc: "First.",
        category: "crab",
        usage: "!a",
    };
    const B: CommandMeta = CommandMeta {
        name: "b",
        desc: "Second.",
        category: "utility",
        usage: "!b <x>",
    };

    #[test]
    fn groups_by_category() {
        assert_eq!(
            grouped_help_description(&[&A, &B]),
            "**Crab**\n`!a`: First.\n\n**Utility**\n`!b <x>`: Second."
        );
    }

    #[test]
    fn empty_list_has_placeholder() {
        assert_eq!(grouped_help_description(&[]), "No commands available.");
    }

    #[test]
    fn categories_are_capitalised() {
        assert_eq!(display_category("fun"), "Fun");
        assert_eq!(
            unknown_category_message("nope", &["crab", "fun"]),
            "Unknown category: Nope\nValid categories: Crab, Fun"
        );
    }
}
