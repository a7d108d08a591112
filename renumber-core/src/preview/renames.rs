use crate::plan::RenameStep;
use nu_ansi_term::Color;
use std::fmt::Write;

/// One `old -> new` line per rename, indented by two spaces.
pub fn render_renames(steps: &[RenameStep], use_color: bool) -> String {
    let mut output = String::new();
    for step in steps {
        if use_color {
            writeln!(
                output,
                "  {} {} {}",
                Color::Red.paint(&step.from),
                Color::DarkGray.paint("->"),
                Color::Green.paint(&step.to)
            )
            .unwrap();
        } else {
            writeln!(output, "  {} -> {}", step.from, step.to).unwrap();
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        let steps = vec![RenameStep::new("1.txt", "2.txt"), RenameStep::new("0.txt", "1.txt")];
        assert_eq!(
            render_renames(&steps, false),
            "  1.txt -> 2.txt\n  0.txt -> 1.txt\n"
        );
    }

    #[test]
    fn test_colored_lines_keep_names() {
        let steps = vec![RenameStep::new("1.txt", "2.txt")];
        let output = render_renames(&steps, true);
        assert!(output.contains("\u{1b}["));
        assert!(output.contains("1.txt"));
        assert!(output.contains("2.txt"));
    }

    #[test]
    fn test_no_steps() {
        assert_eq!(render_renames(&[], true), "");
    }
}
