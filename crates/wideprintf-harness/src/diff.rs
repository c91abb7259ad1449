//! Diff rendering for fixture comparison.

/// Render a text diff between expected and actual output.
#[must_use]
pub fn render_diff(expected: &str, actual: &str) -> String {
    if expected == actual {
        return String::from("[identical]");
    }

    let mut out = String::new();
    out.push_str("--- expected\n");
    out.push_str("+++ actual\n");
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let rows = expected_lines.len().max(actual_lines.len()).max(1);
    for i in 0..rows {
        let e = expected_lines.get(i).copied().unwrap_or("");
        let a = actual_lines.get(i).copied().unwrap_or("");
        if e != a {
            out.push_str(&format!("@@ line {} @@\n", i + 1));
            out.push_str(&format!("-{e}\n"));
            out.push_str(&format!("+{a}\n"));
        }
    }
    if let Some(col) = expected.chars().zip(actual.chars()).position(|(e, a)| e != a) {
        out.push_str(&format!("first difference at char {col}\n"));
    } else {
        out.push_str(&format!(
            "length differs: expected {} chars, got {}\n",
            expected.chars().count(),
            actual.chars().count()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_inputs() {
        assert_eq!(render_diff("abc", "abc"), "[identical]");
    }

    #[test]
    fn reports_changed_line_and_column() {
        let d = render_diff("   -3", "000-3");
        assert!(d.contains("-   -3\n"));
        assert!(d.contains("+000-3\n"));
        assert!(d.contains("first difference at char 0"));
    }

    #[test]
    fn reports_length_mismatch() {
        let d = render_diff("He", "Hel");
        assert!(d.contains("length differs: expected 2 chars, got 3"));
    }
}
