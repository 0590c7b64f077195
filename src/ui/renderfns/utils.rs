use ratatui::prelude::Color;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max_len: usize) -> String {
  if s.chars().count() <= max_len {
    s.to_string()
  } else {
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
  }
}

/// Display color for a department label; unmapped codes are dimmed
pub fn department_color(label: &str) -> Color {
  if label.is_empty() {
    Color::DarkGray
  } else {
    Color::White
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_truncate_short_string() {
    assert_eq!(truncate("Widget", 10), "Widget");
  }

  #[test]
  fn test_truncate_exact_length() {
    assert_eq!(truncate("Widget", 6), "Widget");
  }

  #[test]
  fn test_truncate_long_string() {
    assert_eq!(truncate("Stainless Steel Ladle", 10), "Stainle...");
  }

  #[test]
  fn test_truncate_multibyte() {
    assert_eq!(truncate("₱₱₱₱₱₱", 5), "₱₱...");
  }

  #[test]
  fn test_department_color() {
    assert_eq!(department_color("Cleaning"), Color::White);
    assert_eq!(department_color(""), Color::DarkGray);
  }
}
