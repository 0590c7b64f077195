/// Department and sub-department codes used on the sheet.
const DEPARTMENTS: &[(&str, &str)] = &[
  ("100", "Apparel & Accessories"),
  ("110", "Apparel"),
  ("120", "Accessories"),
  ("150", "Health & Beauty Aids"),
  ("160", "Cosmetics"),
  ("170", "HBA"),
  ("200", "General Merchandise"),
  ("210", "Stationery"),
  ("220", "Toys"),
  ("250", "Food"),
  ("260", "Food"),
  ("300", "Hardware"),
  ("310", "DIY"),
  ("350", "Storage"),
  ("360", "Storage"),
  ("400", "Kitchen & Dining"),
  ("410", "Kitchen"),
  ("420", "Tableware"),
  ("450", "Interior"),
  ("500", "Cleaning"),
  ("550", "Outdoor"),
];

/// Label for a department code, or `""` for codes outside the table.
pub fn label_for(code: &str) -> &'static str {
  DEPARTMENTS
    .iter()
    .find(|(c, _)| *c == code)
    .map(|(_, label)| *label)
    .unwrap_or("")
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  #[rstest]
  #[case("500", "Cleaning")]
  #[case("110", "Apparel")]
  #[case("100", "Apparel & Accessories")]
  #[case("250", "Food")]
  #[case("260", "Food")]
  #[case("550", "Outdoor")]
  fn test_known_codes(#[case] code: &str, #[case] label: &str) {
    assert_eq!(label_for(code), label);
  }

  #[rstest]
  #[case("999")]
  #[case("")]
  #[case(" 500")]
  #[case("Cleaning")]
  fn test_unmapped_codes_are_blank(#[case] code: &str) {
    assert_eq!(label_for(code), "");
  }

  #[test]
  fn test_table_has_no_duplicate_codes() {
    let mut codes: Vec<&str> = DEPARTMENTS.iter().map(|(c, _)| *c).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), DEPARTMENTS.len());
    assert_eq!(DEPARTMENTS.len(), 21);
  }
}
