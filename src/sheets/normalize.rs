//! Turns loosely typed sheet rows into the restaurant model's collections.
//!
//! Nothing here fails: unusable rows are skipped and missing cells read as
//! empty strings.

use crate::restaurant::model::{FEATURE, ITEM_NAME_KEYS};
use crate::restaurant::{MealWindow, Record, TimingEntry, Timings};

use super::{Cell, RawTable, Row};

/// How the tabular source spells an absent value.
const MISSING_MARKER: &str = "nan";

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const MEALS: [&str; 3] = ["Breakfast", "Lunch", "Dinner"];
const TIMING_HEADER_TOKENS: [&str; 3] = ["day", "meal_type", MISSING_MARKER];
const EXTRA_REQUIRED_KEYS: &[&str] = &[FEATURE, "Category"];

fn is_missing(cell: &Cell) -> bool {
    match cell {
        None => true,
        Some(v) => v.trim() == MISSING_MARKER,
    }
}

/// Cell text with the missing marker mapped to "".
fn text(cell: &Cell) -> String {
    if is_missing(cell) {
        String::new()
    } else {
        cell.as_deref().unwrap_or_default().trim().to_string()
    }
}

fn normalize_key(column: &str) -> String {
    column.trim().replace(' ', "_")
}

/// `(field, value)` pairs from the first two columns; later duplicates win.
pub fn profile(table: &RawTable) -> Record {
    let mut info = Record::new();
    for row in &table.rows {
        let field = row.first().map(text).unwrap_or_default();
        let value = row.get(1).cloned().flatten();
        if field.is_empty() || field.eq_ignore_ascii_case("field") || is_missing(&value) {
            continue;
        }
        info.insert(field, text(&value));
    }
    info
}

pub fn timings(table: &RawTable) -> Timings {
    let mut out = Timings::default();
    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(text).collect();
        let Some(first) = cells.first().map(String::as_str) else {
            continue;
        };
        if first.is_empty() || TIMING_HEADER_TOKENS.contains(&first.to_lowercase().as_str()) {
            continue;
        }
        let at = |i: usize| cells.get(i).cloned();

        if WEEKDAYS.contains(&first) {
            out.weekly.push(TimingEntry {
                day: first.to_string(),
                opens: at(1).unwrap_or_default(),
                closes: at(2).unwrap_or_default(),
                status: at(3).unwrap_or_else(|| "Open".to_string()),
            });
        } else if MEALS.contains(&first) {
            out.meals.push(MealWindow {
                meal_type: first.to_string(),
                start_time: at(1).unwrap_or_default(),
                end_time: at(2).unwrap_or_default(),
            });
        }
    }
    out
}

pub fn menu(table: &RawTable) -> Vec<Record> {
    records(table, ITEM_NAME_KEYS)
}

pub fn extras(table: &RawTable) -> Vec<Record> {
    records(table, EXTRA_REQUIRED_KEYS)
}

/// Keeps a row only when at least one of `required` is non-empty.
fn records(table: &RawTable, required: &[&str]) -> Vec<Record> {
    table
        .rows
        .iter()
        .map(|row| to_record(&table.columns, row))
        .filter(|r| !r.first_of(required).is_empty())
        .collect()
}

fn to_record(columns: &[String], row: &Row) -> Record {
    columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let value = row.get(i).map(text).unwrap_or_default();
            (normalize_key(col), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::fakes::table;

    #[test]
    fn profile_skips_header_blank_and_missing_rows() {
        let t = RawTable {
            columns: vec!["Field".into(), "Value".into()],
            rows: vec![
                vec![Some("field".into()), Some("value".into())],
                vec![Some("Name".into()), Some(" HFC ".into())],
                vec![Some("".into()), Some("orphan".into())],
                vec![Some("Phone".into()), None],
                vec![Some("Rating".into()), Some("nan".into())],
                vec![Some("Email".into())],
                vec![],
            ],
        };
        let info = profile(&t);
        assert_eq!(info.get("Name"), "HFC");
        assert_eq!(info.get("Phone"), "");
        assert_eq!(info.len(), 1);
    }

    #[test]
    fn profile_last_duplicate_wins() {
        let t = table(&["Field", "Value"], &[&["Name", "Old"], &["Name", "New"]]);
        assert_eq!(profile(&t).get("Name"), "New");
    }

    #[test]
    fn timings_split_weekly_and_meals() {
        let t = table(
            &["Day", "Opens", "Closes", "Status"],
            &[
                &["Day", "Opens", "Closes", "Status"],
                &[" Friday ", "10:00", "23:00", "Closed"],
                &["Breakfast", "07:00", "10:00", ""],
                &["Holiday", "x", "y", "z"],
                &["", "09:00", "10:00", "Open"],
            ],
        );
        let out = timings(&t);
        assert_eq!(out.weekly.len(), 1);
        assert_eq!(out.weekly[0].day, "Friday");
        assert_eq!(out.weekly[0].status, "Closed");
        assert_eq!(out.meals.len(), 1);
        assert_eq!(out.meals[0].meal_type, "Breakfast");
        assert_eq!(out.meals[0].end_time, "10:00");
    }

    #[test]
    fn short_weekday_rows_get_defaults() {
        let t = RawTable {
            columns: vec!["Day".into()],
            rows: vec![
                vec![Some("Monday".into()), Some("09:00".into())],
                vec![Some("Sunday".into()), Some("09:00".into()), None, None],
            ],
        };
        let out = timings(&t);
        assert_eq!(out.weekly[0].closes, "");
        assert_eq!(out.weekly[0].status, "Open");
        // A present-but-missing status cell is not treated as open.
        assert_eq!(out.weekly[1].status, "");
        assert!(!out.weekly[1].is_open());
    }

    #[test]
    fn menu_normalizes_keys_and_tolerates_missing_cells() {
        let t = RawTable {
            columns: vec![" Item Name ".into(), "Regular Price".into(), "Is Spicy".into()],
            rows: vec![
                vec![Some("Zinger".into()), None],
                vec![None, Some("1.00".into()), Some("yes".into())],
                vec![Some("nan".into()), Some("2.00".into())],
            ],
        };
        let items = menu(&t);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get("Item_Name"), "Zinger");
        assert_eq!(items[0].get("Regular_Price"), "");
        assert_eq!(items[0].get("Is_Spicy"), "");
    }

    #[test]
    fn menu_accepts_the_short_item_column() {
        let t = table(&["Item", "Price"], &[&["Fries", "1.99"]]);
        let items = menu(&t);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get("Item"), "Fries");
    }

    #[test]
    fn extras_need_feature_or_category() {
        let t = table(
            &["Feature", "Category", "Available"],
            &[
                &["WiFi", "", "Yes"],
                &["", "Seating", "Yes"],
                &["", "", "Yes"],
            ],
        );
        assert_eq!(extras(&t).len(), 2);
    }

    #[test]
    fn empty_tables_give_empty_collections() {
        let t = RawTable::default();
        assert!(profile(&t).is_empty());
        assert_eq!(timings(&t), Timings::default());
        assert!(menu(&t).is_empty());
        assert!(extras(&t).is_empty());
    }
}
