use std::collections::BTreeSet;

use serde::Serialize;
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime, UtcOffset};

use super::record::Record;

pub const ITEM_NAME_KEYS: &[&str] = &["Item_Name", "Item"];
pub const PRICE_KEYS: &[&str] = &["Regular_Price", "Price"];
pub const CATEGORY: &str = "Category";
pub const DESCRIPTION: &str = "Description";
pub const AVAILABLE: &str = "Available";
pub const IS_BESTSELLER: &str = "Is_Bestseller";
pub const IS_SPICY: &str = "Is_Spicy";
pub const FEATURE: &str = "Feature";

pub const DEFAULT_NAME: &str = "HFC";
pub const NOT_AVAILABLE: &str = "N/A";

const CLOCK_12H: &[FormatItem<'static>] = format_description!("[hour repr:12]:[minute] [period]");

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimingEntry {
    pub day: String,
    pub opens: String,
    pub closes: String,
    pub status: String,
}

impl TimingEntry {
    pub fn is_open(&self) -> bool {
        self.status.eq_ignore_ascii_case("open")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealWindow {
    pub meal_type: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timings {
    pub weekly: Vec<TimingEntry>,
    pub meals: Vec<MealWindow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenStatus {
    pub day: String,
    pub time: String,
    pub is_open: bool,
    pub opens: String,
    pub closes: String,
}

/// Wall clock pinned to the restaurant's UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    offset: UtcOffset,
}

impl Clock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Uses the host offset when it can be determined, UTC otherwise.
    pub fn system() -> Self {
        Self::new(UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
    }

    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Read-only snapshot of everything the assistant knows about the restaurant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RestaurantData {
    pub info: Record,
    pub timings: Timings,
    pub menu: Vec<Record>,
    pub extras: Vec<Record>,
}

impl RestaurantData {
    pub fn new(info: Record, timings: Timings, menu: Vec<Record>, extras: Vec<Record>) -> Self {
        Self {
            info,
            timings,
            menu,
            extras,
        }
    }

    pub fn name(&self) -> &str {
        non_empty_or(self.info.get("Name"), DEFAULT_NAME)
    }

    pub fn address(&self) -> &str {
        non_empty_or(self.info.get("Address"), NOT_AVAILABLE)
    }

    pub fn phone(&self) -> &str {
        non_empty_or(self.info.get("Phone"), NOT_AVAILABLE)
    }

    pub fn rating(&self) -> &str {
        non_empty_or(self.info.get("Rating"), NOT_AVAILABLE)
    }

    pub fn is_open_now(&self) -> OpenStatus {
        self.is_open_at(Clock::system().now())
    }

    /// Duplicate rows for the same weekday resolve to the first one.
    pub fn is_open_at(&self, now: OffsetDateTime) -> OpenStatus {
        let day = now.weekday().to_string();
        let time = now.format(CLOCK_12H).unwrap_or_default();

        match self.timings.weekly.iter().find(|t| t.day == day) {
            Some(entry) => OpenStatus {
                is_open: entry.is_open(),
                opens: entry.opens.clone(),
                closes: entry.closes.clone(),
                day,
                time,
            },
            None => OpenStatus {
                day,
                time,
                is_open: false,
                opens: String::new(),
                closes: String::new(),
            },
        }
    }

    /// Sorted as stored, so "burgers" and "Burgers" stay distinct.
    pub fn get_categories(&self) -> Vec<String> {
        self.menu
            .iter()
            .map(|item| item.get(CATEGORY))
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn get_menu_by_category(&self, category: &str) -> Vec<Record> {
        let wanted = category.to_lowercase();
        self.menu
            .iter()
            .filter(|item| item.get(CATEGORY).to_lowercase() == wanted)
            .cloned()
            .collect()
    }

    pub fn get_bestsellers(&self) -> Vec<Record> {
        self.menu
            .iter()
            .filter(|item| item.flag(IS_BESTSELLER))
            .cloned()
            .collect()
    }

    pub fn search_menu(&self, query: &str) -> Vec<Record> {
        let query = query.to_lowercase();
        self.menu
            .iter()
            .filter(|item| {
                item_name(item).to_lowercase().contains(&query)
                    || item.get(DESCRIPTION).to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    pub fn available_facilities(&self) -> impl Iterator<Item = &Record> {
        self.extras.iter().filter(|e| e.flag(AVAILABLE))
    }
}

pub fn item_name(item: &Record) -> &str {
    item.first_of(ITEM_NAME_KEYS)
}

pub fn item_price(item: &Record) -> &str {
    item.first_of(PRICE_KEYS)
}

fn non_empty_or<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() {
        default
    } else {
        value
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn item(pairs: &[(&str, &str)]) -> Record {
        pairs.iter().copied().collect()
    }

    pub fn day(day: &str, opens: &str, closes: &str, status: &str) -> TimingEntry {
        TimingEntry {
            day: day.into(),
            opens: opens.into(),
            closes: closes.into(),
            status: status.into(),
        }
    }

    pub fn sample() -> RestaurantData {
        RestaurantData::new(
            item(&[
                ("Name", "Halal Fried Chicken"),
                ("Address", "12 Market Street"),
                ("Phone", "555-0100"),
                ("Rating", "4.6"),
            ]),
            Timings {
                weekly: vec![
                    day("Monday", "09:00", "22:00", "Open"),
                    day("Tuesday", "09:00", "22:00", "Closed"),
                ],
                meals: vec![MealWindow {
                    meal_type: "Lunch".into(),
                    start_time: "12:00".into(),
                    end_time: "15:00".into(),
                }],
            },
            vec![
                item(&[
                    ("Item_Name", "Zinger Burger"),
                    ("Category", "Burgers"),
                    ("Regular_Price", "5.99"),
                    ("Available", "Yes"),
                    ("Is_Bestseller", "yes"),
                ]),
                item(&[
                    ("Item_Name", "Hot Bites"),
                    ("Category", "Sides"),
                    ("Price", "2.50"),
                    ("Available", "no"),
                    ("Is_Spicy", "Yes"),
                    ("Description", "Spicy Wings tossed in house sauce"),
                ]),
                item(&[
                    ("Item_Name", "Classic Burger"),
                    ("Category", "burgers"),
                    ("Regular_Price", "4.49"),
                    ("Available", "yes"),
                    ("Is_Bestseller", "No"),
                ]),
            ],
            vec![
                item(&[("Feature", "Free WiFi"), ("Available", "Yes")]),
                item(&[("Feature", "Drive Thru"), ("Available", "No")]),
            ],
        )
    }
}
