use std::fmt::Write as _;

use time::OffsetDateTime;

use super::model::{
    item_name, item_price, Clock, RestaurantData, AVAILABLE, CATEGORY, FEATURE, IS_BESTSELLER,
    IS_SPICY,
};
use super::record::Record;

pub const SECTION_INFO: &str = "📍 RESTAURANT INFO:";
pub const SECTION_STATUS: &str = "🕐 CURRENT STATUS:";
pub const SECTION_WEEKLY: &str = "📅 WEEKLY HOURS:";
pub const SECTION_MEALS: &str = "🍽️ MEAL TIMES:";
pub const SECTION_MENU: &str = "📋 MENU:";
pub const SECTION_FACILITIES: &str = "🏪 FACILITIES:";

const UNCATEGORIZED: &str = "Other";
const PROFILE_HEADLINE_FIELDS: &[&str] = &["Name", "Address", "Phone", "Rating"];

impl RestaurantData {
    pub fn to_context(&self) -> String {
        self.to_context_at(Clock::system().now())
    }

    /// Renders the grounding text for a completion request.
    ///
    /// Sections always appear in the same order and are emitted even when
    /// their body is empty.
    pub fn to_context_at(&self, now: OffsetDateTime) -> String {
        let status = self.is_open_at(now);
        let mut ctx = String::new();

        let _ = writeln!(ctx, "=== {} ===", self.name().to_uppercase());
        ctx.push('\n');

        let _ = writeln!(ctx, "{}", SECTION_INFO);
        let _ = writeln!(ctx, "Name: {}", self.name());
        let _ = writeln!(ctx, "Address: {}", self.address());
        let _ = writeln!(ctx, "Phone: {}", self.phone());
        let _ = writeln!(ctx, "Rating: {} ⭐", self.rating());
        for (field, value) in self.extra_profile_fields() {
            let _ = writeln!(ctx, "{}: {}", field, value);
        }

        ctx.push('\n');
        let _ = writeln!(ctx, "{}", SECTION_STATUS);
        let _ = writeln!(ctx, "Day: {}", status.day);
        let _ = writeln!(ctx, "Time: {}", status.time);
        let _ = writeln!(
            ctx,
            "Status: {}",
            if status.is_open { "🟢 OPEN" } else { "🔴 CLOSED" }
        );
        let _ = writeln!(ctx, "Hours: {} - {}", status.opens, status.closes);

        ctx.push('\n');
        let _ = writeln!(ctx, "{}", SECTION_WEEKLY);
        for t in &self.timings.weekly {
            let icon = if t.is_open() { "🟢" } else { "🔴" };
            let _ = writeln!(ctx, "  {}: {} - {} {}", t.day, t.opens, t.closes, icon);
        }

        ctx.push('\n');
        let _ = writeln!(ctx, "{}", SECTION_MEALS);
        for m in &self.timings.meals {
            let _ = writeln!(ctx, "  {}: {} - {}", m.meal_type, m.start_time, m.end_time);
        }

        ctx.push('\n');
        let _ = writeln!(ctx, "{}", SECTION_MENU);
        for (category, items) in self.menu_by_first_seen_category() {
            let _ = writeln!(ctx, "\n【{}】", category.to_uppercase());
            for item in items {
                let _ = writeln!(ctx, "  • {}", menu_line(item));
            }
        }

        ctx.push('\n');
        let _ = writeln!(ctx, "{}", SECTION_FACILITIES);
        for e in self.available_facilities() {
            let _ = writeln!(ctx, "  ✓ {}", e.get(FEATURE));
        }

        ctx
    }

    fn extra_profile_fields(&self) -> Vec<(&str, &str)> {
        self.info
            .entries()
            .filter(|(k, v)| !PROFILE_HEADLINE_FIELDS.contains(k) && !v.is_empty())
            .collect()
    }

    fn menu_by_first_seen_category(&self) -> Vec<(&str, Vec<&Record>)> {
        let mut groups: Vec<(&str, Vec<&Record>)> = Vec::new();
        for item in &self.menu {
            let category = match item.get(CATEGORY) {
                "" => UNCATEGORIZED,
                c => c,
            };
            match groups.iter_mut().find(|(c, _)| *c == category) {
                Some((_, items)) => items.push(item),
                None => groups.push((category, vec![item])),
            }
        }
        groups
    }
}

fn menu_line(item: &Record) -> String {
    let best = if item.flag(IS_BESTSELLER) { "⭐" } else { "" };
    let spicy = if item.flag(IS_SPICY) { "🌶️" } else { "" };
    let avail = if item.flag(AVAILABLE) { "✅" } else { "❌" };
    format!(
        "{} - ${} {}{} {}",
        item_name(item),
        item_price(item),
        best,
        spicy,
        avail
    )
}
