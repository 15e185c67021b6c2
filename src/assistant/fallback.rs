//! Keyword rules used when the completion service cannot answer.

use time::OffsetDateTime;

use crate::restaurant::model::{item_name, item_price};
use crate::restaurant::RestaurantData;

const TOP_BESTSELLERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Timing,
    Location,
    Menu,
    Recommendation,
    Welcome,
}

struct Rule {
    intent: Intent,
    keywords: &'static [&'static str],
    respond: fn(&RestaurantData, OffsetDateTime) -> String,
}

/// Evaluated top to bottom; the first rule with a matching keyword answers.
const RULES: &[Rule] = &[
    Rule {
        intent: Intent::Timing,
        keywords: &["open", "close", "time", "hour", "when"],
        respond: timing_reply,
    },
    Rule {
        intent: Intent::Location,
        keywords: &["where", "location", "address", "phone", "contact"],
        respond: location_reply,
    },
    Rule {
        intent: Intent::Menu,
        keywords: &["menu", "food", "eat", "price", "chicken", "burger"],
        respond: menu_reply,
    },
    Rule {
        intent: Intent::Recommendation,
        keywords: &["recommend", "suggest", "best", "popular", "favorite"],
        respond: recommendation_reply,
    },
];

pub fn classify(question: &str) -> Intent {
    matching_rule(&question.to_lowercase())
        .map(|r| r.intent)
        .unwrap_or(Intent::Welcome)
}

/// Canned answer built from live data.
pub fn respond(question: &str, data: &RestaurantData, now: OffsetDateTime) -> String {
    match matching_rule(&question.to_lowercase()) {
        Some(rule) => (rule.respond)(data, now),
        None => welcome_reply(data, now),
    }
}

fn matching_rule(lowered: &str) -> Option<&'static Rule> {
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| lowered.contains(k)))
}

fn timing_reply(data: &RestaurantData, now: OffsetDateTime) -> String {
    let status = data.is_open_at(now);
    if status.is_open {
        format!(
            "Yes! We're currently OPEN.\n\n📍 Today ({}): {} - {}\n\nWelcome to {}! 🍔",
            status.day,
            status.opens,
            status.closes,
            data.name()
        )
    } else {
        format!(
            "Sorry, we're currently CLOSED.\n\n📍 Today ({}): {} - {}\n\nSee you soon! 🍔",
            status.day, status.opens, status.closes
        )
    }
}

fn location_reply(data: &RestaurantData, _now: OffsetDateTime) -> String {
    format!(
        "📍 **{}**\n\nAddress: {}\nPhone: {}",
        data.name(),
        data.address(),
        data.phone()
    )
}

fn menu_reply(data: &RestaurantData, _now: OffsetDateTime) -> String {
    let categories = data.get_categories();
    if categories.is_empty() {
        return "We have delicious fried chicken, burgers, sides and drinks! 🍔".to_string();
    }
    let list = categories
        .iter()
        .map(|c| format!("• {}", c))
        .collect::<Vec<_>>()
        .join("\n");
    format!("🍔 **Our Menu Categories:**\n\n{}\n\nAsk about any category!", list)
}

fn recommendation_reply(data: &RestaurantData, _now: OffsetDateTime) -> String {
    let best = data.get_bestsellers();
    if best.is_empty() {
        return "Try our signature fried chicken - it's amazing! 🍔".to_string();
    }
    let mut reply = String::from("⭐ **Our Bestsellers:**\n\n");
    for item in best.iter().take(TOP_BESTSELLERS) {
        reply.push_str(&format!("• {} - ${}\n", item_name(item), item_price(item)));
    }
    reply.push_str("\nCustomer favorites! 🍔");
    reply
}

fn welcome_reply(data: &RestaurantData, _now: OffsetDateTime) -> String {
    format!(
        "Welcome to **{}**! 🍔\n\nRating: {} ⭐\n\nAsk me about menu, hours, or location!",
        data.name(),
        data.rating()
    )
}
