//! Routing of raw events to normalization handlers.
//!
//! Dispatch is evaluated top-to-bottom, first match wins: category strings
//! overlap in meaning with event-name substrings (a payment event may well
//! mention "user" in its name), so the order below is part of the contract.

/// Target handler for a raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventClass {
    Payment,
    User,
    QuoteAcceptance,
    Request,
    Provider,
    Category,
    Zone,
}

const REQUEST_WORDS: &[&str] = &["request", "order", "solicitud", "pedido"];
const LIFECYCLE_WORDS: &[&str] = &["created", "deactivated", "updated"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Decide which handler applies, comparing case-insensitively.
///
/// Returns `None` for events no handler matches; callers log and drop those.
pub fn classify(category: &str, name: &str) -> Option<EventClass> {
    let category = category.trim().to_lowercase();
    let name = name.trim().to_lowercase();

    if category == "payment" {
        return Some(EventClass::Payment);
    }

    if category == "user" || name.contains("user") || name.contains("usuario") {
        return Some(EventClass::User);
    }

    if category == "quote" && name.contains("accepted") {
        return Some(EventClass::QuoteAcceptance);
    }

    if category == "request" || contains_any(&name, REQUEST_WORDS) {
        return Some(EventClass::Request);
    }

    // Alternate producer naming the same domain concept.
    if category == "pago" {
        return Some(EventClass::Payment);
    }

    if category == "provider" || (name.contains("provider") && contains_any(&name, LIFECYCLE_WORDS))
    {
        return Some(EventClass::Provider);
    }

    if category == "category" || (name.contains("category") && contains_any(&name, LIFECYCLE_WORDS))
    {
        return Some(EventClass::Category);
    }

    if category == "zone" || name.contains("zone") {
        return Some(EventClass::Zone);
    }

    None
}
