//! Discharge-plan free-text parsing.
//!
//! Medication and therapy entries arrive as "Name - frequency" free text
//! (e.g., "Metformin - twice daily", "Physio stretching - 3x week").
//! Parsing never fails: malformed text degrades to a single item with the
//! default daily frequency.

/// How often an item is scheduled within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    /// `slots` tasks per day
    Daily { slots: u8 },
    /// One task, only on alternating days (odd day parity)
    AlternatingDays,
}

impl Frequency {
    /// Task slots for a given 1-based day index.
    pub fn slots_on(&self, day: u32) -> u8 {
        match self {
            Frequency::Daily { slots } => *slots,
            Frequency::AlternatingDays => {
                if day % 2 == 1 {
                    1
                } else {
                    0
                }
            }
        }
    }
}

/// One structured item parsed from a free-text plan entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanItem {
    pub name: String,

    pub frequency: Frequency,

    /// The original frequency text (or "daily" when none was present)
    pub label: String,
}

/// Parse one "Name - frequency" entry. Never fails.
pub fn parse_entry(text: &str) -> PlanItem {
    let (name, label) = match text.split_once(" - ") {
        Some((name, label)) => (name.trim(), label.trim()),
        None => (text.trim(), "daily"),
    };
    // Degrade a nameless entry to the whole text rather than dropping it
    let name = if name.is_empty() { text.trim() } else { name };

    PlanItem {
        name: name.to_string(),
        frequency: parse_frequency(label),
        label: label.to_string(),
    }
}

/// Parse a batch of entries, skipping blank lines.
pub fn parse_entries(entries: &[String]) -> Vec<PlanItem> {
    entries
        .iter()
        .filter(|e| !e.trim().is_empty())
        .map(|e| parse_entry(e))
        .collect()
}

/// Keyword-match the frequency text. Weekly forms are checked before daily
/// ones so "3x week" doesn't match the "3x" daily rule.
fn parse_frequency(label: &str) -> Frequency {
    let lower = label.to_lowercase();
    if lower.contains("3x week") || lower.contains("3x/week") {
        Frequency::AlternatingDays
    } else if lower.contains("twice daily") || lower.contains("2x") {
        Frequency::Daily { slots: 2 }
    } else if lower.contains("three times") || lower.contains("3x") {
        Frequency::Daily { slots: 3 }
    } else {
        Frequency::Daily { slots: 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twice_daily_gets_two_slots() {
        let item = parse_entry("Metformin - twice daily");
        assert_eq!(item.name, "Metformin");
        assert_eq!(item.frequency, Frequency::Daily { slots: 2 });
    }

    #[test]
    fn numeric_shorthand() {
        assert_eq!(
            parse_entry("Aspirin - 2x with meals").frequency,
            Frequency::Daily { slots: 2 }
        );
        assert_eq!(
            parse_entry("Insulin - 3x before meals").frequency,
            Frequency::Daily { slots: 3 }
        );
    }

    #[test]
    fn three_times_gets_three_slots() {
        let item = parse_entry("Eye drops - three times daily");
        assert_eq!(item.frequency, Frequency::Daily { slots: 3 });
    }

    #[test]
    fn weekly_form_beats_daily_shorthand() {
        // "3x week" must not fall through to the 3-slot daily rule
        let item = parse_entry("Physio stretching - 3x week");
        assert_eq!(item.frequency, Frequency::AlternatingDays);
    }

    #[test]
    fn alternating_parity() {
        let freq = Frequency::AlternatingDays;
        assert_eq!(freq.slots_on(1), 1);
        assert_eq!(freq.slots_on(2), 0);
        assert_eq!(freq.slots_on(3), 1);
    }

    #[test]
    fn unknown_frequency_defaults_to_one() {
        let item = parse_entry("Lisinopril - at bedtime");
        assert_eq!(item.frequency, Frequency::Daily { slots: 1 });
        assert_eq!(item.label, "at bedtime");
    }

    #[test]
    fn malformed_text_degrades_gracefully() {
        let item = parse_entry("Warfarin");
        assert_eq!(item.name, "Warfarin");
        assert_eq!(item.frequency, Frequency::Daily { slots: 1 });
        assert_eq!(item.label, "daily");
    }

    #[test]
    fn blank_entries_are_skipped() {
        let items = parse_entries(&[
            "Metformin - twice daily".to_string(),
            "   ".to_string(),
            "Warfarin".to_string(),
        ]);
        assert_eq!(items.len(), 2);
    }
}
