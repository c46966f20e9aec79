//! Stores a user note inside an event description between two sentinel
//! comments, leaving the rest of the description alone.

pub const NOTE_START: &str = "<!-- BIGASSCALENDAR_NOTE_START -->";
pub const NOTE_END: &str = "<!-- BIGASSCALENDAR_NOTE_END -->";

/// Returns the text between the first start marker and the first end
/// marker that follows it.
pub fn extract(description: &str) -> Option<&str> {
    let start = description.find(NOTE_START)? + NOTE_START.len();
    let len = description[start..].find(NOTE_END)?;
    Some(&description[start..start + len])
}

/// Writes `note` into `description`, replacing an existing note region or
/// appending a new one after a blank line.
pub fn embed(description: &str, note: &str) -> String {
    let section = format!("{NOTE_START}{note}{NOTE_END}");

    if let Some(start) = description.find(NOTE_START)
        && let Some(end) = description.rfind(NOTE_END)
        && end >= start + NOTE_START.len()
    {
        // Greedy: everything from the first start to the last end is the
        // old region
        let mut updated = String::with_capacity(description.len() + note.len());
        updated.push_str(&description[..start]);
        updated.push_str(&section);
        updated.push_str(&description[end + NOTE_END.len()..]);
        return updated;
    }

    // A start marker with no end after it would shadow the new region.
    // Removing one can splice its neighbours into another, so repeat.
    let mut kept = description.replace(NOTE_START, "");
    while kept.contains(NOTE_START) {
        kept = kept.replace(NOTE_START, "");
    }
    if kept.is_empty() {
        section
    } else {
        format!("{kept}\n\n{section}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_returns_none_without_a_marker() {
        assert_eq!(extract(""), None);
        assert_eq!(extract("Quarterly planning, room 4"), None);
        assert_eq!(extract(&format!("only a start {NOTE_START} here")), None);
        assert_eq!(extract(&format!("{NOTE_END} before {NOTE_START}")), None);
    }

    #[test]
    fn it_extracts_a_multiline_note() {
        let description = format!("Agenda\n\n{NOTE_START}line one\nline two{NOTE_END}\ntrailer");
        assert_eq!(extract(&description), Some("line one\nline two"));
    }

    #[test]
    fn it_embeds_into_an_empty_description() {
        let updated = embed("", "hello");
        assert_eq!(updated, format!("{NOTE_START}hello{NOTE_END}"));
        assert_eq!(extract(&updated), Some("hello"));
    }

    #[test]
    fn it_appends_after_existing_content() {
        let updated = embed("Bring slides", "hello");
        assert_eq!(updated, format!("Bring slides\n\n{NOTE_START}hello{NOTE_END}"));
    }

    #[test]
    fn it_replaces_instead_of_accumulating() {
        let once = embed("Bring slides", "a");
        let twice = embed(&once, "b");
        assert_eq!(extract(&twice), Some("b"));
        assert_eq!(twice.matches(NOTE_START).count(), 1);
        assert_eq!(twice.matches(NOTE_END).count(), 1);
        assert!(twice.starts_with("Bring slides\n\n"));
    }

    #[test]
    fn it_replaces_in_place_and_keeps_surrounding_text() {
        let description = format!("before {NOTE_START}old{NOTE_END} after");
        assert_eq!(
            embed(&description, "new"),
            format!("before {NOTE_START}new{NOTE_END} after")
        );
    }

    #[test]
    fn it_round_trips_awkward_descriptions() {
        let descriptions = [
            String::new(),
            "plain".to_string(),
            NOTE_END.to_string(),
            format!("dangling {NOTE_START} start"),
            format!("{NOTE_START}{NOTE_START}x{NOTE_END}{NOTE_END}"),
            format!("{NOTE_END}{NOTE_START}"),
            format!("<!-- BIGASS{NOTE_START}CALENDAR_NOTE_START -->"),
            format!("<!-- BIG<!-- BIGASS{NOTE_START}CALENDAR_NOTE_START -->ASSCALENDAR_NOTE_START -->"),
        ];
        for description in descriptions {
            let updated = embed(&description, "hello");
            assert_eq!(extract(&updated), Some("hello"), "{description:?}");
        }
    }

    #[test]
    fn it_strips_start_markers_formed_by_removal() {
        let updated = embed(&format!("<!-- BIGASS{NOTE_START}CALENDAR_NOTE_START --> x"), "hello");
        assert_eq!(updated.matches(NOTE_START).count(), 1);
        assert_eq!(updated, format!(" x\n\n{NOTE_START}hello{NOTE_END}"));
    }

    #[test]
    fn it_round_trips_an_empty_note() {
        assert_eq!(extract(&embed("text", "")), Some(""));
    }
}
