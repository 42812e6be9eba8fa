//! Prompt template for waypoint sequencing

/// Builds the prompt sent to the language model.
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt asking the model to reorder `waypoints` between `start` and `end`.
    ///
    /// The waypoint list is embedded as a JSON array so names containing
    /// commas or quotes survive intact.
    pub fn sequencing(start: &str, end: &str, waypoints: &[String]) -> String {
        let waypoint_list =
            serde_json::to_string(waypoints).unwrap_or_else(|_| "[]".to_string());

        format!(
            r#"Task: route optimisation for a single trip (travelling salesman style).
Start: {start}
End: {end}
Waypoints: {waypoint_list}

Requirements:
1. Reorder the waypoints so the trip from start to end is logical and avoids backtracking.
2. Keep every waypoint name exactly as given. Do not add, drop, merge or rename any.
3. Put short transport advice for each leg into "analysis" (markdown is fine).
4. Reply with JSON only, no extra text.

Reply format:
{{
    "sortedWaypoints": ["Place A", "Place B"],
    "analysis": "Transport advice..."
}}"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequencing_prompt_embeds_inputs() {
        let waypoints = vec!["Forbidden City".to_string(), "Temple of Heaven".to_string()];
        let prompt = PromptTemplate::sequencing(
            "Beijing Railway Station",
            "Beijing Capital Airport",
            &waypoints,
        );
        assert!(prompt.contains("Start: Beijing Railway Station"));
        assert!(prompt.contains("End: Beijing Capital Airport"));
        assert!(prompt.contains(r#"Waypoints: ["Forbidden City","Temple of Heaven"]"#));
        assert!(prompt.contains("\"sortedWaypoints\""));
        assert!(prompt.contains("\"analysis\""));
    }

    #[test]
    fn test_sequencing_prompt_escapes_names() {
        let waypoints = vec![r#"Joe's "Diner""#.to_string()];
        let prompt = PromptTemplate::sequencing("A", "B", &waypoints);
        assert!(prompt.contains(r#"["Joe's \"Diner\""]"#));
    }

    #[test]
    fn test_sequencing_prompt_with_no_waypoints() {
        let prompt = PromptTemplate::sequencing("A", "B", &[]);
        assert!(prompt.contains("Waypoints: []"));
    }
}
