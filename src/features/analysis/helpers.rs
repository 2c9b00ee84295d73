use crate::features::analysis::dto::BillAnalysis;
use crate::features::bills::Category;

/// Labels requested from the model, in prompt order. Parsing keys on these
/// labels, never on section position.
const SECTION_LABELS: [&str; 4] = [
    "brief summary",
    "key points",
    "potential impact",
    "stakeholders",
];

pub(super) fn build_summary_prompt(bill_text: &str) -> String {
    format!(
        "Analyse the following bill text. Respond with exactly four labelled \
         sections, each starting on its own line with the label and a colon:\n\
         Brief summary: two or three sentences.\n\
         Key points: the main provisions.\n\
         Potential impact: who or what changes if enacted.\n\
         Stakeholders: the groups most affected.\n\n\
         Bill text:\n{bill_text}"
    )
}

pub(super) fn build_categorize_prompt(title: &str, summary: &str) -> String {
    format!(
        "Categorise this bill into exactly ONE of these categories:\n\
         - Healthcare\n- Education\n- Environment\n- Economy\n- Security\n- Other\n\n\
         Title: {title}\nSummary: {summary}\n\n\
         Return ONLY the category name, nothing else."
    )
}

/// Splits a model response into the four requested sections by label. A
/// label may arrive in any order, prefixed with list markers, or not at all;
/// content belongs to the most recently seen label.
pub(super) fn parse_analysis(response: &str) -> BillAnalysis {
    let mut sections: [Vec<&str>; 4] = [const { Vec::new() }; 4];
    let mut current: Option<usize> = None;

    for line in response.lines() {
        if let Some((index, rest)) = match_label(line) {
            current = Some(index);
            if !rest.is_empty() {
                sections[index].push(rest);
            }
            continue;
        }

        if let Some(index) = current {
            sections[index].push(line);
        }
    }

    let mut parts = sections.into_iter().map(|lines| {
        let text = lines.join("\n").trim().to_string();
        if text.is_empty() { None } else { Some(text) }
    });

    BillAnalysis {
        brief_summary: parts.next().flatten(),
        key_points: parts.next().flatten(),
        potential_impact: parts.next().flatten(),
        stakeholders: parts.next().flatten(),
    }
}

/// Collapses a raw model category answer onto the closed label set. Anything
/// outside the five named categories is `other`; off-contract output is not
/// an error.
pub(super) fn normalise_category_label(raw: &str) -> Category {
    let cleaned = raw
        .trim()
        .trim_end_matches('.')
        .trim()
        .to_lowercase();

    match cleaned.parse::<Category>() {
        Ok(Category::Other) | Err(()) => Category::Other,
        Ok(category) => category,
    }
}

fn match_label(line: &str) -> Option<(usize, &str)> {
    let trimmed = line
        .trim_start()
        .trim_start_matches(['-', '*', '#'])
        .trim_start();

    for (index, label) in SECTION_LABELS.iter().enumerate() {
        if trimmed.len() >= label.len()
            && trimmed.is_char_boundary(label.len())
            && trimmed[..label.len()].eq_ignore_ascii_case(label)
        {
            let rest = trimmed[label.len()..].trim_start_matches(':').trim();
            return Some((index, rest));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_four_labelled_sections() {
        let response = "Brief summary: Expands rural clinics.\n\n\
                        Key points:\n- Grants for clinics\n- Staffing funds\n\n\
                        Potential impact: More coverage in rural counties.\n\n\
                        Stakeholders: Rural patients and providers.";

        let analysis = parse_analysis(response);
        assert_eq!(
            analysis.brief_summary.as_deref(),
            Some("Expands rural clinics.")
        );
        assert_eq!(
            analysis.key_points.as_deref(),
            Some("- Grants for clinics\n- Staffing funds")
        );
        assert_eq!(
            analysis.potential_impact.as_deref(),
            Some("More coverage in rural counties.")
        );
        assert_eq!(
            analysis.stakeholders.as_deref(),
            Some("Rural patients and providers.")
        );
    }

    #[test]
    fn sections_are_matched_by_label_not_position() {
        let response = "Stakeholders: Teachers.\nBrief summary: A schools bill.";

        let analysis = parse_analysis(response);
        assert_eq!(analysis.brief_summary.as_deref(), Some("A schools bill."));
        assert_eq!(analysis.stakeholders.as_deref(), Some("Teachers."));
        assert!(analysis.key_points.is_none());
        assert!(analysis.potential_impact.is_none());
    }

    #[test]
    fn missing_labels_stay_absent() {
        let analysis = parse_analysis("The model ignored the requested format entirely.");
        assert!(analysis.brief_summary.is_none());
        assert!(analysis.key_points.is_none());
        assert!(analysis.potential_impact.is_none());
        assert!(analysis.stakeholders.is_none());
    }

    #[test]
    fn labels_tolerate_markers_and_case() {
        let response = "## BRIEF SUMMARY: Caps drug prices.\n- key points: Price ceilings.";

        let analysis = parse_analysis(response);
        assert_eq!(analysis.brief_summary.as_deref(), Some("Caps drug prices."));
        assert_eq!(analysis.key_points.as_deref(), Some("Price ceilings."));
    }

    #[test]
    fn category_labels_are_trimmed_and_lowercased() {
        assert_eq!(normalise_category_label("  Healthcare  "), Category::Healthcare);
        assert_eq!(normalise_category_label("ECONOMY."), Category::Economy);
    }

    #[test]
    fn off_contract_labels_collapse_to_other() {
        assert_eq!(normalise_category_label("foreign policy"), Category::Other);
        assert_eq!(normalise_category_label(""), Category::Other);
        assert_eq!(normalise_category_label("other"), Category::Other);
    }
}
