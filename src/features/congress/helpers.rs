use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;

use crate::features::bills::{BillRecord, DetailedBillRecord};
use crate::features::categorize::KeywordCategorizer;

/// Maps one entry of the upstream `bills` array. Returns `None` only when the
/// entry carries no usable bill number; every other missing field degrades to
/// an absent value.
pub(super) fn map_bill(
    entry: &Value,
    categorizer: &KeywordCategorizer,
    now: DateTime<Utc>,
) -> Option<BillRecord> {
    let id = value_to_string(entry.get("billNumber"))?;
    let title = value_to_string(entry.get("title")).unwrap_or_default();
    let summary = nested_string(entry, &["summary", "text"]);
    let sponsor = nested_string(entry, &["sponsor", "name"]);
    let status = nested_string(entry, &["latestAction", "text"]);
    let introduced_date = entry
        .get("introducedDate")
        .and_then(Value::as_str)
        .and_then(parse_bill_date);
    let category = categorizer.categorize_title(&title);

    Some(BillRecord {
        id,
        title,
        summary,
        sponsor,
        status,
        introduced_date,
        last_updated: now,
        category,
    })
}

pub(super) fn map_detail(
    entry: &Value,
    categorizer: &KeywordCategorizer,
    now: DateTime<Utc>,
) -> Option<DetailedBillRecord> {
    let bill = map_bill(entry, categorizer, now)?;

    let full_text_url = entry
        .get("textVersions")
        .and_then(Value::as_array)
        .and_then(|versions| versions.first())
        .and_then(|version| version.get("url"))
        .and_then(Value::as_str)
        .map(|url| url.to_string());

    let actions = entry
        .get("actions")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    Some(DetailedBillRecord {
        bill,
        full_text_url,
        actions,
    })
}

pub(super) fn parse_bill_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    // get() keeps a byte index inside a multi-byte character from panicking;
    // the full string then simply fails to parse.
    let iso = trimmed.get(..10).unwrap_or(trimmed);

    NaiveDate::parse_from_str(iso, "%Y-%m-%d").ok()
}

fn nested_string(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(key)?;
    }

    current.as_str().map(str::trim).filter(|text| !text.is_empty()).map(str::to_string)
}

fn value_to_string(value: Option<&Value>) -> Option<String> {
    value.and_then(|item| {
        if let Some(text) = item.as_str() {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        } else if let Some(number) = item.as_i64() {
            Some(number.to_string())
        } else if let Some(number) = item.as_u64() {
            Some(number.to_string())
        } else {
            // Upstream occasionally encodes bill numbers as floats; an
            // integral float is still a usable key.
            item.as_f64()
                .filter(|number| number.fract() == 0.0)
                .map(|number| (number as i64).to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;
    use serde_json::json;

    use crate::features::bills::Category;

    #[test]
    fn maps_a_fully_populated_entry() {
        let entry = json!({
            "billNumber": "hr-1234",
            "title": "Clean Energy Investment Act",
            "summary": {"text": "Funds renewable energy projects."},
            "sponsor": {"name": "Rep. Example"},
            "latestAction": {"text": "Referred to committee"},
            "introducedDate": "2024-03-15"
        });

        let record = map_bill(&entry, &KeywordCategorizer::new(), Utc::now()).expect("record");
        assert_eq!(record.id, "hr-1234");
        assert_eq!(record.title, "Clean Energy Investment Act");
        assert_eq!(
            record.summary.as_deref(),
            Some("Funds renewable energy projects.")
        );
        assert_eq!(record.sponsor.as_deref(), Some("Rep. Example"));
        assert_eq!(record.status.as_deref(), Some("Referred to committee"));
        assert_eq!(
            record.introduced_date,
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(record.category, Category::Environment);
    }

    #[test]
    fn missing_nested_fields_become_absent_values() {
        let entry = json!({
            "billNumber": "s-99",
            "title": "An Act"
        });

        let record = map_bill(&entry, &KeywordCategorizer::new(), Utc::now()).expect("record");
        assert!(record.summary.is_none());
        assert!(record.sponsor.is_none());
        assert!(record.status.is_none());
        assert!(record.introduced_date.is_none());
        assert_eq!(record.category, Category::Other);
    }

    #[test]
    fn unparseable_date_yields_absent_introduced_date() {
        let entry = json!({
            "billNumber": "s-100",
            "title": "Budget Act",
            "introducedDate": "15 March 2024"
        });

        let record = map_bill(&entry, &KeywordCategorizer::new(), Utc::now()).expect("record");
        assert!(record.introduced_date.is_none());
        assert_eq!(record.category, Category::Economy);
    }

    #[test]
    fn multibyte_date_text_degrades_to_absent_not_a_panic() {
        // A multi-byte character straddling the tenth byte must not abort
        // the record, let alone the batch.
        let entry = json!({
            "billNumber": "s-101",
            "title": "Finance Act",
            "introducedDate": "2024-03-1é"
        });

        let record = map_bill(&entry, &KeywordCategorizer::new(), Utc::now()).expect("record");
        assert!(record.introduced_date.is_none());
        assert_eq!(record.id, "s-101");

        assert!(parse_bill_date("2024-03-1é trailing").is_none());
        assert_eq!(
            parse_bill_date("2024-03-15T00:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn entries_without_a_bill_number_are_rejected() {
        let entry = json!({"title": "Orphan Bill"});
        assert!(map_bill(&entry, &KeywordCategorizer::new(), Utc::now()).is_none());
    }

    #[test]
    fn numeric_bill_numbers_are_coerced_to_strings() {
        let entry = json!({"billNumber": 4321, "title": "Numeric Bill"});
        let record = map_bill(&entry, &KeywordCategorizer::new(), Utc::now()).expect("record");
        assert_eq!(record.id, "4321");
    }

    #[test]
    fn integral_float_bill_numbers_are_coerced_to_strings() {
        let entry = json!({"billNumber": 4321.0, "title": "Float Bill"});
        let record = map_bill(&entry, &KeywordCategorizer::new(), Utc::now()).expect("record");
        assert_eq!(record.id, "4321");

        // A fractional number is not a usable key.
        let entry = json!({"billNumber": 43.21, "title": "Fractional Bill"});
        assert!(map_bill(&entry, &KeywordCategorizer::new(), Utc::now()).is_none());
    }

    #[test]
    fn detail_mapping_carries_text_url_and_actions() {
        let entry = json!({
            "billNumber": "hr-7",
            "title": "Veterans Support Act",
            "textVersions": [{"url": "https://example.gov/hr-7.pdf"}],
            "actions": [{"text": "Introduced"}, {"text": "Referred"}]
        });

        let detail = map_detail(&entry, &KeywordCategorizer::new(), Utc::now()).expect("detail");
        assert_eq!(
            detail.full_text_url.as_deref(),
            Some("https://example.gov/hr-7.pdf")
        );
        assert_eq!(detail.actions.len(), 2);
        assert_eq!(detail.bill.category, Category::Security);
    }

    #[test]
    fn detail_mapping_tolerates_missing_extensions() {
        let entry = json!({"billNumber": "hr-8", "title": "Plain Bill"});
        let detail = map_detail(&entry, &KeywordCategorizer::new(), Utc::now()).expect("detail");
        assert!(detail.full_text_url.is_none());
        assert!(detail.actions.is_empty());
    }
}
