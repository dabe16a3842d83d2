use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub title: String,
    pub location: String,
    pub post_date: String,
    pub salary: String,
    pub employer: String,
    pub job_description: String,
    pub job_highlights: String,
    pub url: String,
}

/// Short inline fragments of a listing ("3 days ago", "$40 an hour", "Full-time")
/// with no semantic markup. Classified by content only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailChips(Vec<String>);

impl DetailChips {
    pub fn new(chips: Vec<String>) -> Self {
        DetailChips(chips)
    }

    /// The first chip, when it reads like "N units ago".
    pub fn post_age(&self) -> Option<&str> {
        self.0
            .first()
            .map(|chip| chip.as_str())
            .filter(|chip| chip.contains("ago"))
    }

    pub fn salary(&self) -> Option<&str> {
        self.0
            .iter()
            .map(|chip| chip.as_str())
            .find(|chip| chip.contains("an hour") || chip.contains("a year"))
    }
}

/// Records of the latest run, in extraction order.
#[derive(Debug, Default)]
pub struct ListingCollection {
    run_id: Option<Uuid>,
    query: String,
    records: Vec<ListingRecord>,
}

impl ListingCollection {
    pub fn reset(&mut self, query: &str) -> Uuid {
        let run_id = Uuid::new_v4();
        self.run_id = Some(run_id);
        self.query = query.to_string();
        self.records.clear();
        run_id
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = ListingRecord>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn run_id(&self) -> Option<Uuid> {
        self.run_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chips(values: &[&str]) -> DetailChips {
        DetailChips::new(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn post_age_only_from_first_chip() {
        assert_eq!(chips(&["3 days ago", "Full-time"]).post_age(), Some("3 days ago"));
        assert_eq!(chips(&["Full-time", "3 days ago"]).post_age(), None);
        assert_eq!(chips(&[]).post_age(), None);
    }

    #[test]
    fn salary_is_first_hourly_or_yearly_chip() {
        let c = chips(&["2 days ago", "$40 an hour", "$90,000 a year"]);
        assert_eq!(c.salary(), Some("$40 an hour"));

        assert_eq!(chips(&["2 days ago", "Full-time"]).salary(), None);
        assert_eq!(chips(&["80K–100K a year"]).salary(), Some("80K–100K a year"));
    }

    #[test]
    fn collection_reset_clears_previous_run() {
        let mut collection = ListingCollection::default();
        assert!(collection.run_id().is_none());

        let first = collection.reset("rust developer in Berlin");
        collection.extend(vec![
            ListingRecord {
                title: "Rust Developer".to_string(),
                ..Default::default()
            },
            ListingRecord::default(),
        ]);
        collection.extend(vec![ListingRecord::default()]);
        assert_eq!(collection.records().len(), 3);
        assert_eq!(collection.records()[0].title, "Rust Developer");

        let second = collection.reset("barista in Lisbon");
        assert_ne!(first, second);
        assert!(collection.records().is_empty());
        assert_eq!(collection.query(), "barista in Lisbon");
        assert_eq!(collection.run_id(), Some(second));
    }

    #[test]
    fn record_serializes_with_column_names() {
        let record = ListingRecord {
            post_date: "2024-03-08".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();

        for key in [
            "title",
            "location",
            "post_date",
            "salary",
            "employer",
            "job_description",
            "job_highlights",
            "url",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["post_date"], "2024-03-08");
    }
}
