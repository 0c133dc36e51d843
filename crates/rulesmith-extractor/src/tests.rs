//! Integration tests for the extraction pipeline

#[cfg(test)]
mod tests {
    use crate::{Document, DocumentFormat, ExtractorConfig, ExtractorError, Pipeline};
    use rulesmith_domain::{NoopObserver, Rule};
    use rulesmith_llm::MockProvider;

    fn small_chunks() -> ExtractorConfig {
        ExtractorConfig {
            chunk_size: 40,
            chunk_overlap: 10,
            renumber_ids: false,
        }
    }

    fn rules_json(rules: &[(&str, &str, &str)]) -> String {
        let entries: Vec<_> = rules
            .iter()
            .map(|(id, rule, fix)| {
                serde_json::json!({"rule_id": id, "rule": rule, "suggested_fix": fix})
            })
            .collect();
        serde_json::json!({ "rules": entries }).to_string()
    }

    #[test]
    fn test_full_extraction_flow() {
        let llm = MockProvider::new(r#"{"rules": []}"#);
        llm.push_response(rules_json(&[
            ("R001", "Use snake_case for functions", "Rename the function"),
            ("R002", "Keep functions short", "Split long functions"),
        ]));
        llm.push_response(format!(
            "Sure! Here you go:\n```json\n{}\n```",
            rules_json(&[
                ("R101", "KEEP FUNCTIONS SHORT", "Different fix"),
                ("R102", "Document public items", "Add a doc comment"),
            ])
        ));

        let pipeline = Pipeline::new(llm.clone(), small_chunks()).unwrap();
        let document = Document::from_text(
            "style.txt",
            "Functions use snake_case.\n\nKeep them short.\tDocument every public item, please.",
        );

        let report = pipeline.run(&document, &mut NoopObserver).unwrap();

        assert_eq!(
            report.rules.rules(),
            &[
                Rule::new("R001", "Use snake_case for functions", "Rename the function"),
                Rule::new("R002", "Keep functions short", "Split long functions"),
                Rule::new("R102", "Document public items", "Add a doc comment"),
            ]
        );
        assert_eq!(report.metadata.candidate_count, 4);
        assert_eq!(report.metadata.chunk_count, llm.call_count());
    }

    #[test]
    fn test_chunks_sent_in_order_with_id_prefixes() {
        let llm = MockProvider::new(r#"{"rules": []}"#);
        let pipeline = Pipeline::new(llm.clone(), ExtractorConfig::default()).unwrap();

        let text = "w".repeat(1700);
        pipeline.run_text("long.txt", &text, &mut NoopObserver);

        let prompts = llm.prompts();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].contains("\"R001\""));
        assert!(prompts[1].contains("\"R101\""));
        assert!(prompts[2].contains("\"R201\""));
        assert!(prompts[2].contains(&"w".repeat(400)));
        assert!(!prompts[2].contains(&"w".repeat(401)));
    }

    #[test]
    fn test_all_chunks_empty_yields_empty_rules() {
        let llm = MockProvider::new(r#"{"rules": []}"#);
        let pipeline = Pipeline::new(llm, small_chunks()).unwrap();

        let report = pipeline.run_text("guide.txt", &"No rules in here. ".repeat(10), &mut NoopObserver);

        assert!(report.rules.is_empty());
        assert_eq!(report.metadata.failed_chunks, 0);
        assert_eq!(report.to_json_pretty().unwrap(), "{\n  \"rules\": []\n}");
    }

    #[test]
    fn test_extraction_with_invalid_json() {
        let llm = MockProvider::new("I cannot help with that.");
        let pipeline = Pipeline::new(llm, small_chunks()).unwrap();

        let report = pipeline.run_text("guide.txt", &"Some text. ".repeat(11), &mut NoopObserver);

        assert!(report.rules.is_empty());
        assert!(report.metadata.chunk_count > 1);
        assert_eq!(report.metadata.failed_chunks, report.metadata.chunk_count);
        assert_eq!(report.to_json_pretty().unwrap(), "{\n  \"rules\": []\n}");
    }

    #[test]
    fn test_failed_chunk_does_not_abort_run() {
        let llm = MockProvider::new(r#"{"rules": []}"#);
        llm.push_error();
        llm.push_response(rules_json(&[("R101", "Prefer iterators", "Replace the index loop")]));

        let pipeline = Pipeline::new(llm.clone(), small_chunks()).unwrap();
        let report = pipeline.run_text("guide.txt", &"Iterate with iterators. ".repeat(4), &mut NoopObserver);

        assert!(llm.call_count() >= 2);
        assert_eq!(report.metadata.failed_chunks, 1);
        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.rules.rules()[0].rule_id, "R101");
    }

    #[test]
    fn test_entries_without_rule_text_dropped() {
        let llm = MockProvider::new(r#"{"rules": [{"rule_id": "R001", "suggested_fix": "orphan"}, {"rule": ""}, {"rule": "Real rule"}]}"#);
        let pipeline = Pipeline::new(llm, ExtractorConfig::default()).unwrap();

        let report = pipeline.run_text("guide.txt", "short", &mut NoopObserver);

        assert_eq!(report.rules.len(), 1);
        assert_eq!(report.rules.rules()[0].rule, "Real rule");
    }

    #[test]
    fn test_duplicate_ids_kept_without_renumbering() {
        let llm = MockProvider::new(rules_json(&[("R001", "Same id", "")]));
        llm.push_response(rules_json(&[("R001", "First", "")]));

        let pipeline = Pipeline::new(llm, small_chunks()).unwrap();
        let report = pipeline.run_text("guide.txt", &"a b c d e ".repeat(6), &mut NoopObserver);

        let ids: Vec<_> = report.rules.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["R001", "R001"]);
    }

    #[test]
    fn test_renumber_ids() {
        let llm = MockProvider::new(rules_json(&[("R001", "Same id", "")]));
        llm.push_response(rules_json(&[("R001", "First", "")]));

        let config = ExtractorConfig {
            renumber_ids: true,
            ..small_chunks()
        };
        let pipeline = Pipeline::new(llm, config).unwrap();
        let report = pipeline.run_text("guide.txt", &"a b c d e ".repeat(6), &mut NoopObserver);

        let ids: Vec<_> = report.rules.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["R001", "R002"]);
        assert_eq!(report.rules.rules()[0].rule, "First");
    }

    #[test]
    fn test_unsupported_input_aborts_before_extraction() {
        let llm = MockProvider::default();
        let pipeline = Pipeline::new(llm.clone(), ExtractorConfig::default()).unwrap();
        let document = Document::from_bytes("bad.txt", DocumentFormat::Text, vec![0xc3, 0x28]);

        let result = pipeline.run(&document, &mut NoopObserver);

        assert!(matches!(result, Err(ExtractorError::UnsupportedInput(_))));
        assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn test_progress_reaches_done() {
        let llm = MockProvider::new(r#"{"rules": []}"#);
        let pipeline = Pipeline::new(llm, small_chunks()).unwrap();

        let mut last = 0u8;
        let mut monotonic = true;
        let mut observer = |percent: u8, _label: &str| {
            monotonic &= percent >= last;
            last = percent;
        };
        pipeline.run_text("guide.txt", &"text ".repeat(50), &mut observer);

        assert!(monotonic);
        assert_eq!(last, 100);
    }
}
