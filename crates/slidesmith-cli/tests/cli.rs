//! Command behavior through the library entry points: generation to disk
//! and the line-delimited serve loop.

use std::io::Cursor;

use serde_json::json;

use slidesmith_cli::{generate_command, serve_command};
use slidesmith_pptx::Presentation;
use slidesmith_server::Response;

fn write_inputs(dir: &std::path::Path) -> (std::path::PathBuf, std::path::PathBuf) {
    let design = dir.join("design_system.json");
    let content = dir.join("slide_content.json");
    std::fs::write(&design, "{}").unwrap();
    std::fs::write(
        &content,
        json!({
            "title": "CLI Deck",
            "mainTopics": {
                "Topic": { "Sub": { "points": ["a", "b"] } }
            }
        })
        .to_string(),
    )
    .unwrap();
    (content, design)
}

mod generate {
    use super::*;

    #[test]
    fn test_generate_writes_the_requested_output() {
        let dir = tempfile::tempdir().unwrap();
        let (content, design) = write_inputs(dir.path());
        let output = dir.path().join("deck.pptx");

        let written = generate_command(&content, &design, Some(&output)).unwrap();
        assert_eq!(written, output);

        let deck = Presentation::open(&output).unwrap();
        assert_eq!(deck.slide_count(), 3);
        assert_eq!(deck.slide(0).unwrap().title().as_deref(), Some("CLI Deck"));
    }

    #[test]
    fn test_generate_missing_content_carries_context() {
        let dir = tempfile::tempdir().unwrap();
        let design = dir.path().join("design_system.json");
        std::fs::write(&design, "{}").unwrap();
        let missing = dir.path().join("nope.json");

        let err = generate_command(&missing, &design, None).unwrap_err();
        let chain = format!("{err:#}");
        assert!(chain.contains("failed to generate deck"), "{chain}");
        assert!(chain.contains("not found"), "{chain}");
    }
}

mod serve {
    use super::*;

    fn run_lines(input: &str) -> Vec<Response> {
        let mut output = Vec::new();
        serve_command(Cursor::new(input.as_bytes()), &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is one response"))
            .collect()
    }

    #[test]
    fn test_one_response_line_per_request_line() {
        let responses = run_lines(
            "{\"operation\":\"create_presentation\"}\n{\"operation\":\"create_presentation\"}\n",
        );
        assert_eq!(responses.len(), 2);
        assert!(responses[0].success);
        assert_eq!(responses[0].presentation_id.as_deref(), Some("pres_1"));
        assert_eq!(responses[1].presentation_id.as_deref(), Some("pres_2"));
    }

    #[test]
    fn test_malformed_line_answers_instead_of_exiting() {
        let responses = run_lines("not json\n{\"operation\":\"create_presentation\"}\n");
        assert_eq!(responses.len(), 2);
        assert!(!responses[0].success);
        assert!(responses[0].message.contains("malformed request"));
        assert!(responses[1].success);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let responses = run_lines("\n   \n{\"operation\":\"create_presentation\"}\n");
        assert_eq!(responses.len(), 1);
        assert!(responses[0].success);
    }

    #[test]
    fn test_sessions_persist_across_the_stream() {
        let input = [
            json!({ "operation": "create_presentation" }).to_string(),
            json!({ "operation": "add_slide", "presentation_id": "pres_1" }).to_string(),
            json!({ "operation": "set_title", "presentation_id": "pres_1",
                    "slide_index": 0, "title": "Streamed" }).to_string(),
        ]
        .join("\n");
        let responses = run_lines(&input);
        assert_eq!(responses.len(), 3);
        assert!(responses.iter().all(|r| r.success));
        assert_eq!(responses[1].layout_name.as_deref(), Some("Title and Content"));
    }
}
