//! Content tree classification.
//!
//! The content document is classified into tagged variants once, up front,
//! so the mapper can match exhaustively instead of re-probing raw JSON at
//! every node. Collection keys accept both the English names and the
//! Korean names used by the original course material. No document shape is
//! an error below the root; anything unusable classifies as unrecognized
//! and later renders nothing.

use serde_json::{Map, Value};

use crate::error::{GenError, Result};

/// Keys marking a topic as the deck overview.
const OVERVIEW_KEYS: &[&str] = &["overview", "강의개요"];
/// Keys marking the instructor record inside the overview topic.
const INSTRUCTOR_KEYS: &[&str] = &["instructor", "강사"];
/// Keys holding a term/concept pair list.
const TERM_LIST_KEYS: &[&str] = &["terms", "용어목록"];
/// Keys holding an enumerable item list.
const ITEM_LIST_KEYS: &[&str] = &[
    "kinds",
    "elements",
    "points",
    "components",
    "종류",
    "요소",
    "요점",
    "구성요소",
];

/// A classified content document.
#[derive(Debug, Clone)]
pub struct ContentTree {
    /// Deck title from the root `title` field, empty when absent.
    pub title: String,

    /// Core-property overrides from optional root fields.
    pub author: Option<String>,
    pub subject: Option<String>,
    pub comments: Option<String>,

    /// Instructor record found inside the overview topic.
    pub instructor: Option<Instructor>,

    /// Topics in document order.
    pub topics: Vec<Topic>,
}

impl ContentTree {
    /// Classify a raw JSON document.
    ///
    /// The root must be an object carrying a `mainTopics` object; anything
    /// else cannot produce a deck and is rejected here.
    pub fn from_value(root: &Value) -> Result<Self> {
        let map = root
            .as_object()
            .ok_or_else(|| GenError::invalid_content("content root must be a JSON object"))?;
        let main = map
            .get("mainTopics")
            .ok_or_else(|| GenError::invalid_content("content root is missing mainTopics"))?
            .as_object()
            .ok_or_else(|| GenError::invalid_content("mainTopics must be a JSON object"))?;

        let mut instructor = None;
        let mut topics = Vec::with_capacity(main.len());
        for (key, value) in main {
            if instructor.is_none() && OVERVIEW_KEYS.contains(&key.as_str()) {
                instructor = find_instructor(value);
            }
            topics.push(Topic {
                key: key.clone(),
                content: classify_topic(value),
            });
        }

        Ok(Self {
            title: str_value(map.get("title")).unwrap_or_default(),
            author: str_value(map.get("author")),
            subject: str_value(map.get("subject")),
            comments: str_value(map.get("comments")),
            instructor,
            topics,
        })
    }
}

/// Instructor record from the overview topic. Either field may be
/// missing; the subtitle still renders two lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Instructor {
    pub name: Option<String>,
    pub title: Option<String>,
}

/// One `mainTopics` entry.
#[derive(Debug, Clone)]
pub struct Topic {
    pub key: String,
    pub content: TopicContent,
}

#[derive(Debug, Clone)]
pub enum TopicContent {
    /// A mapping of subtopic name to node; one slide per subtopic.
    Subtopics(Vec<Subtopic>),
    /// An ordered item list; renders as a bullet slide.
    Sequence(Vec<Item>),
    /// Anything else; the topic renders as a bare title slide.
    Unrecognized,
}

/// One subtopic node.
#[derive(Debug, Clone)]
pub struct Subtopic {
    pub key: String,

    /// Explicit `title` field when the node is a mapping carrying one.
    pub title: Option<String>,

    pub body: SubtopicBody,
}

impl Subtopic {
    /// Slide title: the node's own title field, else the subtopic key.
    pub fn slide_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }
}

#[derive(Debug, Clone)]
pub enum SubtopicBody {
    /// Term/concept pairs, rendered as a two-column table.
    TermList(Vec<TermPair>),
    /// Enumerable items, rendered as bullets.
    Items(Vec<Item>),
    /// A free-form paragraph.
    Description(String),
    /// The node itself was a plain list.
    PlainList(Vec<Item>),
    /// Nothing renderable.
    Unrecognized,
}

/// One row of a term table. A pair missing either side keeps its row but
/// renders no text.
#[derive(Debug, Clone, PartialEq)]
pub struct TermPair {
    pub term: Option<String>,
    pub concept: Option<String>,
}

/// One bullet-list entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// Carries both `number` and `title`.
    Numbered { number: String, title: String },
    /// Carries `title` and optionally `description`.
    Titled {
        title: String,
        description: Option<String>,
    },
    /// Carries `name` and optionally `description`.
    Named {
        name: String,
        description: Option<String>,
    },
    /// A plain string.
    Text(String),
    /// Unusable shape, dropped from every rendering.
    Skipped,
}

impl Item {
    /// Bullet text for subtopic item lists.
    pub fn bullet_label(&self) -> Option<String> {
        match self {
            Self::Numbered { number, title } => Some(format!("{number}. {title}")),
            Self::Titled { title, description } => Some(join_description(title, description)),
            Self::Named { name, description } => Some(join_description(name, description)),
            Self::Text(text) => Some(text.clone()),
            Self::Skipped => None,
        }
    }

    /// Bullet text for sequence topics, which use the bare title or name
    /// and ignore numbers and descriptions.
    pub fn sequence_label(&self) -> Option<String> {
        match self {
            Self::Numbered { title, .. } | Self::Titled { title, .. } => Some(title.clone()),
            Self::Named { name, .. } => Some(name.clone()),
            Self::Text(text) => Some(text.clone()),
            Self::Skipped => None,
        }
    }
}

fn join_description(head: &str, description: &Option<String>) -> String {
    match description {
        Some(desc) => format!("{head}: {desc}"),
        None => head.to_string(),
    }
}

fn classify_topic(value: &Value) -> TopicContent {
    match value {
        Value::Object(map) => TopicContent::Subtopics(
            map.iter()
                .map(|(key, node)| classify_subtopic(key, node))
                .collect(),
        ),
        Value::Array(items) => TopicContent::Sequence(items.iter().map(classify_item).collect()),
        _ => TopicContent::Unrecognized,
    }
}

fn classify_subtopic(key: &str, value: &Value) -> Subtopic {
    match value {
        Value::Object(map) => Subtopic {
            key: key.to_string(),
            title: str_value(map.get("title")),
            body: classify_body(map),
        },
        Value::Array(items) => Subtopic {
            key: key.to_string(),
            title: None,
            body: SubtopicBody::PlainList(items.iter().map(classify_item).collect()),
        },
        _ => Subtopic {
            key: key.to_string(),
            title: None,
            body: SubtopicBody::Unrecognized,
        },
    }
}

/// Body precedence: term list, then item list, then description.
fn classify_body(map: &Map<String, Value>) -> SubtopicBody {
    if let Some(Value::Array(pairs)) = get_any(map, TERM_LIST_KEYS) {
        return SubtopicBody::TermList(pairs.iter().map(classify_term_pair).collect());
    }
    if let Some(Value::Array(items)) = get_any(map, ITEM_LIST_KEYS) {
        return SubtopicBody::Items(items.iter().map(classify_item).collect());
    }
    if let Some(description) = str_value(map.get("description")) {
        return SubtopicBody::Description(description);
    }
    SubtopicBody::Unrecognized
}

fn classify_term_pair(value: &Value) -> TermPair {
    match value.as_object() {
        Some(map) => TermPair {
            term: str_field(map, &["term", "용어"]),
            concept: str_field(map, &["concept", "개념"]),
        },
        None => TermPair {
            term: None,
            concept: None,
        },
    }
}

/// Item precedence: number+title, then title, then name, then raw string.
fn classify_item(value: &Value) -> Item {
    match value {
        Value::String(text) => Item::Text(text.clone()),
        Value::Object(map) => {
            let title = str_value(map.get("title"));
            let number = map.get("number").and_then(scalar_string);
            let description = str_value(map.get("description"));
            match (number, title) {
                (Some(number), Some(title)) => Item::Numbered { number, title },
                (_, Some(title)) => Item::Titled { title, description },
                _ => match str_value(map.get("name")) {
                    Some(name) => Item::Named { name, description },
                    None => Item::Skipped,
                },
            }
        }
        _ => Item::Skipped,
    }
}

fn find_instructor(topic: &Value) -> Option<Instructor> {
    let record = get_any(topic.as_object()?, INSTRUCTOR_KEYS)?.as_object()?;
    Some(Instructor {
        name: str_field(record, &["name", "이름"]),
        title: str_field(record, &["title", "role", "직함"]),
    })
}

fn get_any<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| map.get(*key))
}

fn str_field(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| str_value(map.get(*key)))
}

fn str_value(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_must_be_an_object() {
        let err = ContentTree::from_value(&json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("JSON object"), "{err}");
    }

    #[test]
    fn test_main_topics_is_required() {
        let err = ContentTree::from_value(&json!({ "title": "Deck" })).unwrap_err();
        assert!(err.to_string().contains("mainTopics"), "{err}");
    }

    #[test]
    fn test_topics_keep_document_order() {
        let tree = ContentTree::from_value(&json!({
            "title": "Deck",
            "mainTopics": { "zeta": {}, "alpha": {}, "mid": {} }
        }))
        .unwrap();
        let keys: Vec<&str> = tree.topics.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_instructor_found_under_korean_keys() {
        let tree = ContentTree::from_value(&json!({
            "title": "강의",
            "mainTopics": {
                "강의개요": {
                    "강사": { "이름": "김철수", "직함": "교수" }
                }
            }
        }))
        .unwrap();
        let instructor = tree.instructor.expect("instructor should be found");
        assert_eq!(instructor.name.as_deref(), Some("김철수"));
        assert_eq!(instructor.title.as_deref(), Some("교수"));
    }

    #[test]
    fn test_instructor_role_key_accepted() {
        let tree = ContentTree::from_value(&json!({
            "mainTopics": {
                "overview": {
                    "instructor": { "name": "Kim", "role": "Professor" }
                }
            }
        }))
        .unwrap();
        let instructor = tree.instructor.expect("instructor should be found");
        assert_eq!(instructor.title.as_deref(), Some("Professor"));
    }

    #[test]
    fn test_overview_without_instructor() {
        let tree = ContentTree::from_value(&json!({
            "mainTopics": { "overview": { "goal": { "description": "learn" } } }
        }))
        .unwrap();
        assert_eq!(tree.instructor, None);
    }

    #[test]
    fn test_term_list_takes_precedence_over_description() {
        let tree = ContentTree::from_value(&json!({
            "mainTopics": {
                "topic": {
                    "vocab": {
                        "용어목록": [{ "용어": "EMU", "개념": "unit" }],
                        "description": "ignored"
                    }
                }
            }
        }))
        .unwrap();
        let TopicContent::Subtopics(subs) = &tree.topics[0].content else {
            panic!("expected subtopics");
        };
        match &subs[0].body {
            SubtopicBody::TermList(pairs) => {
                assert_eq!(pairs[0].term.as_deref(), Some("EMU"));
                assert_eq!(pairs[0].concept.as_deref(), Some("unit"));
            }
            other => panic!("expected term list, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_list_subtopic() {
        let tree = ContentTree::from_value(&json!({
            "mainTopics": { "topic": { "steps": ["one", "two"] } }
        }))
        .unwrap();
        let TopicContent::Subtopics(subs) = &tree.topics[0].content else {
            panic!("expected subtopics");
        };
        match &subs[0].body {
            SubtopicBody::PlainList(items) => {
                assert_eq!(items[0], Item::Text("one".to_string()));
            }
            other => panic!("expected plain list, got {other:?}"),
        }
    }

    #[test]
    fn test_number_and_title_classify_as_numbered() {
        let item = classify_item(&json!({ "number": 2, "title": "Finish" }));
        assert_eq!(
            item,
            Item::Numbered {
                number: "2".to_string(),
                title: "Finish".to_string()
            }
        );
        assert_eq!(item.bullet_label().as_deref(), Some("2. Finish"));
        assert_eq!(item.sequence_label().as_deref(), Some("Finish"));
    }

    #[test]
    fn test_title_with_description_joins_with_colon() {
        let item = classify_item(&json!({ "title": "Setup", "description": "do X" }));
        assert_eq!(item.bullet_label().as_deref(), Some("Setup: do X"));
        assert_eq!(item.sequence_label().as_deref(), Some("Setup"));
    }

    #[test]
    fn test_unusable_item_is_skipped() {
        assert_eq!(classify_item(&json!(42)), Item::Skipped);
        assert_eq!(classify_item(&json!({ "foo": "bar" })), Item::Skipped);
        assert_eq!(classify_item(&json!(null)), Item::Skipped);
    }

    #[test]
    fn test_string_number_is_kept_verbatim() {
        let item = classify_item(&json!({ "number": "03", "title": "Wrap up" }));
        assert_eq!(item.bullet_label().as_deref(), Some("03. Wrap up"));
    }

    #[test]
    fn test_malformed_term_pair_keeps_placeholders() {
        let pair = classify_term_pair(&json!({ "term": "only term" }));
        assert_eq!(pair.term.as_deref(), Some("only term"));
        assert_eq!(pair.concept, None);
        let not_a_pair = classify_term_pair(&json!("loose string"));
        assert_eq!(not_a_pair.term, None);
    }
}
