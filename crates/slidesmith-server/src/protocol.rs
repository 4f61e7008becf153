//! Request and response records.
//!
//! One request is one operation, tagged by the `operation` field; the
//! response is a flat record carrying a `success` flag, a human-readable
//! message, and whichever operation-specific fields apply. Absent fields
//! are omitted from the serialized form entirely.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_layout_index() -> usize {
    1
}

fn default_placeholder_idx() -> u32 {
    1
}

/// One dispatchable operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Request {
    CreatePresentation,
    OpenPresentation {
        file_path: PathBuf,
    },
    SavePresentation {
        presentation_id: String,
        file_path: PathBuf,
    },
    AddSlide {
        presentation_id: String,
        #[serde(default = "default_layout_index")]
        layout_index: usize,
    },
    SetTitle {
        presentation_id: String,
        slide_index: usize,
        title: String,
    },
    AddBulletPoints {
        presentation_id: String,
        slide_index: usize,
        bullet_points: Vec<String>,
        #[serde(default = "default_placeholder_idx")]
        placeholder_idx: u32,
    },
    AddImage {
        presentation_id: String,
        slide_index: usize,
        image_path: PathBuf,
        left: f64,
        top: f64,
        width: Option<f64>,
        height: Option<f64>,
    },
    AddTable {
        presentation_id: String,
        slide_index: usize,
        rows: usize,
        cols: usize,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    AddShape {
        presentation_id: String,
        slide_index: usize,
        shape_type: String,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    AddChart {
        presentation_id: String,
        slide_index: usize,
        chart_type: String,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        categories: Vec<String>,
        series_names: Vec<String>,
        series_values: Vec<Vec<f64>>,
    },
    ClosePresentation {
        presentation_id: String,
    },
    GenerateFromTemplate {
        content_path: PathBuf,
        design_path: PathBuf,
        output_path: Option<PathBuf>,
    },
}

impl Request {
    /// Operation name for logs.
    pub fn operation_name(&self) -> &'static str {
        match self {
            Self::CreatePresentation => "create_presentation",
            Self::OpenPresentation { .. } => "open_presentation",
            Self::SavePresentation { .. } => "save_presentation",
            Self::AddSlide { .. } => "add_slide",
            Self::SetTitle { .. } => "set_title",
            Self::AddBulletPoints { .. } => "add_bullet_points",
            Self::AddImage { .. } => "add_image",
            Self::AddTable { .. } => "add_table",
            Self::AddShape { .. } => "add_shape",
            Self::AddChart { .. } => "add_chart",
            Self::ClosePresentation { .. } => "close_presentation",
            Self::GenerateFromTemplate { .. } => "generate_from_template",
        }
    }
}

/// The outcome of one operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub success: bool,
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_index: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slide_count: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

impl Response {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            presentation_id: None,
            slide_index: None,
            layout_name: None,
            slide_count: None,
            file_path: None,
            output_path: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            ..Self::ok(message)
        }
    }

    pub fn with_presentation_id(mut self, id: impl Into<String>) -> Self {
        self.presentation_id = Some(id.into());
        self
    }

    pub fn with_slide_index(mut self, index: usize) -> Self {
        self.slide_index = Some(index);
        self
    }

    pub fn with_layout_name(mut self, name: impl Into<String>) -> Self {
        self.layout_name = Some(name.into());
        self
    }

    pub fn with_slide_count(mut self, count: usize) -> Self {
        self.slide_count = Some(count);
        self
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_slide_defaults_to_content_layout() {
        let request: Request = serde_json::from_str(
            r#"{ "operation": "add_slide", "presentation_id": "pres_1" }"#,
        )
        .unwrap();
        match request {
            Request::AddSlide { layout_index, .. } => assert_eq!(layout_index, 1),
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_bullet_points_default_placeholder() {
        let request: Request = serde_json::from_str(
            r#"{
                "operation": "add_bullet_points",
                "presentation_id": "pres_1",
                "slide_index": 0,
                "bullet_points": ["a", "b"]
            }"#,
        )
        .unwrap();
        match request {
            Request::AddBulletPoints { placeholder_idx, bullet_points, .. } => {
                assert_eq!(placeholder_idx, 1);
                assert_eq!(bullet_points, ["a", "b"]);
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_operation_fails_to_parse() {
        let parsed = serde_json::from_str::<Request>(r#"{ "operation": "format_disk" }"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_response_omits_absent_fields() {
        let response = Response::ok("done").with_slide_index(3);
        let wire = serde_json::to_string(&response).unwrap();
        assert!(wire.contains("\"slide_index\":3"), "{wire}");
        assert!(!wire.contains("layout_name"), "{wire}");
        assert!(!wire.contains("output_path"), "{wire}");
    }

    #[test]
    fn test_response_round_trips() {
        let response = Response::ok("created")
            .with_presentation_id("pres_7")
            .with_slide_count(0);
        let wire = serde_json::to_string(&response).unwrap();
        let back: Response = serde_json::from_str(&wire).unwrap();
        assert_eq!(back, response);
    }
}
