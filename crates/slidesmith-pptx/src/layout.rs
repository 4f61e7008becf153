//! Slide layouts and placeholder roles.
//!
//! A presentation carries a fixed catalog of layouts; adding a slide clones
//! the chosen layout's placeholder set onto the new slide. Placeholder
//! lookup is role-based (structural type metadata), with display-name
//! substring matching kept only as a fallback for foreign files.

/// Semantic role of a placeholder, from its OOXML `type` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderRole {
    /// Title placeholder
    Title,

    /// Center title (title slides)
    CenterTitle,

    /// Subtitle
    Subtitle,

    /// Body text
    Body,

    /// Generic content (no type attribute in OOXML)
    Object,

    /// Date/time
    DateTime,

    /// Footer
    Footer,

    /// Slide number
    SlideNumber,

    /// Picture
    Picture,

    /// Other/custom
    Other,
}

impl PlaceholderRole {
    /// OOXML `type` attribute value; `None` means the attribute is omitted
    pub fn ooxml_type(&self) -> Option<&'static str> {
        match self {
            Self::Title => Some("title"),
            Self::CenterTitle => Some("ctrTitle"),
            Self::Subtitle => Some("subTitle"),
            Self::Body => Some("body"),
            Self::Object => None,
            Self::DateTime => Some("dt"),
            Self::Footer => Some("ftr"),
            Self::SlideNumber => Some("sldNum"),
            Self::Picture => Some("pic"),
            Self::Other => None,
        }
    }

    /// Parse from the OOXML `type` attribute; absent attribute means Object
    pub fn from_ooxml_type(s: Option<&str>) -> Self {
        match s {
            None => Self::Object,
            Some("title") => Self::Title,
            Some("ctrTitle") => Self::CenterTitle,
            Some("subTitle") => Self::Subtitle,
            Some("body") => Self::Body,
            Some("obj") => Self::Object,
            Some("dt") => Self::DateTime,
            Some("ftr") => Self::Footer,
            Some("sldNum") => Self::SlideNumber,
            Some("pic") => Self::Picture,
            Some(_) => Self::Other,
        }
    }

    /// True for roles that carry a slide title
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title | Self::CenterTitle)
    }

    /// True for roles that carry body content
    pub fn is_body_content(&self) -> bool {
        matches!(self, Self::Body | Self::Object)
    }
}

/// Standard layout kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    TitleSlide,
    TitleAndContent,
    SectionHeader,
    TwoContent,
    Comparison,
    TitleOnly,
    Blank,
    ContentWithCaption,
    PictureWithCaption,
}

impl LayoutKind {
    /// OOXML slide layout `type` attribute value
    pub fn ooxml_type(&self) -> &'static str {
        match self {
            Self::TitleSlide => "title",
            Self::TitleAndContent => "obj",
            Self::SectionHeader => "secHead",
            Self::TwoContent => "twoObj",
            Self::Comparison => "twoTxTwoObj",
            Self::TitleOnly => "titleOnly",
            Self::Blank => "blank",
            Self::ContentWithCaption => "objTx",
            Self::PictureWithCaption => "picTx",
        }
    }
}

/// A placeholder template defined by a layout
#[derive(Debug, Clone)]
pub struct PlaceholderSpec {
    /// Placeholder index (`idx` attribute; the title is always 0)
    pub idx: u32,

    /// Semantic role
    pub role: PlaceholderRole,

    /// Display name (e.g. "Content Placeholder 2")
    pub name: String,

    /// Position (x, y) in EMU
    pub position: (i64, i64),

    /// Size (width, height) in EMU
    pub size: (i64, i64),
}

impl PlaceholderSpec {
    /// Create a new placeholder spec
    pub fn new(
        idx: u32,
        role: PlaceholderRole,
        name: impl Into<String>,
        position: (i64, i64),
        size: (i64, i64),
    ) -> Self {
        Self {
            idx,
            role,
            name: name.into(),
            position,
            size,
        }
    }
}

/// A slide layout from the catalog
#[derive(Debug, Clone)]
pub struct SlideLayout {
    /// Layout index (0-based, catalog order)
    pub index: usize,

    /// Layout name
    pub name: String,

    /// Layout kind
    pub kind: LayoutKind,

    /// Placeholders this layout defines
    pub placeholders: Vec<PlaceholderSpec>,
}

impl SlideLayout {
    /// Create a new layout
    pub fn new(index: usize, name: impl Into<String>, kind: LayoutKind) -> Self {
        Self {
            index,
            name: name.into(),
            kind,
            placeholders: Vec::new(),
        }
    }

    fn with_placeholders(mut self, placeholders: Vec<PlaceholderSpec>) -> Self {
        self.placeholders = placeholders;
        self
    }

    /// Get the title placeholder if this layout defines one
    pub fn title_placeholder(&self) -> Option<&PlaceholderSpec> {
        self.placeholders.iter().find(|p| p.role.is_title())
    }

    /// Get the first body-content placeholder if present
    pub fn body_placeholder(&self) -> Option<&PlaceholderSpec> {
        self.placeholders.iter().find(|p| p.role.is_body_content())
    }

    /// Check whether the layout defines a placeholder with the given role
    pub fn has_role(&self, role: PlaceholderRole) -> bool {
        self.placeholders.iter().any(|p| p.role == role)
    }
}

/// The built-in layout catalog.
///
/// Mirrors the conventional default template: index 0 is the title slide,
/// index 1 the standard content slide. Geometry targets a 16:9 surface.
pub fn builtin_layouts() -> Vec<SlideLayout> {
    use LayoutKind::*;
    use PlaceholderRole::*;

    vec![
        SlideLayout::new(0, "Title Slide", TitleSlide).with_placeholders(vec![
            PlaceholderSpec::new(0, CenterTitle, "Title 1", (1_524_000, 1_122_363), (9_144_000, 2_387_600)),
            PlaceholderSpec::new(1, Subtitle, "Subtitle 2", (1_524_000, 3_602_038), (9_144_000, 1_655_762)),
        ]),
        SlideLayout::new(1, "Title and Content", TitleAndContent).with_placeholders(vec![
            PlaceholderSpec::new(0, Title, "Title 1", (838_200, 365_126), (10_515_600, 1_325_563)),
            PlaceholderSpec::new(1, Object, "Content Placeholder 2", (838_200, 1_825_625), (10_515_600, 4_351_338)),
        ]),
        SlideLayout::new(2, "Section Header", SectionHeader).with_placeholders(vec![
            PlaceholderSpec::new(0, Title, "Title 1", (831_850, 1_709_738), (10_515_600, 1_162_050)),
            PlaceholderSpec::new(1, Body, "Text Placeholder 2", (831_850, 2_906_713), (10_515_600, 1_500_187)),
        ]),
        SlideLayout::new(3, "Two Content", TwoContent).with_placeholders(vec![
            PlaceholderSpec::new(0, Title, "Title 1", (838_200, 365_126), (10_515_600, 1_325_563)),
            PlaceholderSpec::new(1, Object, "Content Placeholder 2", (838_200, 1_825_625), (5_181_600, 4_351_338)),
            PlaceholderSpec::new(2, Object, "Content Placeholder 3", (6_172_200, 1_825_625), (5_181_600, 4_351_338)),
        ]),
        SlideLayout::new(4, "Comparison", Comparison).with_placeholders(vec![
            PlaceholderSpec::new(0, Title, "Title 1", (838_200, 365_126), (10_515_600, 1_325_563)),
            PlaceholderSpec::new(1, Body, "Text Placeholder 2", (838_200, 1_681_163), (5_157_787, 823_912)),
            PlaceholderSpec::new(2, Object, "Content Placeholder 3", (838_200, 2_505_075), (5_157_787, 3_684_588)),
            PlaceholderSpec::new(3, Body, "Text Placeholder 4", (6_172_200, 1_681_163), (5_157_787, 823_912)),
            PlaceholderSpec::new(4, Object, "Content Placeholder 5", (6_172_200, 2_505_075), (5_157_787, 3_684_588)),
        ]),
        SlideLayout::new(5, "Title Only", TitleOnly).with_placeholders(vec![
            PlaceholderSpec::new(0, Title, "Title 1", (838_200, 365_126), (10_515_600, 1_325_563)),
        ]),
        SlideLayout::new(6, "Blank", Blank),
        SlideLayout::new(7, "Content with Caption", ContentWithCaption).with_placeholders(vec![
            PlaceholderSpec::new(0, Title, "Title 1", (839_788, 457_200), (3_932_237, 1_600_200)),
            PlaceholderSpec::new(1, Object, "Content Placeholder 2", (5_183_188, 987_425), (6_172_200, 4_873_625)),
            PlaceholderSpec::new(2, Body, "Text Placeholder 3", (839_788, 2_057_400), (3_932_237, 3_811_588)),
        ]),
        SlideLayout::new(8, "Picture with Caption", PictureWithCaption).with_placeholders(vec![
            PlaceholderSpec::new(0, Title, "Title 1", (839_788, 457_200), (3_932_237, 1_600_200)),
            PlaceholderSpec::new(1, Picture, "Picture Placeholder 2", (5_183_188, 987_425), (6_172_200, 4_873_625)),
            PlaceholderSpec::new(2, Body, "Text Placeholder 3", (839_788, 2_057_400), (3_932_237, 3_811_588)),
        ]),
    ]
}
