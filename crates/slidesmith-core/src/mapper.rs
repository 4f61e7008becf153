//! Content-to-layout mapping.
//!
//! Walks a classified [`ContentTree`] against a [`DesignConfig`] and drives
//! the document layer: one title slide, then per topic a title slide plus
//! one slide per subtopic, with sequence topics rendered as a separate
//! bullet slide. No content shape is a hard failure; unrecognized nodes
//! render nothing. Document-layer errors are not caught per node and abort
//! the run.

use std::path::{Path, PathBuf};

use slidesmith_pptx::constants::emu_from_inches;
use slidesmith_pptx::{Alignment, CoreProperties, Presentation, Slide, TextFrame};

use crate::config::{self, DesignConfig};
use crate::content::{ContentTree, Item, Subtopic, SubtopicBody, TermPair, Topic, TopicContent};
use crate::error::Result;

/// Author stamped into decks whose content declares none.
const GENERATED_AUTHOR: &str = "slidesmith";
/// Comment stamped into decks whose content declares none.
const GENERATED_COMMENT: &str = "Generated by slidesmith";

/// Layout index of the opening title slide.
const TITLE_SLIDE_LAYOUT: usize = 0;

/// Renders content trees into presentations under one design.
pub struct Generator<'a> {
    config: &'a DesignConfig,
}

impl<'a> Generator<'a> {
    pub fn new(config: &'a DesignConfig) -> Self {
        Self { config }
    }

    /// Build the full deck for one classified tree.
    pub fn generate(&self, tree: &ContentTree) -> Result<Presentation> {
        let mut pres = Presentation::new();
        self.set_document_properties(&mut pres, tree);
        self.add_title_slide(&mut pres, tree)?;
        for topic in &tree.topics {
            self.add_topic_slides(&mut pres, topic)?;
        }
        log::info!(
            "generated {} slides for \"{}\"",
            pres.slide_count(),
            tree.title
        );
        Ok(pres)
    }

    fn set_document_properties(&self, pres: &mut Presentation, tree: &ContentTree) {
        pres.set_core_properties(CoreProperties {
            title: Some(tree.title.clone()),
            subject: Some(tree.subject.clone().unwrap_or_else(|| tree.title.clone())),
            author: Some(
                tree.author
                    .clone()
                    .unwrap_or_else(|| GENERATED_AUTHOR.to_string()),
            ),
            keywords: None,
            comments: Some(
                tree.comments
                    .clone()
                    .unwrap_or_else(|| GENERATED_COMMENT.to_string()),
            ),
        });
    }

    /// Opening slide: deck title, plus the instructor subtitle when the
    /// overview topic carries one.
    fn add_title_slide(&self, pres: &mut Presentation, tree: &ContentTree) -> Result<()> {
        let index = pres.add_slide(TITLE_SLIDE_LAYOUT)?;
        let slide = pres.slide_mut(index)?;
        slide.set_title(&tree.title)?;
        self.style_title(slide)?;

        if let Some(instructor) = &tree.instructor {
            // Two lines, name over role, even when a field is missing.
            let lines = [
                instructor.name.clone().unwrap_or_default(),
                instructor.title.clone().unwrap_or_default(),
            ];
            match slide.subtitle_placeholder_mut() {
                Some(placeholder) => placeholder.frame = TextFrame::from_lines(lines),
                None => {
                    let (position, size) = box_emu(2.0, 3.0, 6.0, 1.0);
                    let textbox = slide.add_textbox(position, size, "");
                    textbox.frame = TextFrame::from_lines(lines);
                    textbox
                        .frame
                        .apply_format(&self.config.slide_text_settings.body_format(Alignment::Center));
                }
            }
        }
        Ok(())
    }

    /// One slide titled with the topic key, then the topic's own slides.
    fn add_topic_slides(&self, pres: &mut Presentation, topic: &Topic) -> Result<()> {
        let index = pres.add_slide(self.default_layout())?;
        let slide = pres.slide_mut(index)?;
        slide.set_title(&topic.key)?;
        self.style_title(slide)?;

        match &topic.content {
            TopicContent::Subtopics(subtopics) => {
                for subtopic in subtopics {
                    self.add_subtopic_slide(pres, subtopic)?;
                }
            }
            TopicContent::Sequence(items) => self.add_sequence_slide(pres, &topic.key, items)?,
            TopicContent::Unrecognized => {}
        }
        Ok(())
    }

    /// A sequence topic repeats its title on a second slide and renders
    /// one bullet per usable item. Bullets go into the body placeholder
    /// only; a layout without one renders nothing.
    fn add_sequence_slide(
        &self,
        pres: &mut Presentation,
        title: &str,
        items: &[Item],
    ) -> Result<()> {
        let index = pres.add_slide(self.default_layout())?;
        let slide = pres.slide_mut(index)?;
        slide.set_title(title)?;
        self.style_title(slide)?;

        let lines: Vec<String> = items.iter().filter_map(Item::sequence_label).collect();
        if lines.is_empty() {
            return Ok(());
        }
        if let Some(placeholder) = slide.body_placeholder_mut() {
            placeholder.frame =
                TextFrame::bullet_list(lines, Some(self.config.slide_text_settings.line_spacing));
        }
        Ok(())
    }

    fn add_subtopic_slide(&self, pres: &mut Presentation, subtopic: &Subtopic) -> Result<()> {
        let index = pres.add_slide(self.default_layout())?;
        let slide = pres.slide_mut(index)?;
        slide.set_title(subtopic.slide_title())?;
        self.style_title(slide)?;

        match &subtopic.body {
            SubtopicBody::TermList(pairs) => self.add_term_table(slide, pairs)?,
            SubtopicBody::Items(items) | SubtopicBody::PlainList(items) => {
                self.add_bullets(slide, items)
            }
            SubtopicBody::Description(text) => self.add_description(slide, text),
            SubtopicBody::Unrecognized => {}
        }
        Ok(())
    }

    /// Two-column term table with a header row and one row per pair.
    /// Pairs missing either side keep their row but stay empty.
    fn add_term_table(&self, slide: &mut Slide, pairs: &[TermPair]) -> Result<()> {
        let style = &self.config.table_styles.default;
        let (position, size) = box_emu(1.0, 2.0, 8.0, 4.5);
        let table = slide.add_table(pairs.len() + 1, 2, position, size)?;

        table.set_cell_text(0, 0, "Term")?;
        table.set_cell_text(0, 1, "Concept")?;
        let header = style.header_cell_format();
        table.format_cell(0, 0, &header)?;
        table.format_cell(0, 1, &header)?;

        let body = style.body_cell_format();
        for (row, pair) in pairs.iter().enumerate() {
            if let (Some(term), Some(concept)) = (&pair.term, &pair.concept) {
                table.set_cell_text(row + 1, 0, term.as_str())?;
                table.set_cell_text(row + 1, 1, concept.as_str())?;
                table.format_cell(row + 1, 0, &body)?;
                table.format_cell(row + 1, 1, &body)?;
            }
        }
        table.set_column_ratios(&style.column_width_ratio);
        Ok(())
    }

    /// Shared bullet rendering: body placeholder first, then a left-aligned
    /// textbox when the layout offers none.
    fn add_bullets(&self, slide: &mut Slide, items: &[Item]) {
        let lines: Vec<String> = items.iter().filter_map(Item::bullet_label).collect();
        if lines.is_empty() {
            return;
        }
        let settings = &self.config.slide_text_settings;
        match slide.body_placeholder_mut() {
            Some(placeholder) => {
                placeholder.frame = TextFrame::bullet_list(lines, Some(settings.line_spacing));
            }
            None => {
                let (position, size) = box_emu(1.0, 2.0, 8.0, 4.0);
                let textbox = slide.add_textbox(position, size, "");
                textbox.frame = TextFrame::from_lines(lines);
                textbox
                    .frame
                    .apply_format(&settings.body_format(Alignment::Left));
            }
        }
    }

    fn add_description(&self, slide: &mut Slide, text: &str) {
        match slide.body_placeholder_mut() {
            Some(placeholder) => placeholder.frame.set_text(text),
            None => {
                let (position, size) = box_emu(1.0, 2.0, 8.0, 4.0);
                let textbox = slide.add_textbox(position, size, text);
                textbox.frame.apply_format(
                    &self
                        .config
                        .slide_text_settings
                        .body_format(Alignment::Center),
                );
            }
        }
    }

    /// Apply the configured title typography to a slide's title.
    fn style_title(&self, slide: &mut Slide) -> Result<()> {
        let format = self.config.slide_text_settings.title_format()?;
        let title_idx = slide
            .placeholders
            .iter()
            .find(|p| p.role.is_title())
            .map(|p| p.idx);
        if let Some(idx) = title_idx {
            slide.format_placeholder(idx, &format)?;
        }
        Ok(())
    }

    fn default_layout(&self) -> usize {
        self.config.slide_text_settings.default_layout_index
    }
}

/// Run the full pipeline: load both inputs, render, save.
///
/// Returns the resolved output path. Parent directories are created by
/// the save itself.
pub fn generate_deck(
    design_path: &Path,
    content_path: &Path,
    output_override: Option<&Path>,
) -> Result<PathBuf> {
    let design = config::load_design(design_path)?;
    let tree = config::load_content(content_path)?;
    let output = config::output_path_for(content_path, output_override);
    log::debug!(
        "rendering {} into {}",
        content_path.display(),
        output.display()
    );
    let pres = Generator::new(&design).generate(&tree)?;
    pres.save(&output)?;
    Ok(output)
}

fn box_emu(left: f64, top: f64, width: f64, height: f64) -> ((i64, i64), (i64, i64)) {
    (
        (emu_from_inches(left), emu_from_inches(top)),
        (emu_from_inches(width), emu_from_inches(height)),
    )
}
