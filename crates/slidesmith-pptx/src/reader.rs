//! PPTX deserialization.
//!
//! Rebuilds an in-memory [`Presentation`] from a `.pptx` archive. The
//! reader reconstructs text content: placeholder roles, indices, names
//! and text, free textboxes, and table cell text. Pictures, charts, and
//! autoshapes are skipped, so re-saving an opened deck preserves text
//! content only.

use crate::error::{DeckError, Result};
use crate::layout::PlaceholderRole;
use crate::presentation::{CoreProperties, Presentation};
use crate::shape::{Shape, TextBox};
use crate::slide::{Placeholder, Slide};
use crate::text::{Alignment, Paragraph, Run, TextFrame, VerticalAnchor};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Load a presentation from a `.pptx` archive
pub fn read_pptx<R: Read + Seek>(source: R) -> Result<Presentation> {
    let mut archive = ZipArchive::new(source)
        .map_err(|e| DeckError::invalid_format(format!("not a pptx archive: {e}")))?;

    let presentation_xml = read_part(&mut archive, "ppt/presentation.xml")
        .map_err(|_| DeckError::invalid_format("missing ppt/presentation.xml"))?;

    let mut pres = Presentation::new();
    let (width, height) = parse_slide_size(&presentation_xml)?;
    pres.slide_width = width;
    pres.slide_height = height;

    if let Ok(core_xml) = read_part(&mut archive, "docProps/core.xml") {
        pres.set_core_properties(parse_core_properties(&core_xml)?);
    }

    // Slide parts carry their order in the file name
    let mut slide_numbers: Vec<usize> = (0..archive.len())
        .filter_map(|i| {
            let name = archive.by_index(i).ok()?.name().to_string();
            name.strip_prefix("ppt/slides/slide")?
                .strip_suffix(".xml")?
                .parse()
                .ok()
        })
        .collect();
    slide_numbers.sort_unstable();

    for number in slide_numbers {
        let layout_index = archive
            .by_name(&format!("ppt/slides/_rels/slide{number}.xml.rels"))
            .ok()
            .and_then(|mut part| {
                let mut xml = String::new();
                part.read_to_string(&mut xml).ok()?;
                parse_layout_ref(&xml)
            })
            .unwrap_or(1);

        // Foreign decks may reference layouts outside the built-in
        // catalog; those slides fall back to the content layout
        let layout = match pres.layout(layout_index) {
            Ok(layout) => layout.clone(),
            Err(_) => {
                log::debug!("slide{number}: no layout {layout_index} in the catalog, using layout 1");
                pres.layout(1)?.clone()
            }
        };

        let slide_xml = read_part(&mut archive, &format!("ppt/slides/slide{number}.xml"))?;
        let mut slide = Slide::from_layout(&layout);
        parse_slide_xml(&slide_xml, &mut slide)?;
        slide.sync_shape_counter();
        pres.push_slide(slide);
    }

    Ok(pres)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut part = archive.by_name(name)?;
    let mut contents = String::new();
    part.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Extract the slide size from presentation.xml
fn parse_slide_size(xml: &str) -> Result<(i64, i64)> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut width = crate::constants::SLIDE_WIDTH_EMU;
    let mut height = crate::constants::SLIDE_HEIGHT_EMU;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"p:sldSz" => {
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"cx" => {
                            if let Ok(v) = std::str::from_utf8(&attr.value) {
                                width = v.parse().unwrap_or(width);
                            }
                        }
                        b"cy" => {
                            if let Ok(v) = std::str::from_utf8(&attr.value) {
                                height = v.parse().unwrap_or(height);
                            }
                        }
                        _ => {}
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(DeckError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok((width, height))
}

/// Read title, creator, subject, keywords, and description from
/// docProps/core.xml
fn parse_core_properties(xml: &str) -> Result<CoreProperties> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut core = CoreProperties::default();
    let mut current: Option<&'static str> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                current = match e.name().as_ref() {
                    b"dc:title" => Some("title"),
                    b"dc:creator" => Some("creator"),
                    b"dc:subject" => Some("subject"),
                    b"cp:keywords" => Some("keywords"),
                    b"dc:description" => Some("description"),
                    _ => None,
                };
            }
            Ok(Event::Text(ref e)) => {
                if let Some(field) = current {
                    let text = e.unescape().map_err(DeckError::Xml)?.into_owned();
                    if !text.is_empty() {
                        match field {
                            "title" => core.title = Some(text),
                            "creator" => core.author = Some(text),
                            "subject" => core.subject = Some(text),
                            "keywords" => core.keywords = Some(text),
                            "description" => core.comments = Some(text),
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => return Err(DeckError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(core)
}

/// Find the slide layout target in a slide's rels part.
///
/// `slideLayoutN.xml` maps to catalog index `N - 1`.
fn parse_layout_ref(xml: &str) -> Option<usize> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut is_layout = false;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Type" => {
                            if attr.value.as_ref() == crate::constants::REL_TYPE_SLIDE_LAYOUT.as_bytes() {
                                is_layout = true;
                            }
                        }
                        b"Target" => {
                            target = std::str::from_utf8(&attr.value).ok().map(str::to_string);
                        }
                        _ => {}
                    }
                }
                if is_layout {
                    let number: usize = target?
                        .rsplit("slideLayout")
                        .next()?
                        .trim_end_matches(".xml")
                        .parse()
                        .ok()?;
                    return Some(number.saturating_sub(1));
                }
            }
            Ok(Event::Eof) => break,
            Err(_) => break,
            _ => {}
        }
        buf.clear();
    }
    None
}

#[derive(Default)]
struct ShapeState {
    name: String,
    is_textbox: bool,
    ph: Option<(Option<String>, u32)>,
    position: (i64, i64),
    size: (i64, i64),
    anchor: Option<VerticalAnchor>,
    word_wrap: bool,
    paragraphs: Vec<Paragraph>,
}

#[derive(Default)]
struct FrameState {
    name: String,
    position: (i64, i64),
    size: (i64, i64),
    grid: Vec<i64>,
    rows: Vec<Vec<String>>,
    cell_paragraphs: Vec<String>,
    cell_text: String,
}

/// Populate a slide from its part XML
fn parse_slide_xml(xml: &str, slide: &mut Slide) -> Result<()> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();

    let mut sp: Option<ShapeState> = None;
    let mut frame: Option<FrameState> = None;
    let mut in_table = false;
    let mut in_cell = false;
    let mut in_text = false;
    let mut in_run_fill = false;
    let mut para: Option<Paragraph> = None;
    let mut run: Option<Run> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                b"p:sp" => sp = Some(ShapeState { word_wrap: true, ..ShapeState::default() }),
                b"p:graphicFrame" => frame = Some(FrameState::default()),
                b"a:tbl" => in_table = true,
                b"a:tr" => {
                    if let Some(f) = frame.as_mut() {
                        f.rows.push(Vec::new());
                    }
                }
                b"a:tc" => {
                    in_cell = true;
                    if let Some(f) = frame.as_mut() {
                        f.cell_paragraphs.clear();
                    }
                }
                b"a:p" => {
                    if in_cell {
                        if let Some(f) = frame.as_mut() {
                            f.cell_text.clear();
                        }
                    } else if sp.is_some() {
                        para = Some(Paragraph::default());
                    }
                }
                b"a:r" => {
                    if para.is_some() {
                        run = Some(Run::plain(""));
                    }
                }
                b"a:rPr" => read_run_props(e, run.as_mut()),
                b"a:pPr" => read_para_props(e, para.as_mut()),
                b"a:t" => in_text = true,
                b"a:solidFill" => {
                    if run.is_some() {
                        in_run_fill = true;
                    }
                }
                b"a:bodyPr" => read_body_props(e, sp.as_mut()),
                b"p:cNvPr" => read_display_name(e, sp.as_mut(), frame.as_mut()),
                b"p:cNvSpPr" => read_textbox_flag(e, sp.as_mut()),
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"p:ph" => {
                    if let Some(s) = sp.as_mut() {
                        let mut ph_type = None;
                        let mut idx = 0u32;
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"type" => {
                                    ph_type = std::str::from_utf8(&attr.value)
                                        .ok()
                                        .map(str::to_string);
                                }
                                b"idx" => {
                                    if let Ok(v) = std::str::from_utf8(&attr.value) {
                                        idx = v.parse().unwrap_or(0);
                                    }
                                }
                                _ => {}
                            }
                        }
                        s.ph = Some((ph_type, idx));
                    }
                }
                b"a:off" => {
                    let point = read_pair(e, b"x", b"y");
                    if let Some(f) = frame.as_mut() {
                        f.position = point;
                    } else if let Some(s) = sp.as_mut() {
                        s.position = point;
                    }
                }
                b"a:ext" => {
                    let extent = read_pair(e, b"cx", b"cy");
                    if let Some(f) = frame.as_mut() {
                        f.size = extent;
                    } else if let Some(s) = sp.as_mut() {
                        s.size = extent;
                    }
                }
                b"a:gridCol" => {
                    if in_table {
                        if let Some(f) = frame.as_mut() {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"w" {
                                    if let Ok(v) = std::str::from_utf8(&attr.value) {
                                        f.grid.push(v.parse().unwrap_or(0));
                                    }
                                }
                            }
                        }
                    }
                }
                b"a:spcPct" => {
                    if let Some(p) = para.as_mut() {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"val" {
                                if let Ok(v) = std::str::from_utf8(&attr.value) {
                                    if let Ok(val) = v.parse::<f32>() {
                                        p.line_spacing = Some(val / 100_000.0);
                                    }
                                }
                            }
                        }
                    }
                }
                b"a:srgbClr" => {
                    if in_run_fill {
                        if let Some(r) = run.as_mut() {
                            for attr in e.attributes().flatten() {
                                if attr.key.as_ref() == b"val" {
                                    if let Ok(hex) = std::str::from_utf8(&attr.value) {
                                        r.style.color = parse_hex(hex);
                                    }
                                }
                            }
                        }
                    }
                }
                b"a:latin" => {
                    if let Some(r) = run.as_mut() {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"typeface" {
                                if let Ok(face) = std::str::from_utf8(&attr.value) {
                                    r.style.font = Some(face.to_string());
                                }
                            }
                        }
                    }
                }
                b"a:rPr" => read_run_props(e, run.as_mut()),
                b"a:pPr" => read_para_props(e, para.as_mut()),
                b"a:bodyPr" => read_body_props(e, sp.as_mut()),
                b"p:cNvPr" => read_display_name(e, sp.as_mut(), frame.as_mut()),
                b"p:cNvSpPr" => read_textbox_flag(e, sp.as_mut()),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text {
                    let text = e.unescape().map_err(DeckError::Xml)?;
                    if let Some(r) = run.as_mut() {
                        r.text.push_str(&text);
                    } else if in_cell {
                        if let Some(f) = frame.as_mut() {
                            f.cell_text.push_str(&text);
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.name().as_ref() {
                b"a:t" => in_text = false,
                b"a:solidFill" => in_run_fill = false,
                b"a:r" => {
                    if let (Some(p), Some(r)) = (para.as_mut(), run.take()) {
                        p.runs.push(r);
                    }
                }
                b"a:p" => {
                    if in_cell {
                        if let Some(f) = frame.as_mut() {
                            let text = std::mem::take(&mut f.cell_text);
                            f.cell_paragraphs.push(text);
                        }
                    } else if let (Some(s), Some(p)) = (sp.as_mut(), para.take()) {
                        s.paragraphs.push(p);
                    }
                }
                b"a:tc" => {
                    in_cell = false;
                    if let Some(f) = frame.as_mut() {
                        let text = f.cell_paragraphs.join("\n");
                        if let Some(row) = f.rows.last_mut() {
                            row.push(text);
                        }
                    }
                }
                b"a:tbl" => in_table = false,
                b"p:sp" => {
                    if let Some(state) = sp.take() {
                        finish_shape(state, slide);
                    }
                }
                b"p:graphicFrame" => {
                    if let Some(state) = frame.take() {
                        finish_table(state, slide)?;
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(DeckError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn read_pair(e: &quick_xml::events::BytesStart<'_>, first: &[u8], second: &[u8]) -> (i64, i64) {
    let mut pair = (0i64, 0i64);
    for attr in e.attributes().flatten() {
        if let Ok(v) = std::str::from_utf8(&attr.value) {
            if attr.key.as_ref() == first {
                pair.0 = v.parse().unwrap_or(0);
            } else if attr.key.as_ref() == second {
                pair.1 = v.parse().unwrap_or(0);
            }
        }
    }
    pair
}

fn read_display_name(
    e: &quick_xml::events::BytesStart<'_>,
    sp: Option<&mut ShapeState>,
    frame: Option<&mut FrameState>,
) {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"name" {
            if let Ok(name) = std::str::from_utf8(&attr.value) {
                if let Some(s) = sp {
                    s.name = name.to_string();
                } else if let Some(f) = frame {
                    f.name = name.to_string();
                }
                return;
            }
        }
    }
}

fn read_textbox_flag(e: &quick_xml::events::BytesStart<'_>, sp: Option<&mut ShapeState>) {
    let Some(s) = sp else { return };
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"txBox" && attr.value.as_ref() == b"1" {
            s.is_textbox = true;
        }
    }
}

fn read_body_props(e: &quick_xml::events::BytesStart<'_>, sp: Option<&mut ShapeState>) {
    let Some(s) = sp else { return };
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"anchor" => {
                if let Ok(v) = std::str::from_utf8(&attr.value) {
                    s.anchor = match v {
                        "t" => Some(VerticalAnchor::Top),
                        "ctr" => Some(VerticalAnchor::Middle),
                        "b" => Some(VerticalAnchor::Bottom),
                        _ => None,
                    };
                }
            }
            b"wrap" => {
                if attr.value.as_ref() == b"none" {
                    s.word_wrap = false;
                }
            }
            _ => {}
        }
    }
}

fn read_run_props(e: &quick_xml::events::BytesStart<'_>, run: Option<&mut Run>) {
    let Some(r) = run else { return };
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"sz" => {
                if let Ok(v) = std::str::from_utf8(&attr.value) {
                    if let Ok(hundredths) = v.parse::<f32>() {
                        r.style.size_pt = Some(hundredths / 100.0);
                    }
                }
            }
            b"b" => r.style.bold = attr.value.as_ref() == b"1",
            b"i" => r.style.italic = attr.value.as_ref() == b"1",
            _ => {}
        }
    }
}

fn read_para_props(e: &quick_xml::events::BytesStart<'_>, para: Option<&mut Paragraph>) {
    let Some(p) = para else { return };
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"algn" => {
                if let Ok(v) = std::str::from_utf8(&attr.value) {
                    p.alignment = match v {
                        "l" => Some(Alignment::Left),
                        "ctr" => Some(Alignment::Center),
                        "r" => Some(Alignment::Right),
                        "just" => Some(Alignment::Justify),
                        _ => None,
                    };
                }
            }
            b"lvl" => {
                if let Ok(v) = std::str::from_utf8(&attr.value) {
                    p.level = v.parse().unwrap_or(0);
                }
            }
            _ => {}
        }
    }
}

fn parse_hex(hex: &str) -> Option<crate::text::Rgb> {
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(crate::text::Rgb::new(r, g, b))
}

/// A frame is empty when none of its paragraphs carry runs
fn finish_frame(state: &mut ShapeState) -> TextFrame {
    let mut frame = TextFrame::new();
    frame.anchor = state.anchor;
    frame.word_wrap = state.word_wrap;
    if state.paragraphs.iter().any(|p| !p.runs.is_empty()) {
        frame.paragraphs = std::mem::take(&mut state.paragraphs);
    }
    frame
}

fn finish_shape(mut state: ShapeState, slide: &mut Slide) {
    let frame = finish_frame(&mut state);

    if let Some((ph_type, idx)) = state.ph {
        let role = PlaceholderRole::from_ooxml_type(ph_type.as_deref());
        let existing = slide.placeholders.iter().position(|p| p.idx == idx);
        match existing {
            Some(i) => {
                let placeholder = &mut slide.placeholders[i];
                placeholder.role = role;
                placeholder.frame = frame;
                if !state.name.is_empty() {
                    placeholder.name = state.name;
                }
            }
            None => slide.placeholders.push(Placeholder {
                idx,
                role,
                name: state.name,
                position: state.position,
                size: state.size,
                frame,
            }),
        }
    } else if state.is_textbox {
        slide.shapes.push(Shape::TextBox(TextBox {
            name: state.name,
            position: state.position,
            size: state.size,
            frame,
        }));
    }
    // Autoshapes and anything else are not reconstructed
}

fn finish_table(state: FrameState, slide: &mut Slide) -> Result<()> {
    let rows = state.rows.len();
    let cols = state.grid.len();
    if rows == 0 || cols == 0 {
        // Chart frames and other graphics land here
        return Ok(());
    }

    let mut table = crate::table::Table::new(state.name, rows, cols, state.position, state.size)?;
    let ratios: Vec<f32> = state.grid.iter().map(|w| *w as f32).collect();
    table.set_column_ratios(&ratios);

    for (r, row) in state.rows.iter().enumerate() {
        for (c, text) in row.iter().enumerate() {
            if c < cols && !text.is_empty() {
                table.set_cell_text(r, c, text.clone())?;
            }
        }
    }

    slide.shapes.push(Shape::Table(table));
    Ok(())
}
