//! PPTX serialization.
//!
//! Renders a [`Presentation`] into the OOXML package layout: content
//! types, relationship parts, document properties, theme, master, the
//! layout catalog, and one part per slide plus any media and chart
//! parts the slides reference.

use crate::chart::{Chart, ChartKind};
use crate::constants::*;
use crate::error::Result;
use crate::image::Picture;
use crate::presentation::Presentation;
use crate::shape::{AutoShape, Shape, TextBox};
use crate::slide::{Placeholder, Slide};
use crate::table::Table;
use crate::text::{Paragraph, Run, TextFrame};
use chrono::{SecondsFormat, Utc};
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Media part queued for emission under `ppt/media/`
struct MediaPart {
    /// Embedded name (e.g., "image1.png")
    embedded_name: String,

    /// Raw bytes
    data: Vec<u8>,
}

/// Chart part queued for emission under `ppt/charts/`
struct ChartPart {
    /// Part number (chart1.xml, chart2.xml, ...)
    number: usize,

    /// Rendered chartSpace XML
    xml: String,
}

/// PPTX document writer over any seekable sink
pub struct PptxWriter<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    media: Vec<MediaPart>,
    charts: Vec<ChartPart>,
}

impl<W: Write + Seek> PptxWriter<W> {
    /// Create a writer emitting into the given sink
    pub fn new(inner: W) -> Self {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        Self {
            zip: ZipWriter::new(inner),
            options,
            media: Vec::new(),
            charts: Vec::new(),
        }
    }

    /// Write the whole package and return the underlying sink
    pub fn write(mut self, pres: &Presentation) -> Result<W> {
        // Chart part names are needed up front for [Content_Types].xml
        let chart_total = pres
            .slides()
            .iter()
            .flat_map(|s| s.shapes.iter())
            .filter(|s| matches!(s, Shape::Chart(_)))
            .count();

        self.write_content_types(pres, chart_total)?;
        self.write_root_rels()?;
        self.write_app_xml(pres)?;
        self.write_core_xml(pres)?;
        self.write_presentation_xml(pres)?;
        self.write_presentation_rels(pres)?;
        self.write_pres_props()?;
        self.write_table_styles()?;
        self.write_view_props()?;
        self.write_theme()?;
        self.write_slide_master(pres)?;
        self.write_slide_layouts(pres)?;

        for (i, slide) in pres.slides().iter().enumerate() {
            self.write_slide(i + 1, slide)?;
        }

        for chart in std::mem::take(&mut self.charts) {
            self.zip
                .start_file(format!("ppt/charts/chart{}.xml", chart.number), self.options)?;
            self.zip.write_all(chart.xml.as_bytes())?;
        }

        for media in std::mem::take(&mut self.media) {
            self.zip
                .start_file(format!("ppt/media/{}", media.embedded_name), self.options)?;
            self.zip.write_all(&media.data)?;
        }

        let inner = self.zip.finish()?;
        Ok(inner)
    }

    /// Write [Content_Types].xml
    fn write_content_types(&mut self, pres: &Presentation, chart_total: usize) -> Result<()> {
        self.zip.start_file("[Content_Types].xml", self.options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Default Extension="png" ContentType="image/png"/>
  <Default Extension="jpeg" ContentType="image/jpeg"/>
  <Default Extension="jpg" ContentType="image/jpeg"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
  <Override PartName="/ppt/tableStyles.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml"/>
  <Override PartName="/ppt/viewProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#,
        );

        for i in 1..=pres.layouts().len() {
            content.push_str(&format!(
                "  <Override PartName=\"/ppt/slideLayouts/slideLayout{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml\"/>\n",
                i
            ));
        }

        for i in 1..=pres.slide_count() {
            content.push_str(&format!(
                "  <Override PartName=\"/ppt/slides/slide{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>\n",
                i
            ));
        }

        for i in 1..=chart_total {
            content.push_str(&format!(
                "  <Override PartName=\"/ppt/charts/chart{}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.drawingml.chart+xml\"/>\n",
                i
            ));
        }

        content.push_str("</Types>");

        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write _rels/.rels
    fn write_root_rels(&mut self) -> Result<()> {
        self.zip.start_file("_rels/.rels", self.options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#;

        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write docProps/app.xml
    fn write_app_xml(&mut self, pres: &Presentation) -> Result<()> {
        self.zip.start_file("docProps/app.xml", self.options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <TotalTime>0</TotalTime>
  <Words>0</Words>
  <Application>slidesmith</Application>
  <PresentationFormat>On-screen Show (16:9)</PresentationFormat>
  <Paragraphs>0</Paragraphs>
  <Slides>{}</Slides>
  <Notes>0</Notes>
  <HiddenSlides>0</HiddenSlides>
  <MMClips>0</MMClips>
  <ScaleCrop>false</ScaleCrop>
  <LinksUpToDate>false</LinksUpToDate>
  <SharedDoc>false</SharedDoc>
  <HyperlinksChanged>false</HyperlinksChanged>
  <AppVersion>1.0</AppVersion>
</Properties>"#,
            pres.slide_count()
        );

        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write docProps/core.xml
    fn write_core_xml(&mut self, pres: &Presentation) -> Result<()> {
        self.zip.start_file("docProps/core.xml", self.options)?;

        let core = &pres.core;
        let title = core.title.as_deref().unwrap_or("");
        let author = core.author.as_deref().unwrap_or("");
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut optional = String::new();
        if let Some(subject) = &core.subject {
            optional.push_str(&format!("  <dc:subject>{}</dc:subject>\n", escape_xml(subject)));
        }
        if let Some(keywords) = &core.keywords {
            optional.push_str(&format!(
                "  <cp:keywords>{}</cp:keywords>\n",
                escape_xml(keywords)
            ));
        }
        if let Some(comments) = &core.comments {
            optional.push_str(&format!(
                "  <dc:description>{}</dc:description>\n",
                escape_xml(comments)
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:creator>{}</dc:creator>
{}  <cp:lastModifiedBy>{}</cp:lastModifiedBy>
  <dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>
</cp:coreProperties>"#,
            escape_xml(title),
            escape_xml(author),
            optional,
            escape_xml(author),
            now,
            now
        );

        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/presentation.xml
    fn write_presentation_xml(&mut self, pres: &Presentation) -> Result<()> {
        self.zip.start_file("ppt/presentation.xml", self.options)?;

        let mut slide_refs = String::new();
        for i in 1..=pres.slide_count() {
            slide_refs.push_str(&format!(
                "    <p:sldId id=\"{}\" r:id=\"rId{}\"/>\n",
                255 + i,
                i + 3 // rId1=slideMaster, rId2=presProps, rId3=theme, rId4+=slides
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{}  </p:sldIdLst>
  <p:sldSz cx="{}" cy="{}"/>
  <p:notesSz cx="{}" cy="{}"/>
</p:presentation>"#,
            NS_DRAWING,
            NS_RELATIONSHIPS,
            NS_PRESENTATION,
            slide_refs,
            pres.slide_width,
            pres.slide_height,
            pres.slide_height, // Notes are rotated
            pres.slide_width
        );

        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/_rels/presentation.xml.rels
    fn write_presentation_rels(&mut self, pres: &Presentation) -> Result<()> {
        self.zip
            .start_file("ppt/_rels/presentation.xml.rels", self.options)?;

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps" Target="presProps.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
"#,
        );

        for i in 1..=pres.slide_count() {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"slides/slide{}.xml\"/>\n",
                i + 3,
                REL_TYPE_SLIDE,
                i
            ));
        }

        rels.push_str("</Relationships>");

        self.zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    /// Write ppt/presProps.xml
    fn write_pres_props(&mut self) -> Result<()> {
        self.zip.start_file("ppt/presProps.xml", self.options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:presentationPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:extLst/>
</p:presentationPr>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/tableStyles.xml
    fn write_table_styles(&mut self) -> Result<()> {
        self.zip.start_file("ppt/tableStyles.xml", self.options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:tblStyleLst xmlns:a="{}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#,
            NS_DRAWING
        );

        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/viewProps.xml
    fn write_view_props(&mut self) -> Result<()> {
        self.zip.start_file("ppt/viewProps.xml", self.options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:viewPr xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:normalViewPr>
    <p:restoredLeft sz="15620"/>
    <p:restoredTop sz="94660"/>
  </p:normalViewPr>
  <p:slideViewPr>
    <p:cSldViewPr>
      <p:cViewPr>
        <p:scale>
          <a:sx n="100" d="100"/>
          <a:sy n="100" d="100"/>
        </p:scale>
        <p:origin x="0" y="0"/>
      </p:cViewPr>
    </p:cSldViewPr>
  </p:slideViewPr>
</p:viewPr>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
        );

        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/theme/theme1.xml
    fn write_theme(&mut self) -> Result<()> {
        self.zip.start_file("ppt/theme/theme1.xml", self.options)?;

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<a:theme xmlns:a="{}" name="slidesmith">
  <a:themeElements>
    <a:clrScheme name="Office">
      <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
      <a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="44546A"/></a:dk2>
      <a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>
      <a:accent1><a:srgbClr val="4472C4"/></a:accent1>
      <a:accent2><a:srgbClr val="ED7D31"/></a:accent2>
      <a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>
      <a:accent4><a:srgbClr val="FFC000"/></a:accent4>
      <a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>
      <a:accent6><a:srgbClr val="70AD47"/></a:accent6>
      <a:hlink><a:srgbClr val="0563C1"/></a:hlink>
      <a:folHlink><a:srgbClr val="954F72"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="Office">
      <a:majorFont>
        <a:latin typeface="Calibri Light"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:majorFont>
      <a:minorFont>
        <a:latin typeface="Calibri"/>
        <a:ea typeface=""/>
        <a:cs typeface=""/>
      </a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="Office">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#,
            NS_DRAWING
        );

        self.zip.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Write ppt/slideMasters/slideMaster1.xml and its rels
    fn write_slide_master(&mut self, pres: &Presentation) -> Result<()> {
        self.zip
            .start_file("ppt/slideMasters/slideMaster1.xml", self.options)?;

        let mut layout_ids = String::new();
        for i in 1..=pres.layouts().len() {
            layout_ids.push_str(&format!(
                "    <p:sldLayoutId id=\"{}\" r:id=\"rId{}\"/>\n",
                2_147_483_648u32 + i as u32,
                i
            ));
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldMaster xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:bg>
      <p:bgRef idx="1001">
        <a:schemeClr val="bg1"/>
      </p:bgRef>
    </p:bg>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
{}  </p:sldLayoutIdLst>
</p:sldMaster>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, layout_ids
        );

        self.zip.write_all(content.as_bytes())?;

        // Write slide master rels
        self.zip
            .start_file("ppt/slideMasters/_rels/slideMaster1.xml.rels", self.options)?;

        let mut rels = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
        );
        for i in 1..=pres.layouts().len() {
            rels.push_str(&format!(
                "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"../slideLayouts/slideLayout{}.xml\"/>\n",
                i, REL_TYPE_SLIDE_LAYOUT, i
            ));
        }
        rels.push_str(&format!(
            "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"../theme/theme1.xml\"/>\n",
            pres.layouts().len() + 1,
            REL_TYPE_THEME
        ));
        rels.push_str("</Relationships>");

        self.zip.write_all(rels.as_bytes())?;
        Ok(())
    }

    /// Write ppt/slideLayouts/slideLayoutN.xml for the whole catalog
    fn write_slide_layouts(&mut self, pres: &Presentation) -> Result<()> {
        let layout_rels = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="{}">
  <Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#,
            NS_RELATIONSHIPS, REL_TYPE_SLIDE_MASTER
        );

        for layout in pres.layouts() {
            let number = layout.index + 1;

            let mut shapes = String::new();
            for (i, spec) in layout.placeholders.iter().enumerate() {
                shapes.push_str(&format!(
                    r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{}" name="{}"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr>{}</p:nvPr>
        </p:nvSpPr>
        <p:spPr>
          <a:xfrm>
            <a:off x="{}" y="{}"/>
            <a:ext cx="{}" cy="{}"/>
          </a:xfrm>
        </p:spPr>
        <p:txBody>
          <a:bodyPr/>
          <a:lstStyle/>
          <a:p><a:endParaRPr lang="en-US"/></a:p>
        </p:txBody>
      </p:sp>
"#,
                    i + 2,
                    escape_xml(&spec.name),
                    ph_tag(spec.role.ooxml_type(), spec.idx),
                    spec.position.0,
                    spec.position.1,
                    spec.size.0,
                    spec.size.1,
                ));
            }

            let content = format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sldLayout xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" type="{}" preserve="1">
  <p:cSld name="{}">
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#,
                NS_DRAWING,
                NS_RELATIONSHIPS,
                NS_PRESENTATION,
                layout.kind.ooxml_type(),
                escape_xml(&layout.name),
                shapes
            );

            self.zip
                .start_file(format!("ppt/slideLayouts/slideLayout{}.xml", number), self.options)?;
            self.zip.write_all(content.as_bytes())?;

            self.zip.start_file(
                format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", number),
                self.options,
            )?;
            self.zip.write_all(layout_rels.as_bytes())?;
        }

        Ok(())
    }

    /// Write one slide part plus its relationships
    fn write_slide(&mut self, slide_num: usize, slide: &Slide) -> Result<()> {
        let mut rels = vec![format!(
            "  <Relationship Id=\"rId1\" Type=\"{}\" Target=\"../slideLayouts/slideLayout{}.xml\"/>",
            REL_TYPE_SLIDE_LAYOUT,
            slide.layout_index + 1
        )];
        let mut next_rid = 2;

        let mut shapes = String::new();
        let mut shape_id = 2;

        for placeholder in &slide.placeholders {
            shapes.push_str(&placeholder_xml(placeholder, shape_id));
            shape_id += 1;
        }

        for shape in &slide.shapes {
            match shape {
                Shape::TextBox(textbox) => {
                    shapes.push_str(&textbox_xml(textbox, shape_id));
                }
                Shape::Auto(auto) => {
                    shapes.push_str(&autoshape_xml(auto, shape_id));
                }
                Shape::Table(table) => {
                    shapes.push_str(&table_xml(table, shape_id)?);
                }
                Shape::Picture(picture) => {
                    let embedded_name =
                        format!("image{}.{}", self.media.len() + 1, picture.format.extension());
                    rels.push(format!(
                        "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"../media/{}\"/>",
                        next_rid, REL_TYPE_IMAGE, embedded_name
                    ));
                    shapes.push_str(&picture_xml(picture, shape_id, next_rid));
                    self.media.push(MediaPart {
                        embedded_name,
                        data: picture.data.clone(),
                    });
                    next_rid += 1;
                }
                Shape::Chart(chart) => {
                    let number = self.charts.len() + 1;
                    rels.push(format!(
                        "  <Relationship Id=\"rId{}\" Type=\"{}\" Target=\"../charts/chart{}.xml\"/>",
                        next_rid, REL_TYPE_CHART, number
                    ));
                    shapes.push_str(&chart_frame_xml(chart, shape_id, next_rid));
                    self.charts.push(ChartPart {
                        number,
                        xml: chart_space_xml(chart),
                    });
                    next_rid += 1;
                }
            }
            shape_id += 1;
        }

        let content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">
  <p:cSld>
    <p:spTree>
      <p:nvGrpSpPr>
        <p:cNvPr id="1" name=""/>
        <p:cNvGrpSpPr/>
        <p:nvPr/>
      </p:nvGrpSpPr>
      <p:grpSpPr/>
{}    </p:spTree>
  </p:cSld>
</p:sld>"#,
            NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION, shapes
        );

        self.zip
            .start_file(format!("ppt/slides/slide{}.xml", slide_num), self.options)?;
        self.zip.write_all(content.as_bytes())?;

        self.zip.start_file(
            format!("ppt/slides/_rels/slide{}.xml.rels", slide_num),
            self.options,
        )?;

        let rels_content = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Relationships xmlns=\"{}\">\n{}\n</Relationships>",
            NS_RELATIONSHIPS,
            rels.join("\n")
        );
        self.zip.write_all(rels_content.as_bytes())?;
        Ok(())
    }
}

/// The `<p:ph>` tag for a placeholder, with type and idx attributes
/// only when they carry information
fn ph_tag(ooxml_type: Option<&str>, idx: u32) -> String {
    match (ooxml_type, idx) {
        (Some(t), 0) => format!("<p:ph type=\"{}\"/>", t),
        (Some(t), idx) => format!("<p:ph type=\"{}\" idx=\"{}\"/>", t, idx),
        (None, 0) => "<p:ph/>".to_string(),
        (None, idx) => format!("<p:ph idx=\"{}\"/>", idx),
    }
}

/// Generate a placeholder shape, geometry inherited from the layout
fn placeholder_xml(placeholder: &Placeholder, shape_id: usize) -> String {
    format!(
        r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{}" name="{}"/>
          <p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>
          <p:nvPr>{}</p:nvPr>
        </p:nvSpPr>
        <p:spPr/>
{}      </p:sp>
"#,
        shape_id,
        escape_xml(&placeholder.name),
        ph_tag(placeholder.role.ooxml_type(), placeholder.idx),
        txbody_xml(&placeholder.frame)
    )
}

/// Generate a free textbox shape
fn textbox_xml(textbox: &TextBox, shape_id: usize) -> String {
    format!(
        r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{}" name="{}"/>
          <p:cNvSpPr txBox="1"/>
          <p:nvPr/>
        </p:nvSpPr>
        <p:spPr>
          <a:xfrm>
            <a:off x="{}" y="{}"/>
            <a:ext cx="{}" cy="{}"/>
          </a:xfrm>
          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
          <a:noFill/>
        </p:spPr>
{}      </p:sp>
"#,
        shape_id,
        escape_xml(&textbox.name),
        textbox.position.0,
        textbox.position.1,
        textbox.size.0,
        textbox.size.1,
        txbody_xml(&textbox.frame)
    )
}

/// Generate a preset-geometry autoshape
fn autoshape_xml(auto: &AutoShape, shape_id: usize) -> String {
    let mut style = String::new();
    if let Some(fill) = auto.fill {
        style.push_str(&format!(
            "          <a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>\n",
            fill.hex()
        ));
    }
    if auto.line_color.is_some() || auto.line_width_pt.is_some() {
        let width = auto
            .line_width_pt
            .map(|pt| format!(" w=\"{}\"", (pt * 12_700.0).round() as i64))
            .unwrap_or_default();
        let line_fill = auto
            .line_color
            .map(|c| format!("<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>", c.hex()))
            .unwrap_or_default();
        style.push_str(&format!("          <a:ln{}>{}</a:ln>\n", width, line_fill));
    }

    format!(
        r#"      <p:sp>
        <p:nvSpPr>
          <p:cNvPr id="{}" name="{}"/>
          <p:cNvSpPr/>
          <p:nvPr/>
        </p:nvSpPr>
        <p:spPr>
          <a:xfrm>
            <a:off x="{}" y="{}"/>
            <a:ext cx="{}" cy="{}"/>
          </a:xfrm>
          <a:prstGeom prst="{}"><a:avLst/></a:prstGeom>
{}        </p:spPr>
{}      </p:sp>
"#,
        shape_id,
        escape_xml(&auto.name),
        auto.position.0,
        auto.position.1,
        auto.size.0,
        auto.size.1,
        auto.kind.preset(),
        style,
        txbody_xml(&auto.frame)
    )
}

/// Generate a table inside a graphic frame
fn table_xml(table: &Table, shape_id: usize) -> Result<String> {
    let mut grid = String::new();
    for width in table.col_widths() {
        grid.push_str(&format!("<a:gridCol w=\"{}\"/>", width));
    }

    let row_height = table.row_height();
    let mut rows = String::new();
    for r in 0..table.rows() {
        rows.push_str(&format!("              <a:tr h=\"{}\">\n", row_height));
        for c in 0..table.cols() {
            let cell = table.cell(r, c)?;
            let anchor = cell
                .frame
                .anchor
                .map(|a| format!(" anchor=\"{}\"", a.ooxml_value()))
                .unwrap_or_default();
            let fill = cell
                .fill
                .map(|f| format!("<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>", f.hex()))
                .unwrap_or_default();
            rows.push_str(&format!(
                "                <a:tc><a:txBody><a:bodyPr/><a:lstStyle/>{}</a:txBody><a:tcPr{}>{}</a:tcPr></a:tc>\n",
                paragraphs_xml(&cell.frame),
                anchor,
                fill
            ));
        }
        rows.push_str("              </a:tr>\n");
    }

    Ok(format!(
        r#"      <p:graphicFrame>
        <p:nvGraphicFramePr>
          <p:cNvPr id="{}" name="{}"/>
          <p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr>
          <p:nvPr/>
        </p:nvGraphicFramePr>
        <p:xfrm>
          <a:off x="{}" y="{}"/>
          <a:ext cx="{}" cy="{}"/>
        </p:xfrm>
        <a:graphic>
          <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">
            <a:tbl>
              <a:tblPr firstRow="1" bandRow="1"><a:tableStyleId>{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}</a:tableStyleId></a:tblPr>
              <a:tblGrid>{}</a:tblGrid>
{}            </a:tbl>
          </a:graphicData>
        </a:graphic>
      </p:graphicFrame>
"#,
        shape_id,
        escape_xml(&table.name),
        table.position.0,
        table.position.1,
        table.size.0,
        table.size.1,
        grid,
        rows
    ))
}

/// Generate a picture shape referencing an embedded media part
fn picture_xml(picture: &Picture, shape_id: usize, rid: usize) -> String {
    format!(
        r#"      <p:pic>
        <p:nvPicPr>
          <p:cNvPr id="{}" name="{}"/>
          <p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr>
          <p:nvPr/>
        </p:nvPicPr>
        <p:blipFill>
          <a:blip r:embed="rId{}"/>
          <a:stretch><a:fillRect/></a:stretch>
        </p:blipFill>
        <p:spPr>
          <a:xfrm>
            <a:off x="{}" y="{}"/>
            <a:ext cx="{}" cy="{}"/>
          </a:xfrm>
          <a:prstGeom prst="rect"><a:avLst/></a:prstGeom>
        </p:spPr>
      </p:pic>
"#,
        shape_id,
        escape_xml(&picture.name),
        rid,
        picture.position.0,
        picture.position.1,
        picture.size.0,
        picture.size.1,
    )
}

/// Generate the graphic frame that anchors a chart part on the slide
fn chart_frame_xml(chart: &Chart, shape_id: usize, rid: usize) -> String {
    format!(
        r#"      <p:graphicFrame>
        <p:nvGraphicFramePr>
          <p:cNvPr id="{}" name="{}"/>
          <p:cNvGraphicFramePr/>
          <p:nvPr/>
        </p:nvGraphicFramePr>
        <p:xfrm>
          <a:off x="{}" y="{}"/>
          <a:ext cx="{}" cy="{}"/>
        </p:xfrm>
        <a:graphic>
          <a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">
            <c:chart xmlns:c="{}" xmlns:r="{}" r:id="rId{}"/>
          </a:graphicData>
        </a:graphic>
      </p:graphicFrame>
"#,
        shape_id,
        escape_xml(&chart.name),
        chart.position.0,
        chart.position.1,
        chart.size.0,
        chart.size.1,
        NS_CHART,
        NS_RELATIONSHIPS,
        rid,
    )
}

/// Generate the `c:chartSpace` part for a chart
fn chart_space_xml(chart: &Chart) -> String {
    let title = match &chart.title {
        Some(text) => format!(
            "<c:title><c:tx><c:rich><a:bodyPr/><a:lstStyle/><a:p><a:r><a:rPr lang=\"en-US\"/><a:t>{}</a:t></a:r></a:p></c:rich></c:tx><c:overlay val=\"0\"/></c:title><c:autoTitleDeleted val=\"0\"/>",
            escape_xml(text)
        ),
        None => "<c:autoTitleDeleted val=\"1\"/>".to_string(),
    };

    let legend = chart
        .legend
        .map(|pos| {
            format!(
                "<c:legend><c:legendPos val=\"{}\"/><c:overlay val=\"0\"/></c:legend>",
                pos.ooxml_value()
            )
        })
        .unwrap_or_default();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<c:chartSpace xmlns:c="{}" xmlns:a="{}" xmlns:r="{}">
  <c:chart>
    {}
    <c:plotArea>
      <c:layout/>
      {}
    </c:plotArea>
    {}
    <c:plotVisOnly val="1"/>
  </c:chart>
</c:chartSpace>"#,
        NS_CHART, NS_DRAWING, NS_RELATIONSHIPS, title, plot_xml(chart), legend
    )
}

/// The plot element for the chart's kind, series included
fn plot_xml(chart: &Chart) -> String {
    let kind = chart.kind;
    match kind {
        k if k.is_bar_family() => format!(
            "<c:barChart><c:barDir val=\"{}\"/><c:grouping val=\"{}\"/><c:varyColors val=\"0\"/>{}<c:axId val=\"1\"/><c:axId val=\"2\"/></c:barChart>{}",
            kind.bar_direction(),
            kind.grouping(),
            category_series_xml(chart),
            category_axes_xml()
        ),
        ChartKind::Line | ChartKind::LineMarkers => format!(
            "<c:lineChart><c:grouping val=\"standard\"/><c:varyColors val=\"0\"/>{}<c:marker val=\"1\"/><c:axId val=\"1\"/><c:axId val=\"2\"/></c:lineChart>{}",
            category_series_xml(chart),
            category_axes_xml()
        ),
        ChartKind::Pie => format!(
            "<c:pieChart><c:varyColors val=\"1\"/>{}<c:firstSliceAng val=\"0\"/></c:pieChart>",
            category_series_xml(chart)
        ),
        ChartKind::Doughnut => format!(
            "<c:doughnutChart><c:varyColors val=\"1\"/>{}<c:firstSliceAng val=\"0\"/><c:holeSize val=\"50\"/></c:doughnutChart>",
            category_series_xml(chart)
        ),
        ChartKind::Area | ChartKind::StackedArea => format!(
            "<c:areaChart><c:grouping val=\"{}\"/><c:varyColors val=\"0\"/>{}<c:axId val=\"1\"/><c:axId val=\"2\"/></c:areaChart>{}",
            kind.grouping(),
            category_series_xml(chart),
            category_axes_xml()
        ),
        ChartKind::Radar | ChartKind::RadarMarkers => format!(
            "<c:radarChart><c:radarStyle val=\"{}\"/><c:varyColors val=\"0\"/>{}<c:axId val=\"1\"/><c:axId val=\"2\"/></c:radarChart>{}",
            kind.radar_style(),
            category_series_xml(chart),
            category_axes_xml()
        ),
        ChartKind::Scatter => format!(
            "<c:scatterChart><c:scatterStyle val=\"lineMarker\"/><c:varyColors val=\"0\"/>{}<c:axId val=\"1\"/><c:axId val=\"2\"/></c:scatterChart>{}",
            xy_series_xml(chart),
            value_axes_xml()
        ),
        // Bar family is matched by the guard above
        _ => String::new(),
    }
}

const DATA_LABELS: &str = "<c:dLbls><c:showLegendKey val=\"0\"/><c:showVal val=\"1\"/><c:showCatName val=\"0\"/><c:showSerName val=\"0\"/><c:showPercent val=\"0\"/><c:showBubbleSize val=\"0\"/></c:dLbls>";

/// Series with literal category and value caches
fn category_series_xml(chart: &Chart) -> String {
    let labels = if chart.data_labels { DATA_LABELS } else { "" };
    let mut out = String::new();
    for (i, series) in chart.data.series.iter().enumerate() {
        let marker = match chart.kind {
            ChartKind::Line => "<c:marker><c:symbol val=\"none\"/></c:marker>",
            ChartKind::LineMarkers | ChartKind::RadarMarkers => {
                "<c:marker><c:symbol val=\"circle\"/><c:size val=\"5\"/></c:marker>"
            }
            _ => "",
        };
        out.push_str(&format!(
            "<c:ser><c:idx val=\"{i}\"/><c:order val=\"{i}\"/><c:tx><c:v>{}</c:v></c:tx>{marker}{labels}<c:cat>{}</c:cat><c:val>{}</c:val></c:ser>",
            escape_xml(&series.name),
            str_lit(&chart.data.categories),
            num_lit(&series.values),
        ));
    }
    out
}

/// Series with numeric x values parsed from the category labels.
///
/// A label that parses as a number is used directly; otherwise the
/// 1-based category position stands in for it.
fn xy_series_xml(chart: &Chart) -> String {
    let xs: Vec<f64> = chart
        .data
        .categories
        .iter()
        .enumerate()
        .map(|(i, label)| label.trim().parse::<f64>().unwrap_or((i + 1) as f64))
        .collect();
    let labels = if chart.data_labels { DATA_LABELS } else { "" };

    let mut out = String::new();
    for (i, series) in chart.data.series.iter().enumerate() {
        out.push_str(&format!(
            "<c:ser><c:idx val=\"{i}\"/><c:order val=\"{i}\"/><c:tx><c:v>{}</c:v></c:tx>{labels}<c:xVal>{}</c:xVal><c:yVal>{}</c:yVal></c:ser>",
            escape_xml(&series.name),
            num_lit(&xs),
            num_lit(&series.values),
        ));
    }
    out
}

fn str_lit(items: &[String]) -> String {
    let mut pts = String::new();
    for (i, item) in items.iter().enumerate() {
        pts.push_str(&format!(
            "<c:pt idx=\"{}\"><c:v>{}</c:v></c:pt>",
            i,
            escape_xml(item)
        ));
    }
    format!(
        "<c:strLit><c:ptCount val=\"{}\"/>{}</c:strLit>",
        items.len(),
        pts
    )
}

fn num_lit(values: &[f64]) -> String {
    let mut pts = String::new();
    for (i, value) in values.iter().enumerate() {
        pts.push_str(&format!("<c:pt idx=\"{}\"><c:v>{}</c:v></c:pt>", i, value));
    }
    format!(
        "<c:numLit><c:formatCode>General</c:formatCode><c:ptCount val=\"{}\"/>{}</c:numLit>",
        values.len(),
        pts
    )
}

/// Category axis on the bottom, value axis on the left
fn category_axes_xml() -> &'static str {
    "<c:catAx><c:axId val=\"1\"/><c:scaling><c:orientation val=\"minMax\"/></c:scaling><c:delete val=\"0\"/><c:axPos val=\"b\"/><c:crossAx val=\"2\"/></c:catAx><c:valAx><c:axId val=\"2\"/><c:scaling><c:orientation val=\"minMax\"/></c:scaling><c:delete val=\"0\"/><c:axPos val=\"l\"/><c:crossAx val=\"1\"/></c:valAx>"
}

/// Two value axes, for scatter plots
fn value_axes_xml() -> &'static str {
    "<c:valAx><c:axId val=\"1\"/><c:scaling><c:orientation val=\"minMax\"/></c:scaling><c:delete val=\"0\"/><c:axPos val=\"b\"/><c:crossAx val=\"2\"/></c:valAx><c:valAx><c:axId val=\"2\"/><c:scaling><c:orientation val=\"minMax\"/></c:scaling><c:delete val=\"0\"/><c:axPos val=\"l\"/><c:crossAx val=\"1\"/></c:valAx>"
}

/// Generate a `p:txBody` with body properties and paragraphs
fn txbody_xml(frame: &TextFrame) -> String {
    let mut body_attrs = String::new();
    if !frame.word_wrap {
        body_attrs.push_str(" wrap=\"none\"");
    }
    if let Some(anchor) = frame.anchor {
        body_attrs.push_str(&format!(" anchor=\"{}\"", anchor.ooxml_value()));
    }

    format!(
        "        <p:txBody>\n          <a:bodyPr{}/>\n          <a:lstStyle/>\n          {}\n        </p:txBody>\n",
        body_attrs,
        paragraphs_xml(frame)
    )
}

/// Paragraph elements only, shared between shapes and table cells
fn paragraphs_xml(frame: &TextFrame) -> String {
    if frame.paragraphs.is_empty() {
        return "<a:p><a:endParaRPr lang=\"en-US\"/></a:p>".to_string();
    }
    frame.paragraphs.iter().map(paragraph_xml).collect()
}

fn paragraph_xml(paragraph: &Paragraph) -> String {
    let mut attrs = String::new();
    if paragraph.level > 0 {
        attrs.push_str(&format!(" lvl=\"{}\"", paragraph.level));
    }
    if let Some(alignment) = paragraph.alignment {
        attrs.push_str(&format!(" algn=\"{}\"", alignment.ooxml_value()));
    }

    let spacing = paragraph
        .line_spacing
        .map(|factor| {
            format!(
                "<a:lnSpc><a:spcPct val=\"{}\"/></a:lnSpc>",
                (factor * 100_000.0).round() as i64
            )
        })
        .unwrap_or_default();

    let ppr = if !spacing.is_empty() {
        format!("<a:pPr{}>{}</a:pPr>", attrs, spacing)
    } else if !attrs.is_empty() {
        format!("<a:pPr{}/>", attrs)
    } else {
        String::new()
    };

    let runs: String = paragraph.runs.iter().map(run_xml).collect();
    if runs.is_empty() {
        format!("<a:p>{}<a:endParaRPr lang=\"en-US\"/></a:p>", ppr)
    } else {
        format!("<a:p>{}{}</a:p>", ppr, runs)
    }
}

fn run_xml(run: &Run) -> String {
    let style = &run.style;
    let mut attrs = String::from(" lang=\"en-US\"");
    if let Some(size) = style.size_pt {
        attrs.push_str(&format!(" sz=\"{}\"", (size * 100.0).round() as i32));
    }
    if style.bold {
        attrs.push_str(" b=\"1\"");
    }
    if style.italic {
        attrs.push_str(" i=\"1\"");
    }

    let mut children = String::new();
    if let Some(color) = style.color {
        children.push_str(&format!(
            "<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>",
            color.hex()
        ));
    }
    if let Some(font) = &style.font {
        children.push_str(&format!("<a:latin typeface=\"{}\"/>", escape_xml(font)));
    }

    let rpr = if children.is_empty() {
        format!("<a:rPr{}/>", attrs)
    } else {
        format!("<a:rPr{}>{}</a:rPr>", attrs, children)
    };
    format!("<a:r>{}<a:t>{}</a:t></a:r>", rpr, escape_xml(&run.text))
}

/// Escape XML special characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartData, Series};
    use crate::text::Rgb;
    use std::io::Cursor;
    use zip::ZipArchive;

    fn archive_for(pres: &Presentation) -> ZipArchive<Cursor<Vec<u8>>> {
        let bytes = pres.to_bytes().unwrap();
        ZipArchive::new(Cursor::new(bytes)).unwrap()
    }

    fn part_text(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
        use std::io::Read;
        let mut part = archive.by_name(name).unwrap();
        let mut out = String::new();
        part.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_empty_deck_is_valid_zip() {
        let pres = Presentation::new();
        let mut archive = archive_for(&pres);

        assert!(archive.by_name("[Content_Types].xml").is_ok());
        assert!(archive.by_name("ppt/presentation.xml").is_ok());
        assert!(archive.by_name("ppt/slideMasters/slideMaster1.xml").is_ok());
        // The whole layout catalog is written even with no slides
        assert!(archive.by_name("ppt/slideLayouts/slideLayout9.xml").is_ok());
    }

    #[test]
    fn test_slides_and_rels_are_numbered() {
        let mut pres = Presentation::new();
        pres.add_slide(0).unwrap();
        pres.add_slide(1).unwrap();

        let mut archive = archive_for(&pres);
        assert!(archive.by_name("ppt/slides/slide1.xml").is_ok());
        assert!(archive.by_name("ppt/slides/slide2.xml").is_ok());

        // First slide was built on layout 0, so its rels point at slideLayout1
        let rels = part_text(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains("slideLayout1.xml"));

        let rels = part_text(&mut archive, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains("slideLayout2.xml"));
    }

    #[test]
    fn test_title_text_is_escaped() {
        let mut pres = Presentation::new();
        let index = pres.add_slide(0).unwrap();
        pres.slide_mut(index)
            .unwrap()
            .set_title("Q&A <Session>")
            .unwrap();

        let mut archive = archive_for(&pres);
        let slide = part_text(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide.contains("Q&amp;A &lt;Session&gt;"));
        assert!(slide.contains("ctrTitle"));
    }

    #[test]
    fn test_chart_parts_are_written() {
        let mut pres = Presentation::new();
        let index = pres.add_slide(6).unwrap();
        let data = ChartData::new(
            vec!["A".into(), "B".into()],
            vec![Series::new("S1", vec![1.0, 2.0])],
        );
        let chart = Chart::new("Chart 1", ChartKind::Column, (0, 0), (914_400, 914_400), data)
            .unwrap();
        pres.slide_mut(index).unwrap().add_chart(chart);

        let mut archive = archive_for(&pres);
        let chart_xml = part_text(&mut archive, "ppt/charts/chart1.xml");
        assert!(chart_xml.contains("<c:barChart>"));
        assert!(chart_xml.contains("<c:barDir val=\"col\"/>"));
        assert!(chart_xml.contains("<c:legendPos val=\"r\"/>"));

        let rels = part_text(&mut archive, "ppt/slides/_rels/slide1.xml.rels");
        assert!(rels.contains("charts/chart1.xml"));

        let types = part_text(&mut archive, "[Content_Types].xml");
        assert!(types.contains("/ppt/charts/chart1.xml"));
    }

    #[test]
    fn test_media_parts_are_written() {
        let img = {
            let buf = image::RgbaImage::new(2, 2);
            let mut out = Cursor::new(Vec::new());
            buf.write_to(&mut out, image::ImageFormat::Png).unwrap();
            out.into_inner()
        };

        let mut pres = Presentation::new();
        let index = pres.add_slide(6).unwrap();
        let picture = Picture::from_bytes("Picture 1", img).unwrap();
        pres.slide_mut(index).unwrap().add_picture(picture);

        let mut archive = archive_for(&pres);
        assert!(archive.by_name("ppt/media/image1.png").is_ok());

        let slide = part_text(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide.contains("r:embed=\"rId2\""));
    }

    #[test]
    fn test_table_grid_and_cells() {
        let mut pres = Presentation::new();
        let index = pres.add_slide(6).unwrap();
        let slide = pres.slide_mut(index).unwrap();
        let table = slide
            .add_table(2, 2, (0, 0), (914_400 * 4, 914_400 * 2))
            .unwrap();
        table.set_cell_text(0, 0, "Term").unwrap();
        table.set_cell_text(0, 1, "Concept").unwrap();

        let mut archive = archive_for(&pres);
        let slide_xml = part_text(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide_xml.contains("<a:tbl>"));
        assert!(slide_xml.contains("Term"));
        assert_eq!(slide_xml.matches("<a:gridCol").count(), 2);
        assert_eq!(slide_xml.matches("<a:tr ").count(), 2);
    }

    #[test]
    fn test_autoshape_fill_and_line() {
        let mut pres = Presentation::new();
        let index = pres.add_slide(6).unwrap();
        let slide = pres.slide_mut(index).unwrap();
        let shape = slide.add_auto_shape(
            crate::shape::ShapeKind::Oval,
            (914_400, 914_400),
            (914_400, 914_400),
        );
        shape.fill = Some(Rgb::new(0x33, 0x66, 0x99));
        shape.line_width_pt = Some(2.0);

        let mut archive = archive_for(&pres);
        let slide_xml = part_text(&mut archive, "ppt/slides/slide1.xml");
        assert!(slide_xml.contains("prst=\"ellipse\""));
        assert!(slide_xml.contains("336699"));
        assert!(slide_xml.contains("<a:ln w=\"25400\">"));
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_line_spacing_is_percentage() {
        let frame = TextFrame::bullet_list(["one", "two"], Some(1.5));
        let xml = paragraphs_xml(&frame);
        assert!(xml.contains("<a:spcPct val=\"150000\"/>"));
        // Only the first paragraph carries spacing
        assert_eq!(xml.matches("spcPct").count(), 1);
    }
}
