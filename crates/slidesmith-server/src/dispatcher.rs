//! Operation dispatch.
//!
//! The dispatcher owns the session map and runs one operation per request.
//! Every [`DispatchError`] is converted into a structured failure response
//! here; callers never see an `Err`, and one bad request never takes the
//! host down.

use std::path::Path;

use slidesmith_pptx::constants::emu_from_inches;
use slidesmith_pptx::{Picture, Presentation, TextFrame};

use crate::error::{DispatchError, Result};
use crate::protocol::{Request, Response};
use crate::session::SessionManager;

pub struct Dispatcher {
    sessions: SessionManager,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            sessions: SessionManager::new(),
        }
    }

    /// Parse one request line and dispatch it. Malformed input becomes a
    /// failure response, not an error.
    pub fn handle_line(&self, line: &str) -> Response {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle(request),
            Err(e) => {
                log::warn!("malformed request: {e}");
                Response::failure(format!("malformed request: {e}"))
            }
        }
    }

    /// Dispatch one request, converting any failure into a response.
    pub fn handle(&self, request: Request) -> Response {
        let operation = request.operation_name();
        log::debug!("dispatching {operation}");
        match self.dispatch(request) {
            Ok(response) => response,
            Err(e) => {
                log::warn!("{operation} failed [{}]: {e}", e.code());
                Response::failure(e.to_string())
            }
        }
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.session_count()
    }

    fn dispatch(&self, request: Request) -> Result<Response> {
        match request {
            Request::CreatePresentation => self.create_presentation(),
            Request::OpenPresentation { file_path } => self.open_presentation(&file_path),
            Request::SavePresentation {
                presentation_id,
                file_path,
            } => self.save_presentation(&presentation_id, &file_path),
            Request::AddSlide {
                presentation_id,
                layout_index,
            } => self.add_slide(&presentation_id, layout_index),
            Request::SetTitle {
                presentation_id,
                slide_index,
                title,
            } => self.set_title(&presentation_id, slide_index, &title),
            Request::AddBulletPoints {
                presentation_id,
                slide_index,
                bullet_points,
                placeholder_idx,
            } => self.add_bullet_points(&presentation_id, slide_index, bullet_points, placeholder_idx),
            Request::AddImage {
                presentation_id,
                slide_index,
                image_path,
                left,
                top,
                width,
                height,
            } => self.add_image(&presentation_id, slide_index, &image_path, left, top, width, height),
            Request::AddTable { .. } => Err(DispatchError::not_implemented("add_table")),
            Request::AddShape { .. } => Err(DispatchError::not_implemented("add_shape")),
            Request::AddChart { .. } => Err(DispatchError::not_implemented("add_chart")),
            Request::ClosePresentation { presentation_id } => {
                self.close_presentation(&presentation_id)
            }
            Request::GenerateFromTemplate {
                content_path,
                design_path,
                output_path,
            } => self.generate_from_template(&content_path, &design_path, output_path.as_deref()),
        }
    }

    fn create_presentation(&self) -> Result<Response> {
        let id = self.sessions.create();
        Ok(Response::ok(format!("created presentation {id}"))
            .with_presentation_id(id)
            .with_slide_count(0))
    }

    fn open_presentation(&self, file_path: &Path) -> Result<Response> {
        let pres = Presentation::open(file_path)?;
        let count = pres.slide_count();
        let id = self.sessions.insert(pres);
        Ok(
            Response::ok(format!("opened {} as {id}", file_path.display()))
                .with_presentation_id(id)
                .with_slide_count(count),
        )
    }

    fn save_presentation(&self, id: &str, file_path: &Path) -> Result<Response> {
        self.sessions
            .with_session(id, |pres| Ok(pres.save(file_path)?))?;
        Ok(Response::ok(format!("saved {id}"))
            .with_presentation_id(id)
            .with_file_path(file_path.display().to_string()))
    }

    fn add_slide(&self, id: &str, layout_index: usize) -> Result<Response> {
        let (index, layout_name) = self.sessions.with_session(id, |pres| {
            let index = pres.add_slide(layout_index)?;
            let layout_name = pres.slide(index)?.layout_name.clone();
            Ok((index, layout_name))
        })?;
        Ok(
            Response::ok(format!("added slide {index} ({layout_name})"))
                .with_presentation_id(id)
                .with_slide_index(index)
                .with_layout_name(layout_name),
        )
    }

    fn set_title(&self, id: &str, slide_index: usize, title: &str) -> Result<Response> {
        self.sessions
            .with_session(id, |pres| Ok(pres.slide_mut(slide_index)?.set_title(title)?))?;
        Ok(Response::ok(format!("set title on slide {slide_index}"))
            .with_presentation_id(id)
            .with_slide_index(slide_index))
    }

    fn add_bullet_points(
        &self,
        id: &str,
        slide_index: usize,
        bullet_points: Vec<String>,
        placeholder_idx: u32,
    ) -> Result<Response> {
        let count = bullet_points.len();
        self.sessions.with_session(id, |pres| {
            let placeholder = pres.slide_mut(slide_index)?.placeholder_mut(placeholder_idx)?;
            placeholder.frame = TextFrame::bullet_list(bullet_points, None);
            Ok(())
        })?;
        Ok(
            Response::ok(format!("added {count} bullet points to slide {slide_index}"))
                .with_presentation_id(id)
                .with_slide_index(slide_index),
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn add_image(
        &self,
        id: &str,
        slide_index: usize,
        image_path: &Path,
        left: f64,
        top: f64,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<Response> {
        self.sessions.with_session(id, |pres| {
            let mut picture = Picture::from_file("Picture", image_path)?;
            picture.place(
                (emu_from_inches(left), emu_from_inches(top)),
                width.map(emu_from_inches),
                height.map(emu_from_inches),
            );
            pres.slide_mut(slide_index)?.add_picture(picture);
            Ok(())
        })?;
        Ok(
            Response::ok(format!("added image to slide {slide_index}"))
                .with_presentation_id(id)
                .with_slide_index(slide_index),
        )
    }

    fn close_presentation(&self, id: &str) -> Result<Response> {
        self.sessions.close(id)?;
        Ok(Response::ok(format!("closed presentation {id}")))
    }

    fn generate_from_template(
        &self,
        content_path: &Path,
        design_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<Response> {
        let output = slidesmith_core::generate_deck(design_path, content_path, output_path)?;
        Ok(
            Response::ok(format!("generated deck at {}", output.display()))
                .with_output_path(output.display().to_string()),
        )
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}
