use askama::Template;

/// Upload form and per-session gallery. The page talks to the ingest
/// endpoint from the browser; the server only renders the shell.
#[derive(Template)]
#[template(path = "gallery.html")]
pub struct GalleryTemplate {
    pub upload_path: &'static str,
}

pub fn render_template<T: Template>(template: T) -> Result<String, askama::Error> {
    template.render()
}
