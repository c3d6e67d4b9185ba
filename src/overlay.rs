use crate::constants::STATS_CLASS;
use crate::dom;
use scene_core::FpsSample;
use web_sys as web;

/// Frame-rate readout pinned to the top-left corner of the container.
pub struct StatsOverlay {
    root: web::HtmlElement,
}

impl StatsOverlay {
    pub fn mount(document: &web::Document, container: &web::HtmlElement) -> anyhow::Result<Self> {
        let root: web::HtmlElement = dom::create_element(document, "div")?;
        root.set_class_name(STATS_CLASS);
        dom::set_styles(
            &root,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("z-index", "10000"),
                ("min-width", "80px"),
                ("padding", "3px 6px"),
                ("background", "rgba(0, 0, 34, 0.9)"),
                ("color", "#0ff"),
                ("font", "bold 9px Helvetica, Arial, sans-serif"),
                ("pointer-events", "none"),
            ],
        );
        root.set_text_content(Some("-- FPS"));
        dom::append(container, &root)?;
        Ok(Self { root })
    }

    pub fn element(&self) -> &web::HtmlElement {
        &self.root
    }

    pub fn show(&self, sample: &FpsSample) {
        self.root.set_text_content(Some(&sample.label()));
    }

    pub fn remove(&self) {
        dom::remove(&self.root);
    }
}
