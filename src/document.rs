use crate::{
    canvas::RenderedPage,
    content::render_page,
    font::FontBook,
    image::Image,
    info::Info,
    layout::PageGeometry,
    outline::Outline,
    rect::Rect,
    refs::{ObjectReferences, RefType},
    ComposeError,
};
use id_arena::Arena;
use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Filter, Finish, Name, Pdf, Ref};
use std::io::Write;

/// A fully composed document: every page carries its content and footer, and the page
/// count is final. Nothing about it changes after it is built; it can only be written.
#[derive(Debug)]
pub struct FinalDocument {
    geometry: PageGeometry,
    pages: Vec<RenderedPage>,
    images: Arena<Image>,
    outline: Outline,
    info: Info,
}

impl FinalDocument {
    pub(crate) fn new(
        geometry: PageGeometry,
        pages: Vec<RenderedPage>,
        images: Arena<Image>,
        outline: Outline,
        info: Info,
    ) -> FinalDocument {
        FinalDocument {
            geometry,
            pages,
            images,
            outline,
            info,
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn pages(&self) -> &[RenderedPage] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Serialize the document as PDF, drawing text with the faces in `fonts`
    pub fn to_bytes(&self, fonts: &FontBook) -> Result<Vec<u8>, ComposeError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        self.info.write(&mut refs, &mut writer);

        let page_refs: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs.iter().copied());

        let mut font_names = Vec::new();
        for (id, face) in fonts.iter() {
            face.write(&mut refs, id.index(), &mut writer);
            font_names.push((format!("F{}", id.index()), RefType::Font(id.index())));
        }

        let mut image_names = Vec::new();
        for (id, image) in self.images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
            image_names.push((format!("I{}", id.index()), RefType::Image(id.index())));
        }

        let media_box: pdf_writer::Rect =
            Rect::page(self.geometry.width, self.geometry.height).into();
        for (page_index, (page, page_id)) in self.pages.iter().zip(page_refs.iter()).enumerate() {
            let content_id = refs.gen(RefType::ContentForPage(page_index));

            let mut pdf_page = writer.page(*page_id);
            pdf_page.media_box(media_box);
            pdf_page.parent(page_tree_id);
            let mut resources = pdf_page.resources();
            let mut resource_fonts = resources.fonts();
            for (name, ref_type) in font_names.iter() {
                if let Some(id) = refs.get(*ref_type) {
                    resource_fonts.pair(Name(name.as_bytes()), id);
                }
            }
            resource_fonts.finish();
            let mut resource_xobjects = resources.x_objects();
            for (name, ref_type) in image_names.iter() {
                if let Some(id) = refs.get(*ref_type) {
                    resource_xobjects.pair(Name(name.as_bytes()), id);
                }
            }
            resource_xobjects.finish();
            resources.finish();
            pdf_page.contents(content_id);
            pdf_page.finish();

            let rendered = render_page(page, self.geometry.height, fonts)?;
            let compressed = compress_to_vec_zlib(&rendered, 6);
            writer
                .stream(content_id, compressed.as_slice())
                .filter(Filter::FlateDecode);
        }

        let outlines_id = self.outline.write(&mut refs, &mut writer);

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outlines_id) = outlines_id {
            catalog.outlines(outlines_id);
        }
        catalog.finish();

        Ok(writer.finish())
    }

    /// Write the entire document to `w`. The PDF is assembled in memory first, so
    /// nothing reaches `w` when serialization fails.
    pub fn write<W: Write>(&self, fonts: &FontBook, mut w: W) -> Result<(), ComposeError> {
        let bytes = self.to_bytes(fonts)?;
        w.write_all(&bytes).map_err(Into::into)
    }
}
