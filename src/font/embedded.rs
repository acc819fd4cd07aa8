use crate::{
    refs::{ObjectReferences, RefType},
    ComposeError, Pt,
};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::{collections::BTreeMap, path::Path};

/// A parsed TrueType / OpenType font that is embedded in its entirety in the generated PDF.
///
/// Text drawn with an embedded font is written as 2-byte glyph ids (Identity-H), so any
/// character the font covers can be rendered, unlike the WinAnsi-only standard faces.
pub struct Font {
    pub face: OwnedFace,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font").field("name", &self.name()).finish()
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, ComposeError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// Read and parse a font file from disk
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Font, ComposeError> {
        Font::load(std::fs::read(path)?)
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// The full name of the font, or a generic placeholder for unnamed faces
    pub fn name(&self) -> String {
        self.name_record(owned_ttf_parser::name_id::FULL_NAME)
            .unwrap_or_else(|| "EmbeddedFont".to_string())
    }

    fn family(&self) -> String {
        self.name_record(owned_ttf_parser::name_id::FAMILY)
            .unwrap_or_else(|| self.name())
    }

    fn name_record(&self, id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().ascender() as f32
    }

    /// Distance from the baseline to the bottom of the font; usually negative
    pub fn descent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face().descender() as f32
    }

    /// How far to move down between two consecutive baselines
    pub fn line_height(&self, size: Pt) -> Pt {
        let gap = self.scaling(size) * self.face().line_gap() as f32;
        gap + self.ascent(size) - self.descent(size)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// Glyph used to draw `ch`, falling back to U+FFFD, then `?`, then .notdef
    pub(crate) fn glyph_or_replacement(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    pub fn advance(&self, ch: char, size: Pt) -> Pt {
        let gid = GlyphId(self.glyph_or_replacement(ch));
        self.scaling(size) * self.face().glyph_hor_advance(gid).unwrap_or_default() as f32
    }

    /// Unicode-mapped glyphs of the font, keyed (and therefore sorted) by glyph id
    fn cmap(&self) -> BTreeMap<u16, char> {
        let mut map = BTreeMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };
        for subtable in cmap.subtables.into_iter().filter(|t| t.is_unicode()) {
            subtable.codepoints(|codepoint| {
                let glyph = subtable.glyph_index(codepoint).filter(|g| g.0 > 0);
                if let (Ok(ch), Some(glyph)) = (char::try_from(codepoint), glyph) {
                    map.entry(glyph.0).or_insert(ch);
                }
            });
        }
        map
    }

    /// Writes the Type0 font dictionary and everything it references
    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cmap = self.cmap();
        let cid_font_id = self.write_cid_font(refs, font_index, &cmap, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, &cmap, writer);

        let base_font = format!("F{font_index}");
        let mut font = writer.type0_font(font_id);
        font.base_font(Name(base_font.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_cid_font(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        cmap: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));
        let per_mille = 1000.0 / self.face().units_per_em() as f32;
        let base_font = format!("F{font_index}");

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(1000.0);

        // runs of consecutive glyph ids share one widths entry
        let mut widths = cid_font.widths();
        let mut run: Vec<f32> = Vec::new();
        let mut run_start: u16 = 0;
        for &gid in cmap.keys() {
            let width = self
                .face()
                .glyph_hor_advance(GlyphId(gid))
                .unwrap_or_default() as f32
                * per_mille;
            if !run.is_empty() && gid as usize != run_start as usize + run.len() {
                widths.consecutive(run_start, run.drain(..));
            }
            if run.is_empty() {
                run_start = gid;
            }
            run.push(width);
        }
        if !run.is_empty() {
            widths.consecutive(run_start, run.drain(..));
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face();
        let per_mille = 1000.0 / face.units_per_em() as f32;
        let bbox = face.global_bounding_box();

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let name = self.name().replace(' ', "");
        let family = self.family();
        let id = refs.gen(RefType::FontDescriptor(font_index));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect::new(
            bbox.x_min as f32 * per_mille,
            bbox.y_min as f32 * per_mille,
            bbox.x_max as f32 * per_mille,
            bbox.y_max as f32 * per_mille,
        ));
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * per_mille);
        descriptor.descent(face.descender() as f32 * per_mille);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * per_mille)
                .unwrap_or(700.0),
        );
        // not exposed by ttf-parser; 80 is the customary value for regular weights
        descriptor.stem_v(80.0);
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        cmap: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut map = String::from(
            "/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );

        // bfchar blocks hold at most 100 entries
        let entries: Vec<(&u16, &char)> = cmap.iter().collect();
        for block in entries.chunks(100) {
            map.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|u| format!("{u:04x}"))
                    .collect();
                map.push_str(&format!("<{gid:04x}> <{units}>\n"));
            }
            map.push_str("endbfchar\n");
        }
        map.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(map.as_bytes(), 6);
        writer
            .stream(id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        id
    }
}
