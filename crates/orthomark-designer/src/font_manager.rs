//! System font lookup for overlay text.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::{fs, sync::OnceLock};
use tracing::{debug, warn};

/// Families tried in order. CJK faces first so Chinese legend text renders,
/// then common Latin faces that still carry the degree/prime glyphs.
const PREFERRED_FAMILIES: &[&str] = &[
    "Noto Sans CJK SC",
    "Source Han Sans SC",
    "WenQuanYi Micro Hei",
    "SimHei",
    "Microsoft YaHei",
    "Times New Roman",
    "DejaVu Sans",
];

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Loaded {} system font faces", db.len());
        db
    })
}

/// Font used for all overlay text, or `None` when no usable face is installed.
///
/// Callers skip text drawing on `None`; geometry is still rendered.
pub fn label_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(|| {
        let font = PREFERRED_FAMILIES
            .iter()
            .find_map(|name| load_font_from_system(&[Family::Name(*name)]))
            .or_else(|| load_font_from_system(&[Family::SansSerif]));
        if font.is_none() {
            warn!("No system font found, exported images will carry no text");
        }
        font
    })
    .as_ref()
}

fn load_font_from_system(families: &[Family<'_>]) -> Option<Font<'static>> {
    let query = Query {
        families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db().query(&query)?;
    let face = db().face(id)?;

    match &face.source {
        fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}
