//! Package parts that do not depend on deck content.
//!
//! One slide master, one blank layout, and one theme are enough for
//! PowerPoint, Keynote, and LibreOffice to open the package.
//!
//! These parts are fixed markup with only numeric ids and sizes filled in,
//! so they are built as strings. Slide XML carries user text and goes
//! through `quick_xml::Writer` in `writer.rs` for escaping.

pub const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const NS_PKG_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub const ROOT_RELS_PATH: &str = "_rels/.rels";
pub const PRESENTATION_PATH: &str = "ppt/presentation.xml";
pub const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";
pub const SLIDE_MASTER_PATH: &str = "ppt/slideMasters/slideMaster1.xml";
pub const SLIDE_MASTER_RELS_PATH: &str = "ppt/slideMasters/_rels/slideMaster1.xml.rels";
pub const SLIDE_LAYOUT_PATH: &str = "ppt/slideLayouts/slideLayout1.xml";
pub const SLIDE_LAYOUT_RELS_PATH: &str = "ppt/slideLayouts/_rels/slideLayout1.xml.rels";
pub const THEME_PATH: &str = "ppt/theme/theme1.xml";

/// Path of the n-th slide part (1-based).
pub fn slide_path(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

/// Path of the n-th slide's relationships part (1-based).
pub fn slide_rels_path(number: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", number)
}

/// `[Content_Types].xml` for a package with `slide_count` slides.
pub fn content_types(slide_count: usize) -> String {
    let slides: String = (1..=slide_count)
        .map(|n| {
            format!(
                r#"<Override PartName="/{}" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#,
                slide_path(n)
            )
        })
        .collect();

    format!(
        concat!(
            "{decl}",
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
            r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
            r#"<Default Extension="xml" ContentType="application/xml"/>"#,
            r#"<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>"#,
            r#"<Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>"#,
            r#"<Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>"#,
            r#"<Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#,
            "{slides}",
            "</Types>"
        ),
        decl = XML_DECL,
        slides = slides,
    )
}

/// `_rels/.rels`, pointing at the presentation part.
pub fn root_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="ppt/presentation.xml"/></Relationships>"#,
        XML_DECL, NS_PKG_RELS, REL_OFFICE_DOCUMENT
    )
}

/// `ppt/presentation.xml` listing `slide_count` slides.
///
/// Relationship ids: `rId1` is the master, slides are `rId2..`, and the
/// theme comes last.
pub fn presentation(slide_count: usize, width: i64, height: i64) -> String {
    let slide_ids: String = (1..=slide_count)
        .map(|n| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 255 + n, n + 1))
        .collect();

    format!(
        concat!(
            "{decl}",
            r#"<p:presentation xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" saveSubsetFonts="1">"#,
            r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#,
            "<p:sldIdLst>{slides}</p:sldIdLst>",
            r#"<p:sldSz cx="{cx}" cy="{cy}"/>"#,
            r#"<p:notesSz cx="{cy}" cy="{cx}"/>"#,
            "</p:presentation>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        slides = slide_ids,
        cx = width,
        cy = height,
    )
}

/// `ppt/_rels/presentation.xml.rels` for `slide_count` slides.
pub fn presentation_rels(slide_count: usize) -> String {
    let mut rels = format!(
        r#"<Relationship Id="rId1" Type="{}" Target="slideMasters/slideMaster1.xml"/>"#,
        REL_SLIDE_MASTER
    );
    for n in 1..=slide_count {
        rels.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="{}" Target="slides/slide{}.xml"/>"#,
            n + 1,
            REL_SLIDE,
            n
        ));
    }
    rels.push_str(&format!(
        r#"<Relationship Id="rId{}" Type="{}" Target="theme/theme1.xml"/>"#,
        slide_count + 2,
        REL_THEME
    ));

    format!(
        r#"{}<Relationships xmlns="{}">{}</Relationships>"#,
        XML_DECL, NS_PKG_RELS, rels
    )
}

/// Relationships of every slide: just the blank layout.
pub fn slide_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="../slideLayouts/slideLayout1.xml"/></Relationships>"#,
        XML_DECL, NS_PKG_RELS, REL_SLIDE_LAYOUT
    )
}

const EMPTY_SHAPE_TREE: &str = concat!(
    r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
    "</p:spTree>"
);

pub fn slide_master() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            "<p:cSld>{tree}</p:cSld>",
            r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#,
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "</p:sldMaster>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = EMPTY_SHAPE_TREE,
    )
}

pub fn slide_master_rels() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<Relationships xmlns="{ns}">"#,
            r#"<Relationship Id="rId1" Type="{layout}" Target="../slideLayouts/slideLayout1.xml"/>"#,
            r#"<Relationship Id="rId2" Type="{theme}" Target="../theme/theme1.xml"/>"#,
            "</Relationships>"
        ),
        decl = XML_DECL,
        ns = NS_PKG_RELS,
        layout = REL_SLIDE_LAYOUT,
        theme = REL_THEME,
    )
}

pub fn slide_layout() -> String {
    format!(
        concat!(
            "{decl}",
            r#"<p:sldLayout xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" type="blank" preserve="1">"#,
            r#"<p:cSld name="Blank">{tree}</p:cSld>"#,
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sldLayout>"
        ),
        decl = XML_DECL,
        a = NS_A,
        r = NS_R,
        p = NS_P,
        tree = EMPTY_SHAPE_TREE,
    )
}

pub fn slide_layout_rels() -> String {
    format!(
        r#"{}<Relationships xmlns="{}"><Relationship Id="rId1" Type="{}" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#,
        XML_DECL, NS_PKG_RELS, REL_SLIDE_MASTER
    )
}

/// A plain theme: Office colors, Calibri fonts, flat fills and lines.
pub fn theme() -> String {
    let solid = |color: &str| format!(r#"<a:solidFill><a:schemeClr val="{}"/></a:solidFill>"#, color);
    let fills = solid("phClr").repeat(3);
    let lines: String = [6350, 12700, 19050]
        .iter()
        .map(|w| format!(r#"<a:ln w="{}">{}</a:ln>"#, w, solid("phClr")))
        .collect();
    let effects = "<a:effectStyle><a:effectLst/></a:effectStyle>".repeat(3);

    format!(
        concat!(
            "{decl}",
            r#"<a:theme xmlns:a="{a}" name="Deck">"#,
            "<a:themeElements>",
            r#"<a:clrScheme name="Office">"#,
            r#"<a:dk1><a:srgbClr val="000000"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>"#,
            r#"<a:dk2><a:srgbClr val="0F172A"/></a:dk2><a:lt2><a:srgbClr val="F1F5F9"/></a:lt2>"#,
            r#"<a:accent1><a:srgbClr val="0D9488"/></a:accent1><a:accent2><a:srgbClr val="0074D9"/></a:accent2>"#,
            r#"<a:accent3><a:srgbClr val="39CCCC"/></a:accent3><a:accent4><a:srgbClr val="001F3F"/></a:accent4>"#,
            r#"<a:accent5><a:srgbClr val="1E293B"/></a:accent5><a:accent6><a:srgbClr val="646464"/></a:accent6>"#,
            r#"<a:hlink><a:srgbClr val="0074D9"/></a:hlink><a:folHlink><a:srgbClr val="001F3F"/></a:folHlink>"#,
            "</a:clrScheme>",
            r#"<a:fontScheme name="Office">"#,
            r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
            r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
            "</a:fontScheme>",
            r#"<a:fmtScheme name="Office">"#,
            "<a:fillStyleLst>{fills}</a:fillStyleLst>",
            "<a:lnStyleLst>{lines}</a:lnStyleLst>",
            "<a:effectStyleLst>{effects}</a:effectStyleLst>",
            "<a:bgFillStyleLst>{fills}</a:bgFillStyleLst>",
            "</a:fmtScheme>",
            "</a:themeElements>",
            "</a:theme>"
        ),
        decl = XML_DECL,
        a = NS_A,
        fills = fills,
        lines = lines,
        effects = effects,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_lists_every_slide() {
        let xml = content_types(3);
        assert!(xml.contains("/ppt/slides/slide1.xml"));
        assert!(xml.contains("/ppt/slides/slide3.xml"));
        assert!(!xml.contains("/ppt/slides/slide4.xml"));
    }

    #[test]
    fn test_presentation_rels_ids() {
        let xml = presentation_rels(2);
        assert!(xml.contains(r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml""#));
        assert!(xml.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml""#));
        assert!(xml.contains(r#"Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme""#));
    }

    #[test]
    fn test_presentation_slide_ids_start_at_256() {
        let xml = presentation(2, 9_144_000, 6_858_000);
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }

    #[test]
    fn test_static_parts_are_well_formed() {
        for xml in [
            root_rels(),
            slide_master(),
            slide_master_rels(),
            slide_layout(),
            slide_layout_rels(),
            slide_rels(),
            theme(),
            content_types(3),
            presentation(3, 9_144_000, 6_858_000),
            presentation_rels(3),
        ] {
            let mut reader = quick_xml::Reader::from_str(&xml);
            loop {
                match reader.read_event() {
                    Ok(quick_xml::events::Event::Eof) => break,
                    Ok(_) => {}
                    Err(e) => panic!("malformed part: {}\n{}", e, xml),
                }
            }
        }
    }
}
