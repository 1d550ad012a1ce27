//! TerrainBuilder template library (`.tml`) serialization.
//!
//! Every library becomes one XML file named after the lowercased group key.
//! Apart from name, file, date, colors and hash, each template carries the
//! fixed defaults TerrainBuilder writes for a freshly imported model.

use crate::data::{LibraryPlan, TemplateEntry};
use crate::error::CatalogError;
use crate::paths::{split_segs, to_backslashes};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

/// Timestamp layout of the `<Date>` element.
pub const DATE_FORMAT: &str = "%m/%d/%y %H:%M:%S";

const TEMPLATE_DEFAULTS: &str = "\
\t\t<ScaleRandMin>0.000000</ScaleRandMin>\n\t\t<ScaleRandMax>0.000000</ScaleRandMax>
\t\t<YawRandMin>0.000000</YawRandMin>\n\t\t<YawRandMax>0.000000</YawRandMax>
\t\t<PitchRandMin>0.000000</PitchRandMin>\n\t\t<PitchRandMax>0.000000</PitchRandMax>
\t\t<RollRandMin>0.000000</RollRandMin>\n\t\t<RollRandMax>0.000000</RollRandMax>
\t\t<TexLLU>0.000000</TexLLU>\n\t\t<TexLLV>0.000000</TexLLV>
\t\t<TexURU>1.000000</TexURU>\n\t\t<TexURV>1.000000</TexURV>
\t\t<BBRadius>-1.000000</BBRadius>\n\t\t<BBHScale>1.000000</BBHScale>
\t\t<AutoCenter>0</AutoCenter>
\t\t<XShift>0.000000</XShift>\n\t\t<YShift>0.000000</YShift>
\t\t<ZShift>0.000000</ZShift>\n\t\t<Height>0.000000</Height>
\t\t<BoundingMin X=\"999.000000\" Y=\"999.000000\" Z=\"999.000000\" />
\t\t<BoundingMax X=\"-999.000000\" Y=\"-999.000000\" Z=\"-999.000000\" />
\t\t<BoundingCenter X=\"-999.000000\" Y=\"-999.000000\" Z=\"-999.000000\" />
\t\t<Placement></Placement>\n\t</Template>\n";

/// Escapes `&`, `<` and `>` for element text.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes element text plus `"` for attribute values.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Current local time in the `<Date>` layout.
pub fn timestamp() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

fn push_header(buf: &mut String, plan: &LibraryPlan) {
    buf.push_str("<?xml version=\"1.0\" ?>\n<Library name=\"");
    buf.push_str(&escape_attr(&plan.name));
    buf.push_str("\" shape=\"");
    buf.push_str(&escape_attr(plan.style.shape.as_str()));
    buf.push_str("\" default_fill=\"");
    buf.push_str(&plan.style.fill.to_string());
    buf.push_str("\" default_outline=\"");
    buf.push_str(&plan.style.outline.to_string());
    buf.push_str("\" tex=\"0\">\n");
}

fn push_template(buf: &mut String, entry: &TemplateEntry, plan: &LibraryPlan, date: &str) {
    let file = to_backslashes(&split_segs(&entry.rel_path).join("/"));

    buf.push_str("\t<Template>\n\t\t<Name>");
    buf.push_str(&escape_text(&entry.display_name));
    buf.push_str("</Name>\n\t\t<File>");
    buf.push_str(&escape_text(&file));
    buf.push_str("</File>\n\t\t<Date>");
    buf.push_str(date);
    buf.push_str("</Date>\n\t\t<Archive></Archive>\n\t\t<Fill>");
    buf.push_str(&plan.style.fill.to_string());
    buf.push_str("</Fill>\n\t\t<Outline>");
    buf.push_str(&plan.style.outline.to_string());
    buf.push_str("</Outline>\n\t\t<Scale>1.000000</Scale>\n\t\t<Hash>");
    buf.push_str(&entry.hash.to_string());
    buf.push_str("</Hash>\n");
    buf.push_str(TEMPLATE_DEFAULTS);
}

/// Renders a whole library document using `date` for every template.
pub fn render_library(plan: &LibraryPlan, date: &str) -> String {
    let mut buf = String::with_capacity(512 + plan.templates.len() * 900);
    push_header(&mut buf, plan);
    for entry in &plan.templates {
        push_template(&mut buf, entry, plan, date);
    }
    buf.push_str("</Library>\n");
    buf
}

/// Path of the file a library is written to.
pub fn library_path(out_dir: &Path, plan: &LibraryPlan) -> PathBuf {
    out_dir.join(format!("{}.tml", plan.name))
}

/// Writes `<out_dir>/<name>.tml`, stamped with the current local time.
pub fn write_library(out_dir: &Path, plan: &LibraryPlan) -> Result<PathBuf, CatalogError> {
    let path = library_path(out_dir, plan);
    let body = render_library(plan, &timestamp());
    fs::write(&path, body).map_err(|e| CatalogError::io(format!("write {}", path.display()), e))?;
    Ok(path)
}

/// Writes every library in order, returning the files created.
pub fn write_libraries(out_dir: &Path, plans: &[LibraryPlan]) -> Result<Vec<PathBuf>, CatalogError> {
    plans.iter().map(|plan| write_library(out_dir, plan)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{LibraryStyle, Shape};
    use tempfile::TempDir;

    fn plan() -> LibraryPlan {
        LibraryPlan {
            key: "DZ_plants_bush".to_string(),
            name: "dz_plants_bush".to_string(),
            style: LibraryStyle {
                fill: -16744448,
                outline: -1,
                shape: Shape::Ellipse,
            },
            templates: vec![TemplateEntry {
                display_name: "b<1>".to_string(),
                rel_path: "DZ/plants/bush/b&1.p3d".to_string(),
                hash: -42,
            }],
        }
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_text("a&b<c>\"d\""), "a&amp;b&lt;c&gt;\"d\"");
        assert_eq!(escape_attr("a\"b&"), "a&quot;b&amp;");
    }

    #[test]
    fn test_render_library() {
        let doc = render_library(&plan(), "01/02/06 15:04:05");

        assert!(doc.starts_with(
            "<?xml version=\"1.0\" ?>\n<Library name=\"dz_plants_bush\" shape=\"ellipse\" \
             default_fill=\"-16744448\" default_outline=\"-1\" tex=\"0\">\n"
        ));
        assert!(doc.contains("\t<Template>\n\t\t<Name>b&lt;1&gt;</Name>\n"));
        assert!(doc.contains("<File>DZ\\plants\\bush\\b&amp;1.p3d</File>"));
        assert!(doc.contains("<Date>01/02/06 15:04:05</Date>\n\t\t<Archive></Archive>"));
        assert!(doc.contains("<Fill>-16744448</Fill>\n\t\t<Outline>-1</Outline>"));
        assert!(doc.contains("<Scale>1.000000</Scale>\n\t\t<Hash>-42</Hash>\n"));
        assert!(doc.contains("<BoundingMin X=\"999.000000\" Y=\"999.000000\" Z=\"999.000000\" />"));
        assert!(doc.ends_with("\t\t<Placement></Placement>\n\t</Template>\n</Library>\n"));
        assert_eq!(doc.matches("<Template>").count(), 1);
    }

    #[test]
    fn test_empty_library_is_well_formed() {
        let mut empty = plan();
        empty.templates.clear();
        let doc = render_library(&empty, "x");
        assert!(doc.ends_with("tex=\"0\">\n</Library>\n"));
    }

    #[test]
    fn test_write_library() {
        let tmp = TempDir::new().unwrap();
        let path = write_library(tmp.path(), &plan()).unwrap();
        assert_eq!(path, tmp.path().join("dz_plants_bush.tml"));

        let doc = fs::read_to_string(&path).unwrap();
        assert!(doc.contains("<Name>b&lt;1&gt;</Name>"));
    }

    #[test]
    fn test_timestamp_layout() {
        let stamp = timestamp();
        assert_eq!(stamp.len(), 17);
        assert_eq!(&stamp[2..3], "/");
        assert_eq!(&stamp[8..9], " ");
    }
}
